//! Quick manual throughput check of the codec paths.
use std::time::Instant;

use fastzeck::utils::random_exponential;
use fastzeck::{decode_u32, decode_u64, encode_u32, encode_u64, greedy};

pub fn main() {
    let n = 10_000_000;
    let data = random_exponential(n, 10_000.0, 23);

    // ------------------
    // fast path, u32
    // ------------------
    let now = Instant::now();
    let codes: Vec<u64> = data.iter().map(|&x| encode_u32(x as u32)).collect();
    let elapsed_time = now.elapsed();
    println!("encode_u32: {} in {:?}", codes.len(), elapsed_time);

    let now = Instant::now();
    let decoded: Vec<u32> = codes.iter().map(|&c| decode_u32(c)).collect();
    let elapsed_time = now.elapsed();
    println!("decode_u32: {} in {:?}", decoded.len(), elapsed_time);

    // ------------------
    // fast path, u64
    // ------------------
    let now = Instant::now();
    let codes: Vec<u128> = data.iter().map(|&x| encode_u64(x)).collect();
    let elapsed_time = now.elapsed();
    println!("encode_u64: {} in {:?}", codes.len(), elapsed_time);

    let now = Instant::now();
    let decoded: Vec<u64> = codes.iter().map(|&c| decode_u64(c)).collect();
    let elapsed_time = now.elapsed();
    println!("decode_u64: {} in {:?}", decoded.len(), elapsed_time);
    assert_eq!(decoded, data);

    // ------------------
    // reference codec, for scale
    // ------------------
    let now = Instant::now();
    let codes: Vec<u128> = data.iter().map(|&x| greedy::encode(x, true)).collect();
    let elapsed_time = now.elapsed();
    println!("greedy::encode: {} in {:?}", codes.len(), elapsed_time);

    let now = Instant::now();
    let decoded: Vec<u64> = codes.iter().map(|&c| greedy::decode(c, true)).collect();
    let elapsed_time = now.elapsed();
    println!("greedy::decode: {} in {:?}", decoded.len(), elapsed_time);
}
