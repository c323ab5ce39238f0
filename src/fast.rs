//! Table-driven Zeckendorf en/decoding of fixed-width integers, one 16bit
//! segment at a time.
//!
//! # Encoding
//! Instead of scanning the Fibonacci sequence bit by bit, the encoder resolves
//! a whole 16bit segment per step: a fixed-point multiply by a precomputed
//! reciprocal of phi^shift estimates which of the 2583 valid segment codewords
//! carries the top of the remaining value (see
//! [this paper](https://ceur-ws.org/Vol-567/paper14.pdf)), a single anchor
//! comparison corrects the estimate, and a table lookup yields the segment
//! bits. At most five such steps cover the full u64 domain.
//!
//! # Decoding
//! Each 16bit segment is decoded with one lookup into a full 65536-entry
//! table, and its contribution at shift k follows from the Fibonacci
//! left-shift identity (a great formula from
//! [this paper](https://arxiv.org/pdf/0712.0811)):
//!
//! ```text
//! V(code << k) = F[k] * V(code) + F[k-1] * V(code >> 1)
//! ```
//!
//! where the logical right shift carries the dropped low bit back in. The
//! value table is built over all 65536 bit patterns, the ones with several
//! adjacent set bits included, so a 16bit slice of a codeword needs no
//! validity of its own.
//!
//! # Usage
//! ```rust
//! use fastzeck::fast;
//! let code = fast::encode_u32(4);
//! assert_eq!(code, 0b1000);
//! assert_eq!(fast::decode_u32(code), 4);
//!
//! // round-trips the entire width, zero included
//! assert_eq!(fast::decode_u16(fast::encode_u16(65535)), 65535);
//! ```
//!
//! Every codeword represents `value + 1`, so 0 has a codeword too; the
//! decoders undo the shift. Encoders emit no two adjacent set bits; codeword
//! width is the input's codeword rounded up to whole 16bit segments (u16
//! values fit 32 bits, u32 values 48 bits, u64 values up to 96 bits inside
//! the u128 container).

use crate::tables::{tables, Tables, K16, K32, K48, K64, K80, RANKS};
use crate::utils::{split_u128, FIB};

const F15: u64 = FIB[14];
const F16: u64 = FIB[15];
const F17: u64 = FIB[16];
const F31: u64 = FIB[30];
const F32: u64 = FIB[31];
const F33: u64 = FIB[32];
const F47: u64 = FIB[46];
const F48: u64 = FIB[47];
const F49: u64 = FIB[48];
const F63: u64 = FIB[62];
const F64: u64 = FIB[63];
const F65: u64 = FIB[64];
const F79: u64 = FIB[78];
const F80: u64 = FIB[79];
const F81: u64 = FIB[80];

/// Estimates the segment rank of `v` at the shift belonging to the reciprocal
/// `k`: the high 64 bits of the full product, rounded at bit 63 of the low
/// half, minus one. Overshoots the true rank by at most one position.
#[inline(always)]
pub(crate) fn estimate_rank(v: u64, k: u64) -> usize {
    let wide = (v as u128) * (k as u128);
    let hi = (wide >> 64) as u64;
    let lo = wide as u64;
    (hi + (lo >> 63) - 1) as usize
}

/// One encoder step: rank-estimate the top segment of `v`, correct by at most
/// one against the anchors, strip the anchor off `v`, return the segment bits.
#[inline(always)]
fn take_segment(v: &mut u64, k: u64, anchors: &[u64; RANKS + 1], t: &Tables) -> u64 {
    let mut i = estimate_rank(*v, k);
    i -= (anchors[i] > *v) as usize;
    *v -= anchors[i];
    t.codes[i] as u64
}

/// [`take_segment`] for shift 16, whose anchor table is u32-valued.
#[inline(always)]
fn take_segment16(v: &mut u64, t: &Tables) -> u64 {
    let mut i = estimate_rank(*v, K16);
    i -= (t.anchor16[i] as u64 > *v) as usize;
    *v -= t.anchor16[i] as u64;
    t.codes[i] as u64
}

/// Encodes a u8; the codeword fits one segment.
///
/// A single table lookup: the rank table is already laid out by shifted value.
#[inline]
pub fn encode_u8(value: u8) -> u16 {
    tables().codes[value as usize]
}

/// Encodes a u16; the codeword fits 32 bits (at most one higher segment).
#[inline]
pub fn encode_u16(value: u16) -> u32 {
    let t = tables();
    let mut v = value as u64 + 1;
    let mut result = 0u32;

    if v >= F17 {
        result |= (take_segment16(&mut v, t) as u32) << 16;
    }

    if v != 0 {
        result |= t.codes[v as usize - 1] as u32;
    }
    result
}

/// Encodes a u32; the codeword fits 48 bits.
#[inline]
pub fn encode_u32(value: u32) -> u64 {
    let t = tables();
    let mut v = value as u64 + 1;
    let mut result = 0u64;

    if v >= F33 {
        result |= take_segment(&mut v, K32, &t.anchor32, t) << 32;
    }

    if v >= F17 {
        result |= take_segment16(&mut v, t) << 16;
    }

    if v != 0 {
        result |= t.codes[v as usize - 1] as u64;
    }
    result
}

/// Encodes a u64; the codeword needs up to 96 bits.
///
/// Values below `F[49]` resolve in at most two segment steps within a u64
/// result; wider values take the five-segment path composing the u128 out of
/// (upper, lower) halves. The +1 shift wraps at the top, so `u64::MAX` is
/// outside the contract; `u64::MAX - 1` is the largest encodable value.
#[inline]
pub fn encode_u64(value: u64) -> u128 {
    let t = tables();
    let mut v = value.wrapping_add(1);

    if v < F49 {
        let mut result = 0u64;

        if v >= F33 {
            result |= take_segment(&mut v, K32, &t.anchor32, t) << 32;
        }

        if v >= F17 {
            result |= take_segment16(&mut v, t) << 16;
        }

        if v != 0 {
            result |= t.codes[v as usize - 1] as u64;
        }

        result as u128
    } else {
        encode_u64_wide(t, v)
    }
}

fn encode_u64_wide(t: &Tables, mut v: u64) -> u128 {
    let mut upper = 0u64;
    let mut lower = 0u64;

    if v >= F81 {
        upper |= take_segment(&mut v, K80, &t.anchor80, t) << (80 - 64);
    }

    if v >= F65 {
        upper |= take_segment(&mut v, K64, &t.anchor64, t);
    }

    if v >= F49 {
        lower |= take_segment(&mut v, K48, &t.anchor48, t) << 48;
    }

    if v >= F33 {
        lower |= take_segment(&mut v, K32, &t.anchor32, t) << 32;
    }

    if v >= F17 {
        lower |= take_segment16(&mut v, t) << 16;
    }

    if v != 0 {
        lower |= t.codes[v as usize - 1] as u64;
    }

    ((upper as u128) << 64) | lower as u128
}

/// The contribution of the 16bit segment `code` sitting at the shift with
/// Fibonacci numbers `f_k`, `f_km1` below it: the left-shift identity
/// `F[k] * V(code) + F[k-1] * V(code >> 1)`, with the dropped low bit carried
/// into the right-shifted lookup. Wraps on out-of-contract garbage rather
/// than guard it.
#[inline(always)]
fn decode_segment(t: &Tables, code: u16, f_k: u64, f_km1: u64) -> u64 {
    if code == 0 {
        return 0;
    }
    let v1 = t.value_by_code[code as usize] as u64;
    let v2 = t.value_by_code[(code >> 1) as usize] as u64 + (code & 1) as u64;
    f_k.wrapping_mul(v1).wrapping_add(f_km1.wrapping_mul(v2))
}

/// Decodes a single-segment codeword back to the u8 it encodes.
#[inline]
pub fn decode_u8(code: u16) -> u8 {
    tables().value_by_code[code as usize].wrapping_sub(1) as u8
}

/// Decodes a 32bit codeword back to the u16 it encodes.
#[inline]
pub fn decode_u16(code: u32) -> u16 {
    let t = tables();
    let mut result = t.value_by_code[code as u16 as usize] as u64;
    result += decode_segment(t, (code >> 16) as u16, F16, F15);
    result.wrapping_sub(1) as u16
}

/// Decodes a 48bit codeword back to the u32 it encodes.
#[inline]
pub fn decode_u32(code: u64) -> u32 {
    let t = tables();
    let mut result = t.value_by_code[code as u16 as usize] as u64;
    result += decode_segment(t, (code >> 16) as u16, F16, F15);
    result += decode_segment(t, (code >> 32) as u16, F32, F31);
    result.wrapping_sub(1) as u32
}

/// Decodes a codeword of up to 96 bits back to the u64 it encodes.
#[inline]
pub fn decode_u64(code: u128) -> u64 {
    let t = tables();
    let (upper, lower) = split_u128(code);

    let mut result = t.value_by_code[lower as u16 as usize] as u64;
    result = result.wrapping_add(decode_segment(t, (lower >> 16) as u16, F16, F15));
    result = result.wrapping_add(decode_segment(t, (lower >> 32) as u16, F32, F31));
    result = result.wrapping_add(decode_segment(t, (lower >> 48) as u16, F48, F47));
    if upper != 0 {
        result = result.wrapping_add(decode_segment(t, upper as u16, F64, F63));
        result = result.wrapping_add(decode_segment(t, (upper >> 16) as u16, F80, F79));
    }
    result.wrapping_sub(1)
}
