//! Shared arithmetic helpers: the Fibonacci table both codec paths index into,
//! the 128bit split used by the wide codeword path, and generators for
//! synthetic integer streams (used by the benchmarks and some tests).
use itertools::Itertools;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Exp, Normal};

/// Iterative fibonacci. just to get the first N fibonacci numbers
///
/// <https://github.com/rust-lang/rust-by-example>
pub(crate) struct Fibonacci {
    curr: u64,
    next: u64,
}

impl Iterator for Fibonacci {
    type Item = u64;
    fn next(&mut self) -> Option<u64> {
        // wraps one step past the 92nd number, the last that fits a u64
        let new_next = self.curr.wrapping_add(self.next);

        self.curr = self.next;
        self.next = new_next;

        Some(self.curr)
    }
}

/// A "constructor" for Iterative fibonacci, yielding 1,2,3,5,...
///
/// Note the offset: this skips the duplicate leading 1 of the textbook
/// sequence, so every entry is distinct and each bit of a codeword maps to a
/// unique Fibonacci number.
#[allow(dead_code)] // only needed to generate (and cross-check) the table below
pub(crate) fn iterative_fibonacci() -> Fibonacci {
    Fibonacci { curr: 1, next: 1 }
}

// let v: Vec<_> = iterative_fibonacci().take(92).collect();
// println!("{:?}", v);
/// All 92 fibonacci numbers that fit into a u64, offset convention:
/// `FIB[0]=1, FIB[1]=2, FIB[i]=FIB[i-1]+FIB[i-2]`.
pub const FIB: [u64; 92] = [
    1,
    2,
    3,
    5,
    8,
    13,
    21,
    34,
    55,
    89,
    144,
    233,
    377,
    610,
    987,
    1597,
    2584,
    4181,
    6765,
    10946,
    17711,
    28657,
    46368,
    75025,
    121393,
    196418,
    317811,
    514229,
    832040,
    1346269,
    2178309,
    3524578,
    5702887,
    9227465,
    14930352,
    24157817,
    39088169,
    63245986,
    102334155,
    165580141,
    267914296,
    433494437,
    701408733,
    1134903170,
    1836311903,
    2971215073,
    4807526976,
    7778742049,
    12586269025,
    20365011074,
    32951280099,
    53316291173,
    86267571272,
    139583862445,
    225851433717,
    365435296162,
    591286729879,
    956722026041,
    1548008755920,
    2504730781961,
    4052739537881,
    6557470319842,
    10610209857723,
    17_167_680_177_565,
    27_777_890_035_288,
    44_945_570_212_853,
    72_723_460_248_141,
    117_669_030_460_994,
    190_392_490_709_135,
    308_061_521_170_129,
    498_454_011_879_264,
    806_515_533_049_393,
    1_304_969_544_928_657,
    2_111_485_077_978_050,
    3_416_454_622_906_707,
    5_527_939_700_884_757,
    8_944_394_323_791_464,
    14_472_334_024_676_221,
    23_416_728_348_467_685,
    37_889_062_373_143_906,
    61_305_790_721_611_591,
    99_194_853_094_755_497,
    160_500_643_816_367_088,
    259_695_496_911_122_585,
    420_196_140_727_489_673,
    679_891_637_638_612_258,
    1_100_087_778_366_101_931,
    1_779_979_416_004_714_189,
    2_880_067_194_370_816_120,
    4_660_046_610_375_530_309,
    7_540_113_804_746_346_429,
    12_200_160_415_121_876_738,
];

/// Splits a u128 into its (upper, lower) u64 halves.
#[inline]
pub(crate) fn split_u128(x: u128) -> (u64, u64) {
    ((x >> 64) as u64, x as u64)
}

/// Generates `n` integers uniformly drawn from `[min, max)`, seeded.
pub fn random_uniform(n: usize, min: u64, max: u64, seed: u64) -> Vec<u64> {
    let dist = Uniform::from(min..max);
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| dist.sample(&mut rng)).collect()
}

/// Generates `n` integers from an exponential distribution with mean `sigma`,
/// rounded to the nearest integer, seeded.
pub fn random_exponential(n: usize, sigma: f64, seed: u64) -> Vec<u64> {
    let dist = Exp::new(1.0 / sigma).expect("sigma must be positive");
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| dist.sample(&mut rng).round() as u64).collect()
}

/// Generates `n` integers from a [folded normal](https://en.wikipedia.org/wiki/Folded_normal_distribution)
/// distribution with standard deviation `sigma`, seeded.
pub fn random_folded_normal(n: usize, sigma: f64, seed: u64) -> Vec<u64> {
    // scale the underlying normal so the folded distribution comes out at sigma
    let normal_sigma = (sigma * sigma / (1.0 - 2.0 / std::f64::consts::PI)).sqrt();
    let dist = Normal::new(0.0, normal_sigma).expect("sigma must be positive");
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| dist.sample(&mut rng).abs() as u64).collect()
}

/// just for debugging purpose: a codeword as a 0/1 string, most significant bit first
pub fn codeword_to_string(code: u128) -> String {
    let n_bits = if code == 0 { 1 } else { 128 - code.leading_zeros() };
    let s = (0..n_bits)
        .rev()
        .map(|i| if code >> i & 1 == 1 { "1" } else { "0" })
        .join("");
    s
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_fib_table_matches_recurrence() {
        let v: Vec<u64> = iterative_fibonacci().take(92).collect();
        assert_eq!(v, FIB);
    }

    #[test]
    fn test_split_u128() {
        assert_eq!(split_u128(1), (0, 1));
        assert_eq!(split_u128(1 << 64), (1, 0));
        assert_eq!(split_u128(u128::MAX), (u64::MAX, u64::MAX));
    }

    #[test]
    fn test_codeword_to_string() {
        assert_eq!(codeword_to_string(0), "0");
        assert_eq!(codeword_to_string(0b10101), "10101");
    }

    #[test]
    fn test_generators_are_seeded() {
        assert_eq!(random_uniform(100, 0, 1000, 42), random_uniform(100, 0, 1000, 42));
        assert_eq!(random_exponential(100, 1000.0, 42), random_exponential(100, 1000.0, 42));
        assert_eq!(random_folded_normal(100, 1000.0, 42), random_folded_normal(100, 1000.0, 42));
    }
}
