//! Reference Zeckendorf encoding and decoding of single integers, going
//! bit-by-bit. See [here](https://en.wikipedia.org/wiki/Zeckendorf%27s_theorem).
//!
//! Each set bit `i` of a codeword stands for the Fibonacci number `FIB[i]`
//! (offset convention 1,2,3,5,...), and a codeword never carries two adjacent
//! set bits. This path is the ground truth: the lookup tables of
//! [`crate::fast`] are bootstrapped from it, and the test-suite checks the
//! fast path against it. It is kept public so it stays independently callable.
//!
//! # Usage
//! ```rust
//! use fastzeck::greedy;
//! // 4+1 = 5 = FIB[3], so value 4 maps to a single set bit
//! let code = greedy::encode(4, true);
//! assert_eq!(code, 0b1000);
//! assert_eq!(greedy::decode(code, true), 4);
//! ```

use crate::utils::FIB;

/// Greedy Zeckendorf encoding of `value` into a codeword of up to 92 bits.
///
/// With `shifted_by_one` the value is incremented first, so that 0 gets a
/// (nonzero) codeword; the decoder then has to undo the shift.
/// The increment wraps at the u64 top, so `u64::MAX` is outside the
/// shifted domain; `u64::MAX - 1` is the largest encodable value.
pub fn encode(value: u64, shifted_by_one: bool) -> u128 {
    let v = if shifted_by_one { value.wrapping_add(1) } else { value };
    encode_raw(v, 91)
}

/// Greedy encoding over the u32 value domain; codewords fit a u64.
pub fn encode_u32(value: u32, shifted_by_one: bool) -> u64 {
    let v = if shifted_by_one { value as u64 + 1 } else { value as u64 };
    encode_raw(v, 45) as u64
}

fn encode_raw(mut v: u64, max_index: i32) -> u128 {
    if v == 0 {
        return 0;
    }
    let mut result: u128 = 0;
    // the top set bit of the codeword sits near 1.5*log2(v)
    let log2 = v.ilog2() as i32;
    let mut i = (log2 + (log2 >> 1) + 1).min(max_index);
    while i >= 0 {
        if v == 0 {
            break;
        }
        let f = FIB[i as usize];
        if v >= f {
            result |= 1 << i;
            v -= f;
            i -= 1; // cannot have two ones in a row
        }
        i -= 1;
    }
    result
}

/// Greedy decoding of a codeword of up to 92 bits; bits above index 91 are
/// ignored. With `shifted_by_one` the decoded sum is decremented, undoing the
/// shift applied by [`encode`].
pub fn decode(code: u128, shifted_by_one: bool) -> u64 {
    let result = decode_raw(code, 91);
    if shifted_by_one {
        result.wrapping_sub(1)
    } else {
        result
    }
}

/// Greedy decoding over u64 codewords into the u32 value domain.
pub fn decode_u32(code: u64, shifted_by_one: bool) -> u32 {
    let result = decode_raw(code as u128, 45);
    if shifted_by_one {
        (result as u32).wrapping_sub(1)
    } else {
        result as u32
    }
}

fn decode_raw(mut code: u128, cap: u32) -> u64 {
    if code == 0 {
        return 0;
    }
    let mut result: u64 = 0;
    let max_index = (128 - code.leading_zeros()).min(cap);
    let mut i = 0;
    while i <= max_index {
        if code == 0 {
            break;
        }
        if code & (1 << i) != 0 {
            // wraps for patterns beyond the u64 value domain; such codewords
            // only show up as the truncated tail of the shifted anchor tables
            result = result.wrapping_add(FIB[i as usize]);
            code -= 1 << i;
            i += 1; // cannot have two ones in a row
        }
        i += 1;
    }
    result
}
