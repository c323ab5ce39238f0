//! One-time construction of the segment lookup tables that drive
//! [`crate::fast`], bootstrapped from the reference codec in [`crate::greedy`].
//!
//! A wide codeword is handled in 16bit segments. For each of the `RANKS`
//! valid (no two adjacent set bits) 16bit segment codewords, ordered by the
//! value they represent, we tabulate the codeword itself plus the value it
//! contributes when it occupies bits `[k, k+16)` of a wider codeword (its
//! *anchor* at shift k). Consecutive anchors grow geometrically at rate
//! phi^16, which is what makes the reciprocal rank estimate in the encoder
//! work.
//!
//! The tables are built exactly once behind a [`Lazy`] static; afterwards they
//! are immutable and shared freely across threads.

use once_cell::sync::Lazy;

use crate::greedy;

/// Number of valid 16bit segment codewords: one less than the count of
/// integers whose codeword stays below bit 16. Rank `i` is the codeword of
/// value `i+1`.
pub(crate) const RANKS: usize = 2583;

// Fixed-point reciprocals 2^64 / phi^k, one per segment shift:
// let phi = (1f64 + 5f64.sqrt()) / 2.0;
// ((2f64).powi(64) / phi.powi(k)).round() as u64
// A single high-multiply by one of these estimates a segment rank to within
// one position (see `test::estimate_overshoots_by_at_most_one`).
pub(crate) const K16: u64 = 8358290829580121;
pub(crate) const K32: u64 = 3787173785937;
pub(crate) const K48: u64 = 1715983037;
pub(crate) const K64: u64 = 777519;
pub(crate) const K80: u64 = 352;

/// The precomputed segment tables. Roughly 230KB, heap-allocated once.
pub(crate) struct Tables {
    /// rank -> the 16bit segment codeword (shared across all shifts)
    pub(crate) codes: [u16; RANKS],
    /// rank -> anchor at shift 16; sentinel `u32::MAX` bounds the search
    pub(crate) anchor16: [u32; RANKS + 1],
    /// rank -> anchor at shift 32; sentinel `u64::MAX`
    pub(crate) anchor32: [u64; RANKS + 1],
    /// rank -> anchor at shift 48
    pub(crate) anchor48: [u64; RANKS + 1],
    /// rank -> anchor at shift 64
    pub(crate) anchor64: [u64; RANKS + 1],
    /// rank -> anchor at shift 80
    pub(crate) anchor80: [u64; RANKS + 1],
    /// every 16bit pattern -> its decoded value, adjacent-bit patterns
    /// included, so decoders can slice codewords blindly
    pub(crate) value_by_code: [u16; 1 << 16],
}

static TABLES: Lazy<Box<Tables>> = Lazy::new(Tables::build);

/// The process-wide tables; first call pays for construction.
#[inline]
pub(crate) fn tables() -> &'static Tables {
    &TABLES
}

impl Tables {
    fn build() -> Box<Tables> {
        let mut t = Box::new(Tables {
            codes: [0; RANKS],
            anchor16: [0; RANKS + 1],
            anchor32: [0; RANKS + 1],
            anchor48: [0; RANKS + 1],
            anchor64: [0; RANKS + 1],
            anchor80: [0; RANKS + 1],
            value_by_code: [0; 1 << 16],
        });

        for i in 0..RANKS {
            let code = greedy::encode(i as u64 + 1, false) as u16;
            t.codes[i] = code;
            t.anchor16[i] = greedy::decode((code as u128) << 16, false) as u32;
            t.anchor32[i] = greedy::decode((code as u128) << 32, false);
            t.anchor48[i] = greedy::decode((code as u128) << 48, false);
            // the top ranks of the two widest tables exceed 64 bits and get
            // truncated; the rank estimate never reaches them
            t.anchor64[i] = greedy::decode((code as u128) << 64, false);
            t.anchor80[i] = greedy::decode((code as u128) << 80, false);
        }

        t.anchor16[RANKS] = u32::MAX;
        t.anchor32[RANKS] = u64::MAX;
        t.anchor48[RANKS] = u64::MAX;
        t.anchor64[RANKS] = u64::MAX;
        t.anchor80[RANKS] = u64::MAX;

        // all 16bit patterns, including the ones with several ones in a row
        for code in 0..=u16::MAX {
            t.value_by_code[code as usize] = greedy::decode(code as u128, false) as u16;
        }

        t
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fast::estimate_rank;
    use crate::utils::FIB;
    use pretty_assertions::assert_eq;

    /// the residual value an encoder can still hold when it reaches shift k
    fn residual_domain(k: u32) -> u128 {
        match k {
            16 => FIB[32] as u128,
            32 => FIB[48] as u128,
            48 => FIB[64] as u128,
            64 => FIB[80] as u128,
            80 => 1 << 64,
            _ => unreachable!(),
        }
    }

    #[test]
    fn codes_roundtrip_through_the_reference_codec() {
        let t = tables();
        for i in 0..RANKS {
            let code = t.codes[i];
            assert_eq!(greedy::decode(code as u128, false), i as u64 + 1, "[rank {i}]");
            // the defining segment property
            assert_eq!(code & (code >> 1), 0, "[rank {i}]");
        }
    }

    #[test]
    fn value_by_code_agrees_with_the_reference_codec() {
        let t = tables();
        for code in 0..=u16::MAX {
            assert_eq!(
                t.value_by_code[code as usize] as u64,
                greedy::decode(code as u128, false),
                "[code {code:#06x}]"
            );
        }
    }

    #[test]
    fn anchors_strictly_increase_on_the_consulted_prefix() {
        let t = tables();
        for i in 1..RANKS {
            assert!(t.anchor16[i] > t.anchor16[i - 1], "[shift 16, rank {i}]");
            assert!(t.anchor32[i] > t.anchor32[i - 1], "[shift 32, rank {i}]");
            assert!(t.anchor48[i] > t.anchor48[i - 1], "[shift 48, rank {i}]");
            assert!(t.anchor64[i] > t.anchor64[i - 1], "[shift 64, rank {i}]");
        }
        // the 80-shift table is only consulted while the anchor still fits;
        // everything past the first truncated entry is unreachable
        let mut i = 1;
        while i < RANKS && t.anchor80[i] > t.anchor80[i - 1] {
            i += 1;
        }
        let reachable = estimate_rank(u64::MAX, K80);
        assert!(i > reachable, "truncation starts at rank {i}, reachable up to {reachable}");
    }

    /// The contract the reciprocal constants have to meet: for every value the
    /// encoder can hold when it reaches a segment, the estimated rank is the
    /// true rank or one above it, and the single `anchor > v` correction lands
    /// exactly. Checked at both edges of every rank interval.
    #[test]
    fn estimate_overshoots_by_at_most_one() {
        let t = tables();
        let cases: [(u32, u64, &[u64; RANKS + 1]); 4] = [
            (32, K32, &t.anchor32),
            (48, K48, &t.anchor48),
            (64, K64, &t.anchor64),
            (80, K80, &t.anchor80),
        ];
        let anchor16_wide: Vec<u64> = t.anchor16.iter().map(|&a| a as u64).collect();

        let mut all: Vec<(u32, u64, Vec<u64>)> = cases
            .iter()
            .map(|&(shift, k, anchors)| (shift, k, anchors.to_vec()))
            .collect();
        all.push((16, K16, anchor16_wide));

        for (shift, k, anchors) in all {
            let domain = residual_domain(shift);
            for i in 0..RANKS {
                // past a truncated successor (80-shift tail) the rank interval
                // runs to the top of the domain; that rank is still the last
                // one worth checking
                let truncated = anchors[i + 1] <= anchors[i];
                let hi_edge = if truncated || (anchors[i + 1] as u128) >= domain {
                    (domain - 1) as u64
                } else {
                    anchors[i + 1] - 1
                };
                for v in [anchors[i], hi_edge] {
                    if (v as u128) >= domain || v < FIB[shift as usize] {
                        continue;
                    }
                    let est = estimate_rank(v, k);
                    assert!(
                        est == i || est == i + 1,
                        "[shift {shift}, rank {i}, v {v}: estimate {est}]"
                    );
                    let corrected = est - (anchors[est] > v) as usize;
                    assert_eq!(corrected, i, "[shift {shift}, v {v}]");
                }
                if truncated {
                    break;
                }
            }
        }
    }
}
