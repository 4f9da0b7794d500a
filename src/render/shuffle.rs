//! # Reproducible Coordinate Shuffle
//!
//! Generated dither matrices scatter their thresholds over the cell grid by
//! shuffling the x and y axes. Printed output must not change between runs
//! or platforms, so the generator is a fixed 48-bit linear congruential
//! generator rather than whatever `rand::rng()` happens to be.
//!
//! ## Generator
//!
//! ```text
//! state₀   = (seed XOR 0x5DEECE66D) mod 2⁴⁸
//! stateₙ₊₁ = (stateₙ × 0x5DEECE66D + 0xB) mod 2⁴⁸
//! next(bits) = stateₙ₊₁ >> (48 - bits)
//! ```
//!
//! This is the widely deployed "drand48" family. Bounded draws follow
//! Java's `Random.nextInt(bound)`, so the axis permutations match the ones
//! existing ESC/POS tooling derives from seed 1. The thresholds written into
//! the permuted cells are computed separately (see [`super::dither`]).
//!
//! ## Shuffle
//!
//! [`shuffle`] draws indices in `0..len` and keeps each one the first time
//! it is seen (rejection sampling) until every index has appeared. It takes
//! any [`RngCore`]; only [`JavaRandom`] gives the reproducible order.

use rand::{RngCore, SeedableRng};

const MULTIPLIER: u64 = 0x5_DEEC_E66D;
const INCREMENT: u64 = 0xB;
const MASK: u64 = (1 << 48) - 1;

/// Seed used for every generated dither matrix.
pub const MATRIX_SEED: u64 = 1;

/// 48-bit LCG with Java-compatible output.
#[derive(Debug, Clone)]
pub struct JavaRandom {
    state: u64,
}

impl JavaRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            state: (seed ^ MULTIPLIER) & MASK,
        }
    }

    fn next_bits(&mut self, bits: u32) -> u32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT) & MASK;
        (self.state >> (48 - bits)) as u32
    }
}

impl RngCore for JavaRandom {
    fn next_u32(&mut self) -> u32 {
        self.next_bits(32)
    }

    fn next_u64(&mut self) -> u64 {
        let high = self.next_bits(32) as i32 as i64;
        let low = self.next_bits(32) as i32 as i64;
        (high << 32).wrapping_add(low) as u64
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        rand::rand_core::impls::fill_bytes_via_next(self, dst)
    }
}

impl SeedableRng for JavaRandom {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}

/// Uniform value in `0..bound` from the top 31 bits of each draw.
///
/// `bound` must be in `1..=i32::MAX`.
pub fn next_below<R: RngCore + ?Sized>(rng: &mut R, bound: u32) -> u32 {
    debug_assert!(bound > 0 && bound <= i32::MAX as u32);
    if bound.is_power_of_two() {
        return ((bound as u64 * (rng.next_u32() >> 1) as u64) >> 31) as u32;
    }
    loop {
        let bits = rng.next_u32() >> 1;
        let value = bits % bound;
        // Reject draws from the final partial bucket.
        if (bits - value) as u64 + (bound as u64 - 1) < (1u64 << 31) {
            return value;
        }
    }
}

/// Permutation of `0..len` drawn from `rng`. `len` must fit in an `i32`.
pub fn shuffle<R: RngCore + ?Sized>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut seen = vec![false; len];
    let mut order = Vec::with_capacity(len);
    while order.len() < len {
        let idx = next_below(rng, len as u32) as usize;
        if !seen[idx] {
            seen[idx] = true;
            order.push(idx);
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_outputs_seed_one() {
        // Reference values of new Random(1).nextInt()
        let mut rng = JavaRandom::seed_from_u64(1);
        assert_eq!(rng.next_u32() as i32, -1155869325);
        assert_eq!(rng.next_u32() as i32, 431529176);
        assert_eq!(rng.next_u32() as i32, 1761283695);
    }

    #[test]
    fn test_bounded_draws_seed_one() {
        // new Random(1).nextInt(10) x5
        let mut rng = JavaRandom::seed_from_u64(1);
        let draws: Vec<u32> = (0..5).map(|_| next_below(&mut rng, 10)).collect();
        assert_eq!(draws, vec![5, 8, 7, 3, 4]);
    }

    #[test]
    fn test_power_of_two_bound_uses_high_bits() {
        // new Random(1).nextInt(8), nextInt(16)
        let mut rng = JavaRandom::seed_from_u64(1);
        let first = next_below(&mut rng, 8);
        let second = next_below(&mut rng, 16);
        let mut raw = JavaRandom::seed_from_u64(1);
        assert_eq!(first, raw.next_u32() >> 29);
        assert_eq!(second, raw.next_u32() >> 28);
    }

    #[test]
    fn test_seed_bytes_match_seed_u64() {
        let mut a = JavaRandom::from_seed(1u64.to_le_bytes());
        let mut b = JavaRandom::seed_from_u64(1);
        assert_eq!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn test_shuffle_accepts_any_rng() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(99);
        let mut order = shuffle(12, &mut rng);
        order.sort_unstable();
        assert_eq!(order, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = JavaRandom::new(MATRIX_SEED);
        for len in 1..20 {
            let mut order = shuffle(len, &mut rng);
            order.sort_unstable();
            assert_eq!(order, (0..len).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_shuffle_reproducible() {
        let a = shuffle(5, &mut JavaRandom::new(MATRIX_SEED));
        let b = shuffle(5, &mut JavaRandom::new(MATRIX_SEED));
        assert_eq!(a, b);
        assert_eq!(a, vec![0, 3, 2, 4, 1]);
    }

    #[test]
    fn test_shuffle_empty() {
        assert!(shuffle(0, &mut JavaRandom::new(MATRIX_SEED)).is_empty());
    }
}
