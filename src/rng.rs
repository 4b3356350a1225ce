//! Seeded linear congruential generator.
//!
//! Every roll in the game (card draws, slot reels, mole spawns, market nights)
//! goes through one of these so a run is reproducible from its seed and the
//! generator state can be stored in a save.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Current state; `SimpleRng::new(rng.state())` continues the sequence.
    pub fn state(&self) -> u64 {
        self.state
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in `[lo, hi]`. Returns `lo` when the range is empty.
    pub fn range_inclusive(&mut self, lo: i64, hi: i64) -> i64 {
        if hi <= lo {
            return lo;
        }
        let span = (hi - lo + 1) as u64;
        lo + ((self.next_u64() >> 33) % span) as i64
    }

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        ((self.next_u64() >> 33) % len as u64) as usize
    }

    /// Uniform float in `[lo, hi)`.
    pub fn range_f64(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimpleRng::new(42);
        let mut b = SimpleRng::new(42);
        for _ in 0..20 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SimpleRng::new(1);
        let mut b = SimpleRng::new(2);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn state_resumes_sequence() {
        let mut a = SimpleRng::new(9);
        a.next_u64();
        let mut b = SimpleRng::new(a.state());
        assert_eq!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn empty_range_returns_lo() {
        let mut rng = SimpleRng::new(7);
        assert_eq!(rng.range_inclusive(5, 5), 5);
        assert_eq!(rng.range_inclusive(9, 3), 9);
    }

    proptest! {
        #[test]
        fn prop_next_f64_in_unit_interval(seed in any::<u64>()) {
            let mut rng = SimpleRng::new(seed);
            for _ in 0..50 {
                let x = rng.next_f64();
                prop_assert!((0.0..1.0).contains(&x), "got {}", x);
            }
        }

        #[test]
        fn prop_range_inclusive_stays_in_bounds(seed in any::<u64>(), lo in -100i64..100, span in 0i64..50) {
            let mut rng = SimpleRng::new(seed);
            let hi = lo + span;
            for _ in 0..20 {
                let x = rng.range_inclusive(lo, hi);
                prop_assert!(x >= lo && x <= hi);
            }
        }

        #[test]
        fn prop_index_below_len(seed in any::<u64>(), len in 1usize..20) {
            let mut rng = SimpleRng::new(seed);
            prop_assert!(rng.index(len) < len);
        }
    }
}
