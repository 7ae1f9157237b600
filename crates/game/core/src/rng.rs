//! Randomness capability for behavior programs and spawn tables.
//!
//! Behavior programs may draw random values (random directions, random
//! accelerations, bounded integers) and spawn tables draw uniform values to
//! pick weighted cells. Both receive the generator as an explicit
//! [`Randomizer`] argument so callers control seeding and tests can inject
//! scripted sources.
//!
//! # Determinism
//!
//! All implementations must be deterministic: given the same seed they must
//! produce the same sequence of values. Replays of a level depend on it.

/// Source of uniformly distributed integers.
pub trait Randomizer {
    /// Returns a uniformly distributed value in `[least, greatest]` inclusive.
    ///
    /// When `least >= greatest` implementations return `least`.
    fn get(&mut self, least: u64, greatest: u64) -> u64;
}

impl<R: Randomizer + ?Sized> Randomizer for &mut R {
    fn get(&mut self, least: u64, greatest: u64) -> u64 {
        (**self).get(least, greatest)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR variant: 32-bit output from 64-bit state. 64-bit draws are
/// assembled from two consecutive outputs.
///
/// # Properties
///
/// - **Deterministic**: Same seed always produces same sequence
/// - **Fast**: Single multiply + xorshift + rotate
/// - **Small state**: Only 64 bits
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PcgRandomizer {
    state: u64,
}

impl PcgRandomizer {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Outputs dropped after seeding so nearby seeds diverge quickly.
    const DISCARD_AFTER_SEED: usize = 3;

    /// Creates a generator seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        let mut rng = Self { state: 0 };
        rng.reseed(seed);
        rng
    }

    /// Restarts the sequence from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.state = seed;
        for _ in 0..Self::DISCARD_AFTER_SEED {
            self.next_u32();
        }
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Returns the next 32 random bits.
    pub fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }

    /// Returns the next 64 random bits.
    pub fn next_u64(&mut self) -> u64 {
        let high = self.next_u32() as u64;
        let low = self.next_u32() as u64;
        (high << 32) | low
    }
}

impl Randomizer for PcgRandomizer {
    fn get(&mut self, least: u64, greatest: u64) -> u64 {
        if least >= greatest {
            return least;
        }

        let span = greatest - least;
        if span == u64::MAX {
            return self.next_u64();
        }

        // Rejection sampling: drop the lowest 2^64 mod range values so every
        // residue is equally likely.
        let range = span + 1;
        let threshold = range.wrapping_neg() % range;
        loop {
            let value = self.next_u64();
            if value >= threshold {
                return least + value % range;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = PcgRandomizer::new(42);
        let mut b = PcgRandomizer::new(42);
        for _ in 0..64 {
            assert_eq!(a.get(0, 1000), b.get(0, 1000));
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = PcgRandomizer::new(1);
        let mut b = PcgRandomizer::new(2);
        let same = (0..32).filter(|_| a.next_u64() == b.next_u64()).count();
        assert!(same < 32);
    }

    #[test]
    fn get_stays_within_inclusive_bounds() {
        let mut rng = PcgRandomizer::new(7);
        let mut seen = [false; 4];
        for _ in 0..500 {
            let value = rng.get(3, 6);
            assert!((3..=6).contains(&value));
            seen[(value - 3) as usize] = true;
        }
        assert!(seen.iter().all(|hit| *hit), "every value should appear");
    }

    #[test]
    fn degenerate_ranges_return_least() {
        let mut rng = PcgRandomizer::new(7);
        assert_eq!(rng.get(5, 5), 5);
        assert_eq!(rng.get(9, 2), 9);
    }

    #[test]
    fn full_range_draw_does_not_overflow() {
        let mut rng = PcgRandomizer::new(99);
        let _ = rng.get(0, u64::MAX);
    }

    #[test]
    fn reseed_restarts_sequence() {
        let mut rng = PcgRandomizer::new(11);
        let first: Vec<u32> = (0..4).map(|_| rng.next_u32()).collect();
        rng.reseed(11);
        let second: Vec<u32> = (0..4).map(|_| rng.next_u32()).collect();
        assert_eq!(first, second);
    }
}
