use rand::RngCore;
use std::time::{SystemTime, UNIX_EPOCH};

const PRNG_MULTIPLIER: u32 = 75;
const PRNG_PRIME: u32 = 65537;
const VALUES_IN_16_BITS: u32 = 65536;
pub const PERCENT_UNITS: u32 = 100;

/// The adventure format's linear congruential generator.
///
/// Recorded playthroughs depend on this exact recurrence, so it is kept
/// bit-for-bit: `state = (75 * (state + 1)) mod 65537 mod 65536`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdventureLcg {
    state: u32,
}

impl AdventureLcg {
    pub fn new(seed: u64) -> AdventureLcg {
        AdventureLcg {
            state: (seed % VALUES_IN_16_BITS as u64) as u32,
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    fn step(&mut self) -> u32 {
        self.state = (PRNG_MULTIPLIER * (self.state + 1) % PRNG_PRIME) % VALUES_IN_16_BITS;
        self.state
    }
}

impl RngCore for AdventureLcg {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let high = self.next_u32() as u64;
        let low = self.next_u32() as u64;
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// RandMode records where the generator's seed came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandMode {
    Predictable,
    Clock,
}

/// Percentile source for automatic actions
pub struct AdventureRand {
    rng: Box<dyn RngCore>,
    rand_mode: RandMode,
}

impl AdventureRand {
    /// Seed from the wall clock, the way the format's interpreters always have
    pub fn new_from_clock() -> AdventureRand {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        AdventureRand {
            rng: Box::new(AdventureLcg::new(seconds)),
            rand_mode: RandMode::Clock,
        }
    }

    pub fn new_predictable(seed: u64) -> AdventureRand {
        AdventureRand {
            rng: Box::new(AdventureLcg::new(seed)),
            rand_mode: RandMode::Predictable,
        }
    }

    /// Wrap any generator, e.g. a stepping mock in tests
    pub fn with_rng(rng: Box<dyn RngCore>) -> AdventureRand {
        AdventureRand {
            rng,
            rand_mode: RandMode::Predictable,
        }
    }

    pub fn mode(&self) -> RandMode {
        self.rand_mode
    }

    /// percentile generates a value in [0..99]
    pub fn percentile(&mut self) -> u32 {
        self.rng.next_u32() % PERCENT_UNITS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use test_log::test;

    #[test]
    fn test_lcg_sequence_from_zero() {
        let mut rng = AdventureRand::new_predictable(0);
        let values: Vec<u32> = (0..4).map(|_| rng.percentile()).collect();
        assert_eq!(values, vec![75, 0, 53, 7]);
    }

    #[test]
    fn test_lcg_state_stays_in_16_bits() {
        let mut lcg = AdventureLcg::new(70_000);
        assert_eq!(lcg.state(), 70_000 - 65_536);
        for _ in 0..10_000 {
            assert!(lcg.next_u32() < VALUES_IN_16_BITS);
        }
    }

    #[test]
    fn test_same_seed_replays() {
        let mut a = AdventureRand::new_predictable(1234);
        let mut b = AdventureRand::new_predictable(1234);
        for _ in 0..100 {
            assert_eq!(a.percentile(), b.percentile());
        }
        assert_eq!(a.mode(), RandMode::Predictable);
    }

    #[test]
    fn test_fill_bytes_covers_partial_chunk() {
        let mut lcg = AdventureLcg::new(0);
        let mut buf = [0u8; 6];
        lcg.fill_bytes(&mut buf);
        assert_eq!(&buf[..4], &75u32.to_le_bytes());
        assert_eq!(&buf[4..], &5700u32.to_le_bytes()[..2]);
    }

    #[test]
    fn test_percentile_wraps_injected_rng() {
        let mut rng = AdventureRand::with_rng(Box::new(StepRng::new(98, 1)));
        assert_eq!(rng.percentile(), 98);
        assert_eq!(rng.percentile(), 99);
        assert_eq!(rng.percentile(), 0);
    }
}
