//! Synthetic tick feed.
//!
//! Generates a random-walk price path whose volatility regime alternates
//! between noisy and compressed stretches, so squeeze signals actually occur.
//! Used for analysis mode without network access and for integration tests.
//! Seedable for reproducibility.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;

use super::{FeedError, TickFeed};
use voltscan_core::PriceSeries;

/// Bars per volatility regime before switching.
const REGIME_LEN: usize = 120;
/// Step amplitude in the noisy regime, as a fraction of price.
const LOUD_AMP: f64 = 0.004;
/// Step amplitude in the compressed regime.
const QUIET_AMP: f64 = 0.0004;

pub struct SyntheticFeed {
    seed: u64,
    /// Advances every fetch so consecutive cycles see an evolving tail.
    cursor: Mutex<u64>,
}

impl SyntheticFeed {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            cursor: Mutex::new(0),
        }
    }

    /// Deterministic per-symbol seed so different symbols walk different paths.
    fn symbol_seed(&self, symbol: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        symbol.hash(&mut hasher);
        self.seed ^ hasher.finish()
    }
}

impl TickFeed for SyntheticFeed {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch_closes(
        &self,
        symbol: &str,
        count: usize,
        _granularity_secs: u32,
    ) -> Result<PriceSeries, FeedError> {
        let offset = {
            let mut cursor = self.cursor.lock().unwrap();
            *cursor += 1;
            *cursor
        };

        // Replay the walk from the origin so the series is consistent across
        // fetches: fetch N closes ending at bar (count + offset).
        let mut rng = StdRng::seed_from_u64(self.symbol_seed(symbol));
        let total = count as u64 + offset;
        let mut price = 1000.0;
        let mut closes = Vec::with_capacity(count);

        for i in 0..total {
            let regime_quiet = (i as usize / REGIME_LEN) % 2 == 1;
            let amp = if regime_quiet { QUIET_AMP } else { LOUD_AMP };
            let step: f64 = rng.gen_range(-amp..amp);
            price *= 1.0 + step;
            if total - i <= count as u64 {
                closes.push(price);
            }
        }

        Ok(PriceSeries::new(closes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_requested_count() {
        let feed = SyntheticFeed::new(7);
        let series = feed.fetch_closes("R_75", 500, 60).unwrap();
        assert_eq!(series.len(), 500);
    }

    #[test]
    fn symbols_walk_different_paths() {
        let feed = SyntheticFeed::new(7);
        let a = feed.fetch_closes("R_75", 100, 60).unwrap();
        let b = feed.fetch_closes("R_100", 100, 60).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn consecutive_fetches_advance_the_tail() {
        let feed = SyntheticFeed::new(7);
        let first = feed.fetch_closes("R_75", 100, 60).unwrap();
        let second = feed.fetch_closes("R_75", 100, 60).unwrap();
        // One bar further along the same walk: tails differ, bodies overlap.
        assert_ne!(first.last(), second.last());
        assert_eq!(first.closes()[1..], second.closes()[..99]);
    }

    #[test]
    fn same_seed_reproduces_the_walk() {
        let a = SyntheticFeed::new(42).fetch_closes("R_75", 200, 60).unwrap();
        let b = SyntheticFeed::new(42).fetch_closes("R_75", 200, 60).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn prices_stay_positive() {
        let feed = SyntheticFeed::new(99);
        let series = feed.fetch_closes("R_75", 3000, 60).unwrap();
        assert!(series.closes().iter().all(|&c| c > 0.0));
    }
}
