//! The dice roll that decides whether this invocation posts at all.
//!
//! Run hourly with odds of 10, the bot posts on average once every ten
//! hours, with no memory of previous runs.

use std::num::NonZeroU32;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Result of a single roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Roll {
    Go,
    Skip { drawn: u32 },
}

#[derive(Debug, Clone, Copy)]
pub struct Gate {
    odds: NonZeroU32,
}

impl Gate {
    pub fn new(odds: NonZeroU32) -> Self {
        Self { odds }
    }

    pub fn odds(&self) -> u32 {
        self.odds.get()
    }

    /// Draws in `[0, odds)` and proceeds only on 0.
    pub fn roll<R: Rng>(&self, rng: &mut R) -> Roll {
        let drawn = rng.random_range(0..self.odds.get());
        if drawn == 0 {
            Roll::Go
        } else {
            Roll::Skip { drawn }
        }
    }
}

/// Builds the per-run RNG. Without an explicit seed the current time in
/// nanoseconds is used, so consecutive runs never share a sequence.
pub fn run_rng(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(|| {
        chrono::Utc::now()
            .timestamp_nanos_opt()
            .map(|nanos| nanos as u64)
            .unwrap_or_default()
    });
    StdRng::seed_from_u64(seed)
}
