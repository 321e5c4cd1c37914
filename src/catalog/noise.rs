//! Seeded noise source for procedural sprites
//!
//! Uses a ChaCha RNG so a catalog built from the same seed produces the same
//! backgrounds and tiles.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::color::{adjust_brightness, Color};

/// Share of background cells that get brightness jitter, in percent.
pub const DEFAULT_NOISE_PERCENT: f64 = 10.0;

/// Random source handed to every built-in generator.
#[derive(Debug, Clone)]
pub struct Noise {
    rng: ChaCha8Rng,
    seed: u64,
    percent: f64,
}

impl Noise {
    pub fn new(seed: u64, percent: f64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            percent: percent.clamp(0.0, 100.0),
        }
    }

    /// Create a noise source with a random seed
    pub fn from_entropy(percent: f64) -> Self {
        Self::new(rand::random(), percent)
    }

    /// Get the seed used to create this source
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Configured jitter share for backgrounds, in percent.
    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// True with probability `percent`/100.
    pub fn chance(&mut self, percent: f64) -> bool {
        self.rng.gen_bool((percent / 100.0).clamp(0.0, 1.0))
    }

    /// Fair coin flip.
    pub fn coin(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    /// Lighten or darken by exactly `amount`, chosen at random.
    pub fn jitter(&mut self, color: Color, amount: i32) -> Color {
        let signed = if self.coin() { amount } else { -amount };
        adjust_brightness(color, signed)
    }

    /// Raw access for helpers that take any `Rng`.
    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }
}
