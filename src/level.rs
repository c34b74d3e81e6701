// model = "claude-opus-4-5"
// created = "2026-10-14"
// modified = "2026-10-14"
// driver = "Isaac Clayton"

//! Random level generation.
//!
//! Every new node is given a height when it is inserted. The height is drawn
//! from a truncated geometric distribution: level 1 with probability `1 - p`,
//! and each further level with probability `p`, never above the configured
//! maximum `L`.
//!
//! ```text
//! p = 0.5, L = 4
//!
//! level 1: 50.0%
//! level 2: 25.0%
//! level 3: 12.5%
//! level 4: 12.5%   (the tail above L folds into L)
//! ```
//!
//! The randomness source is any [`RngCore`], so tests can swap in a seeded
//! generator and get the same list shape on every run.

use rand::SeedableRng;
use rand::distributions::{Bernoulli, Distribution};
use rand::rngs::SmallRng;
use rand_core::RngCore;

use crate::error::ConfigError;

/// Maximum level used when none is configured. 16 levels comfortably covers
/// tens of thousands of elements at `p = 0.5`.
pub const DEFAULT_MAX_LEVEL: usize = 16;

/// Upper bound on the configurable maximum level.
pub const MAX_LEVEL_LIMIT: usize = 64;

/// Promotion probability used when none is configured.
pub const DEFAULT_PROBABILITY: f64 = 0.5;

/// Source of node heights.
///
/// `next_level` must return a value in `[1, max_level()]`. The containers
/// clamp anything outside that range, so a misbehaving generator degrades
/// balance but never corrupts a list.
pub trait LevelGenerator {
    /// The largest level this generator will produce.
    fn max_level(&self) -> usize;

    /// Draw the level for a new node.
    fn next_level(&mut self) -> usize;
}

/// Geometrically distributed levels driven by a random number generator.
#[derive(Clone, Debug)]
pub struct GeometricLevelGenerator<R = SmallRng> {
    max_level: usize,
    probability: f64,
    coin: Bernoulli,
    rng: R,
}

/// The level generator the containers use unless told otherwise.
pub type Geometric = GeometricLevelGenerator<SmallRng>;

/// Check a level cap, whether configured or reported by a generator.
pub(crate) fn validate_max_level(max_level: usize) -> Result<(), ConfigError> {
    if max_level < 1 {
        return Err(ConfigError::MaxLevelTooSmall(max_level));
    }
    if max_level > MAX_LEVEL_LIMIT {
        return Err(ConfigError::MaxLevelTooLarge {
            got: max_level,
            limit: MAX_LEVEL_LIMIT,
        });
    }
    Ok(())
}

/// Check a `(max_level, probability)` pair.
pub(crate) fn validate(max_level: usize, probability: f64) -> Result<(), ConfigError> {
    validate_max_level(max_level)?;
    // Written so that NaN fails too.
    if !(probability > 0.0 && probability < 1.0) {
        return Err(ConfigError::Probability(probability));
    }
    Ok(())
}

impl<R: RngCore> GeometricLevelGenerator<R> {
    /// Create a generator producing levels in `[1, max_level]`, promoting a
    /// node to the next level with `probability`.
    pub fn new(max_level: usize, probability: f64, rng: R) -> Result<Self, ConfigError> {
        validate(max_level, probability)?;
        let coin = Bernoulli::new(probability).map_err(|_| ConfigError::Probability(probability))?;
        Ok(GeometricLevelGenerator {
            max_level,
            probability,
            coin,
            rng,
        })
    }

    /// The promotion probability `p`.
    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl GeometricLevelGenerator<SmallRng> {
    /// A reproducible generator: the same seed yields the same level sequence.
    pub fn seeded(max_level: usize, probability: f64, seed: u64) -> Result<Self, ConfigError> {
        Self::new(max_level, probability, SmallRng::seed_from_u64(seed))
    }

    /// A generator seeded from operating system entropy.
    pub fn from_entropy(max_level: usize, probability: f64) -> Result<Self, ConfigError> {
        Self::new(max_level, probability, SmallRng::from_entropy())
    }
}

impl Default for GeometricLevelGenerator<SmallRng> {
    /// `DEFAULT_MAX_LEVEL` levels at `DEFAULT_PROBABILITY`, seeded from
    /// entropy.
    fn default() -> Self {
        match Self::from_entropy(DEFAULT_MAX_LEVEL, DEFAULT_PROBABILITY) {
            Ok(generator) => generator,
            Err(err) => unreachable!("default level parameters rejected: {}", err),
        }
    }
}

impl<R: RngCore> LevelGenerator for GeometricLevelGenerator<R> {
    fn max_level(&self) -> usize {
        self.max_level
    }

    fn next_level(&mut self) -> usize {
        let mut level = 1;
        while level < self.max_level && self.coin.sample(&mut self.rng) {
            level += 1;
        }
        level
    }
}

impl<G: LevelGenerator + ?Sized> LevelGenerator for &mut G {
    fn max_level(&self) -> usize {
        (**self).max_level()
    }

    fn next_level(&mut self) -> usize {
        (**self).next_level()
    }
}

impl<G: LevelGenerator + ?Sized> LevelGenerator for Box<G> {
    fn max_level(&self) -> usize {
        (**self).max_level()
    }

    fn next_level(&mut self) -> usize {
        (**self).next_level()
    }
}
