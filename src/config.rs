// model = "claude-opus-4-5"
// created = "2026-10-14"
// modified = "2026-10-14"
// driver = "Isaac Clayton"

//! Construction parameters shared by every container.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::level::{self, DEFAULT_MAX_LEVEL, DEFAULT_PROBABILITY, Geometric};

/// Parameters for building a list.
///
/// Every field has a default, so a partial JSON document such as
/// `{"max_level": 4}` deserializes to a usable configuration.
///
/// ```
/// use skipmap::Config;
///
/// let config = Config::default().with_max_level(8).with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cap `L` on node height. Levels above it are never generated.
    pub max_level: usize,
    /// Probability `p` that a node reaching level `i` also reaches `i + 1`.
    pub probability: f64,
    /// Seed for the level generator. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_level: DEFAULT_MAX_LEVEL,
            probability: DEFAULT_PROBABILITY,
            seed: None,
        }
    }
}

impl Config {
    /// Set the maximum level.
    pub fn with_max_level(mut self, max_level: usize) -> Config {
        self.max_level = max_level;
        self
    }

    /// Set the promotion probability.
    pub fn with_probability(mut self, probability: f64) -> Config {
        self.probability = probability;
        self
    }

    /// Fix the generator seed for reproducible list shapes.
    pub fn with_seed(mut self, seed: u64) -> Config {
        self.seed = Some(seed);
        self
    }

    /// Check the parameters without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        level::validate(self.max_level, self.probability)
    }

    /// Build the level generator these parameters describe.
    pub fn generator(&self) -> Result<Geometric, ConfigError> {
        debug!(
            max_level = self.max_level,
            probability = self.probability,
            seed = ?self.seed,
            "building level generator"
        );
        match self.seed {
            Some(seed) => Geometric::seeded(self.max_level, self.probability, seed),
            None => Geometric::from_entropy(self.max_level, self.probability),
        }
    }
}
