// model = "claude-opus-4-5"
// created = "2026-10-14"
// modified = "2026-10-14"
// driver = "Isaac Clayton"

//! Error types.
//!
//! Lookups that miss and inserts that collide are not errors: they come back
//! as `None` or `false`. The only fallible step is construction, plus the
//! structural self-check used by tests and fuzzers.

use thiserror::Error;

/// A list could not be built from the given parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The maximum level must allow at least the base level.
    #[error("max level must be at least 1, got {0}")]
    MaxLevelTooSmall(usize),
    /// The head tower is sized by the maximum level, so it is bounded.
    #[error("max level must be at most {limit}, got {got}")]
    MaxLevelTooLarge { got: usize, limit: usize },
    /// Level promotion probability outside the open interval (0, 1).
    #[error("level probability must be in (0, 1), got {0}")]
    Probability(f64),
}

/// A structural invariant failed to hold. Returned by `verify`.
///
/// Positions count level-0 steps from the head: the head is 0, the first
/// node is 1.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    #[error("length counter is {counted} but level 0 holds {walked} nodes")]
    Length { counted: usize, walked: usize },
    #[error("keys out of order at position {position}")]
    Order { position: usize },
    #[error("level {level} visits a node out of level-0 order at position {position}")]
    Level { level: usize, position: usize },
    #[error("span at position {position}, level {level} is {stored}, expected {derived}")]
    Span {
        position: usize,
        level: usize,
        stored: usize,
        derived: usize,
    },
    #[error("height is {height} but the tallest tower has {tallest} levels")]
    Height { height: usize, tallest: usize },
}
