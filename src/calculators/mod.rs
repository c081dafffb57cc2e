//! Technique calculators
//!
//! Self-contained estimators for specific training activities. Each one is
//! a pure function over its inputs (loot simulations take an explicit RNG
//! so tests can seed them).

pub mod ardy_knights;
pub mod birdhouses;
pub mod drop_table;
pub mod gotr;
pub mod herbiboar;
pub mod wintertodt;

use thiserror::Error;

/// Input validation errors shared by the technique calculators. All of
/// them are recoverable and map to a 400 at the API boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalcError {
    #[error("target progress ({target}) must be greater than current progress ({current})")]
    TargetNotAboveCurrent { current: u32, target: u32 },
    #[error("{skill} level {level} is below the minimum of {minimum}")]
    LevelBelowMinimum {
        skill: &'static str,
        level: u32,
        minimum: u32,
    },
    #[error("{skill} level must be between {min} and {max}")]
    LevelOutOfRange {
        skill: &'static str,
        min: u32,
        max: u32,
    },
    #[error("{field} must be positive")]
    NonPositive { field: &'static str },
    #[error("unknown birdhouse type: {0}")]
    UnknownBirdhouseType(String),
}
