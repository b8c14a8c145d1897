//! Engine error taxonomy.
//!
//! Only two conditions are errors. Chain cycle and length-cap stops are
//! ordinary `ChainTermination` values, and a missing attribute on an
//! entity during aggregation is silently skipped.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which side of an action test a value belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// The acting side.
    Source,
    /// The defending side. Wins ties.
    Target,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Source => f.write_str("source"),
            Side::Target => f.write_str("target"),
        }
    }
}

/// Errors surfaced to the caller, which owns user-facing messaging.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// An attribute is marked dice-based but has no valid, positive-sized
    /// die range. Never silently defaulted - enumeration must not run on
    /// a guessed range.
    #[error("attribute `{attribute}` is dice-based but has no valid die range")]
    Configuration {
        /// The misconfigured attribute name.
        attribute: String,
    },

    /// A required side has neither a manual override nor any selected
    /// entity. Caller-correctable.
    #[error("no override or selected entity supplied for the {side} side")]
    Validation {
        /// The side missing input.
        side: Side,
    },
}
