//! Action test inputs and outputs.

use serde::{Deserialize, Serialize};

use crate::catalog::DieRange;

/// Manual numeric entries that bypass aggregation for one or both sides.
///
/// An overridden side needs no selected entities; its contributing
/// entity count is reported as 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TestOverrides {
    /// Manual source-side value.
    pub source_value: Option<f64>,
    /// Manual target-side value.
    pub target_value: Option<f64>,
}

impl TestOverrides {
    /// No overrides - both sides aggregate from their selections.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Override the source side (builder pattern).
    #[must_use]
    pub fn with_source(mut self, value: f64) -> Self {
        self.source_value = Some(value);
        self
    }

    /// Override the target side (builder pattern).
    #[must_use]
    pub fn with_target(mut self, value: f64) -> Self {
        self.target_value = Some(value);
        self
    }
}

/// Inclusive range of outcomes one side can produce.
///
/// A static side collapses to its value; a dice side spans the die range
/// shifted by the side's modifier.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    /// Lowest attainable total.
    pub min: f64,
    /// Highest attainable total.
    pub max: f64,
}

impl ValueRange {
    /// The degenerate range of a static value.
    #[must_use]
    pub fn fixed(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// The total range of a die shifted by a modifier.
    #[must_use]
    pub fn from_rolls(range: DieRange, modifier: i64) -> Self {
        Self {
            min: (i64::from(range.min) + modifier) as f64,
            max: (i64::from(range.max) + modifier) as f64,
        }
    }
}

/// The resolved outcome of one action test.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionTestResult {
    /// Effective source-side value (aggregated or overridden).
    pub source_value: f64,

    /// Effective target-side value (aggregated or overridden).
    pub target_value: f64,

    /// Entities that contributed to the source value. 0 when overridden.
    pub source_count: u32,

    /// Entities that contributed to the target value. 0 when overridden.
    pub target_count: u32,

    /// Roll modifier the source value grants. 0 for a static side.
    pub source_modifier: i64,

    /// Roll modifier the target side carries. 0 for a static side.
    pub target_modifier: i64,

    /// Attainable source totals.
    pub source_range: ValueRange,

    /// Attainable target totals.
    pub target_range: ValueRange,

    /// Every roll combination favors the source.
    pub guaranteed_success: bool,

    /// No roll combination favors the source.
    pub guaranteed_failure: bool,

    /// Some combinations favor the source, some the target.
    pub partial_success: bool,

    /// Share of combinations favoring the source, in percent.
    pub success_percentage: f64,
}
