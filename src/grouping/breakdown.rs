//! Audit log for aggregation: one step per contributing value.
//!
//! The recorder does not recompute anything. The policy loops and the
//! condition modifier push steps as they accumulate, so the last step's
//! `running_total` is the returned value by construction, never by a
//! parallel calculation that could drift.
//!
//! Breakdown output is display/audit only - the action resolver never
//! reads it.

use serde::{Deserialize, Serialize};

/// Where a breakdown step's value came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepKind {
    /// The primary entity's own value - always the base of the log.
    Primary,
    /// An equipped item.
    Equipment,
    /// A carried-but-unequipped item.
    Ready,
    /// Another selected entity (cross-entity aggregation).
    Entity,
    /// A status-effect adjustment.
    Condition,
}

/// One ordered step of an aggregation audit log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BreakdownStep {
    /// 1-based position in the log.
    pub step: u32,

    /// Display name of the contributing entity or condition.
    pub entity_name: String,

    /// Where the value came from.
    pub entity_kind: StepKind,

    /// The raw value this step contributed. Signed for conditions:
    /// a hindering condition contributes a negative amount.
    pub contributed_value: f64,

    /// Whether this value entered grouping.
    pub is_grouped: bool,

    /// Accumulated value after this step, rounded to two decimals.
    pub running_total: f64,

    /// Deterministic rendering of the accumulation arithmetic.
    /// `None` for the first step, which contributes its value as-is.
    pub formula: Option<String>,
}

/// Collects [`BreakdownStep`]s in accumulation order.
#[derive(Clone, Debug, Default)]
pub struct BreakdownRecorder {
    steps: Vec<BreakdownStep>,
}

impl BreakdownRecorder {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step. Step numbers are assigned from insertion order.
    pub fn record(
        &mut self,
        entity_kind: StepKind,
        entity_name: impl Into<String>,
        contributed_value: f64,
        is_grouped: bool,
        running_total: f64,
        formula: Option<String>,
    ) {
        let step = self.steps.len() as u32 + 1;
        self.steps.push(BreakdownStep {
            step,
            entity_name: entity_name.into(),
            entity_kind,
            contributed_value,
            is_grouped,
            running_total,
            formula,
        });
    }

    /// The recorded steps, in order.
    #[must_use]
    pub fn steps(&self) -> &[BreakdownStep] {
        &self.steps
    }

    /// The running total of the last step, if any step was recorded.
    #[must_use]
    pub fn last_total(&self) -> Option<f64> {
        self.steps.last().map(|s| s.running_total)
    }

    /// Number of recorded steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Consume the recorder, yielding the ordered steps.
    #[must_use]
    pub fn into_steps(self) -> Vec<BreakdownStep> {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_numbering() {
        let mut recorder = BreakdownRecorder::new();
        recorder.record(StepKind::Primary, "Hero", 10.0, true, 10.0, None);
        recorder.record(
            StepKind::Equipment,
            "Sword",
            6.0,
            true,
            13.0,
            Some("(10.00 + 10.00 * (1 + 6.00/10.00)) / 2".to_string()),
        );

        let steps = recorder.steps();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].step, 1);
        assert_eq!(steps[1].step, 2);
        assert_eq!(recorder.last_total(), Some(13.0));
    }

    #[test]
    fn test_first_step_has_no_formula() {
        let mut recorder = BreakdownRecorder::new();
        recorder.record(StepKind::Primary, "Hero", 10.0, true, 10.0, None);

        assert!(recorder.steps()[0].formula.is_none());
    }

    #[test]
    fn test_empty_recorder() {
        let recorder = BreakdownRecorder::new();
        assert!(recorder.is_empty());
        assert_eq!(recorder.last_total(), None);
    }

    #[test]
    fn test_step_serialization() {
        let step = BreakdownStep {
            step: 2,
            entity_name: "Sword".to_string(),
            entity_kind: StepKind::Equipment,
            contributed_value: 6.0,
            is_grouped: true,
            running_total: 13.0,
            formula: Some("(10.00 + 16.00) / 2".to_string()),
        };

        let json = serde_json::to_string(&step).unwrap();
        let back: BreakdownStep = serde_json::from_str(&json).unwrap();
        assert_eq!(step, back);
    }
}
