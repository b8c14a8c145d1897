//! Additive status-effect adjustments applied after grouping.

use crate::model::{AttributeKey, Condition, ConditionKind};

use super::breakdown::{BreakdownRecorder, StepKind};
use super::policy::round2;

/// Applies condition adjustments to an already-aggregated value.
pub struct ConditionModifier;

impl ConditionModifier {
    /// Apply every condition matching `attribute` to `base`.
    ///
    /// Conditions apply in the stored list order, never sorted. The
    /// attribute match is case-insensitive. Rounds to two decimals after
    /// each step.
    #[must_use]
    pub fn apply(base: f64, conditions: &[Condition], attribute: &AttributeKey) -> f64 {
        let mut recorder = BreakdownRecorder::new();
        Self::apply_recorded(base, conditions, attribute, &mut recorder)
    }

    /// Apply conditions while recording one breakdown step per match.
    pub fn apply_recorded(
        base: f64,
        conditions: &[Condition],
        attribute: &AttributeKey,
        recorder: &mut BreakdownRecorder,
    ) -> f64 {
        let mut running = base;
        for condition in conditions {
            if !condition.applies_to(attribute) {
                continue;
            }
            let (signed_amount, operator) = match condition.kind {
                ConditionKind::Help => (condition.amount, '+'),
                ConditionKind::Hinder => (-condition.amount, '-'),
            };
            let formula = format!("{running:.2} {operator} {:.2}", condition.amount);
            running = round2(running + signed_amount);
            recorder.record(
                StepKind::Condition,
                condition.name.clone(),
                signed_amount,
                false,
                running,
                Some(formula),
            );
        }
        running
    }
}
