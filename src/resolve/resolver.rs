//! Resolving one action test between a source and a target side.
//!
//! Resolution is exhaustive, never sampled: dice sides enumerate every
//! roll total, so identical inputs give identical percentages at every
//! call site. Ties favor the defender throughout - a target total equal
//! to the source total counts against the source.

use crate::catalog::{AttributeCatalog, DiceMapper, DieRange};
use crate::error::{EngineError, Side};
use crate::grouping::breakdown::{BreakdownRecorder, StepKind};
use crate::grouping::policy::{self, AggregationPolicy, Contribution};
use crate::grouping::Aggregator;
use crate::model::{ActionDefinition, ActionFormula, AttributeKey, ContributionKind, Entity};

use super::outcome::{ActionTestResult, TestOverrides, ValueRange};

/// Resolves action tests against an attribute catalog.
pub struct ActionResolver<'a> {
    dice: DiceMapper<'a>,
}

impl<'a> ActionResolver<'a> {
    /// Create a resolver over an attribute catalog.
    #[must_use]
    pub fn new(catalog: &'a dyn AttributeCatalog) -> Self {
        Self {
            dice: DiceMapper::new(catalog),
        }
    }

    /// Resolve one contest.
    ///
    /// Each side takes its value from a manual override when present,
    /// otherwise from its selected entities: the entity's own effective
    /// value (equipment grouping plus conditions), folded across
    /// multiple entities with the positional weighted policy.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Validation`] when a side has neither an override
    ///   nor any selected entity.
    /// - [`EngineError::Configuration`] when a dice-based attribute has
    ///   no valid die range. Surfaced before any enumeration runs.
    pub fn resolve(
        &self,
        action: &ActionDefinition,
        source: &[&Entity],
        target: &[&Entity],
        overrides: &TestOverrides,
    ) -> Result<ActionTestResult, EngineError> {
        let (source_value, source_count) = self.side_value(
            &action.source_attribute,
            source,
            overrides.source_value,
            Side::Source,
        )?;
        let (target_value, target_count) = self.side_value(
            &action.target_attribute,
            target,
            overrides.target_value,
            Side::Target,
        )?;

        // Validate both ranges before touching any enumeration loop.
        let source_die = self.dice.die_range(&action.source_attribute)?;
        let target_die = self.dice.die_range(&action.target_attribute)?;

        let source_modifier = self.dice.modifier(&action.source_attribute, source_value);
        let target_modifier = match action.formula {
            ActionFormula::Standard => self.dice.modifier(&action.target_attribute, target_value),
            ActionFormula::Delta => {
                // The target-side modifier comes from how far the target's
                // value of the *target* attribute exceeds the source's value
                // of that same attribute. Standard tests never do this.
                // An override wins here exactly as it does in `side_value`.
                let source_side = overrides.source_value.unwrap_or_else(|| {
                    self.side_attribute_value(&action.target_attribute, source)
                });
                let delta = policy::round2(target_value - source_side);
                self.dice.modifier(&action.target_attribute, delta)
            }
        };

        let (favorable, total) = match (source_die, target_die) {
            (None, None) => {
                let favorable = u64::from(source_value > target_value);
                (favorable, 1)
            }
            (Some(range), None) => {
                count_source_rolls(range, source_modifier, target_value)
            }
            (None, Some(range)) => {
                count_target_rolls(range, target_modifier, source_value)
            }
            (Some(source_range), Some(target_range)) => count_cross_product(
                source_range,
                source_modifier,
                target_range,
                target_modifier,
            ),
        };

        let success_percentage = policy::round2(100.0 * favorable as f64 / total as f64);
        let guaranteed_success = favorable == total;
        let guaranteed_failure = favorable == 0;

        tracing::debug!(
            action = %action.id,
            source_value,
            target_value,
            favorable,
            total,
            success_percentage,
            "resolved action test"
        );

        Ok(ActionTestResult {
            source_value,
            target_value,
            source_count,
            target_count,
            source_modifier,
            target_modifier,
            source_range: side_range(source_die, source_modifier, source_value),
            target_range: side_range(target_die, target_modifier, target_value),
            guaranteed_success,
            guaranteed_failure,
            partial_success: !guaranteed_success && !guaranteed_failure,
            success_percentage,
        })
    }

    /// One side's effective value and contributing entity count.
    fn side_value(
        &self,
        attribute: &AttributeKey,
        entities: &[&Entity],
        manual: Option<f64>,
        side: Side,
    ) -> Result<(f64, u32), EngineError> {
        if let Some(value) = manual {
            return Ok((value, 0));
        }
        if entities.is_empty() {
            return Err(EngineError::Validation { side });
        }
        Ok((
            self.side_attribute_value(attribute, entities),
            entities.len() as u32,
        ))
    }

    /// Aggregate an attribute across selected entities: each entity's own
    /// effective value first, then the positional weighted policy across
    /// entities (nested aggregation).
    fn side_attribute_value(&self, attribute: &AttributeKey, entities: &[&Entity]) -> f64 {
        if let [only] = entities {
            return policy::round2(Aggregator::effective_value(attribute, only));
        }

        let mut contributions: Vec<Contribution> = entities
            .iter()
            .map(|entity| Contribution {
                name: entity.name.clone(),
                value: Aggregator::effective_value(attribute, entity),
                kind: ContributionKind::Help,
                step_kind: StepKind::Entity,
                is_grouped: true,
            })
            .collect();
        policy::sort_descending(&mut contributions);

        let mut recorder = BreakdownRecorder::new();
        policy::run(
            AggregationPolicy::PositionalWeighted,
            &contributions,
            &mut recorder,
        )
    }
}

/// Totals one side can roll, in ascending order.
fn roll_totals(range: DieRange, modifier: i64) -> impl Iterator<Item = i64> {
    (range.min..=range.max).map(move |roll| i64::from(roll) + modifier)
}

/// Source rolls against a static target: success is strictly greater.
fn count_source_rolls(range: DieRange, modifier: i64, target_value: f64) -> (u64, u64) {
    let favorable = roll_totals(range, modifier)
        .filter(|total| *total as f64 > target_value)
        .count() as u64;
    (favorable, u64::from(range.faces()))
}

/// Target rolls against a static source: the defender holds on a total
/// greater than *or equal to* the source value.
fn count_target_rolls(range: DieRange, modifier: i64, source_value: f64) -> (u64, u64) {
    let favorable = roll_totals(range, modifier)
        .filter(|total| (*total as f64) < source_value)
        .count() as u64;
    (favorable, u64::from(range.faces()))
}

/// Both sides roll: enumerate the full cross product of totals.
fn count_cross_product(
    source_range: DieRange,
    source_modifier: i64,
    target_range: DieRange,
    target_modifier: i64,
) -> (u64, u64) {
    let mut favorable = 0u64;
    for source_total in roll_totals(source_range, source_modifier) {
        for target_total in roll_totals(target_range, target_modifier) {
            if source_total > target_total {
                favorable += 1;
            }
        }
    }
    let total = u64::from(source_range.faces()) * u64::from(target_range.faces());
    (favorable, total)
}

fn side_range(die: Option<DieRange>, modifier: i64, value: f64) -> ValueRange {
    match die {
        Some(range) => ValueRange::from_rolls(range, modifier),
        None => ValueRange::fixed(value),
    }
}
