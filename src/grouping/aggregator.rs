//! Grouping a primary attribute value with contributing sub-entities.
//!
//! The aggregator is the single implementation both call sites (server
//! request handler and client preview) invoke - there is deliberately no
//! second fallback copy that could drift.

use crate::model::{AttributeKey, Entity};

use super::breakdown::{BreakdownRecorder, StepKind};
use super::conditions::ConditionModifier;
use super::policy::{self, AggregationPolicy, Contribution};

/// Combines a primary entity's attribute value with contributor values.
pub struct Aggregator;

impl Aggregator {
    /// Aggregate a primary entity's attribute with contributor entities.
    ///
    /// Returns the primary value unchanged when:
    /// - the primary value is ungrouped or `None`-kinded,
    /// - no contributor supplies a non-`None` value for the attribute.
    ///
    /// A primary without the attribute at all aggregates as 0. Otherwise
    /// the full value set (primary + contributors) is sorted descending
    /// and folded by `policy`, rounding to two decimals at every step.
    #[must_use]
    pub fn aggregate(
        attribute: &AttributeKey,
        primary: &Entity,
        contributors: &[&Entity],
        policy: AggregationPolicy,
    ) -> f64 {
        let mut recorder = BreakdownRecorder::new();
        Self::aggregate_recorded(attribute, primary, contributors, policy, &mut recorder)
    }

    /// Aggregate while recording one breakdown step per contributing value.
    pub fn aggregate_recorded(
        attribute: &AttributeKey,
        primary: &Entity,
        contributors: &[&Entity],
        policy: AggregationPolicy,
        recorder: &mut BreakdownRecorder,
    ) -> f64 {
        let contributions = collect(attribute, contributors.iter().copied(), StepKind::Entity);
        Self::grouped(attribute, primary, contributions, policy, recorder)
    }

    /// Equipment grouping: pairwise signed over `entity.equipment`.
    #[must_use]
    pub fn equipment_grouped(attribute: &AttributeKey, entity: &Entity) -> f64 {
        let mut recorder = BreakdownRecorder::new();
        Self::equipment_grouped_recorded(attribute, entity, &mut recorder)
    }

    /// Recorded variant of [`Aggregator::equipment_grouped`].
    pub fn equipment_grouped_recorded(
        attribute: &AttributeKey,
        entity: &Entity,
        recorder: &mut BreakdownRecorder,
    ) -> f64 {
        let contributions = collect(attribute, entity.equipment.iter(), StepKind::Equipment);
        Self::grouped(
            attribute,
            entity,
            contributions,
            AggregationPolicy::PairwiseSigned,
            recorder,
        )
    }

    /// Ready grouping: positional weighted over `entity.ready`.
    #[must_use]
    pub fn ready_grouped(attribute: &AttributeKey, entity: &Entity) -> f64 {
        let mut recorder = BreakdownRecorder::new();
        Self::ready_grouped_recorded(attribute, entity, &mut recorder)
    }

    /// Recorded variant of [`Aggregator::ready_grouped`].
    pub fn ready_grouped_recorded(
        attribute: &AttributeKey,
        entity: &Entity,
        recorder: &mut BreakdownRecorder,
    ) -> f64 {
        let contributions = collect(attribute, entity.ready.iter(), StepKind::Ready);
        Self::grouped(
            attribute,
            entity,
            contributions,
            AggregationPolicy::PositionalWeighted,
            recorder,
        )
    }

    /// Combined grouping: positional weighted over equipment and ready
    /// items together.
    #[must_use]
    pub fn combined_grouped(attribute: &AttributeKey, entity: &Entity) -> f64 {
        let mut recorder = BreakdownRecorder::new();
        let mut contributions = collect(attribute, entity.equipment.iter(), StepKind::Equipment);
        contributions.extend(collect(attribute, entity.ready.iter(), StepKind::Ready));
        Self::grouped(
            attribute,
            entity,
            contributions,
            AggregationPolicy::PositionalWeighted,
            &mut recorder,
        )
    }

    /// The per-entity value the action resolver consumes: equipment
    /// grouping followed by condition adjustments.
    #[must_use]
    pub fn effective_value(attribute: &AttributeKey, entity: &Entity) -> f64 {
        let mut recorder = BreakdownRecorder::new();
        Self::effective_value_recorded(attribute, entity, &mut recorder)
    }

    /// Recorded variant of [`Aggregator::effective_value`].
    pub fn effective_value_recorded(
        attribute: &AttributeKey,
        entity: &Entity,
        recorder: &mut BreakdownRecorder,
    ) -> f64 {
        let grouped = Self::equipment_grouped_recorded(attribute, entity, recorder);
        ConditionModifier::apply_recorded(grouped, &entity.conditions, attribute, recorder)
    }

    /// Shared grouping core: guard clauses, descending sort, policy fold.
    fn grouped(
        attribute: &AttributeKey,
        primary: &Entity,
        contributions: Vec<Contribution>,
        policy_choice: AggregationPolicy,
        recorder: &mut BreakdownRecorder,
    ) -> f64 {
        let Some(primary_value) = primary.attribute(attribute) else {
            // A primary without the attribute still gets an audit step,
            // so the last step's running total is the returned value
            // even in this degenerate case.
            recorder.record(StepKind::Primary, primary.name.clone(), 0.0, false, 0.0, None);
            return 0.0;
        };

        let no_grouping = !primary_value.is_grouped
            || !primary_value.kind.contributes()
            || contributions.is_empty();
        if no_grouping {
            recorder.record(
                StepKind::Primary,
                primary.name.clone(),
                primary_value.value,
                primary_value.is_grouped,
                policy::round2(primary_value.value),
                None,
            );
            return primary_value.value;
        }

        let mut all = Vec::with_capacity(contributions.len() + 1);
        all.push(Contribution {
            name: primary.name.clone(),
            value: primary_value.value,
            kind: primary_value.kind,
            step_kind: StepKind::Primary,
            is_grouped: primary_value.is_grouped,
        });
        all.extend(contributions);

        policy::sort_descending(&mut all);
        policy::run(policy_choice, &all, recorder)
    }
}

/// Gather contributions from entities, skipping missing attributes and
/// `None`-kinded values. Never fatal.
fn collect<'a>(
    attribute: &AttributeKey,
    entities: impl Iterator<Item = &'a Entity>,
    origin: StepKind,
) -> Vec<Contribution> {
    entities
        .filter_map(|entity| {
            let value = entity.attribute(attribute)?;
            if !value.kind.contributes() {
                return None;
            }
            Some(Contribution {
                name: entity.name.clone(),
                value: value.value,
                kind: value.kind,
                step_kind: origin,
                is_grouped: value.is_grouped,
            })
        })
        .collect()
}
