//! The two aggregation policies and their shared numeric helpers.
//!
//! The domain carries two deliberately distinct formulas:
//!
//! - **Pairwise signed** (PSA): walks values largest-first, averaging the
//!   running value with a signed scaling of itself. Help raises, Hinder
//!   lowers. Used for equipment grouping against one primary value.
//! - **Positional weighted** (PWA): weights each value by its rank and
//!   its ratio to the largest value, ignoring Help/Hinder sign. Used
//!   when three or more values are grouped at once.
//!
//! Whether the two should be unified is an open product question; the
//! engine keeps them as separate named strategies on purpose.

use serde::{Deserialize, Serialize};

use crate::model::ContributionKind;

use super::breakdown::{BreakdownRecorder, StepKind};

/// Named aggregation strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregationPolicy {
    /// Sign-directed pairwise averaging (equipment grouping).
    PairwiseSigned,
    /// Rank-weighted averaging ignoring sign (grouping 3+ values).
    PositionalWeighted,
}

/// One value entering a policy loop, with its audit labels.
#[derive(Clone, Debug)]
pub(crate) struct Contribution {
    pub name: String,
    pub value: f64,
    pub kind: ContributionKind,
    pub step_kind: StepKind,
    pub is_grouped: bool,
}

/// Round to two decimals. Applied after every accumulation step so the
/// breakdown log and the final value can never diverge on rounding order.
#[must_use]
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Shared divide-by-zero guard.
///
/// Evaluates `formula(denominator)` normally and substitutes `fallback`
/// when the denominator is zero. Both policies route their division
/// through this helper; only the fallback differs.
pub(crate) fn zero_guarded<F>(denominator: f64, fallback: f64, formula: F) -> f64
where
    F: FnOnce(f64) -> f64,
{
    if denominator == 0.0 {
        fallback
    } else {
        formula(denominator)
    }
}

/// Sort contributions descending by value.
///
/// The sort is stable, but equal values produce identical terms in both
/// policies, so input order among ties never changes the result.
pub(crate) fn sort_descending(contributions: &mut [Contribution]) {
    contributions.sort_by(|a, b| b.value.total_cmp(&a.value));
}

/// Run a policy over contributions already sorted descending.
///
/// Records one step per contribution into `recorder` and returns the
/// final running value. The slice must be non-empty.
pub(crate) fn run(
    policy: AggregationPolicy,
    sorted: &[Contribution],
    recorder: &mut BreakdownRecorder,
) -> f64 {
    let first = &sorted[0];
    let mut running = round2(first.value);
    recorder.record(
        first.step_kind,
        first.name.clone(),
        first.value,
        first.is_grouped,
        running,
        None,
    );

    match policy {
        AggregationPolicy::PairwiseSigned => {
            for contribution in &sorted[1..] {
                let value = contribution.value;
                let sign = contribution.kind.sign();
                let term = zero_guarded(running, value * 0.5, |r| r * (1.0 + sign * (value / r)));
                let formula = if running == 0.0 {
                    format!("({running:.2} + {value:.2} * 0.5) / 2")
                } else {
                    let operator = if sign >= 0.0 { '+' } else { '-' };
                    format!(
                        "({running:.2} + {running:.2} * (1 {operator} {value:.2}/{running:.2})) / 2"
                    )
                };
                running = round2((running + term) / 2.0);
                tracing::trace!(value, term, running, "pairwise signed step");
                recorder.record(
                    contribution.step_kind,
                    contribution.name.clone(),
                    value,
                    contribution.is_grouped,
                    running,
                    Some(formula),
                );
            }
        }
        AggregationPolicy::PositionalWeighted => {
            let largest = first.value;
            let mut weighted_sum = 0.0;
            for (index, contribution) in sorted[1..].iter().enumerate() {
                let rank = (index + 2) as f64;
                let value = contribution.value;
                let weight = rank + zero_guarded(largest, 0.0, |a| value / a);
                weighted_sum += value * weight;
                running = round2((largest + weighted_sum) / rank);
                tracing::trace!(value, weight, running, "positional weighted step");
                recorder.record(
                    contribution.step_kind,
                    contribution.name.clone(),
                    value,
                    contribution.is_grouped,
                    running,
                    Some(format!(
                        "({largest:.2} + {weighted_sum:.2}) / {rank}",
                        rank = index + 2
                    )),
                );
            }
        }
    }

    running
}

#[cfg(test)]
mod tests {
    use super::*;

    fn help(name: &str, value: f64) -> Contribution {
        Contribution {
            name: name.to_string(),
            value,
            kind: ContributionKind::Help,
            step_kind: StepKind::Equipment,
            is_grouped: true,
        }
    }

    fn hinder(name: &str, value: f64) -> Contribution {
        Contribution {
            kind: ContributionKind::Hinder,
            ..help(name, value)
        }
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(13.0666), 13.07);
        assert_eq!(round2(12.8), 12.8);
        assert_eq!(round2(-2.344), -2.34);
    }

    #[test]
    fn test_zero_guarded() {
        assert_eq!(zero_guarded(10.0, 99.0, |d| 5.0 / d), 0.5);
        assert_eq!(zero_guarded(0.0, 99.0, |d| 5.0 / d), 99.0);
    }

    #[test]
    fn test_pairwise_signed_help() {
        // (10 + 10 * (1 + 6/10)) / 2 = 13.0
        let mut recorder = BreakdownRecorder::new();
        let sorted = vec![help("Hero", 10.0), help("Sword", 6.0)];
        let result = run(AggregationPolicy::PairwiseSigned, &sorted, &mut recorder);

        assert_eq!(result, 13.0);
        assert_eq!(recorder.len(), 2);
        assert_eq!(recorder.last_total(), Some(13.0));
    }

    #[test]
    fn test_pairwise_signed_hinder() {
        // (10 + 10 * (1 - 6/10)) / 2 = 7.0
        let mut recorder = BreakdownRecorder::new();
        let sorted = vec![help("Hero", 10.0), hinder("Cursed Ring", 6.0)];
        let result = run(AggregationPolicy::PairwiseSigned, &sorted, &mut recorder);

        assert_eq!(result, 7.0);
    }

    #[test]
    fn test_pairwise_zero_guard() {
        // Running value 0 substitutes value * 0.5 for the scaled term:
        // (0 + (-4 * 0.5)) / 2 = -1.
        let mut recorder = BreakdownRecorder::new();
        let sorted = vec![help("Hero", 0.0), help("Dead Weight", -4.0)];
        let result = run(AggregationPolicy::PairwiseSigned, &sorted, &mut recorder);

        assert_eq!(result, -1.0);
        let formula = recorder.steps()[1].formula.as_deref().unwrap();
        assert!(formula.contains("* 0.5"));
    }

    #[test]
    fn test_positional_weighted_reference_values() {
        // Step 2: (10 + 6 * (2 + 0.6)) / 2 = 12.8
        // Step 3: (10 + 15.6 + 4 * (3 + 0.4)) / 3 = 13.07
        let mut recorder = BreakdownRecorder::new();
        let sorted = vec![help("Rope", 10.0), help("Torch", 6.0), help("Flint", 4.0)];
        let result = run(AggregationPolicy::PositionalWeighted, &sorted, &mut recorder);

        assert_eq!(recorder.steps()[1].running_total, 12.8);
        assert_eq!(recorder.steps()[2].running_total, 13.07);
        assert_eq!(result, 13.07);
    }

    #[test]
    fn test_positional_weighted_ignores_sign() {
        let mut recorder_help = BreakdownRecorder::new();
        let mut recorder_hinder = BreakdownRecorder::new();

        let with_help = vec![help("A", 10.0), help("B", 6.0)];
        let with_hinder = vec![help("A", 10.0), hinder("B", 6.0)];

        let lhs = run(
            AggregationPolicy::PositionalWeighted,
            &with_help,
            &mut recorder_help,
        );
        let rhs = run(
            AggregationPolicy::PositionalWeighted,
            &with_hinder,
            &mut recorder_hinder,
        );

        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_positional_weighted_zero_largest() {
        // A1 == 0 drops the Ak/A1 ratio, leaving Ak * k.
        let mut recorder = BreakdownRecorder::new();
        let sorted = vec![help("A", 0.0), help("B", 0.0)];
        let result = run(AggregationPolicy::PositionalWeighted, &sorted, &mut recorder);

        assert_eq!(result, 0.0);
    }

    #[test]
    fn test_sort_descending() {
        let mut contributions = vec![help("A", 4.0), help("B", 10.0), help("C", 6.0)];
        sort_descending(&mut contributions);

        let values: Vec<_> = contributions.iter().map(|c| c.value).collect();
        assert_eq!(values, vec![10.0, 6.0, 4.0]);
    }
}
