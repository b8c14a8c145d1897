//! Attribute aggregation: policies, condition modifiers, audit log.
//!
//! ## Key Types
//!
//! - `AggregationPolicy`: the two named strategies, pairwise signed
//!   (equipment) and positional weighted (3+ values)
//! - `Aggregator`: grouping entry points, plain and recorded
//! - `ConditionModifier`: post-grouping additive adjustments
//! - `BreakdownRecorder` / `BreakdownStep`: the ordered audit log whose
//!   final running total always reconciles with the returned value
//!
//! Everything rounds to two decimals at each accumulation step, so the
//! audit log and the computed value cannot diverge on rounding order.

pub mod aggregator;
pub mod breakdown;
pub mod conditions;
pub mod policy;

pub use aggregator::Aggregator;
pub use breakdown::{BreakdownRecorder, BreakdownStep, StepKind};
pub use conditions::ConditionModifier;
pub use policy::AggregationPolicy;
