//! # contest-engine
//!
//! An attribute aggregation and action-test resolution engine for
//! tabletop campaign tools.
//!
//! ## Design Principles
//!
//! 1. **Snapshot In, Result Out**: Every call receives complete entity,
//!    condition, and action snapshots and returns a fresh result. No
//!    internal state, no memoization, no retries.
//!
//! 2. **One Implementation, Every Call Site**: Server request handlers
//!    and client-side previews invoke the same functions and must get
//!    numerically identical results for identical inputs.
//!
//! 3. **Deterministic Probability**: Dice outcomes are enumerated
//!    exhaustively, never sampled. Ties favor the defender everywhere.
//!
//! 4. **Auditable Arithmetic**: Aggregation can record an ordered
//!    breakdown log whose final running total always reconciles with
//!    the returned value, because one accumulation loop produces both.
//!
//! ## Modules
//!
//! - `model`: attributes, entities, conditions, action definitions
//! - `catalog`: attribute and action lookup seams with map-backed impls
//! - `grouping`: the two aggregation policies, condition modifiers, and
//!   the breakdown audit log
//! - `resolve`: action test resolution and trigger chains
//! - `error`: the engine error taxonomy

pub mod catalog;
pub mod error;
pub mod grouping;
pub mod model;
pub mod resolve;

// Re-export commonly used types
pub use crate::model::{
    ActionDefinition, ActionFormula, ActionId, AttributeKey, AttributeValue, Attributes,
    Condition, ConditionKind, ContributionKind, EffectType, Entity, EntityId, EntityIndex,
    ObjectUsage, TargetKind,
};

pub use crate::catalog::{
    ActionCatalog, AttributeCatalog, DiceMapper, DieRange, StaticActionCatalog,
    StaticAttributeCatalog,
};

pub use crate::grouping::{
    AggregationPolicy, Aggregator, BreakdownRecorder, BreakdownStep, ConditionModifier, StepKind,
};

pub use crate::resolve::{
    ActionChain, ActionChainLink, ActionChainResolver, ActionResolver, ActionTestResult,
    ChainTermination, TestOverrides, ValueRange, MAX_CHAIN_LINKS,
};

pub use crate::error::{EngineError, Side};
