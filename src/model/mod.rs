//! Domain data: attributes, entities, conditions, action definitions.
//!
//! ## Key Types
//!
//! - `AttributeKey` / `AttributeValue`: named values with a
//!   `ContributionKind` tag (`Help` / `Hinder` / `None`)
//! - `Entity`: snapshot of one game object plus its `equipment`,
//!   `ready`, and `conditions` collections
//! - `Condition`: additive status effect matched by attribute name
//! - `ActionDefinition`: static description of one action test,
//!   optionally linking the next action of a chain

pub mod action;
pub mod attribute;
pub mod entity;

pub use action::{ActionDefinition, ActionFormula, ActionId, EffectType, ObjectUsage, TargetKind};
pub use attribute::{AttributeKey, AttributeValue, Attributes, ContributionKind};
pub use entity::{select, Condition, ConditionKind, Entity, EntityId, EntityIndex};
