//! Collaborator seams: configuration lookup the engine never owns.
//!
//! ## Key Types
//!
//! - `AttributeCatalog`: is an attribute dice-based, its die range,
//!   its value-to-modifier mapping
//! - `DiceMapper`: validation wrapper that refuses to guess a range
//! - `ActionCatalog`: action definition lookup for chain resolution
//!
//! Both traits ship with map-backed `Static*` implementations for
//! in-process use and tests; callers with remote catalogs implement
//! the traits over their own snapshots.

pub mod actions;
pub mod attributes;

pub use actions::{ActionCatalog, StaticActionCatalog};
pub use attributes::{AttributeCatalog, AttributeConfig, DiceMapper, DieRange, StaticAttributeCatalog};
