//! Entity snapshots: the aggregation input supplied by collaborators.
//!
//! An `Entity` is a self-contained snapshot of one game object together
//! with its two contributing collections and active conditions:
//!
//! - `equipment`: equipped items, grouped with the signed pairwise policy
//! - `ready`: carried-but-unequipped items, grouped positionally
//! - `conditions`: additive status effects applied after grouping
//!
//! The engine never stores or fetches entities - callers pass complete
//! snapshots and every invocation is independent.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::attribute::{AttributeKey, AttributeValue, Attributes};

/// Unique identifier for an entity snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create a new entity ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Direction of a condition adjustment.
///
/// Conditions never carry `None` - a condition that doesn't apply is
/// simply absent from the entity's list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionKind {
    /// Adds the amount.
    Help,
    /// Subtracts the amount.
    Hinder,
}

/// An additive status effect on an entity.
///
/// Applied after grouping, in the entity's stored list order.
/// `target_attribute` is matched case-insensitively.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Display label for audit output (e.g. "Exhausted").
    pub name: String,

    /// Attribute this condition adjusts.
    pub target_attribute: String,

    /// Whether the amount is added or subtracted.
    pub kind: ConditionKind,

    /// Adjustment magnitude.
    pub amount: f64,
}

impl Condition {
    /// Create a new condition.
    pub fn new(
        name: impl Into<String>,
        target_attribute: impl Into<String>,
        kind: ConditionKind,
        amount: f64,
    ) -> Self {
        Self {
            name: name.into(),
            target_attribute: target_attribute.into(),
            kind,
            amount,
        }
    }

    /// Check whether this condition applies to an attribute.
    #[must_use]
    pub fn applies_to(&self, attribute: &AttributeKey) -> bool {
        attribute.matches(&self.target_attribute)
    }
}

/// A complete entity snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,

    /// Display name, used in breakdown steps.
    pub name: String,

    /// Named attribute values.
    pub attributes: Attributes,

    /// Equipped items contributing to grouped values.
    pub equipment: Vec<Entity>,

    /// Carried-but-unequipped items, grouped separately from equipment.
    pub ready: Vec<Entity>,

    /// Active status effects, applied in stored order.
    pub conditions: Vec<Condition>,
}

impl Entity {
    /// Create a new entity with no attributes or sub-entities.
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            attributes: Attributes::default(),
            equipment: Vec::new(),
            ready: Vec::new(),
            conditions: Vec::new(),
        }
    }

    /// Set an attribute value (builder pattern).
    #[must_use]
    pub fn with_attribute(
        mut self,
        key: impl Into<AttributeKey>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Add an equipped item (builder pattern).
    #[must_use]
    pub fn with_equipment(mut self, item: Entity) -> Self {
        self.equipment.push(item);
        self
    }

    /// Add a ready item (builder pattern).
    #[must_use]
    pub fn with_ready(mut self, item: Entity) -> Self {
        self.ready.push(item);
        self
    }

    /// Add a condition (builder pattern).
    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Look up an attribute value.
    #[must_use]
    pub fn attribute(&self, key: &AttributeKey) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }
}

/// Snapshot map for resolving entity selections by ID.
pub type EntityIndex = FxHashMap<EntityId, Entity>;

/// Collect the entities a list of IDs selects from an index.
///
/// IDs with no snapshot are skipped - an absent entity never
/// contributes, exactly like an absent attribute.
#[must_use]
pub fn select<'a>(index: &'a EntityIndex, ids: &[EntityId]) -> Vec<&'a Entity> {
    ids.iter().filter_map(|id| index.get(id)).collect()
}
