//! Action definitions - the static description of one contest.
//!
//! An `ActionDefinition` names the attribute each side brings to the
//! test, how the target-side modifier is derived, and what happens on
//! completion. Definitions are immutable catalog data; the resolver
//! never mutates them.

use serde::{Deserialize, Serialize};

use super::attribute::AttributeKey;

/// Unique identifier for an action definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionId(pub u32);

impl ActionId {
    /// Create a new action ID.
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

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Action({})", self.0)
    }
}

/// How the target-side modifier is derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionFormula {
    /// Each side's modifier comes from its own attribute value.
    Standard,
    /// The target-side modifier comes from the difference between the
    /// target's and the source's value of the *target* attribute.
    ///
    /// Asymmetric on purpose: the source side is unaffected.
    Delta,
}

/// What kind of entity the action targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    /// A character entity.
    Character,
    /// An inanimate object entity.
    Object,
}

/// Whether the action involves a held object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObjectUsage {
    /// No object involved.
    #[default]
    None,
    /// An object may be used if one is equipped.
    Optional,
    /// The action cannot be attempted without an object.
    Required,
}

/// What completing the action does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EffectType {
    /// The test stands alone.
    #[default]
    None,
    /// Completing the test triggers another action, forming a chain.
    TriggerAction,
}

/// Static definition of one action test.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionDefinition {
    /// Unique identifier.
    pub id: ActionId,

    /// Display name (for audit output and debugging).
    pub name: String,

    /// Attribute the source side tests with.
    pub source_attribute: AttributeKey,

    /// Attribute the target side defends with.
    pub target_attribute: AttributeKey,

    /// Kind of entity this action targets.
    pub target_kind: TargetKind,

    /// Modifier derivation rule.
    pub formula: ActionFormula,

    /// Whether a held object participates.
    pub object_usage: ObjectUsage,

    /// What completing the test does.
    pub effect_type: EffectType,

    /// The follow-up action when `effect_type` is `TriggerAction`.
    pub triggered_action: Option<ActionId>,
}

impl ActionDefinition {
    /// Create a standard character-vs-character action.
    pub fn new(
        id: ActionId,
        name: impl Into<String>,
        source_attribute: impl Into<AttributeKey>,
        target_attribute: impl Into<AttributeKey>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            source_attribute: source_attribute.into(),
            target_attribute: target_attribute.into(),
            target_kind: TargetKind::Character,
            formula: ActionFormula::Standard,
            object_usage: ObjectUsage::default(),
            effect_type: EffectType::default(),
            triggered_action: None,
        }
    }

    /// Set the formula (builder pattern).
    #[must_use]
    pub fn with_formula(mut self, formula: ActionFormula) -> Self {
        self.formula = formula;
        self
    }

    /// Set the target kind (builder pattern).
    #[must_use]
    pub fn with_target_kind(mut self, target_kind: TargetKind) -> Self {
        self.target_kind = target_kind;
        self
    }

    /// Set the object usage (builder pattern).
    #[must_use]
    pub fn with_object_usage(mut self, object_usage: ObjectUsage) -> Self {
        self.object_usage = object_usage;
        self
    }

    /// Make this action trigger a follow-up action (builder pattern).
    #[must_use]
    pub fn triggering(mut self, next: ActionId) -> Self {
        self.effect_type = EffectType::TriggerAction;
        self.triggered_action = Some(next);
        self
    }

    /// The next action in a chain, if this definition links one.
    ///
    /// Returns `None` unless `effect_type` is `TriggerAction` *and* a
    /// triggered action ID is present.
    #[must_use]
    pub fn next_in_chain(&self) -> Option<ActionId> {
        match self.effect_type {
            EffectType::TriggerAction => self.triggered_action,
            EffectType::None => None,
        }
    }
}
