//! Attribute values and their aggregation tags.
//!
//! Entities have named attributes like "strength", "aim", "vigilance".
//! The engine doesn't interpret names - the attribute catalog does.
//!
//! Every value carries a `ContributionKind` tag that decides how it
//! participates when values are grouped:
//!
//! - `Help`: raises the grouped value
//! - `Hinder`: lowers the grouped value
//! - `None`: excluded from every aggregation pass

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Key for accessing entity attributes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeKey(pub String);

impl AttributeKey {
    /// Create a new attribute key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against another name.
    ///
    /// Condition matching is case-insensitive; map lookups are not.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl From<&str> for AttributeKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AttributeKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a value participates in aggregation.
///
/// Closed variant set: every consumer must handle all three cases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContributionKind {
    /// Raises the grouped value.
    Help,
    /// Lowers the grouped value.
    Hinder,
    /// Never participates in aggregation.
    None,
}

impl ContributionKind {
    /// Check whether a value with this kind enters aggregation at all.
    #[must_use]
    pub fn contributes(self) -> bool {
        match self {
            ContributionKind::Help | ContributionKind::Hinder => true,
            ContributionKind::None => false,
        }
    }

    /// Sign applied by the pairwise signed policy: +1 for Help, -1 for Hinder.
    ///
    /// `None` values are filtered out before any policy runs and never
    /// reach this.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            ContributionKind::Help => 1.0,
            ContributionKind::Hinder => -1.0,
            ContributionKind::None => 0.0,
        }
    }
}

/// A single named attribute value on an entity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttributeValue {
    /// The numeric value.
    pub value: f64,

    /// How this value participates in aggregation.
    pub kind: ContributionKind,

    /// Does the owner allow grouping this attribute at all?
    ///
    /// Only consulted on the primary entity: an ungrouped primary value
    /// is returned unchanged, contributors notwithstanding.
    pub is_grouped: bool,
}

impl AttributeValue {
    /// Create a grouped helping value - the common case.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            value,
            kind: ContributionKind::Help,
            is_grouped: true,
        }
    }

    /// Set the contribution kind (builder pattern).
    #[must_use]
    pub fn with_kind(mut self, kind: ContributionKind) -> Self {
        self.kind = kind;
        self
    }

    /// Mark this value as ungrouped (builder pattern).
    #[must_use]
    pub fn ungrouped(mut self) -> Self {
        self.is_grouped = false;
        self
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        Self::new(f64::from(value))
    }
}

/// Collection of named attribute values.
pub type Attributes = FxHashMap<AttributeKey, AttributeValue>;
