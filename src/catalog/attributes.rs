//! Attribute catalog: the dice-configuration collaborator seam.
//!
//! The engine never knows on its own whether "aim" is a d6 attribute or
//! a plain number - an `AttributeCatalog` supplied by the caller does.
//! `DiceMapper` wraps the catalog and validates its answers before any
//! enumeration loop is allowed to run.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::model::AttributeKey;

/// Inclusive die range for a dice-based attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieRange {
    /// Lowest face, always 1 for a physical die.
    pub min: u32,
    /// Highest face.
    pub max: u32,
}

impl DieRange {
    /// Create a 1..=max die range.
    #[must_use]
    pub const fn d(max: u32) -> Self {
        Self { min: 1, max }
    }

    /// A range is valid when it has at least one face and starts at 1 or
    /// above.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min >= 1 && self.max >= self.min
    }

    /// Number of distinct faces.
    #[must_use]
    pub fn faces(&self) -> u32 {
        self.max - self.min + 1
    }
}

/// Attribute configuration lookup supplied by the caller.
///
/// The engine treats answers as pure configuration: the same inputs must
/// give the same answers for the whole invocation.
pub trait AttributeCatalog {
    /// Is this attribute resolved by rolling a die?
    fn is_dice_based(&self, attribute: &AttributeKey) -> bool;

    /// The die range for a dice-based attribute, if configured.
    fn die_range_of(&self, attribute: &AttributeKey) -> Option<DieRange>;

    /// The integer roll modifier this attribute value grants.
    fn modifier_of(&self, attribute: &AttributeKey, value: f64) -> i64;
}

/// Per-attribute entry in a [`StaticAttributeCatalog`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeConfig {
    /// Die range, or `None` for a static attribute.
    pub die_range: Option<DieRange>,

    /// Value thresholds granting modifiers, as `(minimum value, modifier)`
    /// pairs sorted ascending by threshold. The highest threshold not
    /// exceeding the value wins; below all thresholds the modifier is 0.
    pub modifier_thresholds: Vec<(f64, i64)>,
}

/// Map-backed attribute catalog.
///
/// ## Example
///
/// ```
/// use contest_engine::catalog::{AttributeCatalog, StaticAttributeCatalog, DieRange};
///
/// let mut catalog = StaticAttributeCatalog::new();
/// catalog.register_dice("aim", DieRange::d(6), [(8.0, 1), (12.0, 2)]);
///
/// assert!(catalog.is_dice_based(&"aim".into()));
/// assert_eq!(catalog.modifier_of(&"aim".into(), 9.0), 1);
/// assert_eq!(catalog.modifier_of(&"aim".into(), 3.0), 0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct StaticAttributeCatalog {
    attributes: FxHashMap<AttributeKey, AttributeConfig>,
}

impl StaticAttributeCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dice-based attribute with its modifier thresholds.
    pub fn register_dice(
        &mut self,
        attribute: impl Into<AttributeKey>,
        die_range: DieRange,
        thresholds: impl IntoIterator<Item = (f64, i64)>,
    ) {
        let mut modifier_thresholds: Vec<_> = thresholds.into_iter().collect();
        modifier_thresholds.sort_by(|a, b| a.0.total_cmp(&b.0));
        self.attributes.insert(
            attribute.into(),
            AttributeConfig {
                die_range: Some(die_range),
                modifier_thresholds,
            },
        );
    }

    /// Register a static (non-dice) attribute.
    pub fn register_static(&mut self, attribute: impl Into<AttributeKey>) {
        self.attributes
            .insert(attribute.into(), AttributeConfig::default());
    }

    /// Register a dice-based attribute with an invalid (absent) range.
    ///
    /// Exists so callers mirroring a broken upstream catalog still get
    /// the configuration error instead of silent static fallback.
    pub fn register_misconfigured(&mut self, attribute: impl Into<AttributeKey>) {
        self.attributes.insert(
            attribute.into(),
            AttributeConfig {
                die_range: Some(DieRange { min: 1, max: 0 }),
                modifier_thresholds: Vec::new(),
            },
        );
    }

    /// Number of registered attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl AttributeCatalog for StaticAttributeCatalog {
    fn is_dice_based(&self, attribute: &AttributeKey) -> bool {
        self.attributes
            .get(attribute)
            .is_some_and(|config| config.die_range.is_some())
    }

    fn die_range_of(&self, attribute: &AttributeKey) -> Option<DieRange> {
        self.attributes
            .get(attribute)
            .and_then(|config| config.die_range)
    }

    fn modifier_of(&self, attribute: &AttributeKey, value: f64) -> i64 {
        let Some(config) = self.attributes.get(attribute) else {
            return 0;
        };
        config
            .modifier_thresholds
            .iter()
            .take_while(|(threshold, _)| value >= *threshold)
            .last()
            .map_or(0, |(_, modifier)| *modifier)
    }
}

/// Validation wrapper over an [`AttributeCatalog`].
///
/// Answers the one question the resolver asks - "does this side roll,
/// and within what range?" - and refuses to answer with a guessed range.
pub struct DiceMapper<'a> {
    catalog: &'a dyn AttributeCatalog,
}

impl<'a> DiceMapper<'a> {
    /// Create a mapper over a catalog.
    #[must_use]
    pub fn new(catalog: &'a dyn AttributeCatalog) -> Self {
        Self { catalog }
    }

    /// Is this attribute resolved by rolling a die?
    #[must_use]
    pub fn is_dice_based(&self, attribute: &AttributeKey) -> bool {
        self.catalog.is_dice_based(attribute)
    }

    /// The validated die range for an attribute.
    ///
    /// - `Ok(None)`: static attribute, no roll.
    /// - `Ok(Some(range))`: dice-based with a valid positive-sized range.
    /// - `Err(Configuration)`: marked dice-based but the range is missing
    ///   or empty.
    pub fn die_range(&self, attribute: &AttributeKey) -> Result<Option<DieRange>, EngineError> {
        if !self.catalog.is_dice_based(attribute) {
            return Ok(None);
        }
        match self.catalog.die_range_of(attribute) {
            Some(range) if range.is_valid() => Ok(Some(range)),
            _ => Err(EngineError::Configuration {
                attribute: attribute.to_string(),
            }),
        }
    }

    /// The roll modifier a value grants. 0 for static attributes.
    #[must_use]
    pub fn modifier(&self, attribute: &AttributeKey, value: f64) -> i64 {
        if self.catalog.is_dice_based(attribute) {
            self.catalog.modifier_of(attribute, value)
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> StaticAttributeCatalog {
        let mut catalog = StaticAttributeCatalog::new();
        catalog.register_dice("aim", DieRange::d(6), [(8.0, 1), (12.0, 2)]);
        catalog.register_static("strength");
        catalog.register_misconfigured("broken");
        catalog
    }

    #[test]
    fn test_die_range_validity() {
        assert!(DieRange::d(6).is_valid());
        assert!(DieRange::d(1).is_valid());
        assert!(!DieRange { min: 1, max: 0 }.is_valid());
        assert!(!DieRange { min: 0, max: 6 }.is_valid());
        assert_eq!(DieRange::d(6).faces(), 6);
    }

    #[test]
    fn test_modifier_thresholds() {
        let catalog = catalog();
        let aim = AttributeKey::new("aim");

        assert_eq!(catalog.modifier_of(&aim, 3.0), 0);
        assert_eq!(catalog.modifier_of(&aim, 8.0), 1);
        assert_eq!(catalog.modifier_of(&aim, 11.99), 1);
        assert_eq!(catalog.modifier_of(&aim, 12.0), 2);
    }

    #[test]
    fn test_unknown_attribute_is_static() {
        let catalog = catalog();
        let mapper = DiceMapper::new(&catalog);
        let key = AttributeKey::new("unknown");

        assert!(!mapper.is_dice_based(&key));
        assert_eq!(mapper.die_range(&key), Ok(None));
        assert_eq!(mapper.modifier(&key, 100.0), 0);
    }

    #[test]
    fn test_dice_based_range() {
        let catalog = catalog();
        let mapper = DiceMapper::new(&catalog);

        assert_eq!(
            mapper.die_range(&"aim".into()),
            Ok(Some(DieRange::d(6)))
        );
        assert_eq!(mapper.die_range(&"strength".into()), Ok(None));
    }

    #[test]
    fn test_misconfigured_range_is_an_error() {
        let catalog = catalog();
        let mapper = DiceMapper::new(&catalog);

        assert_eq!(
            mapper.die_range(&"broken".into()),
            Err(EngineError::Configuration {
                attribute: "broken".to_string()
            })
        );
    }

    #[test]
    fn test_static_attribute_has_zero_modifier() {
        let catalog = catalog();
        let mapper = DiceMapper::new(&catalog);

        assert_eq!(mapper.modifier(&"strength".into(), 50.0), 0);
        assert_eq!(mapper.modifier(&"aim".into(), 9.0), 1);
    }
}
