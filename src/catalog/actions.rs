//! Action catalog: definition lookup for chain resolution.
//!
//! A triggered action is only an ID until the catalog resolves it. The
//! chain resolver treats a failed lookup as a normal chain stop, never
//! an error - retry policy for a remote catalog belongs to the caller.

use rustc_hash::FxHashMap;

use crate::model::{ActionDefinition, ActionId};

/// Action definition lookup supplied by the caller.
pub trait ActionCatalog {
    /// Get an action definition by ID.
    fn get(&self, id: ActionId) -> Option<&ActionDefinition>;
}

/// Map-backed action catalog.
///
/// ## Example
///
/// ```
/// use contest_engine::catalog::{ActionCatalog, StaticActionCatalog};
/// use contest_engine::model::{ActionDefinition, ActionId};
///
/// let mut catalog = StaticActionCatalog::new();
/// catalog.register(ActionDefinition::new(ActionId::new(1), "Strike", "strength", "dodge"));
///
/// let found = catalog.get(ActionId::new(1)).unwrap();
/// assert_eq!(found.name, "Strike");
/// ```
#[derive(Clone, Debug, Default)]
pub struct StaticActionCatalog {
    actions: FxHashMap<ActionId, ActionDefinition>,
    next_id: u32,
}

impl StaticActionCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action definition.
    ///
    /// Panics if an action with the same ID already exists.
    pub fn register(&mut self, action: ActionDefinition) {
        if self.actions.contains_key(&action.id) {
            panic!("Action with ID {} already registered", action.id);
        }
        if action.id.raw() >= self.next_id {
            self.next_id = action.id.raw() + 1;
        }
        self.actions.insert(action.id, action);
    }

    /// Register an action under the next free ID, returning the ID.
    pub fn register_auto(
        &mut self,
        name: impl Into<String>,
        source_attribute: &str,
        target_attribute: &str,
    ) -> ActionId {
        let id = ActionId::new(self.next_id);
        self.next_id += 1;
        self.register(ActionDefinition::new(
            id,
            name,
            source_attribute,
            target_attribute,
        ));
        id
    }

    /// Check if an action ID is registered.
    #[must_use]
    pub fn contains(&self, id: ActionId) -> bool {
        self.actions.contains_key(&id)
    }

    /// Number of registered actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Iterate over all action definitions.
    pub fn iter(&self) -> impl Iterator<Item = &ActionDefinition> {
        self.actions.values()
    }
}

impl ActionCatalog for StaticActionCatalog {
    fn get(&self, id: ActionId) -> Option<&ActionDefinition> {
        self.actions.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let mut catalog = StaticActionCatalog::new();
        catalog.register(ActionDefinition::new(
            ActionId::new(1),
            "Strike",
            "strength",
            "dodge",
        ));

        assert!(catalog.get(ActionId::new(1)).is_some());
        assert!(catalog.get(ActionId::new(99)).is_none());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_register_auto() {
        let mut catalog = StaticActionCatalog::new();

        let id1 = catalog.register_auto("Strike", "strength", "dodge");
        let id2 = catalog.register_auto("Shove", "strength", "balance");

        assert_eq!(id1, ActionId::new(0));
        assert_eq!(id2, ActionId::new(1));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_id_panics() {
        let mut catalog = StaticActionCatalog::new();
        catalog.register(ActionDefinition::new(
            ActionId::new(1),
            "Strike",
            "strength",
            "dodge",
        ));
        catalog.register(ActionDefinition::new(
            ActionId::new(1),
            "Shove",
            "strength",
            "balance",
        ));
    }

    #[test]
    fn test_iteration() {
        let mut catalog = StaticActionCatalog::new();
        catalog.register_auto("Strike", "strength", "dodge");
        catalog.register_auto("Shove", "strength", "balance");

        let names: Vec<_> = catalog.iter().map(|a| a.name.clone()).collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"Strike".to_string()));
        assert!(names.contains(&"Shove".to_string()));
    }
}
