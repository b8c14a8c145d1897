//! Action chain integration tests.
//!
//! Trigger chains end to end: probability multiplication across links,
//! cycle and length-cap termination, per-link overrides, and selection
//! reuse.

use contest_engine::{
    ActionChainResolver, ActionDefinition, ActionId, ChainTermination, DieRange, Entity,
    EntityId, EntityIndex, StaticActionCatalog, StaticAttributeCatalog, TestOverrides,
    MAX_CHAIN_LINKS,
};

fn attributes() -> StaticAttributeCatalog {
    let mut catalog = StaticAttributeCatalog::new();
    catalog.register_static("strength");
    catalog.register_static("dodge");
    catalog.register_dice("lockpick", DieRange::d(10), []);
    catalog
}

fn index() -> EntityIndex {
    let mut index = EntityIndex::default();
    index.insert(
        EntityId::new(1),
        Entity::new(EntityId::new(1), "Rogue")
            .with_attribute("strength", 10.0)
            .with_attribute("lockpick", 5.0),
    );
    index.insert(
        EntityId::new(2),
        Entity::new(EntityId::new(2), "Guard")
            .with_attribute("dodge", 8.0)
            .with_attribute("strength", 6.0),
    );
    index
}

fn pick(id: u32) -> ActionDefinition {
    ActionDefinition::new(ActionId::new(id), format!("Pick {id}"), "lockpick", "dodge")
}

// =============================================================================
// Probability Multiplication
// =============================================================================

/// Reference scenario: links at 80% and 50% combine to 40%.
#[test]
fn test_chain_success_multiplies() {
    let attributes = attributes();
    let mut actions = StaticActionCatalog::new();
    actions.register(pick(2));

    let resolver = ActionChainResolver::new(&attributes, &actions);
    let initial = pick(1).triggering(ActionId::new(2));

    // d10 vs a static 2: totals 3..=10 win, 80%.
    // d10 vs a static 5: totals 6..=10 win, 50%.
    let chain = resolver
        .resolve_chain(
            &initial,
            &index(),
            &[EntityId::new(1)],
            &[EntityId::new(2)],
            &[
                TestOverrides::none().with_target(2.0),
                TestOverrides::none().with_target(5.0),
            ],
        )
        .unwrap();

    assert_eq!(chain.links.len(), 2);
    assert_eq!(chain.links[0].result.success_percentage, 80.0);
    assert_eq!(chain.links[1].result.success_percentage, 50.0);
    assert_eq!(chain.success_percentage, 40.0);
    assert_eq!(chain.termination, ChainTermination::Completed);
}

/// A single deterministic link reports its own percentage unchanged.
#[test]
fn test_single_link_chain() {
    let attributes = attributes();
    let actions = StaticActionCatalog::new();
    let resolver = ActionChainResolver::new(&attributes, &actions);

    let strike = ActionDefinition::new(ActionId::new(1), "Strike", "strength", "dodge");
    let chain = resolver
        .resolve_chain(
            &strike,
            &index(),
            &[EntityId::new(1)],
            &[EntityId::new(2)],
            &[],
        )
        .unwrap();

    assert_eq!(chain.links.len(), 1);
    assert_eq!(chain.success_percentage, 100.0);
}

// =============================================================================
// Termination Guards
// =============================================================================

/// Revisiting an action earlier in the chain stops it, without error.
#[test]
fn test_cycle_termination() {
    let attributes = attributes();
    let mut actions = StaticActionCatalog::new();
    actions.register(pick(2).triggering(ActionId::new(1)));

    let resolver = ActionChainResolver::new(&attributes, &actions);
    let initial = pick(1).triggering(ActionId::new(2));

    let chain = resolver
        .resolve_chain(
            &initial,
            &index(),
            &[EntityId::new(1)],
            &[EntityId::new(2)],
            &[],
        )
        .unwrap();

    assert_eq!(chain.links.len(), 2);
    assert_eq!(chain.termination, ChainTermination::CycleDetected);
}

/// An endless trigger ladder stops at the hard cap of ten links.
#[test]
fn test_length_cap_termination() {
    let attributes = attributes();
    let mut actions = StaticActionCatalog::new();
    for id in 2..=40 {
        actions.register(pick(id).triggering(ActionId::new(id + 1)));
    }

    let resolver = ActionChainResolver::new(&attributes, &actions);
    let initial = pick(1).triggering(ActionId::new(2));

    let chain = resolver
        .resolve_chain(
            &initial,
            &index(),
            &[EntityId::new(1)],
            &[EntityId::new(2)],
            &[],
        )
        .unwrap();

    assert_eq!(chain.links.len(), MAX_CHAIN_LINKS);
    assert_eq!(chain.termination, ChainTermination::LengthCapped);

    // No action id appears twice.
    let mut seen = std::collections::HashSet::new();
    for link in &chain.links {
        assert!(seen.insert(link.action.id));
    }
}

/// A trigger whose action the catalog cannot supply ends the chain
/// normally - the lookup failure is not an error.
#[test]
fn test_unresolvable_trigger_completes() {
    let attributes = attributes();
    let actions = StaticActionCatalog::new();

    let resolver = ActionChainResolver::new(&attributes, &actions);
    let initial = pick(1).triggering(ActionId::new(42));

    let chain = resolver
        .resolve_chain(
            &initial,
            &index(),
            &[EntityId::new(1)],
            &[EntityId::new(2)],
            &[],
        )
        .unwrap();

    assert_eq!(chain.links.len(), 1);
    assert_eq!(chain.termination, ChainTermination::Completed);
}

// =============================================================================
// Selection Reuse and Overrides
// =============================================================================

/// Every link carries the initiating selections verbatim.
#[test]
fn test_selection_reuse_across_links() {
    let attributes = attributes();
    let mut actions = StaticActionCatalog::new();
    actions.register(pick(2).triggering(ActionId::new(3)));
    actions.register(pick(3));

    let resolver = ActionChainResolver::new(&attributes, &actions);
    let initial = pick(1).triggering(ActionId::new(2));

    let chain = resolver
        .resolve_chain(
            &initial,
            &index(),
            &[EntityId::new(1)],
            &[EntityId::new(2)],
            &[],
        )
        .unwrap();

    assert_eq!(chain.links.len(), 3);
    for link in &chain.links {
        assert_eq!(link.source_ids.as_slice(), &[EntityId::new(1)]);
        assert_eq!(link.target_ids.as_slice(), &[EntityId::new(2)]);
    }
}

/// Links beyond the override list resolve without overrides.
#[test]
fn test_overrides_are_per_link() {
    let attributes = attributes();
    let mut actions = StaticActionCatalog::new();
    actions.register(pick(2));

    let resolver = ActionChainResolver::new(&attributes, &actions);
    let initial = pick(1).triggering(ActionId::new(2));

    let chain = resolver
        .resolve_chain(
            &initial,
            &index(),
            &[EntityId::new(1)],
            &[EntityId::new(2)],
            &[TestOverrides::none().with_target(2.0)],
        )
        .unwrap();

    // Link 1 sees the override (target 2.0), link 2 aggregates the
    // guard's own dodge of 8.0.
    assert_eq!(chain.links[0].result.target_value, 2.0);
    assert_eq!(chain.links[0].result.target_count, 0);
    assert_eq!(chain.links[1].result.target_value, 8.0);
    assert_eq!(chain.links[1].result.target_count, 1);
}
