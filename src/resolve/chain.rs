//! Walking chains of actions that trigger further actions.
//!
//! A chain starts at one action and follows `triggered_action` links as
//! long as the effect type asks for it. Two guards bound the walk: a
//! visited-ID set (a revisited action stops the chain) and a hard cap of
//! ten links. Both stops are ordinary terminations, not errors, and are
//! reported as typed variants rather than logged side effects.
//!
//! Every link reuses the initiating selections, so accumulated state on
//! the participating entities stays consistent across the whole chain.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use rustc_hash::FxHashSet;

use crate::catalog::{ActionCatalog, AttributeCatalog};
use crate::error::EngineError;
use crate::grouping::policy::round2;
use crate::model::{select, ActionDefinition, EntityId, EntityIndex};

use super::outcome::TestOverrides;
use super::resolver::ActionResolver;
use super::ActionTestResult;

/// Hard cap on chain length.
pub const MAX_CHAIN_LINKS: usize = 10;

/// Why a chain stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChainTermination {
    /// The last action triggered nothing further (or its triggered
    /// action was not resolvable via the catalog).
    Completed,
    /// The next action was already resolved earlier in this chain.
    CycleDetected,
    /// The chain reached [`MAX_CHAIN_LINKS`] with a trigger still
    /// pending.
    LengthCapped,
}

/// One resolved link of a chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionChainLink {
    /// The action this link resolved.
    pub action: ActionDefinition,

    /// The link's test outcome.
    pub result: ActionTestResult,

    /// Source selection, identical for every link of the chain.
    pub source_ids: SmallVec<[EntityId; 4]>,

    /// Target selection, identical for every link of the chain.
    pub target_ids: SmallVec<[EntityId; 4]>,
}

/// A fully resolved action chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionChain {
    /// The resolved links, in trigger order.
    pub links: Vec<ActionChainLink>,

    /// Why the chain stopped.
    pub termination: ChainTermination,

    /// Product of every link's success share, as a percentage.
    pub success_percentage: f64,
}

/// Resolves trigger chains against the attribute and action catalogs.
pub struct ActionChainResolver<'a> {
    resolver: ActionResolver<'a>,
    actions: &'a dyn ActionCatalog,
}

impl<'a> ActionChainResolver<'a> {
    /// Create a chain resolver over both catalogs.
    #[must_use]
    pub fn new(attributes: &'a dyn AttributeCatalog, actions: &'a dyn ActionCatalog) -> Self {
        Self {
            resolver: ActionResolver::new(attributes),
            actions,
        }
    }

    /// Resolve a chain starting at `initial`.
    ///
    /// `link_overrides` is indexed by link position; links beyond its
    /// length carry no overrides. Selections resolve against `entities`
    /// once and are reused verbatim for every link.
    ///
    /// # Errors
    ///
    /// Propagates [`EngineError`] from any link's resolution. Cycle and
    /// length-cap stops are not errors.
    pub fn resolve_chain(
        &self,
        initial: &ActionDefinition,
        entities: &EntityIndex,
        source_ids: &[EntityId],
        target_ids: &[EntityId],
        link_overrides: &[TestOverrides],
    ) -> Result<ActionChain, EngineError> {
        let source = select(entities, source_ids);
        let target = select(entities, target_ids);

        let mut visited: FxHashSet<_> = FxHashSet::default();
        visited.insert(initial.id);

        let mut links = Vec::new();
        let mut current = initial.clone();
        let termination = loop {
            let overrides = link_overrides
                .get(links.len())
                .copied()
                .unwrap_or_default();
            let result = self.resolver.resolve(&current, &source, &target, &overrides)?;
            links.push(ActionChainLink {
                action: current.clone(),
                result,
                source_ids: SmallVec::from_slice(source_ids),
                target_ids: SmallVec::from_slice(target_ids),
            });

            let Some(next_id) = current.next_in_chain() else {
                break ChainTermination::Completed;
            };
            if visited.contains(&next_id) {
                tracing::debug!(action = %next_id, "chain revisited an action, stopping");
                break ChainTermination::CycleDetected;
            }
            if links.len() >= MAX_CHAIN_LINKS {
                tracing::debug!(links = links.len(), "chain length cap reached");
                break ChainTermination::LengthCapped;
            }
            let Some(next) = self.actions.get(next_id) else {
                tracing::debug!(action = %next_id, "triggered action not in catalog, stopping");
                break ChainTermination::Completed;
            };
            visited.insert(next_id);
            current = next.clone();
        };

        let success_share = links
            .iter()
            .map(|link| link.result.success_percentage / 100.0)
            .product::<f64>();

        Ok(ActionChain {
            links,
            termination,
            success_percentage: round2(success_share * 100.0),
        })
    }
}
