//! Action test and chain resolution.
//!
//! ## Key Types
//!
//! - `ActionResolver`: one contest, static comparison or exhaustive
//!   dice enumeration, ties favoring the defender
//! - `ActionTestResult` / `TestOverrides` / `ValueRange`: test I/O
//! - `ActionChainResolver`: trigger chains with visited-set and
//!   length-cap guards, terminations as typed variants
//!
//! Resolution is deterministic: no sampling, no memoization, no shared
//! state between invocations.

pub mod chain;
pub mod outcome;
pub mod resolver;

pub use chain::{
    ActionChain, ActionChainLink, ActionChainResolver, ChainTermination, MAX_CHAIN_LINKS,
};
pub use outcome::{ActionTestResult, TestOverrides, ValueRange};
pub use resolver::ActionResolver;
