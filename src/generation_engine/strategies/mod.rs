//! The three batch strategies, one per provenance class.
//!
//! The sampling strategies share one signature:
//!
//! ```ignore
//! pub fn generate<R: Rng>(
//!     rng: &mut R,
//!     seeds: &[Entry],
//!     requested: usize,
//!     retry_budget: u32,
//!     registry: &mut UniquenessRegistry,
//! ) -> StrategyBatch
//! ```
//!
//! The orchestrator in `generator.rs` runs them in order: seed, derived,
//! exploratory, all against the same registry.

/// Seed passthrough.
pub mod seed;
/// Combinations drawn only from seed numbers.
pub mod derived;
/// One or two seed numbers plus numbers no seed uses.
pub mod exploratory;
