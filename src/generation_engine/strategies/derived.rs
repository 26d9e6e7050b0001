use rand::Rng;

use crate::generation_engine::{
    helpers::{sample_until, Draw, StrategyBatch},
    models::{Entry, ExhaustionCause, Provenance, ENTRY_SIZE},
    pool::NumberPool,
    registry::UniquenessRegistry,
};

/// Draw six slots from the flattened seed numbers until `requested` new,
/// balanced entries are registered.
///
/// Numbers shared by several seeds are weighted by how often they appear.
pub fn generate<R: Rng>(
    rng: &mut R,
    seeds: &[Entry],
    requested: usize,
    retry_budget: u32,
    registry: &mut UniquenessRegistry,
) -> StrategyBatch {
    let pool = NumberPool::from_seeds(seeds);

    sample_until(rng, Provenance::Derived, requested, retry_budget, registry, |rng| {
        match pool.sample(rng, ENTRY_SIZE) {
            Some(numbers) => Draw::Candidate(numbers),
            None => Draw::Exhausted(ExhaustionCause::PoolTooSmall {
                needed: ENTRY_SIZE,
                available: pool.len(),
            }),
        }
    })
}
