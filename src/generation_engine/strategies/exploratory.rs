use rand::Rng;

use crate::generation_engine::{
    helpers::{sample_until, Draw, StrategyBatch},
    models::{Entry, ExhaustionCause, Provenance, ENTRY_SIZE},
    pool::NumberPool,
    registry::UniquenessRegistry,
};

/// Mix a base of one or two seed numbers with numbers that appear in no
/// seed, until `requested` new, balanced entries are registered.
///
/// Stops as soon as either pool is too small for the draw at hand.
pub fn generate<R: Rng>(
    rng: &mut R,
    seeds: &[Entry],
    requested: usize,
    retry_budget: u32,
    registry: &mut UniquenessRegistry,
) -> StrategyBatch {
    let base_pool = NumberPool::from_seeds(seeds);
    let novel_pool = NumberPool::novel(seeds);

    sample_until(rng, Provenance::Exploratory, requested, retry_budget, registry, |rng| {
        let base_size = rng.gen_range(1..=2usize);
        let Some(mut numbers) = base_pool.sample(rng, base_size) else {
            return Draw::Exhausted(ExhaustionCause::PoolTooSmall {
                needed: base_size,
                available: base_pool.len(),
            });
        };
        let novel_size = ENTRY_SIZE - base_size;
        let Some(novel) = novel_pool.sample(rng, novel_size) else {
            return Draw::Exhausted(ExhaustionCause::PoolTooSmall {
                needed: novel_size,
                available: novel_pool.len(),
            });
        };
        numbers.extend(novel);
        Draw::Candidate(numbers)
    })
}
