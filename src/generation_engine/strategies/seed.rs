use tracing::debug;

use crate::generation_engine::{
    models::{Entry, Provenance},
    registry::UniquenessRegistry,
};

/// Register every seed and pass it through in input order, tagged `Seed`.
///
/// Seeds are trusted: the distribution policy is not applied. When two seeds
/// share a number set the first one wins and later copies are left out, so
/// the run stays free of repeated entries.
pub fn generate(seeds: &[Entry], registry: &mut UniquenessRegistry) -> Vec<Entry> {
    let mut accepted = Vec::with_capacity(seeds.len());
    for seed in seeds {
        if registry.register(seed) {
            accepted.push(seed.clone().with_provenance(Provenance::Seed));
        } else {
            debug!(entry = %seed, label = seed.label(), "duplicate seed absorbed");
        }
    }
    accepted
}
