use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::info;

use crate::generation_engine::{
    errors::RequestError,
    models::{BatchPlan, Entry, GenerationReport, GenerationRequest},
    registry::UniquenessRegistry,
    strategies,
};

/// Run one generation: seeds, then derived, then exploratory entries, all
/// unique across the run.
///
/// The RNG is seeded from `request.rng_seed` when present, otherwise from
/// entropy.
pub fn generate_batch(
    seeds: &[Entry],
    request: &GenerationRequest,
) -> Result<GenerationReport, RequestError> {
    let mut rng: StdRng = match request.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };
    generate_batch_with_rng(&mut rng, seeds, request)
}

/// Same as [`generate_batch`] but draws from the caller's RNG.
/// `request.rng_seed` is ignored.
pub fn generate_batch_with_rng<R: Rng>(
    rng: &mut R,
    seeds: &[Entry],
    request: &GenerationRequest,
) -> Result<GenerationReport, RequestError> {
    request.validate()?;

    // Fresh per run; never shared.
    let mut registry = UniquenessRegistry::new();

    let seed_batch = strategies::seed::generate(seeds, &mut registry);
    let seed_batch_len = seed_batch.len();
    let plan = BatchPlan::for_seeds(seed_batch_len, request.multiplier);

    let derived = strategies::derived::generate(
        rng, &seed_batch, plan.derived, request.retry_budget, &mut registry,
    );
    let exploratory = strategies::exploratory::generate(
        rng, &seed_batch, plan.exploratory, request.retry_budget, &mut registry,
    );

    let warnings = derived
        .shortfall
        .into_iter()
        .chain(exploratory.shortfall)
        .collect();

    let report = GenerationReport {
        plan,
        seeds: seed_batch,
        derived: derived.entries,
        exploratory: exploratory.entries,
        warnings,
        absorbed_seeds: seeds.len() - seed_batch_len,
        unit_price: request.unit_price,
    };

    info!(
        requested = plan.total,
        yielded = report.yielded(),
        seeds = report.seeds.len(),
        derived = report.derived.len(),
        exploratory = report.exploratory.len(),
        cost = report.cost(),
        partial = report.is_partial(),
        absorbed_seeds = report.absorbed_seeds,
        "generation finished"
    );

    Ok(report)
}
