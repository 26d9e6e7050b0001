//! Shared rejection-sampling loop used by the derived and exploratory
//! strategies.
//!
//! Each strategy only supplies a `draw` closure that proposes six numbers.
//! The loop builds the entry, runs the distribution check, claims the
//! identity in the registry, and stops on target, on pool exhaustion, or
//! after `retry_budget` consecutive rejections.

use rand::Rng;
use tracing::{debug, trace, warn};

use crate::generation_engine::{
    errors::DistributionReason,
    models::{Entry, ExhaustionCause, PartialYield, Provenance},
    registry::UniquenessRegistry,
    validator::validate_distribution,
};

/// One proposal from a strategy's draw closure.
pub enum Draw {
    Candidate(Vec<u8>),
    Exhausted(ExhaustionCause),
}

/// Output of one sampling strategy.
#[derive(Debug, Clone, Default)]
pub struct StrategyBatch {
    pub entries: Vec<Entry>,
    /// Set when fewer than the requested entries were produced.
    pub shortfall: Option<PartialYield>,
}

/// Why a single candidate was turned away.
#[derive(Debug, Clone, Copy)]
enum Rejection {
    /// Drawn values collided (possible when the pool holds repeats).
    Structural,
    Distribution(DistributionReason),
    AlreadySeen,
}

#[derive(Debug, Default)]
struct RejectionTally {
    structural: u32,
    distribution: u32,
    already_seen: u32,
}

impl RejectionTally {
    fn record(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::Structural      => self.structural += 1,
            Rejection::Distribution(_) => self.distribution += 1,
            Rejection::AlreadySeen     => self.already_seen += 1,
        }
    }
}

/// Build, validate and register one candidate.
fn accept(
    numbers: &[u8],
    provenance: Provenance,
    registry: &mut UniquenessRegistry,
) -> Result<Entry, Rejection> {
    let entry = Entry::generated(numbers, provenance).map_err(|_| Rejection::Structural)?;
    validate_distribution(&entry).map_err(|e| Rejection::Distribution(e.reason))?;
    if !registry.register(&entry) {
        return Err(Rejection::AlreadySeen);
    }
    Ok(entry)
}

/// Run `draw` until `requested` entries are accepted or the strategy gives up.
pub fn sample_until<R, F>(
    rng: &mut R,
    provenance: Provenance,
    requested: usize,
    retry_budget: u32,
    registry: &mut UniquenessRegistry,
    mut draw: F,
) -> StrategyBatch
where
    R: Rng,
    F: FnMut(&mut R) -> Draw,
{
    let mut entries = Vec::with_capacity(requested);
    let mut tally = RejectionTally::default();
    let mut misses = 0u32;
    let mut stopped: Option<ExhaustionCause> = None;

    while entries.len() < requested {
        if misses >= retry_budget {
            stopped = Some(ExhaustionCause::RetryBudget { attempts: misses });
            break;
        }
        let numbers = match draw(rng) {
            Draw::Candidate(numbers) => numbers,
            Draw::Exhausted(cause) => {
                stopped = Some(cause);
                break;
            }
        };
        match accept(&numbers, provenance, registry) {
            Ok(entry) => {
                trace!(%provenance, entry = %entry, "accepted");
                entries.push(entry);
                misses = 0;
            }
            Err(rejection) => {
                if let Rejection::Distribution(reason) = rejection {
                    trace!(%provenance, code = reason.code(), "rejected");
                }
                tally.record(rejection);
                misses += 1;
            }
        }
    }

    debug!(
        %provenance,
        requested,
        produced = entries.len(),
        structural = tally.structural,
        distribution = tally.distribution,
        already_seen = tally.already_seen,
        "strategy finished"
    );

    let shortfall = stopped.map(|cause| PartialYield {
        provenance,
        requested,
        produced: entries.len(),
        cause,
    });
    if let Some(partial) = &shortfall {
        warn!(%partial, "partial yield");
    }

    StrategyBatch { entries, shortfall }
}
