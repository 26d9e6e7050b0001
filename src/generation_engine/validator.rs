//! Distribution policy applied to generated entries.
//!
//! A pure predicate: it never mutates the entry and keeps no state, so
//! re-validating an accepted entry always accepts it again.

use crate::generation_engine::{
    errors::{DistributionError, DistributionReason},
    models::{DistributionProfile, Entry, NumberSet},
};

/// Allowed count of low (1-30) and of high (31-60) numbers.
pub const LOW_HIGH_RANGE: std::ops::RangeInclusive<u8> = 2..=4;
/// Most numbers allowed in one decade bucket.
pub const MAX_PER_DECADE: u8 = 3;
/// Most numbers allowed to share a terminal digit.
pub const MAX_PER_TERMINAL: u8 = 2;

/// Accept `entry` or report the first rule it breaks.
///
/// Rules are checked in order: low/high balance, decade clustering,
/// terminal-digit clustering.
pub fn validate_distribution(entry: &Entry) -> Result<(), DistributionError> {
    validate_set(entry.number_set())
}

/// Same check over a bare number set.
pub fn validate_set(set: NumberSet) -> Result<(), DistributionError> {
    check_profile(&DistributionProfile::of(set)).map_err(|reason| DistributionError { reason })
}

/// True if `entry` satisfies every distribution rule.
pub fn is_balanced(entry: &Entry) -> bool {
    validate_distribution(entry).is_ok()
}

fn check_profile(profile: &DistributionProfile) -> Result<(), DistributionReason> {
    if !LOW_HIGH_RANGE.contains(&profile.low) || !LOW_HIGH_RANGE.contains(&profile.high) {
        return Err(DistributionReason::LowHighImbalance {
            low: profile.low,
            high: profile.high,
        });
    }

    let (bucket, count) = profile.max_decade();
    if count > MAX_PER_DECADE {
        return Err(DistributionReason::DecadeCluster { bucket, count });
    }

    let (digit, count) = profile.max_terminal();
    if count > MAX_PER_TERMINAL {
        return Err(DistributionReason::TerminalCluster { digit, count });
    }

    Ok(())
}
