//! # draw_pool_gen
//!
//! A constrained combination generator for six-of-sixty number draws.
//!
//! Given a handful of user-supplied seed entries, the library builds a larger
//! pool of new entries that are unique across the whole run and follow a
//! fixed distribution policy. Output falls into three provenance classes:
//! the seeds themselves, entries composed only of seed numbers, and
//! exploratory entries that mix one or two seed numbers with numbers no seed
//! uses.
//!
//! ## How it works
//!
//! 1. Parse seed text (`03 08 11 14 16 29 (Janine)`, one per line) with
//!    [`parse_seeds`].
//! 2. Build a [`GenerationRequest`] with a multiplier, optional RNG seed and
//!    unit price.
//! 3. Call [`generate_batch`] — the engine registers the seeds, then runs the
//!    derived and exploratory strategies against the same registry, each a
//!    bounded rejection-sampling loop.
//! 4. The returned [`GenerationReport`] holds the three batches, any
//!    [`PartialYield`] warnings, and the cost of what was actually produced.
//!
//! ## Distribution policy
//!
//! - 2 to 4 numbers in 1..=30 and 2 to 4 in 31..=60.
//! - At most 3 numbers per decade bucket (`n / 10`; 60 is its own bucket).
//! - At most 2 numbers per terminal digit (`n % 10`).
//!
//! Seeds are trusted and never checked against the policy.
//!
//! ## Quick start
//!
//! ```rust
//! use draw_pool_gen::{generate_batch, parse_seeds, render_listing, GenerationRequest, ListingStyle};
//!
//! let seeds = parse_seeds("03 08 11 14 16 29 (Janine)\n06 30 32 33 40 60 (Giselle)").unwrap();
//! let report = generate_batch(&seeds, &GenerationRequest::new(3).with_seed(42)).unwrap();
//!
//! for warning in &report.warnings {
//!     eprintln!("warning: {warning}");
//! }
//! println!("{}", render_listing(&report, ListingStyle::Plain));
//! println!("{} entries, cost {}", report.yielded(), report.cost());
//! ```

pub mod generation_engine;

// Convenience re-exports so callers can use `draw_pool_gen::generate_batch`
// directly without reaching into `generation_engine::`.
pub use generation_engine::{
    generate_batch, generate_batch_with_rng, is_balanced, parse_line, parse_seed_text,
    parse_seeds, render_listing, to_summary_json, validate_distribution, BatchPlan, ClassCounts,
    DistributionError, DistributionProfile, DistributionReason, Entry, ExhaustionCause,
    GenerationReport, GenerationRequest, ListingStyle, NumberSet, ParseError, ParseOutcome,
    ParsePolicy, PartialYield, Provenance, RequestError, StructuralError, UniquenessRegistry,
    DEFAULT_LISTING_FILE_NAME,
};

#[cfg(test)]
mod tests;
