//! Unit tests for the `draw_pool_gen` crate.
//!
//! Included from `lib.rs` under `#[cfg(test)]`.
//!
//! | Group | What is tested |
//! |-------|----------------|
//! | Determinism | Same RNG seed → identical batches; entropy runs satisfy all invariants |
//! | Plan | Batch counts for multipliers 1-5, derived clamped at 1× |
//! | Structural | Every entry sorted, six distinct numbers in 1..=60 |
//! | Policy | Every generated entry balanced; seeds exempt |
//! | Uniqueness | No number set repeated across seed, derived and exploratory batches |
//! | Yield accounting | Cost follows actual yield; shortfalls reported |
//! | Config | JSON defaults, zero multiplier rejected |
//! | Round trip | Labeled listing parses back into the seeds |

use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::generation_engine::{
    generate_batch, generate_batch_with_rng, is_balanced, parse_seed_text, parse_seeds,
    render_listing, BatchPlan, Entry, ExhaustionCause, GenerationReport, GenerationRequest,
    ListingStyle, ParsePolicy, Provenance, RequestError, StructuralError,
};

// ── helpers ──────────────────────────────────────────────────────────────────

const SAMPLE: &str = "\
03 08 11 14 16 29 (Janine)
06 30 32 33 40 60 (Giselle)
02 19 27 35 44 58 (Marta)
05 12 23 37 41 56 (Rafa)";

/// Five seeds that span different RNG states.
const SEEDS: [u64; 5] = [1, 42, 999, 0xDEAD_BEEF, 7];

fn sample_seeds() -> Vec<Entry> {
    parse_seeds(SAMPLE).expect("sample seed text is valid")
}

fn run(seeds: &[Entry], multiplier: u32, rng_seed: u64) -> GenerationReport {
    generate_batch(seeds, &GenerationRequest::new(multiplier).with_seed(rng_seed))
        .expect("multiplier is positive")
}

fn assert_structurally_valid(e: &Entry) {
    let numbers = e.numbers();
    assert!(numbers.windows(2).all(|w| w[0] < w[1]), "{e} is not strictly ascending");
    assert!(numbers.iter().all(|n| (1..=60).contains(n)), "{e} has a number outside 1..=60");
}

// ── determinism ──────────────────────────────────────────────────────────────

#[test]
fn same_seed_produces_identical_batches() {
    let seeds = sample_seeds();
    for rng_seed in SEEDS {
        let a = run(&seeds, 4, rng_seed);
        let b = run(&seeds, 4, rng_seed);
        assert_eq!(
            render_listing(&a, ListingStyle::Plain),
            render_listing(&b, ListingStyle::Plain),
            "listing differs for rng_seed={rng_seed}"
        );
        assert_eq!(a.warnings, b.warnings);
    }
}

#[test]
fn caller_rng_matches_seeded_request() {
    let seeds = sample_seeds();
    let request = GenerationRequest::new(3).with_seed(77);
    let a = generate_batch(&seeds, &request).unwrap();
    let mut rng = StdRng::seed_from_u64(77);
    let b = generate_batch_with_rng(&mut rng, &seeds, &request).unwrap();
    assert_eq!(a.derived, b.derived);
    assert_eq!(a.exploratory, b.exploratory);
}

#[test]
fn entropy_run_satisfies_invariants() {
    // Smoke test: rng_seed: None must not panic and must keep every invariant.
    let seeds = sample_seeds();
    let report = generate_batch(&seeds, &GenerationRequest::new(5)).unwrap();
    let mut seen = HashSet::new();
    for e in report.entries() {
        assert_structurally_valid(e);
        assert!(seen.insert(e.number_set()), "{e} appears twice");
    }
    assert_eq!(report.cost(), report.yielded() as u64 * report.unit_price);
}

// ── plan ─────────────────────────────────────────────────────────────────────

#[test]
fn plan_for_two_seeds_at_double() {
    let plan = BatchPlan::for_seeds(2, 2);
    assert_eq!(plan, BatchPlan { total: 4, seeds: 2, derived: 1, exploratory: 1 });
}

#[test]
fn plan_counts_follow_the_batch_formula() {
    for seeds in 1..=12usize {
        for multiplier in 1..=5u32 {
            let plan = BatchPlan::for_seeds(seeds, multiplier);
            let total = seeds * multiplier as usize;
            let three_quarters = total * 3 / 4;
            assert_eq!(plan.total, total);
            assert_eq!(
                plan.derived,
                three_quarters.saturating_sub(seeds),
                "derived for seeds={seeds} multiplier={multiplier}"
            );
            // Exploratory uses the unclamped derived count.
            assert_eq!(
                plan.exploratory as i64,
                total as i64 - seeds as i64 - (three_quarters as i64 - seeds as i64),
                "exploratory for seeds={seeds} multiplier={multiplier}"
            );
            if multiplier > 1 {
                assert_eq!(plan.requested(), plan.total);
            }
        }
    }
}

#[test]
fn single_multiplier_still_asks_for_exploratory_entries() {
    assert_eq!(
        BatchPlan::for_seeds(2, 1),
        BatchPlan { total: 2, seeds: 2, derived: 0, exploratory: 1 }
    );
    assert_eq!(
        BatchPlan::for_seeds(4, 1),
        BatchPlan { total: 4, seeds: 4, derived: 0, exploratory: 1 }
    );

    let report = run(&sample_seeds(), 1, 1);
    assert_eq!(report.seeds.len(), 4);
    assert!(report.derived.is_empty());
    assert!(report.exploratory.len() <= 1);
    assert_eq!(report.yielded(), 4 + report.exploratory.len());
    assert_eq!(report.cost(), report.yielded() as u64 * report.unit_price);
}

// ── documented example ───────────────────────────────────────────────────────

#[test]
fn two_seeds_at_double_yield_at_most_four_entries() {
    let seeds = parse_seeds("03 08 11 14 16 29 (A)\n06 30 32 33 40 60 (B)").unwrap();
    for rng_seed in SEEDS {
        let report = run(&seeds, 2, rng_seed);
        assert_eq!(report.plan.total, 4);
        assert_eq!(report.seeds.len(), 2);
        assert!(report.derived.len() <= 1);
        assert!(report.exploratory.len() <= 1);

        let unique: HashSet<_> = report.entries().map(Entry::number_set).collect();
        assert_eq!(unique.len(), report.yielded(), "duplicate entry for rng_seed={rng_seed}");
        for e in report.derived.iter().chain(&report.exploratory) {
            assert!(is_balanced(e), "{e} breaks the distribution policy");
        }
    }
}

// ── structural & policy invariants ───────────────────────────────────────────

#[test]
fn every_entry_is_structurally_valid() {
    let seeds = sample_seeds();
    for rng_seed in SEEDS {
        for e in run(&seeds, 5, rng_seed).entries() {
            assert_structurally_valid(e);
        }
    }
}

#[test]
fn every_generated_entry_is_balanced() {
    let seeds = sample_seeds();
    for rng_seed in SEEDS {
        let report = run(&seeds, 5, rng_seed);
        for e in report.derived.iter().chain(&report.exploratory) {
            let p = e.profile();
            assert!((2..=4).contains(&p.low), "{e}: low={}", p.low);
            assert!((2..=4).contains(&p.high), "{e}: high={}", p.high);
            assert!(p.decades.iter().all(|&c| c <= 3), "{e}: decades={:?}", p.decades);
            assert!(p.terminals.iter().all(|&c| c <= 2), "{e}: terminals={:?}", p.terminals);
        }
    }
}

#[test]
fn unbalanced_seeds_are_passed_through() {
    let seeds = parse_seeds("07 14 21 24 26 33 (Lowish)\n06 30 32 33 40 60 (B)").unwrap();
    let report = run(&seeds, 3, 42);
    assert_eq!(report.seeds.len(), 2);
    assert!(!is_balanced(&report.seeds[0]));
}

#[test]
fn batches_are_tagged_with_provenance() {
    let report = run(&sample_seeds(), 4, 999);
    assert!(report.seeds.iter().all(|e| e.provenance() == Provenance::Seed));
    assert!(report.derived.iter().all(|e| e.provenance() == Provenance::Derived));
    assert!(report.exploratory.iter().all(|e| e.provenance() == Provenance::Exploratory));
}

// ── uniqueness ───────────────────────────────────────────────────────────────

#[test]
fn no_number_set_repeats_within_a_run() {
    let seeds = sample_seeds();
    for multiplier in 1..=5 {
        for rng_seed in SEEDS {
            let report = run(&seeds, multiplier, rng_seed);
            let mut seen = HashSet::new();
            for e in report.entries() {
                assert!(
                    seen.insert(e.number_set()),
                    "{e} repeated (multiplier={multiplier} rng_seed={rng_seed})"
                );
            }
        }
    }
}

#[test]
fn duplicate_seeds_count_once() {
    let text = "03 08 11 14 16 29 (A)\n29 16 14 11 08 03 (B)\n06 30 32 33 40 60 (C)";
    let seeds = parse_seeds(text).unwrap();
    assert_eq!(seeds.len(), 3);
    let report = run(&seeds, 2, 1);
    assert_eq!(report.seeds.len(), 2);
    assert_eq!(report.seeds[0].label(), "A");
    assert_eq!(report.plan.total, 4, "plan follows the distinct seeds");
    assert_eq!(report.absorbed_seeds, 1);

    let clean = run(&sample_seeds(), 2, 1);
    assert_eq!(clean.absorbed_seeds, 0);
}

// ── yield accounting ─────────────────────────────────────────────────────────

#[test]
fn full_yield_bills_requested_total() {
    let report = run(&sample_seeds(), 3, 42);
    assert!(!report.is_partial(), "warnings: {:?}", report.warnings);
    assert_eq!(report.yielded(), report.plan.total);
    assert_eq!(report.cost(), 12 * 5);
}

#[test]
fn partial_yield_bills_actual_entries() {
    // One seed owns the only combination its six numbers allow, so the
    // derived strategy can never add anything.
    let seeds = parse_seeds("03 14 25 36 47 59 (Solo)").unwrap();
    let request = GenerationRequest::new(5)
        .with_seed(42)
        .with_unit_price(7)
        .with_retry_budget(100);
    let report = generate_batch(&seeds, &request).unwrap();

    assert_eq!(report.plan, BatchPlan { total: 5, seeds: 1, derived: 2, exploratory: 2 });
    assert!(report.derived.is_empty());
    let derived_warning = report
        .warnings
        .iter()
        .find(|w| w.provenance == Provenance::Derived)
        .expect("derived shortfall must be reported");
    assert_eq!(derived_warning.requested, 2);
    assert_eq!(derived_warning.produced, 0);
    assert_eq!(derived_warning.cause, ExhaustionCause::RetryBudget { attempts: 100 });

    assert!(report.yielded() < report.plan.total);
    assert_eq!(report.cost(), report.yielded() as u64 * 7);
    assert_ne!(report.cost(), report.plan.total as u64 * 7);
}

#[test]
fn empty_seed_list_yields_empty_report() {
    let report = run(&[], 3, 1);
    assert_eq!(report.plan.total, 0);
    assert_eq!(report.yielded(), 0);
    assert_eq!(report.cost(), 0);
    assert!(!report.is_partial());
}

// ── config ───────────────────────────────────────────────────────────────────

#[test]
fn zero_multiplier_is_rejected() {
    let err = generate_batch(&sample_seeds(), &GenerationRequest::new(0)).unwrap_err();
    assert!(matches!(err, RequestError::ZeroMultiplier));
}

#[test]
fn json_request_fills_defaults() {
    let request = GenerationRequest::from_json(r#"{ "multiplier": 4, "rng_seed": 9 }"#).unwrap();
    assert_eq!(request.multiplier, 4);
    assert_eq!(request.rng_seed, Some(9));
    assert_eq!(request.unit_price, 5);
    assert_eq!(request.retry_budget, 1000);
}

#[test]
fn json_request_rejects_bad_input() {
    assert!(matches!(
        GenerationRequest::from_json(r#"{ "multiplier": "two" }"#),
        Err(RequestError::InvalidConfig { .. })
    ));
    assert!(matches!(
        GenerationRequest::from_json(r#"{ "multiplier": 0 }"#),
        Err(RequestError::ZeroMultiplier)
    ));
}

#[test]
fn request_errors_serialize_with_a_kind_tag() {
    let err = GenerationRequest::from_json("{ not json").unwrap_err();
    let value = serde_json::to_value(&err).unwrap();
    assert_eq!(value["kind"], "invalid_config");
    assert!(value["message"].as_str().is_some_and(|m| !m.is_empty()));

    let value = serde_json::to_value(RequestError::ZeroMultiplier).unwrap();
    assert_eq!(value["kind"], "zero_multiplier");
}

// ── parsing & round trip ─────────────────────────────────────────────────────

#[test]
fn malformed_seed_line_fails_fast() {
    let text = format!("{SAMPLE}\n01 02 03 04 05 (Five)");
    let err = parse_seeds(&text).unwrap_err();
    assert_eq!(err.source, StructuralError::WrongCount { found: 5 });
    assert!(err.to_string().contains("01 02 03 04 05 (Five)"));

    let lenient = parse_seed_text(&text, ParsePolicy::SkipInvalid).unwrap();
    assert_eq!(lenient.entries.len(), 4);
    assert_eq!(lenient.rejected.len(), 1);
}

#[test]
fn labeled_listing_parses_back_into_seeds() {
    let seeds = sample_seeds();
    let report = run(&seeds, 3, 1);
    let listing = render_listing(&report, ListingStyle::Labeled);
    let reparsed = parse_seeds(&listing).unwrap();
    assert_eq!(reparsed, seeds);
    let labels: Vec<&str> = reparsed.iter().map(Entry::label).collect();
    assert_eq!(labels, ["Janine", "Giselle", "Marta", "Rafa"]);
}

#[test]
fn entry_round_trips_through_json() {
    let entry = sample_seeds().remove(0);
    let json = serde_json::to_string(&entry).unwrap();
    let back: Entry = serde_json::from_str(&json).unwrap();
    assert_eq!(back, entry);
    assert_eq!(back.label(), "Janine");

    let bad = r#"{ "numbers": [1, 2, 3], "label": "", "provenance": "Seed" }"#;
    assert!(serde_json::from_str::<Entry>(bad).is_err());
}
