//! Core generation engine: entries, distribution policy, uniqueness, and the
//! three batch strategies.
//!
//! ## Module overview
//!
//! | Module       | Purpose |
//! |--------------|---------|
//! | `models`     | Shared types: `NumberSet`, `Entry`, request/plan/report structs |
//! | `errors`     | `StructuralError`, `DistributionError`, `ParseError`, `RequestError` |
//! | `validator`  | Low/high, decade and terminal-digit rules over an entry |
//! | `registry`   | Per-run set of accepted number sets |
//! | `pool`       | Candidate-number multisets with partial Fisher-Yates sampling |
//! | `helpers`    | Bounded rejection-sampling loop shared by the strategies |
//! | `strategies` | Seed passthrough, derived and exploratory generators |
//! | `generator`  | Single entry point `generate_batch()` — runs the strategies in order |
//! | `parser`     | Seed text → `Entry` list |
//! | `export`     | Text listing and JSON summary of a report |

pub mod errors;
pub mod export;
pub mod generator;
pub mod helpers;
pub mod models;
pub mod parser;
pub mod pool;
pub mod registry;
pub mod strategies;
pub mod validator;

// Re-export the public API surface so callers can use
// `generation_engine::generate_batch` without reaching into sub-modules.
pub use errors::{DistributionError, DistributionReason, ParseError, RequestError, StructuralError};
pub use export::{render_listing, to_summary_json, ListingStyle, DEFAULT_LISTING_FILE_NAME};
pub use generator::{generate_batch, generate_batch_with_rng};
pub use models::{
    BatchPlan, ClassCounts, DistributionProfile, Entry, ExhaustionCause, GenerationReport,
    GenerationRequest, NumberSet, PartialYield, Provenance,
};
pub use parser::{parse_line, parse_seed_text, parse_seeds, ParseOutcome, ParsePolicy};
pub use registry::UniquenessRegistry;
pub use validator::{is_balanced, validate_distribution};
