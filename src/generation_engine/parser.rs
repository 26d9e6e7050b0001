//! Seed text parsing.
//!
//! Expected line shape: `03 08 11 14 16 29 (Janine)`. Lines that do not look
//! like numbers followed by a parenthesised label are skipped. Lines that do
//! look like one but hold a bad number list raise a [`ParseError`] naming
//! the line, or are collected as rejected under [`ParsePolicy::SkipInvalid`].

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::generation_engine::{
    errors::{ParseError, StructuralError},
    models::Entry,
};

/// What to do with a candidate line that fails structural validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParsePolicy {
    /// Stop at the first invalid line and return it as an error.
    #[default]
    FailFast,
    /// Keep going; invalid lines are reported in [`ParseOutcome::rejected`].
    SkipInvalid,
}

/// Result of parsing a whole seed text.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    /// Valid seeds in input order.
    pub entries: Vec<Entry>,
    /// Invalid candidate lines (always empty under `FailFast`).
    pub rejected: Vec<ParseError>,
}

fn candidate_line() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*([0-9]+(?:\s+[0-9]+)*)\s*\(([^)]*)\)")
            .expect("candidate-line pattern is valid")
    })
}

/// Parse one line. `None` means the line is not a seed line at all.
pub fn parse_line(line: &str) -> Option<Result<Entry, StructuralError>> {
    let caps = candidate_line().captures(line)?;
    let numbers: Result<Vec<u32>, StructuralError> = caps[1]
        .split_whitespace()
        .map(|token| {
            token.parse::<u32>().map_err(|_| StructuralError::InvalidToken {
                token: token.to_string(),
            })
        })
        .collect();
    Some(numbers.and_then(|numbers| Entry::new(numbers, &caps[2])))
}

/// Parse every seed line in `text` under `policy`.
pub fn parse_seed_text(text: &str, policy: ParsePolicy) -> Result<ParseOutcome, ParseError> {
    let mut outcome = ParseOutcome::default();

    for (idx, line) in text.lines().enumerate() {
        let Some(parsed) = parse_line(line) else {
            continue;
        };
        match parsed {
            Ok(entry) => outcome.entries.push(entry),
            Err(source) => {
                let err = ParseError {
                    line_number: idx + 1,
                    line: line.trim().to_string(),
                    source,
                };
                match policy {
                    ParsePolicy::FailFast => return Err(err),
                    ParsePolicy::SkipInvalid => {
                        warn!(
                            line_number = err.line_number,
                            error = %err.source,
                            "skipping invalid seed line"
                        );
                        outcome.rejected.push(err);
                    }
                }
            }
        }
    }

    Ok(outcome)
}

/// Parse with [`ParsePolicy::FailFast`] and return just the entries.
pub fn parse_seeds(text: &str) -> Result<Vec<Entry>, ParseError> {
    parse_seed_text(text, ParsePolicy::FailFast).map(|outcome| outcome.entries)
}
