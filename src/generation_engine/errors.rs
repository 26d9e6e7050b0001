//! Typed error model for entry construction, distribution checks, parsing
//! and request validation.
//!
//! ```text
//! construction → StructuralError   (fatal for that entry)
//! acceptance   → DistributionError (rejection signal inside sampling loops)
//! parsing      → ParseError        (StructuralError + offending line)
//! request      → RequestError      (bad multiplier / undecodable config)
//! ```
//!
//! Under-yield is not an error: see [`PartialYield`](super::models::PartialYield).

use serde::Serialize;

/// An entry could not be built from the given numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructuralError {
    #[error("an entry must contain exactly 6 numbers (found {found})")]
    WrongCount { found: usize },

    #[error("number {value} is outside the range 1-60")]
    OutOfRange { value: u32 },

    #[error("number {value} appears more than once")]
    Duplicate { value: u8 },

    /// A seed-text token too long to be read as a number.
    #[error("`{token}` is not a number in the range 1-60")]
    InvalidToken { token: String },
}

/// Why a structurally valid entry failed the distribution policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum DistributionReason {
    /// Low (1-30) or high (31-60) count outside 2..=4.
    LowHighImbalance { low: u8, high: u8 },
    /// More than 3 numbers share a decade bucket (`n / 10`).
    DecadeCluster { bucket: u8, count: u8 },
    /// More than 2 numbers share a terminal digit (`n % 10`).
    TerminalCluster { digit: u8, count: u8 },
}

impl DistributionReason {
    /// Stable short code, suitable for logs and counters.
    pub fn code(self) -> &'static str {
        match self {
            DistributionReason::LowHighImbalance { .. } => "low_high",
            DistributionReason::DecadeCluster { .. }    => "decade",
            DistributionReason::TerminalCluster { .. }  => "terminal",
        }
    }
}

impl std::fmt::Display for DistributionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistributionReason::LowHighImbalance { low, high } => write!(
                f,
                "entry must hold 2-4 low and 2-4 high numbers (low={low}, high={high})"
            ),
            DistributionReason::DecadeCluster { bucket, count } => write!(
                f,
                "decade bucket {bucket} holds {count} numbers (max 3)"
            ),
            DistributionReason::TerminalCluster { digit, count } => write!(
                f,
                "terminal digit {digit} appears {count} times (max 2)"
            ),
        }
    }
}

/// Rejection signal from the distribution validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("distribution rule violated: {reason}")]
pub struct DistributionError {
    pub reason: DistributionReason,
}

/// A candidate seed line failed structural validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("invalid entry on line {line_number} `{line}`: {source}")]
pub struct ParseError {
    /// 1-based line number in the input text.
    pub line_number: usize,
    /// The offending line, trimmed.
    pub line: String,
    #[source]
    pub source: StructuralError,
}

/// A generation request that cannot be run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequestError {
    #[error("multiplier must be a positive integer")]
    ZeroMultiplier,

    #[error("invalid generation config: {message}")]
    InvalidConfig { message: String },
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        RequestError::InvalidConfig { message: err.to_string() }
    }
}
