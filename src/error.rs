//! Error types for draw extraction.
//!
//! [`ExtractionError`] is fatal for an invocation: the input could not be read
//! as a sequence of rounds at all. [`RecordValidationWarning`] describes one
//! skipped round and never aborts the pass.

use std::fmt;

use thiserror::Error;

/// The raw document could not be interpreted as a sequence of draw rounds.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("input is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("expected an array of rounds or an object with a `rounds` array, found {found}")]
    UnexpectedShape { found: &'static str },

    #[error("input object has no `rounds` field")]
    MissingRounds,

    #[error("`rounds` field must be an array, found {found}")]
    RoundsNotArray { found: &'static str },
}

/// Why a single record was left out of every trend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotAnObject,
    MissingField(&'static str),
    InvalidField { field: &'static str, value: String },
    DuplicateRound(u32),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotAnObject => write!(f, "entry is not an object"),
            SkipReason::MissingField(field) => write!(f, "missing required field `{field}`"),
            SkipReason::InvalidField { field, value } => {
                write!(f, "field `{field}` has unparsable value {value}")
            }
            SkipReason::DuplicateRound(round) => {
                write!(f, "round {round} already seen earlier in the input")
            }
        }
    }
}

/// A non-fatal diagnostic for one skipped input record.
///
/// `record` is the 1-based position of the entry in the input sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record #{record}{}: {reason}", .round.map(|r| format!(" (round {r})")).unwrap_or_default())]
pub struct RecordValidationWarning {
    pub record: usize,
    pub round: Option<u32>,
    pub reason: SkipReason,
}

/// Short JSON type name used in error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
