//! Error types for expression parsing and history correction.
//!
//! "Not a sed expression" is deliberately *not* an error: the parser returns
//! `Ok(None)` for text that simply doesn't look like a substitution command,
//! so callers can tell a broken command apart from ordinary chatter.

use std::time::Duration;
use thiserror::Error;

/// Failures that abort an invocation.
#[derive(Debug, Error)]
pub enum ReplacerError {
    /// The raw expression is unusable before any matching happens
    /// (contains a NUL byte, or is too short to carry a delimiter).
    #[error("invalid expression: {0}")]
    InvalidInput(&'static str),

    /// The user-supplied pattern failed to compile.
    #[error("regex syntax error: {0}")]
    RegexSyntax(#[from] regex::Error),

    /// Matching or substitution exceeded the configured wall-clock budget.
    #[error("regex processing exceeded the {}ms budget", .0.as_millis())]
    Timeout(Duration),
}

impl ReplacerError {
    /// Stable category name, used for host-facing `(category, message)`
    /// error display.
    pub fn category(&self) -> &'static str {
        match self {
            ReplacerError::InvalidInput(_) => "InvalidInput",
            ReplacerError::RegexSyntax(_) => "RegexSyntaxError",
            ReplacerError::Timeout(_) => "TimeoutError",
        }
    }
}
