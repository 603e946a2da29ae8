//! histsed: sed-style history correction.
//!
//! Given a `s/pattern/replacement/flags` command, search backwards through a
//! bounded log of recent chat messages, find the most recent one that
//! matches, apply the substitution, and build a "X meant to say: ..." reply.
//! The host application owns the transport, the history buffer, ignore
//! lists, and per-channel configuration; this crate is a pure function of
//! what it is handed per invocation.

pub mod bounded;
pub mod config;
pub mod error;
pub mod expression;
pub mod format;
pub mod history;
pub mod replacer;

// Re-export commonly used types for convenience
pub use config::ReplacerConfig;
pub use error::ReplacerError;
pub use expression::{SubstitutionSpec, parse_expression};
pub use history::{HistoryMessage, MessageKind, REPLACER_TAG, is_valid_nick};
pub use replacer::{CorrectionResult, DefaultHost, Host, HostAction, correct, invoke};
