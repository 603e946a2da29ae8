//! Message log types shared with the host.
//!
//! The host owns the history buffer; this crate only reads it. A message
//! carries just enough metadata for the eligibility filters: what kind of
//! line it was, where it went, who sent it, which connection saw it, and a
//! free-form tag set.

use std::collections::BTreeSet;

/// Tag the host writes onto correction output so later invocations can skip
/// replies produced by this crate (see `ReplacerConfig::ignore_replaced`).
pub const REPLACER_TAG: &str = "replacer";

/// Kind of a logged line. Only `Privmsg` and `Notice` are ever corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Privmsg,
    Notice,
    /// Joins, parts, mode changes and other protocol noise.
    Other,
}

/// One entry of the host's bounded, reverse-chronological message log.
#[derive(Debug, Clone)]
pub struct HistoryMessage {
    pub kind: MessageKind,
    /// Channel or query target the line was addressed to.
    pub target: String,
    /// Sender nick.
    pub nick: String,
    /// Full sender prefix (`nick!user@host`), consumed by the ignore lookup.
    pub prefix: String,
    /// Raw message text. ACTION lines keep their CTCP wrapper.
    pub text: String,
    /// Opaque id of the connection this line arrived on. Guards against
    /// duplicate history in multi-network deployments.
    pub connection: u64,
    /// Per-message tag store, e.g. [`REPLACER_TAG`].
    pub tags: BTreeSet<String>,
}

impl HistoryMessage {
    pub fn new(kind: MessageKind, target: &str, nick: &str, text: &str) -> Self {
        Self {
            kind,
            target: target.to_string(),
            nick: nick.to_string(),
            prefix: format!("{nick}!{nick}@host"),
            text: text.to_string(),
            connection: 0,
            tags: BTreeSet::new(),
        }
    }

    pub fn tagged(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// Strict RFC 1459 nick syntax: a letter or special as the first character,
/// letters, digits, specials and `-` afterwards. Syntax only, no length
/// limit and no network lookup.
pub fn is_valid_nick(nick: &str) -> bool {
    const SPECIALS: &str = "[]\\`_^{|}";
    let mut chars = nick.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || SPECIALS.contains(c) => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || SPECIALS.contains(c) || c == '-')
}
