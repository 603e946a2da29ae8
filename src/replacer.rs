//! History correction: walk the message log backwards, find the most recent
//! eligible message the pattern matches, and substitute.

use std::time::Duration;

use crate::bounded;
use crate::config::ReplacerConfig;
use crate::error::ReplacerError;
use crate::expression::{SubstitutionSpec, parse_expression};
use crate::format::{axe_spaces, bold, unaction};
use crate::history::{HistoryMessage, MessageKind, REPLACER_TAG, is_valid_nick};

/// Capabilities the host injects per invocation. Everything has a sensible
/// standalone default so tests and the harness can run without a real
/// network stack behind them.
pub trait Host {
    /// Is the sender with this `nick!user@host` prefix on the ignore list?
    fn is_ignored(&self, prefix: &str) -> bool {
        let _ = prefix;
        false
    }

    /// Syntax-only nick validation.
    fn is_valid_nick(&self, nick: &str) -> bool {
        is_valid_nick(nick)
    }

    /// Was this message produced by a previous correction?
    fn already_replaced(&self, msg: &HistoryMessage) -> bool {
        msg.tagged(REPLACER_TAG)
    }
}

/// A host with no ignore list and default predicates.
#[derive(Debug, Default)]
pub struct DefaultHost;

impl Host for DefaultHost {}

/// Outcome of a correction search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrectionResult {
    /// Formatted reply, ready to send back to the channel.
    Reply(String),
    /// No eligible message matched; `scanned` counts the candidates on
    /// which a match was actually attempted.
    NotFound { scanned: usize },
    /// The requested target nick is syntactically invalid; say nothing.
    Dropped,
}

/// Search `history` for the most recent message the spec applies to and
/// build the corrected reply.
///
/// `history` must be reverse-chronological and must start at the message
/// immediately preceding `trigger`; the first eligible match wins and older
/// messages are never evaluated past it. A timeout or substitution error
/// aborts the whole search.
pub fn correct<'a, I, H>(
    spec: &SubstitutionSpec,
    trigger: &HistoryMessage,
    history: I,
    host: &H,
    config: &ReplacerConfig,
) -> Result<CorrectionResult, ReplacerError>
where
    I: IntoIterator<Item = &'a HistoryMessage>,
    H: Host + ?Sized,
{
    // The `s` flag forces self-correction mode, overriding any nick prefix.
    let target: Option<&str> = if spec.has_flag('s') {
        Some(trigger.nick.as_str())
    } else {
        spec.target_nick.as_deref()
    };
    if let Some(nick) = target {
        if !host.is_valid_nick(nick) {
            return Ok(CorrectionResult::Dropped);
        }
    }

    let budget = config.process_timeout();
    let mut scanned = 0usize;

    for msg in history {
        if !matches!(msg.kind, MessageKind::Privmsg | MessageKind::Notice) {
            continue;
        }
        if msg.target != trigger.target || msg.connection != trigger.connection {
            continue;
        }
        if let Some(nick) = target {
            if msg.nick != nick {
                continue;
            }
        }
        // Ignored senders are skipped unless the correction names its
        // target explicitly.
        if target.is_none() && host.is_ignored(&msg.prefix) {
            continue;
        }
        if config.ignore_replaced && host.already_replaced(msg) {
            continue;
        }

        // Substitutions run against the payload of an action, without the
        // "* nick" part.
        let (text, is_action) = match unaction(&msg.text) {
            Some(inner) if msg.kind == MessageKind::Privmsg => (inner, true),
            _ => (msg.text.as_str(), false),
        };

        scanned += 1;
        if !bounded::is_match_within(&spec.pattern, text, budget)? {
            continue;
        }

        return Ok(CorrectionResult::Reply(build_reply(
            spec, trigger, msg, text, is_action, config, budget,
        )?));
    }

    tracing::debug!(
        expression = %spec.pattern.as_str(),
        scanned,
        target = %trigger.target,
        "no matching message found"
    );
    Ok(CorrectionResult::NotFound { scanned })
}

fn build_reply(
    spec: &SubstitutionSpec,
    trigger: &HistoryMessage,
    matched: &HistoryMessage,
    text: &str,
    is_action: bool,
    config: &ReplacerConfig,
    budget: Option<Duration>,
) -> Result<String, ReplacerError> {
    let replacement = if config.bold_replacement_text {
        bold(&spec.replacement)
    } else {
        spec.replacement.clone()
    };

    let mut subst = bounded::replacen_within(&spec.pattern, text, spec.count, &replacement, budget)?;
    if is_action {
        subst = format!("* {} {}", matched.nick, subst);
    }
    let subst = axe_spaces(&subst);

    let who = if matched.nick == trigger.nick {
        trigger.nick.clone()
    } else {
        format!("{} thinks {}", trigger.nick, matched.nick)
    };
    Ok(format!("{who} meant to say: {subst}"))
}

/// What the host should do with the outcome of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostAction {
    /// Send this reply to the channel (and tag the outgoing message with
    /// [`REPLACER_TAG`]).
    Reply(String),
    /// Show this error to the requesting user.
    ErrorNotice(String),
    /// Show this informational notice to the requesting user.
    InfoNotice(String),
    /// Do nothing.
    Silent,
}

/// One full invocation: parse the trigger text, run the search, and fold
/// errors and the not-found case into host-facing actions.
///
/// Errors are always logged; they reach the user only when
/// `display_errors` is set. Text that is not a sed command is silent.
pub fn invoke<'a, I, H>(
    trigger: &HistoryMessage,
    history: I,
    host: &H,
    config: &ReplacerConfig,
) -> HostAction
where
    I: IntoIterator<Item = &'a HistoryMessage>,
    H: Host + ?Sized,
{
    if !config.enabled {
        return HostAction::Silent;
    }

    let spec = match parse_expression(&trigger.text) {
        Ok(Some(spec)) => spec,
        Ok(None) => return HostAction::Silent,
        Err(err) => return error_action(err, config),
    };

    match correct(&spec, trigger, history, host, config) {
        Ok(CorrectionResult::Reply(reply)) => HostAction::Reply(reply),
        Ok(CorrectionResult::Dropped) => HostAction::Silent,
        Ok(CorrectionResult::NotFound { scanned }) => {
            if config.display_errors {
                HostAction::InfoNotice(format!(
                    "Search not found in the last {scanned} eligible messages."
                ))
            } else {
                HostAction::Silent
            }
        }
        Err(err) => error_action(err, config),
    }
}

fn error_action(err: ReplacerError, config: &ReplacerConfig) -> HostAction {
    tracing::warn!(category = err.category(), error = %err, "replacer error");
    if config.display_errors {
        HostAction::ErrorNotice(format!("{}: {}", err.category(), err))
    } else {
        HostAction::Silent
    }
}
