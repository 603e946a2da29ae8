//! IRC text helpers: bold markers, CTCP ACTION handling, and whitespace
//! normalization for single-line display.

/// mIRC-style bold toggle.
const BOLD: char = '\u{2}';
/// CTCP delimiter wrapping ACTION payloads.
const CTCP: char = '\u{1}';

const ACTION_PREFIX: &str = "\u{1}ACTION ";

/// Wrap `text` in bold markers.
pub fn bold(text: &str) -> String {
    format!("{BOLD}{text}{BOLD}")
}

/// If `text` is a CTCP ACTION ("* nick does something" lines on the wire),
/// return the inner payload.
pub fn unaction(text: &str) -> Option<&str> {
    text.strip_prefix(ACTION_PREFIX)
        .map(|rest| rest.strip_suffix(CTCP).unwrap_or(rest))
}

/// Wrap a payload back into an ACTION, for tests and harness transcripts.
pub fn action(text: &str) -> String {
    format!("{ACTION_PREFIX}{text}{CTCP}")
}

/// Replace literal newline, tab and carriage-return characters with their
/// visible escape spellings so the corrected text stays on one line.
/// Idempotent: the output contains none of the replaced characters.
pub fn axe_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}
