//! Sed expression parsing.
//!
//! Turns a raw `s/pattern/replacement/flags` command (any non-alphanumeric,
//! non-whitespace delimiter, optional `nick: ` prefix) into a compiled
//! [`SubstitutionSpec`]. Escaped delimiters inside the pattern or
//! replacement are neutralized with a NUL sentinel before the structural
//! match and restored afterwards, so `s/a\/b/c/` substitutes the literal
//! pattern `a/b`.

use fancy_regex::Regex as StructuralRegex;
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

use crate::error::ReplacerError;

/// Structural shape of a sed command. The delimiter is captured once and
/// matched again by backreference, so the pattern and replacement spans are
/// lazy runs up to the next occurrence of the same character.
static SED_EXPR: LazyLock<StructuralRegex> = LazyLock::new(|| {
    StructuralRegex::new(
        r"^(?:(?P<nick>.+?)[:,] )?s(?P<delim>[^\w\s])(?P<pattern>.*?)\k<delim>(?P<replacement>.*?)\k<delim>(?P<flags>[a-z]*)$",
    )
    .expect("structural sed pattern is valid")
});

/// Sentinel standing in for an escaped delimiter during the structural
/// match. Raw input containing NUL is rejected up front so the sentinel can
/// never collide with user text.
const SENTINEL: char = '\0';

/// A parsed, compiled substitution command. Immutable; built once per
/// invocation and discarded after use.
#[derive(Debug, Clone)]
pub struct SubstitutionSpec {
    /// Nick from the optional leading `nick: ` prefix. Restricts which
    /// sender's messages may be corrected.
    pub target_nick: Option<String>,
    /// Compiled search pattern; case-sensitivity follows the `i` flag.
    pub pattern: Regex,
    /// Replacement template in regex-crate syntax (`${N}` group references).
    pub replacement: String,
    /// Number of occurrences to replace; 0 means all.
    pub count: usize,
    /// Raw flag letters as written. `g` and `i` are interpreted here; `s`
    /// is interpreted by the corrector.
    pub flags: Vec<char>,
}

impl SubstitutionSpec {
    pub fn has_flag(&self, flag: char) -> bool {
        self.flags.contains(&flag)
    }
}

/// Parse a raw expression.
///
/// Returns `Ok(None)` when the text is simply not a sed command (the caller
/// should stay silent), `Err` when it is one but is broken.
pub fn parse_expression(raw: &str) -> Result<Option<SubstitutionSpec>, ReplacerError> {
    if raw.contains(SENTINEL) {
        return Err(ReplacerError::InvalidInput("expression may not contain NUL"));
    }

    let chars: Vec<char> = raw.chars().collect();
    if chars.len() < 2 {
        return Err(ReplacerError::InvalidInput(
            "expression too short to carry a delimiter",
        ));
    }

    // The escape scan keys off the character at index 1, the one following
    // the leading `s` in the prefix-less form. With a nick prefix this picks
    // an unrelated character; the structural pattern still finds the real
    // delimiter on its own. Inherited behavior, kept as-is.
    let delim = chars[1];

    // Neutralize escaped delimiters: each `\` + delimiter pair collapses to
    // one sentinel. Only a single preceding backslash is inspected, so a
    // double backslash before a delimiter also takes this branch (see the
    // quirk test below).
    let mut escaped = String::with_capacity(raw.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == delim && i > 0 && chars[i - 1] == '\\' {
            escaped.pop();
            escaped.push(SENTINEL);
            continue;
        }
        escaped.push(c);
    }

    // A backtracking-limit blowup in the structural engine means the text is
    // not something we can dispatch on; treat it like a non-match.
    let caps = match SED_EXPR.captures(&escaped) {
        Ok(Some(caps)) => caps,
        Ok(None) => return Ok(None),
        Err(err) => {
            tracing::debug!(error = %err, "structural match aborted");
            return Ok(None);
        }
    };

    let restore = |s: &str| s.replace(SENTINEL, &delim.to_string());
    let pattern = restore(caps.name("pattern").map(|m| m.as_str()).unwrap_or(""));
    let replacement = restore(caps.name("replacement").map(|m| m.as_str()).unwrap_or(""));
    let target_nick = caps.name("nick").map(|m| m.as_str().to_string());

    let flags: Vec<char> = caps
        .name("flags")
        .map(|m| m.as_str().chars().collect())
        .unwrap_or_default();
    let count = if flags.contains(&'g') { 0 } else { 1 };

    let pattern = RegexBuilder::new(&pattern)
        .case_insensitive(flags.contains(&'i'))
        .build()?;

    Ok(Some(SubstitutionSpec {
        target_nick,
        pattern,
        replacement: convert_backreferences(&replacement),
        count,
        flags,
    }))
}

/// Convert sed-style backreferences in a replacement template to the regex
/// crate's syntax: `\1` becomes `${1}` (braced, so a following literal digit
/// or letter can't extend the group name), `\&` becomes `${0}`, `\\`
/// collapses to a single backslash. Engine-native `$N` passes through.
fn convert_backreferences(replacement: &str) -> String {
    let mut out = String::with_capacity(replacement.len());
    let mut chars = replacement.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some(&d) if d.is_ascii_digit() => {
                chars.next();
                out.push_str("${");
                out.push(d);
                out.push('}');
            }
            Some('&') => {
                chars.next();
                out.push_str("${0}");
            }
            Some('\\') => {
                chars.next();
                out.push('\\');
            }
            _ => out.push(c),
        }
    }

    out
}
