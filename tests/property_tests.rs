//! Property-based tests for histsed
//!
//! This module uses proptest to verify core invariants of expression
//! parsing, the delimiter-escaping scan, and output normalization.

use histsed::format::axe_spaces;
use histsed::{
    CorrectionResult, DefaultHost, HistoryMessage, MessageKind, ReplacerConfig, correct,
    parse_expression,
};

use proptest::prelude::*;

// ============================================================================
// Property 1: Parsing is total and deterministic
// ============================================================================

proptest! {
    /// The parser never panics on printable input and always lands in one
    /// of its three declared outcomes.
    #[test]
    fn prop_parse_never_panics(raw in "[ -~]{0,60}") {
        let _ = parse_expression(&raw);
    }

    /// Parsing the same expression twice produces the same spec.
    #[test]
    fn prop_parse_is_deterministic(
        pattern in "[a-z]{1,10}",
        replacement in "[a-z]{0,10}",
    ) {
        let raw = format!("s/{pattern}/{replacement}/g");
        let a = parse_expression(&raw).unwrap().unwrap();
        let b = parse_expression(&raw).unwrap().unwrap();
        prop_assert_eq!(a.pattern.as_str(), b.pattern.as_str());
        prop_assert_eq!(a.replacement, b.replacement);
        prop_assert_eq!(a.count, b.count);
        prop_assert_eq!(a.flags, b.flags);
    }

    /// Plain conversational text (no delimiter-capable characters) is never
    /// mistaken for a sed command and never reported as an error.
    #[test]
    fn prop_plain_text_is_silent(raw in "[a-zA-Z0-9 ]{2,60}") {
        prop_assert!(parse_expression(&raw).unwrap().is_none());
    }
}

// ============================================================================
// Property 2: Delimiter handling
// ============================================================================

proptest! {
    /// Any non-alphanumeric, non-whitespace ASCII delimiter splits the same
    /// pattern and replacement.
    #[test]
    fn prop_delimiter_generality(
        delim in proptest::sample::select(vec!['/', '#', ',', '|', '!', '%', '^', '&', ';', '@', '~', '.']),
        pattern in "[a-z]{1,8}",
        replacement in "[a-z]{0,8}",
    ) {
        let raw = format!("s{delim}{pattern}{delim}{replacement}{delim}");
        let spec = parse_expression(&raw).unwrap().unwrap();
        prop_assert_eq!(spec.pattern.as_str(), pattern);
        prop_assert_eq!(spec.replacement, replacement);
        prop_assert_eq!(spec.count, 1);
    }

    /// An escaped delimiter inside the pattern round-trips to the literal
    /// delimiter character.
    #[test]
    fn prop_escaped_delimiter_round_trips(
        left in "[a-z]{1,6}",
        right in "[a-z]{1,6}",
    ) {
        let raw = format!(r"s/{left}\/{right}/x/");
        let spec = parse_expression(&raw).unwrap().unwrap();
        let joined = format!("{left}/{right}");
        prop_assert_eq!(spec.pattern.as_str(), joined.clone());
        prop_assert!(spec.pattern.is_match(&joined));
    }

    /// The NUL sentinel can never collide with user input.
    #[test]
    fn prop_nul_always_rejected(
        prefix in "[ -~]{0,20}",
        suffix in "[ -~]{0,20}",
    ) {
        let raw = format!("{prefix}\0{suffix}");
        let err = parse_expression(&raw).unwrap_err();
        prop_assert_eq!(err.category(), "InvalidInput");
    }
}

// ============================================================================
// Property 3: Flags
// ============================================================================

proptest! {
    /// `g` selects replace-all, its absence exactly one.
    #[test]
    fn prop_global_flag_count(pattern in "[a-z]{1,8}") {
        let all = parse_expression(&format!("s/{pattern}/x/g")).unwrap().unwrap();
        let one = parse_expression(&format!("s/{pattern}/x/")).unwrap().unwrap();
        prop_assert_eq!(all.count, 0);
        prop_assert_eq!(one.count, 1);
    }

    /// `i` makes matching case-insensitive for any lowercase pattern.
    #[test]
    fn prop_case_insensitive_flag(pattern in "[a-z]{1,8}") {
        let spec = parse_expression(&format!("s/{pattern}/x/i")).unwrap().unwrap();
        prop_assert!(spec.pattern.is_match(&pattern.to_uppercase()));
    }
}

// ============================================================================
// Property 4: Search and normalization
// ============================================================================

proptest! {
    /// Normalization is idempotent: a second pass changes nothing.
    #[test]
    fn prop_axe_spaces_idempotent(raw in "[a-z\n\t\r ]{0,60}") {
        let once = axe_spaces(&raw);
        prop_assert_eq!(axe_spaces(&once), once.clone());
        prop_assert!(!once.contains(['\n', '\t', '\r']));
    }

    /// With a history of identical matching messages, the reported
    /// correction always comes from the most recent one, and exhaustion
    /// reports exactly the number of candidates examined.
    #[test]
    fn prop_search_scans_all_on_miss(n in 1usize..20) {
        let history: Vec<HistoryMessage> = (0..n)
            .map(|i| HistoryMessage::new(MessageKind::Privmsg, "#chan", "bob", &format!("line {i}")))
            .collect();
        let trigger = HistoryMessage::new(MessageKind::Privmsg, "#chan", "bob", "s/zzz/x/");
        let spec = parse_expression("s/zzz/x/").unwrap().unwrap();
        let result = correct(
            &spec,
            &trigger,
            history.iter(),
            &DefaultHost,
            &ReplacerConfig::default(),
        )
        .unwrap();
        prop_assert_eq!(result, CorrectionResult::NotFound { scanned: n });
    }
}
