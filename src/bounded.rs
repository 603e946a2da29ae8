//! Wall-clock-bounded regex execution.
//!
//! User-supplied patterns run against user-supplied text, so every match and
//! substitution step carries an independent time budget. The step runs on a
//! detached worker thread and the caller waits with a deadline; on timeout
//! the step is treated as if it had never started and no partial result
//! escapes. The worker itself always terminates: the regex crate's engine is
//! linear-time, so a timed-out job finishes shortly after being abandoned.

use regex::Regex;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::error::ReplacerError;

fn run_within<T, F>(budget: Option<Duration>, job: F) -> Result<T, ReplacerError>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let Some(budget) = budget else {
        return Ok(job());
    };

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        // The receiver may be gone already if the budget elapsed.
        let _ = tx.send(job());
    });

    // Disconnection without a value can only mean the worker died, which a
    // regex step does not do; fold it into the timeout case.
    rx.recv_timeout(budget)
        .map_err(|_| ReplacerError::Timeout(budget))
}

/// Does `pattern` match anywhere in `text`, within `budget`?
pub fn is_match_within(
    pattern: &Regex,
    text: &str,
    budget: Option<Duration>,
) -> Result<bool, ReplacerError> {
    let pattern = pattern.clone();
    let text = text.to_owned();
    run_within(budget, move || pattern.is_match(&text))
}

/// Replace the first `limit` occurrences of `pattern` in `text` (all of
/// them when `limit` is 0), within `budget`.
pub fn replacen_within(
    pattern: &Regex,
    text: &str,
    limit: usize,
    replacement: &str,
    budget: Option<Duration>,
) -> Result<String, ReplacerError> {
    let pattern = pattern.clone();
    let text = text.to_owned();
    let replacement = replacement.to_owned();
    run_within(budget, move || {
        pattern.replacen(&text, limit, replacement.as_str()).into_owned()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_within_generous_budget() {
        let re = Regex::new("needle").unwrap();
        let budget = Some(Duration::from_secs(5));
        assert!(is_match_within(&re, "hay needle hay", budget).unwrap());
        assert!(!is_match_within(&re, "just hay", budget).unwrap());
    }

    #[test]
    fn test_unbounded_runs_inline() {
        let re = Regex::new("a+").unwrap();
        assert!(is_match_within(&re, "aaa", None).unwrap());
        assert_eq!(replacen_within(&re, "aaa bb aaa", 0, "x", None).unwrap(), "x bb x");
    }

    #[test]
    fn test_replacen_limit_semantics() {
        let re = Regex::new("o").unwrap();
        let budget = Some(Duration::from_secs(5));
        assert_eq!(replacen_within(&re, "foo boo", 1, "0", budget).unwrap(), "f0o boo");
        assert_eq!(replacen_within(&re, "foo boo", 0, "0", budget).unwrap(), "f00 b00");
    }

    #[test]
    fn test_exhausted_budget_reports_timeout() {
        // A budget far below thread spawn latency forces the deadline to
        // win regardless of how fast the engine is.
        let re = Regex::new("(a|ab)*c").unwrap();
        let haystack = "ab".repeat(1 << 20);
        let err = is_match_within(&re, &haystack, Some(Duration::from_nanos(1))).unwrap_err();
        assert_eq!(err.category(), "TimeoutError");

        let err =
            replacen_within(&re, &haystack, 0, "x", Some(Duration::from_nanos(1))).unwrap_err();
        assert_eq!(err.category(), "TimeoutError");
    }
}
