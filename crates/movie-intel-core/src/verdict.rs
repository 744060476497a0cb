//! Verdict parsing for the validation gate.
//!
//! Fail-closed: anything that is not an explicit pass is a fail, so
//! unvalidated content is never presented as trustworthy.

use serde::{Deserialize, Serialize};

/// Outcome of the validation gate for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictOutcome {
    /// Validator explicitly passed the answer.
    Pass,
    /// Validator rejected the answer, or its output was ambiguous.
    Fail,
    /// No question was asked, so no validation took place.
    None,
}

/// The line prefix the validator is instructed to emit.
const RESULT_MARKER: &str = "TEST RESULT";

/// Parse validator output into a pass/fail verdict.
///
/// A `TEST RESULT:` line, when present, is authoritative; a stray `PASS`
/// token inside the reasoning of a FAIL cannot flip the outcome. Without
/// such a line, a standalone `PASS` token anywhere passes. Empty,
/// malformed, or unrelated output fails.
pub fn parse_verdict(text: &str) -> VerdictOutcome {
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed
            .to_ascii_uppercase()
            .starts_with(RESULT_MARKER)
        {
            let rest = &trimmed[RESULT_MARKER.len()..];
            return if contains_token(rest, "PASS") {
                VerdictOutcome::Pass
            } else {
                VerdictOutcome::Fail
            };
        }
    }

    if contains_token(text, "PASS") {
        VerdictOutcome::Pass
    } else {
        VerdictOutcome::Fail
    }
}

/// Whether `text` contains `token` as a standalone word (not as part of a
/// longer alphanumeric run, so "PASSED" does not count).
fn contains_token(text: &str, token: &str) -> bool {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .any(|word| word == token)
}
