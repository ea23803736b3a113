//! Generic structural and content checks.
//!
//! These run on the normalized, segmented text before any scenario-specific
//! rule. Failing any of them flags the reply for manual review; none of them
//! is an error condition.

use crate::rules::RuleTables;

/// Counts the non-empty lines of `text` after trimming.
pub fn count_lines(text: &str) -> usize {
    text.trim()
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .count()
}

/// Returns true iff the trimmed text starts with one of the approved
/// greeting tokens. Case-sensitive prefix match, no fuzzy matching.
pub fn has_allowed_opening(text: &str, rules: &RuleTables) -> bool {
    let trimmed = text.trim();
    rules
        .approved_openings
        .iter()
        .any(|opening| trimmed.starts_with(opening))
}

/// Returns true iff the text contains any forbidden closing or reassurance
/// phrase as a substring. Not word-boundary aware, by the same compatibility
/// rule as the normalizer.
pub fn contains_forbidden(text: &str, rules: &RuleTables) -> bool {
    rules.forbidden_phrases().any(|phrase| text.contains(phrase))
}
