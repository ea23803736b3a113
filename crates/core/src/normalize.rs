//! Anatomical vocabulary normalization.
//!
//! Rewrites every colloquial anatomical term from the rule tables to the
//! approved clinical term before any validation runs. Matching is plain
//! substring matching, not word-boundary aware: a synonym embedded inside a
//! longer word is still rewritten. Downstream literal-template comparisons
//! depend on this exact behaviour, so it must not be tightened.

use regex::Regex;

use crate::rules::RuleTables;
use crate::{CoreError, CoreResult};

/// Case-insensitive rewriter for the anatomical synonym table.
///
/// Compiles one pattern per synonym at construction time; [`normalize`] is
/// then allocation-only and safe to call concurrently.
///
/// [`normalize`]: Normalizer::normalize
#[derive(Debug, Clone)]
pub struct Normalizer {
    patterns: Vec<Regex>,
    replacement: &'static str,
}

impl Normalizer {
    /// Compiles the synonym patterns from the given rule tables.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::PatternCompile`] if a synonym cannot be compiled
    /// into a regex. With the compiled-in tables this cannot happen (every
    /// synonym is escaped before compilation), but the rule data is kept out
    /// of the type system so the failure path stays explicit.
    pub fn new(rules: &RuleTables) -> CoreResult<Self> {
        let patterns = rules
            .anatomy_synonyms
            .iter()
            .map(|synonym| {
                Regex::new(&format!("(?i){}", regex::escape(synonym))).map_err(|source| {
                    CoreError::PatternCompile {
                        pattern: (*synonym).to_string(),
                        source,
                    }
                })
            })
            .collect::<CoreResult<Vec<_>>>()?;

        Ok(Self {
            patterns,
            replacement: rules.canonical_anatomy_term,
        })
    }

    /// Replaces every occurrence of every synonym with the canonical term.
    ///
    /// Pure and total: any input string maps to an output string, and
    /// applying the function twice gives the same result as applying it once.
    pub fn normalize(&self, text: &str) -> String {
        let mut out = text.to_string();
        for pattern in &self.patterns {
            out = pattern.replace_all(&out, self.replacement).into_owned();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> Normalizer {
        Normalizer::new(&RuleTables::builtin()).expect("builtin patterns compile")
    }

    #[test]
    fn test_normalize_rewrites_synonym_to_canonical_term() {
        let out = normalizer().normalize("عندي ألم في طيزي من يومين");
        assert_eq!(out, "عندي ألم في أسفل الظهر من يومين");
    }

    #[test]
    fn test_normalize_rewrites_every_listed_synonym() {
        let n = normalizer();
        let rules = RuleTables::builtin();
        for synonym in rules.anatomy_synonyms {
            let out = n.normalize(synonym);
            assert!(
                !out.contains(synonym),
                "synonym {synonym} survived normalization: {out}"
            );
            assert!(out.contains(rules.canonical_anatomy_term));
        }
    }

    #[test]
    fn test_normalize_matches_inside_longer_words() {
        // Substring matching is deliberate: "المؤخرة" embeds "مؤخرة" and is
        // still rewritten. Do not "fix" this to word boundaries.
        let out = normalizer().normalize("الألم في المؤخرة");
        assert!(!out.contains("مؤخرة"));
        assert!(out.contains("أسفل الظهر"));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let n = normalizer();
        for input in ["", "طيز مؤخرة دبري", "نص عادي بدون مصطلحات", "أسفل الظهر"] {
            let once = n.normalize(input);
            assert_eq!(n.normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_normalize_leaves_clean_text_untouched() {
        let text = "سلامتك 🌸\nيُفضل مراجعة العيادة.";
        assert_eq!(normalizer().normalize(text), text);
    }
}
