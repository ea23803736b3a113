//! Static medical-safety rule tables.
//!
//! Every check in the validation pipeline reads from one [`RuleTables`] value
//! that is built once at startup and shared by `Arc`. Nothing in here is ever
//! mutated after construction, so concurrent readers never race.
//!
//! The Arabic literals are the clinic's approved wording and must not be
//! edited casually: the MRI scenario compares replies against
//! [`RuleTables::mri_template`] byte for byte.

/// Colloquial anatomical terms that must never reach a patient.
///
/// Order matters: longer variants come before their prefixes so that e.g.
/// "طيزي" is rewritten as a whole rather than leaving a stray suffix.
const ANATOMY_SYNONYMS: &[&str] = &[
    "صرمي",
    "طيزي",
    "طيز",
    "مؤخرتي",
    "مؤخرة",
    "خلفيتي",
    "خلفية",
    "دبري",
];

/// The approved clinical term every synonym is rewritten to.
const CANONICAL_ANATOMY_TERM: &str = "أسفل الظهر";

/// Closing phrases that invite open-ended follow-up chat.
const FORBIDDEN_CLOSINGS: &[&str] = &[
    "يحتاج انتباه",
    "يحتاج متابعة",
    "مهم نتابع",
    "لا تهملي",
    "شكرًا لتواصلك",
    "أتمنى لك الصحة والعافية",
    "لا تترددي",
    "خبريني",
    "إذا احتجتِ",
];

/// Reassurance phrases that could read as a diagnosis over chat.
const FORBIDDEN_REASSURANCE: &[&str] = &[
    "عادي",
    "لا يؤثر",
    "لا مشكلة",
    "أكيد",
    "من الجيد",
    "الوضع مطمئن",
];

/// The only openings a reply may start with.
const APPROVED_OPENINGS: &[&str] = &["سلامتك 🌸", "مساء الخير 🌸", "صباح الخير 🌸"];

/// Mandatory verbatim reply for the MRI-timing scenario.
const MRI_TEMPLATE: &str = "سلامتك 🌸\n\
يُفضل تعملي الرنين بعد انتهاء الدورة.\n\
غالبًا اليوم الخامس أو السادس هيك بتكون النتيجة أدق.";

/// Substrings a pain-during-pregnancy reply must contain: "cannot
/// [assess/diagnose]", "emergency" and "clinic".
const PAIN_REQUIRED: &[&str] = &["لا يمكن", "الطوارئ", "العيادة"];

/// Anatomical terms a pain-during-pregnancy reply must not contain, even
/// after normalization: pelvis, posterior, anal, rectal.
const PAIN_FORBIDDEN_ANATOMY: &[&str] = &["الحوض", "المؤخرة", "الشرج", "المستقيم"];

/// An iron-deficiency reply must mention at least one administration route:
/// "oral route" or "intravenous".
const IRON_ROUTE_OPTIONS: &[&str] = &["عن طريق الفم", "الوريدي"];

/// An iron-deficiency reply must refer the patient to the clinic.
const IRON_CLINIC_TERM: &str = "العيادة";

/// Reassurance wording that is rejected for iron-deficiency replies on top of
/// the generic reassurance list.
const IRON_FORBIDDEN_REASSURANCE: &[&str] = &["من الجيد", "الوضع مطمئن"];

/// Immutable rule tables driving normalization and validation.
#[derive(Debug, Clone)]
pub struct RuleTables {
    pub anatomy_synonyms: &'static [&'static str],
    pub canonical_anatomy_term: &'static str,
    pub forbidden_closings: &'static [&'static str],
    pub forbidden_reassurance: &'static [&'static str],
    pub approved_openings: &'static [&'static str],
    pub mri_template: &'static str,
    pub pain_required: &'static [&'static str],
    pub pain_forbidden_anatomy: &'static [&'static str],
    pub iron_route_options: &'static [&'static str],
    pub iron_clinic_term: &'static str,
    pub iron_forbidden_reassurance: &'static [&'static str],
}

impl RuleTables {
    /// Returns the compiled-in rule set.
    ///
    /// Call once at startup and share the result; the tables carry only
    /// `'static` data so cloning is cheap, but services should still hold a
    /// single `Arc<RuleTables>` to make the shared-ownership intent explicit.
    pub fn builtin() -> Self {
        Self {
            anatomy_synonyms: ANATOMY_SYNONYMS,
            canonical_anatomy_term: CANONICAL_ANATOMY_TERM,
            forbidden_closings: FORBIDDEN_CLOSINGS,
            forbidden_reassurance: FORBIDDEN_REASSURANCE,
            approved_openings: APPROVED_OPENINGS,
            mri_template: MRI_TEMPLATE,
            pain_required: PAIN_REQUIRED,
            pain_forbidden_anatomy: PAIN_FORBIDDEN_ANATOMY,
            iron_route_options: IRON_ROUTE_OPTIONS,
            iron_clinic_term: IRON_CLINIC_TERM,
            iron_forbidden_reassurance: IRON_FORBIDDEN_REASSURANCE,
        }
    }

    /// All phrases checked by the generic forbidden-phrase scan.
    pub fn forbidden_phrases(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.forbidden_closings
            .iter()
            .chain(self.forbidden_reassurance.iter())
            .copied()
    }
}

impl Default for RuleTables {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_are_populated() {
        let rules = RuleTables::builtin();
        assert_eq!(rules.anatomy_synonyms.len(), 8);
        assert_eq!(rules.approved_openings.len(), 3);
        assert_eq!(rules.forbidden_phrases().count(), 15);
    }

    #[test]
    fn test_canonical_term_contains_no_synonym() {
        // Guarantees normalization is idempotent: rewriting can never
        // reintroduce a banned term.
        let rules = RuleTables::builtin();
        for synonym in rules.anatomy_synonyms {
            assert!(
                !rules.canonical_anatomy_term.contains(synonym),
                "canonical term contains synonym {synonym}"
            );
        }
    }

    #[test]
    fn test_mri_template_has_three_lines_and_approved_opening() {
        let rules = RuleTables::builtin();
        assert_eq!(rules.mri_template.lines().count(), 3);
        assert!(rules
            .approved_openings
            .iter()
            .any(|opening| rules.mri_template.starts_with(opening)));
    }
}
