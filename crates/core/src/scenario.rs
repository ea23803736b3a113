//! Scenario classification and scenario-specific acceptance rules.
//!
//! The caller's classification label selects an additional rule set that runs
//! after the generic checks. The mapping is exact string equality against the
//! three known labels; anything else takes the lenient [`Scenario::Default`]
//! path. That leniency is a recorded policy decision, kept as an explicit
//! match arm so it stays auditable.

use crate::rules::RuleTables;

/// Classification labels with dedicated rule sets.
const LABEL_MRI_PERIOD: &str = "MRI + Period";
const LABEL_PAIN_PREGNANCY: &str = "Pain + Pregnancy";
const LABEL_IRON_ANEMIA: &str = "Iron Deficiency / Anemia";

/// Closed set of validation scenarios.
///
/// Derived from the free-form classification label; carries no state of its
/// own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// MRI timing question during the menstrual period.
    MriPeriod,
    /// Pain reported during pregnancy.
    PainPregnancy,
    /// Iron deficiency / anemia treatment question.
    IronAnemia,
    /// Any other classification: only the generic checks apply.
    Default,
}

impl Scenario {
    /// Maps a classification label to its scenario.
    ///
    /// Unrecognized labels are never rejected; they fall through to the
    /// lenient default path on purpose.
    pub fn from_label(label: &str) -> Self {
        match label {
            LABEL_MRI_PERIOD => Scenario::MriPeriod,
            LABEL_PAIN_PREGNANCY => Scenario::PainPregnancy,
            LABEL_IRON_ANEMIA => Scenario::IronAnemia,
            _ => Scenario::Default,
        }
    }
}

/// Applies the scenario-specific acceptance rule to already-normalized text.
///
/// Assumes the generic checks (opening, line count, forbidden phrases) have
/// already passed; this only adds the per-scenario constraints.
pub fn validate_scenario(text: &str, scenario: Scenario, rules: &RuleTables) -> bool {
    match scenario {
        // The MRI reply is a fixed literal: any deviation beyond surrounding
        // whitespace fails.
        Scenario::MriPeriod => text.trim() == rules.mri_template.trim(),

        // Must defer assessment and route to emergency/clinic, and must not
        // name pelvic anatomy even after normalization.
        Scenario::PainPregnancy => {
            rules.pain_required.iter().all(|needle| text.contains(needle))
                && !rules
                    .pain_forbidden_anatomy
                    .iter()
                    .any(|needle| text.contains(needle))
        }

        // Must mention an administration route and the clinic, and must not
        // reassure; this reassurance check is stricter than the generic list
        // and applies on its own.
        Scenario::IronAnemia => {
            rules
                .iron_route_options
                .iter()
                .any(|needle| text.contains(needle))
                && text.contains(rules.iron_clinic_term)
                && !rules
                    .iron_forbidden_reassurance
                    .iter()
                    .any(|needle| text.contains(needle))
        }

        Scenario::Default => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> RuleTables {
        RuleTables::builtin()
    }

    #[test]
    fn test_from_label_maps_known_labels() {
        assert_eq!(Scenario::from_label("MRI + Period"), Scenario::MriPeriod);
        assert_eq!(
            Scenario::from_label("Pain + Pregnancy"),
            Scenario::PainPregnancy
        );
        assert_eq!(
            Scenario::from_label("Iron Deficiency / Anemia"),
            Scenario::IronAnemia
        );
    }

    #[test]
    fn test_from_label_requires_exact_equality() {
        assert_eq!(Scenario::from_label("mri + period"), Scenario::Default);
        assert_eq!(Scenario::from_label("MRI+Period"), Scenario::Default);
        assert_eq!(Scenario::from_label(""), Scenario::Default);
        assert_eq!(Scenario::from_label("Back Pain"), Scenario::Default);
    }

    #[test]
    fn test_mri_scenario_accepts_template_verbatim() {
        let r = rules();
        assert!(validate_scenario(r.mri_template, Scenario::MriPeriod, &r));
        // Surrounding whitespace is the only tolerated difference.
        let padded = format!("\n{}\n  ", r.mri_template);
        assert!(validate_scenario(&padded, Scenario::MriPeriod, &r));
    }

    #[test]
    fn test_mri_scenario_rejects_any_deviation() {
        let r = rules();
        let altered = r.mri_template.replace("السادس", "السابع");
        assert!(!validate_scenario(&altered, Scenario::MriPeriod, &r));
        assert!(!validate_scenario("سلامتك 🌸", Scenario::MriPeriod, &r));
    }

    #[test]
    fn test_pain_scenario_requires_every_mandatory_substring() {
        let r = rules();
        let good = "سلامتك 🌸\nالألم لا يمكن تشخيصه بدقة عبر الرسائل.\nإذا كان شديدًا يُفضل التوجه للطوارئ.\nوإذا استمر يُفضل مراجعة العيادة.";
        assert!(validate_scenario(good, Scenario::PainPregnancy, &r));

        let missing_emergency = good.replace("الطوارئ", "المستشفى");
        assert!(!validate_scenario(
            &missing_emergency,
            Scenario::PainPregnancy,
            &r
        ));

        let missing_clinic = good.replace("العيادة", "الطبيب");
        assert!(!validate_scenario(
            &missing_clinic,
            Scenario::PainPregnancy,
            &r
        ));
    }

    #[test]
    fn test_pain_scenario_rejects_anatomical_terms() {
        let r = rules();
        for term in r.pain_forbidden_anatomy {
            let text = format!(
                "سلامتك 🌸\nالألم في {term} لا يمكن تشخيصه عبر الرسائل.\nيُفضل التوجه للطوارئ.\nأو مراجعة العيادة."
            );
            assert!(
                !validate_scenario(&text, Scenario::PainPregnancy, &r),
                "accepted forbidden term {term}"
            );
        }
    }

    #[test]
    fn test_iron_scenario_requires_route_and_clinic() {
        let r = rules();
        let oral = "سلامتك 🌸\nغالبًا يُستخدم الحديد عن طريق الفم كبداية.\nيُفضل تقييم الخيار الأنسب في العيادة.";
        assert!(validate_scenario(oral, Scenario::IronAnemia, &r));

        let iv = "سلامتك 🌸\nالحديد الوريدي يُلجأ له بحالات معينة.\nيُفضل التقييم في العيادة.";
        assert!(validate_scenario(iv, Scenario::IronAnemia, &r));

        let no_route = "سلامتك 🌸\nانخفاض مخزون الحديد وارد.\nيُفضل مراجعة العيادة.";
        assert!(!validate_scenario(no_route, Scenario::IronAnemia, &r));

        let no_clinic = "سلامتك 🌸\nغالبًا يُستخدم الحديد عن طريق الفم.\nحسب تقييم الطبيب.";
        assert!(!validate_scenario(no_clinic, Scenario::IronAnemia, &r));
    }

    #[test]
    fn test_iron_scenario_rejects_reassurance_regardless_of_content() {
        let r = rules();
        let text = "سلامتك 🌸\nالوضع مطمئن والحديد عن طريق الفم يكفي.\nيُفضل مراجعة العيادة.";
        assert!(!validate_scenario(text, Scenario::IronAnemia, &r));
    }

    #[test]
    fn test_default_scenario_adds_no_rule() {
        let r = rules();
        assert!(validate_scenario("أي نص", Scenario::Default, &r));
        assert!(validate_scenario("", Scenario::Default, &r));
    }
}
