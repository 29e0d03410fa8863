use serde::{Deserialize, Serialize};

use crate::matching::{contains_text, matches_text, normalized_gpa, overlaps};
use crate::models::{FinancialNeed, ScholarshipCriteria, StudentProfile};

const NOT_PROVIDED: &str = "Not provided";
const PARTIAL_HOURS_RATIO: f64 = 0.7;

/// Display order of the breakdown follows declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EligibilityCategory {
    Academic,
    Demographic,
    #[serde(rename = "Major/Field")]
    MajorField,
    Experience,
    Financial,
    Special,
}

impl EligibilityCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EligibilityCategory::Academic => "Academic",
            EligibilityCategory::Demographic => "Demographic",
            EligibilityCategory::MajorField => "Major/Field",
            EligibilityCategory::Experience => "Experience",
            EligibilityCategory::Financial => "Financial",
            EligibilityCategory::Special => "Special",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    Met,
    PartiallyMet,
    NotMet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityItem {
    pub category: EligibilityCategory,
    pub requirement: String,
    pub student_value: String,
    pub status: EligibilityStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial_percentage: Option<f64>,
}

impl EligibilityItem {
    fn new(
        category: EligibilityCategory,
        requirement: String,
        student_value: String,
        met: bool,
    ) -> Self {
        Self {
            category,
            requirement,
            student_value,
            status: if met {
                EligibilityStatus::Met
            } else {
                EligibilityStatus::NotMet
            },
            partial_percentage: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilitySummary {
    pub met: usize,
    pub partially_met: usize,
    pub not_met: usize,
}

impl EligibilitySummary {
    pub fn from_items(items: &[EligibilityItem]) -> Self {
        items
            .iter()
            .fold(Self::default(), |mut summary, item| {
                match item.status {
                    EligibilityStatus::Met => summary.met += 1,
                    EligibilityStatus::PartiallyMet => summary.partially_met += 1,
                    EligibilityStatus::NotMet => summary.not_met += 1,
                }
                summary
            })
    }

    pub fn total(&self) -> usize {
        self.met + self.partially_met + self.not_met
    }

    pub fn is_fully_eligible(&self) -> bool {
        self.partially_met == 0 && self.not_met == 0
    }
}

/// One item per criterion the scholarship sets, in category order. Criteria
/// left unset produce no item.
pub fn compare_eligibility(
    profile: &StudentProfile,
    criteria: &ScholarshipCriteria,
) -> Vec<EligibilityItem> {
    let mut items = Vec::new();
    academic_items(profile, criteria, &mut items);
    demographic_items(profile, criteria, &mut items);
    major_field_items(profile, criteria, &mut items);
    experience_items(profile, criteria, &mut items);
    financial_items(profile, criteria, &mut items);
    special_items(profile, criteria, &mut items);
    items
}

fn academic_items(
    profile: &StudentProfile,
    criteria: &ScholarshipCriteria,
    items: &mut Vec<EligibilityItem>,
) {
    use EligibilityCategory::Academic;

    if let Some(min_gpa) = criteria.min_gpa {
        items.push(minimum_item(
            Academic,
            format!("Minimum GPA {min_gpa:.2}"),
            normalized_gpa(profile),
            gpa_display(profile),
            min_gpa,
        ));
    }
    if let Some(min_sat) = criteria.min_sat {
        items.push(minimum_item(
            Academic,
            format!("Minimum SAT {min_sat}"),
            profile.sat_score,
            display_number(profile.sat_score),
            min_sat,
        ));
    }
    if let Some(min_act) = criteria.min_act {
        items.push(minimum_item(
            Academic,
            format!("Minimum ACT {min_act}"),
            profile.act_score,
            display_number(profile.act_score),
            min_act,
        ));
    }
}

fn demographic_items(
    profile: &StudentProfile,
    criteria: &ScholarshipCriteria,
    items: &mut Vec<EligibilityItem>,
) {
    use EligibilityCategory::Demographic;

    if let Some(gender) = &criteria.gender {
        items.push(EligibilityItem::new(
            Demographic,
            format!("Gender: {gender}"),
            display_text(profile.gender.as_deref()),
            matches_text(profile.gender.as_deref(), gender),
        ));
    }
    if let Some(ethnicity) = &criteria.ethnicity {
        items.push(EligibilityItem::new(
            Demographic,
            list_requirement("Ethnicity", ethnicity),
            display_list(&profile.ethnicity),
            ethnicity.is_empty() || overlaps(&profile.ethnicity, ethnicity),
        ));
    }
    if let Some(states) = &criteria.state {
        items.push(EligibilityItem::new(
            Demographic,
            list_requirement("State of residence", states),
            display_text(profile.state.as_deref()),
            states.is_empty() || contains_text(states, profile.state.as_deref()),
        ));
    }
}

fn major_field_items(
    profile: &StudentProfile,
    criteria: &ScholarshipCriteria,
    items: &mut Vec<EligibilityItem>,
) {
    use EligibilityCategory::MajorField;

    if let Some(majors) = &criteria.intended_major {
        items.push(EligibilityItem::new(
            MajorField,
            list_requirement("Intended major", majors),
            display_text(profile.intended_major.as_deref()),
            majors.is_empty() || contains_text(majors, profile.intended_major.as_deref()),
        ));
    }
    if let Some(field) = &criteria.field_of_study {
        items.push(EligibilityItem::new(
            MajorField,
            format!("Field of study: {field}"),
            display_text(profile.field_of_study.as_deref()),
            matches_text(profile.field_of_study.as_deref(), field),
        ));
    }
}

fn experience_items(
    profile: &StudentProfile,
    criteria: &ScholarshipCriteria,
    items: &mut Vec<EligibilityItem>,
) {
    use EligibilityCategory::Experience;

    if let Some(min_hours) = criteria.min_volunteer_hours {
        items.push(volunteer_hours_item(profile.volunteer_hours, min_hours));
    }
    if let Some(required) = criteria.leadership_required {
        let roles = &profile.leadership_roles;
        items.push(EligibilityItem::new(
            Experience,
            required_label(required, "Leadership experience"),
            if roles.is_empty() {
                "No leadership roles".to_string()
            } else {
                roles.join(", ")
            },
            !required || !roles.is_empty(),
        ));
    }
}

fn financial_items(
    profile: &StudentProfile,
    criteria: &ScholarshipCriteria,
    items: &mut Vec<EligibilityItem>,
) {
    use EligibilityCategory::Financial;

    if let Some(levels) = &criteria.financial_need {
        let labels: Vec<String> = levels.iter().map(|level| level.as_str().to_string()).collect();
        items.push(EligibilityItem::new(
            Financial,
            list_requirement("Financial need", &labels),
            display_text(profile.financial_need.as_ref().map(FinancialNeed::as_str)),
            levels.is_empty()
                || profile
                    .financial_need
                    .map(|need| levels.contains(&need))
                    .unwrap_or(false),
        ));
    }
    if let Some(required) = criteria.pell_grant_required {
        items.push(flag_item(
            Financial,
            required_label(required, "Pell Grant eligibility"),
            profile.pell_grant_eligible,
            required,
        ));
    }
    if let Some(required) = criteria.first_generation_required {
        items.push(flag_item(
            Financial,
            required_label(required, "First-generation college student"),
            profile.first_generation,
            required,
        ));
    }
}

fn special_items(
    profile: &StudentProfile,
    criteria: &ScholarshipCriteria,
    items: &mut Vec<EligibilityItem>,
) {
    if let Some(affiliations) = &criteria.military_affiliation {
        items.push(EligibilityItem::new(
            EligibilityCategory::Special,
            list_requirement("Military affiliation", affiliations),
            display_text(profile.military_affiliation.as_deref()),
            affiliations.is_empty()
                || contains_text(affiliations, profile.military_affiliation.as_deref()),
        ));
    }
}

fn minimum_item(
    category: EligibilityCategory,
    requirement: String,
    value: Option<f64>,
    display: String,
    minimum: f64,
) -> EligibilityItem {
    let met = value
        .filter(|value| value.is_finite())
        .map(|value| value >= minimum)
        .unwrap_or(false);
    EligibilityItem::new(category, requirement, display, met)
}

fn volunteer_hours_item(hours: Option<f64>, minimum: f64) -> EligibilityItem {
    let mut item = EligibilityItem::new(
        EligibilityCategory::Experience,
        format!("Minimum {minimum} volunteer hours"),
        hours
            .map(|hours| format!("{hours} hours"))
            .unwrap_or_else(|| NOT_PROVIDED.to_string()),
        false,
    );

    let Some(hours) = hours.filter(|hours| hours.is_finite()) else {
        return item;
    };
    if minimum <= 0.0 {
        item.status = EligibilityStatus::Met;
        return item;
    }

    let ratio = hours / minimum;
    if ratio >= 1.0 {
        item.status = EligibilityStatus::Met;
    } else if ratio >= PARTIAL_HOURS_RATIO {
        item.status = EligibilityStatus::PartiallyMet;
        item.partial_percentage = Some(ratio * 100.0);
    }
    item
}

fn flag_item(
    category: EligibilityCategory,
    requirement: String,
    flag: Option<bool>,
    required: bool,
) -> EligibilityItem {
    let display = match flag {
        Some(true) => "Yes",
        Some(false) => "No",
        None => NOT_PROVIDED,
    };
    EligibilityItem::new(
        category,
        requirement,
        display.to_string(),
        !required || flag.unwrap_or(false),
    )
}

fn required_label(required: bool, subject: &str) -> String {
    if required {
        format!("{subject} required")
    } else {
        format!("{subject} not required")
    }
}

fn list_requirement(subject: &str, values: &[String]) -> String {
    if values.is_empty() {
        format!("{subject}: any")
    } else {
        format!("{subject}: {}", values.join(", "))
    }
}

fn gpa_display(profile: &StudentProfile) -> String {
    match (profile.gpa, profile.gpa_scale) {
        (Some(gpa), Some(scale)) if scale > 0.0 && scale != 4.0 => format!("{gpa:.2} / {scale:.1}"),
        (Some(gpa), _) => format!("{gpa:.2}"),
        (None, _) => NOT_PROVIDED.to_string(),
    }
}

fn display_number(value: Option<f64>) -> String {
    value
        .map(|value| value.to_string())
        .unwrap_or_else(|| NOT_PROVIDED.to_string())
}

fn display_text(value: Option<&str>) -> String {
    value
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(NOT_PROVIDED)
        .to_string()
}

fn display_list(values: &[String]) -> String {
    if values.is_empty() {
        NOT_PROVIDED.to_string()
    } else {
        values.join(", ")
    }
}
