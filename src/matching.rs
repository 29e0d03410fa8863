//! Dimensional match scoring between a student profile and scholarship criteria.
//!
//! Six dimensions are scored independently on a 0-100 scale and combined with
//! fixed weights. A criterion the scholarship leaves unset is a satisfied
//! check; a profile field the student left blank never satisfies a check.

use serde::{Deserialize, Serialize};

use crate::models::{ScholarshipCriteria, StudentProfile};

/// Dimension weights in percent. They sum to 100.
pub const ACADEMIC_WEIGHT: f64 = 30.0;
pub const MAJOR_FIELD_WEIGHT: f64 = 20.0;
pub const DEMOGRAPHIC_WEIGHT: f64 = 15.0;
pub const EXPERIENCE_WEIGHT: f64 = 15.0;
pub const FINANCIAL_WEIGHT: f64 = 10.0;
pub const SPECIAL_WEIGHT: f64 = 10.0;

const FULL_CREDIT: f64 = 100.0;
const BELOW_MINIMUM_CREDIT: f64 = 75.0;
const PARTIAL_NAME_CREDIT: f64 = 60.0;
const STANDARD_GPA_SCALE: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionalScores {
    pub academic: f64,
    pub demographic: f64,
    pub major_field: f64,
    pub experience: f64,
    pub financial: f64,
    pub special_criteria: f64,
    pub overall: f64,
}

pub fn score_dimensions(
    profile: &StudentProfile,
    criteria: &ScholarshipCriteria,
) -> DimensionalScores {
    let academic = academic_score(profile, criteria);
    let demographic = demographic_score(profile, criteria);
    let major_field = major_field_score(profile, criteria);
    let experience = experience_score(profile, criteria);
    let financial = financial_score(profile, criteria);
    let special_criteria = special_score(profile, criteria);

    let overall = (academic * ACADEMIC_WEIGHT
        + major_field * MAJOR_FIELD_WEIGHT
        + demographic * DEMOGRAPHIC_WEIGHT
        + experience * EXPERIENCE_WEIGHT
        + financial * FINANCIAL_WEIGHT
        + special_criteria * SPECIAL_WEIGHT)
        / 100.0;

    DimensionalScores {
        academic,
        demographic,
        major_field,
        experience,
        financial,
        special_criteria,
        overall: clamp_score(overall),
    }
}

/// Averages the checks a scholarship actually constrains. `None` entries are
/// criteria the scholarship left unset and are skipped; a dimension with no
/// constrained checks earns full credit.
pub fn dimension_score(checks: &[Option<f64>]) -> f64 {
    let present: Vec<f64> = checks.iter().flatten().copied().collect();
    if present.is_empty() {
        return FULL_CREDIT;
    }
    clamp_score(present.iter().sum::<f64>() / present.len() as f64)
}

pub fn academic_score(profile: &StudentProfile, criteria: &ScholarshipCriteria) -> f64 {
    dimension_score(&[
        criteria
            .min_gpa
            .map(|min| minimum_check(normalized_gpa(profile), min)),
        criteria
            .min_sat
            .map(|min| minimum_check(profile.sat_score, min)),
        criteria
            .min_act
            .map(|min| minimum_check(profile.act_score, min)),
    ])
}

pub fn demographic_score(profile: &StudentProfile, criteria: &ScholarshipCriteria) -> f64 {
    dimension_score(&[
        criteria
            .gender
            .as_deref()
            .map(|required| boolean_check(matches_text(profile.gender.as_deref(), required))),
        non_empty(&criteria.ethnicity)
            .map(|allowed| boolean_check(overlaps(&profile.ethnicity, allowed))),
        non_empty(&criteria.state)
            .map(|allowed| boolean_check(contains_text(allowed, profile.state.as_deref()))),
    ])
}

pub fn major_field_score(profile: &StudentProfile, criteria: &ScholarshipCriteria) -> f64 {
    dimension_score(&[
        non_empty(&criteria.intended_major).map(|majors| {
            majors
                .iter()
                .map(|major| name_similarity(profile.intended_major.as_deref(), major))
                .fold(0.0, f64::max)
        }),
        criteria
            .field_of_study
            .as_deref()
            .map(|field| name_similarity(profile.field_of_study.as_deref(), field)),
    ])
}

pub fn experience_score(profile: &StudentProfile, criteria: &ScholarshipCriteria) -> f64 {
    dimension_score(&[
        criteria
            .min_volunteer_hours
            .map(|min| volunteer_hours_check(profile.volunteer_hours, min)),
        criteria
            .leadership_required
            .filter(|required| *required)
            .map(|_| boolean_check(!profile.leadership_roles.is_empty())),
    ])
}

pub fn financial_score(profile: &StudentProfile, criteria: &ScholarshipCriteria) -> f64 {
    dimension_score(&[
        criteria
            .financial_need
            .as_ref()
            .filter(|levels| !levels.is_empty())
            .map(|levels| {
                boolean_check(
                    profile
                        .financial_need
                        .map(|need| levels.contains(&need))
                        .unwrap_or(false),
                )
            }),
        criteria
            .pell_grant_required
            .filter(|required| *required)
            .map(|_| boolean_check(profile.pell_grant_eligible.unwrap_or(false))),
        criteria
            .first_generation_required
            .filter(|required| *required)
            .map(|_| boolean_check(profile.first_generation.unwrap_or(false))),
    ])
}

pub fn special_score(profile: &StudentProfile, criteria: &ScholarshipCriteria) -> f64 {
    dimension_score(&[non_empty(&criteria.military_affiliation).map(|allowed| {
        boolean_check(contains_text(
            allowed,
            profile.military_affiliation.as_deref(),
        ))
    })])
}

/// Profile GPA expressed on a 4.0 scale. A missing or non-positive scale is
/// treated as 4.0.
pub fn normalized_gpa(profile: &StudentProfile) -> Option<f64> {
    let gpa = sanitize(profile.gpa?)?;
    let scale = profile
        .gpa_scale
        .filter(|scale| scale.is_finite() && *scale > 0.0)
        .unwrap_or(STANDARD_GPA_SCALE);
    Some(gpa * STANDARD_GPA_SCALE / scale)
}

fn minimum_check(value: Option<f64>, minimum: f64) -> f64 {
    let minimum = match sanitize(minimum) {
        Some(min) if min > 0.0 => min,
        _ => return FULL_CREDIT,
    };
    let Some(value) = value.and_then(sanitize) else {
        return 0.0;
    };
    if value >= minimum {
        FULL_CREDIT
    } else {
        (value / minimum) * BELOW_MINIMUM_CREDIT
    }
}

fn volunteer_hours_check(hours: Option<f64>, minimum: f64) -> f64 {
    let minimum = match sanitize(minimum) {
        Some(min) if min > 0.0 => min,
        _ => return FULL_CREDIT,
    };
    let Some(hours) = hours.and_then(sanitize) else {
        return 0.0;
    };
    let ratio = hours / minimum;
    if ratio >= 1.0 {
        FULL_CREDIT
    } else if ratio >= 0.7 {
        ratio * 100.0
    } else {
        ratio * 50.0
    }
}

fn name_similarity(candidate: Option<&str>, required: &str) -> f64 {
    let Some(candidate) = candidate.map(normalize).filter(|value| !value.is_empty()) else {
        return 0.0;
    };
    let required = normalize(required);
    if candidate == required {
        FULL_CREDIT
    } else if !required.is_empty() && (candidate.contains(&required) || required.contains(&candidate))
    {
        PARTIAL_NAME_CREDIT
    } else {
        0.0
    }
}

fn boolean_check(met: bool) -> f64 {
    if met {
        FULL_CREDIT
    } else {
        0.0
    }
}

pub(crate) fn non_empty(values: &Option<Vec<String>>) -> Option<&[String]> {
    values.as_deref().filter(|values| !values.is_empty())
}

pub(crate) fn matches_text(candidate: Option<&str>, required: &str) -> bool {
    candidate
        .map(|value| normalize(value) == normalize(required))
        .unwrap_or(false)
}

pub(crate) fn contains_text(allowed: &[String], candidate: Option<&str>) -> bool {
    allowed
        .iter()
        .any(|value| matches_text(candidate, value))
}

pub(crate) fn overlaps(values: &[String], allowed: &[String]) -> bool {
    values
        .iter()
        .any(|value| contains_text(allowed, Some(value)))
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// NaN and infinities are dropped and negatives floored at zero.
fn sanitize(value: f64) -> Option<f64> {
    value.is_finite().then(|| value.max(0.0))
}

fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FinancialNeed;

    fn strong_profile() -> StudentProfile {
        StudentProfile {
            gpa: Some(3.9),
            gpa_scale: Some(4.0),
            sat_score: Some(1450.0),
            act_score: Some(32.0),
            gender: Some("Female".to_string()),
            ethnicity: vec!["Hispanic".to_string()],
            state: Some("TX".to_string()),
            intended_major: Some("Computer Science".to_string()),
            field_of_study: Some("STEM".to_string()),
            volunteer_hours: Some(120.0),
            leadership_roles: vec!["Robotics captain".to_string()],
            financial_need: Some(FinancialNeed::High),
            pell_grant_eligible: Some(true),
            first_generation: Some(true),
            military_affiliation: Some("Veteran dependent".to_string()),
            ..StudentProfile::default()
        }
    }

    #[test]
    fn weights_sum_to_one_hundred() {
        let total = ACADEMIC_WEIGHT
            + MAJOR_FIELD_WEIGHT
            + DEMOGRAPHIC_WEIGHT
            + EXPERIENCE_WEIGHT
            + FINANCIAL_WEIGHT
            + SPECIAL_WEIGHT;
        assert_eq!(total, 100.0);
    }

    #[test]
    fn unconstrained_criteria_score_full_marks() {
        let scores = score_dimensions(&StudentProfile::default(), &ScholarshipCriteria::default());
        assert_eq!(scores.academic, 100.0);
        assert_eq!(scores.demographic, 100.0);
        assert_eq!(scores.major_field, 100.0);
        assert_eq!(scores.experience, 100.0);
        assert_eq!(scores.financial, 100.0);
        assert_eq!(scores.special_criteria, 100.0);
        assert_eq!(scores.overall, 100.0);
    }

    #[test]
    fn missing_profile_data_never_meets_a_requirement() {
        let criteria = ScholarshipCriteria {
            min_gpa: Some(3.0),
            gender: Some("Female".to_string()),
            min_volunteer_hours: Some(50.0),
            pell_grant_required: Some(true),
            ..ScholarshipCriteria::default()
        };
        let scores = score_dimensions(&StudentProfile::default(), &criteria);
        assert_eq!(scores.academic, 0.0);
        assert_eq!(scores.demographic, 0.0);
        assert_eq!(scores.experience, 0.0);
        assert_eq!(scores.financial, 0.0);
        assert_eq!(scores.major_field, 100.0);
        let expected = (20.0 + 10.0) * 100.0 / 100.0;
        assert!((scores.overall - expected).abs() < 1e-9);
    }

    #[test]
    fn strong_profile_meets_every_dimension() {
        let criteria = ScholarshipCriteria {
            min_gpa: Some(3.5),
            min_sat: Some(1300.0),
            gender: Some("female".to_string()),
            ethnicity: Some(vec!["hispanic".to_string(), "Black".to_string()]),
            state: Some(vec!["TX".to_string()]),
            intended_major: Some(vec!["Computer Science".to_string()]),
            min_volunteer_hours: Some(100.0),
            leadership_required: Some(true),
            financial_need: Some(vec![FinancialNeed::High, FinancialNeed::VeryHigh]),
            first_generation_required: Some(true),
            military_affiliation: Some(vec!["veteran dependent".to_string()]),
            ..ScholarshipCriteria::default()
        };
        let scores = score_dimensions(&strong_profile(), &criteria);
        assert_eq!(scores.overall, 100.0);
    }

    #[test]
    fn weighted_overall_combines_dimensions() {
        let criteria = ScholarshipCriteria {
            min_gpa: Some(4.0),
            state: Some(vec!["CA".to_string()]),
            ..ScholarshipCriteria::default()
        };
        let profile = StudentProfile {
            gpa: Some(3.0),
            state: Some("TX".to_string()),
            ..StudentProfile::default()
        };
        let scores = score_dimensions(&profile, &criteria);
        let academic = 0.75 * 75.0;
        assert!((scores.academic - academic).abs() < 1e-9);
        assert_eq!(scores.demographic, 0.0);
        let expected = (academic * 30.0 + 100.0 * 20.0 + 100.0 * 15.0 + 100.0 * 10.0 + 100.0 * 10.0)
            / 100.0;
        assert!((scores.overall - expected).abs() < 1e-9);
    }

    #[test]
    fn gpa_is_normalized_to_four_point_scale() {
        let profile = StudentProfile {
            gpa: Some(4.5),
            gpa_scale: Some(5.0),
            ..StudentProfile::default()
        };
        let gpa = normalized_gpa(&profile).expect("gpa present");
        assert!((gpa - 3.6).abs() < 1e-9);

        let zero_scale = StudentProfile {
            gpa: Some(3.2),
            gpa_scale: Some(0.0),
            ..StudentProfile::default()
        };
        assert_eq!(normalized_gpa(&zero_scale), Some(3.2));
    }

    #[test]
    fn volunteer_hours_grade_near_misses() {
        assert_eq!(volunteer_hours_check(Some(100.0), 100.0), 100.0);
        assert!((volunteer_hours_check(Some(80.0), 100.0) - 80.0).abs() < 1e-9);
        assert!((volunteer_hours_check(Some(50.0), 100.0) - 25.0).abs() < 1e-9);
        assert_eq!(volunteer_hours_check(None, 100.0), 0.0);
    }

    #[test]
    fn major_similarity_awards_partial_credit() {
        assert_eq!(name_similarity(Some("Biology"), "biology"), 100.0);
        assert_eq!(name_similarity(Some("Marine Biology"), "Biology"), 60.0);
        assert_eq!(name_similarity(Some("History"), "Biology"), 0.0);
        assert_eq!(name_similarity(None, "Biology"), 0.0);
    }

    #[test]
    fn malformed_numbers_are_clamped() {
        let profile = StudentProfile {
            gpa: Some(f64::NAN),
            sat_score: Some(-400.0),
            ..StudentProfile::default()
        };
        let criteria = ScholarshipCriteria {
            min_gpa: Some(3.0),
            min_sat: Some(1200.0),
            min_act: Some(-5.0),
            ..ScholarshipCriteria::default()
        };
        let score = academic_score(&profile, &criteria);
        assert!((0.0..=100.0).contains(&score));
        assert!((score - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn leadership_not_required_is_unconstrained() {
        let criteria = ScholarshipCriteria {
            leadership_required: Some(false),
            ..ScholarshipCriteria::default()
        };
        assert_eq!(experience_score(&StudentProfile::default(), &criteria), 100.0);
    }

    #[test]
    fn scoring_is_idempotent() {
        let criteria = ScholarshipCriteria {
            min_gpa: Some(3.7),
            intended_major: Some(vec!["Engineering".to_string()]),
            min_volunteer_hours: Some(150.0),
            ..ScholarshipCriteria::default()
        };
        let first = score_dimensions(&strong_profile(), &criteria);
        let second = score_dimensions(&strong_profile(), &criteria);
        assert_eq!(first, second);
        assert_eq!(first.overall.to_bits(), second.overall.to_bits());
    }
}
