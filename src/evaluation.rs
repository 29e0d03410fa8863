use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::competition::competition_factor;
use crate::effort::{estimate_effort, EffortInputs, EffortLevel};
use crate::matching::{score_dimensions, DimensionalScores};
use crate::models::{Scholarship, StudentProfile};
use crate::priority::{assign_priority_tier, tier_rationale, PriorityTier};
use crate::strategic_value::{calculate_strategic_value_with_match_boost, StrategicValueInputs};
use crate::success_tier::{classify, success_probability, SuccessTier};

/// Everything computed for one (student, scholarship) pair. Always derived
/// fresh from the current profile and scholarship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScore {
    pub academic_score: f64,
    pub demographic_score: f64,
    pub major_field_score: f64,
    pub experience_score: f64,
    pub financial_score: f64,
    pub special_criteria_score: f64,
    pub overall_match_score: f64,
    /// Percent, 0-100.
    pub success_probability: f64,
    pub success_tier: SuccessTier,
    pub competition_factor: f64,
    pub application_effort: EffortLevel,
    pub strategic_value: f64,
    pub priority_tier: PriorityTier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedScholarship {
    pub scholarship_id: Uuid,
    pub name: String,
    pub award_amount: f64,
    pub score: MatchScore,
    pub rationale: String,
}

pub fn evaluate(profile: &StudentProfile, scholarship: &Scholarship) -> MatchScore {
    let DimensionalScores {
        academic,
        demographic,
        major_field,
        experience,
        financial,
        special_criteria,
        overall,
    } = score_dimensions(profile, &scholarship.criteria);

    let competition = competition_factor(scholarship);
    let probability = success_probability(overall, competition);
    let tier = classify(probability).tier;
    let effort = estimate_effort(&EffortInputs::from(scholarship));

    let value = calculate_strategic_value_with_match_boost(&StrategicValueInputs {
        match_score: overall,
        success_probability: probability,
        award_amount: scholarship.award_amount,
        effort_level: effort.level,
    });

    let priority_tier = assign_priority_tier(
        overall,
        probability / 100.0,
        value.strategic_value,
        scholarship.award_amount,
    );

    MatchScore {
        academic_score: academic,
        demographic_score: demographic,
        major_field_score: major_field,
        experience_score: experience,
        financial_score: financial,
        special_criteria_score: special_criteria,
        overall_match_score: overall,
        success_probability: probability,
        success_tier: tier,
        competition_factor: competition,
        application_effort: effort.level,
        strategic_value: value.strategic_value,
        priority_tier,
    }
}

/// Scores every scholarship and orders them by priority tier, then strategic
/// value, then name.
pub fn rank_scholarships(
    profile: &StudentProfile,
    scholarships: &[Scholarship],
) -> Vec<RankedScholarship> {
    let mut ranked: Vec<RankedScholarship> = scholarships
        .iter()
        .map(|scholarship| {
            let score = evaluate(profile, scholarship);
            let rationale = tier_rationale(
                score.priority_tier,
                score.overall_match_score,
                score.success_probability / 100.0,
                score.strategic_value,
                scholarship.award_amount,
            );
            RankedScholarship {
                scholarship_id: scholarship.id,
                name: scholarship.name.clone(),
                award_amount: scholarship.award_amount,
                score,
                rationale,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.score
            .priority_tier
            .cmp(&b.score.priority_tier)
            .then_with(|| {
                b.score
                    .strategic_value
                    .partial_cmp(&a.score.strategic_value)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| a.name.cmp(&b.name))
    });

    debug!(count = ranked.len(), "scholarships ranked");
    ranked
}
