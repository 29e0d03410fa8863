use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinancialNeed {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl FinancialNeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinancialNeed::Low => "LOW",
            FinancialNeed::Moderate => "MODERATE",
            FinancialNeed::High => "HIGH",
            FinancialNeed::VeryHigh => "VERY_HIGH",
        }
    }
}

/// Student attributes as exported from the profile wizard. Every field may be
/// missing; a missing field never satisfies a requirement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentProfile {
    pub gpa: Option<f64>,
    pub gpa_scale: Option<f64>,
    pub sat_score: Option<f64>,
    pub act_score: Option<f64>,
    pub class_rank: Option<u32>,
    pub class_size: Option<u32>,
    pub graduation_year: Option<i32>,
    pub gender: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub ethnicity: Vec<String>,
    pub state: Option<String>,
    pub citizenship: Option<String>,
    pub intended_major: Option<String>,
    pub field_of_study: Option<String>,
    pub volunteer_hours: Option<f64>,
    #[serde(deserialize_with = "null_as_empty")]
    pub extracurriculars: Vec<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub leadership_roles: Vec<String>,
    pub financial_need: Option<FinancialNeed>,
    pub pell_grant_eligible: Option<bool>,
    pub first_generation: Option<bool>,
    pub military_affiliation: Option<String>,
    pub disabilities: Option<bool>,
}

/// Eligibility thresholds attached to a scholarship. `None` and an empty list
/// both mean the scholarship places no constraint on that attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScholarshipCriteria {
    #[serde(rename = "minGPA")]
    pub min_gpa: Option<f64>,
    #[serde(rename = "minSAT")]
    pub min_sat: Option<f64>,
    #[serde(rename = "minACT")]
    pub min_act: Option<f64>,
    pub gender: Option<String>,
    pub ethnicity: Option<Vec<String>>,
    pub state: Option<Vec<String>>,
    pub intended_major: Option<Vec<String>>,
    pub field_of_study: Option<String>,
    pub min_volunteer_hours: Option<f64>,
    pub leadership_required: Option<bool>,
    pub financial_need: Option<Vec<FinancialNeed>>,
    pub pell_grant_required: Option<bool>,
    pub first_generation_required: Option<bool>,
    pub military_affiliation: Option<Vec<String>>,
}

/// Essay prompts arrive either as a bare list or wrapped in `{ "prompts": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EssayPrompts {
    List(Vec<serde_json::Value>),
    Wrapped {
        #[serde(default, deserialize_with = "null_as_empty")]
        prompts: Vec<serde_json::Value>,
    },
}

impl EssayPrompts {
    pub fn len(&self) -> usize {
        match self {
            EssayPrompts::List(prompts) => prompts.len(),
            EssayPrompts::Wrapped { prompts } => prompts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scholarship {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub award_amount: f64,
    #[serde(default, deserialize_with = "non_negative_count")]
    pub number_of_awards: Option<u32>,
    #[serde(default)]
    pub acceptance_rate: Option<f64>,
    #[serde(default)]
    pub applicant_pool_size: Option<i64>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub essay_prompts: Option<EssayPrompts>,
    #[serde(default)]
    pub required_documents: Option<Vec<String>>,
    #[serde(default, deserialize_with = "non_negative_count")]
    pub recommendation_count: Option<u32>,
    #[serde(default)]
    pub criteria: ScholarshipCriteria,
}

// Nulls in exported rows read as empty or zero; negative counts floor at zero.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

fn non_negative_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let count = Option::<i64>::deserialize(deserializer)?;
    Ok(count.map(|count| count.clamp(0, i64::from(u32::MAX)) as u32))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    NotStarted,
    InProgress,
    ReadyForReview,
    Submitted,
    Awarded,
    Denied,
    Withdrawn,
}

impl ApplicationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ApplicationStatus::Submitted
                | ApplicationStatus::Withdrawn
                | ApplicationStatus::Awarded
                | ApplicationStatus::Denied
        )
    }
}

/// Tracked application progress. Completed counts are clamped to the required
/// counts wherever they are read, since exported rows are not guaranteed
/// well-formed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub scholarship_name: String,
    pub deadline: DateTime<Utc>,
    pub status: ApplicationStatus,
    pub essay_count: u32,
    pub essay_complete: u32,
    pub documents_required: u32,
    pub documents_uploaded: u32,
    pub recs_required: u32,
    pub recs_received: u32,
}

impl Application {
    pub fn essays_remaining(&self) -> u32 {
        self.essay_count.saturating_sub(self.essay_complete)
    }

    pub fn documents_remaining(&self) -> u32 {
        self.documents_required.saturating_sub(self.documents_uploaded)
    }

    pub fn recs_remaining(&self) -> u32 {
        self.recs_required.saturating_sub(self.recs_received)
    }

    pub fn has_incomplete_work(&self) -> bool {
        self.essays_remaining() > 0 || self.documents_remaining() > 0 || self.recs_remaining() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_profile_lists_read_as_empty() {
        let profile: StudentProfile = serde_json::from_value(json!({
            "gpa": 3.5,
            "ethnicity": null,
            "leadershipRoles": null,
            "extracurriculars": null
        }))
        .expect("null lists accepted");

        assert_eq!(profile.gpa, Some(3.5));
        assert!(profile.ethnicity.is_empty());
        assert!(profile.leadership_roles.is_empty());
        assert!(profile.extracurriculars.is_empty());

        let missing: StudentProfile =
            serde_json::from_value(json!({})).expect("missing lists accepted");
        assert_eq!(missing, StudentProfile::default());
    }

    #[test]
    fn malformed_scholarship_fields_are_defaulted() {
        let scholarship: Scholarship = serde_json::from_value(json!({
            "id": "0c22f1f1-9184-4fd4-9b21-28c68a6a89dc",
            "name": "Patchy Export",
            "awardAmount": null,
            "numberOfAwards": -1,
            "recommendationCount": -3,
            "essayPrompts": { "prompts": null }
        }))
        .expect("malformed fields accepted");

        assert_eq!(scholarship.award_amount, 0.0);
        assert_eq!(scholarship.number_of_awards, Some(0));
        assert_eq!(scholarship.recommendation_count, Some(0));
        assert_eq!(scholarship.essay_prompts.as_ref().map(EssayPrompts::len), Some(0));
    }

    #[test]
    fn well_formed_counts_pass_through() {
        let scholarship: Scholarship = serde_json::from_value(json!({
            "id": "0c22f1f1-9184-4fd4-9b21-28c68a6a89dc",
            "name": "Tidy Export",
            "awardAmount": 1500,
            "numberOfAwards": 4,
            "recommendationCount": null,
            "essayPrompts": ["One", "Two"]
        }))
        .expect("tidy record parses");

        assert_eq!(scholarship.award_amount, 1500.0);
        assert_eq!(scholarship.number_of_awards, Some(4));
        assert_eq!(scholarship.recommendation_count, None);
        assert_eq!(scholarship.essay_prompts.as_ref().map(EssayPrompts::len), Some(2));
    }
}
