//! Deadline and progress heuristics for in-flight applications.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::models::{Application, ApplicationStatus};

const ESSAY_WEIGHT: f64 = 0.5;
const DOCUMENT_WEIGHT: f64 = 0.3;
const RECOMMENDATION_WEIGHT: f64 = 0.2;
const HOURS_PER_ESSAY: f64 = 3.0;
const HOURS_PER_DOCUMENT: f64 = 0.5;
const SECONDS_PER_DAY: i64 = 86_400;

/// Ordered most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Critical,
    Urgent,
    Warning,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Critical => "CRITICAL",
            RiskLevel::Urgent => "URGENT",
            RiskLevel::Warning => "WARNING",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskRule {
    OneDayNotReady,
    ThreeDayIncomplete,
    SevenDayLowProgress,
}

impl RiskRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskRule::OneDayNotReady => "ONE_DAY_NOT_READY",
            RiskRule::ThreeDayIncomplete => "THREE_DAY_INCOMPLETE",
            RiskRule::SevenDayLowProgress => "SEVEN_DAY_LOW_PROGRESS",
        }
    }
}

/// What the detector knows about one application when rules are evaluated.
#[derive(Debug, Clone, Copy)]
pub struct RiskContext {
    pub days_until_deadline: i64,
    pub progress: f64,
    pub status: ApplicationStatus,
    pub has_incomplete_work: bool,
}

pub struct RiskRuleEntry {
    pub rule: RiskRule,
    pub level: RiskLevel,
    pub applies: fn(&RiskContext) -> bool,
}

/// Evaluated top to bottom; the first match is the only flag raised.
pub const RISK_RULES: [RiskRuleEntry; 3] = [
    RiskRuleEntry {
        rule: RiskRule::OneDayNotReady,
        level: RiskLevel::Critical,
        applies: |ctx| {
            ctx.days_until_deadline <= 1 && ctx.status != ApplicationStatus::ReadyForReview
        },
    },
    RiskRuleEntry {
        rule: RiskRule::ThreeDayIncomplete,
        level: RiskLevel::Urgent,
        applies: |ctx| {
            ctx.days_until_deadline > 1 && ctx.days_until_deadline <= 3 && ctx.has_incomplete_work
        },
    },
    RiskRuleEntry {
        rule: RiskRule::SevenDayLowProgress,
        level: RiskLevel::Warning,
        applies: |ctx| {
            ctx.days_until_deadline > 3 && ctx.days_until_deadline <= 7 && ctx.progress < 50.0
        },
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecoveryDimension {
    Essays,
    Documents,
    Recommendations,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryRecommendation {
    pub priority: u8,
    pub dimension: RecoveryDimension,
    pub action: String,
    pub remaining: u32,
    pub estimated_hours: f64,
    pub suggested_deadline: Option<DateTime<Utc>>,
    pub severity: Severity,
    /// Set when completion depends on someone other than the student.
    pub blocker: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtRiskApplication {
    pub application_id: Uuid,
    pub scholarship_name: String,
    pub deadline: DateTime<Utc>,
    pub days_until_deadline: i64,
    pub progress: f64,
    pub risk_level: RiskLevel,
    pub rule: RiskRule,
    pub recovery_plan: Vec<RecoveryRecommendation>,
}

/// Weighted completion percentage: essays 50%, documents 30%,
/// recommendations 20%. A dimension with nothing required counts as complete.
pub fn calculate_progress(application: &Application) -> f64 {
    let essays = completion_ratio(application.essay_complete, application.essay_count);
    let documents = completion_ratio(
        application.documents_uploaded,
        application.documents_required,
    );
    let recommendations = completion_ratio(application.recs_received, application.recs_required);

    (essays * ESSAY_WEIGHT + documents * DOCUMENT_WEIGHT + recommendations * RECOMMENDATION_WEIGHT)
        * 100.0
}

fn completion_ratio(completed: u32, required: u32) -> f64 {
    if required == 0 {
        return 1.0;
    }
    completed.min(required) as f64 / required as f64
}

/// Whole days left before the deadline, rounded up. Zero or negative once the
/// deadline is reached.
pub fn days_until_deadline(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let seconds = (deadline - now).num_seconds();
    seconds.div_euclid(SECONDS_PER_DAY) + i64::from(seconds.rem_euclid(SECONDS_PER_DAY) != 0)
}

/// Flags open applications approaching their deadline, most severe first and
/// then by nearest deadline. Terminal and past-deadline applications are
/// never flagged.
pub fn detect_at_risk(applications: &[Application], now: DateTime<Utc>) -> Vec<AtRiskApplication> {
    let mut flagged: Vec<AtRiskApplication> = applications
        .iter()
        .filter_map(|application| assess(application, now))
        .collect();

    flagged.sort_by(|a, b| {
        a.risk_level
            .cmp(&b.risk_level)
            .then_with(|| a.deadline.cmp(&b.deadline))
    });
    flagged
}

pub fn detect_at_risk_now(applications: &[Application]) -> Vec<AtRiskApplication> {
    detect_at_risk(applications, Utc::now())
}

fn assess(application: &Application, now: DateTime<Utc>) -> Option<AtRiskApplication> {
    if application.status.is_terminal() || application.deadline < now {
        return None;
    }

    let context = RiskContext {
        days_until_deadline: days_until_deadline(application.deadline, now),
        progress: calculate_progress(application),
        status: application.status,
        has_incomplete_work: application.has_incomplete_work(),
    };

    let entry = RISK_RULES.iter().find(|entry| (entry.applies)(&context))?;
    debug!(
        application_id = %application.id,
        rule = entry.rule.as_str(),
        days = context.days_until_deadline,
        progress = context.progress,
        "application flagged at risk"
    );

    Some(AtRiskApplication {
        application_id: application.id,
        scholarship_name: application.scholarship_name.clone(),
        deadline: application.deadline,
        days_until_deadline: context.days_until_deadline,
        progress: context.progress,
        risk_level: entry.level,
        rule: entry.rule,
        recovery_plan: generate_recovery_plan(application),
    })
}

/// Concrete next steps for each incomplete dimension, essays first.
pub fn generate_recovery_plan(application: &Application) -> Vec<RecoveryRecommendation> {
    let mut plan = Vec::new();

    let essays = application.essays_remaining();
    if essays > 0 {
        plan.push(RecoveryRecommendation {
            priority: 1,
            dimension: RecoveryDimension::Essays,
            action: format!("Finish {essays} remaining essay(s)"),
            remaining: essays,
            estimated_hours: essays as f64 * HOURS_PER_ESSAY,
            suggested_deadline: Some(application.deadline - Duration::hours(24)),
            severity: Severity::Medium,
            blocker: false,
        });
    }

    let documents = application.documents_remaining();
    if documents > 0 {
        plan.push(RecoveryRecommendation {
            priority: 2,
            dimension: RecoveryDimension::Documents,
            action: format!("Upload {documents} missing document(s)"),
            remaining: documents,
            estimated_hours: documents as f64 * HOURS_PER_DOCUMENT,
            suggested_deadline: None,
            severity: Severity::Low,
            blocker: false,
        });
    }

    let recommendations = application.recs_remaining();
    if recommendations > 0 {
        plan.push(RecoveryRecommendation {
            priority: 3,
            dimension: RecoveryDimension::Recommendations,
            action: format!("Follow up on {recommendations} outstanding recommendation letter(s)"),
            remaining: recommendations,
            estimated_hours: 0.0,
            suggested_deadline: None,
            severity: Severity::High,
            blocker: true,
        });
    }

    plan
}
