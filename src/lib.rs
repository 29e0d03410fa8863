//! Scholarship matching and prioritization engine.
//!
//! Every scoring function is pure and deterministic: the same profile,
//! scholarship and clock always produce the same result.

pub mod at_risk;
pub mod competition;
pub mod config;
pub mod effort;
pub mod eligibility;
pub mod error;
pub mod evaluation;
pub mod input;
pub mod matching;
pub mod models;
pub mod priority;
pub mod report;
pub mod strategic_value;
pub mod success_tier;
pub mod telemetry;

pub use at_risk::{calculate_progress, detect_at_risk, generate_recovery_plan, AtRiskApplication};
pub use competition::competition_factor;
pub use effort::{estimate_effort, estimate_time_investment, EffortLevel};
pub use eligibility::{compare_eligibility, EligibilityItem, EligibilityStatus};
pub use evaluation::{evaluate, rank_scholarships, MatchScore, RankedScholarship};
pub use matching::{score_dimensions, DimensionalScores};
pub use models::{Application, ApplicationStatus, Scholarship, ScholarshipCriteria, StudentProfile};
pub use priority::{assign_priority_tier, tier_rationale, PriorityTier};
pub use strategic_value::{calculate_strategic_value, calculate_strategic_value_with_match_boost};
pub use success_tier::{classify, format_tier_display, tier_color, SuccessTier};
