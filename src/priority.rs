//! Priority tiers: the actionable triage bucket for a scholarship.
//!
//! Tiers are assigned by an ordered rule table where the first matching rule
//! wins. The order is part of the contract: a scholarship that satisfies both
//! the SHOULD_APPLY and HIGH_VALUE_REACH conditions is SHOULD_APPLY.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriorityTier {
    MustApply,
    ShouldApply,
    HighValueReach,
    IfTimePermits,
}

impl PriorityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityTier::MustApply => "MUST_APPLY",
            PriorityTier::ShouldApply => "SHOULD_APPLY",
            PriorityTier::HighValueReach => "HIGH_VALUE_REACH",
            PriorityTier::IfTimePermits => "IF_TIME_PERMITS",
        }
    }

    fn qualifier(&self) -> &'static str {
        match self {
            PriorityTier::MustApply => "Exceptional match with strong odds and return",
            PriorityTier::ShouldApply => "Strong match with solid odds",
            PriorityTier::HighValueReach => "High-value award worth a long-shot attempt",
            PriorityTier::IfTimePermits => "Decent match, pursue after higher priorities",
        }
    }
}

/// Inputs to tier assignment. `success_probability` is a fraction (0-1), not
/// a percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrioritySignals {
    pub match_score: f64,
    pub success_probability: f64,
    pub strategic_value: f64,
    pub award_amount: f64,
}

pub struct PriorityRule {
    pub tier: PriorityTier,
    pub applies: fn(&PrioritySignals) -> bool,
}

/// Evaluated top to bottom. The final rule always applies.
pub const PRIORITY_RULES: [PriorityRule; 4] = [
    PriorityRule {
        tier: PriorityTier::MustApply,
        applies: |s| s.match_score >= 90.0 && s.success_probability >= 0.7 && s.strategic_value >= 3.0,
    },
    PriorityRule {
        tier: PriorityTier::ShouldApply,
        applies: |s| s.match_score >= 75.0 && s.success_probability >= 0.4,
    },
    PriorityRule {
        tier: PriorityTier::HighValueReach,
        applies: |s| s.award_amount >= 10_000.0 && s.success_probability < 0.25,
    },
    PriorityRule {
        tier: PriorityTier::IfTimePermits,
        applies: |_| true,
    },
];

pub fn assign_priority_tier(
    match_score: f64,
    success_probability: f64,
    strategic_value: f64,
    award_amount: f64,
) -> PriorityTier {
    let signals = PrioritySignals {
        match_score,
        success_probability,
        strategic_value,
        award_amount,
    };
    PRIORITY_RULES
        .iter()
        .find(|rule| (rule.applies)(&signals))
        .map(|rule| rule.tier)
        .unwrap_or(PriorityTier::IfTimePermits)
}

pub fn tier_rationale(
    tier: PriorityTier,
    match_score: f64,
    success_probability: f64,
    strategic_value: f64,
    award_amount: f64,
) -> String {
    format!(
        "{}: {} ({}% match, {}% success probability, strategic value {:.1}/10, {} award)",
        tier.as_str(),
        tier.qualifier(),
        match_score.round() as i64,
        (success_probability * 100.0).round() as i64,
        strategic_value,
        format_currency(award_amount)
    )
}

/// Whole-dollar amount with thousands separators, e.g. `$12,500`.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}
