use std::collections::BTreeMap;
use std::fmt::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::at_risk::AtRiskApplication;
use crate::effort::estimate_time_investment;
use crate::eligibility::{compare_eligibility, EligibilityStatus, EligibilitySummary};
use crate::evaluation::RankedScholarship;
use crate::models::{Scholarship, StudentProfile};
use crate::priority::{format_currency, PriorityTier};
use crate::success_tier::{classify, format_tier_display};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierSummary {
    pub tier: PriorityTier,
    pub count: usize,
    pub total_award: f64,
    pub avg_strategic_value: f64,
}

pub fn summarize_by_tier(ranked: &[RankedScholarship]) -> Vec<TierSummary> {
    let mut map: BTreeMap<PriorityTier, (usize, f64, f64)> = BTreeMap::new();

    for entry in ranked {
        let totals = map
            .entry(entry.score.priority_tier)
            .or_insert((0, 0.0, 0.0));
        totals.0 += 1;
        totals.1 += entry.award_amount;
        totals.2 += entry.score.strategic_value;
    }

    map.into_iter()
        .map(|(tier, (count, total_award, total_value))| TierSummary {
            tier,
            count,
            total_award,
            avg_strategic_value: if count == 0 {
                0.0
            } else {
                total_value / count as f64
            },
        })
        .collect()
}

pub fn build_report(
    student: Option<&str>,
    generated_on: NaiveDate,
    profile: &StudentProfile,
    scholarships: &[Scholarship],
    ranked: &[RankedScholarship],
    at_risk: &[AtRiskApplication],
    limit: usize,
) -> String {
    let summaries = summarize_by_tier(ranked);

    let mut output = String::new();
    let student_label = student.unwrap_or("student");

    let _ = writeln!(output, "# Scholarship Match Report");
    let _ = writeln!(output, "Generated for {} on {}", student_label, generated_on);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Priority Mix");

    if summaries.is_empty() {
        let _ = writeln!(output, "No scholarships evaluated.");
    } else {
        for summary in summaries.iter() {
            let _ = writeln!(
                output,
                "- {}: {} scholarships worth {} (avg strategic value {:.1})",
                summary.tier.as_str(),
                summary.count,
                format_currency(summary.total_award),
                summary.avg_strategic_value
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Top Matches");

    if ranked.is_empty() {
        let _ = writeln!(output, "No scholarships evaluated.");
    } else {
        for entry in ranked.iter().take(limit) {
            let hours = estimate_time_investment(entry.score.application_effort);
            let _ = writeln!(
                output,
                "- {} ({}): {}, {} effort ({}-{}h)",
                entry.name,
                format_currency(entry.award_amount),
                format_tier_display(&classify(entry.score.success_probability)),
                entry.score.application_effort.as_str(),
                hours.min,
                hours.max
            );
            let _ = writeln!(output, "  - {}", entry.rationale);
        }
    }

    if let Some(top) = ranked
        .first()
        .and_then(|entry| scholarships.iter().find(|s| s.id == entry.scholarship_id))
    {
        let items = compare_eligibility(profile, &top.criteria);
        let summary = EligibilitySummary::from_items(&items);
        let _ = writeln!(output);
        let _ = writeln!(output, "## Eligibility: {}", top.name);

        if items.is_empty() {
            let _ = writeln!(output, "No eligibility restrictions.");
        } else {
            let _ = writeln!(
                output,
                "{} of {} requirements met, {} partially met.",
                summary.met,
                summary.total(),
                summary.partially_met
            );
            for item in items.iter() {
                let marker = match item.status {
                    EligibilityStatus::Met => "met",
                    EligibilityStatus::PartiallyMet => "partial",
                    EligibilityStatus::NotMet => "not met",
                };
                let _ = write!(
                    output,
                    "- [{}] {}: {} (you: {})",
                    marker,
                    item.category.as_str(),
                    item.requirement,
                    item.student_value
                );
                if let Some(percentage) = item.partial_percentage {
                    let _ = write!(output, " {:.0}% of requirement", percentage);
                }
                let _ = writeln!(output);
            }
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## At-Risk Applications");

    if at_risk.is_empty() {
        let _ = writeln!(output, "No applications at risk.");
    } else {
        for flag in at_risk.iter() {
            let _ = writeln!(
                output,
                "- {} [{}] due {} ({} days, {:.0}% complete): {}",
                flag.scholarship_name,
                flag.risk_level.as_str(),
                flag.deadline.date_naive(),
                flag.days_until_deadline,
                flag.progress,
                flag.rule.as_str()
            );
            for step in flag.recovery_plan.iter() {
                let _ = write!(
                    output,
                    "  {}. {} (~{}h)",
                    step.priority, step.action, step.estimated_hours
                );
                if let Some(deadline) = step.suggested_deadline {
                    let _ = write!(output, " by {}", deadline.format("%Y-%m-%d %H:%M UTC"));
                }
                if step.blocker {
                    let _ = write!(output, " [blocker]");
                }
                let _ = writeln!(output);
            }
        }
    }

    output
}
