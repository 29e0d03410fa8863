use serde::{Deserialize, Serialize};

use crate::models::{EssayPrompts, Scholarship};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffortLevel {
    Low,
    Medium,
    High,
}

impl EffortLevel {
    /// Share of expected value kept after accounting for application workload.
    pub fn multiplier(&self) -> f64 {
        match self {
            EffortLevel::Low => 1.0,
            EffortLevel::Medium => 0.7,
            EffortLevel::High => 0.4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EffortLevel::Low => "LOW",
            EffortLevel::Medium => "MEDIUM",
            EffortLevel::High => "HIGH",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EffortInputs<'a> {
    pub essay_prompts: Option<&'a EssayPrompts>,
    pub required_documents: Option<&'a [String]>,
    pub recommendation_count: Option<u32>,
}

impl<'a> From<&'a Scholarship> for EffortInputs<'a> {
    fn from(scholarship: &'a Scholarship) -> Self {
        Self {
            essay_prompts: scholarship.essay_prompts.as_ref(),
            required_documents: scholarship.required_documents.as_deref(),
            recommendation_count: scholarship.recommendation_count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffortBreakdown {
    pub essays: usize,
    pub documents: usize,
    pub recommendations: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffortEstimate {
    pub level: EffortLevel,
    pub multiplier: f64,
    pub breakdown: EffortBreakdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub min: u32,
    pub max: u32,
}

pub fn estimate_effort(inputs: &EffortInputs<'_>) -> EffortEstimate {
    let breakdown = EffortBreakdown {
        essays: inputs.essay_prompts.map(EssayPrompts::len).unwrap_or(0),
        documents: inputs.required_documents.map(<[String]>::len).unwrap_or(0),
        recommendations: inputs.recommendation_count.unwrap_or(0),
    };

    let level = effort_level(&breakdown);
    EffortEstimate {
        level,
        multiplier: level.multiplier(),
        breakdown,
    }
}

fn effort_level(breakdown: &EffortBreakdown) -> EffortLevel {
    if breakdown.essays >= 3 || breakdown.documents >= 5 || breakdown.recommendations >= 2 {
        EffortLevel::High
    } else if breakdown.essays >= 2 || breakdown.documents >= 3 || breakdown.recommendations >= 1
    {
        EffortLevel::Medium
    } else {
        EffortLevel::Low
    }
}

/// Expected hours to complete an application at the given effort level.
pub fn estimate_time_investment(level: EffortLevel) -> TimeRange {
    match level {
        EffortLevel::Low => TimeRange { min: 2, max: 3 },
        EffortLevel::Medium => TimeRange { min: 4, max: 6 },
        EffortLevel::High => TimeRange { min: 8, max: 12 },
    }
}
