use serde::{Deserialize, Serialize};

use crate::effort::EffortLevel;

pub const MAX_STRATEGIC_VALUE: f64 = 10.0;
const DOLLARS_PER_POINT: f64 = 1000.0;
const MAX_MATCH_BOOST: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategicValueInputs {
    pub match_score: f64,
    /// Percent, 0-100.
    pub success_probability: f64,
    pub award_amount: f64,
    pub effort_level: EffortLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategicValue {
    pub strategic_value: f64,
    pub expected_value: f64,
    pub effort_adjusted_value: f64,
}

impl StrategicValue {
    fn zero() -> Self {
        Self {
            strategic_value: 0.0,
            expected_value: 0.0,
            effort_adjusted_value: 0.0,
        }
    }
}

/// Return-on-effort score in [0, 10]: one point per $1,000 of effort-adjusted
/// expected award.
pub fn calculate_strategic_value(inputs: &StrategicValueInputs) -> StrategicValue {
    if !is_positive(inputs.award_amount) || !is_positive(inputs.success_probability) {
        return StrategicValue::zero();
    }

    let expected_value = inputs.award_amount * (inputs.success_probability / 100.0);
    let effort_adjusted_value = expected_value * inputs.effort_level.multiplier();

    StrategicValue {
        strategic_value: clamp_value(effort_adjusted_value / DOLLARS_PER_POINT),
        expected_value,
        effort_adjusted_value,
    }
}

/// Same as [`calculate_strategic_value`] with a linear bonus of up to 10% for
/// the match score, re-clamped to [0, 10].
pub fn calculate_strategic_value_with_match_boost(inputs: &StrategicValueInputs) -> StrategicValue {
    let base = calculate_strategic_value(inputs);
    let boost = match_boost(inputs.match_score);
    StrategicValue {
        strategic_value: clamp_value(base.strategic_value * boost),
        ..base
    }
}

pub fn match_boost(match_score: f64) -> f64 {
    let match_score = if match_score.is_nan() {
        0.0
    } else {
        match_score.clamp(0.0, 100.0)
    };
    1.0 + (match_score / 100.0) * MAX_MATCH_BOOST
}

fn is_positive(value: f64) -> bool {
    value > 0.0
}

fn clamp_value(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, MAX_STRATEGIC_VALUE)
    }
}
