use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuccessTier {
    StrongMatch,
    CompetitiveMatch,
    Reach,
    LongShot,
}

impl SuccessTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuccessTier::StrongMatch => "STRONG_MATCH",
            SuccessTier::CompetitiveMatch => "COMPETITIVE_MATCH",
            SuccessTier::Reach => "REACH",
            SuccessTier::LongShot => "LONG_SHOT",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SuccessTier::StrongMatch => "Strong Match",
            SuccessTier::CompetitiveMatch => "Competitive Match",
            SuccessTier::Reach => "Reach",
            SuccessTier::LongShot => "Long-Shot",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SuccessTier::StrongMatch => "Apply immediately, high confidence",
            SuccessTier::CompetitiveMatch => "Solid opportunity, worth effort",
            SuccessTier::Reach => "Long shot, but possible",
            SuccessTier::LongShot => "Very competitive, consider if high value",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessTierResult {
    pub tier: SuccessTier,
    pub label: String,
    pub description: String,
    pub color: String,
    pub probability: f64,
}

/// Buckets a success probability given in percent. The probability is copied
/// into the result unchanged, even when outside 0-100.
pub fn classify(probability: f64) -> SuccessTierResult {
    let tier = if probability >= 70.0 {
        SuccessTier::StrongMatch
    } else if probability >= 40.0 {
        SuccessTier::CompetitiveMatch
    } else if probability >= 10.0 {
        SuccessTier::Reach
    } else {
        SuccessTier::LongShot
    };

    SuccessTierResult {
        tier,
        label: tier.label().to_string(),
        description: tier.description().to_string(),
        color: tier_color(tier).to_string(),
        probability,
    }
}

/// Color names are consumed verbatim by presentation code.
pub fn tier_color(tier: SuccessTier) -> &'static str {
    match tier {
        SuccessTier::StrongMatch => "green",
        SuccessTier::CompetitiveMatch => "blue",
        SuccessTier::Reach => "orange",
        SuccessTier::LongShot => "red",
    }
}

pub fn format_tier_display(result: &SuccessTierResult) -> String {
    format!(
        "{}% success probability - {}",
        result.probability, result.label
    )
}

/// Blends the competition factor with overall match quality into a percent.
///
/// A perfect match lifts the base acceptance rate by half; a zero match halves
/// it.
pub fn success_probability(overall_match: f64, competition_factor: f64) -> f64 {
    let match_multiplier = 0.5 + overall_match.clamp(0.0, 100.0) / 100.0;
    let probability = competition_factor * match_multiplier * 100.0;
    if probability.is_nan() {
        0.0
    } else {
        probability.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_use_inclusive_lower_bounds() {
        assert_eq!(classify(70.0).tier, SuccessTier::StrongMatch);
        assert_eq!(classify(69.5).tier, SuccessTier::CompetitiveMatch);
        assert_eq!(classify(40.0).tier, SuccessTier::CompetitiveMatch);
        assert_eq!(classify(39.99).tier, SuccessTier::Reach);
        assert_eq!(classify(10.0).tier, SuccessTier::Reach);
        assert_eq!(classify(9.99).tier, SuccessTier::LongShot);
        assert_eq!(classify(-5.0).tier, SuccessTier::LongShot);
    }

    #[test]
    fn out_of_range_probability_is_passed_through() {
        let result = classify(150.0);
        assert_eq!(result.tier, SuccessTier::StrongMatch);
        assert_eq!(result.probability, 150.0);
    }

    #[test]
    fn result_carries_display_metadata() {
        let result = classify(25.0);
        assert_eq!(result.label, "Reach");
        assert_eq!(result.color, "orange");
        assert_eq!(result.description, "Long shot, but possible");
        assert_eq!(tier_color(SuccessTier::StrongMatch), "green");
        assert_eq!(tier_color(SuccessTier::CompetitiveMatch), "blue");
        assert_eq!(tier_color(SuccessTier::LongShot), "red");
    }

    #[test]
    fn display_does_not_round_probability() {
        assert_eq!(
            format_tier_display(&classify(69.5)),
            "69.5% success probability - Competitive Match"
        );
        assert_eq!(
            format_tier_display(&classify(85.0)),
            "85% success probability - Strong Match"
        );
        assert_eq!(
            format_tier_display(&classify(3.0)),
            "3% success probability - Long-Shot"
        );
    }

    #[test]
    fn serializes_tier_with_verbatim_spelling() {
        let json = serde_json::to_value(classify(72.0)).expect("serializes");
        assert_eq!(json["tier"], "STRONG_MATCH");
        assert_eq!(json["label"], "Strong Match");
    }

    #[test]
    fn probability_blend_scales_with_match() {
        assert!((success_probability(100.0, 0.4) - 60.0).abs() < 1e-9);
        assert!((success_probability(0.0, 0.4) - 20.0).abs() < 1e-9);
        assert_eq!(success_probability(100.0, 0.95), 100.0);
    }
}
