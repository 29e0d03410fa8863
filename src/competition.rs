use crate::models::Scholarship;

pub const MIN_COMPETITION_FACTOR: f64 = 0.05;
pub const MAX_COMPETITION_FACTOR: f64 = 0.95;
pub const DEFAULT_COMPETITION_FACTOR: f64 = 0.30;
const POOL_ESTIMATE_CEILING: f64 = 0.8;

/// Expected acceptance probability for a scholarship, always within
/// [0.05, 0.95].
///
/// A published acceptance rate wins. Otherwise the applicant pool size is used
/// to estimate one, and with neither the factor falls back to 0.30.
pub fn competition_factor(scholarship: &Scholarship) -> f64 {
    if let Some(rate) = scholarship
        .acceptance_rate
        .filter(|rate| !rate.is_nan() && *rate != 0.0)
    {
        return clamp_factor(rate);
    }

    if let Some(pool) = scholarship.applicant_pool_size.filter(|pool| *pool > 0) {
        let awards = scholarship.number_of_awards.unwrap_or(1) as f64;
        let estimate = ((awards * 100.0) / pool as f64).min(POOL_ESTIMATE_CEILING);
        return clamp_factor(estimate);
    }

    DEFAULT_COMPETITION_FACTOR
}

fn clamp_factor(value: f64) -> f64 {
    value.clamp(MIN_COMPETITION_FACTOR, MAX_COMPETITION_FACTOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn scholarship(
        acceptance_rate: Option<f64>,
        applicant_pool_size: Option<i64>,
        number_of_awards: Option<u32>,
    ) -> Scholarship {
        Scholarship {
            id: Uuid::new_v4(),
            name: "Community Leaders Award".to_string(),
            provider: None,
            award_amount: 5000.0,
            number_of_awards,
            acceptance_rate,
            applicant_pool_size,
            deadline: None,
            essay_prompts: None,
            required_documents: None,
            recommendation_count: None,
            criteria: Default::default(),
        }
    }

    #[test]
    fn acceptance_rate_is_used_directly() {
        assert_eq!(competition_factor(&scholarship(Some(0.42), Some(50), None)), 0.42);
        assert_eq!(competition_factor(&scholarship(Some(0.99), None, None)), 0.95);
        assert_eq!(competition_factor(&scholarship(Some(0.01), None, None)), 0.05);
    }

    #[test]
    fn negative_acceptance_rate_clamps_to_floor() {
        assert_eq!(competition_factor(&scholarship(Some(-0.3), None, None)), 0.05);
    }

    #[test]
    fn pool_size_estimates_when_rate_missing() {
        let factor = competition_factor(&scholarship(None, Some(1000), Some(4)));
        assert!((factor - 0.4).abs() < 1e-9);

        let capped = competition_factor(&scholarship(None, Some(100), Some(5)));
        assert_eq!(capped, 0.8);

        let default_awards = competition_factor(&scholarship(None, Some(400), None));
        assert!((default_awards - 0.25).abs() < 1e-9);
    }

    #[test]
    fn zero_awards_yield_minimum_factor() {
        assert_eq!(competition_factor(&scholarship(None, Some(500), Some(0))), 0.05);
    }

    #[test]
    fn non_positive_pool_falls_back_to_default() {
        assert_eq!(competition_factor(&scholarship(None, Some(0), Some(3))), 0.30);
        assert_eq!(competition_factor(&scholarship(None, Some(-20), Some(3))), 0.30);
        assert_eq!(competition_factor(&scholarship(Some(0.0), None, None)), 0.30);
        assert_eq!(competition_factor(&scholarship(None, None, None)), 0.30);
    }

    #[test]
    fn factor_stays_within_bounds_for_extremes() {
        let rates = [None, Some(-1e9), Some(-0.5), Some(1e-12), Some(0.5), Some(7.0), Some(f64::INFINITY), Some(f64::NAN)];
        let pools = [None, Some(i64::MIN), Some(-1), Some(0), Some(1), Some(10_000), Some(i64::MAX)];
        let awards = [None, Some(0), Some(1), Some(u32::MAX)];
        for rate in rates {
            for pool in pools {
                for award in awards {
                    let factor = competition_factor(&scholarship(rate, pool, award));
                    assert!(
                        (MIN_COMPETITION_FACTOR..=MAX_COMPETITION_FACTOR).contains(&factor),
                        "factor {factor} out of range for {rate:?} {pool:?} {award:?}"
                    );
                }
            }
        }
    }
}
