//! Wilson score interval lower bound, rescaled to the rating scale.
//!
//! The average rating is read as a success proportion `p = rating / scale`
//! observed over `n` samples. The lower end of the two-sided Wilson interval
//! is a pessimistic estimate of the true proportion:
//!
//! ```text
//! center      = p + z² / 2n
//! margin      = z × sqrt((p(1 − p) + z² / 4n) / n)
//! denominator = 1 + z² / n
//! score       = (center − margin) / denominator × scale
//! ```
//!
//! See https://www.evanmiller.org/how-not-to-sort-by-average-rating.html
use crate::constants::WILSON_Z_95;
use crate::error::{ensure_finite, ensure_rating, ScoringError, ScoringResult};

/// Wilson lower bound at 95% confidence.
pub fn wilson_score(
    average_rating: f64,
    rating_count: u64,
    max_rating_scale: f64,
) -> ScoringResult<f64> {
    wilson_score_with_z(average_rating, rating_count, max_rating_scale, WILSON_Z_95)
}

/// Wilson lower bound with an explicit confidence constant.
///
/// Returns exactly 0 for zero ratings. The result is clamped to
/// `[0, average_rating]` so float error near `p = 0` or `p = 1` stays in range.
pub fn wilson_score_with_z(
    average_rating: f64,
    rating_count: u64,
    max_rating_scale: f64,
    z: f64,
) -> ScoringResult<f64> {
    let scale = ensure_finite("max rating scale", max_rating_scale)?;
    if scale <= 0.0 {
        return Err(ScoringError::InvalidScale(scale));
    }
    let z = ensure_finite("confidence z", z)?;
    if z <= 0.0 {
        return Err(ScoringError::InvalidConfidence(z));
    }
    let rating = ensure_rating(average_rating)?;
    if rating > scale {
        return Err(ScoringError::RatingOutOfScale { rating, scale });
    }

    if rating_count == 0 {
        return Ok(0.0);
    }

    let n = rating_count as f64;
    let p = rating / scale;
    let z2 = z * z;

    let center = p + z2 / (2.0 * n);
    let margin = z * ((p * (1.0 - p) + z2 / (4.0 * n)) / n).sqrt();
    let denominator = 1.0 + z2 / n;
    let lower_bound = ((center - margin) / denominator).max(0.0);

    Ok((lower_bound * scale).min(rating))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_wilson_zero_ratings_is_zero() {
        for rating in [0.0, 2.5, 4.0, 5.0] {
            assert_eq!(wilson_score(rating, 0, 5.0), Ok(0.0));
        }
    }

    #[test]
    fn test_wilson_known_values() {
        // Reference proportions: 80/100, 10/10 and 1/2 successes.
        assert_approx(wilson_score(4.0, 100, 5.0).unwrap(), 0.7111690380734976 * 5.0);
        assert_approx(wilson_score(5.0, 10, 5.0).unwrap(), 0.7224598312333834 * 5.0);
        assert_approx(wilson_score(2.5, 2, 5.0).unwrap(), 0.09452865480086611 * 5.0);
    }

    #[test]
    fn test_wilson_basic_below_rating() {
        let score = wilson_score(4.0, 100, 5.0).unwrap();
        assert!(score > 3.5 && score < 3.6, "got {score}");
    }

    #[test]
    fn test_wilson_perfect_rating() {
        let score = wilson_score(5.0, 100, 5.0).unwrap();
        assert!(score > 4.8 && score < 5.0, "got {score}");
    }

    #[test]
    fn test_wilson_single_rating_is_conservative() {
        let score = wilson_score(5.0, 1, 5.0).unwrap();
        assert!(score > 1.0 && score < 1.1, "got {score}");
    }

    #[test]
    fn test_wilson_volume_increases_confidence() {
        let few = wilson_score(5.0, 5, 5.0).unwrap();
        let many = wilson_score(5.0, 1000, 5.0).unwrap();
        assert!(many > few);
    }

    #[test]
    fn test_wilson_zero_rating_never_negative() {
        for n in [1, 2, 10, 1000, 1_000_000] {
            let score = wilson_score(0.0, n, 5.0).unwrap();
            assert!(score >= 0.0, "n={n}: {score}");
            assert!(score <= 1e-12, "n={n}: {score}");
        }
        assert!(wilson_score(1.0, 1, 5.0).unwrap() >= 0.0);
    }

    #[test]
    fn test_wilson_other_scales() {
        // Same proportion on a 10-point scale scores exactly double.
        let five = wilson_score(4.0, 100, 5.0).unwrap();
        let ten = wilson_score(8.0, 100, 10.0).unwrap();
        assert!((ten - 2.0 * five).abs() < 1e-9);
    }

    #[test]
    fn test_wilson_wider_interval_is_lower() {
        let z95 = wilson_score_with_z(4.0, 50, 5.0, 1.96).unwrap();
        let z99 = wilson_score_with_z(4.0, 50, 5.0, 2.576).unwrap();
        assert!(z99 < z95);
    }

    #[test]
    fn test_wilson_rejects_bad_input() {
        assert_eq!(
            wilson_score(5.5, 10, 5.0),
            Err(ScoringError::RatingOutOfScale {
                rating: 5.5,
                scale: 5.0
            })
        );
        assert_eq!(wilson_score(-1.0, 10, 5.0), Err(ScoringError::NegativeRating(-1.0)));
        assert_eq!(wilson_score(4.0, 10, 0.0), Err(ScoringError::InvalidScale(0.0)));
        assert_eq!(
            wilson_score_with_z(4.0, 10, 5.0, 0.0),
            Err(ScoringError::InvalidConfidence(0.0))
        );
    }

    /// Lower bound never exceeds the raw rating and never shrinks as ratings accumulate.
    #[test]
    fn test_wilson_bound_and_monotonicity_sweep() {
        let mut rng = SmallRng::seed_from_u64(7);

        for _ in 0..1000 {
            let rating: f64 = rng.random_range(0.0..=5.0);
            let n1: u64 = rng.random_range(1..5_000);
            let n2: u64 = n1 + rng.random_range(1..5_000);

            let s1 = wilson_score(rating, n1, 5.0).unwrap();
            let s2 = wilson_score(rating, n2, 5.0).unwrap();

            assert!(s1 >= 0.0 && s2 >= 0.0);
            assert!(s1 <= rating, "n={n1} rating={rating}: {s1} exceeds rating");
            assert!(s2 <= rating, "n={n2} rating={rating}: {s2} exceeds rating");
            assert!(s2 >= s1 - 1e-12, "rating={rating}: n={n1} -> {s1}, n={n2} -> {s2}");
        }
    }
}
