//! Bayesian average: shrink the observed average toward an assumed prior.
//!
//! ```text
//! score = n / (n + m) × rating + m / (n + m) × prior
//! ```
//!
//! `m` (the minimum ratings threshold) acts as `m` virtual ratings at the prior.
//! Few real ratings → score stays near the prior. Many → score approaches
//! the observed average.
use crate::error::{ensure_finite, ensure_rating, ScoringError, ScoringResult};

/// Bayesian average for one item. The prior must be finite and non-negative.
/// Neither value is checked against a rating scale here; `score_with_method`
/// does that with the caller's parameters.
pub fn bayesian_score(
    average_rating: f64,
    rating_count: u64,
    minimum_threshold: u64,
    assumed_average: f64,
) -> ScoringResult<f64> {
    if minimum_threshold == 0 {
        return Err(ScoringError::InvalidThreshold(minimum_threshold));
    }
    let rating = ensure_rating(average_rating)?;
    let prior = ensure_finite("assumed average", assumed_average)?;
    if prior < 0.0 {
        return Err(ScoringError::NegativeAssumedAverage(prior));
    }

    // Exactly the prior, not a float blend that happens to land near it.
    if rating_count == 0 {
        return Ok(prior);
    }

    let n = rating_count as f64;
    let m = minimum_threshold as f64;
    let total = n + m;
    Ok((n / total) * rating + (m / total) * prior)
}
