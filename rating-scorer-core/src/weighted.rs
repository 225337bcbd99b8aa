//! Logarithmic volume weighting: `rating × log10(count + 1)`.
//!
//! Unbounded above. Every extra order of magnitude of ratings adds one more
//! "rating's worth" of score, so high-volume items rise without letting
//! volume completely swamp the average.
use crate::error::{ensure_rating, ScoringResult};

/// Weighted score for one item.
///
/// Zero ratings always score exactly 0, whatever the average. The rating is
/// not checked against the scale; callers clamp upstream.
pub fn weighted_score(average_rating: f64, rating_count: u64) -> ScoringResult<f64> {
    let rating = ensure_rating(average_rating)?;
    if rating_count == 0 {
        return Ok(0.0);
    }
    Ok(rating * (rating_count as f64 + 1.0).log10())
}
