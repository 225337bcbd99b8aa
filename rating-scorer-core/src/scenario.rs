//! What-if comparison scenarios.
//!
//! From one base input derive "higher rating, fewer reviews" and "lower
//! rating, more reviews", then score all three. Shows how each method trades
//! average against volume. Recomputed from scratch on every call.
use crate::error::{ensure_finite, ensure_rating, ScoringResult};
use crate::scoring::score_all_unchecked;
use crate::types::{RatingInput, ScenarioDeviation, ScenarioSet, ScoredInput, ScoringParameters};

/// Build and score the scenario set for `base`.
///
/// Deviations are percentages, normally in [0, 100]. Values outside that
/// range do not fail: derived ratings are clamped to [0, max_rating_scale]
/// and derived counts to [0, ∞).
pub fn compute_scenario(
    base: &RatingInput,
    params: &ScoringParameters,
    deviation: &ScenarioDeviation,
) -> ScoringResult<ScenarioSet> {
    params.validate()?;
    let rating_factor =
        ensure_finite("rating deviation percent", deviation.rating_deviation_percent)? / 100.0;
    let reviews_factor =
        ensure_finite("reviews deviation percent", deviation.reviews_deviation_percent)? / 100.0;
    let base_rating = ensure_rating(base.average_rating)?;
    let scale = params.max_rating_scale;

    let higher = RatingInput {
        average_rating: (base_rating * (1.0 + rating_factor)).clamp(0.0, scale),
        rating_count: scale_count(base.rating_count, 1.0 - reviews_factor),
    };
    let lower = RatingInput {
        average_rating: (base_rating * (1.0 - rating_factor)).clamp(0.0, scale),
        rating_count: scale_count(base.rating_count, 1.0 + reviews_factor),
    };

    Ok(ScenarioSet {
        current: score_input(*base, params)?,
        higher: score_input(higher, params)?,
        lower: score_input(lower, params)?,
    })
}

fn score_input(input: RatingInput, params: &ScoringParameters) -> ScoringResult<ScoredInput> {
    Ok(ScoredInput {
        input,
        scores: score_all_unchecked(&input, params)?,
    })
}

/// `max(0, round(count × factor))`. The float-to-int cast saturates on overflow.
fn scale_count(count: u64, factor: f64) -> u64 {
    let scaled = (count as f64 * factor).round();
    if scaled <= 0.0 {
        0
    } else {
        scaled as u64
    }
}
