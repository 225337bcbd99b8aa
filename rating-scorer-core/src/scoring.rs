//! Unified scoring entry points.
//!
//! One input, one parameters struct. Pure functions with no IO or state.
use crate::bayesian::bayesian_score;
use crate::error::{ScoringError, ScoringResult};
use crate::types::{RatingInput, ScoreResult, ScoringMethod, ScoringParameters};
use crate::weighted::weighted_score;
use crate::wilson::wilson_score_with_z;

/// Score one input under all three methods.
pub fn score_all(input: &RatingInput, params: &ScoringParameters) -> ScoringResult<ScoreResult> {
    params.validate()?;
    score_all_unchecked(input, params)
}

/// Score one input under a single method.
pub fn score_with_method(
    input: &RatingInput,
    params: &ScoringParameters,
    method: ScoringMethod,
) -> ScoringResult<f64> {
    params.validate()?;
    score_with_method_unchecked(input, params, method)
}

/// Same as `score_all`, for callers that already validated `params`.
pub(crate) fn score_all_unchecked(
    input: &RatingInput,
    params: &ScoringParameters,
) -> ScoringResult<ScoreResult> {
    Ok(ScoreResult {
        weighted: score_with_method_unchecked(input, params, ScoringMethod::Weighted)?,
        bayesian: score_with_method_unchecked(input, params, ScoringMethod::Bayesian)?,
        wilson: score_with_method_unchecked(input, params, ScoringMethod::Wilson)?,
    })
}

pub(crate) fn score_with_method_unchecked(
    input: &RatingInput,
    params: &ScoringParameters,
    method: ScoringMethod,
) -> ScoringResult<f64> {
    match method {
        ScoringMethod::Weighted => weighted_score(input.average_rating, input.rating_count),
        ScoringMethod::Bayesian => {
            // A blend of two in-scale values stays in scale.
            if input.average_rating > params.max_rating_scale {
                return Err(ScoringError::RatingOutOfScale {
                    rating: input.average_rating,
                    scale: params.max_rating_scale,
                });
            }
            bayesian_score(
                input.average_rating,
                input.rating_count,
                params.minimum_ratings_threshold,
                params.assumed_average,
            )
        }
        ScoringMethod::Wilson => wilson_score_with_z(
            input.average_rating,
            input.rating_count,
            params.max_rating_scale,
            params.confidence_z,
        ),
    }
}
