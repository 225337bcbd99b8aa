use thiserror::Error;

/// Invalid input or parameter passed to the scoring engine.
///
/// The engine never returns `NaN` or infinity for bad input. Anything that
/// would produce one is rejected here instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("minimum ratings threshold must be at least 1, got {0}")]
    InvalidThreshold(u64),

    #[error("{name} must be a finite number, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("average rating must not be negative, got {0}")]
    NegativeRating(f64),

    #[error("average rating {rating} is outside the rating scale [0, {scale}]")]
    RatingOutOfScale { rating: f64, scale: f64 },

    #[error("rating count must not be negative, got {0}")]
    NegativeRatingCount(i64),

    #[error("vote value must be finite and non-negative, got {0}")]
    InvalidVote(f64),

    #[error("max rating scale must be positive, got {0}")]
    InvalidScale(f64),

    #[error("confidence z must be positive, got {0}")]
    InvalidConfidence(f64),

    #[error("assumed average must not be negative, got {0}")]
    NegativeAssumedAverage(f64),

    #[error("assumed average {value} is outside the rating scale [0, {scale}]")]
    AssumedAverageOutOfScale { value: f64, scale: f64 },

    #[error("unknown scoring method \"{0}\" (expected weighted, bayesian or wilson)")]
    UnknownMethod(String),
}

pub type ScoringResult<T> = Result<T, ScoringError>;

/// Reject NaN and infinities for a named parameter.
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> ScoringResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScoringError::NonFinite { name, value })
    }
}

/// Validate an average rating: finite and non-negative. No upper bound.
pub(crate) fn ensure_rating(value: f64) -> ScoringResult<f64> {
    let value = ensure_finite("average rating", value)?;
    if value < 0.0 {
        return Err(ScoringError::NegativeRating(value));
    }
    Ok(value)
}
