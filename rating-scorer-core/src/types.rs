use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_ASSUMED_AVERAGE, DEFAULT_MAX_RATING_SCALE, DEFAULT_MINIMUM_RATINGS_THRESHOLD,
    DEFAULT_RATING_DEVIATION_PERCENT, DEFAULT_REVIEWS_DEVIATION_PERCENT, WILSON_Z_95,
};
use crate::error::{ensure_finite, ensure_rating, ScoringError, ScoringResult};

/// One item's observed rating data at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RatingInput {
    /// Mean of all ratings received, on the [0, max_rating_scale] scale.
    pub average_rating: f64,
    /// Number of ratings received.
    pub rating_count: u64,
}

impl RatingInput {
    /// Validated constructor. The rating must be finite and non-negative.
    pub fn new(average_rating: f64, rating_count: u64) -> ScoringResult<Self> {
        Ok(RatingInput {
            average_rating: ensure_rating(average_rating)?,
            rating_count,
        })
    }

    /// Build from raw caller data with a signed count.
    pub fn from_raw(average_rating: f64, rating_count: i64) -> ScoringResult<Self> {
        let count = u64::try_from(rating_count)
            .map_err(|_| ScoringError::NegativeRatingCount(rating_count))?;
        Self::new(average_rating, count)
    }
}

/// Caller-supplied configuration for a scoring call. Never mutated by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoringParameters {
    /// Bayesian prior weight. Must be at least 1.
    pub minimum_ratings_threshold: u64,
    /// Bayesian prior mean.
    pub assumed_average: f64,
    /// Wilson confidence constant.
    pub confidence_z: f64,
    pub max_rating_scale: f64,
}

impl Default for ScoringParameters {
    fn default() -> Self {
        ScoringParameters {
            minimum_ratings_threshold: DEFAULT_MINIMUM_RATINGS_THRESHOLD,
            assumed_average: DEFAULT_ASSUMED_AVERAGE,
            confidence_z: WILSON_Z_95,
            max_rating_scale: DEFAULT_MAX_RATING_SCALE,
        }
    }
}

impl ScoringParameters {
    /// Check every field. Called once per public entry point, so a bad
    /// configuration fails before anything is scored.
    pub fn validate(&self) -> ScoringResult<()> {
        if self.minimum_ratings_threshold == 0 {
            return Err(ScoringError::InvalidThreshold(self.minimum_ratings_threshold));
        }

        let scale = ensure_finite("max rating scale", self.max_rating_scale)?;
        if scale <= 0.0 {
            return Err(ScoringError::InvalidScale(scale));
        }

        let z = ensure_finite("confidence z", self.confidence_z)?;
        if z <= 0.0 {
            return Err(ScoringError::InvalidConfidence(z));
        }

        let prior = ensure_finite("assumed average", self.assumed_average)?;
        if !(0.0..=scale).contains(&prior) {
            return Err(ScoringError::AssumedAverageOutOfScale { value: prior, scale });
        }

        Ok(())
    }
}

/// How far to perturb a base input when building comparison scenarios.
/// Expected in [0, 100]; out-of-range values are tolerated and the derived
/// inputs are clamped instead.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioDeviation {
    pub rating_deviation_percent: f64,
    pub reviews_deviation_percent: f64,
}

impl Default for ScenarioDeviation {
    fn default() -> Self {
        ScenarioDeviation {
            rating_deviation_percent: DEFAULT_RATING_DEVIATION_PERCENT,
            reviews_deviation_percent: DEFAULT_REVIEWS_DEVIATION_PERCENT,
        }
    }
}

/// Scores for one input under all three methods. Full precision;
/// rounding for display is the caller's job.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreResult {
    pub weighted: f64,
    pub bayesian: f64,
    pub wilson: f64,
}

impl ScoreResult {
    pub fn get(&self, method: ScoringMethod) -> f64 {
        match method {
            ScoringMethod::Weighted => self.weighted,
            ScoringMethod::Bayesian => self.bayesian,
            ScoringMethod::Wilson => self.wilson,
        }
    }
}

/// An input together with its scores.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredInput {
    pub input: RatingInput,
    pub scores: ScoreResult,
}

/// Base input plus the two what-if scenarios derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioSet {
    pub current: ScoredInput,
    /// Higher rating, fewer reviews.
    pub higher: ScoredInput,
    /// Lower rating, more reviews.
    pub lower: ScoredInput,
}

impl ScenarioSet {
    /// One method's scores in display order: current, higher, lower.
    pub fn method_scores(&self, method: ScoringMethod) -> [f64; 3] {
        [
            self.current.scores.get(method),
            self.higher.scores.get(method),
            self.lower.scores.get(method),
        ]
    }
}

/// Positions of the highest and lowest rounded scores in a sequence.
/// Both sets are empty when every score rounds to the same value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extremes {
    pub max_indices: BTreeSet<usize>,
    pub min_indices: BTreeSet<usize>,
}

impl Extremes {
    pub fn is_max(&self, index: usize) -> bool {
        self.max_indices.contains(&index)
    }

    pub fn is_min(&self, index: usize) -> bool {
        self.min_indices.contains(&index)
    }

    pub fn is_empty(&self) -> bool {
        self.max_indices.is_empty() && self.min_indices.is_empty()
    }
}

/// Which of the three formulas to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScoringMethod {
    /// rating × log10(count + 1)
    Weighted,
    /// Shrinkage toward the assumed average.
    #[default]
    Bayesian,
    /// Wilson lower confidence bound, rescaled to the rating scale.
    Wilson,
}

impl ScoringMethod {
    pub const ALL: [ScoringMethod; 3] = [
        ScoringMethod::Weighted,
        ScoringMethod::Bayesian,
        ScoringMethod::Wilson,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringMethod::Weighted => "weighted",
            ScoringMethod::Bayesian => "bayesian",
            ScoringMethod::Wilson => "wilson",
        }
    }

    /// Human-readable label for tables.
    pub fn label(&self) -> &'static str {
        match self {
            ScoringMethod::Weighted => "Weighted",
            ScoringMethod::Bayesian => "Bayesian",
            ScoringMethod::Wilson => "Wilson",
        }
    }
}

impl fmt::Display for ScoringMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoringMethod {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weighted" => Ok(ScoringMethod::Weighted),
            "bayesian" => Ok(ScoringMethod::Bayesian),
            "wilson" => Ok(ScoringMethod::Wilson),
            _ => Err(ScoringError::UnknownMethod(s.to_string())),
        }
    }
}

/// Direction for ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SortOrder {
    Ascending,
    /// Highest score first.
    #[default]
    Descending,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_input_validation() {
        assert!(RatingInput::new(4.5, 100).is_ok());
        assert_eq!(RatingInput::new(-1.0, 3), Err(ScoringError::NegativeRating(-1.0)));
        assert_eq!(
            RatingInput::from_raw(4.0, -2),
            Err(ScoringError::NegativeRatingCount(-2))
        );
        assert_eq!(
            RatingInput::from_raw(4.0, 12),
            Ok(RatingInput {
                average_rating: 4.0,
                rating_count: 12
            })
        );
    }

    #[test]
    fn test_default_parameters_are_valid() {
        let params = ScoringParameters::default();
        assert_eq!(params.minimum_ratings_threshold, 10);
        assert_eq!(params.assumed_average, 3.5);
        assert_eq!(params.confidence_z, 1.96);
        assert_eq!(params.max_rating_scale, 5.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_parameter_validation() {
        let base = ScoringParameters::default();

        let zero_threshold = ScoringParameters {
            minimum_ratings_threshold: 0,
            ..base
        };
        assert_eq!(zero_threshold.validate(), Err(ScoringError::InvalidThreshold(0)));

        let bad_scale = ScoringParameters {
            max_rating_scale: 0.0,
            ..base
        };
        assert_eq!(bad_scale.validate(), Err(ScoringError::InvalidScale(0.0)));

        let bad_z = ScoringParameters {
            confidence_z: -1.0,
            ..base
        };
        assert_eq!(bad_z.validate(), Err(ScoringError::InvalidConfidence(-1.0)));

        let bad_prior = ScoringParameters {
            assumed_average: 5.5,
            ..base
        };
        assert_eq!(
            bad_prior.validate(),
            Err(ScoringError::AssumedAverageOutOfScale {
                value: 5.5,
                scale: 5.0
            })
        );

        let nan_prior = ScoringParameters {
            assumed_average: f64::NAN,
            ..base
        };
        assert!(matches!(nan_prior.validate(), Err(ScoringError::NonFinite { .. })));
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("weighted".parse::<ScoringMethod>(), Ok(ScoringMethod::Weighted));
        assert_eq!(" Bayesian ".parse::<ScoringMethod>(), Ok(ScoringMethod::Bayesian));
        assert_eq!("WILSON".parse::<ScoringMethod>(), Ok(ScoringMethod::Wilson));
        assert_eq!(
            "invalid_method".parse::<ScoringMethod>(),
            Err(ScoringError::UnknownMethod("invalid_method".to_string()))
        );

        for method in ScoringMethod::ALL {
            assert_eq!(method.to_string().parse::<ScoringMethod>(), Ok(method));
        }
    }

    #[test]
    fn test_score_result_get() {
        let scores = ScoreResult {
            weighted: 8.0,
            bayesian: 3.9,
            wilson: 3.5,
        };
        assert_eq!(scores.get(ScoringMethod::Weighted), 8.0);
        assert_eq!(scores.get(ScoringMethod::Bayesian), 3.9);
        assert_eq!(scores.get(ScoringMethod::Wilson), 3.5);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&ScoringMethod::Wilson).unwrap(), "\"wilson\"");
        assert_eq!(serde_json::to_string(&SortOrder::Ascending).unwrap(), "\"ascending\"");

        let input: RatingInput =
            serde_json::from_str(r#"{"average_rating": 4.2, "rating_count": 31}"#).unwrap();
        assert_eq!(
            input,
            RatingInput {
                average_rating: 4.2,
                rating_count: 31
            }
        );

        let extremes = Extremes {
            max_indices: [2].into_iter().collect(),
            min_indices: [0, 1].into_iter().collect(),
        };
        let json = serde_json::to_value(&extremes).unwrap();
        assert_eq!(json, serde_json::json!({"max_indices": [2], "min_indices": [0, 1]}));
    }
}
