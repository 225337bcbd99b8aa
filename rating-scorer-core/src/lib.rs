//! rating-scorer-core: Pure-computation rating score engine.
//!
//! Average rating + rating count → weighted, Bayesian and Wilson scores.
//! No IO, no database, no UI. Just math. Bring your own ratings.
//!
//! Batch ranking identifies items by caller-provided `i64` IDs. Scores are
//! returned at full precision; round with [`round_for_display`] when showing them.
//!
//! # Quick start
//!
//! ```rust
//! use rating_scorer_core::{
//!     compute_scenario, score_all, RatingInput, ScenarioDeviation, ScoringMethod,
//!     ScoringParameters,
//! };
//!
//! let params = ScoringParameters::default(); // threshold 10, prior 3.5, 95% Wilson, 5-star scale
//! let input = RatingInput::new(4.5, 100).unwrap();
//!
//! let scores = score_all(&input, &params).unwrap();
//! println!(
//!     "weighted {:.2}, bayesian {:.2}, wilson {:.2}",
//!     scores.weighted, scores.bayesian, scores.wilson
//! );
//!
//! // Current vs. "+5% rating, -30% reviews" vs. "-5% rating, +30% reviews".
//! let set = compute_scenario(&input, &params, &ScenarioDeviation::default()).unwrap();
//! let extremes = set.extremes(ScoringMethod::Bayesian);
//! assert!(extremes.is_max(1)); // the higher-rated scenario wins under Bayesian
//! assert!(extremes.is_min(2));
//! ```

pub mod bayesian;
pub mod constants;
pub mod error;
pub mod extremes;
pub mod recalculate;
pub mod scenario;
pub mod scoring;
pub mod types;
pub mod votes;
pub mod weighted;
pub mod wilson;

// Re-export primary public API at crate root.
pub use bayesian::bayesian_score;
pub use error::{ScoringError, ScoringResult};
pub use extremes::{find_extremes, round_for_display};
pub use recalculate::{
    rank_scores, recalculate, ItemFailure, ItemRatings, RankedItem, RecalculationOptions,
    RecalculationReport,
};
pub use scenario::compute_scenario;
pub use scoring::{score_all, score_with_method};
pub use types::{
    Extremes, RatingInput, ScenarioDeviation, ScenarioSet, ScoreResult, ScoredInput,
    ScoringMethod, ScoringParameters, SortOrder,
};
pub use weighted::weighted_score;
pub use wilson::{wilson_score, wilson_score_with_z};
