/// Normal-approximation z value for a two-sided 95% confidence interval.
/// Used as the Wilson lower-bound confidence constant.
pub const WILSON_Z_95: f64 = 1.96;

/// Top of the rating scale. Ratings live in [0, DEFAULT_MAX_RATING_SCALE].
pub const DEFAULT_MAX_RATING_SCALE: f64 = 5.0;

/// Bayesian prior weight: how many "virtual" ratings at the assumed average
/// every item starts with. A per-field-mapping setting; 10 is the mapping default.
pub const DEFAULT_MINIMUM_RATINGS_THRESHOLD: u64 = 10;

/// Bayesian prior: the score a brand-new item starts with before any ratings.
/// System-wide setting, 3.5 on a 5-star scale.
pub const DEFAULT_ASSUMED_AVERAGE: f64 = 3.5;

/// Scenario comparison defaults. Applied as +X% / -X% on the rating and
/// -Y% / +Y% on the number of reviews.
pub const DEFAULT_RATING_DEVIATION_PERCENT: f64 = 5.0;
pub const DEFAULT_REVIEWS_DEVIATION_PERCENT: f64 = 30.0;

/// Scores are shown with this many decimals. Extremes are compared after
/// rounding to the same precision.
pub const DISPLAY_DECIMALS: i32 = 2;

/// Half a display unit. Two rounded scores closer than this are the same score.
pub const DEFAULT_EXTREMES_TOLERANCE: f64 = 0.005;

/// Number of items scored per batch during recalculation.
pub const DEFAULT_BATCH_SIZE: usize = 50;
