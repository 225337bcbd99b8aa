//! Highest/lowest score detection for display emphasis.
//!
//! Scores are compared at display precision so float noise never makes two
//! visually identical numbers look ranked.
use crate::constants::{DEFAULT_EXTREMES_TOLERANCE, DISPLAY_DECIMALS};
use crate::types::{Extremes, ScenarioSet, ScoringMethod};

/// Round a score to `DISPLAY_DECIMALS` places.
pub fn round_for_display(score: f64) -> f64 {
    let factor = 10f64.powi(DISPLAY_DECIMALS);
    (score * factor).round() / factor
}

/// Find the indices holding the rounded maximum and minimum of `scores`.
///
/// Two rounded scores within `tolerance` of each other count as equal. When
/// every score is equal, both sets are empty: a tie carries no ranking signal.
/// Non-finite entries are ignored.
pub fn find_extremes(scores: &[f64], tolerance: f64) -> Extremes {
    let tolerance = if tolerance.is_finite() { tolerance.abs() } else { 0.0 };

    let rounded: Vec<(usize, f64)> = scores
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_finite())
        .map(|(i, &s)| (i, round_for_display(s)))
        .collect();

    let Some(max) = rounded.iter().map(|&(_, s)| s).reduce(f64::max) else {
        return Extremes::default();
    };
    let min = rounded.iter().map(|&(_, s)| s).fold(max, f64::min);

    if max - min <= tolerance {
        return Extremes::default();
    }

    Extremes {
        max_indices: rounded
            .iter()
            .filter(|&&(_, s)| max - s <= tolerance)
            .map(|&(i, _)| i)
            .collect(),
        min_indices: rounded
            .iter()
            .filter(|&&(_, s)| s - min <= tolerance)
            .map(|&(i, _)| i)
            .collect(),
    }
}

impl ScenarioSet {
    /// Extremes of one method across current, higher and lower (indices 0, 1, 2).
    pub fn extremes(&self, method: ScoringMethod) -> Extremes {
        find_extremes(&self.method_scores(method), DEFAULT_EXTREMES_TOLERANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn set(indices: &[usize]) -> BTreeSet<usize> {
        indices.iter().copied().collect()
    }

    #[test]
    fn test_all_tied_flags_nothing() {
        let extremes = find_extremes(&[3.7, 3.7, 3.7], DEFAULT_EXTREMES_TOLERANCE);
        assert!(extremes.is_empty());
        assert_eq!(extremes, Extremes::default());
    }

    #[test]
    fn test_noise_below_display_precision_is_a_tie() {
        let extremes = find_extremes(&[1.0012, 0.9981, 1.0], DEFAULT_EXTREMES_TOLERANCE);
        assert!(extremes.is_empty());
    }

    #[test]
    fn test_distinct_scores() {
        let extremes = find_extremes(&[3.0, 3.1, 2.9], DEFAULT_EXTREMES_TOLERANCE);
        assert_eq!(extremes.max_indices, set(&[1]));
        assert_eq!(extremes.min_indices, set(&[2]));
        assert!(extremes.is_max(1));
        assert!(extremes.is_min(2));
        assert!(!extremes.is_max(0) && !extremes.is_min(0));
    }

    #[test]
    fn test_ties_for_max() {
        let extremes = find_extremes(&[2.0, 2.004, 1.0], DEFAULT_EXTREMES_TOLERANCE);
        assert_eq!(extremes.max_indices, set(&[0, 1]));
        assert_eq!(extremes.min_indices, set(&[2]));
    }

    #[test]
    fn test_one_cent_apart_is_distinct() {
        let extremes = find_extremes(&[4.12, 4.13], DEFAULT_EXTREMES_TOLERANCE);
        assert_eq!(extremes.max_indices, set(&[1]));
        assert_eq!(extremes.min_indices, set(&[0]));
    }

    #[test]
    fn test_empty_and_single() {
        assert!(find_extremes(&[], DEFAULT_EXTREMES_TOLERANCE).is_empty());
        assert!(find_extremes(&[9.99], DEFAULT_EXTREMES_TOLERANCE).is_empty());
    }

    #[test]
    fn test_non_finite_entries_ignored() {
        let extremes = find_extremes(&[f64::NAN, 1.0, 2.0], DEFAULT_EXTREMES_TOLERANCE);
        assert_eq!(extremes.max_indices, set(&[2]));
        assert_eq!(extremes.min_indices, set(&[1]));
    }

    #[test]
    fn test_round_for_display() {
        assert_eq!(round_for_display(3.555845), 3.56);
        assert_eq!(round_for_display(8.017285), 8.02);
        assert_eq!(round_for_display(0.0), 0.0);
    }

    #[test]
    fn test_scenario_extremes() {
        use crate::scenario::compute_scenario;
        use crate::types::{RatingInput, ScenarioDeviation, ScoringParameters};

        let params = ScoringParameters {
            minimum_ratings_threshold: 1,
            assumed_average: 3.5,
            ..ScoringParameters::default()
        };
        let base = RatingInput::new(4.5, 100).unwrap();
        let scenario = compute_scenario(&base, &params, &ScenarioDeviation::default()).unwrap();

        // Weighted rewards volume: "more reviews" (index 2) wins, "fewer reviews" (1) loses.
        let weighted = scenario.extremes(ScoringMethod::Weighted);
        assert_eq!(weighted.max_indices, set(&[2]));
        assert_eq!(weighted.min_indices, set(&[1]));

        // Bayesian with a threshold of 1 tracks the raw average.
        let bayesian = scenario.extremes(ScoringMethod::Bayesian);
        assert_eq!(bayesian.max_indices, set(&[1]));
        assert_eq!(bayesian.min_indices, set(&[2]));
    }
}
