//! Turn individual votes into a `RatingInput`.
use crate::error::{ensure_finite, ScoringError, ScoringResult};
use crate::types::RatingInput;

/// Votes on a 0–100 scale are rescaled by this.
const PERCENT_SCALE: f64 = 100.0;

impl RatingInput {
    /// Mean and count of raw votes already on the rating scale.
    /// No votes gives `{ average_rating: 0.0, rating_count: 0 }`.
    pub fn from_votes(votes: &[f64]) -> ScoringResult<Self> {
        if votes.is_empty() {
            return Ok(RatingInput {
                average_rating: 0.0,
                rating_count: 0,
            });
        }

        let mut total = 0.0;
        for &vote in votes {
            if !vote.is_finite() || vote < 0.0 {
                return Err(ScoringError::InvalidVote(vote));
            }
            total += vote;
        }

        Ok(RatingInput {
            average_rating: total / votes.len() as f64,
            rating_count: votes.len() as u64,
        })
    }

    /// Votes given as percentages (0–100), mapped onto `[0, max_rating_scale]`.
    pub fn from_percent_votes(votes: &[f64], max_rating_scale: f64) -> ScoringResult<Self> {
        let scale = ensure_finite("max rating scale", max_rating_scale)?;
        if scale <= 0.0 {
            return Err(ScoringError::InvalidScale(scale));
        }
        if let Some(&vote) = votes.iter().find(|&&v| v > PERCENT_SCALE) {
            return Err(ScoringError::InvalidVote(vote));
        }

        let mut input = Self::from_votes(votes)?;
        input.average_rating = input.average_rating / PERCENT_SCALE * scale;
        Ok(input)
    }

    /// Average as a percentage of the scale, e.g. 4.0 of 5 → 80.
    pub fn percentage(&self, max_rating_scale: f64) -> f64 {
        if max_rating_scale <= 0.0 {
            return 0.0;
        }
        self.average_rating / max_rating_scale * PERCENT_SCALE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_votes_mean_and_count() {
        let input = RatingInput::from_votes(&[5.0, 4.0, 3.0, 4.0]).unwrap();
        assert_eq!(input.average_rating, 4.0);
        assert_eq!(input.rating_count, 4);
    }

    #[test]
    fn test_from_votes_empty() {
        let input = RatingInput::from_votes(&[]).unwrap();
        assert_eq!(
            input,
            RatingInput {
                average_rating: 0.0,
                rating_count: 0
            }
        );
    }

    #[test]
    fn test_from_votes_rejects_bad_values() {
        assert_eq!(RatingInput::from_votes(&[4.0, -1.0]), Err(ScoringError::InvalidVote(-1.0)));
        assert!(RatingInput::from_votes(&[f64::NAN]).is_err());
    }

    #[test]
    fn test_percent_votes_rescaled() {
        let input = RatingInput::from_percent_votes(&[100.0, 80.0, 60.0], 5.0).unwrap();
        assert!((input.average_rating - 4.0).abs() < 1e-12, "got {}", input.average_rating);
        assert_eq!(input.rating_count, 3);
        assert!((input.percentage(5.0) - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_percent_votes_out_of_range() {
        assert_eq!(
            RatingInput::from_percent_votes(&[50.0, 120.0], 5.0),
            Err(ScoringError::InvalidVote(120.0))
        );
        assert_eq!(
            RatingInput::from_percent_votes(&[50.0], 0.0),
            Err(ScoringError::InvalidScale(0.0))
        );
    }
}
