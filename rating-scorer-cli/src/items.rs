/// Rated item input for `rank`.
///
/// Accepts either a JSON array of `{name, average_rating, rating_count}` objects
/// or plain text with one `name,average_rating,rating_count` per line.
use rating_scorer_core::ItemRatings;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Input looks like JSON but failed to parse: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Line {line}: expected \"name,average_rating,rating_count\", got \"{content}\"")]
    Malformed { line: usize, content: String },

    #[error("Line {line}: invalid {field} \"{value}\"")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },
}

/// One named item as read from input. Numbers are validated later by the engine
/// so one bad row is reported without rejecting the whole file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NamedRating {
    pub name: String,
    pub average_rating: f64,
    pub rating_count: i64,
}

/// Parse a string as either a JSON array or plain text (one item per line).
/// Blank lines and lines starting with `#` are skipped in text mode.
pub fn parse_items_from_str(content: &str) -> Result<Vec<NamedRating>, InputError> {
    let trimmed = content.trim();
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }

    let mut items = Vec::new();
    for (idx, raw) in trimmed.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        items.push(parse_line(idx + 1, line)?);
    }
    Ok(items)
}

/// `name,average_rating,rating_count`. The name may itself contain commas;
/// the two numbers are taken from the right.
fn parse_line(line: usize, content: &str) -> Result<NamedRating, InputError> {
    let malformed = || InputError::Malformed {
        line,
        content: content.to_string(),
    };

    let mut fields = content.rsplitn(3, ',');
    let count = fields.next().ok_or_else(malformed)?.trim();
    let rating = fields.next().ok_or_else(malformed)?.trim();
    let name = fields.next().ok_or_else(malformed)?.trim();
    if name.is_empty() {
        return Err(malformed());
    }

    let average_rating = rating.parse().map_err(|_| InputError::InvalidNumber {
        line,
        field: "average rating",
        value: rating.to_string(),
    })?;
    let rating_count = count.parse().map_err(|_| InputError::InvalidNumber {
        line,
        field: "rating count",
        value: count.to_string(),
    })?;

    Ok(NamedRating {
        name: name.to_string(),
        average_rating,
        rating_count,
    })
}

/// Engine input for `items`, keyed by position.
pub fn to_item_ratings(items: &[NamedRating]) -> Vec<ItemRatings> {
    items
        .iter()
        .enumerate()
        .map(|(i, it)| ItemRatings {
            item: i as i64,
            average_rating: it.average_rating,
            rating_count: it.rating_count,
        })
        .collect()
}
