//! Batch recalculation and ranking.
//!
//! The caller hands over raw per-item rating data keyed by its own `i64` IDs.
//! Each item is validated and scored on its own; a bad item is reported and
//! skipped, never aborting the batch. Only invalid parameters fail the call.
//!
//! With the `parallel` feature, items inside a batch are scored on the rayon
//! thread pool. Output is identical to the serial path.
use tracing::{debug, info, warn};

use crate::constants::DEFAULT_BATCH_SIZE;
use crate::error::{ScoringError, ScoringResult};
use crate::scoring::score_with_method_unchecked;
use crate::types::{RatingInput, ScoringMethod, ScoringParameters, SortOrder};

/// Raw rating data for one item, as stored by the caller.
///
/// The count is signed so corrupt data (negative counts) can be reported
/// instead of silently wrapping.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRatings {
    pub item: i64,
    pub average_rating: f64,
    pub rating_count: i64,
}

/// One item's score under the selected method.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedItem {
    pub item: i64,
    pub score: f64,
    pub input: RatingInput,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecalculationOptions {
    pub method: ScoringMethod,
    pub order: SortOrder,
    /// Only process the first `limit` items. 0 = no limit.
    pub limit: usize,
    /// Items per batch; values below 1 are treated as 1.
    pub batch_size: usize,
}

impl Default for RecalculationOptions {
    fn default() -> Self {
        RecalculationOptions {
            method: ScoringMethod::default(),
            order: SortOrder::default(),
            limit: 0,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// An item that could not be scored.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFailure {
    pub item: i64,
    pub error: ScoringError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecalculationReport {
    /// Successfully scored items, sorted by score in the requested order.
    pub rankings: Vec<RankedItem>,
    pub failures: Vec<ItemFailure>,
    /// Number of items scored successfully.
    pub processed: usize,
    pub batches: usize,
}

/// Recalculate scores for a batch of items.
pub fn recalculate(
    items: &[ItemRatings],
    params: &ScoringParameters,
    options: &RecalculationOptions,
) -> ScoringResult<RecalculationReport> {
    params.validate()?;

    let selected = if options.limit > 0 {
        &items[..options.limit.min(items.len())]
    } else {
        items
    };
    let total = selected.len();
    if total == 0 {
        info!("No items found to recalculate");
        return Ok(RecalculationReport::default());
    }

    let batch_size = options.batch_size.max(1);
    let batches = total.div_ceil(batch_size);
    debug!(
        method = %options.method,
        threshold = params.minimum_ratings_threshold,
        assumed_average = params.assumed_average,
        "Processing {total} items in {batches} batches"
    );

    let mut report = RecalculationReport {
        batches,
        ..RecalculationReport::default()
    };

    for (batch_index, chunk) in selected.chunks(batch_size).enumerate() {
        for (item, outcome) in score_batch(chunk, params, options.method) {
            match outcome {
                Ok(ranked) => report.rankings.push(ranked),
                Err(error) => {
                    warn!(item, %error, "Error processing item, skipping");
                    report.failures.push(ItemFailure { item, error });
                }
            }
        }
        report.processed = report.rankings.len();
        info!(
            "Processed batch {}/{} ({}/{})",
            batch_index + 1,
            batches,
            report.processed,
            total
        );
    }

    rank_scores(&mut report.rankings, options.order);
    Ok(report)
}

/// Sort scored items by score. Ties go to the lower item ID in both orders.
pub fn rank_scores(rankings: &mut [RankedItem], order: SortOrder) {
    rankings.sort_by(|a, b| {
        let by_score = match order {
            SortOrder::Ascending => a.score.total_cmp(&b.score),
            SortOrder::Descending => b.score.total_cmp(&a.score),
        };
        by_score.then(a.item.cmp(&b.item))
    });
}

fn score_item(
    raw: &ItemRatings,
    params: &ScoringParameters,
    method: ScoringMethod,
) -> ScoringResult<RankedItem> {
    let input = RatingInput::from_raw(raw.average_rating, raw.rating_count)?;
    let score = score_with_method_unchecked(&input, params, method)?;
    Ok(RankedItem {
        item: raw.item,
        score,
        input,
    })
}

#[cfg(feature = "parallel")]
fn score_batch(
    chunk: &[ItemRatings],
    params: &ScoringParameters,
    method: ScoringMethod,
) -> Vec<(i64, ScoringResult<RankedItem>)> {
    use rayon::prelude::*;

    chunk
        .par_iter()
        .map(|raw| (raw.item, score_item(raw, params, method)))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn score_batch(
    chunk: &[ItemRatings],
    params: &ScoringParameters,
    method: ScoringMethod,
) -> Vec<(i64, ScoringResult<RankedItem>)> {
    score_batch_serial(chunk, params, method)
}

// With `parallel` on, only the tests call this.
#[cfg_attr(all(feature = "parallel", not(test)), allow(dead_code))]
fn score_batch_serial(
    chunk: &[ItemRatings],
    params: &ScoringParameters,
    method: ScoringMethod,
) -> Vec<(i64, ScoringResult<RankedItem>)> {
    chunk
        .iter()
        .map(|raw| (raw.item, score_item(raw, params, method)))
        .collect()
}
