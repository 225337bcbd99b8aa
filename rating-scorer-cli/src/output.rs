/// Output formatting: terminal table and JSON.
///
/// Tables show scores rounded to 2 decimals; JSON keeps full precision.
use rating_scorer_core::{
    Extremes, RatingInput, RecalculationReport, ScenarioDeviation, ScenarioSet, ScoreResult,
    ScoringMethod,
};
use serde::Serialize;

use crate::bail;
use crate::items::NamedRating;

const SCENARIO_LABELS: [&str; 3] = [
    "Current",
    "Higher rating, fewer reviews",
    "Lower rating, more reviews",
];

#[derive(Serialize)]
struct JsonMethodScore {
    method: ScoringMethod,
    score: f64,
}

#[derive(Serialize)]
struct JsonScores<'a> {
    input: &'a RatingInput,
    scores: Vec<JsonMethodScore>,
}

#[derive(Serialize)]
struct JsonScenarioRow<'a> {
    scenario: &'a str,
    input: RatingInput,
    scores: ScoreResult,
}

#[derive(Serialize)]
struct JsonMethodExtremes {
    method: ScoringMethod,
    #[serde(flatten)]
    extremes: Extremes,
}

#[derive(Serialize)]
struct JsonScenarioOutput<'a> {
    deviation: &'a ScenarioDeviation,
    scenarios: Vec<JsonScenarioRow<'a>>,
    extremes: Vec<JsonMethodExtremes>,
}

#[derive(Serialize)]
struct JsonRankedItem<'a> {
    rank: usize,
    name: &'a str,
    score: f64,
    average_rating: f64,
    rating_count: u64,
}

#[derive(Serialize)]
struct JsonFailure<'a> {
    name: &'a str,
    error: String,
}

#[derive(Serialize)]
struct JsonRankOutput<'a> {
    method: ScoringMethod,
    items: Vec<JsonRankedItem<'a>>,
    failures: Vec<JsonFailure<'a>>,
    processed: usize,
    batches: usize,
}

fn print_json<T: Serialize>(value: &T) {
    let text = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| bail(format!("Failed to serialize output: {e}")));
    println!("{text}");
}

/// Scores for a single item, one line per method.
pub fn print_scores_table(input: &RatingInput, scores: &[(ScoringMethod, f64)]) {
    println!(
        "Average rating {:.2} from {} ratings",
        input.average_rating, input.rating_count
    );
    for (method, score) in scores {
        println!("  {:<8} {:>8.2}", method.label(), score);
    }
}

pub fn print_scores_json(input: &RatingInput, scores: &[(ScoringMethod, f64)]) {
    let scores = scores
        .iter()
        .map(|&(method, score)| JsonMethodScore { method, score })
        .collect();
    print_json(&JsonScores { input, scores });
}

/// Marker for row `index` of one method's column.
fn marker(extremes: &Extremes, index: usize) -> char {
    if extremes.is_max(index) {
        '▲'
    } else if extremes.is_min(index) {
        '▼'
    } else {
        ' '
    }
}

/// Scenario comparison table. Each method's highest value is marked ▲ and
/// its lowest ▼; a method whose three values tie is left unmarked.
pub fn format_scenario_table(set: &ScenarioSet) -> String {
    let extremes: Vec<Extremes> = ScoringMethod::ALL.iter().map(|&m| set.extremes(m)).collect();
    let rows = [set.current, set.higher, set.lower];
    let label_width = SCENARIO_LABELS
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(8);

    let mut out = String::new();
    out.push_str(&format!(
        "{:<label_width$} | Rating | Reviews |   Weighted |   Bayesian |     Wilson\n",
        "Scenario"
    ));
    out.push_str(&format!(
        "{}-|--------|---------|------------|------------|-----------\n",
        "-".repeat(label_width)
    ));

    for (i, (label, row)) in SCENARIO_LABELS.iter().zip(rows.iter()).enumerate() {
        out.push_str(&format!(
            "{:<label_width$} | {:>6.2} | {:>7}",
            label, row.input.average_rating, row.input.rating_count
        ));
        for (method, ext) in ScoringMethod::ALL.iter().zip(extremes.iter()) {
            out.push_str(&format!(" | {:>8.2} {}", row.scores.get(*method), marker(ext, i)));
        }
        out.push('\n');
    }
    out
}

pub fn print_scenario_table(set: &ScenarioSet, deviation: &ScenarioDeviation) {
    print!("{}", format_scenario_table(set));
    println!(
        "\nRating deviation {}%, reviews deviation {}% (▲ highest, ▼ lowest per method)",
        deviation.rating_deviation_percent, deviation.reviews_deviation_percent
    );
}

pub fn print_scenario_json(set: &ScenarioSet, deviation: &ScenarioDeviation) {
    let rows = [set.current, set.higher, set.lower];
    let scenarios = ["current", "higher_rating_fewer_reviews", "lower_rating_more_reviews"]
        .iter()
        .zip(rows)
        .map(|(scenario, row)| JsonScenarioRow {
            scenario,
            input: row.input,
            scores: row.scores,
        })
        .collect();
    let extremes = ScoringMethod::ALL
        .iter()
        .map(|&method| JsonMethodExtremes {
            method,
            extremes: set.extremes(method),
        })
        .collect();

    print_json(&JsonScenarioOutput {
        deviation,
        scenarios,
        extremes,
    });
}

/// Ranked items as a table. `names` is indexed by item ID.
pub fn format_rankings_table(
    report: &RecalculationReport,
    names: &[NamedRating],
    method: ScoringMethod,
) -> String {
    let name_of = |item: i64| {
        names
            .get(item as usize)
            .map(|n| n.name.as_str())
            .unwrap_or("?")
    };

    // Widest item name in characters; `{:<w$}` pads by chars, not bytes.
    let name_width = report
        .rankings
        .iter()
        .map(|r| name_of(r.item).chars().count())
        .max()
        .unwrap_or(4)
        .max(4); // at least "Item"

    let mut out = String::new();
    out.push_str(&format!(
        "  # | {:<name_width$} | {:>8} | Rating | Reviews\n",
        "Item",
        method.label()
    ));
    out.push_str(&format!(
        "----|-{}-|----------|--------|--------\n",
        "-".repeat(name_width)
    ));

    for (i, r) in report.rankings.iter().enumerate() {
        out.push_str(&format!(
            "{:>3} | {:<name_width$} | {:>8.2} | {:>6.2} | {:>7}\n",
            i + 1,
            name_of(r.item),
            r.score,
            r.input.average_rating,
            r.input.rating_count,
        ));
    }

    out.push_str(&format!(
        "\n{} items ranked by {} score ({} batches)",
        report.processed, method, report.batches
    ));
    if !report.failures.is_empty() {
        out.push_str(&format!(", {} skipped", report.failures.len()));
    }
    out.push('\n');
    out
}

pub fn print_rankings_table(
    report: &RecalculationReport,
    names: &[NamedRating],
    method: ScoringMethod,
) {
    print!("{}", format_rankings_table(report, names, method));
}

pub fn print_rankings_json(
    report: &RecalculationReport,
    names: &[NamedRating],
    method: ScoringMethod,
) {
    let name_of = |item: i64| {
        names
            .get(item as usize)
            .map(|n| n.name.as_str())
            .unwrap_or("?")
    };

    let items = report
        .rankings
        .iter()
        .enumerate()
        .map(|(i, r)| JsonRankedItem {
            rank: i + 1,
            name: name_of(r.item),
            score: r.score,
            average_rating: r.input.average_rating,
            rating_count: r.input.rating_count,
        })
        .collect();
    let failures = report
        .failures
        .iter()
        .map(|f| JsonFailure {
            name: name_of(f.item),
            error: f.error.to_string(),
        })
        .collect();

    print_json(&JsonRankOutput {
        method,
        items,
        failures,
        processed: report.processed,
        batches: report.batches,
    });
}
