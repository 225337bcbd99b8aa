mod config;
mod items;
mod output;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rating_scorer_core::{
    compute_scenario, recalculate, score_all, score_with_method, RatingInput,
    RecalculationOptions, ScoringMethod, SortOrder,
};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{Overrides, Settings};
use crate::items::NamedRating;

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(
    name = "rating-scorer",
    version,
    about = "Score and rank rated items with weighted, Bayesian or Wilson scores"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single item
    Score(ScoreArgs),
    /// Compare an item against "higher rating, fewer reviews" and
    /// "lower rating, more reviews" scenarios
    Compare(CompareArgs),
    /// Rank a list of rated items
    Rank(RankArgs),
    /// Show the resolved configuration
    Status(CommonArgs),
    /// Create a default config file at ~/.config/rating-scorer/config.toml
    Init {
        /// Where to write the config (default: ~/.config/rating-scorer/config.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Path to config file (default: ~/.config/rating-scorer/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bayesian prior weight: ratings needed before an item's own average dominates
    #[arg(long)]
    threshold: Option<u64>,

    /// Bayesian prior mean
    #[arg(long)]
    assumed_average: Option<f64>,

    /// Output JSON instead of table
    #[arg(long)]
    json: bool,

    /// Show progress during execution
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args)]
struct ScoreArgs {
    /// Average rating
    #[arg(long)]
    rating: f64,

    /// Number of ratings
    #[arg(long)]
    count: u64,

    /// Only show this method: weighted, bayesian or wilson
    #[arg(long)]
    method: Option<ScoringMethod>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args)]
struct CompareArgs {
    /// Average rating
    #[arg(long)]
    rating: f64,

    /// Number of ratings
    #[arg(long)]
    count: u64,

    /// Rating change between scenarios, in percent
    #[arg(long)]
    rating_deviation: Option<f64>,

    /// Review count change between scenarios, in percent
    #[arg(long)]
    reviews_deviation: Option<f64>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for SortOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Asc => SortOrder::Ascending,
            OrderArg::Desc => SortOrder::Descending,
        }
    }
}

#[derive(Args)]
struct RankArgs {
    /// File with items: JSON array or one "name,average_rating,rating_count" per line.
    /// Reads stdin when omitted.
    #[arg(long)]
    items: Option<PathBuf>,

    /// Scoring method: weighted, bayesian or wilson
    #[arg(long)]
    method: Option<ScoringMethod>,

    /// Sort order
    #[arg(long, value_enum, default_value = "desc")]
    order: OrderArg,

    /// Only rank the first N items (0 = all)
    #[arg(long, default_value_t = 0)]
    limit: usize,

    /// Items scored per batch
    #[arg(long)]
    batch_size: Option<usize>,

    #[command(flatten)]
    common: CommonArgs,
}

/// Default log level is `warn` (library per-item warnings are reported by the
/// CLI itself); `--verbose` raises it to `info`. `RUST_LOG` overrides both.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "info"
    } else {
        "warn,rating_scorer_core=error"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}

/// Load config file, merge with CLI args (CLI wins).
fn resolve_settings(common: &CommonArgs, overrides: Overrides) -> (PathBuf, Settings) {
    let config_path = match &common.config {
        Some(path) => path.clone(),
        None => config::config_path().unwrap_or_else(|e| bail(e)),
    };
    let cfg = config::load_config(&config_path).unwrap_or_else(|e| bail(e));

    let overrides = Overrides {
        minimum_ratings_threshold: common.threshold,
        assumed_average: common.assumed_average,
        ..overrides
    };
    let settings = cfg
        .resolve(&overrides)
        .unwrap_or_else(|e| bail(format!("Invalid scoring parameters: {e}")));

    debug!(config = %config_path.display(), ?settings, "Resolved settings");
    (config_path, settings)
}

/// Load items from --items file or stdin (auto-detects JSON array vs one-per-line).
fn load_items(args: &RankArgs) -> Vec<NamedRating> {
    let content = match &args.items {
        Some(path) => std::fs::read_to_string(path)
            .unwrap_or_else(|e| bail(format!("Failed to read items file {}: {e}", path.display()))),
        None => {
            let mut stdin = io::stdin();
            if stdin.is_terminal() {
                bail("No items provided. Use --items <file> or pipe items via stdin.");
            }
            let mut content = String::new();
            stdin
                .read_to_string(&mut content)
                .unwrap_or_else(|e| bail(format!("Failed to read from stdin: {e}")));
            content
        }
    };

    let items = items::parse_items_from_str(&content).unwrap_or_else(|e| bail(e));
    if items.is_empty() {
        bail("No items to rank.");
    }
    items
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Score(args) => run_score(args),
        Commands::Compare(args) => run_compare(args),
        Commands::Rank(args) => run_rank(args),
        Commands::Status(common) => run_status(common),
        Commands::Init { config: path } => {
            let path = path.unwrap_or_else(|| config::config_path().unwrap_or_else(|e| bail(e)));
            config::create_default_config(&path).unwrap_or_else(|e| bail(e));
            println!("Created config at {}", path.display());
            println!("Edit it to set your default method, threshold, etc.");
        }
    }
}

fn run_score(args: ScoreArgs) {
    init_tracing(args.common.verbose);
    let (_, settings) = resolve_settings(&args.common, Overrides::default());
    let input = RatingInput::new(args.rating, args.count).unwrap_or_else(|e| bail(e));

    let scores: Vec<(ScoringMethod, f64)> = match args.method {
        Some(method) => {
            let score = score_with_method(&input, &settings.params, method)
                .unwrap_or_else(|e| bail(e));
            vec![(method, score)]
        }
        None => {
            let all = score_all(&input, &settings.params).unwrap_or_else(|e| bail(e));
            ScoringMethod::ALL.iter().map(|&m| (m, all.get(m))).collect()
        }
    };

    if args.common.json {
        output::print_scores_json(&input, &scores);
    } else {
        output::print_scores_table(&input, &scores);
    }
}

fn run_compare(args: CompareArgs) {
    init_tracing(args.common.verbose);
    let overrides = Overrides {
        rating_deviation_percent: args.rating_deviation,
        reviews_deviation_percent: args.reviews_deviation,
        ..Overrides::default()
    };
    let (_, settings) = resolve_settings(&args.common, overrides);
    let base = RatingInput::new(args.rating, args.count).unwrap_or_else(|e| bail(e));

    let set = compute_scenario(&base, &settings.params, &settings.deviation)
        .unwrap_or_else(|e| bail(e));

    if args.common.json {
        output::print_scenario_json(&set, &settings.deviation);
    } else {
        output::print_scenario_table(&set, &settings.deviation);
    }
}

fn run_rank(args: RankArgs) {
    init_tracing(args.common.verbose);
    let overrides = Overrides {
        method: args.method,
        batch_size: args.batch_size,
        ..Overrides::default()
    };
    let (_, settings) = resolve_settings(&args.common, overrides);

    let names = load_items(&args);
    let raw = items::to_item_ratings(&names);
    info!(
        "Ranking {} items by {} score (batch size {})",
        raw.len(),
        settings.method,
        settings.batch_size
    );

    let options = RecalculationOptions {
        method: settings.method,
        order: args.order.into(),
        limit: args.limit,
        batch_size: settings.batch_size,
    };
    let report = recalculate(&raw, &settings.params, &options).unwrap_or_else(|e| bail(e));

    for failure in &report.failures {
        let name = names
            .get(failure.item as usize)
            .map(|n| n.name.as_str())
            .unwrap_or("?");
        eprintln!("Skipped \"{name}\": {}", failure.error);
    }

    if report.rankings.is_empty() {
        bail("Every item failed validation. Nothing to rank.");
    }

    if args.common.json {
        output::print_rankings_json(&report, &names, settings.method);
    } else {
        output::print_rankings_table(&report, &names, settings.method);
    }
}

fn run_status(common: CommonArgs) {
    init_tracing(common.verbose);
    let (config_path, settings) = resolve_settings(&common, Overrides::default());
    let exists = config_path.exists();

    if common.json {
        let status = serde_json::json!({
            "config_path": config_path,
            "config_exists": exists,
            "settings": settings,
        });
        let text = serde_json::to_string_pretty(&status)
            .unwrap_or_else(|e| bail(format!("Failed to serialize output: {e}")));
        println!("{text}");
        return;
    }

    let params = &settings.params;
    println!(
        "Config: {} ({})",
        config_path.display(),
        if exists { "found" } else { "not found, using defaults" }
    );
    println!("Method:                    {}", settings.method);
    println!("Minimum ratings threshold: {}", params.minimum_ratings_threshold);
    println!("Assumed average:           {}", params.assumed_average);
    println!("Confidence z:              {}", params.confidence_z);
    println!("Max rating scale:          {}", params.max_rating_scale);
    println!("Rating deviation:          {}%", settings.deviation.rating_deviation_percent);
    println!("Reviews deviation:         {}%", settings.deviation.reviews_deviation_percent);
    println!("Batch size:                {}", settings.batch_size);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_rank_args() {
        let cli = Cli::try_parse_from([
            "rating-scorer", "rank", "--items", "items.txt", "--method", "Wilson",
            "--order", "asc", "--limit", "5", "--threshold", "20", "--json",
        ])
        .unwrap();

        match cli.command {
            Commands::Rank(args) => {
                assert_eq!(args.method, Some(ScoringMethod::Wilson));
                assert_eq!(SortOrder::from(args.order), SortOrder::Ascending);
                assert_eq!(args.limit, 5);
                assert_eq!(args.common.threshold, Some(20));
                assert!(args.common.json);
            }
            _ => panic!("expected rank"),
        }
    }

    #[test]
    fn test_unknown_method_rejected() {
        let result = Cli::try_parse_from([
            "rating-scorer", "score", "--rating", "4.0", "--count", "10", "--method", "median",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rank_defaults() {
        let cli = Cli::try_parse_from(["rating-scorer", "rank"]).unwrap();
        match cli.command {
            Commands::Rank(args) => {
                assert!(args.method.is_none());
                assert_eq!(SortOrder::from(args.order), SortOrder::Descending);
                assert_eq!(args.limit, 0);
                assert!(args.batch_size.is_none());
            }
            _ => panic!("expected rank"),
        }
    }
}
