/// Config file loading and creation for the rating-scorer CLI.
///
/// Config lives at ~/.config/rating-scorer/config.toml.
/// All fields are optional. CLI args override config values, config values
/// override the engine defaults.
use rating_scorer_core::constants::{
    DEFAULT_ASSUMED_AVERAGE, DEFAULT_BATCH_SIZE, DEFAULT_MAX_RATING_SCALE,
    DEFAULT_MINIMUM_RATINGS_THRESHOLD, DEFAULT_RATING_DEVIATION_PERCENT,
    DEFAULT_REVIEWS_DEVIATION_PERCENT, WILSON_Z_95,
};
use rating_scorer_core::{ScenarioDeviation, ScoringMethod, ScoringParameters, ScoringResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("HOME environment variable not set")]
    NoHome,

    #[error("Failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Config file already exists at {0}")]
    AlreadyExists(PathBuf),

    #[error("Failed to write config to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RatingScorerConfig {
    pub method: Option<ScoringMethod>,
    pub minimum_ratings_threshold: Option<u64>,
    pub assumed_average: Option<f64>,
    pub confidence_z: Option<f64>,
    pub max_rating_scale: Option<f64>,
    pub rating_deviation_percent: Option<f64>,
    pub reviews_deviation_percent: Option<f64>,
    pub batch_size: Option<usize>,
}

/// Values given on the command line. `None` falls through to the config file.
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides {
    pub method: Option<ScoringMethod>,
    pub minimum_ratings_threshold: Option<u64>,
    pub assumed_average: Option<f64>,
    pub rating_deviation_percent: Option<f64>,
    pub reviews_deviation_percent: Option<f64>,
    pub batch_size: Option<usize>,
}

/// Effective settings after merging CLI > config file > built-in defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Settings {
    pub method: ScoringMethod,
    pub params: ScoringParameters,
    pub deviation: ScenarioDeviation,
    pub batch_size: usize,
}

impl RatingScorerConfig {
    /// Merge with `overrides` and validate the resulting parameters.
    pub fn resolve(&self, overrides: &Overrides) -> ScoringResult<Settings> {
        let params = ScoringParameters {
            minimum_ratings_threshold: overrides
                .minimum_ratings_threshold
                .or(self.minimum_ratings_threshold)
                .unwrap_or(DEFAULT_MINIMUM_RATINGS_THRESHOLD),
            assumed_average: overrides
                .assumed_average
                .or(self.assumed_average)
                .unwrap_or(DEFAULT_ASSUMED_AVERAGE),
            confidence_z: self.confidence_z.unwrap_or(WILSON_Z_95),
            max_rating_scale: self.max_rating_scale.unwrap_or(DEFAULT_MAX_RATING_SCALE),
        };
        params.validate()?;

        Ok(Settings {
            method: overrides.method.or(self.method).unwrap_or_default(),
            params,
            deviation: ScenarioDeviation {
                rating_deviation_percent: overrides
                    .rating_deviation_percent
                    .or(self.rating_deviation_percent)
                    .unwrap_or(DEFAULT_RATING_DEVIATION_PERCENT),
                reviews_deviation_percent: overrides
                    .reviews_deviation_percent
                    .or(self.reviews_deviation_percent)
                    .unwrap_or(DEFAULT_REVIEWS_DEVIATION_PERCENT),
            },
            batch_size: overrides.batch_size.or(self.batch_size).unwrap_or(DEFAULT_BATCH_SIZE),
        })
    }
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# rating-scorer configuration
# All values here can be overridden by CLI flags.

# Scoring method used by `rank`: \"weighted\", \"bayesian\" or \"wilson\"
# method = \"bayesian\"

# Bayesian prior weight: how many ratings an item needs before its own
# average dominates the assumed average. Must be at least 1.
# minimum_ratings_threshold = 10

# Bayesian prior mean, on the rating scale
# assumed_average = 3.5

# Wilson confidence constant (1.96 = 95%)
# confidence_z = 1.96

# Top of the rating scale
# max_rating_scale = 5.0

# What-if scenario deviations used by `compare`, in percent
# rating_deviation_percent = 5.0
# reviews_deviation_percent = 30.0

# Items per batch for `rank`
# batch_size = 50
";

/// Returns the default config path: ~/.config/rating-scorer/config.toml
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let home = std::env::var_os("HOME").ok_or(ConfigError::NoHome)?;
    Ok(PathBuf::from(home).join(".config").join("rating-scorer").join("config.toml"))
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> Result<RatingScorerConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(RatingScorerConfig::default()),
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Create the default config file at `path`. Errors if it already exists.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }

    // Create parent directories
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    std::fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}
