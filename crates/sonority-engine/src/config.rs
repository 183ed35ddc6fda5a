use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use sonority_core::Feature;

use crate::policy::RepresentativePolicy;
use crate::query::DEFAULT_TOP_N;

/// Largest number of recommendations a single request may ask for.
pub const MAX_TOP_N: usize = 50;

/// Settings that change how the engine ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Which row represents a query song listed more than once.
    #[serde(default)]
    pub representative: RepresentativePolicy,

    /// Score catalog rows on the rayon thread pool.
    #[serde(default)]
    pub parallel: bool,
}

/// Configuration for sonority.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (SONORITY_* prefix)
/// 3. Config file (~/.config/sonority/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the SQLite database holding the imported catalog.
    ///
    /// Can be set via:
    /// - CLI: --db /path/to/db
    /// - ENV: SONORITY_DATABASE_PATH
    /// - Config: database_path = "/path/to/db"
    /// - Default: ~/.local/share/sonority/sonority.db
    #[serde(default = "default_db_path")]
    pub database_path: PathBuf,

    /// CSV catalog to read directly instead of the database.
    ///
    /// Can be set via:
    /// - CLI: --catalog /path/to/songs.csv
    /// - ENV: SONORITY_CATALOG_PATH
    /// - Config: catalog_path = "/path/to/songs.csv"
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Number of recommendations when none is requested.
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,

    /// Feature subset used when none is requested.
    #[serde(default = "default_features")]
    pub default_features: Vec<Feature>,

    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub logging: twyg::Opts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_db_path(),
            catalog_path: None,
            default_top_n: default_top_n(),
            default_features: default_features(),
            engine: EngineConfig::default(),
            logging: twyg::Opts::default(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/sonority/config.toml
    /// Reads environment variables with SONORITY_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed, or if
    /// the resulting values are out of range.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("sonority");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration with custom database path.
    ///
    /// This is used when the --db CLI flag is provided.
    pub fn load_with_db_path(db_path: PathBuf) -> Result<Self> {
        let mut config = Self::load()?;
        config.database_path = db_path;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.default_top_n == 0 || self.default_top_n > MAX_TOP_N {
            anyhow::bail!(
                "default_top_n must be between 1 and {}, got {}",
                MAX_TOP_N,
                self.default_top_n
            );
        }
        if self.default_features.is_empty() {
            anyhow::bail!("default_features must name at least one feature");
        }
        Ok(())
    }
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_features() -> Vec<Feature> {
    Feature::ALL.to_vec()
}

/// Get the default database path.
///
/// Returns: ~/.local/share/sonority/sonority.db (or platform equivalent)
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sonority")
        .join("sonority.db")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/sonority/config.toml
/// - macOS: ~/Library/Application Support/sonority/config.toml
/// - Windows: %APPDATA%\sonority\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sonority")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Sonority Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (SONORITY_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Path to the SQLite database holding the imported catalog
#
# Fill it with: sonority import /path/to/songs.csv
#
# Can also be set via:
# - CLI: sonority --db /custom/path.db recommend ...
# - Environment: SONORITY_DATABASE_PATH=/custom/path.db
#
# Default: Platform-specific data directory
#database_path = "/path/to/custom/sonority.db"

# Read the catalog straight from a CSV file instead of the database
#
# Can also be set via:
# - CLI: sonority --catalog /path/to/songs.csv recommend ...
# - Environment: SONORITY_CATALOG_PATH=/path/to/songs.csv
#catalog_path = "/path/to/songs.csv"

# Number of recommendations when --top-n is not given (1 to 50)
default_top_n = 10

# Features compared when --features is not given
#
# Normalized: valence, acousticness, danceability, energy, instrumentalness,
#             liveness, speechiness
# Raw scale:  duration_ms, key, loudness, mode, tempo, popularity
#
# Raw-scale features are not rescaled and dominate the similarity score.
default_features = [
    "valence", "acousticness", "danceability", "energy", "instrumentalness",
    "liveness", "speechiness", "duration_ms", "key", "loudness", "mode",
    "tempo", "popularity",
]

[engine]
# Row used when the query song is listed more than once: "first" or "most-popular"
representative = "first"

# Score catalog rows in parallel
parallel = false
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.database_path.as_os_str().is_empty());
        assert!(config.catalog_path.is_none());
        assert_eq!(config.default_top_n, DEFAULT_TOP_N);
        assert_eq!(config.default_features.len(), Feature::ALL.len());
        assert_eq!(config.engine, EngineConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_top_n() {
        let mut config = Config::default();
        config.default_top_n = 0;
        assert!(config.validate().is_err());
        config.default_top_n = MAX_TOP_N + 1;
        assert!(config.validate().is_err());
        config.default_top_n = MAX_TOP_N;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_features() {
        let config = Config {
            default_features: Vec::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_engine_config_deserializes_policy() {
        let engine: EngineConfig =
            serde_json::from_str(r#"{"representative": "most-popular", "parallel": true}"#)
                .unwrap();
        assert_eq!(engine.representative, RepresentativePolicy::MostPopular);
        assert!(engine.parallel);

        let defaults: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(defaults, EngineConfig::default());
    }

    #[test]
    fn test_config_paths_are_namespaced() {
        assert!(config_file_path().ends_with("sonority/config.toml"));
        assert!(default_db_path().ends_with("sonority/sonority.db"));
    }

    #[test]
    fn test_config_with_custom_db_path() {
        let custom_path = PathBuf::from("/tmp/sonority-test.db");
        let config = Config::load_with_db_path(custom_path.clone());
        assert!(config.is_ok());
        assert_eq!(config.unwrap().database_path, custom_path);
    }
}
