//! Configuration for the synonym benchmark.
//!
//! Supports both environment variables and a YAML config file.
//! Environment variables take precedence over config file values.

use crate::error::{BenchError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// The model set the original benchmark shipped with.
pub const DEFAULT_MODELS: [&str; 5] = [
    "word2vec-google-news-300",
    "glove-wiki-gigaword-200",
    "glove-wiki-gigaword-300",
    "glove-twitter-25",
    "glove-twitter-200",
];

fn default_store_dir() -> PathBuf {
    PathBuf::from("saved_models")
}

fn default_dataset() -> PathBuf {
    PathBuf::from("synonyms.csv")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("outputs")
}

fn default_models() -> Vec<String> {
    DEFAULT_MODELS.iter().map(|s| s.to_string()).collect()
}

/// Model store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding downloaded/cached models.
    #[serde(default = "default_store_dir")]
    pub dir: PathBuf,

    /// Base URL of the remote model catalog. Required only for downloads.
    #[serde(default)]
    pub catalog_base: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
            catalog_base: String::new(),
        }
    }
}

/// Full application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Model store settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Models to evaluate, in comparison order.
    #[serde(default = "default_models")]
    pub models: Vec<String>,

    /// Path to the benchmark CSV.
    #[serde(default = "default_dataset")]
    pub dataset: PathBuf,

    /// Directory for report files.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            models: default_models(),
            dataset: default_dataset(),
            output_dir: default_output_dir(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and optional config file.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (`SYNBENCH_*`)
    /// 2. Config file (`~/.config/synonym-bench/config.yaml`)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        let mut config = Config::default();

        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                config = Self::load_from_file(&config_path)?;
            }
        }

        if let Ok(dir) = env::var("SYNBENCH_STORE_DIR") {
            config.store.dir = PathBuf::from(dir);
        }

        if let Ok(catalog) = env::var("SYNBENCH_CATALOG_BASE") {
            config.store.catalog_base = catalog;
        }

        if let Ok(models) = env::var("SYNBENCH_MODELS") {
            config.models = models
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Ok(dataset) = env::var("SYNBENCH_DATASET") {
            config.dataset = PathBuf::from(dataset);
        }

        if let Ok(output_dir) = env::var("SYNBENCH_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(output_dir);
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BenchError::io(path, e))?;

        serde_yaml::from_str(&content)
            .map_err(|e| BenchError::Config(format!("Failed to parse config file: {e}")))
    }

    /// Get the default config file path.
    pub fn config_file_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "synonym-bench")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Validate that required configuration is present.
    pub fn validate(&self) -> Result<()> {
        if self.models.is_empty() {
            return Err(BenchError::Config(
                "No models configured. Set SYNBENCH_MODELS or add models to the config file."
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Validate the extra settings a catalog download needs.
    pub fn validate_for_download(&self) -> Result<()> {
        if self.store.catalog_base.is_empty() {
            return Err(BenchError::Config(
                "Catalog base URL is required. Set SYNBENCH_CATALOG_BASE or add store.catalog_base to the config file."
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Create a config from explicit values (useful for testing).
    pub fn with_models<I, S>(store_dir: impl Into<PathBuf>, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            store: StoreConfig {
                dir: store_dir.into(),
                ..Default::default()
            },
            models: models.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}
