//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::constants::{defaults, limits, output_formats, variants};
use crate::core::error::{Result, TrendscopeError};
use crate::core::types::DateExtent;
use crate::data::{DatasetVariant, LoadOptions};
use crate::events;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Dataset shape (insights, interactions)
    pub variant: Option<String>,

    /// Dataset file to load
    pub data_path: Option<String>,

    /// Field delimiter for input and export
    pub delimiter: Option<char>,

    /// Trailing window in days when no dates are given (insights only)
    pub default_window_days: Option<u32>,

    /// Records drawn for the text sample viewer
    pub sample_size: Option<usize>,

    /// Entities kept by top-N views
    pub top_n: Option<usize>,

    /// Seed for the synthetic placeholder dataset
    pub seed: Option<u64>,

    /// Rows generated for the synthetic placeholder dataset
    pub synthetic_rows: Option<usize>,

    /// Output format (text, json, minimal)
    pub output_format: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,

    /// Where outbound events go: a file path, or `-` for stdout
    pub events_path: Option<String>,

    /// Write the filtered records as CSV to this path
    pub export_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variant: Some(variants::DEFAULT.to_string()),
            data_path: None,
            delimiter: Some(defaults::DELIMITER),
            default_window_days: Some(defaults::WINDOW_DAYS),
            sample_size: Some(defaults::SAMPLE_SIZE),
            top_n: Some(defaults::TOP_N),
            seed: Some(defaults::SEED),
            synthetic_rows: Some(defaults::SYNTHETIC_ROWS),
            output_format: Some(output_formats::DEFAULT.to_string()),
            verbose: Some(false),
            events_path: None, // No event listener by default
            export_path: None,
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            TrendscopeError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            TrendscopeError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        if let Ok(config) = Self::load_from_file(defaults::CONFIG_FILE_NAME) {
            return config;
        }

        // Parent directories, up to 3 levels
        for i in 1..=3 {
            let path = format!("{}{}", "../".repeat(i), defaults::CONFIG_FILE_NAME);
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        Self::default()
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Dataset
        if let Some(ref variant) = cli_config.variant {
            self.variant = Some(variant.clone());
        }
        if let Some(ref data_path) = cli_config.data_path {
            self.data_path = Some(data_path.clone());
        }

        // Views
        if let Some(sample_size) = cli_config.sample_size {
            self.sample_size = Some(sample_size);
        }
        if let Some(top_n) = cli_config.top_n {
            self.top_n = Some(top_n);
        }
        if let Some(seed) = cli_config.seed {
            self.seed = Some(seed);
        }

        // Output & format
        if cli_config.verbose {
            self.verbose = Some(true);
        }
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }
        if let Some(ref export_path) = cli_config.export_path {
            self.export_path = Some(export_path.clone());
        }
        if let Some(ref events_path) = cli_config.events_path {
            self.events_path = Some(events_path.clone());
        }
    }

    /// The configured variant, or the default one when unset
    pub fn dataset_variant(&self) -> Result<DatasetVariant> {
        self.variant
            .as_deref()
            .map_or(Ok(DatasetVariant::default()), str::parse)
    }

    pub fn data_path(&self) -> Option<PathBuf> {
        self.data_path.as_ref().map(PathBuf::from)
    }

    pub fn delimiter(&self) -> char {
        self.delimiter.unwrap_or(defaults::DELIMITER)
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size.unwrap_or(defaults::SAMPLE_SIZE)
    }

    pub fn top_n(&self) -> usize {
        self.top_n.unwrap_or(defaults::TOP_N)
    }

    pub fn output_format(&self) -> &str {
        self.output_format
            .as_deref()
            .unwrap_or(output_formats::DEFAULT)
    }

    /// Loader settings, with synthetic records spread over `window`
    pub fn load_options(&self, window: DateExtent) -> LoadOptions {
        LoadOptions {
            delimiter: self.delimiter(),
            seed: self.seed.unwrap_or(defaults::SEED),
            synthetic_rows: self.synthetic_rows.unwrap_or(defaults::SYNTHETIC_ROWS),
            window,
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate variant
        if let Some(ref variant) = self.variant
            && !variants::ALL.contains(&variant.as_str())
        {
            return Err(TrendscopeError::Config(format!(
                "Invalid variant '{variant}'. Expected one of: {}.",
                variants::ALL.join(", ")
            )));
        }

        // Validate delimiter
        if let Some(delimiter) = self.delimiter
            && (!delimiter.is_ascii() || matches!(delimiter, '"' | '\r' | '\n'))
        {
            return Err(TrendscopeError::Config(format!(
                "Delimiter {delimiter:?} is not usable. Expected a single ASCII character other than a quote or line break."
            )));
        }

        // Validate window
        if let Some(days) = self.default_window_days {
            if days == 0 {
                return Err(TrendscopeError::Config(
                    "Default window cannot be 0 days. Expected a positive integer.".to_string(),
                ));
            }
            if days > limits::MAX_WINDOW_DAYS {
                return Err(TrendscopeError::Config(format!(
                    "Default window of {days} days is too large. Expected at most {} days.",
                    limits::MAX_WINDOW_DAYS
                )));
            }
        }

        // Validate view sizes
        if let Some(sample_size) = self.sample_size
            && sample_size > limits::MAX_SAMPLE_SIZE
        {
            return Err(TrendscopeError::Config(format!(
                "Sample size of {sample_size} is too large. Expected at most {}.",
                limits::MAX_SAMPLE_SIZE
            )));
        }
        if let Some(top_n) = self.top_n
            && !(1..=limits::MAX_TOP_N).contains(&top_n)
        {
            return Err(TrendscopeError::Config(format!(
                "Top-N of {top_n} is invalid. Expected a value between 1-{}.",
                limits::MAX_TOP_N
            )));
        }

        // Validate synthetic rows
        if let Some(rows) = self.synthetic_rows
            && !(1..=limits::MAX_SYNTHETIC_ROWS).contains(&rows)
        {
            return Err(TrendscopeError::Config(format!(
                "Synthetic row count of {rows} is invalid. Expected a value between 1-{}.",
                limits::MAX_SYNTHETIC_ROWS
            )));
        }

        // Validate output format
        if let Some(ref format) = self.output_format {
            match format.as_str() {
                f if output_formats::ALL.contains(&f) => {}
                _ => {
                    return Err(TrendscopeError::Config(format!(
                        "Invalid output format '{format}'. Expected one of: {}.",
                        output_formats::ALL.join(", ")
                    )));
                }
            }
        }

        // JSON output must stay a single document on stdout
        if self.output_format() == output_formats::JSON
            && self.events_path.as_deref() == Some(events::STDOUT_TARGET)
        {
            return Err(TrendscopeError::Config(format!(
                "Events cannot go to stdout ('{}') with json output. Expected a file path.",
                events::STDOUT_TARGET
            )));
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Dataset
    pub data_path: Option<String>, // <DATASET>
    pub variant: Option<String>,   // --variant

    // Filters
    pub start: Option<String>,          // --start
    pub end: Option<String>,            // --end
    pub filters: Vec<(String, String)>, // --filter FIELD=VALUE
    pub topic: Option<String>,          // --topic

    // Views
    pub sample_size: Option<usize>, // --sample
    pub top_n: Option<usize>,       // --top
    pub seed: Option<u64>,          // --seed

    // Output & format
    pub quiet: bool,                   // --quiet
    pub verbose: bool,                 // --verbose
    pub output_format: Option<String>, // --format
    pub export_path: Option<String>,   // --export

    // Host events
    pub events_path: Option<String>, // --events
    pub create_collection: bool,     // --create-collection
    pub share_url: Option<String>,   // --share

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}
