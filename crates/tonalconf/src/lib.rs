//! Configuration loading for the `tonal` command-line tool.
//!
//! # Usage
//!
//! ```rust,no_run
//! use tonalconf::TonalConfig;
//!
//! let config = TonalConfig::load().expect("Failed to load config");
//! println!("Showing top {} keys", config.scoring.top);
//! ```
//!
//! # Config File Locations
//!
//! Files are loaded in order (later wins):
//! 1. `/etc/tonal/config.toml` (system)
//! 2. `~/.config/tonal/config.toml` (user)
//! 3. `./tonal.toml` (local override) or the path given with `--config`
//! 4. Environment variables (`TONAL_*`, `RUST_LOG`)
//!
//! Files merge table by table, so a local file can change one weight and keep
//! the rest from the user config.
//!
//! # Example Config
//!
//! ```toml
//! [scoring]
//! tonic = 3
//! matches_seventh = 1
//! non_match = -5
//! first_chord_tonic = 3
//! no_tonic = -4
//! has_dominant = 2
//! top = 5
//!
//! [display]
//! unicode = false
//! verbose = false
//!
//! [telemetry]
//! log_level = "warn"
//! ```

pub mod loader;
pub mod settings;

pub use loader::{discover_config_files_with_override, expand_path, ConfigSources};
pub use settings::{DisplayConfig, ScoringConfig, TelemetryConfig};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

/// Complete tonal configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TonalConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl TonalConfig {
    /// Load configuration from all sources.
    pub fn load() -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(None)?;
        Ok(config)
    }

    /// Load configuration with `config_path` in place of `./tonal.toml`.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(config_path)?;
        Ok(config)
    }

    /// Load configuration and return information about sources.
    pub fn load_with_sources() -> Result<(Self, ConfigSources), ConfigError> {
        Self::load_with_sources_from(None)
    }

    /// Load configuration from optional path and return information about sources.
    pub fn load_with_sources_from(
        config_path: Option<&Path>,
    ) -> Result<(Self, ConfigSources), ConfigError> {
        let files = loader::discover_config_files_with_override(config_path);
        let (mut config, mut sources) = Self::load_files(&files)?;

        // Apply environment variable overrides
        loader::apply_env_overrides(&mut config, &mut sources);

        Ok((config, sources))
    }

    /// Load and merge exactly these files, in order, without env overrides.
    pub fn load_files(paths: &[PathBuf]) -> Result<(Self, ConfigSources), ConfigError> {
        let mut sources = ConfigSources::default();
        let mut merged = toml::Table::new();

        for path in paths {
            let table = loader::load_table(path)?;
            loader::merge_tables(&mut merged, table);
            sources.files.push(path.clone());
        }

        Ok((loader::from_table(merged)?, sources))
    }

    /// Serialize config to TOML string.
    pub fn to_toml(&self) -> String {
        let mut output = String::new();

        output.push_str("# tonal configuration\n\n");

        output.push_str("[scoring]\n");
        output.push_str(&format!("tonic = {}\n", self.scoring.tonic));
        output.push_str(&format!(
            "matches_seventh = {}\n",
            self.scoring.matches_seventh
        ));
        output.push_str(&format!("non_match = {}\n", self.scoring.non_match));
        output.push_str(&format!(
            "first_chord_tonic = {}\n",
            self.scoring.first_chord_tonic
        ));
        output.push_str(&format!("no_tonic = {}\n", self.scoring.no_tonic));
        output.push_str(&format!("has_dominant = {}\n", self.scoring.has_dominant));
        output.push_str(&format!("top = {}\n", self.scoring.top));

        output.push_str("\n[display]\n");
        output.push_str(&format!("unicode = {}\n", self.display.unicode));
        output.push_str(&format!("verbose = {}\n", self.display.verbose));

        output.push_str("\n[telemetry]\n");
        output.push_str(&format!(
            "log_level = {:?}\n",
            self.telemetry.log_level
        ));

        output
    }
}
