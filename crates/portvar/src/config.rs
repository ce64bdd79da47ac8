//! Application configuration
//!
//! An optional `config.yaml` in the data directory supplies defaults; command
//! line flags override it. The file is only ever read.
//!
//! ```yaml
//! data_file: /data/NYSE_2015_to_2016.xlsx
//! export_dir: ~/charts
//! export_width: 1024
//! export_height: 640
//! seed: 42
//! analysis:
//!   return_lag: 4
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use portvar_core::AnalysisConfig;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "config.yaml";
pub const DEFAULT_DATA_FILE: &str = "NYSE_2015_to_2016.xlsx";
pub const DEFAULT_EXPORT_FILE: &str = "portfolio_variance.png";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Price sheet to analyse
    pub data_file: PathBuf,
    /// Directory pre-filled in the export prompt
    pub export_dir: PathBuf,
    pub export_width: usize,
    pub export_height: usize,
    /// Fixed RNG seed; `None` draws a fresh selection every run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub analysis: AnalysisConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            export_dir: PathBuf::from("."),
            export_width: 800,
            export_height: 500,
            seed: None,
            analysis: AnalysisConfig::default(),
        }
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data_file: Option<PathBuf>,
    pub seed: Option<u64>,
    pub return_lag: Option<usize>,
}

/// Error types for configuration loading
#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "IO error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl AppConfig {
    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE_NAME)
    }

    /// Load `config.yaml` from `data_dir`, falling back to defaults when absent.
    pub fn load(data_dir: &Path) -> Result<Self, ConfigError> {
        let path = Self::path_in(data_dir);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        let config = Self::from_yaml(&content)
            .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))?;

        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_saphyr::from_str(yaml)
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(data_file) = overrides.data_file {
            self.data_file = data_file;
        }
        if let Some(seed) = overrides.seed {
            self.seed = Some(seed);
        }
        if let Some(lag) = overrides.return_lag {
            self.analysis.return_lag = lag;
        }
        self
    }

    /// Path suggested when the export prompt opens
    pub fn default_export_path(&self) -> PathBuf {
        self.export_dir.join(DEFAULT_EXPORT_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = AppConfig::load(dir.path()).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.analysis.return_lag, 4);
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let config = AppConfig::from_yaml(
            "data_file: prices.csv\nseed: 7\nanalysis:\n  return_lag: 2\n",
        )
        .unwrap();

        assert_eq!(config.data_file, PathBuf::from("prices.csv"));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.analysis.return_lag, 2);
        assert_eq!(config.export_width, 800);
        assert_eq!(config.export_dir, PathBuf::from("."));
    }

    #[test]
    fn test_malformed_yaml_is_a_parse_error() {
        let dir = tempdir().unwrap();
        fs::write(AppConfig::path_in(dir.path()), "export_width: [wide\n").unwrap();

        let err = AppConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_overrides_win() {
        let config = AppConfig::from_yaml("data_file: a.csv\nseed: 1\n")
            .unwrap()
            .with_overrides(ConfigOverrides {
                data_file: Some(PathBuf::from("b.csv")),
                seed: None,
                return_lag: Some(8),
            });

        assert_eq!(config.data_file, PathBuf::from("b.csv"));
        assert_eq!(config.seed, Some(1));
        assert_eq!(config.analysis.return_lag, 8);
    }

    #[test]
    fn test_default_export_path() {
        let mut config = AppConfig::default();
        config.export_dir = PathBuf::from("/tmp/charts");
        assert_eq!(
            config.default_export_path(),
            PathBuf::from("/tmp/charts/portfolio_variance.png")
        );
    }
}
