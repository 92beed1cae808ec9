use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::constants;
use crate::error::{GrouperError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grouping: GroupingConfig,
    pub timezone: TimezoneConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Tuning knobs for the clustering engine
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GroupingConfig {
    /// Pass 1 stops scanning once a cluster's latest date is further than this from the record
    pub recency_window_days: i64,
    /// How many days apart two date spans may be and still count as adjacent
    pub adjacency_days: i64,
    /// Shortest common substring accepted as a merged display name
    pub min_common_name_chars: usize,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            recency_window_days: 1,
            adjacency_days: 1,
            min_common_name_chars: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimezoneConfig {
    /// Drop past occurrences before writing output
    pub filter_past: bool,
}

impl Default for TimezoneConfig {
    fn default() -> Self {
        Self { filter_past: true }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(constants::DEFAULT_OUTPUT_DIR),
            pretty: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for the rolling JSON log file
    pub dir: PathBuf,
    /// Directive used when `RUST_LOG` is not set
    pub default_directive: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(constants::DEFAULT_LOG_DIR),
            default_directive: constants::DEFAULT_LOG_DIRECTIVE.to_string(),
        }
    }
}

impl Config {
    /// Load config from `GIG_GROUPER_CONFIG` or `config.toml`, falling back to defaults
    /// when the file does not exist. Environment overrides are applied last.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let config_path = std::env::var(constants::CONFIG_PATH_ENV)
            .unwrap_or_else(|_| constants::DEFAULT_CONFIG_PATH.to_string());

        let mut config = if Path::new(&config_path).exists() {
            Self::from_file(&config_path)?
        } else {
            debug!("No config file at {}, using defaults", config_path);
            Self::default()
        };

        if let Ok(dir) = std::env::var(constants::OUTPUT_DIR_ENV) {
            if !dir.trim().is_empty() {
                config.output.dir = PathBuf::from(dir);
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config_content = fs::read_to_string(path).map_err(|e| {
            GrouperError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.grouping.recency_window_days < 0 || self.grouping.adjacency_days < 0 {
            return Err(GrouperError::Config(
                "grouping windows must not be negative".to_string(),
            ));
        }
        if self.grouping.recency_window_days > constants::MAX_WINDOW_DAYS
            || self.grouping.adjacency_days > constants::MAX_WINDOW_DAYS
        {
            return Err(GrouperError::Config(format!(
                "grouping windows must not exceed {} days",
                constants::MAX_WINDOW_DAYS
            )));
        }
        Ok(())
    }
}
