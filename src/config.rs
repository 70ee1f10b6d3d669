use std::fs;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::corpus::DEFAULT_LINE_BREAK_MARKER;
use crate::gate::Gate;

const CONFIG_DIR_NAME: &str = "idlesbot";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// One post per `odds` invocations on average.
    #[serde(default = "default_odds")]
    pub odds: u32,
    /// Relative paths resolve against the working directory.
    #[serde(default = "default_corpus")]
    pub corpus: PathBuf,
    #[serde(default = "default_line_break_marker")]
    pub line_break_marker: String,
    #[serde(default)]
    pub twitter: TwitterConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TwitterConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Unset leaves the HTTP client's own default in place.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_filter")]
    pub filter: String,
}

fn default_odds() -> u32 {
    10
}

fn default_corpus() -> PathBuf {
    PathBuf::from("idles.txt")
}

fn default_line_break_marker() -> String {
    DEFAULT_LINE_BREAK_MARKER.to_string()
}

fn default_api_base() -> String {
    "https://api.twitter.com/1.1".to_string()
}

fn default_logging_filter() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            odds: default_odds(),
            corpus: default_corpus(),
            line_break_marker: default_line_break_marker(),
            twitter: TwitterConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for TwitterConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            timeout_secs: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_logging_filter(),
        }
    }
}

impl Config {
    /// `~/.config/idlesbot/config.toml` on Linux, platform equivalent elsewhere.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// An explicit path must exist. The default location is optional and
    /// falls back to built-in defaults when absent. Not validated, so that
    /// command-line overrides can still apply.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.odds == 0 {
            return Err(anyhow!("odds must be at least 1"));
        }
        if self.corpus.as_os_str().is_empty() {
            return Err(anyhow!("corpus path cannot be empty"));
        }
        if self.twitter.api_base.trim().is_empty() {
            return Err(anyhow!("twitter.api_base cannot be empty"));
        }
        if self.twitter.timeout_secs == Some(0) {
            return Err(anyhow!("twitter.timeout_secs must be positive when set"));
        }
        if self.logging.filter.trim().is_empty() {
            return Err(anyhow!("logging.filter cannot be empty"));
        }
        Ok(())
    }

    pub fn gate(&self) -> Result<Gate> {
        NonZeroU32::new(self.odds)
            .map(Gate::new)
            .ok_or_else(|| anyhow!("odds must be at least 1"))
    }
}
