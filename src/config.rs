//! Configuration file handling.
//!
//! This module provides loading and saving of cvscore configuration
//! from a TOML file.
//!
//! # Configuration Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/cvscore/config.toml`
//! - macOS: `~/Library/Application Support/cvscore/config.toml`
//! - Windows: `%APPDATA%\cvscore\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! default_format = "table"
//! fail_on = "high"
//!
//! [ignore]
//! vectors = ["CVSS:3.1/AV:P/*"]
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::Severity;

/// Application configuration.
///
/// Every field has a default, so a partial file is valid.
///
/// # Example
///
/// ```no_run
/// use cvscore::Config;
///
/// let config = Config::load().unwrap();
/// println!("Output format: {}", config.default_format);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output format when no `--format` flag is provided.
    ///
    /// Valid values: "table", "json"
    /// Default: "table"
    pub default_format: String,

    /// Severity at or above which `batch` exits with a non-zero code,
    /// when `--fail-on` is not given.
    ///
    /// Default: unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_on: Option<Severity>,

    /// Inputs to skip during batch rating.
    #[serde(default)]
    pub ignore: IgnoreConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreConfig {
    /// Vector patterns to skip. Supports `*` wildcards,
    /// e.g. "CVSS:3.1/AV:P/*".
    pub vectors: Vec<String>,
}

impl IgnoreConfig {
    pub fn should_ignore_vector(&self, vector: &str) -> bool {
        self.vectors.iter().any(|pattern| {
            if pattern.contains('*') {
                glob_match(pattern, vector)
            } else {
                pattern == vector
            }
        })
    }
}

/// Simple glob matching (supports * as wildcard).
fn glob_match(pattern: &str, text: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();

    if parts.len() == 1 {
        return pattern == text;
    }

    let mut remaining = text;

    // Prefix before the first *
    if !parts[0].is_empty() {
        match remaining.strip_prefix(parts[0]) {
            Some(rest) => remaining = rest,
            None => return false,
        }
    }

    // Suffix after the last *
    let last_part = parts[parts.len() - 1];
    if !last_part.is_empty() {
        match remaining.strip_suffix(last_part) {
            Some(rest) => remaining = rest,
            None => return false,
        }
    }

    for part in &parts[1..parts.len() - 1] {
        if part.is_empty() {
            continue;
        }
        match remaining.find(part) {
            Some(pos) => remaining = &remaining[pos + part.len()..],
            None => return false,
        }
    }

    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_format: "table".to_string(),
            fail_on: None,
            ignore: IgnoreConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that parse but cannot be acted on.
    fn validate(&self) -> Result<()> {
        if self.fail_on == Some(Severity::None) {
            anyhow::bail!("fail_on must be one of low, medium, high, critical");
        }
        Ok(())
    }

    /// Saves the configuration, creating the parent directory if needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    ///
    /// # Example
    ///
    /// ```
    /// use cvscore::Config;
    ///
    /// let path = Config::config_path();
    /// assert!(path.ends_with("cvscore/config.toml"));
    /// ```
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cvscore")
            .join("config.toml")
    }

    pub fn generate_default_config() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}
