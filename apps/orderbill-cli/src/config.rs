//! # CLI Configuration
//!
//! Billing policy overrides and output settings.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --format text                                                      │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     ORDERBILL_FORMAT=text                                              │
//! │     ORDERBILL_GST_BPS=500                                              │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config PATH, else $ORDERBILL_CONFIG, else                        │
//! │     ~/.config/orderbill/orderbill.toml (Linux)                         │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     BillingPolicy::default(), JSON output                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [output]
//! format = "text"
//!
//! [policy]
//! gst_rate_bps = 500
//!
//! [policy.delivery]
//! otherwise = 0
//! tiers = [{ below = 500, fee = 30 }, { below = 1000, fee = 15 }]
//!
//! [policy.coupons]
//! first_order_cap = 150
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use directories::ProjectDirs;
use orderbill_core::{BillingPolicy, TaxRate};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "ORDERBILL_CONFIG";

// =============================================================================
// Output Format
// =============================================================================

/// How the bill is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed bill JSON.
    #[default]
    Json,
    /// Human-readable receipt.
    Text,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            _ => Err(format!("Invalid output format: {} (expected json or text)", s)),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
}

// =============================================================================
// CLI Config
// =============================================================================

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub policy: BillingPolicy,

    #[serde(default)]
    pub output: OutputSettings,
}

impl CliConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file
    /// 3. Environment variables
    ///
    /// A file named by `--config` or `ORDERBILL_CONFIG` must exist; the
    /// platform default path is optional.
    pub fn load(explicit_path: Option<&Path>) -> CliResult<Self> {
        let named = explicit_path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

        let mut config = match named {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::ConfigNotFound(path.display().to_string()));
                }
                Self::from_file(&path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.policy.validate()?;

        Ok(config)
    }

    /// Parses a TOML document.
    pub fn from_toml_str(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    fn from_file(path: &Path) -> CliResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Platform config path, e.g. `~/.config/orderbill/orderbill.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "orderbill", "orderbill")
            .map(|dirs| dirs.config_dir().join("orderbill.toml"))
    }

    /// Applies `ORDERBILL_*` overrides read through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(format) = lookup("ORDERBILL_FORMAT") {
            match format.parse() {
                Ok(parsed) => {
                    debug!(%format, "Overriding output format from environment");
                    self.output.format = parsed;
                }
                Err(e) => warn!("Ignoring ORDERBILL_FORMAT: {}", e),
            }
        }

        if let Some(bps) = lookup("ORDERBILL_GST_BPS") {
            match bps.trim().parse::<u32>() {
                Ok(parsed) => {
                    debug!(gst_bps = parsed, "Overriding GST rate from environment");
                    self.policy.gst_rate = TaxRate::from_bps(parsed);
                }
                Err(_) => warn!(value = %bps, "Ignoring ORDERBILL_GST_BPS: not a whole number"),
            }
        }
    }
}
