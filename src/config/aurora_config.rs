//! Aurora Configuration - feeds, interval, scale ranges and sinks as TOML values
//!
//! Each struct implements `Default` with the values in [`super::defaults`], so a
//! node with no config file polls NOAA every 60 s and logs alerts to the console.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use super::defaults;

/// Environment variable naming the config file path.
pub const CONFIG_ENV_VAR: &str = "AURORA_CONFIG";

/// Config file looked for in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "aurora.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for one display node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuroraConfig {
    /// Poll loop timing
    #[serde(default)]
    pub poll: PollConfig,

    /// Feed endpoints and HTTP behaviour
    #[serde(default)]
    pub feeds: FeedConfig,

    /// Raw value mapped to the top of each severity scale
    #[serde(default)]
    pub scales: SeverityRanges,

    /// Alert delivery
    #[serde(default)]
    pub notify: NotifyConfig,

    /// Ring output
    #[serde(default)]
    pub display: DisplayConfig,
}

impl AuroraConfig {
    /// Load configuration using the standard search order:
    /// 1. `$AURORA_CONFIG` environment variable
    /// 2. `./aurora.toml` in the current working directory
    /// 3. Built-in defaults
    ///
    /// A file that exists but fails to load is logged and skipped.
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded config from AURORA_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from AURORA_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "AURORA_CONFIG points to non-existent file, falling back");
            }
        }

        // 2. Check ./aurora.toml
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded config from ./aurora.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./aurora.toml, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No aurora.toml found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    ///
    /// Unknown keys are logged as warnings; out-of-range values are errors.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        for w in super::validation::validate_unknown_keys(&contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate values that would otherwise break the loop at runtime.
    ///
    /// Rules:
    /// - Poll interval and feed timeout must be > 0
    /// - Every scale range must be finite and > 0 (used as a divisor)
    /// - Feed URLs must be non-empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        if self.poll.interval_secs == 0 {
            errors.push("poll.interval_secs must be > 0".to_string());
        }
        if self.feeds.timeout_secs == 0 {
            errors.push("feeds.timeout_secs must be > 0".to_string());
        }

        for (name, value) in self.scales.named() {
            if !value.is_finite() || value <= 0.0 {
                errors.push(format!("scales.{name} = {value} must be finite and > 0"));
            }
        }

        for (name, url) in self.feeds.named_urls() {
            if url.trim().is_empty() {
                errors.push(format!("feeds.{name} must not be empty"));
            }
        }

        if let Some(ref url) = self.notify.webhook_url {
            if url.trim().is_empty() {
                errors.push("notify.webhook_url must not be empty when set".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({0:?}): {1}")]
    Io(PathBuf, std::io::Error),

    #[error("Config parse error ({0:?}): {1}")]
    Parse(PathBuf, toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(toml::ser::Error),

    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ============================================================================
// Poll Config
// ============================================================================

/// Poll loop timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollConfig {
    /// Seconds between the start of consecutive cycles.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

fn default_interval_secs() -> u64 {
    defaults::POLL_INTERVAL_SECS
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

// ============================================================================
// Feed Config
// ============================================================================

/// Feed endpoints and HTTP behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub mag_5_minute_url: String,
    pub scales_url: String,
    pub mag_summary_url: String,
    pub k_index_url: String,
    pub plasma_5_minute_url: String,
    /// Per-request timeout (seconds).
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            mag_5_minute_url: defaults::MAG_5_MINUTE_URL.to_string(),
            scales_url: defaults::NOAA_SCALES_URL.to_string(),
            mag_summary_url: defaults::MAG_SUMMARY_URL.to_string(),
            k_index_url: defaults::PLANETARY_K_INDEX_URL.to_string(),
            plasma_5_minute_url: defaults::PLASMA_5_MINUTE_URL.to_string(),
            timeout_secs: defaults::FEED_HTTP_TIMEOUT_SECS,
            user_agent: defaults::FEED_USER_AGENT.to_string(),
        }
    }
}

impl FeedConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn named_urls(&self) -> [(&'static str, &str); 5] {
        [
            ("mag_5_minute_url", &self.mag_5_minute_url),
            ("scales_url", &self.scales_url),
            ("mag_summary_url", &self.mag_summary_url),
            ("k_index_url", &self.k_index_url),
            ("plasma_5_minute_url", &self.plasma_5_minute_url),
        ]
    }
}

// ============================================================================
// Severity Ranges
// ============================================================================

/// Raw value mapped to the top (5) of each severity scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityRanges {
    /// Bt (nT)
    pub bt_max: f64,
    /// Southward Bz magnitude (nT)
    pub bz_max: f64,
    /// Proton density (p/cm³)
    pub density_max: f64,
    /// Bulk speed (km/s)
    pub speed_max: f64,
}

impl Default for SeverityRanges {
    fn default() -> Self {
        Self {
            bt_max: defaults::BT_MAX_NT,
            bz_max: defaults::BZ_MAX_NT,
            density_max: defaults::DENSITY_MAX_PER_CM3,
            speed_max: defaults::SPEED_MAX_KM_S,
        }
    }
}

impl SeverityRanges {
    fn named(&self) -> [(&'static str, f64); 4] {
        [
            ("bt_max", self.bt_max),
            ("bz_max", self.bz_max),
            ("density_max", self.density_max),
            ("speed_max", self.speed_max),
        ]
    }
}

// ============================================================================
// Notify / Display Config
// ============================================================================

/// Alert delivery. Without a webhook, alerts go to the log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Incoming-webhook URL receiving `{"text": "<alert>"}` posts.
    #[serde(default)]
    pub webhook_url: Option<String>,
}

/// Ring output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Draw each frame to the log as a text ring.
    #[serde(default = "default_console")]
    pub console: bool,
}

fn default_console() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            console: default_console(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
