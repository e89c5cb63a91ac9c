//! Administrator threshold configuration.
//!
//! Values are built once at startup, from defaults, a JSON document, or
//! environment overrides, and never change afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default inclusive upper bound for the `low` tier.
pub const DEFAULT_LOW_VALUE: i32 = 26;
/// Default inclusive upper bound for the `medium` tier.
pub const DEFAULT_MEDIUM_VALUE: i32 = 51;
/// Default inclusive upper bound for the `high` tier.
pub const DEFAULT_HIGH_VALUE: i32 = 76;

/// Env var overriding [`ThresholdConfig::low_value`].
pub const ENV_LOW_VALUE: &str = "AKAMAI_RISK_LOW_VALUE";
/// Env var overriding [`ThresholdConfig::medium_value`].
pub const ENV_MEDIUM_VALUE: &str = "AKAMAI_RISK_MEDIUM_VALUE";
/// Env var overriding [`ThresholdConfig::high_value`].
pub const ENV_HIGH_VALUE: &str = "AKAMAI_RISK_HIGH_VALUE";
/// Env var overriding [`ThresholdConfig::save_akamai_header`].
pub const ENV_SAVE_HEADER: &str = "AKAMAI_RISK_SAVE_HEADER";

/// Thresholds and storage flag for the four-tier scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ThresholdConfig {
    /// Inclusive upper bound for `low`.
    pub low_value: i32,
    /// Inclusive upper bound for `medium`.
    pub medium_value: i32,
    /// Inclusive upper bound for `high`; anything above is `critical`.
    pub high_value: i32,
    /// Also store decoded signals in shared (long-lived) flow state.
    pub save_akamai_header: bool,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            low_value: DEFAULT_LOW_VALUE,
            medium_value: DEFAULT_MEDIUM_VALUE,
            high_value: DEFAULT_HIGH_VALUE,
            save_akamai_header: false,
        }
    }
}

impl ThresholdConfig {
    /// Returns `true` when `low <= medium <= high`.
    ///
    /// Classification works with any order; this is only reported.
    pub fn is_monotonic(&self) -> bool {
        self.low_value <= self.medium_value && self.medium_value <= self.high_value
    }

    /// Parses configuration from JSON; missing fields take defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError::Decode`] for malformed JSON or unknown fields.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::Decode)?;
        config.warn_if_unordered();
        Ok(config)
    }

    /// Loads configuration from process environment.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidEnv`] when a set variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidEnv`] when a set variable cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            low_value: int_override(&lookup, ENV_LOW_VALUE, defaults.low_value)?,
            medium_value: int_override(&lookup, ENV_MEDIUM_VALUE, defaults.medium_value)?,
            high_value: int_override(&lookup, ENV_HIGH_VALUE, defaults.high_value)?,
            save_akamai_header: bool_override(
                &lookup,
                ENV_SAVE_HEADER,
                defaults.save_akamai_header,
            )?,
        };
        config.warn_if_unordered();
        Ok(config)
    }

    fn warn_if_unordered(&self) {
        if !self.is_monotonic() {
            tracing::warn!(
                low = self.low_value,
                medium = self.medium_value,
                high = self.high_value,
                "risk thresholds are not ascending; tiers are still evaluated top-down"
            );
        }
    }
}

fn int_override<F>(lookup: &F, name: &'static str, default: i32) -> Result<i32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidEnv { name, value }),
        None => Ok(default),
    }
}

// Accepts `1/true/on/yes` and `0/false/off/no`, case-insensitive.
fn bool_override<F>(lookup: &F, name: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(name) else {
        return Ok(default);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidEnv { name, value }),
    }
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON document could not be decoded.
    #[error("threshold config decode failure: {0}")]
    Decode(#[from] serde_json::Error),
    /// Environment variable value could not be parsed.
    #[error("invalid value `{value}` for {name}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },
}
