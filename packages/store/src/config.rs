//! # Console configuration — `console.toml`
//!
//! Build-time settings for the operations console. The web entry point embeds the
//! file and parses it once at startup.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "/api/v1"        # relative = resolved against the page origin
//!
//! [clock]
//! tick_interval_secs = 60     # how often elapsed-time labels refresh
//!
//! [session]
//! sign_out_on_unauthorized = true
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Every section and field has a serde default, so a missing or empty file is
//! equivalent to [`ConsoleConfig::default`].

use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid console config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration stored in `console.toml`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the record/billing/auth service lives.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ApiConfig {
    /// Prefix every request path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "/api/v1".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ClockConfig {
    /// Live duration refresh period in seconds. Clamped to at least 1.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_secs: u32,
}

fn default_tick_interval() -> u32 {
    60
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: default_tick_interval(),
        }
    }
}

impl ClockConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.tick_interval_secs.max(1)))
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SessionConfig {
    /// Drop the stored credential when an authenticated request comes back 401.
    #[serde(default = "default_sign_out_on_unauthorized")]
    pub sign_out_on_unauthorized: bool,
}

fn default_sign_out_on_unauthorized() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sign_out_on_unauthorized: default_sign_out_on_unauthorized(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoggingConfig {
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl ConsoleConfig {
    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = ConsoleConfig::from_toml("").unwrap();
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.api.base_url, "/api/v1");
        assert_eq!(config.clock.tick_interval(), Duration::from_secs(60));
        assert!(config.session.sign_out_on_unauthorized);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = ConsoleConfig::from_toml(
            r#"
            [api]
            base_url = "https://parking.example.com/api/v1"

            [session]
            sign_out_on_unauthorized = false
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://parking.example.com/api/v1");
        assert!(!config.session.sign_out_on_unauthorized);
        assert_eq!(config.clock.tick_interval_secs, 60);
    }

    #[test]
    fn test_zero_tick_interval_is_clamped() {
        let clock = ClockConfig {
            tick_interval_secs: 0,
        };
        assert_eq!(clock.tick_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let err = ConsoleConfig::from_toml("[clock]\ntick_interval_secs = \"soon\"").unwrap_err();
        assert!(err.to_string().starts_with("invalid console config"));
    }
}
