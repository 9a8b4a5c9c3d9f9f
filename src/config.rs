//! Configuration for the ServiceDesk Plus client.
//!
//! The client itself only needs a token and a base URL. `Config::from_env`
//! is provided for applications that embed the client and keep their
//! settings in the environment.

use std::env;
use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::SdpError;

/// Default transport timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for a ServiceDesk Plus instance.
///
/// The API key is never printed by the `Debug` implementation.
#[derive(Clone)]
pub struct Config {
    /// Base URL for the SDP instance (e.g., `https://servicedesk.example.com/`).
    pub base_url: String,

    /// Technician API key for authentication.
    pub api_key: String,

    /// Timeout applied by the default HTTP transport.
    pub timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Creates a configuration from a token and base URL with the default timeout.
    ///
    /// No validation is performed; use `from_env` for checked loading.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Sets the timeout used by the default HTTP transport.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Loads configuration from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `SDP_BASE_URL`: The base URL of the ServiceDesk Plus instance
    /// - `SDP_API_KEY`: The technician API key for authentication
    ///
    /// # Optional
    ///
    /// - `SDP_TIMEOUT_SECS`: transport timeout, defaults to 30
    ///
    /// # Errors
    ///
    /// Returns `SdpError::Config` if a required variable is missing
    /// or a value fails validation.
    pub fn from_env() -> Result<Self, SdpError> {
        let base_url = Self::get_required_env("SDP_BASE_URL")?;
        let api_key = Self::get_required_env("SDP_API_KEY")?;

        let base_url = Self::validate_base_url(base_url)?;
        Self::validate_api_key(&api_key)?;

        let timeout = match env::var("SDP_TIMEOUT_SECS") {
            Ok(raw) => Self::parse_timeout(&raw)?,
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Config {
            base_url,
            api_key,
            timeout,
        })
    }

    /// Gets a required environment variable, returning an error if missing or empty.
    fn get_required_env(name: &str) -> Result<String, SdpError> {
        env::var(name)
            .map_err(|_| SdpError::missing_env(name))
            .and_then(|value| {
                if value.trim().is_empty() {
                    Err(SdpError::missing_env(name))
                } else {
                    Ok(value)
                }
            })
    }

    /// Validates the base URL is an absolute http(s) URL.
    fn validate_base_url(raw: String) -> Result<String, SdpError> {
        let raw = raw.trim().to_string();

        let parsed = Url::parse(&raw)
            .map_err(|e| SdpError::invalid_config(format!("SDP_BASE_URL is not a valid URL: {}", e)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SdpError::invalid_config(
                "SDP_BASE_URL must start with http:// or https://",
            ));
        }

        Ok(raw)
    }

    /// Rejects obvious placeholder keys copied from sample `.env` files.
    fn validate_api_key(key: &str) -> Result<(), SdpError> {
        let key_lower = key.to_lowercase();
        let placeholder_patterns = ["your_api_key", "your_key", "placeholder", "changeme"];

        if placeholder_patterns.iter().any(|p| key_lower.contains(p)) {
            return Err(SdpError::invalid_config(
                "SDP_API_KEY appears to be a placeholder value",
            ));
        }

        Ok(())
    }

    fn parse_timeout(raw: &str) -> Result<Duration, SdpError> {
        raw.trim()
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .ok_or_else(|| {
                SdpError::invalid_config("SDP_TIMEOUT_SECS must be a positive number of seconds")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_base_url_trims_whitespace() {
        let result = Config::validate_base_url("  https://example.com/ ".to_string()).unwrap();
        assert_eq!(result, "https://example.com/");
    }

    #[test]
    fn test_validate_base_url_requires_scheme() {
        assert!(Config::validate_base_url("example.com".to_string()).is_err());
        assert!(Config::validate_base_url("ftp://example.com".to_string()).is_err());
    }

    #[test]
    fn test_validate_api_key_rejects_placeholder() {
        assert!(Config::validate_api_key("your_api_key_here").is_err());
    }

    #[test]
    fn test_validate_api_key_accepts_real_key() {
        assert!(Config::validate_api_key("abc123def456").is_ok());
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(Config::parse_timeout("45").unwrap(), Duration::from_secs(45));
        assert!(Config::parse_timeout("0").is_err());
        assert!(Config::parse_timeout("soon").is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config::new("secret-token", "https://example.com/");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("[REDACTED]"));
    }
}
