//! Error types for the ServiceDesk Plus client.
//!
//! This module defines `SdpError`, the unified error type returned by every
//! client operation.
//!
//! # Security
//!
//! The technician key travels in the query string of every request, so
//! transport errors that echo the request URL may contain it. Use
//! `sanitized_display()` whenever an error is logged or shown to a user.

use thiserror::Error;

/// Unified error type for all client operations.
#[derive(Error, Debug)]
pub enum SdpError {
    /// Configuration error - missing or invalid values.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// HTTP request failed during transmission (connect, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("invalid JSON response: {0}")]
    InvalidResponse(#[source] serde_json::Error),

    /// The payload could not be serialized to JSON.
    #[error("JSON serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The HTTP method is not one of GET, POST, PUT or DELETE.
    ///
    /// No request is sent when this is returned.
    #[error("unsupported HTTP method: {0:?}")]
    UnsupportedMethod(String),

    /// An endpoint template was rendered with the wrong number of path parameters.
    #[error("{action} expects {expected} path parameter(s), got {got}")]
    PathParams {
        /// Name of the action being dispatched.
        action: &'static str,
        /// Number of placeholders in the path template.
        expected: usize,
        /// Number of parameters supplied.
        got: usize,
    },

    /// Connection test failed.
    #[error("connection test failed: {message}")]
    ConnectionTest {
        /// Details about why the connection test failed.
        message: String,
    },
}

impl SdpError {
    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        SdpError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        SdpError::Config(message.into())
    }

    /// Creates a connection test error.
    pub fn connection_test(message: impl Into<String>) -> Self {
        SdpError::ConnectionTest {
            message: message.into(),
        }
    }

    /// Returns true if this is a transport failure that may succeed when repeated.
    ///
    /// The client itself never retries; this is for callers that layer
    /// their own policy on top.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            SdpError::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Replaces every occurrence of the API key in `message` with `[REDACTED]`.
    ///
    /// The key is matched raw, form-encoded (as it appears in the
    /// `TECHNICIAN_KEY` query string) and percent-encoded.
    #[must_use]
    pub fn sanitize_message(message: &str, api_key: &str) -> String {
        if api_key.is_empty() {
            return message.to_string();
        }

        let form_encoded: String = url::form_urlencoded::byte_serialize(api_key.as_bytes()).collect();
        let percent_encoded = urlencoding::encode(api_key).into_owned();

        [api_key, form_encoded.as_str(), percent_encoded.as_str()]
            .into_iter()
            .fold(message.to_string(), |acc, variant| {
                acc.replace(variant, "[REDACTED]")
            })
    }

    /// Returns this error's display message with the API key redacted.
    #[must_use]
    pub fn sanitized_display(&self, api_key: &str) -> String {
        Self::sanitize_message(&self.to_string(), api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env_error() {
        let err = SdpError::missing_env("SDP_API_KEY");
        assert!(err.to_string().contains("SDP_API_KEY"));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_unsupported_method_message() {
        let err = SdpError::UnsupportedMethod("PATCH".to_string());
        assert_eq!(err.to_string(), "unsupported HTTP method: \"PATCH\"");
    }

    #[test]
    fn test_path_params_message() {
        let err = SdpError::PathParams {
            action: "request_view_note",
            expected: 2,
            got: 1,
        };
        assert_eq!(
            err.to_string(),
            "request_view_note expects 2 path parameter(s), got 1"
        );
    }

    #[test]
    fn test_invalid_response_is_not_transient() {
        let json_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = SdpError::InvalidResponse(json_err);
        assert!(!err.is_transient());
        assert!(err.to_string().starts_with("invalid JSON response"));
    }

    #[test]
    fn test_sanitize_message_removes_api_key() {
        let api_key = "super_secret_key_12345";
        let message = format!(
            "error sending request for url (https://sdp.example.com/api/v3/requests?TECHNICIAN_KEY={})",
            api_key
        );
        let sanitized = SdpError::sanitize_message(&message, api_key);
        assert!(!sanitized.contains(api_key));
        assert!(sanitized.contains("TECHNICIAN_KEY=[REDACTED]"));
    }

    #[test]
    fn test_sanitize_message_removes_encoded_api_key() {
        let api_key = "a+b/c=d e";
        let message = "error sending request for url \
             (https://sdp.example.com/api/v3/requests?TECHNICIAN_KEY=a%2Bb%2Fc%3Dd+e)";
        let sanitized = SdpError::sanitize_message(message, api_key);
        assert!(!sanitized.contains("a%2Bb%2Fc%3Dd+e"));
        assert!(sanitized.ends_with("TECHNICIAN_KEY=[REDACTED])"));

        let message = "path contained a%2Bb%2Fc%3Dd%20e";
        assert_eq!(
            SdpError::sanitize_message(message, api_key),
            "path contained [REDACTED]"
        );
    }

    #[test]
    fn test_sanitize_message_empty_key() {
        let message = "Some error message";
        assert_eq!(SdpError::sanitize_message(message, ""), message);
    }

    #[test]
    fn test_sanitized_display() {
        let err = SdpError::connection_test("rejected key abc123");
        assert_eq!(
            err.sanitized_display("abc123"),
            "connection test failed: rejected key [REDACTED]"
        );
    }
}
