//! Error types for the Sunshine source
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the Sunshine source
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Invalid credential: {message}")]
    InvalidCredential { message: String },

    // ============================================================================
    // Fetch Errors
    // ============================================================================
    /// Network failure, timeout, 429 or 5xx. The caller owns the retry policy.
    #[error("Transient fetch error for {url}: {message}")]
    TransientFetch {
        url: String,
        status: Option<u16>,
        message: String,
    },

    /// Non-retryable 4xx response
    #[error("HTTP {status} from {url}: {body}")]
    PermanentFetch {
        url: String,
        status: u16,
        body: String,
    },

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Undefined variable in template: {variable}")]
    UndefinedVariable { variable: String },

    // ============================================================================
    // State Errors
    // ============================================================================
    #[error("State error: {message}")]
    State { message: String },

    // ============================================================================
    // Connector Errors
    // ============================================================================
    #[error("Stream '{stream}' not found")]
    StreamNotFound { stream: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid credential error
    pub fn invalid_credential(message: impl Into<String>) -> Self {
        Self::InvalidCredential {
            message: message.into(),
        }
    }

    /// Create a transient fetch error
    pub fn transient(url: impl Into<String>, status: Option<u16>, message: impl Into<String>) -> Self {
        Self::TransientFetch {
            url: url.into(),
            status,
            message: message.into(),
        }
    }

    /// Create a permanent fetch error
    pub fn permanent(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::PermanentFetch {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an undefined variable error
    pub fn undefined_var(variable: impl Into<String>) -> Self {
        Self::UndefinedVariable {
            variable: variable.into(),
        }
    }

    /// Create a state error
    pub fn state(message: impl Into<String>) -> Self {
        Self::State {
            message: message.into(),
        }
    }

    /// Classify a reqwest transport error
    pub fn from_reqwest(url: impl Into<String>, err: &reqwest::Error) -> Self {
        let url = url.into();
        if err.is_decode() {
            return Self::decode(format!("Failed to read response body from {url}: {err}"));
        }
        let status = err.status().map(|s| s.as_u16());
        match status {
            Some(code) if !is_retryable_status(code) => Self::permanent(url, code, err.to_string()),
            _ => Self::transient(url, status, err.to_string()),
        }
    }

    /// HTTP status carried by a fetch error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::TransientFetch { status, .. } => *status,
            Error::PermanentFetch { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::TransientFetch { .. })
    }
}

/// Check if an HTTP status code is retryable
pub(crate) fn is_retryable_status(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}

/// Result type alias for the Sunshine source
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("api_token");
        assert_eq!(err.to_string(), "Missing required config field: api_token");

        let err = Error::permanent("https://acme.zendesk.com/api/sunshine/limits", 404, "Not found");
        assert_eq!(
            err.to_string(),
            "HTTP 404 from https://acme.zendesk.com/api/sunshine/limits: Not found"
        );

        let err = Error::invalid_credential("identity must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid credential: identity must not be empty"
        );
    }

    #[test]
    fn test_is_retryable() {
        assert!(Error::transient("u", Some(503), "unavailable").is_retryable());
        assert!(Error::transient("u", None, "connection reset").is_retryable());

        assert!(!Error::permanent("u", 400, "").is_retryable());
        assert!(!Error::permanent("u", 401, "").is_retryable());
        assert!(!Error::config("test").is_retryable());
        assert!(!Error::invalid_credential("empty").is_retryable());
    }

    #[test]
    fn test_retryable_status() {
        assert!(is_retryable_status(429));
        assert!(is_retryable_status(500));
        assert!(is_retryable_status(503));
        assert!(is_retryable_status(524));
        assert!(!is_retryable_status(400));
        assert!(!is_retryable_status(403));
        assert!(!is_retryable_status(404));
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(Error::permanent("u", 401, "").status(), Some(401));
        assert_eq!(Error::transient("u", Some(502), "").status(), Some(502));
        assert_eq!(Error::transient("u", None, "").status(), None);
        assert_eq!(Error::config("x").status(), None);
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
