//! Error Handling Module
//!
//! This module provides error handling for the DashScope bootstrap layer,
//! including:
//! - Core error types (`DashScopeError`, `ErrorCategory`)
//! - HTTP status classification used by the retry layer
//! - Type conversions from common error types
//!
//! # Example
//!
//! ```rust
//! use dashscope::error::{DashScopeError, ErrorCategory};
//!
//! let error = DashScopeError::api_error(500, "Internal server error");
//! assert_eq!(error.category(), ErrorCategory::Server);
//! assert!(error.is_retryable());
//! ```

use thiserror::Error;

/// Main error type for the DashScope bootstrap layer
#[derive(Error, Debug, Clone)]
pub enum DashScopeError {
    /// Missing or invalid configuration. Fatal: the dependent feature must
    /// not be initialized until configuration is supplied.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Invalid parameter value (out of range, malformed, etc.)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// HTTP transport or client construction error
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    /// API returned an error response
    #[error("API error {code}: {message}")]
    ApiError {
        /// HTTP status code
        code: u16,
        /// Error message from the service
        message: String,
        /// Raw error body when available
        details: Option<serde_json::Value>,
    },

    /// Authentication or authorization failure
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimitError(String),

    /// Request timed out
    #[error("Request timeout: {0}")]
    TimeoutError(String),

    /// Connection could not be established
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Internal library error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Coarse error classification used for retry decisions and reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Authentication/authorization problems
    Authentication,
    /// Rate limiting
    RateLimit,
    /// Other 4xx client errors
    Client,
    /// 5xx server errors
    Server,
    /// Network/transport problems
    Network,
    /// Serialization problems
    Parsing,
    /// Parameter validation problems
    Validation,
    /// Configuration problems
    Configuration,
}

impl DashScopeError {
    /// Create an API error without details
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Create an API error with a raw response body
    pub fn api_error_with_details(
        code: u16,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: Some(details),
        }
    }

    /// Classify this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigurationError(_) => ErrorCategory::Configuration,
            Self::InvalidParameter(_) => ErrorCategory::Validation,
            Self::HttpError(_) | Self::ConnectionError(_) | Self::TimeoutError(_) => {
                ErrorCategory::Network
            }
            Self::JsonError(_) => ErrorCategory::Parsing,
            Self::ApiError { code, .. } => match *code {
                401 | 403 => ErrorCategory::Authentication,
                429 => ErrorCategory::RateLimit,
                400..=499 => ErrorCategory::Client,
                _ => ErrorCategory::Server,
            },
            Self::AuthenticationError(_) => ErrorCategory::Authentication,
            Self::RateLimitError(_) => ErrorCategory::RateLimit,
            Self::InternalError(_) => ErrorCategory::Server,
        }
    }

    /// Whether retrying the failed operation can possibly succeed.
    ///
    /// Configuration and validation errors are never retryable: they can only
    /// be fixed by supplying different inputs.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimitError(_)
            | Self::TimeoutError(_)
            | Self::ConnectionError(_)
            | Self::HttpError(_) => true,
            Self::ApiError { code, .. } => matches!(*code, 408 | 429 | 500..=599),
            _ => false,
        }
    }

    /// HTTP status code associated with this error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            Self::RateLimitError(_) => Some(429),
            Self::AuthenticationError(_) => Some(401),
            _ => None,
        }
    }
}

/// Map an HTTP status code onto the error taxonomy.
///
/// Used by the retry layer to decide retryability from raw responses without
/// any protocol knowledge.
pub fn classify_http_status(status: u16, message: impl Into<String>) -> DashScopeError {
    let message = message.into();
    match status {
        401 | 403 => DashScopeError::AuthenticationError(message),
        408 => DashScopeError::TimeoutError(message),
        429 => DashScopeError::RateLimitError(message),
        _ => DashScopeError::api_error(status, message),
    }
}

impl From<reqwest::Error> for DashScopeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::TimeoutError(err.to_string())
        } else if err.is_connect() {
            Self::ConnectionError(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DashScopeError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}
