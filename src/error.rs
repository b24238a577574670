//! Error types for the groupware client.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur when calling the remote groupware services.
#[derive(Error, Debug)]
pub enum GroupwareApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Discovery or token acquisition failed before the request was issued
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Generic API error with context
    #[error("API error: {0}")]
    Other(String),
}

/// Errors raised by the discovery/authentication collaborator.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Resource or capability discovery failed
    #[error("Discovery failed for {target}: {reason}")]
    DiscoveryFailed { target: String, reason: String },

    /// Silent token acquisition failed
    #[error("Token acquisition failed: {0}")]
    TokenAcquisition(String),

    /// Server-side session invalidation failed
    #[error("Logout failed for user {user}: {reason}")]
    LogoutFailed { user: String, reason: String },

    /// Generic authentication error
    #[error("Authentication error: {0}")]
    Other(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Other(String),
}

/// Convenience type alias for Results with GroupwareApiError
pub type ApiResult<T> = Result<T, GroupwareApiError>;

/// Convenience type alias for Results with AuthError
pub type AuthResult<T> = Result<T, AuthError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
