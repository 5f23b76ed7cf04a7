//! Error types for the `apigate-core` crate.

/// Errors raised while building [`Settings`](crate::Settings).
///
/// Every variant is fatal at startup: the process must not serve requests
/// with a configuration that failed to load.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// `API_KEY` was not set, or was set to an empty string.
    #[error("missing required secret: API_KEY must be set to a non-empty value")]
    MissingApiKey,

    /// `API_KEY` contains bytes that cannot travel in an HTTP header value.
    #[error("invalid API_KEY: {reason}")]
    InvalidApiKey { reason: String },

    /// `API_V1_STR` cannot be used as a route prefix.
    #[error("invalid API prefix '{value}': {reason}")]
    InvalidApiPrefix { value: String, reason: String },

    /// `BACKEND_CORS_ORIGINS` could not be read as a list.
    #[error("invalid origins format: {reason}")]
    InvalidOriginsFormat { reason: String },

    /// An origins entry is not an absolute HTTP/HTTPS URL.
    #[error("invalid origin '{value}': {reason}")]
    InvalidOrigin { value: String, reason: String },

    /// The env file exists but could not be read or parsed.
    #[error("failed to load env file: {0}")]
    EnvFile(#[from] dotenvy::Error),
}

/// Rejection produced by the API key guard.
///
/// The message is fixed and never carries the supplied or expected key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Could not validate API key")]
#[non_exhaustive]
pub struct AuthenticationError;

impl AuthenticationError {
    /// Creates the rejection.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for AuthenticationError {
    fn default() -> Self {
        Self::new()
    }
}
