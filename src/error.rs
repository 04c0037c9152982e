//! Crate-level error types.
//!
//! [`AaioError`] unifies every failure source (configuration, transport,
//! decoding, server-reported errors) behind a single enum so callers can
//! match on the variant they care about while still using `?` for
//! propagation.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AaioError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum AaioError {
    /// A credential or setting required by the operation is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The HTTP request failed (connection, TLS handshake, body read).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The TLS root store could not be built.
    #[error("tls error: {0}")]
    Tls(String),

    /// The response was not a JSON object served as `application/json`.
    #[error("parse error: {0}")]
    Parse(String),

    /// The server answered with a non-success `type`.
    #[error("remote error: {message}")]
    Remote { message: String },

    /// The response JSON does not match the expected record shape.
    #[error("validation error: {0}")]
    Validation(String),

    /// A named method is not present in the server's method list.
    #[error("method not found: {0}")]
    MethodNotFound(String),

    /// The configured base URL is not a valid URL.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

impl AaioError {
    /// Returns `true` if the server reported the failure.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }

    /// Returns the server-supplied message for remote errors.
    #[must_use]
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            Self::Remote { message } => Some(message),
            _ => None,
        }
    }
}
