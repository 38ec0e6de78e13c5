//! Error types for the memberlink libraries.
//!
//! This module provides a unified error type with explicit variants for
//! transport, remote API, attribute validation, and input errors.
//!
//! Two remote conditions deliberately do NOT surface as errors from the
//! higher layers: a 404 on a lookup is a normal empty result, and a 400
//! from the email filter (more than one record shares the address) routes
//! the resolver onto its full-directory fallback. The [`ApiError`] helpers
//! exist so those layers can classify responses.

use std::fmt;
use thiserror::Error;

/// The unified error type for memberlink operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, protocol).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Non-2xx responses from the remote API.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// Attribute-shape violations, rejected before any network call.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Input validation errors (invalid URL, empty email, empty query).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// A non-2xx response from the remote API.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Remote error code (if present).
    pub code: Option<String>,
    /// Error message from the server.
    pub message: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref code) = self.code {
            write!(f, " [{}]", code)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, code: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            code,
            message,
        }
    }

    /// The record does not exist. Treated as an empty result, not a failure.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// The listing endpoint rejects an email filter with 400 when several
    /// records share the address. Callers fall back to the full directory.
    pub fn is_ambiguous_match(&self) -> bool {
        self.status == 400
    }
}

/// Attribute-shape violations.
///
/// The remote enforces these on custom attributes; they are checked locally
/// so a bad map never reaches the wire.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// More than 100 custom attributes.
    #[error("maximum of 100 attributes, got {count}")]
    TooManyAttributes { count: usize },

    /// Attribute key contains '.' or '$'.
    #[error("attribute key '{key}' must not contain '.' or '$'")]
    InvalidKey { key: String },

    /// Attribute key longer than 190 characters.
    #[error("attribute key of length {len} exceeds 190 characters")]
    KeyTooLong { len: usize },

    /// Attribute value is null.
    #[error("attribute '{key}' has a null value")]
    NullValue { key: String },

    /// Attribute value is not a scalar (string, number, or boolean).
    #[error("attribute '{key}' must be a string, number, or boolean")]
    UnsupportedValue { key: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Email address is empty.
    #[error("email must not be empty")]
    EmptyEmail,

    /// View query has none of id, user_id, or email set.
    #[error("a view query needs one of 'id', 'user_id', or 'email'")]
    EmptyQuery,
}
