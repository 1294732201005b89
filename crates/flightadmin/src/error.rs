//! Error types for flightadmin.
//!
//! This module defines all error types used throughout the flightadmin crate.
//! HTTP failures keep the status code and the raw response body so that views
//! can map them to user-facing messages.

use thiserror::Error;

/// Body the backend sends when the requested pilot is already booked.
pub const PILOT_UNAVAILABLE_BODY: &str =
    "Error: The pilot is not available during the selected time.";

/// Body the backend sends when the requested aircraft is already booked.
pub const AIRCRAFT_UNAVAILABLE_BODY: &str =
    "Error: The aircraft is not available during the selected time.";

/// The main error type for flightadmin operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === API Errors ===
    /// The backend answered with a non-2xx status.
    #[error("backend returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The request never produced a response (connection refused, DNS, ...).
    #[error("request to {path} failed: {message}")]
    Transport {
        /// Path that was requested.
        path: String,
        /// Description of what went wrong.
        message: String,
    },

    /// A successful response could not be decoded into the expected type.
    #[error("failed to decode response from {path}: {source}")]
    Decode {
        /// Path that was requested.
        path: String,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    // === Client-side Errors ===
    /// Input was rejected before any request was sent.
    #[error("{0}")]
    Validation(String),

    /// A dependent choice was made before its prerequisite, or is not offered.
    #[error("invalid selection: {0}")]
    Selection(String),

    // === I/O Errors ===
    /// Terminal or file system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for flightadmin operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

/// Cause of a 409 response, recovered from the body text.
///
/// The backend does not send structured codes, so the body is compared
/// verbatim. Any change in wording lands in [`Conflict::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    /// The pilot already flies during the requested window.
    PilotUnavailable,
    /// The aircraft is already in use during the requested window.
    AircraftUnavailable,
    /// Any other conflict body.
    Other(String),
}

impl Conflict {
    /// Classify a raw 409 body.
    ///
    /// A body that is itself a JSON string literal is unwrapped first.
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        let text = serde_json::from_str::<String>(body).unwrap_or_else(|_| body.to_string());
        match text.as_str() {
            PILOT_UNAVAILABLE_BODY => Self::PilotUnavailable,
            AIRCRAFT_UNAVAILABLE_BODY => Self::AircraftUnavailable,
            _ => Self::Other(text),
        }
    }
}

impl Error {
    /// Create a new HTTP status error.
    #[must_use]
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Create a new transport error.
    #[must_use]
    pub fn transport(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new selection error.
    #[must_use]
    pub fn selection(message: impl Into<String>) -> Self {
        Self::Selection(message.into())
    }

    /// HTTP status carried by this error, if the backend answered at all.
    #[must_use]
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the backend reported the entity as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.http_status() == Some(404)
    }

    /// Check if the backend refused the change as conflicting.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        self.http_status() == Some(409)
    }

    /// Classify a 409 response. Returns `None` for anything that is not a conflict.
    #[must_use]
    pub fn conflict(&self) -> Option<Conflict> {
        match self {
            Self::Status { status: 409, body } => Some(Conflict::from_body(body)),
            _ => None,
        }
    }

    /// Check if no response object was received.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}
