//! Unified application error types for StudyHub.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// Authentication failed (missing or invalid identity).
    Authentication,
    /// Input validation failed.
    Validation,
    /// A publish or subscribe referenced a malformed topic identifier.
    UnknownTopic,
    /// A connection mailbox hit capacity and the overflow policy fired.
    /// Internal condition; never surfaced to publishers.
    MailboxOverflow,
    /// A decoded frame carried a tag outside the known event set.
    UnknownEventKind,
    /// A decoded frame had a known tag but a malformed payload shape.
    MalformedEvent,
    /// The underlying transport closed. Normal terminal condition, not
    /// an application failure.
    TransportClosed,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// A configuration error occurred.
    Configuration,
    /// An internal server error occurred.
    Internal,
    /// The service is shutting down or temporarily unavailable.
    ServiceUnavailable,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Authentication => write!(f, "AUTHENTICATION"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::UnknownTopic => write!(f, "UNKNOWN_TOPIC"),
            Self::MailboxOverflow => write!(f, "MAILBOX_OVERFLOW"),
            Self::UnknownEventKind => write!(f, "UNKNOWN_EVENT_KIND"),
            Self::MalformedEvent => write!(f, "MALFORMED_EVENT"),
            Self::TransportClosed => write!(f, "TRANSPORT_CLOSED"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::ServiceUnavailable => write!(f, "SERVICE_UNAVAILABLE"),
        }
    }
}

/// The unified application error used throughout StudyHub.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create an unknown-topic error.
    pub fn unknown_topic(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownTopic, message)
    }

    /// Create an unknown-event-kind error.
    pub fn unknown_event_kind(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownEventKind, message)
    }

    /// Create a malformed-event error.
    pub fn malformed_event(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedEvent, message)
    }

    /// Create a transport-closed error.
    pub fn transport_closed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TransportClosed, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a service-unavailable error.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
