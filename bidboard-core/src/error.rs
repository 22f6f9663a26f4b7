//! Error types for the bidboard calendar engine.

use thiserror::Error;

/// Errors surfaced by calendar operations.
///
/// Date-text parse failures are deliberately absent: `dates::normalize`
/// absorbs them (falling back to today) so the calendar stays renderable.
/// Remote-store failures are likewise absorbed by the gateway's local
/// fallback and only show up here as `Backend` on paths with no fallback
/// left to try.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Event not found: {0}")]
    NotFound(String),

    #[error("Event '{id}' belongs to another user")]
    Unauthorized { id: String },

    #[error("Event '{0}' is a synthesized project milestone and cannot be edited")]
    ReadOnly(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for CalendarError {
    fn from(err: serde_json::Error) -> Self {
        CalendarError::Serialization(err.to_string())
    }
}

/// Result type alias for calendar operations.
pub type CalendarResult<T> = Result<T, CalendarError>;
