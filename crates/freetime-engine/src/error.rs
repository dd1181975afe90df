//! Error types for freetime-engine operations.

use thiserror::Error;

/// Boxed error returned by an [`OccurrenceSource`](crate::source::OccurrenceSource).
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum FreeTimeError {
    #[error("Invalid work window: {0}")]
    InvalidWindow(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid RRULE: {0}")]
    InvalidRule(String),

    #[error("Expansion error: {0}")]
    Expansion(String),

    /// The occurrence source failed. The original error is kept as the source.
    #[error("Occurrence source failed: {0}")]
    Source(#[source] SourceError),
}

pub type Result<T> = std::result::Result<T, FreeTimeError>;
