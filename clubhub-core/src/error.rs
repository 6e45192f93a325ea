//! Error types for the clubhub ecosystem.

use thiserror::Error;

/// Errors that can occur in clubhub operations.
///
/// Field validation failures are not errors; see [`crate::validate::FieldError`].
#[derive(Error, Debug)]
pub enum ClubHubError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid month '{0}'. Expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Unknown filter '{0}'")]
    UnknownFilter(String),

    #[error("Unknown form '{0}'")]
    UnknownForm(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for clubhub operations.
pub type ClubHubResult<T> = Result<T, ClubHubError>;
