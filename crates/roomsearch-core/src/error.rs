//! Error types for roomsearch-core

use thiserror::Error;

/// Result type alias using roomsearch-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring a search.
///
/// Search outcomes themselves are never errors: a failed request clears the
/// results and is reported through `tracing`.
#[derive(Error, Debug)]
pub enum Error {
    /// Room pin is not six digits in the allocated range
    #[error("Invalid room pin: {0}")]
    InvalidRoomPin(String),

    /// Base or page URL is missing a scheme or is empty
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Neither a page URL nor a room pin was configured
    #[error("No search page configured: set a page URL or a room pin")]
    MissingPage,

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}
