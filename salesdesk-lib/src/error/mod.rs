//! Error types

mod auth;
mod fetch;
mod validation;

pub use auth::*;
pub use fetch::*;
pub use validation::*;

/// Top-level error type for the Salesdesk client library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Fetch error (network, server rejection, malformed response).
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Authentication error.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Field validation error.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Invalid base URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
