//! Authentication error types

/// Errors from token providers.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No access token is configured.
    #[error("No access token configured")]
    MissingToken,

    /// The stored access token has expired.
    #[error("Access token expired")]
    TokenExpired,

    /// The token source failed to produce a token.
    #[error("Token source error: {0}")]
    Provider(String),
}
