//! Fetch error types

/// Errors that can occur while fetching from the REST data source.
///
/// The taxonomy is deliberately small: a request either never completed
/// (`Network`), completed with a rejection (`Rejected`), or completed with a
/// body the client could not decode (`Malformed`).
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Network error before a response was received.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body, if any.
        message: String,
        /// Machine-readable error code from the response body, if any.
        code: Option<String>,
    },

    /// The response body could not be decoded.
    #[error("Malformed response: {message}")]
    Malformed {
        /// Description of the decode failure.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl FetchError {
    /// Creates a new rejection error.
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
            code: None,
        }
    }

    /// Creates a new rejection error with a machine-readable code.
    pub fn rejected_with_code(
        status: u16,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
            code: Some(code.into()),
        }
    }

    /// Creates a new malformed-response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new malformed-response error with the raw body.
    pub fn malformed_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Creates a rejection representing a failed token lookup.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::rejected_with_code(401, message, "AUTH")
    }

    /// Returns the HTTP status code if the server rejected the request.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the machine-readable error code, if available.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Rejected { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}
