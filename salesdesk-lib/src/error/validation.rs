//! Validation error types

/// A field validation failure with a stable code and displayable message.
///
/// Validators never panic; a failed check is reported through this type and
/// surfaced inline at the field that produced it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Stable machine-readable code (`required`, `email`, `phone`, ...).
    pub code: &'static str,
    /// Human-readable validation error message.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}
