//! Field validation registry.
//!
//! Validators are pure functions keyed by name: given a raw cell value they
//! return either an accepted (possibly normalized) value or a
//! [`ValidationError`] with a stable code and displayable message. They
//! never panic. The registry ships the built-in kinds and accepts custom
//! predicate- and pattern-based validators registered by the caller.
//!
//! # Example
//!
//! ```
//! use salesdesk_lib::validation::{CellValue, Registry};
//!
//! let registry = Registry::with_builtins();
//! let err = registry
//!     .validate("email", &CellValue::text("not-an-email"))
//!     .unwrap_err();
//! assert_eq!(err.code, "email");
//! ```

mod rules;
mod value;

pub use value::CellValue;

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ValidationError;

/// A boxed validation function.
pub type Check = Arc<dyn Fn(&CellValue) -> Result<CellValue, ValidationError> + Send + Sync>;

/// Named registry of field validators.
pub struct Registry {
    entries: HashMap<String, Check>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Creates a registry with the built-in validators:
    /// `required`, `email`, `phone`, and `score`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("required", rules::required);
        registry.register("email", rules::email);
        registry.register("phone", |v| rules::phone(v, 7, 15));
        registry.register("score", |v| rules::int_range(v, 0, 100, "score"));
        registry
    }

    /// Registers a validator under a key, replacing any existing one.
    pub fn register<F>(&mut self, key: impl Into<String>, check: F)
    where
        F: Fn(&CellValue) -> Result<CellValue, ValidationError> + Send + Sync + 'static,
    {
        self.entries.insert(key.into(), Arc::new(check));
    }

    /// Registers a custom text predicate under a key.
    ///
    /// The predicate sees the trimmed text; a `false` result produces a
    /// `custom`-coded error with the given message.
    pub fn register_predicate<F>(&mut self, key: impl Into<String>, message: impl Into<String>, pred: F)
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        let message = message.into();
        self.register(key, move |value| {
            let text = value.expect_text("custom")?.trim().to_string();
            if pred(&text) {
                Ok(CellValue::Text(text))
            } else {
                Err(ValidationError::new("custom", message.clone()))
            }
        });
    }

    /// Registers a regex pattern validator under a key.
    pub fn register_pattern(
        &mut self,
        key: impl Into<String>,
        pattern: &regex::Regex,
        message: impl Into<String>,
    ) {
        let pattern = pattern.clone();
        let message = message.into();
        self.register(key, move |value| {
            let text = value.expect_text("pattern")?.trim().to_string();
            if pattern.is_match(&text) {
                Ok(CellValue::Text(text))
            } else {
                Err(ValidationError::new("pattern", message.clone()))
            }
        });
    }

    /// Runs the validator registered under `key`.
    ///
    /// An unknown key accepts the value as-is; forgetting to register a
    /// validator must not block the user's edit.
    pub fn validate(&self, key: &str, value: &CellValue) -> Result<CellValue, ValidationError> {
        match self.entries.get(key) {
            Some(check) => check(value),
            None => {
                log::warn!("no validator registered under '{key}'; accepting value");
                Ok(value.clone())
            }
        }
    }

    /// Returns `true` if a validator is registered under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

// Standalone rule constructors for callers wiring validators directly.
pub use rules::email;
pub use rules::int_range;
pub use rules::max_selected;
pub use rules::one_of;
pub use rules::phone;
pub use rules::required;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_email_rejects_and_accepts() {
        let registry = Registry::with_builtins();

        let err = registry
            .validate("email", &CellValue::text("not-an-email"))
            .unwrap_err();
        assert_eq!(err.code, "email");

        let ok = registry
            .validate("email", &CellValue::text("  ada@example.com  "))
            .unwrap();
        // Accepted values come back trimmed.
        assert_eq!(ok, CellValue::text("ada@example.com"));
    }

    #[test]
    fn builtin_phone_counts_digits() {
        let registry = Registry::with_builtins();

        assert!(registry.validate("phone", &CellValue::text("12345")).is_err());
        assert!(
            registry
                .validate("phone", &CellValue::text("+1 (555) 010-2030"))
                .is_ok()
        );
    }

    #[test]
    fn builtin_score_enforces_the_range() {
        let registry = Registry::with_builtins();

        assert!(registry.validate("score", &CellValue::text("101")).is_err());
        assert!(registry.validate("score", &CellValue::text("abc")).is_err());
        assert_eq!(
            registry.validate("score", &CellValue::text(" 42 ")).unwrap(),
            CellValue::text("42")
        );
    }

    #[test]
    fn custom_predicate_and_pattern_extension() {
        let mut registry = Registry::with_builtins();
        registry.register_predicate("even-length", "must have even length", |s| s.len() % 2 == 0);
        let re = regex::Regex::new(r"^[A-Z]{2}-\d{4}$").unwrap();
        registry.register_pattern("ticket", &re, "expected XX-0000");

        assert!(registry.validate("even-length", &CellValue::text("ab")).is_ok());
        assert_eq!(
            registry
                .validate("even-length", &CellValue::text("abc"))
                .unwrap_err()
                .code,
            "custom"
        );
        assert!(registry.validate("ticket", &CellValue::text("AB-1234")).is_ok());
        assert!(registry.validate("ticket", &CellValue::text("nope")).is_err());
    }

    #[test]
    fn unknown_key_accepts_the_value() {
        let registry = Registry::with_builtins();
        let value = CellValue::text("anything");
        assert_eq!(registry.validate("no-such", &value).unwrap(), value);
    }
}
