//! The value shape moving through cell edits.

use chrono::NaiveDate;

use crate::error::ValidationError;

/// A typed cell value as entered, validated, and committed.
///
/// The committed value's shape always matches the editor that produced it,
/// so the owner never re-derives the type from content: text and radio
/// editors emit `Text`, multi-selects emit `List`, date editors emit
/// `Date`, and columns that opt into sending the complete object emit
/// `Record`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    List(Vec<String>),
    Date(NaiveDate),
    Record(serde_json::Value),
}

impl CellValue {
    /// Convenience constructor for text values.
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// Returns the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the text content or a shape-mismatch validation error.
    pub(crate) fn expect_text(&self, code: &'static str) -> Result<&str, ValidationError> {
        self.as_text()
            .ok_or_else(|| ValidationError::new(code, "Expected a text value"))
    }

    /// Converts into the JSON representation sent to the server.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            CellValue::Text(s) => serde_json::Value::String(s.clone()),
            CellValue::List(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(|s| serde_json::Value::String(s.clone()))
                    .collect(),
            ),
            CellValue::Date(d) => serde_json::Value::String(d.format("%Y-%m-%d").to_string()),
            CellValue::Record(v) => v.clone(),
        }
    }
}
