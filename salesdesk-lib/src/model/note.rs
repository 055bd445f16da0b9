//! Note entity.

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// A free-text note attached to a lead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub lead_id: Uuid,
    #[serde(default)]
    pub lead_name: Option<String>,
    pub author_id: Uuid,
    #[serde(default)]
    pub author_name: Option<String>,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Returns the body trimmed to a single display line.
    pub fn summary(&self, max_chars: usize) -> String {
        let line = self.body.lines().next().unwrap_or_default();
        if line.chars().count() <= max_chars {
            line.to_string()
        } else {
            let cut: String = line.chars().take(max_chars.saturating_sub(1)).collect();
            format!("{}…", cut)
        }
    }
}
