//! File listing entity.

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// A file attached to the workspace, as listed by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub id: Uuid,
    pub name: String,
    pub size_bytes: u64,
    pub content_type: String,
    #[serde(default)]
    pub uploaded_by: Option<Uuid>,
    #[serde(default)]
    pub uploaded_by_name: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

impl FileEntry {
    /// Formats the size with a binary unit suffix.
    pub fn human_size(&self) -> String {
        const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
        let mut size = self.size_bytes as f64;
        let mut unit = 0;
        while size >= 1024.0 && unit < UNITS.len() - 1 {
            size /= 1024.0;
            unit += 1;
        }
        if unit == 0 {
            format!("{} {}", self.size_bytes, UNITS[unit])
        } else {
            format!("{:.1} {}", size, UNITS[unit])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(size_bytes: u64) -> FileEntry {
        FileEntry {
            id: Uuid::nil(),
            name: "q3-deck.pdf".into(),
            size_bytes,
            content_type: "application/pdf".into(),
            uploaded_by: None,
            uploaded_by_name: None,
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn human_size_picks_a_sensible_unit() {
        assert_eq!(entry(512).human_size(), "512 B");
        assert_eq!(entry(2048).human_size(), "2.0 KiB");
        assert_eq!(entry(5 * 1024 * 1024).human_size(), "5.0 MiB");
    }
}
