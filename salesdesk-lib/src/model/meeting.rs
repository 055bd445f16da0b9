//! Meeting entity.

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// A scheduled meeting attached to a lead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: Uuid,
    pub subject: String,
    pub lead_id: Uuid,
    /// Display name of the lead, denormalized by the server.
    #[serde(default)]
    pub lead_name: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
    #[serde(default)]
    pub location: Option<String>,
    pub status: MeetingStatus,
    /// Officer who organized the meeting, if any.
    #[serde(default)]
    pub organizer_id: Option<Uuid>,
}

/// Status of a meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeetingStatus {
    Upcoming,
    Held,
    Cancelled,
}

impl MeetingStatus {
    /// All statuses.
    pub const ALL: [MeetingStatus; 3] = [
        MeetingStatus::Upcoming,
        MeetingStatus::Held,
        MeetingStatus::Cancelled,
    ];

    /// Wire keyword used in payloads and filter parameters.
    pub fn keyword(self) -> &'static str {
        match self {
            MeetingStatus::Upcoming => "UPCOMING",
            MeetingStatus::Held => "HELD",
            MeetingStatus::Cancelled => "CANCELLED",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            MeetingStatus::Upcoming => "Upcoming",
            MeetingStatus::Held => "Held",
            MeetingStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for MeetingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
