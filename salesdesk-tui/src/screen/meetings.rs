//! Meetings screen.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use salesdesk_lib::model::Meeting;
use salesdesk_lib::model::MeetingStatus;
use salesdesk_lib::query::QueryState;
use salesdesk_lib::session::Session;
use salesdesk_lib::session::capability;
use salesdesk_lib::validation::CellValue;
use salesdesk_lib::validation::Registry;

use super::ListCtx;
use super::ListScreen;
use super::ScreenAction;
use super::render_list;
use crate::table::Column;
use crate::table::EditorKind;
use crate::table::EditorSpec;
use crate::table::FilterKind;

pub struct MeetingsScreen {
    pub list: ListScreen<Meeting>,
}

impl MeetingsScreen {
    pub fn new() -> Self {
        // Upcoming first by default.
        let query = QueryState::new().toggle_sort("scheduledAt");
        Self {
            list: ListScreen::new(query, false, |m| m.id, |m| m.organizer_id),
        }
    }

    pub fn columns() -> Vec<Column<Meeting>> {
        let status_choices: Vec<(String, String)> = MeetingStatus::ALL
            .iter()
            .map(|s| (s.label().to_string(), s.keyword().to_string()))
            .collect();

        vec![
            Column::new("subject", "Subject", |m: &Meeting| m.subject.clone())
                .width(26)
                .sortable()
                .filterable(FilterKind::Text),
            Column::new("lead", "Lead", |m: &Meeting| {
                m.lead_name.clone().unwrap_or_default()
            })
            .width(18)
            .filterable(FilterKind::Text),
            Column::new("scheduledAt", "When", |m: &Meeting| {
                m.scheduled_at.format("%Y-%m-%d %H:%M").to_string()
            })
            .width(16)
            .sortable()
            .editable(EditorSpec::new(EditorKind::Date, "scheduledAt").seed_with(
                |m: &Meeting| CellValue::Date(m.scheduled_at.date_naive()),
            )),
            Column::new("duration", "Min", |m: &Meeting| {
                m.duration_minutes.to_string()
            })
            .width(5),
            Column::new("location", "Location", |m: &Meeting| {
                m.location.clone().unwrap_or_default()
            })
            .width(16)
            .editable(EditorSpec::new(EditorKind::Text, "location")),
            Column::new("status", "Status", |m: &Meeting| m.status.to_string())
                .width(10)
                .sortable()
                .filterable(FilterKind::Choice(status_choices.clone()))
                .editable(
                    EditorSpec::new(EditorKind::Radio(status_choices), "status")
                        .seed_with(|m: &Meeting| CellValue::text(m.status.keyword())),
                ),
        ]
    }

    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        session: &Session,
        registry: &Registry,
    ) -> ScreenAction {
        let columns = Self::columns();
        let ctx = ListCtx {
            columns: &columns,
            session,
            registry,
            edit_capability: capability::MEETINGS_EDIT,
            delete_capability: Some(capability::MEETINGS_DELETE),
        };
        self.list.handle_key(key, &ctx)
    }

    pub fn view(&self, frame: &mut Frame, area: Rect, loading_glyph: Option<&str>) {
        let columns = Self::columns();
        let extra = self.list.loader.result().and_then(|r| {
            r.aggregate("upcomingCount")
                .map(|n| format!("{} upcoming", n))
        });
        render_list(frame, area, &columns, &self.list, loading_glyph, extra);
    }
}
