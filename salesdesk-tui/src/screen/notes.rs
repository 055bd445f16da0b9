//! Notes screen.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use salesdesk_lib::model::Note;
use salesdesk_lib::query::QueryState;
use salesdesk_lib::session::Session;
use salesdesk_lib::session::capability;
use salesdesk_lib::validation::Registry;

use super::ListCtx;
use super::ListScreen;
use super::ScreenAction;
use super::render_list;
use crate::table::Column;
use crate::table::FilterKind;

pub struct NotesScreen {
    pub list: ListScreen<Note>,
}

impl NotesScreen {
    pub fn new() -> Self {
        let query = QueryState::new().toggle_sort("createdAt").toggle_sort("createdAt");
        Self {
            list: ListScreen::new(query, true, |n| n.id, |n| Some(n.author_id)),
        }
    }

    pub fn columns() -> Vec<Column<Note>> {
        vec![
            Column::new("createdAt", "Created", |n: &Note| {
                n.created_at.format("%Y-%m-%d %H:%M").to_string()
            })
            .width(16)
            .sortable(),
            Column::new("lead", "Lead", |n: &Note| {
                n.lead_name.clone().unwrap_or_default()
            })
            .width(20)
            .filterable(FilterKind::Text),
            Column::new("author", "Author", |n: &Note| {
                n.author_name.clone().unwrap_or_default()
            })
            .width(16)
            .filterable(FilterKind::Text),
            Column::new("body", "Note", |n: &Note| n.summary(60)),
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
            edit_capability: capability::NOTES_CREATE,
            delete_capability: Some(capability::NOTES_DELETE),
        };
        self.list.handle_key(key, &ctx)
    }

    pub fn view(&self, frame: &mut Frame, area: Rect, loading_glyph: Option<&str>) {
        let columns = Self::columns();
        render_list(frame, area, &columns, &self.list, loading_glyph, None);
    }
}
