//! File listings screen.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use salesdesk_lib::model::FileEntry;
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

pub struct FilesScreen {
    pub list: ListScreen<FileEntry>,
}

impl FilesScreen {
    pub fn new() -> Self {
        Self {
            list: ListScreen::new(QueryState::new(), true, |f| f.id, |f| f.uploaded_by),
        }
    }

    pub fn columns() -> Vec<Column<FileEntry>> {
        vec![
            Column::new("name", "Name", |f: &FileEntry| f.name.clone())
                .width(30)
                .sortable()
                .filterable(FilterKind::Text),
            Column::new("size", "Size", |f: &FileEntry| f.human_size())
                .width(9)
                .sortable(),
            Column::new("type", "Type", |f: &FileEntry| f.content_type.clone())
                .width(20)
                .filterable(FilterKind::Text),
            Column::new("uploadedBy", "Uploaded by", |f: &FileEntry| {
                f.uploaded_by_name.clone().unwrap_or_default()
            })
            .width(16),
            Column::new("uploadedAt", "Uploaded", |f: &FileEntry| {
                f.uploaded_at.format("%Y-%m-%d %H:%M").to_string()
            })
            .width(16)
            .sortable(),
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
            edit_capability: capability::FILES_DELETE,
            delete_capability: Some(capability::FILES_DELETE),
        };
        self.list.handle_key(key, &ctx)
    }

    pub fn view(&self, frame: &mut Frame, area: Rect, loading_glyph: Option<&str>) {
        let columns = Self::columns();
        render_list(frame, area, &columns, &self.list, loading_glyph, None);
    }
}
