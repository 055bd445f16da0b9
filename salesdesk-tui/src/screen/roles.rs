//! Role overview screen (read-only).

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use salesdesk_lib::model::Role;
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

pub struct RolesScreen {
    pub list: ListScreen<Role>,
}

impl RolesScreen {
    pub fn new() -> Self {
        Self {
            list: ListScreen::new(QueryState::new(), false, |r| r.id, |_| None),
        }
    }

    pub fn columns() -> Vec<Column<Role>> {
        vec![
            Column::new("name", "Role", |r: &Role| r.name.clone())
                .width(18)
                .sortable()
                .filterable(FilterKind::Text),
            Column::new("description", "Description", |r: &Role| {
                r.description.clone().unwrap_or_default()
            })
            .width(34),
            Column::new("authorities", "Capabilities", |r: &Role| {
                r.authorities.join(", ")
            }),
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
            edit_capability: capability::USERS_MANAGE,
            delete_capability: None,
        };
        self.list.handle_key(key, &ctx)
    }

    pub fn view(&self, frame: &mut Frame, area: Rect, loading_glyph: Option<&str>) {
        let columns = Self::columns();
        render_list(frame, area, &columns, &self.list, loading_glyph, None);
    }
}
