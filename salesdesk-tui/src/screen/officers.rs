//! Sales officer management screen.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use salesdesk_lib::model::SalesOfficer;
use salesdesk_lib::query::QueryState;
use salesdesk_lib::session::Session;
use salesdesk_lib::session::capability;
use salesdesk_lib::validation::Registry;

use super::ListCtx;
use super::ListScreen;
use super::ScreenAction;
use super::render_list;
use crate::table::Column;
use crate::table::EditorKind;
use crate::table::EditorSpec;
use crate::table::FilterKind;

pub struct OfficersScreen {
    pub list: ListScreen<SalesOfficer>,
}

impl OfficersScreen {
    pub fn new() -> Self {
        Self {
            list: ListScreen::new(QueryState::new(), false, |o| o.id, |_| None),
        }
    }

    pub fn columns() -> Vec<Column<SalesOfficer>> {
        let active_choices = vec![
            ("Active".to_string(), "true".to_string()),
            ("Inactive".to_string(), "false".to_string()),
        ];

        vec![
            Column::new("name", "Name", |o: &SalesOfficer| o.full_name())
                .width(22)
                .sortable()
                .filterable(FilterKind::Text),
            Column::new("email", "Email", |o: &SalesOfficer| o.email.clone())
                .width(26)
                .sortable()
                .editable(EditorSpec::new(EditorKind::Text, "email").validator("email")),
            Column::new("phone", "Phone", |o: &SalesOfficer| {
                o.phone.clone().unwrap_or_default()
            })
            .width(15)
            .editable(EditorSpec::new(EditorKind::Text, "phone").validator("phone")),
            Column::new("region", "Region", |o: &SalesOfficer| {
                o.region.clone().unwrap_or_default()
            })
            .width(14)
            .sortable()
            .filterable(FilterKind::Text)
            .editable(EditorSpec::new(EditorKind::Text, "region")),
            Column::new("active", "Active", |o: &SalesOfficer| {
                if o.active { "yes" } else { "no" }.to_string()
            })
            .width(7)
            .filterable(FilterKind::Choice(active_choices)),
            Column::new("createdAt", "Since", |o: &SalesOfficer| {
                o.created_at
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default()
            })
            .width(10)
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
            edit_capability: capability::OFFICERS_EDIT,
            delete_capability: Some(capability::OFFICERS_DELETE),
        };
        self.list.handle_key(key, &ctx)
    }

    pub fn view(&self, frame: &mut Frame, area: Rect, loading_glyph: Option<&str>) {
        let columns = Self::columns();
        render_list(frame, area, &columns, &self.list, loading_glyph, None);
    }
}
