//! User administration screen.
//!
//! Role assignment happens inline through a select cell; everything is
//! gated on the `users.manage` capability (no ownership fallback).

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use salesdesk_lib::model::Role;
use salesdesk_lib::model::UserAccount;
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

pub struct UsersScreen {
    pub list: ListScreen<UserAccount>,
}

impl UsersScreen {
    pub fn new() -> Self {
        Self {
            list: ListScreen::new(QueryState::new(), true, |u| u.id, |_| None),
        }
    }

    /// Column definitions; the role cell's options come from the loaded
    /// role list.
    pub fn columns(roles: &[Role]) -> Vec<Column<UserAccount>> {
        let role_choices: Vec<(String, String)> = roles
            .iter()
            .map(|r| (r.name.clone(), r.name.clone()))
            .collect();

        vec![
            Column::new("username", "Username", |u: &UserAccount| u.username.clone())
                .width(18)
                .sortable()
                .filterable(FilterKind::Text),
            Column::new("email", "Email", |u: &UserAccount| u.email.clone())
                .width(26)
                .sortable(),
            Column::new("role", "Role", |u: &UserAccount| u.role.clone())
                .width(16)
                .filterable(FilterKind::Choice(role_choices.clone()))
                .editable(
                    EditorSpec::new(EditorKind::Select(role_choices), "role")
                        .seed_with(|u: &UserAccount| CellValue::text(u.role.clone())),
                ),
            Column::new("userType", "Kind", |u: &UserAccount| {
                u.user_type.clone().unwrap_or_default()
            })
            .width(10),
            Column::new("active", "Active", |u: &UserAccount| {
                if u.active { "yes" } else { "no" }.to_string()
            })
            .width(7)
            .filterable(FilterKind::Choice(vec![
                ("Active".to_string(), "true".to_string()),
                ("Inactive".to_string(), "false".to_string()),
            ])),
        ]
    }

    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        session: &Session,
        registry: &Registry,
        roles: &[Role],
    ) -> ScreenAction {
        let columns = Self::columns(roles);
        let ctx = ListCtx {
            columns: &columns,
            session,
            registry,
            edit_capability: capability::USERS_MANAGE,
            delete_capability: None,
        };
        self.list.handle_key(key, &ctx)
    }

    pub fn view(&self, frame: &mut Frame, area: Rect, roles: &[Role], loading_glyph: Option<&str>) {
        let columns = Self::columns(roles);
        render_list(frame, area, &columns, &self.list, loading_glyph, None);
    }
}
