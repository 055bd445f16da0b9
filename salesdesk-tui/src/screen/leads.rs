//! Lead tracking screen.
//!
//! The full-featured grid: inline-editable email/phone/status/score/value/
//! tags/follow-up cells, status and text filters, debounced search, and the
//! bulk actions (assign, delete, merge).

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use salesdesk_lib::model::Lead;
use salesdesk_lib::model::LeadStatus;
use salesdesk_lib::query::QueryState;
use salesdesk_lib::session::Session;
use salesdesk_lib::session::capability;
use salesdesk_lib::validation::CellValue;
use salesdesk_lib::validation::Registry;
use uuid::Uuid;

use super::ListCtx;
use super::ListScreen;
use super::ScreenAction;
use super::render_list;
use crate::table::CellEditor;
use crate::table::Column;
use crate::table::EditorEvent;
use crate::table::EditorKind;
use crate::table::EditorSpec;
use crate::table::FilterKind;
use crate::widgets::TextInput;

/// Tag options offered by the multi-select tags cell.
const TAG_OPTIONS: [(&str, &str); 5] = [
    ("Hot", "HOT"),
    ("Referral", "REFERRAL"),
    ("Inbound", "INBOUND"),
    ("Outbound", "OUTBOUND"),
    ("Enterprise", "ENTERPRISE"),
];

/// How many tags a lead may carry.
const MAX_TAGS: usize = 3;

pub struct LeadsScreen {
    pub list: ListScreen<Lead>,
}

impl LeadsScreen {
    pub fn new() -> Self {
        Self {
            list: ListScreen::new(
                QueryState::new(),
                true,
                |lead| lead.id,
                |lead| lead.assigned_to,
            ),
        }
    }

    /// Column definitions, in render order.
    pub fn columns() -> Vec<Column<Lead>> {
        let status_choices: Vec<(String, String)> = LeadStatus::ALL
            .iter()
            .map(|s| (s.label().to_string(), s.keyword().to_string()))
            .collect();
        let tag_options: Vec<(String, String)> = TAG_OPTIONS
            .iter()
            .map(|(label, value)| (label.to_string(), value.to_string()))
            .collect();

        vec![
            Column::new("name", "Name", |l: &Lead| l.full_name())
                .width(20)
                .sortable()
                .filterable(FilterKind::Text),
            Column::new("company", "Company", |l: &Lead| l.company.clone())
                .width(16)
                .sortable()
                .filterable(FilterKind::Text),
            Column::new("email", "Email", |l: &Lead| {
                l.email.clone().unwrap_or_default()
            })
            .width(24)
            .sortable()
            .editable(EditorSpec::new(EditorKind::Text, "email").validator("email")),
            Column::new("phone", "Phone", |l: &Lead| {
                l.phone.clone().unwrap_or_default()
            })
            .width(15)
            .editable(EditorSpec::new(EditorKind::Text, "phone").validator("phone")),
            Column::new("status", "Status", |l: &Lead| l.status.to_string())
                .width(11)
                .sortable()
                .filterable(FilterKind::Choice(status_choices.clone()))
                .editable(
                    EditorSpec::new(EditorKind::Select(status_choices), "status")
                        .seed_with(|l: &Lead| CellValue::text(l.status.keyword())),
                ),
            Column::new("score", "Score", |l: &Lead| l.score.to_string())
                .width(6)
                .sortable()
                .editable(EditorSpec::new(EditorKind::Text, "score").validator("score")),
            Column::new("value", "Value", |l: &Lead| {
                l.estimated_value
                    .map(|v| v.to_string())
                    .unwrap_or_default()
            })
            .width(10)
            .sortable()
            .editable(
                EditorSpec::new(
                    EditorKind::Custom(std::sync::Arc::new(|current: &str| {
                        Box::new(MoneyEditor::new(current)) as Box<dyn CellEditor>
                    })),
                    "estimatedValue",
                )
                .validator("money")
                .send_complete_object(),
            ),
            Column::new("tags", "Tags", |l: &Lead| l.tags.join(",")).width(18).editable(
                EditorSpec::new(
                    EditorKind::MultiSelect {
                        options: tag_options,
                        max: Some(MAX_TAGS),
                    },
                    "tags",
                )
                .seed_with(|l: &Lead| CellValue::List(l.tags.clone())),
            ),
            Column::new("followUp", "Follow-up", |l: &Lead| {
                l.follow_up_on
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default()
            })
            .width(10)
            .sortable()
            .editable(
                EditorSpec::new(EditorKind::Date, "followUpOn").seed_with(|l: &Lead| {
                    match l.follow_up_on {
                        Some(d) => CellValue::Date(d),
                        None => CellValue::text(""),
                    }
                }),
            ),
            Column::new("owner", "Owner", |l: &Lead| {
                l.assigned_to_name.clone().unwrap_or_default()
            })
            .width(16),
            Column::new("updatedAt", "Updated", |l: &Lead| {
                l.updated_at.format("%Y-%m-%d").to_string()
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
        // Bulk actions and note entry are lead-specific; everything else is
        // the shared list handling. Skip them while a popup captures input.
        let popup_open = self.list.editor.is_some()
            || self.list.filter.is_some()
            || self.list.search.as_ref().is_some_and(|s| s.focused);

        if !popup_open {
            match key.code {
                KeyCode::Char('a') => {
                    if session.allows(capability::LEADS_ASSIGN) {
                        let ids = self.list.selection();
                        if !ids.is_empty() {
                            return ScreenAction::BulkAssign(ids);
                        }
                    }
                    return ScreenAction::None;
                }
                KeyCode::Char('D') => {
                    if session.allows(capability::LEADS_DELETE) {
                        let ids = self.list.selection();
                        if !ids.is_empty() {
                            return ScreenAction::BulkDelete(ids);
                        }
                    }
                    return ScreenAction::None;
                }
                KeyCode::Char('m') => {
                    // Merge needs exactly two marked rows: cursor order is
                    // not meaningful for marks, so the older record (by
                    // creation) becomes the primary.
                    if session.allows(capability::LEADS_MERGE) {
                        if let Some((primary, duplicate)) = self.merge_pair() {
                            return ScreenAction::Merge { primary, duplicate };
                        }
                    }
                    return ScreenAction::None;
                }
                KeyCode::Char('N') => {
                    if session.allows(capability::NOTES_CREATE) {
                        if let Some(lead) = self.list.current_row() {
                            return ScreenAction::AddNote(lead.id);
                        }
                    }
                    return ScreenAction::None;
                }
                _ => {}
            }
        }

        let columns = Self::columns();
        let ctx = ListCtx {
            columns: &columns,
            session,
            registry,
            edit_capability: capability::LEADS_EDIT,
            delete_capability: Some(capability::LEADS_DELETE),
        };
        self.list.handle_key(key, &ctx)
    }

    /// Resolves the marked pair into `(primary, duplicate)`.
    fn merge_pair(&self) -> Option<(Uuid, Uuid)> {
        if self.list.grid.marked.len() != 2 {
            return None;
        }
        let mut marked: Vec<&Lead> = self
            .list
            .rows()
            .iter()
            .filter(|l| self.list.grid.marked.contains(&l.id))
            .collect();
        if marked.len() != 2 {
            return None;
        }
        marked.sort_by_key(|l| l.created_at);
        Some((marked[0].id, marked[1].id))
    }

    pub fn view(&self, frame: &mut Frame, area: Rect, loading_glyph: Option<&str>) {
        let columns = Self::columns();
        let extra = self.list.loader.result().and_then(|r| {
            r.aggregate("newCount")
                .map(|n| format!("{} new", n))
        });
        render_list(frame, area, &columns, &self.list, loading_glyph, extra);
    }
}

/// Custom money-entry cell editor, injected through [`EditorKind::Custom`].
struct MoneyEditor {
    input: TextInput,
}

impl MoneyEditor {
    fn new(current: &str) -> Self {
        Self {
            input: TextInput::with_value(current),
        }
    }
}

impl CellEditor for MoneyEditor {
    fn handle_key(&mut self, key: KeyEvent) -> EditorEvent {
        match key.code {
            KeyCode::Enter => EditorEvent::Submit,
            KeyCode::Esc => EditorEvent::Cancel,
            _ => {
                self.input.handle_key(key);
                EditorEvent::Pending
            }
        }
    }

    fn value(&self) -> CellValue {
        CellValue::text(self.input.value().trim())
    }

    fn render(&self) -> Vec<Line<'static>> {
        vec![
            self.input.line(ratatui::style::Style::default()),
            Line::from("amount in org currency, e.g. 12500.00"),
        ]
    }
}
