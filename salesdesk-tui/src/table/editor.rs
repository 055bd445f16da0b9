//! The editable-cell state machine.
//!
//! A cell is in display mode until the user opens an [`EditSession`] on it;
//! the session holds a working copy of the value and its validation error
//! state, and is discarded on commit or cancel. At most one session exists
//! per grid at a time. A failed validation keeps the session alive with the
//! error shown inline; the user's edit is never silently discarded.

use chrono::NaiveDate;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use salesdesk_lib::error::ValidationError;
use salesdesk_lib::validation::CellValue;
use salesdesk_lib::validation::Registry;
use salesdesk_lib::validation::max_selected;
use uuid::Uuid;

use super::column::Column;
use super::column::EditorKind;
use crate::widgets::TextInput;

/// A key event's effect on a custom editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    /// Keep editing.
    Pending,
    /// The user asked to commit the current value.
    Submit,
    /// The user cancelled the edit.
    Cancel,
}

/// An injected editor for columns outside the built-in input types.
pub trait CellEditor: Send {
    /// Handles a key event.
    fn handle_key(&mut self, key: KeyEvent) -> EditorEvent;

    /// The working value as it would be committed.
    fn value(&self) -> CellValue;

    /// Content lines rendered inside the edit popup.
    fn render(&self) -> Vec<Line<'static>>;
}

enum EditorInput {
    Text(TextInput),
    Date(TextInput),
    Select {
        options: Vec<(String, String)>,
        cursor: usize,
    },
    Radio {
        options: Vec<(String, String)>,
        cursor: usize,
    },
    Multi {
        options: Vec<(String, String)>,
        cursor: usize,
        chosen: Vec<bool>,
        max: Option<usize>,
    },
    Custom(Box<dyn CellEditor>),
}

/// The result of feeding a key to an [`EditSession`].
pub enum EditOutcome {
    /// Still editing.
    Pending,
    /// A validated value was committed; the session is finished.
    Commit(CellValue),
    /// The edit was cancelled without emitting.
    Cancelled,
}

/// One in-flight cell edit.
pub struct EditSession {
    /// Row the edit belongs to.
    pub row_id: Uuid,
    /// Column the edit belongs to.
    pub column_id: &'static str,
    /// Wire field committed values are written to.
    pub field: &'static str,
    /// Whether the owner should send the complete row object.
    pub send_complete_object: bool,
    validator: Option<&'static str>,
    input: EditorInput,
    error: Option<ValidationError>,
    header: &'static str,
}

impl EditSession {
    /// Opens an edit session on a cell.
    ///
    /// Returns `None` when the column is not editable or the cell is
    /// disabled for this row.
    pub fn open<R>(column: &Column<R>, row: &R, row_id: Uuid) -> Option<Self> {
        let spec = column.editor.as_ref()?;
        if !spec.is_enabled(row) {
            return None;
        }

        let seed = match &spec.seed {
            Some(seed) => seed(row),
            None => CellValue::Text(column.display(row)),
        };

        let input = match &spec.kind {
            EditorKind::Text => {
                let text = seed.as_text().unwrap_or_default();
                EditorInput::Text(TextInput::with_value(text))
            }
            EditorKind::Date => {
                let text = match &seed {
                    CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
                    CellValue::Text(s) => s.clone(),
                    _ => String::new(),
                };
                EditorInput::Date(TextInput::with_value(text))
            }
            EditorKind::Select(options) => EditorInput::Select {
                cursor: seeded_cursor(options, &seed),
                options: options.clone(),
            },
            EditorKind::Radio(options) => EditorInput::Radio {
                cursor: seeded_cursor(options, &seed),
                options: options.clone(),
            },
            EditorKind::MultiSelect { options, max } => {
                let selected: Vec<String> = match &seed {
                    CellValue::List(items) => items.clone(),
                    CellValue::Text(s) if !s.is_empty() => vec![s.clone()],
                    _ => Vec::new(),
                };
                let chosen = options
                    .iter()
                    .map(|(_, value)| selected.iter().any(|s| s == value))
                    .collect();
                EditorInput::Multi {
                    options: options.clone(),
                    cursor: 0,
                    chosen,
                    max: *max,
                }
            }
            EditorKind::Custom(factory) => {
                let text = seed.as_text().unwrap_or_default().to_string();
                EditorInput::Custom(factory(&text))
            }
        };

        Some(Self {
            row_id,
            column_id: column.id,
            field: spec.field,
            send_complete_object: spec.send_complete_object,
            validator: spec.validator,
            input,
            error: None,
            header: column.header,
        })
    }

    /// Feeds a key event into the session.
    pub fn handle_key(&mut self, key: KeyEvent, registry: &Registry) -> EditOutcome {
        if key.code == KeyCode::Esc {
            return EditOutcome::Cancelled;
        }

        match &mut self.input {
            EditorInput::Text(input) | EditorInput::Date(input) => match key.code {
                KeyCode::Enter => self.try_commit(registry),
                _ => {
                    if input.handle_key(key) {
                        self.error = None;
                    }
                    EditOutcome::Pending
                }
            },
            EditorInput::Select { options, cursor } | EditorInput::Radio { options, cursor } => {
                match key.code {
                    KeyCode::Up | KeyCode::Char('k') => {
                        *cursor = cursor.saturating_sub(1);
                        EditOutcome::Pending
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        *cursor = (*cursor + 1).min(options.len().saturating_sub(1));
                        EditOutcome::Pending
                    }
                    KeyCode::Enter => self.try_commit(registry),
                    _ => EditOutcome::Pending,
                }
            }
            EditorInput::Multi {
                options,
                cursor,
                chosen,
                ..
            } => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    *cursor = cursor.saturating_sub(1);
                    EditOutcome::Pending
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    *cursor = (*cursor + 1).min(options.len().saturating_sub(1));
                    EditOutcome::Pending
                }
                KeyCode::Char(' ') => {
                    if let Some(flag) = chosen.get_mut(*cursor) {
                        *flag = !*flag;
                        self.error = None;
                    }
                    EditOutcome::Pending
                }
                KeyCode::Enter => self.try_commit(registry),
                _ => EditOutcome::Pending,
            },
            EditorInput::Custom(editor) => match editor.handle_key(key) {
                EditorEvent::Pending => EditOutcome::Pending,
                EditorEvent::Cancel => EditOutcome::Cancelled,
                EditorEvent::Submit => self.try_commit(registry),
            },
        }
    }

    /// Validates the working value; commits on success, stays editing with
    /// the error shown on failure.
    fn try_commit(&mut self, registry: &Registry) -> EditOutcome {
        let raw = match self.working_value() {
            Ok(value) => value,
            Err(error) => {
                self.error = Some(error);
                return EditOutcome::Pending;
            }
        };

        let validated = match self.validator {
            Some(key) => registry.validate(key, &raw),
            None => Ok(raw),
        };

        match validated {
            Ok(value) => EditOutcome::Commit(value),
            Err(error) => {
                self.error = Some(error);
                EditOutcome::Pending
            }
        }
    }

    /// Builds the raw value from the current input state.
    fn working_value(&self) -> Result<CellValue, ValidationError> {
        match &self.input {
            EditorInput::Text(input) => Ok(CellValue::text(input.value())),
            EditorInput::Date(input) => {
                let text = input.value().trim();
                NaiveDate::parse_from_str(text, "%Y-%m-%d")
                    .map(CellValue::Date)
                    .map_err(|_| ValidationError::new("date", "Enter a date as YYYY-MM-DD"))
            }
            EditorInput::Select { options, cursor } | EditorInput::Radio { options, cursor } => {
                options
                    .get(*cursor)
                    .map(|(_, value)| CellValue::text(value.clone()))
                    .ok_or_else(|| ValidationError::new("option", "Select an option"))
            }
            EditorInput::Multi {
                options,
                chosen,
                max,
                ..
            } => {
                let selected: Vec<String> = options
                    .iter()
                    .zip(chosen)
                    .filter(|(_, picked)| **picked)
                    .map(|((_, value), _)| value.clone())
                    .collect();
                let value = CellValue::List(selected);
                match max {
                    Some(max) => max_selected(&value, *max),
                    None => Ok(value),
                }
            }
            EditorInput::Custom(editor) => Ok(editor.value()),
        }
    }

    /// Returns the current validation error, if any.
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    /// Content lines for the edit popup.
    pub fn render(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(Span::styled(
            format!("Edit {}", self.header),
            Style::default().add_modifier(Modifier::BOLD),
        ))];

        match &self.input {
            EditorInput::Text(input) | EditorInput::Date(input) => {
                lines.push(input.line(Style::default()));
            }
            EditorInput::Select { options, cursor } | EditorInput::Radio { options, cursor } => {
                for (i, (label, _)) in options.iter().enumerate() {
                    let marker = if i == *cursor { "›" } else { " " };
                    let style = if i == *cursor {
                        Style::default().add_modifier(Modifier::REVERSED)
                    } else {
                        Style::default()
                    };
                    lines.push(Line::from(Span::styled(
                        format!("{marker} {label}"),
                        style,
                    )));
                }
            }
            EditorInput::Multi {
                options,
                cursor,
                chosen,
                max,
            } => {
                for (i, (label, _)) in options.iter().enumerate() {
                    let tick = if chosen.get(i).copied().unwrap_or(false) {
                        "[x]"
                    } else {
                        "[ ]"
                    };
                    let style = if i == *cursor {
                        Style::default().add_modifier(Modifier::REVERSED)
                    } else {
                        Style::default()
                    };
                    lines.push(Line::from(Span::styled(
                        format!("{tick} {label}"),
                        style,
                    )));
                }
                if let Some(max) = max {
                    lines.push(Line::from(Span::styled(
                        format!("(up to {max})"),
                        Style::default().fg(Color::DarkGray),
                    )));
                }
            }
            EditorInput::Custom(editor) => lines.extend(editor.render()),
        }

        if let Some(error) = &self.error {
            lines.push(Line::from(Span::styled(
                error.message.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        lines
    }
}

/// Returns the option index matching the seed value, or 0.
fn seeded_cursor(options: &[(String, String)], seed: &CellValue) -> usize {
    seed.as_text()
        .and_then(|current| options.iter().position(|(_, value)| value == current))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use salesdesk_lib::validation::Registry;

    use crate::table::column::EditorSpec;

    struct Row {
        email: String,
        tags: Vec<String>,
    }

    fn email_column() -> Column<Row> {
        Column::new("email", "Email", |r: &Row| r.email.clone())
            .editable(EditorSpec::new(EditorKind::Text, "email").validator("email"))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(session: &mut EditSession, registry: &Registry, text: &str) {
        for c in text.chars() {
            let outcome = session.handle_key(key(KeyCode::Char(c)), registry);
            assert!(matches!(outcome, EditOutcome::Pending));
        }
    }

    #[test]
    fn invalid_value_never_commits_and_shows_the_error() {
        let registry = Registry::with_builtins();
        let row = Row {
            email: String::new(),
            tags: vec![],
        };
        let mut session = EditSession::open(&email_column(), &row, Uuid::new_v4()).unwrap();

        type_text(&mut session, &registry, "not-an-email");
        let outcome = session.handle_key(key(KeyCode::Enter), &registry);

        assert!(matches!(outcome, EditOutcome::Pending));
        assert_eq!(session.error().unwrap().code, "email");
    }

    #[test]
    fn valid_value_commits_exactly_once() {
        let registry = Registry::with_builtins();
        let row = Row {
            email: "old@example.com".into(),
            tags: vec![],
        };
        let mut session = EditSession::open(&email_column(), &row, Uuid::new_v4()).unwrap();

        // Seeded with the current value; replace it wholesale.
        for _ in 0.."old@example.com".len() {
            session.handle_key(key(KeyCode::Backspace), &registry);
        }
        type_text(&mut session, &registry, "new@example.com");

        match session.handle_key(key(KeyCode::Enter), &registry) {
            EditOutcome::Commit(CellValue::Text(v)) => assert_eq!(v, "new@example.com"),
            _ => panic!("expected commit"),
        }
    }

    #[test]
    fn escape_cancels_without_emitting() {
        let registry = Registry::with_builtins();
        let row = Row {
            email: "x@example.com".into(),
            tags: vec![],
        };
        let mut session = EditSession::open(&email_column(), &row, Uuid::new_v4()).unwrap();

        type_text(&mut session, &registry, "junk");
        assert!(matches!(
            session.handle_key(key(KeyCode::Esc), &registry),
            EditOutcome::Cancelled
        ));
    }

    #[test]
    fn disabled_cells_refuse_to_open() {
        let column = Column::new("email", "Email", |r: &Row| r.email.clone()).editable(
            EditorSpec::new(EditorKind::Text, "email").enabled_when(|r| !r.email.is_empty()),
        );
        let row = Row {
            email: String::new(),
            tags: vec![],
        };
        assert!(EditSession::open(&column, &row, Uuid::new_v4()).is_none());
    }

    #[test]
    fn multi_select_enforces_the_selection_cap() {
        let registry = Registry::with_builtins();
        let options = vec![
            ("Hot".to_string(), "HOT".to_string()),
            ("Warm".to_string(), "WARM".to_string()),
            ("Cold".to_string(), "COLD".to_string()),
        ];
        let column = Column::new("tags", "Tags", |r: &Row| r.tags.join(", ")).editable(
            EditorSpec::new(
                EditorKind::MultiSelect {
                    options,
                    max: Some(2),
                },
                "tags",
            )
            .seed_with(|r: &Row| CellValue::List(r.tags.clone())),
        );
        let row = Row {
            email: String::new(),
            tags: vec!["HOT".into()],
        };
        let mut session = EditSession::open(&column, &row, Uuid::new_v4()).unwrap();

        // Pick all three: over the cap, commit must fail and stay editing.
        session.handle_key(key(KeyCode::Char(' ')), &registry); // HOT off
        session.handle_key(key(KeyCode::Char(' ')), &registry); // HOT on
        session.handle_key(key(KeyCode::Down), &registry);
        session.handle_key(key(KeyCode::Char(' ')), &registry); // WARM on
        session.handle_key(key(KeyCode::Down), &registry);
        session.handle_key(key(KeyCode::Char(' ')), &registry); // COLD on

        assert!(matches!(
            session.handle_key(key(KeyCode::Enter), &registry),
            EditOutcome::Pending
        ));
        assert_eq!(session.error().unwrap().code, "max_selected");

        // Drop one and the commit goes through with a list value.
        session.handle_key(key(KeyCode::Char(' ')), &registry); // COLD off
        match session.handle_key(key(KeyCode::Enter), &registry) {
            EditOutcome::Commit(CellValue::List(values)) => {
                assert_eq!(values, vec!["HOT".to_string(), "WARM".to_string()]);
            }
            _ => panic!("expected commit"),
        }
    }

    #[test]
    fn select_is_seeded_with_the_current_value() {
        let registry = Registry::with_builtins();
        let options = vec![
            ("New".to_string(), "NEW".to_string()),
            ("Contacted".to_string(), "CONTACTED".to_string()),
        ];
        let column = Column::new("status", "Status", |_: &Row| "Contacted".to_string()).editable(
            EditorSpec::new(EditorKind::Select(options), "status")
                .seed_with(|_| CellValue::text("CONTACTED")),
        );
        let row = Row {
            email: String::new(),
            tags: vec![],
        };
        let mut session = EditSession::open(&column, &row, Uuid::new_v4()).unwrap();

        // Commit without moving: the seeded option is emitted.
        match session.handle_key(key(KeyCode::Enter), &registry) {
            EditOutcome::Commit(CellValue::Text(v)) => assert_eq!(v, "CONTACTED"),
            _ => panic!("expected commit"),
        }
    }
}
