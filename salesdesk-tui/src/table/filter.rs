//! Column filter entry.

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use super::column::FilterKind;
use crate::widgets::TextInput;

enum FilterInput {
    Text(TextInput),
    Choice {
        /// `(label, wire value)`; index 0 is the "any" entry.
        options: Vec<(String, String)>,
        cursor: usize,
    },
}

/// The result of feeding a key to a [`FilterSession`].
pub enum FilterOutcome {
    Pending,
    /// Apply this value for the column (empty string clears the filter).
    Apply(String),
    Cancelled,
}

/// One in-flight filter entry for a column.
pub struct FilterSession {
    /// Column being filtered.
    pub column_id: &'static str,
    header: &'static str,
    input: FilterInput,
}

impl FilterSession {
    /// Opens filter entry for a column, seeded with the current value.
    pub fn open(
        column_id: &'static str,
        header: &'static str,
        kind: &FilterKind,
        current: &str,
    ) -> Self {
        let input = match kind {
            FilterKind::Text => FilterInput::Text(TextInput::with_value(current)),
            FilterKind::Choice(choices) => {
                let mut options = vec![("(any)".to_string(), String::new())];
                options.extend(choices.iter().cloned());
                let cursor = options
                    .iter()
                    .position(|(_, value)| value == current)
                    .unwrap_or(0);
                FilterInput::Choice { options, cursor }
            }
        };
        Self {
            column_id,
            header,
            input,
        }
    }

    /// Feeds a key event into the session.
    pub fn handle_key(&mut self, key: KeyEvent) -> FilterOutcome {
        if key.code == KeyCode::Esc {
            return FilterOutcome::Cancelled;
        }

        match &mut self.input {
            FilterInput::Text(input) => match key.code {
                KeyCode::Enter => FilterOutcome::Apply(input.value().trim().to_string()),
                _ => {
                    input.handle_key(key);
                    FilterOutcome::Pending
                }
            },
            FilterInput::Choice { options, cursor } => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    *cursor = cursor.saturating_sub(1);
                    FilterOutcome::Pending
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    *cursor = (*cursor + 1).min(options.len().saturating_sub(1));
                    FilterOutcome::Pending
                }
                KeyCode::Enter => FilterOutcome::Apply(options[*cursor].1.clone()),
                _ => FilterOutcome::Pending,
            },
        }
    }

    /// Content lines for the filter popup.
    pub fn render(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(Span::styled(
            format!("Filter {}", self.header),
            Style::default().add_modifier(Modifier::BOLD),
        ))];

        match &self.input {
            FilterInput::Text(input) => lines.push(input.line(Style::default())),
            FilterInput::Choice { options, cursor } => {
                for (i, (label, _)) in options.iter().enumerate() {
                    let style = if i == *cursor {
                        Style::default().add_modifier(Modifier::REVERSED)
                    } else {
                        Style::default()
                    };
                    lines.push(Line::from(Span::styled(format!("  {label}"), style)));
                }
            }
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn choice_filter_applies_the_selected_wire_value() {
        let kind = FilterKind::Choice(vec![
            ("New".to_string(), "NEW".to_string()),
            ("Lost".to_string(), "LOST".to_string()),
        ]);
        let mut session = FilterSession::open("status", "Status", &kind, "");

        session.handle_key(key(KeyCode::Down));
        match session.handle_key(key(KeyCode::Enter)) {
            FilterOutcome::Apply(value) => assert_eq!(value, "NEW"),
            _ => panic!("expected apply"),
        }
    }

    #[test]
    fn choice_filter_any_entry_clears_the_filter() {
        let kind = FilterKind::Choice(vec![("New".to_string(), "NEW".to_string())]);
        // Seeded on the active value; move back up to "(any)".
        let mut session = FilterSession::open("status", "Status", &kind, "NEW");
        session.handle_key(key(KeyCode::Up));
        match session.handle_key(key(KeyCode::Enter)) {
            FilterOutcome::Apply(value) => assert_eq!(value, ""),
            _ => panic!("expected apply"),
        }
    }
}
