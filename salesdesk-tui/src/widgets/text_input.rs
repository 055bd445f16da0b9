//! Single-line text input with cursor handling.

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use unicode_width::UnicodeWidthStr;

/// A single-line text input.
///
/// The cursor is a byte offset kept on a char boundary.
#[derive(Debug, Default, Clone)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    /// Creates an empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an input seeded with a value, cursor at the end.
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.len();
        Self { value, cursor }
    }

    /// Returns the current text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the text, moving the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.len();
    }

    /// Clears the text.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Handles a key event. Returns `true` if the value changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.value.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                true
            }
            KeyCode::Backspace => {
                if let Some(prev) = self.prev_boundary() {
                    self.value.remove(prev);
                    self.cursor = prev;
                    true
                } else {
                    false
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.value.len() {
                    self.value.remove(self.cursor);
                    true
                } else {
                    false
                }
            }
            KeyCode::Left => {
                if let Some(prev) = self.prev_boundary() {
                    self.cursor = prev;
                }
                false
            }
            KeyCode::Right => {
                if let Some(next) = self.next_boundary() {
                    self.cursor = next;
                }
                false
            }
            KeyCode::Home => {
                self.cursor = 0;
                false
            }
            KeyCode::End => {
                self.cursor = self.value.len();
                false
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear();
                true
            }
            _ => false,
        }
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.value[..self.cursor].char_indices().last().map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.value[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }

    /// Renders the value with a reversed-style cursor cell.
    pub fn line(&self, style: Style) -> Line<'static> {
        let cursor_style = style.add_modifier(Modifier::REVERSED);
        let before = &self.value[..self.cursor];
        let at = self.value[self.cursor..].chars().next();
        let after = match at {
            Some(c) => &self.value[self.cursor + c.len_utf8()..],
            None => "",
        };

        let mut spans = vec![Span::styled(before.to_string(), style)];
        match at {
            Some(c) => spans.push(Span::styled(c.to_string(), cursor_style)),
            None => spans.push(Span::styled(" ", cursor_style)),
        }
        spans.push(Span::styled(after.to_string(), style));
        Line::from(spans)
    }

    /// Display width of the value in terminal cells.
    pub fn width(&self) -> usize {
        self.value.width()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn editing_respects_char_boundaries() {
        let mut input = TextInput::with_value("héllo");

        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Backspace));
        assert_eq!(input.value(), "hllo");

        input.handle_key(key(KeyCode::Char('é')));
        assert_eq!(input.value(), "héllo");
    }
}
