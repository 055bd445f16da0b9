//! Confirmation and entry modals.
//!
//! `Enter`/`y` confirms, `Esc`/`n` cancels. Bulk delete goes through the
//! numeric-challenge variant: a displayed number must be typed back before
//! the action fires.

use std::collections::hash_map::RandomState;
use std::hash::BuildHasher;
use std::hash::Hasher;

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use uuid::Uuid;

use crate::widgets::TextInput;

/// The deferred action a modal guards.
#[derive(Debug, Clone)]
pub enum PendingAction {
    DeleteLead(Uuid),
    BulkDeleteLeads(Vec<Uuid>),
    MergeLeads { primary: Uuid, duplicate: Uuid },
    DeleteOfficer(Uuid),
    DeleteMeeting(Uuid),
    DeleteNote(Uuid),
    DeleteFile(Uuid),
}

/// The result of feeding a key to a modal.
pub enum ModalOutcome {
    Pending,
    Cancelled,
    Confirmed(PendingAction),
    Assigned { ids: Vec<Uuid>, officer: Uuid },
    NoteSubmitted { lead: Uuid, body: String },
}

/// Any open modal.
pub enum Modal {
    Confirm(ConfirmModal),
    Challenge(ChallengeModal),
    Assign(AssignPicker),
    Note(NoteEntry),
}

impl Modal {
    pub fn handle_key(&mut self, key: KeyEvent) -> ModalOutcome {
        match self {
            Modal::Confirm(m) => m.handle_key(key),
            Modal::Challenge(m) => m.handle_key(key),
            Modal::Assign(m) => m.handle_key(key),
            Modal::Note(m) => m.handle_key(key),
        }
    }

    pub fn render(&self) -> (String, Vec<Line<'static>>) {
        match self {
            Modal::Confirm(m) => ("Confirm".to_string(), m.render()),
            Modal::Challenge(m) => ("Confirm deletion".to_string(), m.render()),
            Modal::Assign(m) => ("Assign to officer".to_string(), m.render()),
            Modal::Note(m) => ("New note".to_string(), m.render()),
        }
    }
}

/// A standardized confirmation modal.
pub struct ConfirmModal {
    message: String,
    action: PendingAction,
}

impl ConfirmModal {
    pub fn new(message: impl Into<String>, action: PendingAction) -> Self {
        Self {
            message: message.into(),
            action,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> ModalOutcome {
        match key.code {
            KeyCode::Enter | KeyCode::Char('y') => {
                ModalOutcome::Confirmed(self.action.clone())
            }
            KeyCode::Esc | KeyCode::Char('n') => ModalOutcome::Cancelled,
            _ => ModalOutcome::Pending,
        }
    }

    fn render(&self) -> Vec<Line<'static>> {
        vec![
            Line::from(self.message.clone()),
            Line::from(Span::styled(
                "Enter/y confirm · Esc/n cancel",
                Style::default().fg(Color::DarkGray),
            )),
        ]
    }
}

/// Confirmation by typing back a displayed number.
pub struct ChallengeModal {
    message: String,
    digits: String,
    input: TextInput,
    mismatch: bool,
    action: PendingAction,
}

impl ChallengeModal {
    pub fn new(message: impl Into<String>, action: PendingAction) -> Self {
        Self {
            message: message.into(),
            digits: challenge_digits(),
            input: TextInput::new(),
            mismatch: false,
            action,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> ModalOutcome {
        match key.code {
            KeyCode::Esc => ModalOutcome::Cancelled,
            KeyCode::Enter => {
                if self.input.value().trim() == self.digits {
                    ModalOutcome::Confirmed(self.action.clone())
                } else {
                    self.mismatch = true;
                    ModalOutcome::Pending
                }
            }
            _ => {
                if self.input.handle_key(key) {
                    self.mismatch = false;
                }
                ModalOutcome::Pending
            }
        }
    }

    fn render(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(self.message.clone()),
            Line::from(vec![
                Span::raw("Type "),
                Span::styled(
                    self.digits.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(" to confirm:"),
            ]),
            self.input.line(Style::default()),
        ];
        if self.mismatch {
            lines.push(Line::from(Span::styled(
                "Numbers do not match",
                Style::default().fg(Color::Red),
            )));
        }
        lines
    }
}

/// Picks an officer for bulk assignment.
pub struct AssignPicker {
    ids: Vec<Uuid>,
    officers: Vec<(Uuid, String)>,
    cursor: usize,
}

impl AssignPicker {
    pub fn new(ids: Vec<Uuid>, officers: Vec<(Uuid, String)>) -> Self {
        Self {
            ids,
            officers,
            cursor: 0,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> ModalOutcome {
        match key.code {
            KeyCode::Esc => ModalOutcome::Cancelled,
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
                ModalOutcome::Pending
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = (self.cursor + 1).min(self.officers.len().saturating_sub(1));
                ModalOutcome::Pending
            }
            KeyCode::Enter => match self.officers.get(self.cursor) {
                Some((officer, _)) => ModalOutcome::Assigned {
                    ids: self.ids.clone(),
                    officer: *officer,
                },
                None => ModalOutcome::Cancelled,
            },
            _ => ModalOutcome::Pending,
        }
    }

    fn render(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(format!("Assign {} lead(s) to:", self.ids.len()))];
        for (i, (_, name)) in self.officers.iter().enumerate() {
            let style = if i == self.cursor {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(format!("  {name}"), style)));
        }
        lines
    }
}

/// Free-text note entry for a lead.
pub struct NoteEntry {
    lead: Uuid,
    input: TextInput,
}

impl NoteEntry {
    pub fn new(lead: Uuid) -> Self {
        Self {
            lead,
            input: TextInput::new(),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> ModalOutcome {
        match key.code {
            KeyCode::Esc => ModalOutcome::Cancelled,
            KeyCode::Enter => {
                let body = self.input.value().trim().to_string();
                if body.is_empty() {
                    ModalOutcome::Pending
                } else {
                    ModalOutcome::NoteSubmitted {
                        lead: self.lead,
                        body,
                    }
                }
            }
            _ => {
                self.input.handle_key(key);
                ModalOutcome::Pending
            }
        }
    }

    fn render(&self) -> Vec<Line<'static>> {
        vec![
            Line::from("Note text (Enter saves):"),
            self.input.line(Style::default()),
        ]
    }
}

/// Four digits from the process-seeded hasher; plenty of entropy for a UI
/// challenge, and avoids pulling a crate for one call site.
fn challenge_digits() -> String {
    let mut hasher = RandomState::new().build_hasher();
    hasher.write_u64(0x5a1e5);
    let n = 1000 + hasher.finish() % 9000;
    n.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn challenge_only_confirms_on_matching_digits() {
        let mut modal =
            ChallengeModal::new("Delete 3 leads?", PendingAction::BulkDeleteLeads(vec![]));

        // Wrong number: stays open and flags the mismatch.
        modal.input.set_value("0000");
        assert!(matches!(modal.handle_key(key(KeyCode::Enter)), ModalOutcome::Pending));
        assert!(modal.mismatch);

        // The displayed number confirms.
        let digits = modal.digits.clone();
        modal.input.set_value(digits);
        assert!(matches!(
            modal.handle_key(key(KeyCode::Enter)),
            ModalOutcome::Confirmed(PendingAction::BulkDeleteLeads(_))
        ));
    }

    #[test]
    fn challenge_digits_are_four_digits() {
        let digits = challenge_digits();
        assert_eq!(digits.len(), 4);
        assert!(digits.parse::<u32>().is_ok());
    }
}
