//! Screens: one server-driven record list per entity, plus the dashboard.
//!
//! [`ListScreen`] carries the state every list screen shares — query state,
//! fetch loader, grid cursor, edit/filter sessions, debounced search — and
//! turns key events into [`ScreenAction`]s for the app loop to execute.
//! Each table owns its own state; nothing is shared across screens.

pub mod dashboard;
pub mod files;
pub mod leads;
pub mod meetings;
pub mod notes;
pub mod officers;
pub mod roles;
pub mod users;

use std::time::Duration;
use std::time::Instant;

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use salesdesk_lib::fetch::FetchResult;
use salesdesk_lib::fetch::ListLoader;
use salesdesk_lib::fetch::RequestTicket;
use salesdesk_lib::fetch::RequestToken;
use salesdesk_lib::error::FetchError;
use salesdesk_lib::query::QueryState;
use salesdesk_lib::session::Session;
use salesdesk_lib::validation::CellValue;
use salesdesk_lib::validation::Registry;
use uuid::Uuid;

use crate::debounce::Debouncer;
use crate::table::Column;
use crate::table::EditOutcome;
use crate::table::EditSession;
use crate::table::FilterOutcome;
use crate::table::FilterSession;
use crate::table::GridState;
use crate::table::render_grid;
use crate::table::render_popup;
use crate::widgets::TextInput;

/// Settle delay before a search keystroke burst becomes one request.
const SEARCH_SETTLE: Duration = Duration::from_millis(350);

/// Page sizes the `+`/`-` keys cycle through.
const PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];

/// Debounced free-text search bound to the `search` filter key.
pub struct SearchState {
    pub input: TextInput,
    pub focused: bool,
    debouncer: Debouncer,
}

impl SearchState {
    fn new() -> Self {
        Self {
            input: TextInput::new(),
            focused: false,
            debouncer: Debouncer::new(SEARCH_SETTLE),
        }
    }
}

/// What a key event asks the app loop to do for this screen.
pub enum ScreenAction {
    None,
    /// Run the ticket's query against the screen's entity endpoint.
    Fetch(RequestTicket),
    /// Commit an inline cell edit.
    Commit {
        row_id: Uuid,
        field: &'static str,
        value: CellValue,
        complete: bool,
    },
    /// Delete one record (confirm first).
    Delete(Uuid),
    /// Delete the marked records (numeric-challenge confirm first).
    BulkDelete(Vec<Uuid>),
    /// Assign the marked records to an officer (picker first).
    BulkAssign(Vec<Uuid>),
    /// Merge a duplicate into a primary record (confirm first).
    Merge { primary: Uuid, duplicate: Uuid },
    /// Open the note-entry modal for a lead.
    AddNote(Uuid),
}

/// Capability context for the shared key handling.
pub struct ListCtx<'a, R> {
    pub columns: &'a [Column<R>],
    pub session: &'a Session,
    pub registry: &'a Registry,
    /// Capability gating inline edits (ownership also unlocks them).
    pub edit_capability: &'static str,
    /// Capability gating single-record deletes; `None` disables deleting.
    pub delete_capability: Option<&'static str>,
}

/// Shared state of one server-driven record list.
pub struct ListScreen<R> {
    pub loader: ListLoader<R>,
    pub grid: GridState,
    pub editor: Option<EditSession>,
    pub filter: Option<FilterSession>,
    pub search: Option<SearchState>,
    id_of: fn(&R) -> Uuid,
    owner_of: fn(&R) -> Option<Uuid>,
}

impl<R> ListScreen<R> {
    /// Creates a list screen.
    ///
    /// `owner_of` extracts the record's owner for ownership-scoped
    /// permission checks; return `None` when the entity has no owner.
    pub fn new(
        query: QueryState,
        with_search: bool,
        id_of: fn(&R) -> Uuid,
        owner_of: fn(&R) -> Option<Uuid>,
    ) -> Self {
        Self {
            loader: ListLoader::new(query),
            grid: GridState::default(),
            editor: None,
            filter: None,
            search: with_search.then(SearchState::new),
            id_of,
            owner_of,
        }
    }

    /// Rows of the current page.
    pub fn rows(&self) -> &[R] {
        self.loader.result().map(|r| r.rows.as_slice()).unwrap_or(&[])
    }

    /// The row under the cursor.
    pub fn current_row(&self) -> Option<&R> {
        self.rows().get(self.grid.cursor_row)
    }

    /// Ids of the marked rows, or the current row when none are marked.
    pub fn selection(&self) -> Vec<Uuid> {
        if self.grid.marked.is_empty() {
            self.current_row().map(self.id_of).into_iter().collect()
        } else {
            self.grid.marked.iter().copied().collect()
        }
    }

    /// Applies a fetch outcome; returns `true` if it was authoritative.
    pub fn on_fetch(
        &mut self,
        token: RequestToken,
        outcome: Result<FetchResult<R>, FetchError>,
    ) -> bool {
        let applied = self.loader.complete(token, outcome);
        if applied {
            let rows = self.rows().len();
            self.grid.clamp(rows, usize::MAX);
        }
        applied
    }

    /// Issues the initial fetch if nothing has been loaded yet.
    pub fn ensure_loaded(&mut self) -> Option<RequestTicket> {
        matches!(
            self.loader.phase(),
            salesdesk_lib::fetch::LoadPhase::Idle
        )
        .then(|| self.loader.refetch())
    }

    /// Drives the debounced search. Call once per UI tick.
    pub fn on_tick(&mut self, now: Instant) -> Option<RequestTicket> {
        let value = self.search.as_mut()?.debouncer.poll(now)?;
        self.apply_filter("search", value)
    }

    fn apply_filter(&mut self, column: &str, value: String) -> Option<RequestTicket> {
        let query = self.loader.query().clone().with_filter(column, value);
        self.loader.set_query(query)
    }

    fn apply_query(&mut self, query: QueryState) -> ScreenAction {
        match self.loader.set_query(query) {
            Some(ticket) => ScreenAction::Fetch(ticket),
            None => ScreenAction::None,
        }
    }

    /// Shared key handling for navigation, sort, filter, search, paging,
    /// marking, editing, refetch, and delete.
    pub fn handle_key(&mut self, key: KeyEvent, ctx: &ListCtx<'_, R>) -> ScreenAction {
        // An open edit session captures all input.
        if let Some(editor) = &mut self.editor {
            return match editor.handle_key(key, ctx.registry) {
                EditOutcome::Pending => ScreenAction::None,
                EditOutcome::Cancelled => {
                    self.editor = None;
                    ScreenAction::None
                }
                EditOutcome::Commit(value) => match self.editor.take() {
                    Some(session) => ScreenAction::Commit {
                        row_id: session.row_id,
                        field: session.field,
                        value,
                        complete: session.send_complete_object,
                    },
                    None => ScreenAction::None,
                },
            };
        }

        if let Some(filter) = &mut self.filter {
            return match filter.handle_key(key) {
                FilterOutcome::Pending => ScreenAction::None,
                FilterOutcome::Cancelled => {
                    self.filter = None;
                    ScreenAction::None
                }
                FilterOutcome::Apply(value) => {
                    let column = filter.column_id;
                    self.filter = None;
                    let query = self.loader.query().clone().with_filter(column, value);
                    self.apply_query(query)
                }
            };
        }

        if let Some(search) = &mut self.search {
            if search.focused {
                match key.code {
                    KeyCode::Esc => {
                        search.focused = false;
                        return ScreenAction::None;
                    }
                    KeyCode::Enter => {
                        search.focused = false;
                        let value = search
                            .debouncer
                            .flush()
                            .unwrap_or_else(|| search.input.value().to_string());
                        return match self.apply_filter("search", value) {
                            Some(ticket) => ScreenAction::Fetch(ticket),
                            None => ScreenAction::None,
                        };
                    }
                    _ => {
                        if search.input.handle_key(key) {
                            search.debouncer.touch(search.input.value());
                        }
                        return ScreenAction::None;
                    }
                }
            }
        }

        let rows = self.rows().len();
        let cols = ctx.columns.len();

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.grid.move_row(1, rows);
                ScreenAction::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.grid.move_row(-1, rows);
                ScreenAction::None
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.grid.move_col(-1, cols);
                ScreenAction::None
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.grid.move_col(1, cols);
                ScreenAction::None
            }
            KeyCode::Char('g') => {
                self.grid.first_row();
                ScreenAction::None
            }
            KeyCode::Char('G') => {
                self.grid.last_row(rows);
                ScreenAction::None
            }
            KeyCode::Char('n') | KeyCode::PageDown => {
                let query = self.loader.query().clone();
                let next = query.page_index() + 1;
                let pages = self
                    .loader
                    .result()
                    .map(|r| r.total_pages)
                    .unwrap_or(u64::MAX);
                if (next as u64) < pages {
                    self.apply_query(query.with_page(next))
                } else {
                    ScreenAction::None
                }
            }
            KeyCode::Char('p') | KeyCode::PageUp => {
                let query = self.loader.query().clone();
                match query.page_index().checked_sub(1) {
                    Some(prev) => self.apply_query(query.with_page(prev)),
                    None => ScreenAction::None,
                }
            }
            KeyCode::Char('+') => self.cycle_page_size(1),
            KeyCode::Char('-') => self.cycle_page_size(-1),
            KeyCode::Char('s') => {
                let Some(column) = ctx.columns.get(self.grid.cursor_col) else {
                    return ScreenAction::None;
                };
                if !column.sortable {
                    return ScreenAction::None;
                }
                let query = self.loader.query().clone().toggle_sort(column.id);
                self.apply_query(query)
            }
            KeyCode::Char('f') => {
                let Some(column) = ctx.columns.get(self.grid.cursor_col) else {
                    return ScreenAction::None;
                };
                if let Some(kind) = &column.filter {
                    let current = self
                        .loader
                        .query()
                        .filters()
                        .get(column.id)
                        .unwrap_or_default()
                        .to_string();
                    self.filter = Some(FilterSession::open(
                        column.id,
                        column.header,
                        kind,
                        &current,
                    ));
                }
                ScreenAction::None
            }
            KeyCode::Char('/') => {
                if let Some(search) = &mut self.search {
                    search.focused = true;
                }
                ScreenAction::None
            }
            KeyCode::Char(' ') | KeyCode::Char('x') => {
                if let Some(row) = self.current_row() {
                    let id = (self.id_of)(row);
                    self.grid.toggle_mark(id);
                    self.grid.move_row(1, rows);
                }
                ScreenAction::None
            }
            KeyCode::Char('r') => ScreenAction::Fetch(self.loader.refetch()),
            KeyCode::Char('e') | KeyCode::Enter => {
                let Some(column) = ctx.columns.get(self.grid.cursor_col) else {
                    return ScreenAction::None;
                };
                let Some(row) = self.rows().get(self.grid.cursor_row) else {
                    return ScreenAction::None;
                };
                // Permission gating: capability or ownership, else the
                // affordance stays silently inactive.
                if !ctx
                    .session
                    .allows_for(ctx.edit_capability, (self.owner_of)(row))
                {
                    return ScreenAction::None;
                }
                self.editor = EditSession::open(column, row, (self.id_of)(row));
                ScreenAction::None
            }
            KeyCode::Char('d') => {
                let Some(capability) = ctx.delete_capability else {
                    return ScreenAction::None;
                };
                let Some(row) = self.current_row() else {
                    return ScreenAction::None;
                };
                if !ctx.session.allows_for(capability, (self.owner_of)(row)) {
                    return ScreenAction::None;
                }
                ScreenAction::Delete((self.id_of)(row))
            }
            _ => ScreenAction::None,
        }
    }

    fn cycle_page_size(&mut self, step: isize) -> ScreenAction {
        let query = self.loader.query().clone();
        let current = query.page_size();
        let idx = PAGE_SIZES
            .iter()
            .position(|s| *s >= current)
            .unwrap_or(PAGE_SIZES.len() - 1) as isize;
        let next = (idx + step).clamp(0, PAGE_SIZES.len() as isize - 1) as usize;
        if PAGE_SIZES[next] == current {
            return ScreenAction::None;
        }
        self.apply_query(query.with_page_size(PAGE_SIZES[next]))
    }
}

/// Shared chrome for list screens: optional search bar, the grid, a footer
/// with pagination and filter echo, and any active popup.
#[allow(clippy::too_many_arguments)]
pub fn render_list<R>(
    frame: &mut Frame,
    area: Rect,
    columns: &[Column<R>],
    screen: &ListScreen<R>,
    loading_glyph: Option<&str>,
    extra_status: Option<String>,
) {
    let has_search = screen.search.is_some();
    let chunks = Layout::vertical(if has_search {
        vec![
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ]
    } else {
        vec![Constraint::Min(3), Constraint::Length(1)]
    })
    .split(area);

    let (grid_area, footer_area) = if let Some(search) = &screen.search {
        let style = if search.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut line = vec![Span::styled("Search: ", style)];
        if search.focused {
            line.extend(search.input.line(style).spans);
        } else {
            line.push(Span::styled(search.input.value().to_string(), style));
        }
        frame.render_widget(Paragraph::new(Line::from(line)), chunks[0]);
        (chunks[1], chunks[2])
    } else {
        (chunks[0], chunks[1])
    };

    let query = screen.loader.query();
    let active_filters: Vec<(&str, &str)> = query.filters().active().collect();

    render_grid(
        frame,
        grid_area,
        columns,
        screen.rows(),
        &screen.grid,
        query.sorting(),
        &active_filters,
        screen.id_of,
    );

    let mut footer = match screen.loader.result() {
        Some(result) => format!(
            "page {}/{} · {} of {} records · size {}",
            result.page_index + 1,
            result.total_pages.max(1),
            result.total_filtered,
            result.total,
            result.page_size,
        ),
        None => "no data yet".to_string(),
    };
    if !screen.grid.marked.is_empty() {
        footer.push_str(&format!(" · {} marked", screen.grid.marked.len()));
    }
    if !active_filters.is_empty() {
        let echo: Vec<String> = match screen.loader.applied_filters() {
            // Prefer the server's echo of what it actually applied.
            Some(applied) if !applied.is_empty() => applied
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect(),
            _ => active_filters
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect(),
        };
        footer.push_str(&format!(" · filters: {}", echo.join(" ")));
    }
    if let Some(extra) = extra_status {
        footer.push_str(" · ");
        footer.push_str(&extra);
    }
    if let Some(glyph) = loading_glyph {
        footer.push_str(" · ");
        footer.push_str(glyph);
    }
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            footer,
            Style::default().fg(Color::DarkGray),
        ))),
        footer_area,
    );

    if let Some(editor) = &screen.editor {
        render_popup(frame, area, "Edit", editor.render());
    } else if let Some(filter) = &screen.filter {
        render_popup(frame, area, "Filter", filter.render());
    }
}
