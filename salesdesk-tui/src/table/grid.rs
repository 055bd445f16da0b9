//! Grid cursor state and rendering.

use std::collections::HashSet;

use ratatui::Frame;
use ratatui::layout::Constraint;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Cell;
use ratatui::widgets::Clear;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Row;
use ratatui::widgets::Table;
use salesdesk_lib::query::SortSpec;
use uuid::Uuid;

use super::column::Column;

/// Cursor and selection state for one grid.
#[derive(Debug, Default)]
pub struct GridState {
    /// Row the cursor is on, within the current page.
    pub cursor_row: usize,
    /// Column the cursor is on.
    pub cursor_col: usize,
    /// Marked row ids for bulk actions.
    pub marked: HashSet<Uuid>,
}

impl GridState {
    /// Moves the row cursor by a signed delta, clamped to the page.
    pub fn move_row(&mut self, delta: isize, row_count: usize) {
        if row_count == 0 {
            self.cursor_row = 0;
            return;
        }
        let max = row_count - 1;
        let next = self.cursor_row as isize + delta;
        self.cursor_row = next.clamp(0, max as isize) as usize;
    }

    /// Moves the column cursor by a signed delta, clamped.
    pub fn move_col(&mut self, delta: isize, col_count: usize) {
        if col_count == 0 {
            self.cursor_col = 0;
            return;
        }
        let max = col_count - 1;
        let next = self.cursor_col as isize + delta;
        self.cursor_col = next.clamp(0, max as isize) as usize;
    }

    /// Jumps to the first row.
    pub fn first_row(&mut self) {
        self.cursor_row = 0;
    }

    /// Jumps to the last row of the page.
    pub fn last_row(&mut self, row_count: usize) {
        self.cursor_row = row_count.saturating_sub(1);
    }

    /// Re-clamps the cursor after the page contents changed.
    pub fn clamp(&mut self, row_count: usize, col_count: usize) {
        self.cursor_row = self.cursor_row.min(row_count.saturating_sub(1));
        self.cursor_col = self.cursor_col.min(col_count.saturating_sub(1));
    }

    /// Toggles the mark on a row id.
    pub fn toggle_mark(&mut self, id: Uuid) {
        if !self.marked.insert(id) {
            self.marked.remove(&id);
        }
    }

    /// Clears all marks.
    pub fn clear_marks(&mut self) {
        self.marked.clear();
    }
}

/// Renders the grid into `area`.
///
/// Rows render in the order given; columns render in definition order. The
/// header carries the sort indicator per column (`▲`/`▼`, with its 1-based
/// position when several columns sort) and a `≡` marker on columns with an
/// active filter.
#[allow(clippy::too_many_arguments)]
pub fn render_grid<R>(
    frame: &mut Frame,
    area: Rect,
    columns: &[Column<R>],
    rows: &[R],
    grid: &GridState,
    sorting: &SortSpec,
    active_filters: &[(&str, &str)],
    id_of: fn(&R) -> Uuid,
) {
    let multi_sort = sorting.columns().len() > 1;

    let header_cells: Vec<Cell> = columns
        .iter()
        .map(|column| {
            let mut text = column.header.to_string();
            if let Some(direction) = sorting.direction_of(column.id) {
                let arrow = match direction {
                    salesdesk_lib::query::Direction::Asc => "▲",
                    salesdesk_lib::query::Direction::Desc => "▼",
                };
                text.push(' ');
                text.push_str(arrow);
                if multi_sort {
                    if let Some(pos) = sorting.position_of(column.id) {
                        text.push_str(&(pos + 1).to_string());
                    }
                }
            }
            if active_filters.iter().any(|(c, _)| *c == column.id) {
                text.push_str(" ≡");
            }
            Cell::from(Span::styled(
                text,
                Style::default().add_modifier(Modifier::BOLD),
            ))
        })
        .collect();
    let header = Row::new(header_cells).height(1);

    let body: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(row_idx, row)| {
            let marked = grid.marked.contains(&id_of(row));
            let cells: Vec<Cell> = columns
                .iter()
                .enumerate()
                .map(|(col_idx, column)| {
                    let mut style = Style::default();
                    if marked {
                        style = style.fg(Color::Yellow);
                    }
                    if row_idx == grid.cursor_row && col_idx == grid.cursor_col {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    Cell::from(Span::styled(column.display(row), style))
                })
                .collect();
            let mut row_widget = Row::new(cells).height(1);
            if row_idx == grid.cursor_row {
                row_widget = row_widget.style(Style::default().add_modifier(Modifier::BOLD));
            }
            row_widget
        })
        .collect();

    let widths: Vec<Constraint> = columns
        .iter()
        .map(|c| {
            if c.width == 0 {
                Constraint::Min(12)
            } else {
                Constraint::Length(c.width)
            }
        })
        .collect();

    let table = Table::new(body, widths)
        .header(header)
        .column_spacing(1)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(table, area);
}

/// Renders a bordered popup centered in `area` with the given lines.
pub fn render_popup(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line<'static>>) {
    let width = (area.width.saturating_sub(4)).min(60).max(24);
    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let popup = Rect::new(x, y, width, height);

    frame.render_widget(Clear, popup);
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title.to_string()),
    );
    frame.render_widget(paragraph, popup);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_clamps_to_page_bounds() {
        let mut grid = GridState::default();
        grid.move_row(5, 3);
        assert_eq!(grid.cursor_row, 2);
        grid.move_row(-10, 3);
        assert_eq!(grid.cursor_row, 0);
        grid.move_row(1, 0);
        assert_eq!(grid.cursor_row, 0);
    }

    #[test]
    fn marks_toggle_per_row_id() {
        let mut grid = GridState::default();
        let id = Uuid::new_v4();
        grid.toggle_mark(id);
        assert!(grid.marked.contains(&id));
        grid.toggle_mark(id);
        assert!(!grid.marked.contains(&id));
    }
}
