//! Dashboard: aggregate counts plus recent activity.
//!
//! Backed by the same list endpoints as the grids; the tiles read the
//! aggregate counts the envelopes carry and the lists show a small page of
//! the freshest records.

use ratatui::Frame;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use salesdesk_lib::fetch::ListLoader;
use salesdesk_lib::fetch::RequestTicket;
use salesdesk_lib::model::Lead;
use salesdesk_lib::model::Meeting;
use salesdesk_lib::query::QueryState;

pub struct DashboardScreen {
    pub leads: ListLoader<Lead>,
    pub meetings: ListLoader<Meeting>,
}

impl DashboardScreen {
    pub fn new() -> Self {
        let recent_leads = QueryState::new()
            .with_page_size(10)
            .toggle_sort("updatedAt")
            .toggle_sort("updatedAt");
        let upcoming = QueryState::new()
            .with_page_size(10)
            .with_filter("status", "UPCOMING")
            .toggle_sort("scheduledAt");
        Self {
            leads: ListLoader::new(recent_leads),
            meetings: ListLoader::new(upcoming),
        }
    }

    /// Issues both fetches.
    pub fn refresh(&mut self) -> (RequestTicket, RequestTicket) {
        (self.leads.refetch(), self.meetings.refetch())
    }

    pub fn view(&self, frame: &mut Frame, area: Rect, loading_glyph: Option<&str>) {
        let chunks =
            Layout::vertical([Constraint::Length(3), Constraint::Min(4)]).split(area);

        self.render_tiles(frame, chunks[0]);

        let halves =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(chunks[1]);
        self.render_recent_leads(frame, halves[0], loading_glyph);
        self.render_upcoming(frame, halves[1], loading_glyph);
    }

    fn render_tiles(&self, frame: &mut Frame, area: Rect) {
        let leads = self.leads.result();
        let meetings = self.meetings.result();

        let tile = |label: &str, value: Option<i64>| -> Paragraph<'static> {
            let value = value.map(|v| v.to_string()).unwrap_or_else(|| "–".into());
            Paragraph::new(Line::from(vec![
                Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" "),
                Span::styled(label.to_string(), Style::default().fg(Color::DarkGray)),
            ]))
            .block(Block::default().borders(Borders::ALL))
        };

        let tiles = [
            tile("leads", leads.and_then(|r| r.aggregate("allCount"))),
            tile("new", leads.and_then(|r| r.aggregate("newCount"))),
            tile("qualified", leads.and_then(|r| r.aggregate("qualifiedCount"))),
            tile("converted", leads.and_then(|r| r.aggregate("convertedCount"))),
            tile("upcoming mtgs", meetings.and_then(|r| r.aggregate("upcomingCount"))),
        ];

        let cells = Layout::horizontal([Constraint::Ratio(1, 5); 5]).split(area);
        for (tile, cell) in tiles.into_iter().zip(cells.iter()) {
            frame.render_widget(tile, *cell);
        }
    }

    fn render_recent_leads(&self, frame: &mut Frame, area: Rect, loading_glyph: Option<&str>) {
        let mut lines = Vec::new();
        if let Some(result) = self.leads.result() {
            for lead in &result.rows {
                lines.push(Line::from(format!(
                    "{:<22} {:<14} {:>5}  {}",
                    lead.full_name(),
                    lead.status.to_string(),
                    lead.score,
                    lead.company,
                )));
            }
        } else if let Some(glyph) = loading_glyph {
            lines.push(Line::from(glyph.to_string()));
        }
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Recent leads"),
            ),
            area,
        );
    }

    fn render_upcoming(&self, frame: &mut Frame, area: Rect, loading_glyph: Option<&str>) {
        let mut lines = Vec::new();
        if let Some(result) = self.meetings.result() {
            for meeting in &result.rows {
                lines.push(Line::from(format!(
                    "{}  {}",
                    meeting.scheduled_at.format("%m-%d %H:%M"),
                    meeting.subject,
                )));
            }
        } else if let Some(glyph) = loading_glyph {
            lines.push(Line::from(glyph.to_string()));
        }
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Upcoming meetings"),
            ),
            area,
        );
    }
}
