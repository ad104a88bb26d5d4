//! Campaigns table view

use super::widgets::render_scrollable_table;
use crate::app::App;
use crate::state::{Campaign, CampaignStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

/// Draw the campaigns list with search and pagination
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search
            Constraint::Min(0),    // Table
            Constraint::Length(1), // Pagination
        ])
        .split(area);

    draw_search(frame, chunks[0], app);
    draw_table(frame, chunks[1], app);
    draw_pagination(frame, chunks[2], app);
}

fn draw_search(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.state.search_focused;
    let search = app.state.campaigns.search();

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let content = if search.is_empty() && !focused {
        Line::from(Span::styled(
            "Search campaigns... (press /)",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let cursor = if focused { "▌" } else { "" };
        Line::from(vec![
            Span::raw(search),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ])
    };

    let block = Block::default()
        .title(" Search ")
        .borders(Borders::ALL)
        .border_style(border_style);
    frame.render_widget(Paragraph::new(content).block(block), area);
}

fn draw_table(frame: &mut Frame, area: Rect, app: &App) {
    let list = &app.state.campaigns;
    let items = list.page_items();

    let block = Block::default()
        .title(format!(" Campaigns ({}) ", list.filtered().len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    if items.is_empty() {
        let message = if list.search().is_empty() {
            "No campaigns yet. Press n to create one."
        } else {
            "No campaigns match your search."
        };
        let empty = Paragraph::new(Span::styled(message, Style::default().fg(Color::DarkGray)))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(
        ["", "Name", "List", "Agent", "Created", "Dials", "Answered", "Minutes", "Status"]
            .into_iter()
            .map(|h| Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD))),
    )
    .style(Style::default().fg(Color::Gray))
    .bottom_margin(1);

    let rows: Vec<Row> = items.iter().map(|c| campaign_row(c)).collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Min(20),
        Constraint::Min(16),
        Constraint::Min(16),
        Constraint::Length(13),
        Constraint::Length(6),
        Constraint::Length(9),
        Constraint::Length(8),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    render_scrollable_table(frame, area, table, list.selected_row);
}

fn campaign_row(campaign: &Campaign) -> Row<'static> {
    let switch = if campaign.enabled {
        Span::styled("[on]", Style::default().fg(Color::Green))
    } else {
        Span::styled("[off]", Style::default().fg(Color::DarkGray))
    };

    let status_color = match campaign.status {
        CampaignStatus::Running => Color::Blue,
        CampaignStatus::Completed => Color::Green,
    };

    Row::new(vec![
        Cell::from(switch),
        Cell::from(campaign.name.clone()),
        Cell::from(campaign.list.clone()),
        Cell::from(campaign.agent.clone()),
        Cell::from(campaign.created_label()),
        Cell::from(campaign.dials.to_string()),
        Cell::from(campaign.answered.to_string()),
        Cell::from(campaign.minutes_used.to_string()),
        Cell::from(Span::styled(
            campaign.status.label(),
            Style::default().fg(status_color),
        )),
    ])
}

fn draw_pagination(frame: &mut Frame, area: Rect, app: &App) {
    let list = &app.state.campaigns;

    let enabled = Style::default().fg(Color::Cyan);
    let disabled = Style::default().fg(Color::DarkGray);

    let line = Line::from(vec![
        Span::styled(
            " ◂ Prev (h) ",
            if list.has_prev_page() { enabled } else { disabled },
        ),
        Span::raw(format!(
            " Page {} of {} ",
            list.page(),
            list.total_pages().max(1)
        )),
        Span::styled(
            " Next (l) ▸ ",
            if list.has_next_page() { enabled } else { disabled },
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}
