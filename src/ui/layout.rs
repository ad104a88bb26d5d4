//! Layout components (header, status bar)

use crate::app::App;
use crate::platform::{SAVE_SHORTCUT, TEST_CALL_SHORTCUT};
use crate::state::{ToastKind, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into header, content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Draw the header with the current location
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        " Callboard ",
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    spans.push(Span::styled(
        format!(" {}", View::Campaigns.title()),
        Style::default().fg(Color::White),
    ));

    if let Some(page) = &app.state.agent_page {
        spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            page.form.mode().heading(),
            Style::default().fg(Color::White),
        ));
        if page.form.is_dirty() {
            spans.push(Span::styled(" •", Style::default().fg(Color::Yellow)));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the status bar: the latest toast, or key hints
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    if let Some(toast) = app.state.latest_toast() {
        let (icon, color) = match toast.kind {
            ToastKind::Success => (" ✓ ", Color::Green),
            ToastKind::Error => (" ✗ ", Color::Red),
        };
        spans.push(Span::styled(icon, Style::default().fg(color)));
        spans.push(Span::styled(
            toast.message.as_str(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    } else {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            get_view_hints(app),
            Style::default().fg(Color::Gray),
        ));
    }

    let quit_hint = " ^C:quit ";
    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(app: &App) -> String {
    if app.state.create_campaign.is_some() {
        return "Tab:next  ←/→:choose  Enter:confirm  Esc:cancel".to_string();
    }
    if app.state.pending_delete.is_some() {
        return "↑↓:select  Enter:confirm  y:delete  Esc:cancel".to_string();
    }

    match app.state.current_view {
        View::Campaigns if app.state.search_focused => {
            "type to search  Enter/Esc:done".to_string()
        }
        View::Campaigns => {
            "j/k:nav  h/l:page  /:search  Space:toggle  n:new  d:delete  a:agent  e:edit agent"
                .to_string()
        }
        View::AgentForm => format!(
            "Tab:next  Enter:open/confirm  ←/→:change  {SAVE_SHORTCUT}:save  {TEST_CALL_SHORTCUT}:test call  Esc:back"
        ),
    }
}
