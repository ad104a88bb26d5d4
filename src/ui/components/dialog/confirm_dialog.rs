//! Confirmation dialog for deleting a campaign

use super::base::{centered_dialog_area, dialog_block, hint_spans, truncate_string};
use crate::state::PendingDelete;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const DIALOG_WIDTH: u16 = 50;
const DIALOG_HEIGHT: u16 = 10;

/// Render the delete confirmation for the pending campaign
pub fn render_confirm_dialog(frame: &mut Frame, pending: &PendingDelete) {
    let dialog_area = centered_dialog_area(frame, DIALOG_WIDTH, DIALOG_HEIGHT);

    let max_display_len = (DIALOG_WIDTH - 6) as usize;
    let display_name = truncate_string(&pending.campaign_name, max_display_len);

    let mut content = vec![
        Line::from(Span::styled(
            "Delete Campaign",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Are you sure you want to delete",
            Style::default().fg(Color::White),
        )),
        Line::from(vec![
            Span::styled(display_name, Style::default().fg(Color::Cyan)),
            Span::styled("?", Style::default().fg(Color::White)),
        ]),
        Line::from(""),
    ];

    for (is_delete, label, color) in [(false, "Cancel", Color::White), (true, "Delete", Color::Red)] {
        let is_selected = pending.delete_selected == is_delete;
        let prefix = if is_selected { "▸ " } else { "  " };
        let style = if is_selected {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        content.push(Line::from(Span::styled(format!("{prefix}{label}"), style)));
    }

    content.push(Line::from(""));
    content.push(Line::from(hint_spans(&[
        ("↑↓", "select"),
        ("Enter", "confirm"),
        ("Esc", "cancel"),
    ])));

    let dialog = Paragraph::new(content)
        .block(dialog_block(Color::Red))
        .style(Style::new().bg(Color::Black).fg(Color::White));

    frame.render_widget(dialog, dialog_area);
}
