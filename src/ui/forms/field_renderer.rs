//! Bordered single-field rendering

use crate::state::{FieldValue, FormField};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw a field in its own bordered box, titled with its label.
///
/// Choice fields show `◂ option ▸`; limited text fields show a
/// character counter in the bottom border.
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let accent = if is_active { Color::Cyan } else { Color::DarkGray };
    let cursor = Span::styled("▌", Style::default().fg(Color::Cyan));

    let is_choice = matches!(field.value, FieldValue::Choice { .. });
    let display_value = field.display_value();

    let mut lines: Vec<Line> = if display_value.is_empty() && !is_active {
        vec![Line::from(Span::styled(
            "(empty)",
            Style::default().fg(Color::DarkGray),
        ))]
    } else if field.is_multiline {
        display_value
            .split('\n')
            .map(|l| Line::from(l.to_string()))
            .collect()
    } else {
        let value_style = if is_choice && field.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };
        vec![Line::from(Span::styled(display_value, value_style))]
    };

    if is_active && !is_choice {
        match lines.last_mut() {
            Some(last) => last.spans.push(cursor),
            None => lines.push(Line::from(cursor)),
        }
    }

    let mut block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));

    if let Some(max) = field.max_chars {
        let count = field.as_text().chars().count();
        block = block.title_bottom(
            Line::from(Span::styled(
                format!(" {count}/{max} "),
                Style::default().fg(Color::DarkGray),
            ))
            .right_aligned(),
        );
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(paragraph, area);
}
