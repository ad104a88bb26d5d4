//! Create Campaign dialog: name, call type and Cancel/Create buttons

use super::base::{centered_dialog_area, dialog_block, hint_spans};
use crate::state::{CampaignCreateForm, DialogButton, Form};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use crate::ui::forms::draw_field;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const DIALOG_WIDTH: u16 = 56;
const DIALOG_HEIGHT: u16 = 16;

/// Render the create-campaign form as a centered modal
pub fn render_create_campaign_dialog(frame: &mut Frame, form: &CampaignCreateForm) {
    let dialog_area = centered_dialog_area(frame, DIALOG_WIDTH, DIALOG_HEIGHT);

    let block = dialog_block(Color::Cyan);
    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),             // Title
            Constraint::Length(3),             // Name
            Constraint::Length(3),             // Call type
            Constraint::Length(BUTTON_HEIGHT), // Buttons
            Constraint::Min(0),
            Constraint::Length(1), // Hints
        ])
        .split(inner);

    let title = Paragraph::new(Line::from(Span::styled(
        "Create Campaign",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, chunks[0]);

    for index in 0..2 {
        if let Some(field) = form.get_field(index) {
            draw_field(frame, chunks[index + 1], field, form.active_field() == index);
        }
    }

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[3]);

    let on_buttons = form.is_buttons_row_active();
    render_button(
        frame,
        buttons[0],
        "Cancel",
        on_buttons && form.selected_button == DialogButton::Cancel,
        true,
    );
    render_button(
        frame,
        buttons[1],
        "Create",
        on_buttons && form.selected_button == DialogButton::Confirm,
        form.submission().is_some(),
    );

    let hints = Paragraph::new(Line::from(hint_spans(&[
        ("Tab", "next"),
        ("←→", "choose"),
        ("Enter", "confirm"),
        ("Esc", "cancel"),
    ])));
    frame.render_widget(hints, chunks[5]);
}
