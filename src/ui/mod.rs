//! UI module for rendering the TUI

mod agent_form;
mod campaigns;
mod components;
mod forms;
mod layout;
mod widgets;

use crate::app::App;
use crate::state::View;
use components::{render_confirm_dialog, render_create_campaign_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, main_area, status_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area, app);

    match app.state.current_view {
        View::Campaigns => campaigns::draw(frame, main_area, app),
        View::AgentForm => agent_form::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Modal dialogs render on top
    if let Some(form) = &app.state.create_campaign {
        render_create_campaign_dialog(frame, form);
    }
    if let Some(pending) = &app.state.pending_delete {
        render_confirm_dialog(frame, pending);
    }
}
