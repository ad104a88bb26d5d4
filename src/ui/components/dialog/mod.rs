//! Modal dialogs drawn over the current view

mod base;
mod confirm_dialog;
mod create_campaign_dialog;

pub use confirm_dialog::render_confirm_dialog;
pub use create_campaign_dialog::render_create_campaign_dialog;
