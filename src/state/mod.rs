//! Application state module

mod agent;
mod agent_form;
mod agent_page;
mod app_state;
mod campaigns;
mod forms;
mod reference_data;
mod toast;
mod uploads;

pub use agent::*;
pub use agent_form::AgentForm;
pub use agent_page::{AgentPage, SAVE_BEFORE_TEST_CALL};
pub use app_state::*;
pub use campaigns::*;
pub use forms::*;
pub use reference_data::{Language, Model, Prompt, ReferenceData, Voice};
pub use toast::*;
pub use uploads::*;

#[cfg(test)]
pub(crate) use reference_data::fixtures as reference_fixtures;
