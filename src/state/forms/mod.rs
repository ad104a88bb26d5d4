//! Form domain layer
//!
//! Type-safe field values and focus handling for the dialogs and the agent form.

mod agent_editor;
mod field;
mod form_state;

pub use agent_editor::{push_char_limited, AgentEditor, AgentFieldId, AgentSection};
pub use field::{FieldValue, FormField};
pub use form_state::{CampaignCreateForm, DialogButton, Form, TestCallForm};
