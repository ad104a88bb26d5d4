//! Everything behind one open agent form: payload, focus, uploads and lookups

use super::agent::{AgentFormInitialData, FormMode, CALL_TYPES, MAX_LONG_TEXT_CHARS};
use super::agent_form::AgentForm;
use super::forms::{push_char_limited, AgentEditor, AgentFieldId, AgentSection, Form};
use super::reference_data::ReferenceData;
use super::uploads::FileUploads;

pub const SAVE_BEFORE_TEST_CALL: &str = "Please save the agent before starting a test call.";

/// State of the agent form view
#[derive(Debug, Clone)]
pub struct AgentPage {
    pub form: AgentForm,
    pub editor: AgentEditor,
    pub uploads: FileUploads,
    pub reference: ReferenceData,
    /// A test call request is in flight
    pub testing: bool,
}

impl AgentPage {
    pub fn new(mode: FormMode, initial: &AgentFormInitialData) -> Self {
        Self {
            form: AgentForm::new(mode, initial),
            editor: AgentEditor::new(),
            uploads: FileUploads::default(),
            reference: ReferenceData::default(),
            testing: false,
        }
    }

    pub fn focused(&self) -> AgentFieldId {
        self.editor.focused(self.uploads.len())
    }

    pub fn focus_next(&mut self) {
        self.editor.focus_next(self.uploads.len());
    }

    pub fn focus_prev(&mut self) {
        self.editor.focus_prev(self.uploads.len());
    }

    pub fn can_save(&self) -> bool {
        self.form.can_save(self.uploads.is_uploading())
    }

    /// Why the test call cannot start right now, if anything stops it
    pub fn test_call_blocker(&self) -> Option<&'static str> {
        if !self.editor.test_call.has_phone_number() {
            Some("Enter a phone number to start a test call.")
        } else if self.form.is_saving() {
            Some("Please wait for the save to finish.")
        } else if self.testing {
            Some("A test call is already in progress.")
        } else if self.form.is_dirty() {
            Some(SAVE_BEFORE_TEST_CALL)
        } else {
            None
        }
    }

    /// Mirror successful uploads into the payload
    pub fn sync_attachments(&mut self) -> bool {
        let ids = self.uploads.attachment_ids();
        self.form.sync_attachments(ids)
    }

    /// Path typed in the Reference Data section, if any
    pub fn pending_file_path(&self) -> Option<String> {
        let path = self.editor.file_path.as_text().trim();
        (!path.is_empty()).then(|| path.to_string())
    }

    /// Remove the focused entry of the upload list
    pub fn remove_focused_upload(&mut self) -> bool {
        let AgentFieldId::UploadedFile(index) = self.focused() else {
            return false;
        };
        let Some(entry_id) = self.uploads.items().get(index).map(|u| u.entry_id) else {
            return false;
        };
        let removed = self.uploads.remove_file(entry_id);
        if removed {
            self.sync_attachments();
        }
        removed
    }

    /// Type a character into the focused input
    pub fn insert_char(&mut self, c: char) {
        let field = self.focused();
        if c == '\n' && !field.is_multiline() {
            return;
        }
        match field {
            AgentFieldId::Name => self.form.update_field(|d| d.name.push(c)),
            AgentFieldId::Description => self.form.update_field(|d| d.description.push(c)),
            AgentFieldId::CallScript => self
                .form
                .update_field(|d| push_char_limited(&mut d.call_script, c, MAX_LONG_TEXT_CHARS)),
            AgentFieldId::ServiceDescription => self.form.update_field(|d| {
                push_char_limited(&mut d.service_description, c, MAX_LONG_TEXT_CHARS)
            }),
            AgentFieldId::FilePath => self.editor.file_path.push_char(c),
            AgentFieldId::TestCall(_) if field.is_text_input() => {
                if let Some(input) = self.editor.test_call.get_active_field_mut() {
                    input.push_char(c);
                }
            }
            _ => {}
        }
    }

    /// Delete the last character of the focused input
    pub fn backspace(&mut self) {
        let field = self.focused();
        match field {
            AgentFieldId::Name => self.form.update_field(|d| {
                d.name.pop();
            }),
            AgentFieldId::Description => self.form.update_field(|d| {
                d.description.pop();
            }),
            AgentFieldId::CallScript => self.form.update_field(|d| {
                d.call_script.pop();
            }),
            AgentFieldId::ServiceDescription => self.form.update_field(|d| {
                d.service_description.pop();
            }),
            AgentFieldId::FilePath => self.editor.file_path.pop_char(),
            AgentFieldId::TestCall(_) if field.is_text_input() => {
                if let Some(input) = self.editor.test_call.get_active_field_mut() {
                    input.pop_char();
                }
            }
            _ => {}
        }
    }

    /// Left/right on the focused element: cycle a select, move a slider or
    /// flip a switch
    pub fn adjust(&mut self, forward: bool) {
        let step = if forward { 1 } else { -1 };
        match self.focused() {
            AgentFieldId::CallType => {
                let options: Vec<String> = CALL_TYPES.iter().map(|(v, _)| v.to_string()).collect();
                if let Some(next) = cycle(&options, &self.form.data().call_type, forward) {
                    self.form.update_field(|d| d.call_type = next);
                }
            }
            AgentFieldId::Language => {
                let options: Vec<String> =
                    self.reference.languages.iter().map(|l| l.id.clone()).collect();
                if let Some(next) = cycle(&options, &self.form.data().language, forward) {
                    self.form.select_language(&next, &self.reference.voices);
                }
            }
            AgentFieldId::Voice => {
                // Voices stay locked until a language is chosen
                if self.form.data().language.is_empty() {
                    return;
                }
                let options: Vec<String> = self
                    .reference
                    .voices_for(&self.form.data().language)
                    .into_iter()
                    .map(|v| v.id.clone())
                    .collect();
                if let Some(next) = cycle(&options, &self.form.data().voice, forward) {
                    self.form.update_field(|d| d.voice = next);
                }
            }
            AgentFieldId::Prompt => {
                let options: Vec<String> =
                    self.reference.prompts.iter().map(|p| p.id.clone()).collect();
                if let Some(next) = cycle(&options, &self.form.data().prompt, forward) {
                    self.form.update_field(|d| d.prompt = next);
                }
            }
            AgentFieldId::Model => {
                let options: Vec<String> =
                    self.reference.models.iter().map(|m| m.id.clone()).collect();
                if let Some(next) = cycle(&options, &self.form.data().model, forward) {
                    self.form.update_field(|d| d.model = next);
                }
            }
            AgentFieldId::Latency => self.form.step_latency(step),
            AgentFieldId::Speed => self.form.step_speed(step),
            AgentFieldId::AllowHangUp
            | AgentFieldId::AllowCallback
            | AgentFieldId::LiveTransfer => self.toggle_focused_tool(),
            AgentFieldId::TestCall(2) => {
                let gender = &mut self.editor.test_call.gender;
                if forward {
                    gender.select_next();
                } else {
                    gender.select_prev();
                }
            }
            _ => {}
        }
    }

    /// Flip the focused tool switch
    pub fn toggle_focused_tool(&mut self) {
        match self.focused() {
            AgentFieldId::AllowHangUp => self
                .form
                .update_field(|d| d.tools.allow_hang_up = !d.tools.allow_hang_up),
            AgentFieldId::AllowCallback => self
                .form
                .update_field(|d| d.tools.allow_callback = !d.tools.allow_callback),
            AgentFieldId::LiveTransfer => self
                .form
                .update_field(|d| d.tools.live_transfer = !d.tools.live_transfer),
            _ => {}
        }
    }

    /// Open or close the focused section header
    pub fn toggle_focused_section(&mut self) -> bool {
        if let AgentFieldId::Section(section) = self.focused() {
            self.editor.toggle_section(section);
            return true;
        }
        false
    }

    pub fn is_open(&self, section: AgentSection) -> bool {
        self.editor.is_open(section)
    }
}

/// Next or previous option after `current`, wrapping around
fn cycle(options: &[String], current: &str, forward: bool) -> Option<String> {
    if options.is_empty() {
        return None;
    }
    let len = options.len();
    let idx = match options.iter().position(|o| o == current) {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None if forward => 0,
        None => len - 1,
    };
    Some(options[idx].clone())
}
