//! Focus and layout model for the agent form view
//!
//! The form is a column of collapsible sections followed by the test call
//! panel and the save button. Only fields of open sections take focus.

use super::field::FormField;
use super::form_state::{Form, TestCallForm};

/// Collapsible sections of the agent form, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentSection {
    BasicSettings,
    CallScript,
    ServiceDescription,
    ReferenceData,
    Tools,
}

impl AgentSection {
    pub const ALL: [AgentSection; 5] = [
        Self::BasicSettings,
        Self::CallScript,
        Self::ServiceDescription,
        Self::ReferenceData,
        Self::Tools,
    ];

    fn index(self) -> usize {
        match self {
            Self::BasicSettings => 0,
            Self::CallScript => 1,
            Self::ServiceDescription => 2,
            Self::ReferenceData => 3,
            Self::Tools => 4,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::BasicSettings => "Basic Settings",
            Self::CallScript => "Call Script",
            Self::ServiceDescription => "Service/Product Description",
            Self::ReferenceData => "Reference Data",
            Self::Tools => "Tools",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::BasicSettings => "Add some information about your agent to get started.",
            Self::CallScript => "What would you like the AI agent to say during the call?",
            Self::ServiceDescription => "Add a knowledge base about your service or product.",
            Self::ReferenceData => "Enhance your agent's knowledge base with uploaded files.",
            Self::Tools => {
                "Tools that allow the AI agent to perform call-handling actions and manage session control."
            }
        }
    }

    /// Fields shown when the section is open
    fn fields(self, upload_count: usize) -> Vec<AgentFieldId> {
        match self {
            Self::BasicSettings => vec![
                AgentFieldId::Name,
                AgentFieldId::Description,
                AgentFieldId::CallType,
                AgentFieldId::Language,
                AgentFieldId::Voice,
                AgentFieldId::Prompt,
                AgentFieldId::Model,
                AgentFieldId::Latency,
                AgentFieldId::Speed,
            ],
            Self::CallScript => vec![AgentFieldId::CallScript],
            Self::ServiceDescription => vec![AgentFieldId::ServiceDescription],
            Self::ReferenceData => std::iter::once(AgentFieldId::FilePath)
                .chain((0..upload_count).map(AgentFieldId::UploadedFile))
                .collect(),
            Self::Tools => vec![
                AgentFieldId::AllowHangUp,
                AgentFieldId::AllowCallback,
                AgentFieldId::LiveTransfer,
            ],
        }
    }
}

/// Every focusable element of the agent form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentFieldId {
    Section(AgentSection),
    Name,
    Description,
    CallType,
    Language,
    Voice,
    Prompt,
    Model,
    Latency,
    Speed,
    CallScript,
    ServiceDescription,
    /// Path input for picking a file to upload
    FilePath,
    /// Entry in the upload list, by position
    UploadedFile(usize),
    AllowHangUp,
    AllowCallback,
    LiveTransfer,
    /// Test call panel input, by position in [`TestCallForm`]
    TestCall(usize),
    StartTestCall,
    Save,
}

impl AgentFieldId {
    /// Fields that accept typed characters
    pub fn is_text_input(self) -> bool {
        matches!(
            self,
            Self::Name
                | Self::Description
                | Self::CallScript
                | Self::ServiceDescription
                | Self::FilePath
                | Self::TestCall(0 | 1 | 3)
        )
    }

    /// Fields where Enter inserts a newline
    pub fn is_multiline(self) -> bool {
        matches!(self, Self::CallScript | Self::ServiceDescription)
    }
}

/// Focus, open sections and local inputs of one agent form
#[derive(Debug, Clone)]
pub struct AgentEditor {
    open: [bool; 5],
    focus: usize,
    /// Path typed into the Reference Data drop zone
    pub file_path: FormField,
    pub test_call: TestCallForm,
}

impl Default for AgentEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentEditor {
    pub fn new() -> Self {
        let mut open = [false; 5];
        open[AgentSection::BasicSettings.index()] = true;
        Self {
            open,
            focus: 0,
            file_path: FormField::text("file_path", "File path", false),
            test_call: TestCallForm::new(),
        }
    }

    pub fn is_open(&self, section: AgentSection) -> bool {
        self.open[section.index()]
    }

    pub fn toggle_section(&mut self, section: AgentSection) {
        let idx = section.index();
        self.open[idx] = !self.open[idx];
    }

    /// Focus order for the current open sections and upload count
    pub fn fields(&self, upload_count: usize) -> Vec<AgentFieldId> {
        let mut fields = Vec::new();
        for section in AgentSection::ALL {
            fields.push(AgentFieldId::Section(section));
            if self.is_open(section) {
                fields.extend(section.fields(upload_count));
            }
        }
        fields.extend((0..self.test_call.field_count()).map(AgentFieldId::TestCall));
        fields.push(AgentFieldId::StartTestCall);
        fields.push(AgentFieldId::Save);
        fields
    }

    /// The focused element. Focus is clamped when the list shrank.
    pub fn focused(&self, upload_count: usize) -> AgentFieldId {
        let fields = self.fields(upload_count);
        let idx = self.focus.min(fields.len() - 1);
        fields[idx]
    }

    pub fn focus_next(&mut self, upload_count: usize) {
        let count = self.fields(upload_count).len();
        self.focus = (self.focus.min(count - 1) + 1) % count;
        self.sync_test_call_focus(upload_count);
    }

    pub fn focus_prev(&mut self, upload_count: usize) {
        let count = self.fields(upload_count).len();
        let current = self.focus.min(count - 1);
        self.focus = if current == 0 { count - 1 } else { current - 1 };
        self.sync_test_call_focus(upload_count);
    }

    /// Move focus to a specific element if it is visible
    pub fn focus_field(&mut self, id: AgentFieldId, upload_count: usize) -> bool {
        match self.fields(upload_count).iter().position(|f| *f == id) {
            Some(idx) => {
                self.focus = idx;
                self.sync_test_call_focus(upload_count);
                true
            }
            None => false,
        }
    }

    fn sync_test_call_focus(&mut self, upload_count: usize) {
        if let AgentFieldId::TestCall(i) = self.focused(upload_count) {
            self.test_call.set_active_field(i);
        }
    }
}

/// Push `c` onto `s` unless it already holds `max` characters
pub fn push_char_limited(s: &mut String, c: char, max: usize) {
    if s.chars().count() < max {
        s.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_settings_open_by_default() {
        let editor = AgentEditor::new();
        assert!(editor.is_open(AgentSection::BasicSettings));
        assert!(!editor.is_open(AgentSection::CallScript));
        assert!(!editor.is_open(AgentSection::Tools));
    }

    #[test]
    fn test_fields_include_open_section_contents() {
        let editor = AgentEditor::new();
        let fields = editor.fields(0);
        assert_eq!(fields[0], AgentFieldId::Section(AgentSection::BasicSettings));
        assert_eq!(fields[1], AgentFieldId::Name);
        assert!(fields.contains(&AgentFieldId::Speed));
        assert!(!fields.contains(&AgentFieldId::CallScript));
        assert_eq!(*fields.last().unwrap(), AgentFieldId::Save);
    }

    #[test]
    fn test_toggle_section_shows_fields() {
        let mut editor = AgentEditor::new();
        editor.toggle_section(AgentSection::ReferenceData);
        let fields = editor.fields(2);
        assert!(fields.contains(&AgentFieldId::FilePath));
        assert!(fields.contains(&AgentFieldId::UploadedFile(0)));
        assert!(fields.contains(&AgentFieldId::UploadedFile(1)));

        editor.toggle_section(AgentSection::ReferenceData);
        assert!(!editor.fields(2).contains(&AgentFieldId::FilePath));
    }

    #[test]
    fn test_focus_cycles() {
        let mut editor = AgentEditor::new();
        let count = editor.fields(0).len();
        for _ in 0..count {
            editor.focus_next(0);
        }
        assert_eq!(
            editor.focused(0),
            AgentFieldId::Section(AgentSection::BasicSettings)
        );

        editor.focus_prev(0);
        assert_eq!(editor.focused(0), AgentFieldId::Save);
    }

    #[test]
    fn test_focus_field_syncs_test_call_panel() {
        let mut editor = AgentEditor::new();
        assert!(editor.focus_field(AgentFieldId::TestCall(3), 0));
        assert_eq!(editor.test_call.active_field_index, 3);
        assert!(!editor.focus_field(AgentFieldId::AllowHangUp, 0));
    }

    #[test]
    fn test_focus_clamped_after_uploads_removed() {
        let mut editor = AgentEditor::new();
        editor.toggle_section(AgentSection::BasicSettings);
        editor.toggle_section(AgentSection::ReferenceData);
        assert!(editor.focus_field(AgentFieldId::Save, 3));
        // Two upload rows disappear; focus falls back to the last element
        assert_eq!(editor.focused(1), AgentFieldId::Save);
    }

    #[test]
    fn test_text_input_fields() {
        assert!(AgentFieldId::Name.is_text_input());
        assert!(AgentFieldId::TestCall(3).is_text_input());
        assert!(!AgentFieldId::TestCall(2).is_text_input());
        assert!(!AgentFieldId::Language.is_text_input());
        assert!(AgentFieldId::CallScript.is_multiline());
    }

    #[test]
    fn test_push_char_limited() {
        let mut s = "ab".to_string();
        push_char_limited(&mut s, 'c', 3);
        push_char_limited(&mut s, 'd', 3);
        assert_eq!(s, "abc");
    }
}
