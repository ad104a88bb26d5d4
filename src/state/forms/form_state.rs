//! Small keyboard-driven forms: the create-campaign dialog and the test call panel

use super::field::FormField;
use crate::api::TestCallRequest;
use crate::state::agent::{CALL_TYPES, GENDERS};

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Buttons on the create-campaign dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogButton {
    Cancel,
    #[default]
    Confirm,
}

impl DialogButton {
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Cancel => Self::Confirm,
            Self::Confirm => Self::Cancel,
        };
    }
}

// Create Campaign dialog
#[derive(Debug, Clone)]
pub struct CampaignCreateForm {
    pub name: FormField,
    pub call_type: FormField,
    pub active_field_index: usize,
    /// Which button is selected when on the buttons row
    pub selected_button: DialogButton,
}

impl CampaignCreateForm {
    pub fn new() -> Self {
        Self {
            name: FormField::text("campaign_name", "Campaign Name", false).with_max_chars(80),
            call_type: FormField::choice("call_type", "Call Type", &[
                (CALL_TYPES[0].0, "Inbound"),
                (CALL_TYPES[1].0, "Outbound"),
            ]),
            active_field_index: 0,
            selected_button: DialogButton::Confirm,
        }
    }

    /// Returns true if the buttons row is currently active
    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index == 2
    }

    /// Name and call type, or `None` while the name is blank
    pub fn submission(&self) -> Option<(String, String)> {
        let name = self.name.as_text().trim();
        if name.is_empty() {
            return None;
        }
        Some((name.to_string(), self.call_type.as_text().to_string()))
    }
}

impl Default for CampaignCreateForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for CampaignCreateForm {
    fn field_count(&self) -> usize {
        3 // name, call type, buttons
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(2);
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self.active_field_index {
            0 => Some(&mut self.name),
            1 => Some(&mut self.call_type),
            _ => None,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.name),
            1 => Some(&self.call_type),
            _ => None,
        }
    }
}

// Test Call panel
#[derive(Debug, Clone)]
pub struct TestCallForm {
    pub first_name: FormField,
    pub last_name: FormField,
    pub gender: FormField,
    pub phone_number: FormField,
    pub active_field_index: usize,
}

impl TestCallForm {
    pub fn new() -> Self {
        Self {
            first_name: FormField::text("first_name", "First Name", false),
            last_name: FormField::text("last_name", "Last Name", false),
            gender: FormField::choice("gender", "Gender", GENDERS),
            phone_number: FormField::text("phone_number", "Phone Number *", false).with_max_chars(20),
            active_field_index: 0,
        }
    }

    /// A phone number is the only required input
    pub fn has_phone_number(&self) -> bool {
        !self.phone_number.is_empty()
    }

    /// Build the request body. Numbers typed without a leading `+` get the
    /// default calling code, when one is configured.
    pub fn to_request(&self, country_code: Option<&str>) -> TestCallRequest {
        let phone = self.phone_number.as_text().trim();
        let phone_number = match country_code {
            Some(code) if !phone.starts_with('+') => {
                format!("+{}{}", code.trim_start_matches('+'), phone.trim_start_matches('0'))
            }
            _ => phone.to_string(),
        };
        TestCallRequest {
            first_name: self.first_name.as_text().to_string(),
            last_name: self.last_name.as_text().to_string(),
            gender: self.gender.as_text().to_string(),
            phone_number,
        }
    }
}

impl Default for TestCallForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for TestCallForm {
    fn field_count(&self) -> usize {
        4
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(3);
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self.active_field_index {
            0 => Some(&mut self.first_name),
            1 => Some(&mut self.last_name),
            2 => Some(&mut self.gender),
            3 => Some(&mut self.phone_number),
            _ => None,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.first_name),
            1 => Some(&self.last_name),
            2 => Some(&self.gender),
            3 => Some(&self.phone_number),
            _ => None,
        }
    }
}
