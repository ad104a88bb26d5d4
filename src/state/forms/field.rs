//! Form field value objects

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// One of a fixed set of `(value, label)` options
    Choice {
        options: Vec<(String, String)>,
        selected: Option<usize>,
    },
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: FieldValue,
    pub is_multiline: bool,
    /// Maximum number of characters accepted, if limited
    pub max_chars: Option<usize>,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &str, label: &str, is_multiline: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Text(String::new()),
            is_multiline,
            max_chars: None,
        }
    }

    /// Create a new choice field from `(value, label)` pairs, nothing selected
    pub fn choice(name: &str, label: &str, options: &[(&str, &str)]) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Choice {
                options: options
                    .iter()
                    .map(|(v, l)| (v.to_string(), l.to_string()))
                    .collect(),
                selected: None,
            },
            is_multiline: false,
            max_chars: None,
        }
    }

    /// Limit the number of characters the field accepts
    pub fn with_max_chars(mut self, max: usize) -> Self {
        self.max_chars = Some(max);
        self
    }

    /// Get the text value (returns the selected option value for choice fields)
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            FieldValue::Choice { options, selected } => selected
                .and_then(|i| options.get(i))
                .map(|(v, _)| v.as_str())
                .unwrap_or(""),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_text().trim().is_empty()
    }

    #[cfg(test)]
    pub fn set_text(&mut self, value: String) {
        self.value = FieldValue::Text(value);
    }

    /// Push a character to the field value, respecting `max_chars`
    pub fn push_char(&mut self, c: char) {
        if let FieldValue::Text(s) = &mut self.value {
            if let Some(max) = self.max_chars {
                if s.chars().count() >= max {
                    return;
                }
            }
            s.push(c);
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        if let FieldValue::Text(s) = &mut self.value {
            s.pop();
        }
    }

    /// Select the next option (choice fields only), wrapping around
    pub fn select_next(&mut self) {
        if let FieldValue::Choice { options, selected } = &mut self.value {
            if options.is_empty() {
                return;
            }
            *selected = Some(match *selected {
                Some(i) => (i + 1) % options.len(),
                None => 0,
            });
        }
    }

    /// Select the previous option (choice fields only), wrapping around
    pub fn select_prev(&mut self) {
        if let FieldValue::Choice { options, selected } = &mut self.value {
            if options.is_empty() {
                return;
            }
            *selected = Some(match *selected {
                Some(0) | None => options.len() - 1,
                Some(i) => i - 1,
            });
        }
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) => s.clear(),
            FieldValue::Choice { selected, .. } => *selected = None,
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Choice { options, selected } => selected
                .and_then(|i| options.get(i))
                .map(|(_, label)| format!("◂ {label} ▸"))
                .unwrap_or_else(|| "◂ select ▸".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_push_and_pop() {
        let mut field = FormField::text("first_name", "First Name", false);
        field.push_char('J');
        field.push_char('o');
        assert_eq!(field.as_text(), "Jo");
        field.pop_char();
        assert_eq!(field.as_text(), "J");
    }

    #[test]
    fn test_max_chars_ignores_extra_input() {
        let mut field = FormField::text("name", "Name", false).with_max_chars(3);
        for c in "abcdef".chars() {
            field.push_char(c);
        }
        assert_eq!(field.as_text(), "abc");
    }

    #[test]
    fn test_choice_cycles() {
        let mut field = FormField::choice("gender", "Gender", &[("male", "Male"), ("female", "Female")]);
        assert_eq!(field.as_text(), "");
        assert!(field.is_empty());

        field.select_next();
        assert_eq!(field.as_text(), "male");
        field.select_next();
        assert_eq!(field.as_text(), "female");
        field.select_next();
        assert_eq!(field.as_text(), "male");

        field.select_prev();
        assert_eq!(field.as_text(), "female");
    }

    #[test]
    fn test_choice_prev_from_none_selects_last() {
        let mut field = FormField::choice("call_type", "Call Type", &[("inbound", "Inbound"), ("outbound", "Outbound")]);
        field.select_prev();
        assert_eq!(field.as_text(), "outbound");
    }

    #[test]
    fn test_choice_ignores_typing() {
        let mut field = FormField::choice("gender", "Gender", &[("male", "Male")]);
        field.push_char('x');
        assert_eq!(field.as_text(), "");
    }

    #[test]
    fn test_clear_resets_both_kinds() {
        let mut text = FormField::text("name", "Name", false);
        text.set_text("abc".to_string());
        text.clear();
        assert!(text.is_empty());

        let mut choice = FormField::choice("gender", "Gender", &[("male", "Male")]);
        choice.select_next();
        choice.clear();
        assert!(choice.is_empty());
    }

    #[test]
    fn test_display_value_for_choice() {
        let mut field = FormField::choice("gender", "Gender", &[("male", "Male")]);
        assert_eq!(field.display_value(), "◂ select ▸");
        field.select_next();
        assert_eq!(field.display_value(), "◂ Male ▸");
    }
}
