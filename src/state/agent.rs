//! Agent configuration as sent to the API

use serde::{Deserialize, Serialize};

/// Maximum characters in the call script and service description
pub const MAX_LONG_TEXT_CHARS: usize = 20_000;

pub const LATENCY_MIN: f64 = 0.3;
pub const LATENCY_MAX: f64 = 1.0;
pub const LATENCY_STEP: f64 = 0.1;
pub const DEFAULT_LATENCY: f64 = 0.5;

pub const SPEED_MIN: u32 = 90;
pub const SPEED_MAX: u32 = 130;
pub const DEFAULT_SPEED: u32 = 110;

/// Call type options as (value, label)
pub const CALL_TYPES: &[(&str, &str)] = &[
    ("inbound", "Inbound (Receive Calls)"),
    ("outbound", "Outbound (Make Calls)"),
];

/// Gender options for the test call contact as (value, label)
pub const GENDERS: &[(&str, &str)] = &[("male", "Male"), ("female", "Female")];

/// Call-handling permissions granted to the agent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentTools {
    pub allow_hang_up: bool,
    pub allow_callback: bool,
    pub live_transfer: bool,
}

/// Agent payload for `POST /agents` and `PUT /agents/:id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentPayload {
    pub name: String,
    pub description: String,
    pub call_type: String,
    pub language: String,
    pub voice: String,
    pub prompt: String,
    pub model: String,
    pub latency: f64,
    pub speed: u32,
    pub call_script: String,
    pub service_description: String,
    pub attachments: Vec<String>,
    pub tools: AgentTools,
}

impl Default for AgentPayload {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            call_type: String::new(),
            language: String::new(),
            voice: String::new(),
            prompt: String::new(),
            model: String::new(),
            latency: DEFAULT_LATENCY,
            speed: DEFAULT_SPEED,
            call_script: String::new(),
            service_description: String::new(),
            attachments: Vec::new(),
            tools: AgentTools::default(),
        }
    }
}

impl AgentPayload {
    /// Build a payload from optional prefill values, falling back to defaults
    pub fn from_initial(initial: &AgentFormInitialData) -> Self {
        let defaults = Self::default();
        Self {
            name: initial.agent_name.clone().unwrap_or_default(),
            description: initial.description.clone().unwrap_or_default(),
            call_type: initial.call_type.clone().unwrap_or_default(),
            language: initial.language.clone().unwrap_or_default(),
            voice: initial.voice.clone().unwrap_or_default(),
            prompt: initial.prompt.clone().unwrap_or_default(),
            model: initial.model.clone().unwrap_or_default(),
            latency: initial
                .latency
                .map(clamp_latency)
                .unwrap_or(defaults.latency),
            speed: initial.speed.map(clamp_speed).unwrap_or(defaults.speed),
            call_script: truncate_chars(
                initial.call_script.as_deref().unwrap_or_default(),
                MAX_LONG_TEXT_CHARS,
            ),
            service_description: truncate_chars(
                initial.service_description.as_deref().unwrap_or_default(),
                MAX_LONG_TEXT_CHARS,
            ),
            ..defaults
        }
    }

    /// Required basic settings, in display order
    pub fn required_fields(&self) -> [&str; 6] {
        [
            &self.name,
            &self.call_type,
            &self.language,
            &self.voice,
            &self.prompt,
            &self.model,
        ]
    }

    /// Number of required basic settings still empty
    pub fn basic_settings_missing(&self) -> usize {
        self.required_fields()
            .iter()
            .filter(|v| v.is_empty())
            .count()
    }
}

/// Optional prefill values for the agent form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentFormInitialData {
    pub agent_name: Option<String>,
    pub description: Option<String>,
    pub call_type: Option<String>,
    pub language: Option<String>,
    pub voice: Option<String>,
    pub prompt: Option<String>,
    pub model: Option<String>,
    pub latency: Option<f64>,
    pub speed: Option<u32>,
    pub call_script: Option<String>,
    pub service_description: Option<String>,
}

/// Whether the form creates a new agent or edits one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit,
}

impl FormMode {
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Create => "Create Agent",
            Self::Edit => "Edit Agent",
        }
    }

    pub fn save_label(&self) -> &'static str {
        match self {
            Self::Create => "Save Agent",
            Self::Edit => "Save Changes",
        }
    }
}

/// Clamp latency to its slider range, snapped to one decimal
pub fn clamp_latency(value: f64) -> f64 {
    let clamped = value.clamp(LATENCY_MIN, LATENCY_MAX);
    (clamped * 10.0).round() / 10.0
}

pub fn clamp_speed(value: u32) -> u32 {
    value.clamp(SPEED_MIN, SPEED_MAX)
}

/// Keep at most `max` characters of `s`
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_default_payload() {
        let payload = AgentPayload::default();
        assert_eq!(payload.latency, 0.5);
        assert_eq!(payload.speed, 110);
        assert!(payload.attachments.is_empty());
        assert_eq!(payload.tools, AgentTools::default());
    }

    #[test]
    fn test_payload_wire_format() {
        let payload = AgentPayload {
            name: "Sales Assistant".to_string(),
            call_type: "outbound".to_string(),
            attachments: vec!["att-1".to_string()],
            tools: AgentTools {
                allow_hang_up: true,
                allow_callback: false,
                live_transfer: true,
            },
            ..Default::default()
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Sales Assistant",
                "description": "",
                "callType": "outbound",
                "language": "",
                "voice": "",
                "prompt": "",
                "model": "",
                "latency": 0.5,
                "speed": 110,
                "callScript": "",
                "serviceDescription": "",
                "attachments": ["att-1"],
                "tools": {"allowHangUp": true, "allowCallback": false, "liveTransfer": true}
            })
        );
    }

    #[test]
    fn test_basic_settings_missing_counts_empty_required() {
        let mut payload = AgentPayload::default();
        assert_eq!(payload.basic_settings_missing(), 6);

        payload.name = "Agent".to_string();
        payload.call_type = "inbound".to_string();
        assert_eq!(payload.basic_settings_missing(), 4);

        payload.language = "en".to_string();
        payload.voice = "v1".to_string();
        payload.prompt = "p1".to_string();
        payload.model = "m1".to_string();
        assert_eq!(payload.basic_settings_missing(), 0);
    }

    #[test]
    fn test_whitespace_name_is_not_missing() {
        let payload = AgentPayload {
            name: " ".into(),
            call_type: "inbound".into(),
            language: "en".into(),
            voice: "v1".into(),
            prompt: "p1".into(),
            model: "m1".into(),
            ..Default::default()
        };
        assert_eq!(payload.basic_settings_missing(), 0);
    }

    #[test]
    fn test_description_is_not_required() {
        let payload = AgentPayload {
            name: "a".into(),
            call_type: "inbound".into(),
            language: "en".into(),
            voice: "v".into(),
            prompt: "p".into(),
            model: "m".into(),
            ..Default::default()
        };
        assert!(payload.description.is_empty());
        assert_eq!(payload.basic_settings_missing(), 0);
    }

    #[test]
    fn test_from_initial_applies_prefill_and_defaults() {
        let initial = AgentFormInitialData {
            agent_name: Some("Retention Agent".to_string()),
            speed: Some(150),
            latency: Some(0.27),
            ..Default::default()
        };
        let payload = AgentPayload::from_initial(&initial);
        assert_eq!(payload.name, "Retention Agent");
        assert_eq!(payload.speed, SPEED_MAX);
        assert_eq!(payload.latency, LATENCY_MIN);
        assert_eq!(payload.call_type, "");
    }

    #[test]
    fn test_clamp_latency_snaps_to_tenths() {
        assert_eq!(clamp_latency(0.64), 0.6);
        assert_eq!(clamp_latency(0.0), 0.3);
        assert_eq!(clamp_latency(2.0), 1.0);
    }

    #[test]
    fn test_truncate_chars_counts_chars_not_bytes() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    #[test]
    fn test_form_mode_labels() {
        assert_eq!(FormMode::Create.heading(), "Create Agent");
        assert_eq!(FormMode::Create.save_label(), "Save Agent");
        assert_eq!(FormMode::Edit.heading(), "Edit Agent");
        assert_eq!(FormMode::Edit.save_label(), "Save Changes");
    }
}
