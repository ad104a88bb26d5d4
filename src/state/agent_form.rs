//! Agent form state: payload, dirty tracking, save and test call

use super::agent::{
    clamp_latency, clamp_speed, AgentFormInitialData, AgentPayload, FormMode, LATENCY_STEP,
};
use super::reference_data::Voice;
use crate::api::{ApiError, CallboardApi, TestCallRequest};

/// Agent form state.
///
/// An agent has no id until the first successful save; after that every save
/// updates the same agent.
#[derive(Debug, Clone)]
pub struct AgentForm {
    mode: FormMode,
    data: AgentPayload,
    agent_id: Option<String>,
    saving: bool,
    dirty: bool,
}

impl AgentForm {
    pub fn new(mode: FormMode, initial: &AgentFormInitialData) -> Self {
        Self {
            mode,
            data: AgentPayload::from_initial(initial),
            agent_id: None,
            saving: false,
            dirty: false,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn data(&self) -> &AgentPayload {
        &self.data
    }

    pub fn agent_id(&self) -> Option<&str> {
        self.agent_id.as_deref()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Apply a change to the payload and mark the form dirty
    pub fn update_field(&mut self, update: impl FnOnce(&mut AgentPayload)) {
        update(&mut self.data);
        self.dirty = true;
    }

    /// Select a language, clearing the voice if it belongs to another language
    pub fn select_language(&mut self, language_id: &str, voices: &[Voice]) {
        let voice_still_valid = self.data.voice.is_empty()
            || voices
                .iter()
                .any(|v| v.id == self.data.voice && v.language == language_id);

        self.update_field(|data| {
            data.language = language_id.to_string();
            if !voice_still_valid {
                data.voice.clear();
            }
        });
    }

    /// Move the latency slider by `steps` (negative moves down)
    pub fn step_latency(&mut self, steps: i32) {
        let value = clamp_latency(self.data.latency + f64::from(steps) * LATENCY_STEP);
        self.update_field(|data| data.latency = value);
    }

    /// Move the speed slider by `steps` percent
    pub fn step_speed(&mut self, steps: i32) {
        let value = clamp_speed(self.data.speed.saturating_add_signed(steps));
        self.update_field(|data| data.speed = value);
    }

    /// Mirror the uploaded attachment ids into the payload.
    ///
    /// Only marks the form dirty when the list actually changed.
    pub fn sync_attachments(&mut self, attachment_ids: Vec<String>) -> bool {
        if self.data.attachments == attachment_ids {
            return false;
        }
        self.update_field(|data| data.attachments = attachment_ids);
        true
    }

    pub fn basic_settings_missing(&self) -> usize {
        self.data.basic_settings_missing()
    }

    /// Whether the save action is enabled
    pub fn can_save(&self, is_uploading: bool) -> bool {
        !self.saving && !is_uploading && self.basic_settings_missing() == 0
    }

    /// Create the agent, or update it once it has an id
    pub async fn save(&mut self, api: &dyn CallboardApi) -> Result<(), ApiError> {
        self.saving = true;
        let result = match &self.agent_id {
            Some(id) => api.update_agent(id, &self.data).await.map(|()| None),
            None => api.create_agent(&self.data).await.map(Some),
        };
        self.saving = false;

        match result {
            Ok(created) => {
                if let Some(id) = created {
                    tracing::info!(agent_id = %id, "Agent created");
                    self.agent_id = Some(id);
                } else {
                    tracing::info!(agent_id = ?self.agent_id, "Agent updated");
                }
                self.dirty = false;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to save agent");
                Err(err)
            }
        }
    }

    /// Place a test call, saving pending changes first
    pub async fn test_call(
        &mut self,
        api: &dyn CallboardApi,
        request: &TestCallRequest,
    ) -> Result<(), ApiError> {
        if self.dirty {
            self.save(api).await?;
        }

        let Some(id) = self.agent_id.as_deref() else {
            return Err(ApiError::request_failed("Agent not saved"));
        };

        api.start_test_call(id, request).await?;
        tracing::info!(agent_id = %id, "Test call started");
        Ok(())
    }
}
