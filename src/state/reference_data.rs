//! Reference data for the agent form's select fields

use crate::api::{ApiError, CallboardApi};
use serde::{Deserialize, Serialize};

const LOAD_FAILED_MESSAGE: &str = "Failed to load reference data";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: String,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub id: String,
    pub name: String,
    pub tag: String,
    /// Id of the language this voice speaks
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Languages, voices, prompts and models fetched once per form
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub languages: Vec<Language>,
    pub voices: Vec<Voice>,
    pub prompts: Vec<Prompt>,
    pub models: Vec<Model>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self {
            languages: Vec::new(),
            voices: Vec::new(),
            prompts: Vec::new(),
            models: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

impl ReferenceData {
    /// Fetch all four lists concurrently.
    ///
    /// Lists are only replaced when every request succeeds.
    pub async fn load(&mut self, api: &dyn CallboardApi) -> Result<(), ApiError> {
        self.loading = true;
        self.error = None;

        let result = tokio::try_join!(
            api.list_languages(),
            api.list_voices(),
            api.list_prompts(),
            api.list_models(),
        );
        self.loading = false;

        match result {
            Ok((languages, voices, prompts, models)) => {
                tracing::info!(
                    languages = languages.len(),
                    voices = voices.len(),
                    prompts = prompts.len(),
                    models = models.len(),
                    "Loaded reference data"
                );
                self.languages = languages;
                self.voices = voices;
                self.prompts = prompts;
                self.models = models;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load reference data");
                let message = if err.message().is_empty() {
                    LOAD_FAILED_MESSAGE.to_string()
                } else {
                    err.message().to_string()
                };
                self.error = Some(message);
                Err(err)
            }
        }
    }

    /// Voices for a language id; all voices when no language is chosen
    pub fn voices_for(&self, language: &str) -> Vec<&Voice> {
        self.voices
            .iter()
            .filter(|v| language.is_empty() || v.language == language)
            .collect()
    }

    pub fn language_name(&self, id: &str) -> Option<&str> {
        self.languages
            .iter()
            .find(|l| l.id == id)
            .map(|l| l.name.as_str())
    }

    pub fn voice_label(&self, id: &str) -> Option<String> {
        self.voices
            .iter()
            .find(|v| v.id == id)
            .map(|v| format!("{} [{}]", v.name, v.tag))
    }

    pub fn prompt_name(&self, id: &str) -> Option<&str> {
        self.prompts
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.as_str())
    }

    pub fn model_name(&self, id: &str) -> Option<&str> {
        self.models
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.name.as_str())
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures;
    use super::*;
    use crate::api::MockCallboardApi;

    fn mock_all_ok() -> MockCallboardApi {
        let mut api = MockCallboardApi::new();
        api.expect_list_languages()
            .times(1)
            .returning(|| Ok(fixtures::languages()));
        api.expect_list_voices()
            .times(1)
            .returning(|| Ok(fixtures::voices()));
        api.expect_list_prompts()
            .times(1)
            .returning(|| Ok(fixtures::prompts()));
        api.expect_list_models()
            .times(1)
            .returning(|| Ok(fixtures::models()));
        api
    }

    #[test]
    fn test_default_is_loading() {
        let data = ReferenceData::default();
        assert!(data.loading);
        assert!(data.error.is_none());
    }

    #[tokio::test]
    async fn test_load_fills_all_lists() {
        let api = mock_all_ok();
        let mut data = ReferenceData::default();

        data.load(&api).await.unwrap();

        assert!(!data.loading);
        assert_eq!(data.languages.len(), 2);
        assert_eq!(data.voices.len(), 3);
        assert_eq!(data.prompts.len(), 1);
        assert_eq!(data.models.len(), 1);
        assert!(data.error.is_none());
    }

    #[tokio::test]
    async fn test_load_failure_records_error_and_keeps_lists() {
        let mut api = MockCallboardApi::new();
        api.expect_list_languages()
            .returning(|| Ok(fixtures::languages()));
        api.expect_list_voices()
            .returning(|| Err(ApiError::from_status(503, "voices unavailable")));
        api.expect_list_prompts()
            .returning(|| Ok(fixtures::prompts()));
        api.expect_list_models().returning(|| Ok(fixtures::models()));

        let mut data = ReferenceData::default();
        let result = data.load(&api).await;

        assert!(result.is_err());
        assert!(!data.loading);
        assert_eq!(data.error.as_deref(), Some("voices unavailable"));
        assert!(data.languages.is_empty());
        assert!(data.voices.is_empty());
    }

    #[test]
    fn test_voices_for_filters_by_language() {
        let data = fixtures::loaded();

        let english: Vec<_> = data.voices_for("en").iter().map(|v| v.id.as_str()).collect();
        assert_eq!(english, vec!["v1", "v3"]);

        let arabic = data.voices_for("ar");
        assert_eq!(arabic.len(), 1);
        assert_eq!(arabic[0].name, "Omar");
    }

    #[test]
    fn test_voices_for_empty_language_returns_all() {
        let data = fixtures::loaded();
        assert_eq!(data.voices_for("").len(), 3);
    }

    #[test]
    fn test_name_lookups() {
        let data = fixtures::loaded();
        assert_eq!(data.language_name("ar"), Some("Arabic"));
        assert_eq!(data.voice_label("v1").as_deref(), Some("Aria [warm]"));
        assert_eq!(data.prompt_name("p1"), Some("Sales"));
        assert_eq!(data.model_name("missing"), None);
    }
}
