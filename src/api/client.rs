//! HTTP client for the campaigns/agents REST API
//!
//! Every call goes through [`ApiClient::request`], which sends JSON bodies,
//! attaches `Content-Type: application/json` unless told otherwise, and turns
//! any non-2xx status into an [`ApiError`] carrying the response body text.

use super::error::ApiError;
use super::traits::CallboardApi;
use super::types::{AttachmentRegistration, CreatedId, TestCallRequest, UploadTarget};
use crate::state::{AgentPayload, Language, Model, Prompt, Voice};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::Method;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use std::time::Duration;

/// Default API base url
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";

/// Per-request options for [`ApiClient::request`]
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// JSON body, if any
    pub body: Option<serde_json::Value>,
    /// Attach `Content-Type: application/json`
    pub json: bool,
    /// Extra headers, applied after the JSON content type so they can override it
    pub headers: HeaderMap,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            body: None,
            json: true,
            headers: HeaderMap::new(),
        }
    }
}

impl RequestOptions {
    /// Options carrying a serialized JSON body
    pub fn with_body<B: Serialize + ?Sized>(body: &B) -> Result<Self, ApiError> {
        Ok(Self {
            body: Some(serde_json::to_value(body)?),
            ..Self::default()
        })
    }
}

/// Client for the dashboard's backend
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a new client rooted at `base_url`
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a request to `endpoint` (relative to the base url) and decode the body
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(%method, %url, "API request");

        let mut builder = self.http.request(method.clone(), &url);
        if options.json {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }
        builder = builder.headers(options.headers);
        if let Some(body) = options.body {
            builder = builder.body(serde_json::to_vec(&body)?);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(%method, %url, error = %e, "API request could not be sent");
            ApiError::from(e)
        })?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(%method, %url, status = status.as_u16(), "API request failed");
            return Err(ApiError::from_status(status.as_u16(), &text));
        }

        if text.trim().is_empty() {
            return Ok(serde_json::from_value(serde_json::Value::Null)?);
        }
        Ok(serde_json::from_str(&text)?)
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request(Method::GET, endpoint, RequestOptions::default())
            .await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(Method::POST, endpoint, RequestOptions::with_body(body)?)
            .await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(Method::PUT, endpoint, RequestOptions::with_body(body)?)
            .await
    }

    /// PUT raw bytes to an absolute (pre-signed) url
    pub async fn put_signed(&self, signed_url: &str, bytes: Vec<u8>) -> Result<(), ApiError> {
        let size = bytes.len();
        let response = self
            .http
            .put(signed_url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Signed upload rejected");
            return Err(ApiError::from_status(status.as_u16(), &text));
        }

        tracing::debug!(size, "Signed upload stored");
        Ok(())
    }
}

#[async_trait]
impl CallboardApi for ApiClient {
    async fn create_agent(&self, payload: &AgentPayload) -> Result<String, ApiError> {
        let created: CreatedId = self.post("/agents", payload).await?;
        Ok(created.id)
    }

    async fn update_agent(&self, agent_id: &str, payload: &AgentPayload) -> Result<(), ApiError> {
        let _: IgnoredAny = self.put(&format!("/agents/{agent_id}"), payload).await?;
        Ok(())
    }

    async fn start_test_call(
        &self,
        agent_id: &str,
        request: &TestCallRequest,
    ) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .post(&format!("/agents/{agent_id}/test-call"), request)
            .await?;
        Ok(())
    }

    async fn request_upload_url(&self) -> Result<UploadTarget, ApiError> {
        self.request(
            Method::POST,
            "/attachments/upload-url",
            RequestOptions::default(),
        )
        .await
    }

    async fn upload_to_signed_url(&self, signed_url: &str, bytes: Vec<u8>) -> Result<(), ApiError> {
        self.put_signed(signed_url, bytes).await
    }

    async fn register_attachment(
        &self,
        registration: &AttachmentRegistration,
    ) -> Result<String, ApiError> {
        let created: CreatedId = self.post("/attachments", registration).await?;
        Ok(created.id)
    }

    async fn list_languages(&self) -> Result<Vec<Language>, ApiError> {
        self.get("/languages").await
    }

    async fn list_voices(&self) -> Result<Vec<Voice>, ApiError> {
        self.get("/voices").await
    }

    async fn list_prompts(&self) -> Result<Vec<Prompt>, ApiError> {
        self.get("/prompts").await
    }

    async fn list_models(&self) -> Result<Vec<Model>, ApiError> {
        self.get("/models").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AgentTools;
    use serde_json::json;
    use wiremock::matchers::{body_bytes, body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&format!("{}/api", server.uri()), None).unwrap()
    }

    fn sample_payload() -> AgentPayload {
        AgentPayload {
            name: "Sales Assistant".to_string(),
            call_type: "outbound".to_string(),
            language: "en".to_string(),
            voice: "v1".to_string(),
            prompt: "p1".to_string(),
            model: "m1".to_string(),
            tools: AgentTools {
                allow_hang_up: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:3001/api/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3001/api");
    }

    #[tokio::test]
    async fn test_create_agent_posts_json_and_returns_id() {
        let server = MockServer::start().await;
        let payload = sample_payload();

        Mock::given(method("POST"))
            .and(path("/api/agents"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::to_value(&payload).unwrap()))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "agent-42"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let id = client.create_agent(&payload).await.unwrap();
        assert_eq!(id, "agent-42");
    }

    #[tokio::test]
    async fn test_update_agent_accepts_empty_body() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/agents/agent-42"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client
            .update_agent("agent-42", &sample_payload())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_agent_ignores_response_object() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/agents/agent-42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        tokio_test::assert_ok!(client.update_agent("agent-42", &sample_payload()).await);
    }

    #[tokio::test]
    async fn test_non_success_uses_body_text_as_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/agents"))
            .respond_with(ResponseTemplate::new(400).set_body_string("Voice is not available"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.create_agent(&sample_payload()).await.unwrap_err();
        assert_eq!(err.message(), "Voice is not available");
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn test_non_success_empty_body_uses_fallback() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/languages"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.list_languages().await.unwrap_err();
        assert_eq!(err.message(), "API request failed");
    }

    #[tokio::test]
    async fn test_list_voices_decodes_reference_objects() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/voices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "v1", "name": "Aria", "tag": "warm", "language": "en"},
                {"id": "v2", "name": "Omar", "tag": "calm", "language": "ar"}
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let voices = client.list_voices().await.unwrap();
        assert_eq!(voices.len(), 2);
        assert_eq!(voices[1].name, "Omar");
        assert_eq!(voices[1].language, "ar");
    }

    #[tokio::test]
    async fn test_start_test_call_posts_contact() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/agents/agent-42/test-call"))
            .and(body_json(json!({
                "firstName": "John",
                "lastName": "Doe",
                "gender": "male",
                "phoneNumber": "+15550100"
            })))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let request = TestCallRequest {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            gender: "male".to_string(),
            phone_number: "+15550100".to_string(),
        };
        client.start_test_call("agent-42", &request).await.unwrap();
    }

    #[tokio::test]
    async fn test_request_upload_url_and_register() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/attachments/upload-url"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "key": "uploads/abc",
                "signedUrl": format!("{}/bucket/abc", server.uri())
            })))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/attachments"))
            .and(body_json(json!({
                "key": "uploads/abc",
                "fileName": "faq.txt",
                "fileSize": 5,
                "mimeType": "text/plain"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "att-1"})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let target = client.request_upload_url().await.unwrap();
        assert_eq!(target.key, "uploads/abc");

        let id = client
            .register_attachment(&AttachmentRegistration {
                key: target.key,
                file_name: "faq.txt".to_string(),
                file_size: 5,
                mime_type: "text/plain".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(id, "att-1");
    }

    #[tokio::test]
    async fn test_put_signed_sends_octet_stream() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/bucket/abc"))
            .and(header("content-type", "application/octet-stream"))
            .and(body_bytes(b"hello".to_vec()))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client
            .put_signed(&format!("{}/bucket/abc", server.uri()), b"hello".to_vec())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_put_signed_rejects_non_success() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/bucket/abc"))
            .respond_with(ResponseTemplate::new(403).set_body_string("SignatureDoesNotMatch"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .put_signed(&format!("{}/bucket/abc", server.uri()), b"hello".to_vec())
            .await
            .unwrap_err();
        assert_eq!(err.message(), "SignatureDoesNotMatch");
    }

    #[tokio::test]
    async fn test_request_without_json_flag_omits_content_type() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let options = RequestOptions {
            json: false,
            ..Default::default()
        };
        let models: Vec<Model> = client
            .request(Method::GET, "/models", options)
            .await
            .unwrap();
        assert!(models.is_empty());

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        assert!(received[0].headers.get("content-type").is_none());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_request_failure() {
        let client = ApiClient::new("http://127.0.0.1:9/api", Some(Duration::from_secs(2))).unwrap();
        let err = client.list_prompts().await.unwrap_err();
        assert!(err.status().is_none());
        assert!(!err.message().is_empty());
    }
}
