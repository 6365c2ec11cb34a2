//! Reqwest-based LLM client for OpenAI-compatible Chat Completions.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    error::{TutorError, TutorResult},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }
}

/// One single-shot completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::new(Role::System, self.system.clone()),
            ChatMessage::new(Role::User, self.prompt.clone()),
        ]
    }
}

/// Anything that can turn a prompt into a single text completion.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> TutorResult<String>;
}

#[derive(Debug)]
pub struct LlmClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl LlmClient {
    pub fn from_config(cfg: &Config) -> TutorResult<Self> {
        let api_base_url = cfg.get("API_BASE_URL").unwrap_or_else(|| "default".into());
        let base_url = normalize_base_url(&api_base_url);
        // Not validated here: a missing key surfaces on the first request.
        let api_key = cfg.get("OPENAI_API_KEY").filter(|k| !k.trim().is_empty());

        let http = reqwest::Client::builder()
            .timeout(cfg.request_timeout())
            .build()?;

        Ok(Self { http, base_url, api_key })
    }

    pub fn with_timeout(base_url: &str, api_key: Option<String>, timeout: Duration) -> TutorResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url: normalize_base_url(base_url), api_key })
    }
}

fn normalize_base_url(api_base_url: &str) -> String {
    if api_base_url == "default" {
        return "https://api.openai.com/v1".to_string();
    }
    let trimmed = api_base_url.trim_end_matches('/');
    if !trimmed.ends_with("/v1") && !trimmed.contains("/v1/") {
        format!("{}/v1", trimmed)
    } else {
        trimmed.to_string()
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn complete(&self, request: &CompletionRequest) -> TutorResult<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            TutorError::Configuration(
                "OPENAI_API_KEY is not set. Set it in env, .env or ~/.config/code_tutor/.tutorrc".into(),
            )
        })?;

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let hv = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| TutorError::Configuration(format!("invalid API key: {}", e)))?;
        headers.insert(AUTHORIZATION, hv);

        let body = serde_json::json!({
            "model": request.model,
            "messages": request.messages(),
            "max_tokens": request.max_tokens,
        });

        tracing::debug!(url = %url, model = %request.model, "sending chat completion request");
        let resp = self.http.post(url).headers(headers).json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            tracing::warn!(%status, "chat completion request failed");
            return Err(TutorError::Service(format!("LLM error: {} {}", status, text.trim())));
        }

        let completion: Completion = resp.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| TutorError::Service("response contained no choices".into()))
    }
}

#[derive(Debug, Deserialize)]
struct Completion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::State, http::HeaderMap as AxumHeaders, routing::post, Json, Router};
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    #[derive(Clone, Default)]
    struct Recorded {
        bodies: Arc<Mutex<Vec<serde_json::Value>>>,
        auth: Arc<Mutex<Vec<String>>>,
    }

    async fn completions(
        State(rec): State<Recorded>,
        headers: AxumHeaders,
        Json(body): Json<serde_json::Value>,
    ) -> Json<serde_json::Value> {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        rec.auth.lock().unwrap().push(auth);
        rec.bodies.lock().unwrap().push(body);
        Json(serde_json::json!({
            "id": "chatcmpl-1",
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": "Looks good." } }]
        }))
    }

    async fn mock_server() -> (String, Recorded) {
        let rec = Recorded::default();
        let app = Router::new()
            .route("/v1/chat/completions", post(completions))
            .with_state(rec.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}", addr), rec)
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "gpt-4".into(),
            system: "You are a tutor.".into(),
            prompt: "Check this.".into(),
            max_tokens: 1000,
        }
    }

    #[test]
    fn base_url_normalization() {
        assert_eq!(normalize_base_url("default"), "https://api.openai.com/v1");
        assert_eq!(normalize_base_url("http://localhost:8080/"), "http://localhost:8080/v1");
        assert_eq!(normalize_base_url("http://proxy/v1/"), "http://proxy/v1");
    }

    #[tokio::test]
    async fn completes_against_chat_endpoint() {
        let (base, rec) = mock_server().await;
        let client = LlmClient::with_timeout(&base, Some("sk-test".into()), Duration::from_secs(5)).unwrap();

        let text = client.complete(&request()).await.unwrap();
        assert_eq!(text, "Looks good.");

        let bodies = rec.bodies.lock().unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0]["model"], "gpt-4");
        assert_eq!(bodies[0]["max_tokens"], 1000);
        assert_eq!(bodies[0]["messages"][0]["role"], "system");
        assert_eq!(bodies[0]["messages"][1]["content"], "Check this.");
        assert_eq!(rec.auth.lock().unwrap()[0], "Bearer sk-test");
    }

    #[tokio::test]
    async fn missing_key_fails_lazily() {
        let cfg = Config::with_values([("API_BASE_URL", "http://127.0.0.1:9")]);
        let client = LlmClient::from_config(&cfg).unwrap();
        match client.complete(&request()).await {
            Err(TutorError::Configuration(msg)) => assert!(msg.contains("OPENAI_API_KEY")),
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn http_errors_become_service_errors() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (axum::http::StatusCode::UNAUTHORIZED, "bad key") }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = LlmClient::with_timeout(&base, Some("sk-bad".into()), Duration::from_secs(5)).unwrap();
        match client.complete(&request()).await {
            Err(TutorError::Service(msg)) => {
                assert!(msg.contains("401"), "{}", msg);
                assert!(msg.contains("bad key"), "{}", msg);
            }
            other => panic!("expected service error, got {:?}", other),
        }
    }
}
