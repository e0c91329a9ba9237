//! HTTP client for the Gemini `generateContent` endpoint.
//!
//! Wraps a single request/response call using [`reqwest`]; no streaming and
//! no retry. Structured calls ask for `application/json` with a response
//! schema and decode the returned text as JSON.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::time::Duration;

use crate::ai::TextGenerator;
use crate::errors::AiError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Client for one model on one Gemini-compatible endpoint.
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a client with a request timeout.
    ///
    /// * `base_url` - scheme and host, e.g. `https://generativelanguage.googleapis.com`.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, api_key, model, base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Request body for a prompt, optionally constrained to a JSON schema.
    pub fn request_body(prompt: &str, schema: Option<&Value>) -> Value {
        let mut body = json!({
            "contents": [
                { "role": "user", "parts": [ { "text": prompt } ] }
            ]
        });
        if let Some(schema) = schema {
            body["generationConfig"] = json!({
                "responseMimeType": "application/json",
                "responseSchema": schema,
            });
        }
        body
    }

    async fn generate(&self, body: &Value) -> Result<String, AiError> {
        tracing::debug!(model = %self.model, "POST generateContent");
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(AiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = response.json().await?;
        extract_text(&payload)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, AiError> {
        self.generate(&Self::request_body(prompt, None)).await
    }

    async fn complete_structured(&self, prompt: &str, schema: &Value) -> Result<Value, AiError> {
        let text = self.generate(&Self::request_body(prompt, Some(schema))).await?;
        parse_json_payload(&text)
    }
}

/// Concatenate the text parts of the first candidate.
pub fn extract_text(payload: &Value) -> Result<String, AiError> {
    let text: String = payload
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AiError::EmptyResponse);
    }
    Ok(text)
}

/// Decode JSON text, tolerating a surrounding Markdown code fence.
pub fn parse_json_payload(text: &str) -> Result<Value, AiError> {
    let trimmed = text.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);

    serde_json::from_str(unfenced.trim()).map_err(AiError::InvalidJson)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, routing::post};

    // =========================================
    // response decoding
    // =========================================

    #[test]
    fn test_extract_text_joins_parts() {
        let payload = json!({
            "candidates": [
                { "content": { "role": "model", "parts": [ {"text": "Olá, "}, {"text": "mundo"} ] } }
            ]
        });
        assert_eq!(extract_text(&payload).unwrap(), "Olá, mundo");
    }

    #[test]
    fn test_extract_text_empty_candidates() {
        let payload = json!({ "candidates": [] });
        assert!(matches!(extract_text(&payload), Err(AiError::EmptyResponse)));
    }

    #[test]
    fn test_parse_json_payload_plain() {
        let value = parse_json_payload(r#" [{"title": "x"}] "#).unwrap();
        assert_eq!(value[0]["title"], "x");
    }

    #[test]
    fn test_parse_json_payload_fenced() {
        let value = parse_json_payload("```json\n[1, 2]\n```").unwrap();
        assert_eq!(value, json!([1, 2]));
    }

    #[test]
    fn test_parse_json_payload_invalid() {
        assert!(matches!(
            parse_json_payload("não é json"),
            Err(AiError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_request_body_with_schema() {
        let schema = json!({"type": "ARRAY"});
        let body = GeminiClient::request_body("p", Some(&schema));
        assert_eq!(body["contents"][0]["parts"][0]["text"], "p");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"], schema);
    }

    #[test]
    fn test_request_body_without_schema() {
        let body = GeminiClient::request_body("p", None);
        assert!(body.get("generationConfig").is_none());
    }

    // =========================================
    // round trip against a local server
    // =========================================

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_complete_against_local_server() {
        let router = Router::new().route(
            "/v1beta/models/{model}",
            post(|Json(body): Json<Value>| async move {
                let prompt = body["contents"][0]["parts"][0]["text"]
                    .as_str()
                    .unwrap_or_default()
                    .to_uppercase();
                Json(json!({ "candidates": [ { "content": { "parts": [ { "text": prompt } ] } } ] }))
            }),
        );
        let base = serve(router).await;
        let client = GeminiClient::new("key", "test-model", base, Duration::from_secs(5)).unwrap();
        assert_eq!(client.model(), "test-model");

        assert_eq!(client.complete("eco").await.unwrap(), "ECO");
    }

    #[tokio::test]
    async fn test_complete_structured_against_local_server() {
        let router = Router::new().route(
            "/v1beta/models/{model}",
            post(|| async {
                Json(json!({
                    "candidates": [ { "content": { "parts": [ { "text": "[{\"title\":\"Aula\"}]" } ] } } ]
                }))
            }),
        );
        let base = serve(router).await;
        let client = GeminiClient::new("key", "test-model", base, Duration::from_secs(5)).unwrap();

        let value = client
            .complete_structured("p", &json!({"type": "ARRAY"}))
            .await
            .unwrap();
        assert_eq!(value[0]["title"], "Aula");
    }

    #[tokio::test]
    async fn test_error_status_surfaces_body() {
        let router = Router::new().route(
            "/v1beta/models/{model}",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "quota exceeded") }),
        );
        let base = serve(router).await;
        let client = GeminiClient::new("key", "test-model", base, Duration::from_secs(5)).unwrap();

        match client.complete("p").await {
            Err(AiError::Api { status, body }) => {
                assert_eq!(status, 429);
                assert_eq!(body, "quota exceeded");
            }
            other => panic!("Expected Api error, got {:?}", other.map(|_| ())),
        }
    }
}
