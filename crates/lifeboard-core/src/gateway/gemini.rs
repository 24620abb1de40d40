//! Gemini `generateContent` transport.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{GenerateRequest, ResponseSchema, TextGenerator};
use crate::error::GatewayError;
use crate::storage::AiConfig;
use crate::task::TaskCategory;

pub struct GeminiClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build a client from configuration. `Ok(None)` when no credential is
    /// configured.
    pub fn from_config(config: &AiConfig) -> Result<Option<Self>, GatewayError> {
        match config.resolved_api_key() {
            Some(key) => Ok(Some(Self::new(
                &key,
                &config.base_url,
                Duration::from_secs(config.timeout_secs),
            )?)),
            None => Ok(None),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{model}:generateContent", self.base_url)
    }
}

impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, GatewayError> {
        let body = GenerateContentRequest::from(request);
        tracing::debug!(model = %request.model, turns = body.contents.len(), "generateContent");

        let resp = self
            .http
            .post(self.endpoint(&request.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = resp.json().await?;
        parsed.text().ok_or(GatewayError::EmptyResponse)
    }
}

// ── Wire format ──────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl Content {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

impl From<&GenerateRequest> for GenerateContentRequest {
    fn from(request: &GenerateRequest) -> Self {
        let contents = request
            .turns
            .iter()
            .map(|turn| Content::text(Some(turn.role.as_str()), &turn.text))
            .collect();
        let system_instruction = request
            .system_instruction
            .as_deref()
            .map(|text| Content::text(None, text));
        let generation_config = request.schema.map(|schema| GenerationConfig {
            response_mime_type: "application/json",
            response_schema: schema_json(schema),
        });
        Self {
            contents,
            system_instruction,
            generation_config,
        }
    }
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, if any is non-empty.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().map(|p| p.text.as_str()).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

fn schema_json(schema: ResponseSchema) -> serde_json::Value {
    match schema {
        ResponseSchema::TaskList => {
            let categories: Vec<&str> = TaskCategory::ALL.iter().map(|c| c.as_str()).collect();
            json!({
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "category": { "type": "STRING", "enum": categories }
                    },
                    "required": ["title", "category"]
                }
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ChatRole, Turn};

    #[test]
    fn request_body_carries_turns_instruction_and_schema() {
        let request = GenerateRequest {
            model: "m".into(),
            system_instruction: Some("be brief".into()),
            turns: vec![
                Turn { role: ChatRole::Model, text: "hello".into() },
                Turn { role: ChatRole::User, text: "plan my week".into() },
            ],
            schema: Some(ResponseSchema::TaskList),
        };
        let body = serde_json::to_value(GenerateContentRequest::from(&request)).unwrap();
        assert_eq!(body["contents"][0]["role"], "model");
        assert_eq!(body["contents"][1]["parts"][0]["text"], "plan my week");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "be brief");
        assert!(body["systemInstruction"].get("role").is_none());
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(
            body["generationConfig"]["responseSchema"]["items"]["properties"]["category"]["enum"],
            json!(["work", "personal", "growth"])
        );
    }

    #[test]
    fn plain_request_omits_optional_sections() {
        let request = GenerateRequest {
            model: "m".into(),
            system_instruction: None,
            turns: vec![Turn { role: ChatRole::User, text: "hi".into() }],
            schema: None,
        };
        let body = serde_json::to_value(GenerateContentRequest::from(&request)).unwrap();
        assert!(body.get("systemInstruction").is_none());
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn response_text_joins_parts_of_first_candidate() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "role": "model", "parts": [{ "text": "Take " }, { "text": "a walk." }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }))
        .unwrap();
        assert_eq!(resp.text().as_deref(), Some("Take a walk."));
    }

    #[test]
    fn response_without_text_is_none() {
        let resp: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [] })).unwrap();
        assert!(resp.text().is_none());
        let resp: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [{ "finishReason": "SAFETY" }] })).unwrap();
        assert!(resp.text().is_none());
    }
}
