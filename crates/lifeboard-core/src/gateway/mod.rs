//! AI gateway: three narrow request/response operations over one
//! text-generation service.
//!
//! None of them return errors. A missing credential short-circuits to the
//! operation's fallback without touching the network; transport, service and
//! parse failures are logged and mapped to the same fallback.

pub mod gemini;
pub mod prompts;
pub mod request;

pub use gemini::GeminiClient;
pub use request::{RequestTicket, RequestTracker};

use std::future::Future;

use serde::Deserialize;

use crate::chat::{ChatRole, Turn};
use crate::error::GatewayError;
use crate::storage::AiConfig;
use crate::task::{TaskCategory, TaskDraft};
use prompts::*;

/// Structured output the service is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSchema {
    /// Array of `{title, category}` records.
    TaskList,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub model: String,
    pub system_instruction: Option<String>,
    pub turns: Vec<Turn>,
    pub schema: Option<ResponseSchema>,
}

/// Transport to a text-generation service.
pub trait TextGenerator {
    /// Returns the text payload of the first candidate.
    fn generate(
        &self,
        request: &GenerateRequest,
    ) -> impl Future<Output = Result<String, GatewayError>> + Send;
}

pub struct AiGateway<G: TextGenerator> {
    generator: Option<G>,
    chat_model: String,
    breakdown_model: String,
}

impl AiGateway<GeminiClient> {
    /// Gateway over Gemini; without a credential every call falls back.
    pub fn from_config(config: &AiConfig) -> Result<Self, GatewayError> {
        Ok(Self::new(GeminiClient::from_config(config)?, config))
    }
}

impl<G: TextGenerator> AiGateway<G> {
    pub fn new(generator: Option<G>, config: &AiConfig) -> Self {
        Self {
            generator,
            chat_model: config.chat_model.clone(),
            breakdown_model: config.breakdown_model.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    async fn call(&self, request: GenerateRequest) -> Result<String, GatewayError> {
        let generator = self
            .generator
            .as_ref()
            .ok_or(GatewayError::MissingCredential)?;
        let text = generator.generate(&request).await?;
        if text.trim().is_empty() {
            return Err(GatewayError::EmptyResponse);
        }
        Ok(text)
    }

    /// One coach turn. `history` is the conversation before `message`.
    pub async fn chat_turn(&self, history: &[Turn], message: &str) -> String {
        let mut turns = history.to_vec();
        turns.push(Turn {
            role: ChatRole::User,
            text: message.to_string(),
        });
        let request = GenerateRequest {
            model: self.chat_model.clone(),
            system_instruction: Some(SYSTEM_INSTRUCTION_COACH.to_string()),
            turns,
            schema: None,
        };
        match self.call(request).await {
            Ok(text) => text,
            Err(GatewayError::EmptyResponse) => CHAT_EMPTY_REPLY.to_string(),
            Err(e) => {
                log_failure("chat", &e);
                CHAT_FALLBACK.to_string()
            }
        }
    }

    /// Decompose a goal into sub-tasks. Empty on any failure.
    pub async fn breakdown_task(&self, description: &str) -> Vec<TaskDraft> {
        let request = GenerateRequest {
            model: self.breakdown_model.clone(),
            system_instruction: Some(SYSTEM_INSTRUCTION_TASK_BREAKDOWN.to_string()),
            turns: vec![Turn {
                role: ChatRole::User,
                text: description.to_string(),
            }],
            schema: Some(ResponseSchema::TaskList),
        };
        let parsed = match self.call(request).await {
            Ok(text) => parse_task_list(&text),
            Err(GatewayError::EmptyResponse) => Ok(Vec::new()),
            Err(e) => Err(e),
        };
        parsed.unwrap_or_else(|e| {
            log_failure("breakdown", &e);
            Vec::new()
        })
    }

    /// Motivational read of a habit summary.
    pub async fn analyze_habits(&self, summary: &str) -> String {
        let request = GenerateRequest {
            model: self.chat_model.clone(),
            system_instruction: Some(SYSTEM_INSTRUCTION_HABIT_ANALYSIS.to_string()),
            turns: vec![Turn {
                role: ChatRole::User,
                text: habit_analysis_prompt(summary),
            }],
            schema: None,
        };
        match self.call(request).await {
            Ok(text) => text,
            Err(GatewayError::EmptyResponse) => HABITS_EMPTY_REPLY.to_string(),
            Err(e) => {
                log_failure("habit analysis", &e);
                HABITS_FALLBACK.to_string()
            }
        }
    }
}

fn log_failure(operation: &str, error: &GatewayError) {
    match error {
        GatewayError::MissingCredential => {
            tracing::debug!(operation, "no API key configured, using fallback")
        }
        other => tracing::warn!(operation, error = %other, "AI request failed, using fallback"),
    }
}

#[derive(Deserialize)]
struct RawDraft {
    title: String,
    #[serde(default)]
    category: Option<String>,
}

/// Decode the structured breakdown. Unknown or missing categories fall back
/// to work; blank titles are dropped.
fn parse_task_list(text: &str) -> Result<Vec<TaskDraft>, GatewayError> {
    let raw: Vec<RawDraft> = serde_json::from_str(strip_code_fence(text))?;
    Ok(raw
        .into_iter()
        .filter(|d| !d.title.trim().is_empty())
        .map(|d| {
            let category = d
                .category
                .and_then(|c| c.parse::<TaskCategory>().ok())
                .unwrap_or_default();
            TaskDraft::new(d.title.trim(), category)
        })
        .collect())
}

/// Strip a surrounding ```json fence if the model added one anyway.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Scripted generator that records every request it receives.
    struct Scripted {
        reply: Result<String, ()>,
        seen: Mutex<Vec<GenerateRequest>>,
    }

    impl Scripted {
        fn ok(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl TextGenerator for Scripted {
        async fn generate(&self, request: &GenerateRequest) -> Result<String, GatewayError> {
            self.seen.lock().unwrap().push(request.clone());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(()) => Err(GatewayError::Status {
                    status: 503,
                    body: "unavailable".into(),
                }),
            }
        }
    }

    fn gateway(generator: Option<Scripted>) -> AiGateway<Scripted> {
        AiGateway::new(generator, &AiConfig::default())
    }

    #[tokio::test]
    async fn missing_credential_uses_fallbacks() {
        let gw = gateway(None);
        assert!(!gw.is_configured());
        assert_eq!(gw.chat_turn(&[], "hi").await, CHAT_FALLBACK);
        assert!(gw.breakdown_task("plan").await.is_empty());
        assert_eq!(gw.analyze_habits("Read: 1 day streak").await, HABITS_FALLBACK);
    }

    #[tokio::test]
    async fn chat_sends_history_then_message() {
        let gw = gateway(Some(Scripted::ok("Breathe first.")));
        let history = vec![Turn { role: ChatRole::Model, text: "Hello!".into() }];
        assert_eq!(gw.chat_turn(&history, "I'm swamped").await, "Breathe first.");

        let seen = gw.generator.as_ref().unwrap().seen.lock().unwrap();
        let request = &seen[0];
        assert_eq!(request.model, "gemini-3-flash-preview");
        assert_eq!(request.system_instruction.as_deref(), Some(SYSTEM_INSTRUCTION_COACH));
        assert_eq!(request.turns.len(), 2);
        assert_eq!(request.turns[1], Turn { role: ChatRole::User, text: "I'm swamped".into() });
        assert!(request.schema.is_none());
    }

    #[tokio::test]
    async fn empty_and_failed_chat_replies() {
        assert_eq!(gateway(Some(Scripted::ok("  "))).chat_turn(&[], "x").await, CHAT_EMPTY_REPLY);
        assert_eq!(gateway(Some(Scripted::failing())).chat_turn(&[], "x").await, CHAT_FALLBACK);
    }

    #[tokio::test]
    async fn breakdown_parses_structured_output() {
        let gw = gateway(Some(Scripted::ok(
            r#"[{"title":"Research competitors","category":"work"},{"title":"Book a run","category":"personal"},{"title":"Learn SQL","category":"hobby"}]"#,
        )));
        let drafts = gw.breakdown_task("Launch the product").await;
        assert_eq!(
            drafts,
            vec![
                TaskDraft::new("Research competitors", TaskCategory::Work),
                TaskDraft::new("Book a run", TaskCategory::Personal),
                TaskDraft::new("Learn SQL", TaskCategory::Work),
            ]
        );
        let seen = gw.generator.as_ref().unwrap().seen.lock().unwrap();
        assert_eq!(seen[0].model, "gemini-3-pro-preview");
        assert_eq!(seen[0].schema, Some(ResponseSchema::TaskList));
    }

    #[tokio::test]
    async fn malformed_breakdown_is_empty() {
        let gw = gateway(Some(Scripted::ok("Sure! Here are your tasks: 1. ...")));
        assert!(gw.breakdown_task("x").await.is_empty());
        let gw = gateway(Some(Scripted::ok(r#"{"title":"not an array"}"#)));
        assert!(gw.breakdown_task("x").await.is_empty());
        let gw = gateway(Some(Scripted::failing()));
        assert!(gw.breakdown_task("x").await.is_empty());
    }

    #[tokio::test]
    async fn habit_analysis_wraps_summary() {
        let gw = gateway(Some(Scripted::ok("Nice streaks!")));
        assert_eq!(gw.analyze_habits("Read: 3 day streak").await, "Nice streaks!");
        let seen = gw.generator.as_ref().unwrap().seen.lock().unwrap();
        assert_eq!(seen[0].turns[0].text, "Here is my habit data: Read: 3 day streak");

        assert_eq!(gateway(Some(Scripted::ok(""))).analyze_habits("x").await, HABITS_EMPTY_REPLY);
    }

    #[test]
    fn code_fences_are_stripped() {
        assert_eq!(strip_code_fence("```json\n[]\n```"), "[]");
        assert_eq!(strip_code_fence("```\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fence("  [2] "), "[2]");
    }
}
