//! Coach conversation log. Append-only.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub text: String,
    /// Milliseconds since epoch.
    pub timestamp: i64,
}

impl ChatMessage {
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// A role-tagged turn as sent to the text-generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: ChatRole,
    pub text: String,
}

impl From<&ChatMessage> for Turn {
    fn from(msg: &ChatMessage) -> Self {
        Turn {
            role: msg.role,
            text: msg.text.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    /// A log opened by the coach's greeting.
    pub fn with_welcome(welcome: &str) -> Self {
        let mut log = Self::default();
        log.push(ChatRole::Model, welcome);
        log
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn push(&mut self, role: ChatRole, text: impl Into<String>) -> &ChatMessage {
        self.messages.push(ChatMessage::new(role, text));
        &self.messages[self.messages.len() - 1]
    }

    /// Every message so far as request turns.
    pub fn turns(&self) -> Vec<Turn> {
        self.messages.iter().map(Turn::from).collect()
    }
}
