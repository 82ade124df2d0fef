use crate::prompt::system_message;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,

    /// Keys other than `role` and `content`, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        ChatMessage {
            role: role.into(),
            content: content.into(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PromptRequest {
    pub messages: Vec<ChatMessage>,
}

impl PromptRequest {
    /// Consumes the request and returns its messages with the system prompt at index 0.
    pub fn with_system_prompt(self) -> Vec<ChatMessage> {
        let mut messages = self.messages;
        messages.insert(0, system_message());
        messages
    }
}

#[derive(Debug, Serialize)]
pub struct UpstreamRequest {
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
}

impl UpstreamRequest {
    pub fn streaming(messages: Vec<ChatMessage>) -> Self {
        UpstreamRequest {
            messages,
            stream: true,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Greeting {
    pub message: &'static str,
}

pub const GREETING: Greeting = Greeting {
    message: "Hello, welcome to the PromptGen Github Copilot extension!",
};
