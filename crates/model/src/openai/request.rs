//! Chat completions request and response bodies (OpenAI-compatible).
//!
//! Shared by OpenAI, DeepSeek and Llama hosts. Optional fields use
//! `skip_serializing_if` so the token-limit field each host expects is the
//! only one present.

use crate::ResponseFormat;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message role.
    pub role: String,
    /// Message text.
    pub content: String,
}

impl Message {
    /// A user-role message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

/// Chat completions request body.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// The model identifier.
    pub model: String,
    /// The messages to send.
    pub messages: Vec<Message>,
    /// Token ceiling, OpenAI naming.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<usize>,
    /// Token ceiling, naming used by other compatible hosts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<usize>,
    /// Sampling temperature on the native 0..=2 scale.
    pub temperature: f32,
    /// Response format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<Value>,
}

/// How a host names the token-limit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenField {
    /// `max_completion_tokens`.
    MaxCompletionTokens,
    /// `max_tokens`.
    MaxTokens,
}

impl Request {
    /// A single-user-message request.
    pub fn new(model: &str, prompt: &str, temperature: f32) -> Self {
        Self {
            model: model.to_owned(),
            messages: vec![Message::user(prompt)],
            max_completion_tokens: None,
            max_tokens: None,
            temperature,
            response_format: None,
        }
    }

    /// Set the token ceiling under the host's field name.
    pub fn with_max_tokens(self, field: TokenField, max_tokens: usize) -> Self {
        match field {
            TokenField::MaxCompletionTokens => Self {
                max_completion_tokens: Some(max_tokens),
                ..self
            },
            TokenField::MaxTokens => Self {
                max_tokens: Some(max_tokens),
                ..self
            },
        }
    }

    /// Request a response format. Plain text is the default and is omitted.
    pub fn with_response_format(self, format: ResponseFormat) -> Self {
        Self {
            response_format: match format {
                ResponseFormat::Text => None,
                ResponseFormat::Json => Some(json!({ "type": "json_object" })),
            },
            ..self
        }
    }
}

/// Chat completions response body. Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct Response {
    /// Returned choices.
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// A single returned choice.
#[derive(Debug, Default, Deserialize)]
pub struct Choice {
    /// The assistant message.
    #[serde(default)]
    pub message: ChoiceMessage,
}

/// The message of a choice.
#[derive(Debug, Default, Deserialize)]
pub struct ChoiceMessage {
    /// Text content; absent or null for refusals and tool calls.
    #[serde(default)]
    pub content: Option<String>,
}

impl Response {
    /// Concatenate the text of all choices in order, or `None` if there are
    /// no choices.
    pub fn text(self) -> Option<String> {
        if self.choices.is_empty() {
            return None;
        }
        Some(
            self.choices
                .into_iter()
                .filter_map(|c| c.message.content)
                .collect(),
        )
    }
}
