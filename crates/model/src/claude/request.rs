//! Request and response bodies for the Anthropic Messages API.

use serde::{Deserialize, Serialize};

/// The request body for the Anthropic Messages API.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// The model identifier.
    pub model: String,
    /// Maximum tokens to generate. Required by the API.
    pub max_tokens: usize,
    /// The messages array.
    pub messages: Vec<Message>,
    /// Temperature on the native 0..=1 scale.
    pub temperature: f32,
}

/// A message in the request.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    /// Message role.
    pub role: &'static str,
    /// Content blocks.
    pub content: Vec<TextBlock>,
}

/// A text content block in the request.
#[derive(Debug, Clone, Serialize)]
pub struct TextBlock {
    /// Always `"text"`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// The text.
    pub text: String,
}

impl Request {
    /// A single-user-message request.
    pub fn new(model: &str, prompt: &str, max_tokens: usize, temperature: f32) -> Self {
        Self {
            model: model.to_owned(),
            max_tokens,
            messages: vec![Message {
                role: "user",
                content: vec![TextBlock {
                    kind: "text",
                    text: prompt.to_owned(),
                }],
            }],
            temperature,
        }
    }
}

/// Raw Anthropic non-streaming response. Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct Response {
    /// Content blocks in provider order.
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

/// A response content block. Only `text` blocks carry text.
#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    /// Block type (`text`, `tool_use`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Text of a `text` block.
    #[serde(default)]
    pub text: Option<String>,
}

impl Response {
    /// Concatenate the text blocks in order, or `None` if there are no
    /// content blocks at all.
    pub fn text(self) -> Option<String> {
        if self.content.is_empty() {
            return None;
        }
        Some(
            self.content
                .into_iter()
                .filter(|b| b.kind == "text")
                .filter_map(|b| b.text)
                .collect(),
        )
    }
}
