//! Request and response bodies for `models/{model}:generateContent`.

use crate::ResponseFormat;
use serde::{Deserialize, Serialize};

/// The generateContent request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Conversation turns; always a single user turn here.
    pub contents: Vec<Content>,
    /// Sampling and output settings.
    pub generation_config: GenerationConfig,
}

/// One conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// `user` or `model`.
    #[serde(default)]
    pub role: String,
    /// Content parts.
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A content part. Only text parts are produced or read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    /// Part text.
    #[serde(default)]
    pub text: Option<String>,
}

/// Generation settings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Temperature on the native 0..=2 scale.
    pub temperature: f32,
    /// Response token ceiling.
    pub max_output_tokens: usize,
    /// `text/plain` or `application/json`.
    pub response_mime_type: &'static str,
}

impl Request {
    /// A single-user-turn request.
    pub fn new(
        prompt: &str,
        temperature: f32,
        max_output_tokens: usize,
        format: ResponseFormat,
    ) -> Self {
        let response_mime_type = match format {
            ResponseFormat::Text => "text/plain",
            ResponseFormat::Json => "application/json",
        };
        Self {
            contents: vec![Content {
                role: "user".into(),
                parts: vec![Part {
                    text: Some(prompt.to_owned()),
                }],
            }],
            generation_config: GenerationConfig {
                temperature,
                max_output_tokens,
                response_mime_type,
            },
        }
    }
}

/// The generateContent response. Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct Response {
    /// Generated candidates.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// A generated candidate.
#[derive(Debug, Deserialize)]
pub struct Candidate {
    /// Candidate content; absent when the candidate was blocked.
    #[serde(default)]
    pub content: Option<Content>,
}

impl Response {
    /// Concatenate the text parts of every candidate in order, or `None`
    /// when there are no candidates.
    pub fn text(self) -> Option<String> {
        if self.candidates.is_empty() {
            return None;
        }
        Some(
            self.candidates
                .into_iter()
                .filter_map(|c| c.content)
                .flat_map(|c| c.parts)
                .filter_map(|p| p.text)
                .collect(),
        )
    }
}
