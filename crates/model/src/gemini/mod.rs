//! Gemini provider.
//!
//! Talks to the Generative Language REST API. The model is part of the URL,
//! so the endpoint is built per request from the configured base.

use crate::{
    ClientConfig, Provider, Result,
    http::{HttpProvider, Transport},
};
pub use request::{Request, Response};

mod provider;
mod request;

/// Default Generative Language API base URL.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Native temperature ceiling for Gemini models.
pub const TEMPERATURE_MAX: f32 = 2.0;

/// The Gemini client.
#[derive(Debug)]
pub struct Gemini {
    http: HttpProvider,
    base: String,
    transport: Transport,
}

impl Gemini {
    /// Client for the Gemini API, honouring a base URL override.
    pub fn api(config: &ClientConfig) -> Result<Self> {
        Self::custom(&config.api_key, config.base_or(GEMINI_BASE_URL))
    }

    /// Client for a custom Gemini-compatible base URL.
    pub fn custom(key: &str, base: &str) -> Result<Self> {
        let base = base.trim_end_matches('/');
        Ok(Self {
            http: HttpProvider::custom_header(Provider::Gemini, "x-goog-api-key", key, base)?,
            base: base.to_owned(),
            transport: Transport::default(),
        })
    }

    /// The generateContent endpoint for `model`.
    pub fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{model}:generateContent", self.base)
    }

    /// Whether the HTTP transport has been created yet.
    pub fn is_connected(&self) -> bool {
        self.transport.is_initialized()
    }
}
