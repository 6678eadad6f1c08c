//! Claude (Anthropic) provider.
//!
//! Implements the Anthropic Messages API, which differs from the OpenAI
//! chat completions format in auth headers, the required `max_tokens` field
//! and the content-block response shape.

use crate::{
    ClientConfig, Provider, Result,
    http::{HttpProvider, Transport},
};
use reqwest::header::{HeaderName, HeaderValue};
pub use request::{Request, Response};

mod provider;
mod request;

/// Default Anthropic API base URL.
pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

/// The Anthropic API version header value.
const API_VERSION: &str = "2023-06-01";

/// Native temperature ceiling for the Messages API.
pub const TEMPERATURE_MAX: f32 = 1.0;

/// The Claude client.
#[derive(Debug)]
pub struct Claude {
    http: HttpProvider,
    transport: Transport,
}

impl Claude {
    /// Client for the Anthropic API, honouring a base URL override.
    pub fn anthropic(config: &ClientConfig) -> Result<Self> {
        let endpoint = format!("{}/v1/messages", config.base_or(ANTHROPIC_BASE_URL));
        Self::custom(&config.api_key, &endpoint)
    }

    /// Client for a custom Anthropic-compatible endpoint.
    pub fn custom(key: &str, endpoint: &str) -> Result<Self> {
        let http = HttpProvider::custom_header(Provider::Anthropic, "x-api-key", key, endpoint)?
            .header(
                HeaderName::from_static("anthropic-version"),
                HeaderValue::from_static(API_VERSION),
            );
        Ok(Self {
            http,
            transport: Transport::default(),
        })
    }

    /// The Messages API endpoint.
    pub fn endpoint(&self) -> &str {
        self.http.endpoint()
    }

    /// Whether the HTTP transport has been created yet.
    pub fn is_connected(&self) -> bool {
        self.transport.is_initialized()
    }
}
