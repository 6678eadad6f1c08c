//! OpenAI-compatible chat completions client.
//!
//! One implementation serves OpenAI, DeepSeek and Llama hosts (e.g.
//! Together); they differ only in endpoint layout and token-limit field.

use crate::{
    ClientConfig, Error, Provider, Result,
    http::{HttpProvider, Transport},
};
pub use request::{Request, Response, TokenField};

mod provider;
mod request;

/// Default OpenAI API base URL.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Native temperature ceiling for chat completions hosts.
pub const TEMPERATURE_MAX: f32 = 2.0;

/// OpenAI-compatible client.
#[derive(Debug)]
pub struct OpenAI {
    http: HttpProvider,
    token_field: TokenField,
    transport: Transport,
}

impl OpenAI {
    /// Client for the OpenAI API, honouring a base URL override.
    pub fn api(config: &ClientConfig) -> Result<Self> {
        let endpoint = format!("{}/v1/chat/completions", config.base_or(OPENAI_BASE_URL));
        Self::custom(
            Provider::OpenAI,
            &config.api_key,
            &endpoint,
            TokenField::MaxCompletionTokens,
        )
    }

    /// Client for a DeepSeek host. The base URL is required.
    pub fn deepseek(config: &ClientConfig) -> Result<Self> {
        let base = required_base(Provider::DeepSeek, config)?;
        let endpoint = format!("{base}/v1/chat/completions");
        Self::custom(
            Provider::DeepSeek,
            &config.api_key,
            &endpoint,
            TokenField::MaxTokens,
        )
    }

    /// Client for a Llama host. The base URL is required and already
    /// includes the API version segment (e.g. `https://api.together.xyz/v1`).
    pub fn llama(config: &ClientConfig) -> Result<Self> {
        let base = required_base(Provider::Llama, config)?;
        let endpoint = format!("{base}/chat/completions");
        Self::custom(
            Provider::Llama,
            &config.api_key,
            &endpoint,
            TokenField::MaxTokens,
        )
    }

    /// Client for an arbitrary chat completions endpoint.
    pub fn custom(
        provider: Provider,
        key: &str,
        endpoint: &str,
        token_field: TokenField,
    ) -> Result<Self> {
        Ok(Self {
            http: HttpProvider::bearer(provider, key, endpoint)?,
            token_field,
            transport: Transport::default(),
        })
    }

    /// The chat completions endpoint.
    pub fn endpoint(&self) -> &str {
        self.http.endpoint()
    }

    /// Whether the HTTP transport has been created yet.
    pub fn is_connected(&self) -> bool {
        self.transport.is_initialized()
    }
}

fn required_base(provider: Provider, config: &ClientConfig) -> Result<&str> {
    match config.base_url.as_deref() {
        Some(base) if !base.trim().is_empty() => Ok(base.trim_end_matches('/')),
        _ => Err(Error::MissingCredential {
            var: provider.base_url_var(),
        }),
    }
}
