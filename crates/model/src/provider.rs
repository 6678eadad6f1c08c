//! Client factory.
//!
//! `Backend` is the enum dispatch over the concrete clients; the factory
//! picks a variant from the provider tag. Callers route a model name to its
//! provider with [`crate::resolve_provider`] first.

use crate::{
    Claude, Client, ClientConfig, Context, Gemini, OpenAI, Options, Provider, Result,
};

/// Any provider client.
#[derive(Debug)]
pub enum Backend {
    /// Anthropic Messages API.
    Anthropic(Claude),
    /// OpenAI-compatible API (covers OpenAI, DeepSeek and Llama hosts).
    OpenAI(OpenAI),
    /// Gemini generateContent API.
    Gemini(Gemini),
}

/// Construct a client for `provider` from explicit configuration.
///
/// No network activity happens here; the transport is created on the first
/// query.
pub fn build_client(provider: Provider, config: &ClientConfig) -> Result<Backend> {
    let backend = match provider {
        Provider::Anthropic => Backend::Anthropic(Claude::anthropic(config)?),
        Provider::OpenAI => Backend::OpenAI(OpenAI::api(config)?),
        Provider::DeepSeek => Backend::OpenAI(OpenAI::deepseek(config)?),
        Provider::Llama => Backend::OpenAI(OpenAI::llama(config)?),
        Provider::Gemini => Backend::Gemini(Gemini::api(config)?),
    };
    tracing::debug!("built {provider} client");
    Ok(backend)
}

/// Construct a client for `provider`, reading credentials from the
/// environment.
pub fn new_client(provider: Provider) -> Result<Backend> {
    build_client(provider, &ClientConfig::from_env(provider)?)
}

impl Backend {
    /// Whether the HTTP transport has been created yet.
    pub fn is_connected(&self) -> bool {
        match self {
            Self::Anthropic(c) => c.is_connected(),
            Self::OpenAI(c) => c.is_connected(),
            Self::Gemini(c) => c.is_connected(),
        }
    }
}

impl Client for Backend {
    fn provider(&self) -> Provider {
        match self {
            Self::Anthropic(c) => c.provider(),
            Self::OpenAI(c) => c.provider(),
            Self::Gemini(c) => c.provider(),
        }
    }

    async fn query_text(
        &self,
        ctx: &Context,
        prompt: &str,
        model: &str,
        options: Options,
    ) -> Result<String> {
        match self {
            Self::Anthropic(c) => c.query_text(ctx, prompt, model, options).await,
            Self::OpenAI(c) => c.query_text(ctx, prompt, model, options).await,
            Self::Gemini(c) => c.query_text(ctx, prompt, model, options).await,
        }
    }

    fn close(&mut self) {
        match self {
            Self::Anthropic(c) => c.close(),
            Self::OpenAI(c) => c.close(),
            Self::Gemini(c) => c.close(),
        }
    }
}
