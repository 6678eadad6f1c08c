//! Static model registry.
//!
//! The single source of truth for which provider serves a model and the
//! response-length ceiling applied when the caller does not override it.
//! Provider routing and token limits fail differently: an unknown model may
//! still be given a safe token ceiling, but is never routed to a guessed
//! provider.

use crate::{Error, Provider, Result};
use serde::Serialize;

/// Token ceiling for models missing from the registry.
pub const MAX_TOKENS_DEFAULT: usize = 8192;

/// A registered model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelEntry {
    /// Model identifier as sent to the provider.
    pub name: &'static str,
    /// Provider that serves the model.
    pub provider: Provider,
    /// Default response token ceiling.
    #[serde(skip)]
    pub max_tokens: usize,
}

const fn entry(name: &'static str, provider: Provider, max_tokens: usize) -> ModelEntry {
    ModelEntry {
        name,
        provider,
        max_tokens,
    }
}

/// Registered models, sorted by name.
static MODELS: &[ModelEntry] = &[
    entry("claude-3-5-haiku-latest", Provider::Anthropic, 8192),
    entry("claude-3-5-sonnet-latest", Provider::Anthropic, 8192),
    entry("claude-3-opus-latest", Provider::Anthropic, 4096),
    entry("deepseek-chat", Provider::DeepSeek, 8192),
    entry("deepseek-reasoner", Provider::DeepSeek, 8192),
    entry("gemini-1.5-flash", Provider::Gemini, 8192),
    entry("gemini-1.5-pro", Provider::Gemini, 8192),
    entry("gemini-2.0-flash-exp", Provider::Gemini, 8192),
    entry("gpt-4-turbo", Provider::OpenAI, 4096),
    entry("gpt-4o", Provider::OpenAI, 16384),
    entry("gpt-4o-mini", Provider::OpenAI, 16384),
    entry("meta-llama/Llama-3.3-70B-Instruct-Turbo", Provider::Llama, 4096),
    entry("meta-llama/Meta-Llama-3.1-8B-Instruct-Turbo", Provider::Llama, 4096),
    entry("o1-mini", Provider::OpenAI, 65536),
];

/// Find the registry entry for `model`.
pub fn lookup(model: &str) -> Option<&'static ModelEntry> {
    MODELS
        .binary_search_by(|e| e.name.cmp(model))
        .ok()
        .map(|i| &MODELS[i])
}

/// Resolve the provider serving `model`.
pub fn resolve_provider(model: &str) -> Result<Provider> {
    let provider = lookup(model)
        .map(|e| e.provider)
        .ok_or_else(|| Error::UnrecognizedModel(model.into()))?;
    tracing::debug!("model {model} routed to {provider}");
    Ok(provider)
}

/// Resolve the default response token ceiling for `model`.
///
/// Unknown models get [`MAX_TOKENS_DEFAULT`].
pub fn resolve_max_tokens(model: &str) -> usize {
    lookup(model).map_or(MAX_TOKENS_DEFAULT, |e| e.max_tokens)
}

/// All registered models, sorted by name.
pub fn models() -> &'static [ModelEntry] {
    MODELS
}
