//! Provider tags and per-client configuration.
//!
//! Credentials and endpoints are read once, at client construction, from an
//! explicit [`ClientConfig`]. [`ClientConfig::from_env`] is the usual source;
//! [`ClientConfig::from_lookup`] takes any lookup so callers (and tests) can
//! supply values without touching the process environment.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Supported LLM providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Anthropic Messages API.
    Anthropic,
    /// DeepSeek, OpenAI-compatible.
    DeepSeek,
    /// Google Gemini generateContent API.
    Gemini,
    /// OpenAI chat completions.
    OpenAI,
    /// Llama models behind an OpenAI-compatible host (e.g. Together).
    Llama,
}

impl Provider {
    /// All providers, in tag order.
    pub const ALL: [Provider; 5] = [
        Self::Anthropic,
        Self::DeepSeek,
        Self::Gemini,
        Self::OpenAI,
        Self::Llama,
    ];

    /// The lowercase tag used in configuration and the model registry.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::DeepSeek => "deepseek",
            Self::Gemini => "gemini",
            Self::OpenAI => "openai",
            Self::Llama => "llama",
        }
    }

    /// Environment variable holding the API key.
    pub const fn api_key_var(&self) -> &'static str {
        match self {
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::DeepSeek => "DEEPSEEK_API_KEY",
            Self::Gemini => "GEMINI_API_KEY",
            Self::OpenAI => "OPENAI_API_KEY",
            Self::Llama => "LLAMA_API_KEY",
        }
    }

    /// Environment variable holding the base URL override.
    pub const fn base_url_var(&self) -> &'static str {
        match self {
            Self::Anthropic => "ANTHROPIC_BASE_URL",
            Self::DeepSeek => "DEEPSEEK_API_BASE",
            Self::Gemini => "GEMINI_BASE_URL",
            Self::OpenAI => "OPENAI_BASE_URL",
            Self::Llama => "LLAMA_BASE_URL",
        }
    }

    /// Whether the provider has no public default endpoint, so the base URL
    /// variable must be set.
    pub const fn requires_base_url(&self) -> bool {
        matches!(self, Self::DeepSeek | Self::Llama)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "anthropic" => Ok(Self::Anthropic),
            "deepseek" => Ok(Self::DeepSeek),
            "gemini" => Ok(Self::Gemini),
            "openai" => Ok(Self::OpenAI),
            "llama" => Ok(Self::Llama),
            other => Err(Error::UnsupportedProvider(other.into())),
        }
    }
}

/// Credential and endpoint for one client instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// API key sent with every request.
    pub api_key: String,
    /// Base URL override. `None` uses the provider's public endpoint.
    pub base_url: Option<String>,
}

impl ClientConfig {
    /// Config with an API key and the provider's default endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
        }
    }

    /// Set the base URL override.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Read the provider's credentials from the process environment.
    pub fn from_env(provider: Provider) -> Result<Self> {
        Self::from_lookup(provider, |var| std::env::var(var).ok())
    }

    /// Read the provider's credentials through `lookup`.
    ///
    /// Empty values count as unset. Fails with [`Error::MissingCredential`]
    /// naming the first missing variable.
    pub fn from_lookup(
        provider: Provider,
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<Self> {
        let get = |var| lookup(var).filter(|v| !v.trim().is_empty());

        let key_var = provider.api_key_var();
        let api_key = get(key_var).ok_or(Error::MissingCredential { var: key_var })?;

        let url_var = provider.base_url_var();
        let base_url = get(url_var);
        if base_url.is_none() && provider.requires_base_url() {
            return Err(Error::MissingCredential { var: url_var });
        }

        Ok(Self { api_key, base_url })
    }

    /// The base URL with any trailing slash removed, or `default`.
    pub(crate) fn base_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.base_url
            .as_deref()
            .unwrap_or(default)
            .trim_end_matches('/')
    }
}
