//! Provider clients for sqirvy.
//!
//! A static registry routes model names to providers, the factory builds a
//! client for a provider, and every client answers a single-turn
//! [`Client::query_text`] call that can be cancelled through a [`Context`].

pub use call::{Context, call_blocking_with_context, call_with_context};
pub use claude::Claude;
pub use client::Client;
pub use config::{ClientConfig, Provider};
pub use error::{Error, ProviderError, Result};
pub use gemini::Gemini;
pub use http::HttpProvider;
pub use openai::{OpenAI, TokenField};
pub use options::{Options, ResponseFormat};
pub use provider::{Backend, build_client, new_client};
pub use registry::{MAX_TOKENS_DEFAULT, ModelEntry, models, resolve_max_tokens, resolve_provider};

mod call;
pub mod claude;
mod client;
mod config;
mod error;
pub mod gemini;
mod http;
pub mod openai;
mod options;
mod provider;
pub mod registry;
