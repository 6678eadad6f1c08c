//! Shared JSON-over-HTTP transport for the provider clients.
//!
//! `HttpProvider` holds pre-built headers (auth + content-type) and the
//! endpoint URL. `Transport` owns the lazily-created `reqwest::Client` of a
//! single client instance and tracks whether it has been closed.

use crate::{Error, Provider, ProviderError, Result};
use reqwest::{
    Method, StatusCode,
    header::{self, HeaderMap, HeaderName, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::OnceLock;

/// Endpoint and headers for one provider.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    provider: Provider,
    headers: HeaderMap,
    endpoint: String,
}

impl HttpProvider {
    /// Create a provider with Bearer token authentication.
    pub fn bearer(provider: Provider, key: &str, endpoint: &str) -> Result<Self> {
        let value = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|_| ProviderError::InvalidHeader("authorization"))?;
        Ok(Self::json(provider, endpoint).header(header::AUTHORIZATION, value))
    }

    /// Create a provider with a custom authentication header.
    ///
    /// Used by providers that don't use Bearer tokens (Anthropic's
    /// `x-api-key`, Gemini's `x-goog-api-key`).
    pub fn custom_header(
        provider: Provider,
        header_name: &'static str,
        header_value: &str,
        endpoint: &str,
    ) -> Result<Self> {
        let value = HeaderValue::from_str(header_value)
            .map_err(|_| ProviderError::InvalidHeader(header_name))?;
        Ok(Self::json(provider, endpoint).header(HeaderName::from_static(header_name), value))
    }

    fn json(provider: Provider, endpoint: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        Self {
            provider,
            headers,
            endpoint: endpoint.to_owned(),
        }
    }

    /// Add or replace a header.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// A copy of this provider targeting a different endpoint.
    pub fn at(&self, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..self.clone()
        }
    }

    /// POST `body` as JSON and decode a 200 response as `R`.
    ///
    /// Any other status is a [`ProviderError::Status`] carrying the raw body.
    pub async fn send<R: DeserializeOwned>(
        &self,
        client: &reqwest::Client,
        body: &impl Serialize,
    ) -> Result<R> {
        let provider = self.provider;
        let json = serde_json::to_string(body)
            .map_err(|source| ProviderError::Encode { provider, source })?;
        tracing::trace!("request to {}: {json}", self.endpoint);

        let transport = |source| ProviderError::Transport { provider, source };
        let response = client
            .request(Method::POST, &self.endpoint)
            .headers(self.headers.clone())
            .body(json)
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        let text = response.text().await.map_err(transport)?;
        tracing::trace!("response from {provider} ({status}): {text}");

        if status != StatusCode::OK {
            tracing::warn!("{provider} returned status {status}");
            return Err(ProviderError::Status {
                provider,
                status: status.as_u16(),
                body: text,
            }
            .into());
        }

        serde_json::from_str(&text)
            .map_err(|source| ProviderError::Decode { provider, source }.into())
    }

    /// The provider this transport talks to.
    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Get the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get a reference to the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

/// Lazily-initialized HTTP client owned by one provider client.
#[derive(Debug, Default)]
pub(crate) struct Transport {
    client: OnceLock<reqwest::Client>,
    closed: bool,
}

impl Transport {
    /// The HTTP client, created on first use. Fails once closed.
    pub(crate) fn get(&self, provider: Provider) -> Result<reqwest::Client> {
        if self.closed {
            return Err(Error::Closed(provider));
        }
        Ok(self.client.get_or_init(reqwest::Client::new).clone())
    }

    /// Whether the HTTP client has been created.
    pub(crate) fn is_initialized(&self) -> bool {
        self.client.get().is_some()
    }

    /// Whether [`close`](Self::close) has been called.
    pub(crate) fn is_closed(&self) -> bool {
        self.closed
    }

    /// Drop the HTTP client and refuse further use.
    pub(crate) fn close(&mut self) {
        self.client.take();
        self.closed = true;
    }
}
