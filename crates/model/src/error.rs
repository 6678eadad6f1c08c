//! Error taxonomy for provider queries.

use crate::Provider;
use compact_str::CompactString;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the registry, the factory and the provider clients.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The prompt was empty; no request is made.
    #[error("prompt cannot be empty for text query")]
    EmptyPrompt,
    /// Temperature outside the semantic 0..=100 range.
    #[error("temperature must be between 0 and 100, got {0}")]
    InvalidTemperature(f32),
    /// The model is not in the registry.
    #[error("unrecognized model: {0}")]
    UnrecognizedModel(CompactString),
    /// The provider tag is not known.
    #[error("unsupported provider: {0}")]
    UnsupportedProvider(CompactString),
    /// A required environment variable is unset or empty.
    #[error("{var} environment variable not set")]
    MissingCredential {
        /// Name of the expected variable.
        var: &'static str,
    },
    /// The provider answered with zero content segments.
    #[error("no content in response from {0}")]
    NoContent(Provider),
    /// The client was queried after `close()`.
    #[error("{0} client is closed")]
    Closed(Provider),
    /// The context was cancelled before the call finished.
    #[error("context cancelled")]
    Cancelled,
    /// The context deadline passed before the call finished.
    #[error("context deadline exceeded")]
    DeadlineExceeded,
    /// Transport, status or decode failure from a provider.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Failures from the provider transport layer.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Non-200 response; carries the raw body for diagnosis.
    #[error("{provider} API request failed with status {status}: {body}")]
    Status {
        /// Provider that answered.
        provider: Provider,
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },
    /// The request could not be sent or the body could not be read.
    #[error("{provider} request failed: {source}")]
    Transport {
        /// Provider being called.
        provider: Provider,
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// The request body could not be serialized.
    #[error("failed to encode {provider} request: {source}")]
    Encode {
        /// Provider being called.
        provider: Provider,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
    /// The response body was not the expected JSON shape.
    #[error("failed to decode {provider} response: {source}")]
    Decode {
        /// Provider that answered.
        provider: Provider,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
    /// A credential or header value could not be encoded.
    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),
    /// The background task running the call panicked or was aborted.
    #[error("background call failed: {0}")]
    Task(String),
}

impl Error {
    /// Whether the error is the caller's fault (bad input) rather than a
    /// provider or transport failure.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::EmptyPrompt
                | Self::InvalidTemperature(_)
                | Self::UnrecognizedModel(_)
                | Self::UnsupportedProvider(_)
        )
    }
}
