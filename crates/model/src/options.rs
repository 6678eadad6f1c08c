//! Provider-agnostic request options.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Upper bound of the semantic temperature scale.
pub const TEMPERATURE_MAX: f32 = 100.0;

/// Requested response format. Clients ignore formats they cannot express.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Plain text.
    #[default]
    Text,
    /// A JSON object.
    Json,
}

/// Tuning parameters passed by value into every query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Temperature on the 0..=100 scale, rescaled per provider.
    pub temperature: f32,
    /// Response length override. `None` or `Some(0)` uses the registry ceiling.
    pub max_tokens: Option<usize>,
    /// Response format hint.
    pub response_format: ResponseFormat,
}

impl Options {
    /// Options with the given temperature and registry defaults otherwise.
    pub fn with_temperature(temperature: f32) -> Self {
        Self {
            temperature,
            ..Self::default()
        }
    }

    /// Validate the temperature and map it onto `0.0..=native_max`.
    ///
    /// Negative values clamp to zero; values above 100 (or NaN) are an error.
    pub fn scaled_temperature(&self, native_max: f32) -> Result<f32> {
        let t = self.temperature;
        if t.is_nan() || t > TEMPERATURE_MAX {
            return Err(Error::InvalidTemperature(t));
        }
        Ok(t.max(0.0) * native_max / TEMPERATURE_MAX)
    }

    /// The token ceiling for `model`: the override when set, else the registry.
    pub fn max_tokens_for(&self, model: &str) -> usize {
        match self.max_tokens {
            Some(n) if n > 0 => n,
            _ => crate::registry::resolve_max_tokens(model),
        }
    }
}
