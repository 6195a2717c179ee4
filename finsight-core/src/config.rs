//! Credential configuration for OpenAI-compatible endpoints.
//!
//! Collaborators never read the process environment themselves; the binary
//! reads it once and passes an [`OpenAiConfig`] down to each constructor.

use serde::{Deserialize, Serialize};

use crate::error::{FinsightError, Result};

/// The default completion model.
pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-3.5-turbo";

/// Credentials and endpoint selection for an OpenAI-compatible API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpenAiConfig {
    /// API key sent as a bearer token.
    pub api_key: String,
    /// Optional base URL override for OpenAI-compatible endpoints.
    pub base_url: Option<String>,
    /// Model name used for completions.
    pub model: String,
}

impl OpenAiConfig {
    /// Create a configuration for the standard OpenAI API.
    ///
    /// # Errors
    ///
    /// Returns [`FinsightError::Config`] if the API key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(FinsightError::Config("API key must not be empty".into()));
        }
        Ok(Self { api_key, base_url: None, model: DEFAULT_COMPLETION_MODEL.into() })
    }

    /// Create a configuration for an OpenAI-compatible API.
    ///
    /// # Errors
    ///
    /// Returns [`FinsightError::Config`] if the API key is empty.
    pub fn compatible(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let mut config = Self::new(api_key)?;
        config.base_url = Some(base_url.into());
        Ok(config)
    }

    /// Create a configuration from `OPENAI_API_KEY` and `OPENAI_BASE_URL`.
    ///
    /// `OPENAI_BASE_URL` is optional; when unset the standard endpoint is used.
    ///
    /// # Errors
    ///
    /// Returns [`FinsightError::Config`] if `OPENAI_API_KEY` is not set.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            FinsightError::Config("OPENAI_API_KEY environment variable not set".into())
        })?;
        let mut config = Self::new(api_key)?;
        config.base_url = std::env::var("OPENAI_BASE_URL").ok();
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            config.model = model;
        }
        Ok(config)
    }

    /// Set the completion model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}
