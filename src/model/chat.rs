//! Chat (text generation) feature: options and the wired handle.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::DashScopeApi;
use crate::defaults;
use crate::error::DashScopeError;
use crate::retry::RetryPolicy;

/// Generation options for chat models (`dashscope.chat.options.*`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "kebab-case")]
pub struct ChatOptions {
    /// Model name
    pub model: String,

    /// Sampling temperature
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: Option<f32>,

    /// Nucleus sampling threshold
    #[validate(range(min = 0.0, max = 1.0))]
    pub top_p: Option<f32>,

    /// Candidate set size for sampling
    pub top_k: Option<u32>,

    /// Maximum output tokens
    pub max_tokens: Option<u32>,

    /// Random seed
    pub seed: Option<u64>,

    /// Repetition penalty, must be positive
    #[validate(range(exclusive_min = 0.0))]
    pub repetition_penalty: Option<f32>,

    /// Whether the model may consult web search
    pub enable_search: Option<bool>,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            model: defaults::models::CHAT.to_string(),
            temperature: None,
            top_p: None,
            top_k: None,
            max_tokens: None,
            seed: None,
            repetition_penalty: None,
            enable_search: None,
        }
    }
}

impl ChatOptions {
    /// Create options for a specific model
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = model.into();
        self
    }

    /// Set the sampling temperature
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the nucleus sampling threshold
    pub const fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Set the maximum output tokens
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Validate option ranges
    pub fn validate_options(&self) -> Result<(), DashScopeError> {
        self.validate()
            .map_err(|e| DashScopeError::InvalidParameter(e.to_string()))?;
        if self.model.trim().is_empty() {
            return Err(DashScopeError::InvalidParameter(
                "Chat model name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Ready-to-use chat model handle.
///
/// Carries the feature's transport, options and retry policy for the
/// protocol layer.
#[derive(Debug, Clone)]
pub struct ChatModel {
    api: DashScopeApi,
    options: ChatOptions,
    retry_policy: RetryPolicy,
}

impl ChatModel {
    /// Assemble a chat handle from its wired parts
    pub fn new(api: DashScopeApi, options: ChatOptions, retry_policy: RetryPolicy) -> Self {
        Self {
            api,
            options,
            retry_policy,
        }
    }

    /// The transport behind this handle
    pub fn api(&self) -> &DashScopeApi {
        &self.api
    }

    /// The configured generation options
    pub fn options(&self) -> &ChatOptions {
        &self.options
    }

    /// The retry policy requests should honor
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Full URL of the text generation endpoint
    pub fn generation_endpoint(&self) -> String {
        self.api.endpoint(defaults::paths::TEXT_GENERATION)
    }

    /// Full URL of the multimodal generation endpoint
    pub fn multimodal_endpoint(&self) -> String {
        self.api.endpoint(defaults::paths::MULTIMODAL_GENERATION)
    }
}
