//! Text embedding feature: options and the wired handle.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::DashScopeApi;
use crate::defaults;
use crate::error::DashScopeError;
use crate::retry::RetryPolicy;

/// How embedded text will be used, which changes how the service encodes it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextType {
    /// Embeddings meant for retrieval queries
    Query,
    /// Embeddings meant for indexed documents
    Document,
}

/// Embedding options (`dashscope.embedding.options.*`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "kebab-case")]
pub struct EmbeddingOptions {
    /// Model name
    pub model: String,

    /// Usage hint for the embedded text
    pub text_type: Option<TextType>,

    /// Output dimension, for models that support reduced dimensions
    #[validate(range(min = 1))]
    pub dimension: Option<u32>,
}

impl Default for EmbeddingOptions {
    fn default() -> Self {
        Self {
            model: defaults::models::EMBEDDING.to_string(),
            text_type: None,
            dimension: None,
        }
    }
}

impl EmbeddingOptions {
    /// Create options for a specific model
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = model.into();
        self
    }

    /// Set the text usage hint
    pub const fn with_text_type(mut self, text_type: TextType) -> Self {
        self.text_type = Some(text_type);
        self
    }

    /// Set the output dimension
    pub const fn with_dimension(mut self, dimension: u32) -> Self {
        self.dimension = Some(dimension);
        self
    }

    /// Validate option ranges
    pub fn validate_options(&self) -> Result<(), DashScopeError> {
        self.validate()
            .map_err(|e| DashScopeError::InvalidParameter(e.to_string()))?;
        if self.model.trim().is_empty() {
            return Err(DashScopeError::InvalidParameter(
                "Embedding model name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Ready-to-use embedding model handle
#[derive(Debug, Clone)]
pub struct EmbeddingModel {
    api: DashScopeApi,
    options: EmbeddingOptions,
    retry_policy: RetryPolicy,
}

impl EmbeddingModel {
    /// Assemble an embedding handle from its wired parts
    pub fn new(api: DashScopeApi, options: EmbeddingOptions, retry_policy: RetryPolicy) -> Self {
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

    /// The configured embedding options
    pub fn options(&self) -> &EmbeddingOptions {
        &self.options
    }

    /// The retry policy requests should honor
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Full URL of the text embedding endpoint
    pub fn embedding_endpoint(&self) -> String {
        self.api.endpoint(defaults::paths::TEXT_EMBEDDING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = EmbeddingOptions::default();
        assert_eq!(options.model, defaults::models::EMBEDDING);
        assert!(options.validate_options().is_ok());
    }

    #[test]
    fn test_zero_dimension_is_rejected() {
        let options = EmbeddingOptions::default().with_dimension(0);
        assert!(matches!(
            options.validate_options(),
            Err(DashScopeError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_text_type_serializes_lowercase() {
        let options = EmbeddingOptions::default().with_text_type(TextType::Query);
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["text-type"], "query");
    }
}
