//! Audio transcription feature: options and the wired handle.
//!
//! Transcription jobs are asynchronous on the service side: a submission
//! returns a task id which is then polled on the shared tasks endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::DashScopeApi;
use crate::defaults;
use crate::error::DashScopeError;

/// Transcription options (`dashscope.transcription.options.*`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "kebab-case")]
pub struct TranscriptionOptions {
    /// Model name
    pub model: String,

    /// Source audio format, e.g. `wav` or `mp3`
    pub format: Option<String>,

    /// Source sample rate in Hz
    pub sample_rate: Option<u32>,

    /// Language hints, e.g. `["zh", "en"]`
    pub language_hints: Option<Vec<String>>,

    /// Audio channels to transcribe
    pub channel_id: Option<Vec<u32>>,
}

impl Default for TranscriptionOptions {
    fn default() -> Self {
        Self {
            model: defaults::models::TRANSCRIPTION.to_string(),
            format: None,
            sample_rate: None,
            language_hints: None,
            channel_id: None,
        }
    }
}

impl TranscriptionOptions {
    /// Create options for a specific model
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = model.into();
        self
    }

    /// Set language hints
    pub fn with_language_hints(mut self, hints: Vec<String>) -> Self {
        self.language_hints = Some(hints);
        self
    }

    /// Validate option values
    pub fn validate_options(&self) -> Result<(), DashScopeError> {
        self.validate()
            .map_err(|e| DashScopeError::InvalidParameter(e.to_string()))?;
        if self.model.trim().is_empty() {
            return Err(DashScopeError::InvalidParameter(
                "Transcription model name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Ready-to-use transcription handle
#[derive(Debug, Clone)]
pub struct TranscriptionModel {
    api: DashScopeApi,
    options: TranscriptionOptions,
}

impl TranscriptionModel {
    /// Assemble a transcription handle from its wired parts
    pub fn new(api: DashScopeApi, options: TranscriptionOptions) -> Self {
        Self { api, options }
    }

    /// The transport behind this handle
    pub fn api(&self) -> &DashScopeApi {
        &self.api
    }

    /// The configured transcription options
    pub fn options(&self) -> &TranscriptionOptions {
        &self.options
    }

    /// Full URL of the transcription submission endpoint
    pub fn transcription_endpoint(&self) -> String {
        self.api.endpoint(defaults::paths::TRANSCRIPTION)
    }

    /// Full URL for polling a submitted transcription task
    pub fn task_endpoint(&self, task_id: &str) -> String {
        format!("{}/{task_id}", self.api.endpoint(defaults::paths::TASKS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = TranscriptionOptions::default();
        assert_eq!(options.model, defaults::models::TRANSCRIPTION);
        assert!(options.validate_options().is_ok());
    }

    #[test]
    fn test_kebab_case_fields() {
        let options: TranscriptionOptions = serde_json::from_str(
            r#"{"sample-rate": 16000, "language-hints": ["zh", "en"]}"#,
        )
        .unwrap();
        assert_eq!(options.sample_rate, Some(16000));
        assert_eq!(
            options.language_hints,
            Some(vec!["zh".to_string(), "en".to_string()])
        );
    }
}
