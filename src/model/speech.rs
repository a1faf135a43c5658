//! Speech synthesis feature: options and the wired handle.
//!
//! Synthesis runs over the websocket inference endpoint; the handle derives
//! the `wss` URL from the resolved connection.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::DashScopeApi;
use crate::defaults;
use crate::error::DashScopeError;

/// Audio container format for synthesized speech
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// WAV container
    Wav,
    /// MP3 container
    Mp3,
    /// Raw PCM samples
    Pcm,
}

/// Speech synthesis options (`dashscope.speech.options.*`).
///
/// The voice is part of the model name, so there is no separate voice field.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "kebab-case")]
pub struct SpeechOptions {
    /// Model (and voice) name
    pub model: String,

    /// Output audio format
    pub format: Option<AudioFormat>,

    /// Output sample rate in Hz
    pub sample_rate: Option<u32>,

    /// Volume, 0 to 100
    #[validate(range(min = 0, max = 100))]
    pub volume: Option<u32>,

    /// Speech rate multiplier
    #[validate(range(min = 0.5, max = 2.0))]
    pub rate: Option<f32>,

    /// Pitch multiplier
    #[validate(range(min = 0.5, max = 2.0))]
    pub pitch: Option<f32>,
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self {
            model: defaults::models::SPEECH.to_string(),
            format: None,
            sample_rate: None,
            volume: None,
            rate: None,
            pitch: None,
        }
    }
}

impl SpeechOptions {
    /// Create options for a specific model
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = model.into();
        self
    }

    /// Set the output format
    pub const fn with_format(mut self, format: AudioFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Set the speech rate multiplier
    pub const fn with_rate(mut self, rate: f32) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Validate option ranges
    pub fn validate_options(&self) -> Result<(), DashScopeError> {
        self.validate()
            .map_err(|e| DashScopeError::InvalidParameter(e.to_string()))?;
        if self.model.trim().is_empty() {
            return Err(DashScopeError::InvalidParameter(
                "Speech model name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Ready-to-use speech synthesis handle.
///
/// Cheap to clone; synthesis sessions themselves are the protocol layer's
/// concern.
#[derive(Debug, Clone)]
pub struct SpeechSynthesisModel {
    api: DashScopeApi,
    options: SpeechOptions,
}

impl SpeechSynthesisModel {
    /// Assemble a speech handle from its wired parts
    pub fn new(api: DashScopeApi, options: SpeechOptions) -> Self {
        Self { api, options }
    }

    /// The transport behind this handle
    pub fn api(&self) -> &DashScopeApi {
        &self.api
    }

    /// The configured synthesis options
    pub fn options(&self) -> &SpeechOptions {
        &self.options
    }

    /// Websocket URL of the synthesis endpoint
    pub fn synthesis_endpoint(&self) -> String {
        self.api
            .websocket_endpoint(defaults::paths::WEBSOCKET_INFERENCE)
    }
}
