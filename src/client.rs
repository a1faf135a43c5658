//! The wired DashScope client facade.
//!
//! A [`DashScope`] value is the end product of the builder: one handle per
//! enabled feature, all sharing a single HTTP client. Features that were
//! disabled at build time are simply absent; accessing them returns `None`
//! rather than an error, so applications can inspect what was wired.

use crate::builder::DashScopeBuilder;
use crate::config::Feature;
use crate::error::DashScopeError;
use crate::model::{
    AgentApi, ChatModel, EmbeddingModel, ImageModel, SpeechSynthesisModel, TranscriptionModel,
};

/// Wired DashScope feature handles sharing one HTTP client
#[derive(Debug, Clone)]
pub struct DashScope {
    pub(crate) chat: Option<ChatModel>,
    pub(crate) embedding: Option<EmbeddingModel>,
    pub(crate) image: Option<ImageModel>,
    pub(crate) agent: Option<AgentApi>,
    pub(crate) speech: Option<SpeechSynthesisModel>,
    pub(crate) transcription: Option<TranscriptionModel>,
    pub(crate) http_client: reqwest::Client,
}

impl DashScope {
    /// Start configuring a client
    pub fn builder() -> DashScopeBuilder {
        DashScopeBuilder::new()
    }

    /// Build a client from environment credentials alone.
    ///
    /// Reads `DASHSCOPE_API_KEY` and wires every feature against the default
    /// service endpoint.
    pub fn from_env() -> Result<Self, DashScopeError> {
        DashScopeBuilder::new().build()
    }

    /// The chat handle, when the chat feature was wired
    pub fn chat(&self) -> Option<&ChatModel> {
        self.chat.as_ref()
    }

    /// The embedding handle, when the embedding feature was wired
    pub fn embedding(&self) -> Option<&EmbeddingModel> {
        self.embedding.as_ref()
    }

    /// The image synthesis handle, when the image feature was wired
    pub fn image(&self) -> Option<&ImageModel> {
        self.image.as_ref()
    }

    /// The agent application API, when the agent feature was wired
    pub fn agent(&self) -> Option<&AgentApi> {
        self.agent.as_ref()
    }

    /// The speech synthesis handle, when the speech feature was wired
    pub fn speech(&self) -> Option<&SpeechSynthesisModel> {
        self.speech.as_ref()
    }

    /// The transcription handle, when the transcription feature was wired
    pub fn transcription(&self) -> Option<&TranscriptionModel> {
        self.transcription.as_ref()
    }

    /// The HTTP client shared by every handle
    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    /// Whether a feature was wired at build time
    pub fn is_wired(&self, feature: Feature) -> bool {
        match feature {
            Feature::Chat => self.chat.is_some(),
            Feature::Embedding => self.embedding.is_some(),
            Feature::Image => self.image.is_some(),
            Feature::Agent => self.agent.is_some(),
            Feature::Speech => self.speech.is_some(),
            Feature::Transcription => self.transcription.is_some(),
        }
    }

    /// The features that were wired at build time
    pub fn wired_features(&self) -> Vec<Feature> {
        Feature::ALL
            .into_iter()
            .filter(|f| self.is_wired(*f))
            .collect()
    }
}
