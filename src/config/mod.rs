//! Configuration model for the DashScope bootstrap.
//!
//! The configuration tree lives under the `dashscope.` namespace:
//!
//! ```text
//! dashscope.base-url / api-key / workspace-id      shared connection defaults
//! dashscope.read-timeout                           shared HTTP read timeout
//! dashscope.http.*                                 HTTP client settings
//! dashscope.retry.*                                retry policy
//! dashscope.<feature>.enabled                      feature toggle (default true)
//! dashscope.<feature>.base-url / api-key / ...     per-feature connection overrides
//! dashscope.<feature>.options.*                    per-feature model options
//! ```
//!
//! All sections deserialize with `serde` from any self-describing format, so
//! applications can load them from their own configuration files.

pub mod connection;
pub mod http;
pub mod resolved;

pub use connection::{ConnectionConfig, Feature};
pub use http::{HttpConfig, HttpConfigBuilder};
pub use resolved::{ResolvedConnection, resolve_connection};

use std::time::Duration;

use serde::Deserialize;

use crate::model::chat::ChatOptions;
use crate::model::embedding::EmbeddingOptions;
use crate::model::image::ImageOptions;
use crate::model::speech::SpeechOptions;
use crate::model::transcription::TranscriptionOptions;
use crate::retry::RetryPolicy;

/// Root configuration for the DashScope bootstrap (`dashscope.*`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DashScopeConfig {
    /// Shared connection defaults, overridable per feature
    #[serde(flatten)]
    pub connection: ConnectionConfig,
    /// Read timeout applied to the shared HTTP client
    #[serde(with = "crate::config::http::duration_option_serde")]
    pub read_timeout: Option<Duration>,
    /// HTTP client construction settings
    pub http: HttpConfig,
    /// Retry policy attached to the generation handles
    pub retry: RetryPolicy,
    /// Chat feature section
    pub chat: ChatConfig,
    /// Embedding feature section
    pub embedding: EmbeddingConfig,
    /// Image synthesis feature section
    pub image: ImageConfig,
    /// Agent application feature section
    pub agent: AgentConfig,
    /// Speech synthesis feature section
    pub speech: SpeechConfig,
    /// Audio transcription feature section
    pub transcription: TranscriptionConfig,
}

impl DashScopeConfig {
    /// Create a configuration with every feature enabled and nothing set
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a feature's toggle is on
    pub fn feature_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::Chat => self.chat.enabled,
            Feature::Embedding => self.embedding.enabled,
            Feature::Image => self.image.enabled,
            Feature::Agent => self.agent.enabled,
            Feature::Speech => self.speech.enabled,
            Feature::Transcription => self.transcription.enabled,
        }
    }

    /// The connection override section for a feature
    pub fn feature_connection(&self, feature: Feature) -> &ConnectionConfig {
        match feature {
            Feature::Chat => &self.chat.connection,
            Feature::Embedding => &self.embedding.connection,
            Feature::Image => &self.image.connection,
            Feature::Agent => &self.agent.connection,
            Feature::Speech => &self.speech.connection,
            Feature::Transcription => &self.transcription.connection,
        }
    }
}

impl Default for DashScopeConfig {
    fn default() -> Self {
        Self {
            connection: ConnectionConfig::default(),
            read_timeout: None,
            http: HttpConfig::default(),
            retry: RetryPolicy::default(),
            chat: ChatConfig::default(),
            embedding: EmbeddingConfig::default(),
            image: ImageConfig::default(),
            agent: AgentConfig::default(),
            speech: SpeechConfig::default(),
            transcription: TranscriptionConfig::default(),
        }
    }
}

macro_rules! feature_section {
    ($(#[$doc:meta])* $name:ident, options: $options:ty) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Deserialize)]
        #[serde(default, rename_all = "kebab-case")]
        pub struct $name {
            /// Whether to wire this feature at build time
            pub enabled: bool,
            /// Connection overrides taking precedence over the shared section
            #[serde(flatten)]
            pub connection: ConnectionConfig,
            /// Options attached to the feature's handle
            pub options: $options,
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    enabled: true,
                    connection: ConnectionConfig::default(),
                    options: <$options>::default(),
                }
            }
        }
    };
}

feature_section!(
    /// Chat feature section (`dashscope.chat.*`)
    ChatConfig,
    options: ChatOptions
);
feature_section!(
    /// Embedding feature section (`dashscope.embedding.*`)
    EmbeddingConfig,
    options: EmbeddingOptions
);
feature_section!(
    /// Image synthesis feature section (`dashscope.image.*`)
    ImageConfig,
    options: ImageOptions
);
feature_section!(
    /// Speech synthesis feature section (`dashscope.speech.*`)
    SpeechConfig,
    options: SpeechOptions
);
feature_section!(
    /// Audio transcription feature section (`dashscope.transcription.*`)
    TranscriptionConfig,
    options: TranscriptionOptions
);

/// Agent application feature section (`dashscope.agent.*`).
///
/// Agent apps carry no model options; the app id is supplied per request by
/// the protocol layer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AgentConfig {
    /// Whether to wire the agent API at build time
    pub enabled: bool,
    /// Connection overrides taking precedence over the shared section
    #[serde(flatten)]
    pub connection: ConnectionConfig,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            connection: ConnectionConfig::default(),
        }
    }
}
