//! Client construction: turning a configuration tree into wired handles.
//!
//! The builder owns the full [`DashScopeConfig`] and applies the two defaults
//! the configuration itself does not carry: the service endpoint and the
//! environment credential. Everything else is delegated to the pure
//! [`resolve_connection`] step, once per enabled feature.
//!
//! # Example
//! ```rust,no_run
//! use dashscope::DashScope;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DashScope::builder()
//!         .api_key("sk-your-key")
//!         .workspace_id("ws-main")
//!         .build()?;
//!
//!     if let Some(chat) = client.chat() {
//!         println!("chat wired at {}", chat.generation_endpoint());
//!     }
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use secrecy::SecretString;

use crate::api::DashScopeApi;
use crate::client::DashScope;
use crate::config::{DashScopeConfig, Feature, HttpConfig, resolve_connection};
use crate::defaults;
use crate::error::DashScopeError;
use crate::http::build_http_client_from_config;
use crate::model::{
    AgentApi, ChatModel, ChatOptions, EmbeddingModel, EmbeddingOptions, ImageModel, ImageOptions,
    SpeechOptions, SpeechSynthesisModel, TranscriptionModel, TranscriptionOptions,
};
use crate::retry::RetryPolicy;

/// Builder for [`DashScope`] clients.
///
/// Credentials are looked up in order: a per-feature `api-key`, the shared
/// `api-key`, then the `DASHSCOPE_API_KEY` environment variable. The
/// environment is only consulted once, in [`build`](Self::build), and only
/// when no shared key was set at all: a shared key set to a blank string is
/// a configuration error, not a fallback trigger. The resolution step itself
/// never reads the environment.
#[derive(Debug, Clone, Default)]
pub struct DashScopeBuilder {
    config: DashScopeConfig,
    http_client: Option<reqwest::Client>,
}

impl DashScopeBuilder {
    /// Create a builder with every feature enabled and nothing set
    pub fn new() -> Self {
        Self {
            config: DashScopeConfig::default(),
            http_client: None,
        }
    }

    /// Start from an already-deserialized configuration tree
    pub fn with_config(mut self, config: DashScopeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the shared API key
    pub fn api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.config.connection.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    /// Set the shared base URL
    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.config.connection.base_url = Some(base_url.into());
        self
    }

    /// Set the shared workspace id
    pub fn workspace_id<S: Into<String>>(mut self, workspace_id: S) -> Self {
        self.config.connection.workspace_id = Some(workspace_id.into());
        self
    }

    /// Set the HTTP read timeout
    pub const fn read_timeout(mut self, timeout: Duration) -> Self {
        self.config.read_timeout = Some(timeout);
        self
    }

    /// Replace the HTTP client settings
    pub fn http_config(mut self, http_config: HttpConfig) -> Self {
        self.config.http = http_config;
        self
    }

    /// Replace the retry policy attached to the generation handles
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.config.retry = policy;
        self
    }

    /// Use a caller-provided HTTP client instead of building one.
    ///
    /// The `http` section and read timeout are ignored in that case; the
    /// client is taken as-is.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Enable or disable a feature
    pub fn with_feature(mut self, feature: Feature, enabled: bool) -> Self {
        match feature {
            Feature::Chat => self.config.chat.enabled = enabled,
            Feature::Embedding => self.config.embedding.enabled = enabled,
            Feature::Image => self.config.image.enabled = enabled,
            Feature::Agent => self.config.agent.enabled = enabled,
            Feature::Speech => self.config.speech.enabled = enabled,
            Feature::Transcription => self.config.transcription.enabled = enabled,
        }
        self
    }

    /// Set chat options
    pub fn chat_options(mut self, options: ChatOptions) -> Self {
        self.config.chat.options = options;
        self
    }

    /// Set embedding options
    pub fn embedding_options(mut self, options: EmbeddingOptions) -> Self {
        self.config.embedding.options = options;
        self
    }

    /// Set image synthesis options
    pub fn image_options(mut self, options: ImageOptions) -> Self {
        self.config.image.options = options;
        self
    }

    /// Set speech synthesis options
    pub fn speech_options(mut self, options: SpeechOptions) -> Self {
        self.config.speech.options = options;
        self
    }

    /// Set transcription options
    pub fn transcription_options(mut self, options: TranscriptionOptions) -> Self {
        self.config.transcription.options = options;
        self
    }

    /// Build the client, wiring every enabled feature.
    ///
    /// Fails fast: a missing credential or base URL for any enabled feature
    /// aborts the whole build with a
    /// [`ConfigurationError`](DashScopeError::ConfigurationError) naming the
    /// properties to set. Disabled features are skipped without resolution.
    pub fn build(self) -> Result<DashScope, DashScopeError> {
        let mut config = self.config;

        // The environment credential sits below both property tiers: it only
        // applies when no shared key was configured.
        if config.connection.api_key.is_none() {
            config.connection.api_key = std::env::var(defaults::env::API_KEY)
                .ok()
                .map(SecretString::from);
        }
        if config.connection.base_url.is_none() {
            config.connection.base_url = Some(defaults::BASE_URL.to_string());
        }

        // Every enabled option section must bind cleanly before any feature
        // is wired.
        if config.feature_enabled(Feature::Chat) {
            config.chat.options.validate_options()?;
        }
        if config.feature_enabled(Feature::Embedding) {
            config.embedding.options.validate_options()?;
        }
        if config.feature_enabled(Feature::Image) {
            config.image.options.validate_options()?;
        }
        if config.feature_enabled(Feature::Speech) {
            config.speech.options.validate_options()?;
        }
        if config.feature_enabled(Feature::Transcription) {
            config.transcription.options.validate_options()?;
        }

        let http_client = match self.http_client {
            Some(client) => {
                if config.read_timeout.is_some() || config.http != HttpConfig::default() {
                    tracing::warn!(
                        target: "dashscope::builder",
                        "caller-provided HTTP client in use; the http section and read-timeout are ignored"
                    );
                }
                tracing::debug!(
                    target: "dashscope::builder",
                    "using caller-provided HTTP client"
                );
                client
            }
            None => {
                let mut http_config = config.http.clone();
                if config.read_timeout.is_some() {
                    http_config.read_timeout = config.read_timeout;
                }
                build_http_client_from_config(&http_config)?
            }
        };

        let wire = |feature: Feature| -> Result<Option<DashScopeApi>, DashScopeError> {
            if !config.feature_enabled(feature) {
                tracing::debug!(
                    target: "dashscope::builder",
                    feature = %feature,
                    "feature disabled, skipping"
                );
                return Ok(None);
            }
            let resolved =
                resolve_connection(&config.connection, config.feature_connection(feature), feature)?;
            let api = DashScopeApi::new(&resolved, http_client.clone())?;
            tracing::debug!(
                target: "dashscope::builder",
                feature = %feature,
                base_url = %api.base_url(),
                workspace = api.workspace_id().unwrap_or(""),
                "wired feature"
            );
            Ok(Some(api))
        };

        let chat = wire(Feature::Chat)?
            .map(|api| ChatModel::new(api, config.chat.options.clone(), config.retry.clone()));
        let embedding = wire(Feature::Embedding)?.map(|api| {
            EmbeddingModel::new(api, config.embedding.options.clone(), config.retry.clone())
        });
        let image = wire(Feature::Image)?
            .map(|api| ImageModel::new(api, config.image.options.clone(), config.retry.clone()));
        let agent = wire(Feature::Agent)?.map(AgentApi::new);
        let speech = wire(Feature::Speech)?
            .map(|api| SpeechSynthesisModel::new(api, config.speech.options.clone()));
        let transcription = wire(Feature::Transcription)?
            .map(|api| TranscriptionModel::new(api, config.transcription.options.clone()));

        Ok(DashScope {
            chat,
            embedding,
            image,
            agent,
            speech,
            transcription,
            http_client,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn test_explicit_key_wires_every_feature() {
        let client = DashScopeBuilder::new().api_key("sk-test").build().unwrap();

        for feature in Feature::ALL {
            assert!(client.is_wired(feature), "{feature} should be wired");
        }
        assert_eq!(client.wired_features().len(), Feature::ALL.len());
    }

    #[test]
    fn test_default_base_url_applied() {
        let client = DashScopeBuilder::new().api_key("sk-test").build().unwrap();
        let chat = client.chat().unwrap();
        assert_eq!(chat.api().base_url(), defaults::BASE_URL);
    }

    #[test]
    fn test_disabled_feature_is_skipped() {
        let client = DashScopeBuilder::new()
            .api_key("sk-test")
            .with_feature(Feature::Speech, false)
            .with_feature(Feature::Agent, false)
            .build()
            .unwrap();

        assert!(client.speech().is_none());
        assert!(client.agent().is_none());
        assert!(client.chat().is_some());
    }

    #[test]
    fn test_explicit_blank_base_url_still_fails() {
        let err = DashScopeBuilder::new()
            .api_key("sk-test")
            .base_url("")
            .build()
            .unwrap_err();

        assert!(matches!(err, DashScopeError::ConfigurationError(_)));
        assert!(err.to_string().contains("dashscope.base-url"));
    }

    #[test]
    fn test_invalid_options_abort_build() {
        let err = DashScopeBuilder::new()
            .api_key("sk-test")
            .chat_options(ChatOptions::default().with_temperature(9.0))
            .build()
            .unwrap_err();

        assert!(matches!(err, DashScopeError::InvalidParameter(_)));
    }

    #[test]
    fn test_invalid_options_ignored_when_feature_disabled() {
        let client = DashScopeBuilder::new()
            .api_key("sk-test")
            .with_feature(Feature::Chat, false)
            .chat_options(ChatOptions::default().with_temperature(9.0))
            .build()
            .unwrap();

        assert!(client.chat().is_none());
        assert!(client.embedding().is_some());
    }

    #[traced_test]
    #[test]
    fn test_bypassed_http_settings_emit_a_warning() {
        let _client = DashScopeBuilder::new()
            .api_key("sk-test")
            .read_timeout(Duration::from_secs(5))
            .with_http_client(reqwest::Client::new())
            .build()
            .unwrap();

        assert!(logs_contain("read-timeout are ignored"));
    }

    #[traced_test]
    #[test]
    fn test_no_warning_when_custom_client_bypasses_nothing() {
        let _client = DashScopeBuilder::new()
            .api_key("sk-test")
            .with_http_client(reqwest::Client::new())
            .build()
            .unwrap();

        assert!(!logs_contain("ignored"));
    }
}
