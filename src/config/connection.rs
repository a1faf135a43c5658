//! Connection settings shared by every DashScope feature.

use std::fmt;

use secrecy::SecretString;
use serde::Deserialize;

/// Connection settings for the DashScope service.
///
/// The same shape appears twice in the configuration tree: once as the shared
/// default section (`dashscope.*`) and once inside every feature section
/// (`dashscope.<feature>.*`). During resolution a feature value that is set
/// and non-blank overrides the shared one, field by field.
///
/// Values are immutable once loaded; resolution never mutates them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ConnectionConfig {
    /// Service endpoint
    pub base_url: Option<String>,
    /// API credential; redacted in debug output
    pub api_key: Option<SecretString>,
    /// Workspace/tenant scoping value
    pub workspace_id: Option<String>,
}

impl ConnectionConfig {
    /// Create an empty connection section
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the service endpoint
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the API credential
    pub fn with_api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    /// Set the workspace id
    pub fn with_workspace_id<S: Into<String>>(mut self, workspace_id: S) -> Self {
        self.workspace_id = Some(workspace_id.into());
        self
    }
}

/// The DashScope features this crate can wire.
///
/// The lowercase name doubles as the feature's configuration section name:
/// `dashscope.chat.*`, `dashscope.embedding.*`, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Text generation
    Chat,
    /// Text embedding
    Embedding,
    /// Image synthesis
    Image,
    /// Agent application completion
    Agent,
    /// Speech synthesis
    Speech,
    /// Audio transcription
    Transcription,
}

impl Feature {
    /// All features, in wiring order
    pub const ALL: [Feature; 6] = [
        Feature::Chat,
        Feature::Embedding,
        Feature::Image,
        Feature::Agent,
        Feature::Speech,
        Feature::Transcription,
    ];

    /// Stable lowercase name used in property paths and log lines
    pub const fn name(self) -> &'static str {
        match self {
            Feature::Chat => "chat",
            Feature::Embedding => "embedding",
            Feature::Image => "image",
            Feature::Agent => "agent",
            Feature::Speech => "speech",
            Feature::Transcription => "transcription",
        }
    }

    /// Property path for a field in this feature's section,
    /// e.g. `dashscope.chat.base-url`
    pub fn property(self, field: &str) -> String {
        format!("dashscope.{}.{field}", self.name())
    }

    /// Property path for a field in the shared section,
    /// e.g. `dashscope.base-url`
    pub fn shared_property(field: &str) -> String {
        format!("dashscope.{field}")
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_connection_builder() {
        let config = ConnectionConfig::new()
            .with_base_url("https://dashscope.aliyuncs.com")
            .with_api_key("sk-test")
            .with_workspace_id("ws-1");

        assert_eq!(
            config.base_url.as_deref(),
            Some("https://dashscope.aliyuncs.com")
        );
        assert_eq!(
            config.api_key.as_ref().map(|k| k.expose_secret()),
            Some("sk-test")
        );
        assert_eq!(config.workspace_id.as_deref(), Some("ws-1"));
    }

    #[test]
    fn test_api_key_is_redacted_in_debug() {
        let config = ConnectionConfig::new().with_api_key("sk-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
    }

    #[test]
    fn test_deserialize_kebab_case() {
        let config: ConnectionConfig = serde_json::from_str(
            r#"{"base-url": "https://example.com", "api-key": "sk-x", "workspace-id": "ws-2"}"#,
        )
        .unwrap();

        assert_eq!(config.base_url.as_deref(), Some("https://example.com"));
        assert_eq!(config.workspace_id.as_deref(), Some("ws-2"));
    }

    #[test]
    fn test_feature_property_paths() {
        assert_eq!(Feature::Chat.property("base-url"), "dashscope.chat.base-url");
        assert_eq!(
            Feature::Transcription.property("api-key"),
            "dashscope.transcription.api-key"
        );
        assert_eq!(Feature::shared_property("base-url"), "dashscope.base-url");
        assert_eq!(Feature::Embedding.to_string(), "embedding");
    }
}
