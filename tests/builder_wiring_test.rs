//! Builder wiring: feature toggles, credential tiers and client reuse.

#![allow(unsafe_code)]

use std::sync::Mutex;

use dashscope::defaults;
use dashscope::prelude::*;

/// Serializes tests that touch `DASHSCOPE_API_KEY`
static ENV_LOCK: Mutex<()> = Mutex::new(());

struct EnvGuard {
    key: &'static str,
    previous: Option<String>,
}

impl EnvGuard {
    fn set(key: &'static str, value: &str) -> Self {
        let previous = std::env::var(key).ok();
        unsafe {
            std::env::set_var(key, value);
        }
        Self { key, previous }
    }

    fn remove(key: &'static str) -> Self {
        let previous = std::env::var(key).ok();
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, previous }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.previous {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

fn auth_header(client: &DashScope, feature: Feature) -> String {
    let headers = match feature {
        Feature::Chat => client.chat().unwrap().api().headers(),
        Feature::Embedding => client.embedding().unwrap().api().headers(),
        _ => panic!("unhandled feature in test helper"),
    };
    headers
        .get("authorization")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}

#[test]
fn test_environment_key_fills_missing_shared_key() {
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = EnvGuard::set(defaults::env::API_KEY, "sk-from-env");

    let client = DashScope::builder().build().unwrap();

    assert_eq!(auth_header(&client, Feature::Chat), "Bearer sk-from-env");
    assert_eq!(client.wired_features().len(), Feature::ALL.len());
}

#[test]
fn test_configured_key_beats_environment() {
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = EnvGuard::set(defaults::env::API_KEY, "sk-from-env");

    let client = DashScope::builder().api_key("sk-explicit").build().unwrap();

    assert_eq!(auth_header(&client, Feature::Chat), "Bearer sk-explicit");
}

#[test]
fn test_blank_shared_key_is_an_error_not_an_env_fallback() {
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = EnvGuard::set(defaults::env::API_KEY, "sk-from-env");

    // A key that is set but blank never falls through to the environment.
    let err = DashScope::builder().api_key("").build().unwrap_err();

    assert!(matches!(err, DashScopeError::ConfigurationError(_)));
    let message = err.to_string();
    assert!(message.contains("dashscope.api-key"), "{message}");
}

#[test]
fn test_feature_key_beats_shared_and_environment() {
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = EnvGuard::set(defaults::env::API_KEY, "sk-from-env");

    let mut config = DashScopeConfig::new();
    config.connection = ConnectionConfig::new().with_api_key("sk-shared");
    config.embedding.connection = ConnectionConfig::new().with_api_key("sk-embedding");

    let client = DashScope::builder().with_config(config).build().unwrap();

    assert_eq!(auth_header(&client, Feature::Chat), "Bearer sk-shared");
    assert_eq!(
        auth_header(&client, Feature::Embedding),
        "Bearer sk-embedding"
    );
}

#[test]
fn test_missing_credential_fails_the_whole_build() {
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = EnvGuard::remove(defaults::env::API_KEY);

    let err = DashScope::builder().build().unwrap_err();

    assert!(matches!(err, DashScopeError::ConfigurationError(_)));
    let message = err.to_string();
    assert!(message.contains("dashscope.api-key"), "{message}");
}

#[test]
fn test_resolution_itself_never_reads_the_environment() {
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = EnvGuard::set(defaults::env::API_KEY, "sk-from-env");

    let shared = ConnectionConfig::new().with_base_url("https://example.com");
    let err = resolve_connection(&shared, &ConnectionConfig::new(), Feature::Chat).unwrap_err();

    assert!(matches!(err, DashScopeError::ConfigurationError(_)));
}

#[test]
fn test_all_features_disabled_builds_without_credentials() {
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = EnvGuard::remove(defaults::env::API_KEY);

    let mut builder = DashScope::builder();
    for feature in Feature::ALL {
        builder = builder.with_feature(feature, false);
    }
    let client = builder.build().unwrap();

    assert!(client.wired_features().is_empty());
    for feature in Feature::ALL {
        assert!(!client.is_wired(feature));
    }
}

#[test]
fn test_workspace_id_flows_into_every_handle() {
    let client = DashScope::builder()
        .api_key("sk-test")
        .workspace_id("ws-main")
        .build()
        .unwrap();

    let chat = client.chat().unwrap();
    assert_eq!(chat.api().workspace_id(), Some("ws-main"));
    assert_eq!(
        chat.api().headers().get(defaults::headers::WORKSPACE).unwrap(),
        "ws-main"
    );

    let speech = client.speech().unwrap();
    assert_eq!(speech.api().workspace_id(), Some("ws-main"));
}

#[test]
fn test_feature_base_url_override_scopes_to_that_feature() {
    let mut config = DashScopeConfig::new();
    config.connection = ConnectionConfig::new().with_api_key("sk-test");
    config.embedding.connection =
        ConnectionConfig::new().with_base_url("https://embed.example.com");

    let client = DashScope::builder().with_config(config).build().unwrap();

    let embedding = client.embedding().unwrap();
    assert!(
        embedding
            .embedding_endpoint()
            .starts_with("https://embed.example.com/")
    );

    let chat = client.chat().unwrap();
    assert_eq!(chat.api().base_url(), defaults::BASE_URL);
}

#[test]
fn test_custom_http_client_bypasses_http_section() {
    let mut config = DashScopeConfig::new();
    config.connection = ConnectionConfig::new().with_api_key("sk-test");
    config.http.proxy = Some("::not a proxy url::".to_string());

    // Built-in client construction chokes on the proxy.
    let err = DashScope::builder()
        .with_config(config.clone())
        .build()
        .unwrap_err();
    assert!(matches!(err, DashScopeError::ConfigurationError(_)));

    // A caller-provided client skips the http section entirely.
    let client = DashScope::builder()
        .with_config(config)
        .with_http_client(reqwest::Client::new())
        .build()
        .unwrap();
    assert!(client.chat().is_some());
}

#[test]
fn test_handles_carry_their_configured_options() {
    let client = DashScope::builder()
        .api_key("sk-test")
        .chat_options(ChatOptions::default().with_model("qwen-max").with_temperature(0.3))
        .embedding_options(EmbeddingOptions::default().with_model("text-embedding-v3"))
        .build()
        .unwrap();

    assert_eq!(client.chat().unwrap().options().model, "qwen-max");
    assert_eq!(client.chat().unwrap().options().temperature, Some(0.3));
    assert_eq!(
        client.embedding().unwrap().options().model,
        "text-embedding-v3"
    );
}

#[test]
fn test_generation_handles_share_the_retry_policy() {
    let policy = RetryPolicy::default().with_max_attempts(7);
    let client = DashScope::builder()
        .api_key("sk-test")
        .retry_policy(policy)
        .build()
        .unwrap();

    assert_eq!(client.chat().unwrap().retry_policy().max_attempts, 7);
    assert_eq!(client.embedding().unwrap().retry_policy().max_attempts, 7);
    assert_eq!(client.image().unwrap().retry_policy().max_attempts, 7);
}

#[test]
fn test_endpoints_derive_from_the_resolved_base_url() {
    let client = DashScope::builder()
        .api_key("sk-test")
        .base_url("https://gateway.example.com/")
        .build()
        .unwrap();

    assert_eq!(
        client.chat().unwrap().generation_endpoint(),
        format!("https://gateway.example.com{}", defaults::paths::TEXT_GENERATION)
    );
    assert_eq!(
        client.speech().unwrap().synthesis_endpoint(),
        format!("wss://gateway.example.com{}", defaults::paths::WEBSOCKET_INFERENCE)
    );
    assert_eq!(
        client.transcription().unwrap().task_endpoint("task-1"),
        format!("https://gateway.example.com{}/task-1", defaults::paths::TASKS)
    );
}
