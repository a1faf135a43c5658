//! Shared REST transport handle for DashScope services.
//!
//! One `DashScopeApi` is constructed per wired feature, from that feature's
//! resolved connection. It owns everything the protocol layer needs to issue
//! requests: the effective endpoint, fully assembled request headers
//! (authorization, content type, workspace scoping) and the shared HTTP
//! client. It deliberately implements no service calls itself.

use reqwest::Method;
use reqwest::header::HeaderMap;
use secrecy::ExposeSecret;

use crate::config::ResolvedConnection;
use crate::error::DashScopeError;
use crate::http::HttpHeaderBuilder;

/// Transport handle for one feature's resolved connection
#[derive(Debug, Clone)]
pub struct DashScopeApi {
    base_url: String,
    workspace_id: Option<String>,
    headers: HeaderMap,
    http_client: reqwest::Client,
}

impl DashScopeApi {
    /// Build a transport from a resolved connection and a shared client
    pub fn new(
        resolved: &ResolvedConnection,
        http_client: reqwest::Client,
    ) -> Result<Self, DashScopeError> {
        let headers = HttpHeaderBuilder::new()
            .with_bearer_auth(resolved.api_key().expose_secret())?
            .with_json_content_type()
            .with_multi_headers(resolved.headers())?
            .build();

        Ok(Self {
            base_url: resolved.base_url().trim_end_matches('/').to_string(),
            workspace_id: resolved.workspace_id().map(str::to_string),
            headers,
            http_client,
        })
    }

    /// The resolved service endpoint, without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The workspace this transport is scoped to, if any
    pub fn workspace_id(&self) -> Option<&str> {
        self.workspace_id.as_deref()
    }

    /// Request headers attached to every call
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The underlying HTTP client
    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    /// Join a service path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Derive the websocket form of an endpoint (`https` -> `wss`, `http` -> `ws`)
    pub fn websocket_endpoint(&self, path: &str) -> String {
        let endpoint = self.endpoint(path);
        if let Some(rest) = endpoint.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = endpoint.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            endpoint
        }
    }

    /// Start a request to a service path with this transport's headers applied
    pub fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.http_client
            .request(method, self.endpoint(path))
            .headers(self.headers.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConnectionConfig, Feature, resolve_connection};

    fn resolved(base_url: &str, workspace: Option<&str>) -> ResolvedConnection {
        let mut shared = ConnectionConfig::new()
            .with_base_url(base_url)
            .with_api_key("sk-test");
        if let Some(ws) = workspace {
            shared = shared.with_workspace_id(ws);
        }
        resolve_connection(&shared, &ConnectionConfig::new(), Feature::Chat).unwrap()
    }

    #[test]
    fn test_endpoint_join_normalizes_slashes() {
        let api = DashScopeApi::new(
            &resolved("https://dashscope.aliyuncs.com/", None),
            reqwest::Client::new(),
        )
        .unwrap();

        assert_eq!(api.base_url(), "https://dashscope.aliyuncs.com");
        assert_eq!(
            api.endpoint("/api/v1/tasks"),
            "https://dashscope.aliyuncs.com/api/v1/tasks"
        );
        assert_eq!(
            api.endpoint("api/v1/tasks"),
            "https://dashscope.aliyuncs.com/api/v1/tasks"
        );
    }

    #[test]
    fn test_websocket_endpoint_scheme() {
        let api = DashScopeApi::new(
            &resolved("https://dashscope.aliyuncs.com", None),
            reqwest::Client::new(),
        )
        .unwrap();

        assert_eq!(
            api.websocket_endpoint("/api-ws/v1/inference"),
            "wss://dashscope.aliyuncs.com/api-ws/v1/inference"
        );
    }

    #[test]
    fn test_headers_carry_auth_and_workspace() {
        let api = DashScopeApi::new(
            &resolved("https://example.com", Some("ws-7")),
            reqwest::Client::new(),
        )
        .unwrap();

        assert_eq!(
            api.headers().get("authorization").unwrap(),
            "Bearer sk-test"
        );
        assert_eq!(api.headers().get("DashScope-Workspace").unwrap(), "ws-7");
        assert_eq!(api.workspace_id(), Some("ws-7"));
    }

    #[test]
    fn test_debug_output_redacts_credential() {
        let api = DashScopeApi::new(
            &resolved("https://example.com", None),
            reqwest::Client::new(),
        )
        .unwrap();

        let debug = format!("{api:?}");
        assert!(!debug.contains("sk-test"));
    }
}
