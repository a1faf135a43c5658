//! Agent application feature: the wired API handle.
//!
//! Agent apps are addressed per request by their app id, so the handle
//! carries no model options; it derives the completion endpoint for whatever
//! app the caller targets.

use crate::api::DashScopeApi;
use crate::error::DashScopeError;

/// Ready-to-use agent application handle
#[derive(Debug, Clone)]
pub struct AgentApi {
    api: DashScopeApi,
}

impl AgentApi {
    /// Assemble an agent handle from its transport
    pub fn new(api: DashScopeApi) -> Self {
        Self { api }
    }

    /// The transport behind this handle
    pub fn api(&self) -> &DashScopeApi {
        &self.api
    }

    /// Full URL of the completion endpoint for an agent app
    pub fn completion_endpoint(&self, app_id: &str) -> Result<String, DashScopeError> {
        if app_id.trim().is_empty() {
            return Err(DashScopeError::InvalidParameter(
                "Agent app id cannot be empty".to_string(),
            ));
        }
        Ok(self.api.endpoint(&format!("/api/v1/apps/{app_id}/completion")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConnectionConfig, Feature, resolve_connection};

    fn agent() -> AgentApi {
        let shared = ConnectionConfig::new()
            .with_base_url("https://dashscope.aliyuncs.com")
            .with_api_key("sk-test");
        let resolved =
            resolve_connection(&shared, &ConnectionConfig::new(), Feature::Agent).unwrap();
        AgentApi::new(DashScopeApi::new(&resolved, reqwest::Client::new()).unwrap())
    }

    #[test]
    fn test_completion_endpoint() {
        let endpoint = agent().completion_endpoint("app-123").unwrap();
        assert_eq!(
            endpoint,
            "https://dashscope.aliyuncs.com/api/v1/apps/app-123/completion"
        );
    }

    #[test]
    fn test_empty_app_id_is_rejected() {
        assert!(matches!(
            agent().completion_endpoint("  "),
            Err(DashScopeError::InvalidParameter(_))
        ));
    }
}
