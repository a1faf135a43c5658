//! HTTP Headers Utility
//!
//! Common utilities for building the request headers attached to every
//! feature transport.

use crate::error::DashScopeError;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;

/// HTTP header builder for API requests
pub struct HttpHeaderBuilder {
    headers: HeaderMap,
}

impl HttpHeaderBuilder {
    /// Create a new header builder
    pub fn new() -> Self {
        Self {
            headers: HeaderMap::new(),
        }
    }

    /// Add Bearer token authorization.
    ///
    /// The value is marked sensitive so it stays redacted in debug output.
    pub fn with_bearer_auth(mut self, token: &str) -> Result<Self, DashScopeError> {
        let auth_value = format!("Bearer {token}");
        let mut value = HeaderValue::from_str(&auth_value).map_err(|e| {
            DashScopeError::ConfigurationError(format!("Invalid API key format: {e}"))
        })?;
        value.set_sensitive(true);
        self.headers.insert(AUTHORIZATION, value);
        Ok(self)
    }

    /// Add JSON content type
    pub fn with_json_content_type(mut self) -> Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self
    }

    /// Add a custom header
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, DashScopeError> {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            DashScopeError::ConfigurationError(format!("Invalid header name '{name}': {e}"))
        })?;
        self.headers.insert(
            header_name,
            HeaderValue::from_str(value).map_err(|e| {
                DashScopeError::ConfigurationError(format!("Invalid header value '{value}': {e}"))
            })?,
        );
        Ok(self)
    }

    /// Add multi-valued headers, appending each value under its name.
    ///
    /// This is the shape resolved connections produce; a single-element list
    /// becomes one header line.
    pub fn with_multi_headers(
        mut self,
        headers: &HashMap<String, Vec<String>>,
    ) -> Result<Self, DashScopeError> {
        for (name, values) in headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                DashScopeError::ConfigurationError(format!("Invalid header name '{name}': {e}"))
            })?;
            for value in values {
                let header_value = HeaderValue::from_str(value).map_err(|e| {
                    DashScopeError::ConfigurationError(format!(
                        "Invalid header value '{value}': {e}"
                    ))
                })?;
                self.headers.append(header_name.clone(), header_value);
            }
        }
        Ok(self)
    }

    /// Build the final HeaderMap
    pub fn build(self) -> HeaderMap {
        self.headers
    }
}

impl Default for HttpHeaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_builder() {
        let headers = HttpHeaderBuilder::new()
            .with_bearer_auth("test-token")
            .unwrap()
            .with_json_content_type()
            .with_header("DashScope-Workspace", "ws-1")
            .unwrap()
            .build();

        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer test-token");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(headers.get("DashScope-Workspace").unwrap(), "ws-1");
    }

    #[test]
    fn test_multi_headers_append_each_value() {
        let mut multi = HashMap::new();
        multi.insert(
            "X-Multi".to_string(),
            vec!["a".to_string(), "b".to_string()],
        );

        let headers = HttpHeaderBuilder::new()
            .with_multi_headers(&multi)
            .unwrap()
            .build();

        let values: Vec<_> = headers
            .get_all("X-Multi")
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect();
        assert_eq!(values, vec!["a", "b"]);
    }

    #[test]
    fn test_invalid_header_name_is_rejected() {
        let result = HttpHeaderBuilder::new().with_header("bad name", "v");
        assert!(matches!(result, Err(DashScopeError::ConfigurationError(_))));
    }
}
