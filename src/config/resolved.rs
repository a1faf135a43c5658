//! Connection resolution: shared defaults overridden by feature settings.
//!
//! [`resolve_connection`] is a pure function: no environment reads, no I/O,
//! no retained state. Callers may invoke it concurrently; identical inputs
//! always produce identical outputs.

use std::collections::HashMap;

use secrecy::{ExposeSecret, SecretString};

use super::connection::{ConnectionConfig, Feature};
use crate::defaults;
use crate::error::DashScopeError;

/// A validated, ready-to-use set of connection parameters for one feature.
///
/// Constructed only through [`resolve_connection`], which guarantees that
/// `base_url` and `api_key` are non-blank.
#[derive(Debug, Clone)]
pub struct ResolvedConnection {
    base_url: String,
    api_key: SecretString,
    workspace_id: Option<String>,
    headers: HashMap<String, Vec<String>>,
}

impl ResolvedConnection {
    /// The effective service endpoint
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The effective credential
    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    /// Authorization header value for this connection
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_key.expose_secret())
    }

    /// The effective workspace id, if one was configured
    pub fn workspace_id(&self) -> Option<&str> {
        self.workspace_id.as_deref()
    }

    /// Derived request headers.
    ///
    /// Contains `DashScope-Workspace` with a single value when a workspace id
    /// is configured; empty otherwise.
    pub fn headers(&self) -> &HashMap<String, Vec<String>> {
        &self.headers
    }
}

/// Resolve the effective connection for `feature`.
///
/// For each of `base_url`, `api_key` and `workspace_id` independently, the
/// feature value wins when it is set and non-blank; otherwise the shared
/// value applies. A feature can therefore override just its API key while
/// inheriting the shared base URL.
///
/// # Errors
///
/// Returns [`DashScopeError::ConfigurationError`] when the resolved
/// `base_url` (checked first) or `api_key` is missing or blank. The message
/// names both properties the caller could have set. The error is fatal and
/// non-retryable; the caller should abort wiring the feature.
pub fn resolve_connection(
    shared: &ConnectionConfig,
    specific: &ConnectionConfig,
    feature: Feature,
) -> Result<ResolvedConnection, DashScopeError> {
    let base_url = first_non_blank(specific.base_url.as_deref(), shared.base_url.as_deref());
    let api_key = first_non_blank(
        specific.api_key.as_ref().map(|k| k.expose_secret()),
        shared.api_key.as_ref().map(|k| k.expose_secret()),
    );
    let workspace_id = first_non_blank(
        specific.workspace_id.as_deref(),
        shared.workspace_id.as_deref(),
    );

    let Some(base_url) = base_url else {
        return Err(missing_property(feature, "base-url", "base URL"));
    };
    let Some(api_key) = api_key else {
        return Err(missing_property(feature, "api-key", "API key"));
    };

    let mut headers = HashMap::new();
    if let Some(workspace) = workspace_id {
        headers.insert(
            defaults::headers::WORKSPACE.to_string(),
            vec![workspace.to_string()],
        );
    }

    Ok(ResolvedConnection {
        base_url: base_url.to_string(),
        api_key: SecretString::from(api_key),
        workspace_id: workspace_id.map(str::to_string),
        headers,
    })
}

/// Pick the first value that is set and contains non-whitespace text
fn first_non_blank<'a>(specific: Option<&'a str>, shared: Option<&'a str>) -> Option<&'a str> {
    has_text(specific).or_else(|| has_text(shared))
}

fn has_text(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn missing_property(feature: Feature, field: &str, label: &str) -> DashScopeError {
    DashScopeError::ConfigurationError(format!(
        "DashScope {label} must be set for the {feature} feature. \
         Set the {shared} property or the {specific} property.",
        shared = Feature::shared_property(field),
        specific = feature.property(field),
    ))
}
