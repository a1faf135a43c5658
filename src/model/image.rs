//! Image synthesis feature: options and the wired handle.
//!
//! Image synthesis is asynchronous on the service side: a submission returns
//! a task id which is then polled on the shared task endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::DashScopeApi;
use crate::defaults;
use crate::error::DashScopeError;
use crate::retry::RetryPolicy;

/// Image synthesis options (`dashscope.image.options.*`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "kebab-case")]
pub struct ImageOptions {
    /// Model name
    pub model: String,

    /// Number of images to generate per request
    #[validate(range(min = 1, max = 4))]
    pub n: Option<u32>,

    /// Output resolution, e.g. `1024*1024`
    pub size: Option<String>,

    /// Style preset, e.g. `<watercolor>`
    pub style: Option<String>,

    /// Random seed
    pub seed: Option<u64>,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            model: defaults::models::IMAGE.to_string(),
            n: None,
            size: None,
            style: None,
            seed: None,
        }
    }
}

impl ImageOptions {
    /// Create options for a specific model
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = model.into();
        self
    }

    /// Set the number of images per request
    pub const fn with_n(mut self, n: u32) -> Self {
        self.n = Some(n);
        self
    }

    /// Set the output resolution
    pub fn with_size<S: Into<String>>(mut self, size: S) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Validate option ranges
    pub fn validate_options(&self) -> Result<(), DashScopeError> {
        self.validate()
            .map_err(|e| DashScopeError::InvalidParameter(e.to_string()))?;
        if self.model.trim().is_empty() {
            return Err(DashScopeError::InvalidParameter(
                "Image model name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Ready-to-use image synthesis handle
#[derive(Debug, Clone)]
pub struct ImageModel {
    api: DashScopeApi,
    options: ImageOptions,
    retry_policy: RetryPolicy,
}

impl ImageModel {
    /// Assemble an image handle from its wired parts
    pub fn new(api: DashScopeApi, options: ImageOptions, retry_policy: RetryPolicy) -> Self {
        Self {
            api,
            options,
            retry_policy,
        }
    }

    /// The transport behind this handle
    pub fn api(&self) -> &DashScopeApi {
        &self.api
    }

    /// The configured image options
    pub fn options(&self) -> &ImageOptions {
        &self.options
    }

    /// The retry policy requests should honor
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Full URL of the synthesis submission endpoint
    pub fn synthesis_endpoint(&self) -> String {
        self.api.endpoint(defaults::paths::IMAGE_SYNTHESIS)
    }

    /// Full URL for polling a submitted task
    pub fn task_endpoint(&self, task_id: &str) -> String {
        format!("{}/{task_id}", self.api.endpoint(defaults::paths::TASKS))
    }
}
