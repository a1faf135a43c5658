//! Default Configuration Values
//!
//! This module centralizes all default values used throughout the crate.
//! Having defaults in one place makes them easier to maintain, document, and
//! adjust.

use std::time::Duration;

/// Default base URL for the DashScope service
pub const BASE_URL: &str = "https://dashscope.aliyuncs.com";

/// Environment variable names consulted by the builder
pub mod env {
    /// API key environment variable.
    ///
    /// Consulted only when neither a feature-specific nor the shared
    /// `api-key` property is set; see the builder documentation for the
    /// full precedence order.
    pub const API_KEY: &str = "DASHSCOPE_API_KEY";
}

/// Header names derived from resolved connections
pub mod headers {
    /// Workspace/tenant scoping header, attached only when a workspace id
    /// is configured.
    pub const WORKSPACE: &str = "DashScope-Workspace";
}

/// HTTP client default configurations
pub mod http {
    use super::*;

    /// Default request timeout for HTTP requests
    ///
    /// Set to 60 seconds to accommodate generation requests that may take
    /// 10-20 seconds to respond, plus network latency and proxy delays.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    /// Default connection timeout for establishing HTTP connections
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Default User-Agent string for HTTP requests
    pub const USER_AGENT: &str = concat!("dashscope/", env!("CARGO_PKG_VERSION"));
}

/// Service endpoint paths, joined onto the resolved base URL
pub mod paths {
    /// Text generation (chat) endpoint
    pub const TEXT_GENERATION: &str = "/api/v1/services/aigc/text-generation/generation";

    /// Multimodal generation endpoint
    pub const MULTIMODAL_GENERATION: &str = "/api/v1/services/aigc/multimodal-generation/generation";

    /// Text embedding endpoint
    pub const TEXT_EMBEDDING: &str = "/api/v1/services/embeddings/text-embedding/text-embedding";

    /// Image synthesis endpoint (asynchronous task submission)
    pub const IMAGE_SYNTHESIS: &str = "/api/v1/services/aigc/text2image/image-synthesis";

    /// Asynchronous task query prefix; append `/{task_id}`
    pub const TASKS: &str = "/api/v1/tasks";

    /// Audio transcription endpoint (asynchronous)
    pub const TRANSCRIPTION: &str = "/api/v1/services/audio/asr/transcription";

    /// Websocket inference endpoint used by speech synthesis
    pub const WEBSOCKET_INFERENCE: &str = "/api-ws/v1/inference";
}

/// Default model names per feature
pub mod models {
    /// Default chat model
    pub const CHAT: &str = "qwen-plus";

    /// Default text embedding model
    pub const EMBEDDING: &str = "text-embedding-v1";

    /// Default image synthesis model
    pub const IMAGE: &str = "wanx-v1";

    /// Default speech synthesis model (the voice is part of the model name)
    pub const SPEECH: &str = "sambert-zhichu-v1";

    /// Default audio transcription model
    pub const TRANSCRIPTION: &str = "paraformer-v2";
}

/// Retry defaults
pub mod retry {
    use super::*;

    /// Default maximum number of attempts (first call + retries)
    pub const MAX_ATTEMPTS: u32 = 3;

    /// Default base delay for exponential backoff
    pub const INITIAL_DELAY: Duration = Duration::from_millis(1000);

    /// Default maximum delay between attempts
    pub const MAX_DELAY: Duration = Duration::from_secs(30);

    /// Default jitter factor for retry delays (0.0 to 1.0)
    pub const JITTER: f64 = 0.1;
}
