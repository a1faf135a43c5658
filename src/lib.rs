//! # DashScope Bootstrap
//!
//! Configuration-first bootstrap for Alibaba Cloud's DashScope (Model Studio)
//! services. The crate turns a declarative configuration tree into wired,
//! ready-to-use feature handles: chat, embedding, image synthesis, agent
//! applications, speech synthesis and audio transcription.
//!
#![deny(unsafe_code)]
//!
//! ## What it does
//!
//! - **Per-feature connection resolution**: every feature resolves its own
//!   base URL, API key and workspace id, preferring its section over the
//!   shared one field by field.
//! - **Fail-fast validation**: a missing credential aborts the build with an
//!   error naming the exact properties to set, instead of surfacing as an
//!   authentication failure on the first call.
//! - **Workspace scoping**: a configured workspace id becomes the
//!   `DashScope-Workspace` header on every request.
//! - **Feature toggles**: each feature is on by default and can be switched
//!   off without touching the rest of the configuration.
//! - **Shared plumbing**: one HTTP client, one retry policy, reused by every
//!   handle that needs them.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use dashscope::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads DASHSCOPE_API_KEY and wires every feature.
//!     let client = DashScope::from_env()?;
//!
//!     if let Some(chat) = client.chat() {
//!         println!("model:    {}", chat.options().model);
//!         println!("endpoint: {}", chat.generation_endpoint());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Configured explicitly
//!
//! ```rust,no_run
//! use dashscope::{DashScope, Feature};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DashScope::builder()
//!         .api_key("sk-your-key")
//!         .workspace_id("ws-main")
//!         .with_feature(Feature::Image, false)
//!         .build()?;
//!
//!     assert!(client.image().is_none());
//!     assert!(client.embedding().is_some());
//!     Ok(())
//! }
//! ```
//!
//! Configuration can also be deserialized as a whole -- the entire tree under
//! the `dashscope.` namespace maps onto [`DashScopeConfig`] with kebab-case
//! keys, so `dashscope.embedding.api-key` overrides the shared key for the
//! embedding feature only.

pub mod api;
pub mod builder;
pub mod client;
pub mod config;
pub mod defaults;
pub mod error;
pub mod http;
pub mod model;
pub mod retry;

pub use api::DashScopeApi;
pub use builder::DashScopeBuilder;
pub use client::DashScope;
pub use config::{
    ConnectionConfig, DashScopeConfig, Feature, HttpConfig, ResolvedConnection, resolve_connection,
};
pub use error::{DashScopeError, ErrorCategory};
pub use retry::{RetryExecutor, RetryPolicy};

/// Convenient pre-import module
pub mod prelude {
    pub use crate::builder::DashScopeBuilder;
    pub use crate::client::DashScope;
    pub use crate::config::{
        ConnectionConfig, DashScopeConfig, Feature, HttpConfig, HttpConfigBuilder,
        ResolvedConnection, resolve_connection,
    };
    pub use crate::error::{DashScopeError, ErrorCategory};
    pub use crate::model::{
        AgentApi, AudioFormat, ChatModel, ChatOptions, EmbeddingModel, EmbeddingOptions,
        ImageModel, ImageOptions, SpeechOptions, SpeechSynthesisModel, TextType,
        TranscriptionModel, TranscriptionOptions,
    };
    pub use crate::retry::{RetryExecutor, RetryPolicy, exponential_backoff, retry_with_backoff};

    // Reading a resolved API key requires the secrecy trait in scope.
    pub use secrecy::ExposeSecret;
}
