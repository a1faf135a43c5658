//! Feature model handles and their option types.
//!
//! Each submodule pairs an options struct (deserialized from the
//! `dashscope.<feature>.options` section) with the handle the builder wires
//! up for that feature. Handles are thin: they carry the shared transport,
//! validated options and, where the feature retries, a retry policy.

pub mod agent;
pub mod chat;
pub mod embedding;
pub mod image;
pub mod speech;
pub mod transcription;

pub use agent::AgentApi;
pub use chat::{ChatModel, ChatOptions};
pub use embedding::{EmbeddingModel, EmbeddingOptions, TextType};
pub use image::{ImageModel, ImageOptions};
pub use speech::{AudioFormat, SpeechOptions, SpeechSynthesisModel};
pub use transcription::{TranscriptionModel, TranscriptionOptions};
