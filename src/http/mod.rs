//! HTTP execution support: client construction and header assembly.

pub mod client;
pub mod headers;

pub use client::build_http_client_from_config;
pub use headers::HttpHeaderBuilder;
