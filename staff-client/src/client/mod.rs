//! Client module - HTTP transports.
//!
//! - [`NetworkHttpClient`] - reqwest over the network
//! - [`OneshotHttpClient`] - in-process calls into an axum Router (`in-process` feature)

pub mod http;
#[cfg(feature = "in-process")]
pub mod http_oneshot;

pub use http::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use http_oneshot::OneshotHttpClient;
