//! Data models
//!
//! Shared between staff-server and staff-client (via API).

pub mod employee;

// Re-exports
pub use employee::*;
