//! Shared types for the staff management workspace
//!
//! Types used by both `staff-server` and `staff-client`: the employee
//! data model, its enumerations, the write envelopes, and the unified
//! error system.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
