//! Staff Client - 员工管理客户端
//!
//! - [`client`] - HTTP 传输 (网络 / 进程内)
//! - [`api`] - 类型化的员工接口
//! - [`state`] - 前端状态：`AppState` + `Action` 归约，`EmployeeManager` 负责 I/O

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod state;

pub use api::EmployeeApi;
pub use client::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use client::OneshotHttpClient;
pub use config::{ClientConfig, RetryPolicy};
pub use error::{ClientError, ClientResult};
pub use state::{Action, AppState, EmployeeManager};

// Re-export shared types for convenience
pub use shared::models::{Employee, EmployeeStatus, Position, Shift};
