//! 服务层 - 路由装配与中间件
//!
//! - [`build_app`] - 所有 API 路由 (未绑定状态)
//! - [`build_router`] - 绑定状态并挂载中间件，可直接 serve 或 oneshot
//! - [`logging`] - 请求日志中间件

pub mod app;
pub mod logging;

pub use app::{build_app, build_router};
