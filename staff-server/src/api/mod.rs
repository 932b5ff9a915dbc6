//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查和欢迎信息
//! - [`employees`] - 员工管理接口 (`/employees`，可选 `/persons`)
//! - [`convert`] - 数据库模型与错误的转换
//! - [`extract`] - 统一拒绝格式的请求体提取器

pub mod convert;
pub mod extract;

pub mod employees;
pub mod health;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
