//! 健康检查路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | / | GET | 纯文本欢迎信息 |
//! | /health | GET | 服务与数据库状态 |
//!
//! # 响应示例
//!
//! ```json
//! {
//!   "status": "OK",
//!   "timestamp": "2024-05-01T08:00:00Z",
//!   "database": "connected",
//!   "service": "staff-server"
//! }
//! ```
//!
//! 数据库不可用时仍返回 200，`status` 为 `DEGRADED`。

use axum::{Json, Router, extract::State, routing::get};
use chrono::Utc;
use shared::models::HealthStatus;

use crate::core::ServerState;
use crate::db::DbService;

const SERVICE_NAME: &str = "staff-server";

/// 健康检查路由 (公共路由)
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
}

/// 欢迎信息
pub async fn root() -> &'static str {
    "Restaurant Staff Management API is running"
}

/// 服务健康状态
pub async fn health(State(state): State<ServerState>) -> Json<HealthStatus> {
    let connected = DbService::is_healthy(&state.db).await;

    Json(HealthStatus {
        status: if connected { "OK" } else { "DEGRADED" }.to_string(),
        timestamp: Utc::now(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
        service: SERVICE_NAME.to_string(),
    })
}
