//! 访问日志中间件
//!
//! 每个请求结束时输出一条事件，级别由状态码决定。

use axum::{
    extract::{MatchedPath, Request},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::Level;

/// 同一组字段按运行时级别输出 (tracing 的级别必须是常量)
macro_rules! event_at {
    ($level:expr, $($fields:tt)+) => {
        match $level {
            Level::ERROR => tracing::error!($($fields)+),
            Level::WARN => tracing::warn!($($fields)+),
            _ => tracing::info!($($fields)+),
        }
    };
}

/// 5xx 为 error，4xx 为 warn，其余 info
fn outcome(status: StatusCode) -> (Level, &'static str) {
    if status.is_server_error() {
        (Level::ERROR, "server_error")
    } else if status.is_client_error() {
        (Level::WARN, "client_error")
    } else {
        (Level::INFO, "ok")
    }
}

/// 记录请求 ID (由 SetRequestId 层生成)、方法、路由模板、状态码和耗时
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let response = next.run(req).await;

    let status = response.status();
    let (level, label) = outcome(status);
    event_at!(
        level,
        request_id = %request_id,
        method = %method,
        route = %route,
        status = status.as_u16(),
        outcome = label,
        latency_ms = start.elapsed().as_millis() as u64,
        "Request completed"
    );

    response
}
