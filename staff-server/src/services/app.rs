use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::logging::logging_middleware;
use crate::core::ServerState;

/// Build the Axum router (without state)
///
/// `legacy_routes` 为 true 时员工接口同时挂在 `/persons`
pub fn build_app(legacy_routes: bool) -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(crate::api::health::router())
        .merge(crate::api::employees::router(legacy_routes))
}

/// Build the full router: state, static files, middleware
///
/// 返回的 Router 既可交给 `axum::serve`，也可在进程内 `oneshot` 调用
pub fn build_router(state: ServerState) -> Router {
    let mut app = build_app(state.config.legacy_routes);

    if let Some(dir) = state.config.static_dir.as_deref() {
        tracing::info!(dir = %dir, "Serving static files");
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(middleware::from_fn(logging_middleware))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
