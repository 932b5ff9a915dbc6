//! Employee API Module
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | / | GET | 列表 (可选 status/position/shift 过滤) |
//! | / | POST | 新建 |
//! | /stats/summary | GET | 在职员工统计 |
//! | /{positionType} | GET | 按岗位列出 |
//! | /{id} | PUT | 更新 |
//! | /{id} | DELETE | 删除 |
//! | /{id}/status | PATCH | 仅更新状态 |
//!
//! `GET /{x}` 与 `PUT/DELETE /{id}` 共用同一个路径参数，GET 把它当作岗位。

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

/// Employee router
///
/// `legacy` 为 true 时额外挂载 `/persons`
pub fn router(legacy: bool) -> Router<ServerState> {
    let router = Router::new().nest("/employees", routes());
    if legacy {
        router.nest("/persons", routes())
    } else {
        router
    }
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/stats/summary", get(handler::stats))
        .route(
            "/{id}",
            get(handler::list_by_position)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/status", patch(handler::update_status))
}
