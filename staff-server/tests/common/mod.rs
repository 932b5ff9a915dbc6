//! 集成测试公共工具：内存数据库 + 进程内 oneshot 调用

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use staff_server::{Config, ServerState, build_router};
use tower::ServiceExt;

/// 每次调用都是一个全新的 mem:// 数据库
pub async fn test_app() -> Router {
    test_app_with(Config::in_memory()).await
}

pub async fn test_app_with(config: Config) -> Router {
    let state = ServerState::initialize(&config)
        .await
        .expect("initialize in-memory server state");
    build_router(state)
}

/// 发送请求，返回状态码与 JSON 体 (非 JSON 体返回字符串)
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}

/// 合法的新建员工请求体
pub fn employee_body(name: &str, email: &str) -> Value {
    json!({
        "name": name,
        "age": 30,
        "position": "waiter",
        "mobile": "555-0100",
        "email": email,
        "address": "1 Main St",
        "salary": 2500.0
    })
}

/// 新建员工，返回保存后的记录
pub async fn create_employee(app: &Router, body: Value) -> Value {
    let (status, value) = post(app, "/employees", body).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {value}");
    value["Data saved"].clone()
}
