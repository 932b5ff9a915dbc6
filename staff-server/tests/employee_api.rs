//! 员工接口集成测试 (mem:// + oneshot)

mod common;

use common::*;
use http::StatusCode;
use serde_json::json;
use staff_server::Config;
use std::collections::HashSet;
use std::time::Duration;

#[tokio::test]
async fn test_create_assigns_defaults_and_sequence() {
    let app = test_app().await;

    let (status, body) = post(&app, "/employees", employee_body("Ana", "ana@example.com")).await;
    assert_eq!(status, StatusCode::CREATED);

    let saved = &body["Data saved"];
    assert!(!saved["id"].as_str().unwrap().is_empty());
    assert_eq!(saved["employeeId"], "EMP0001");
    assert_eq!(saved["status"], "active");
    assert_eq!(saved["shift"], "flexible");
    assert_eq!(saved["position"], "waiter");
    assert!(saved["hireDate"].is_string());
    assert!(saved["createdAt"].is_string());
}

#[tokio::test]
async fn test_sequential_employee_ids() {
    let app = test_app().await;

    let mut codes = Vec::new();
    for i in 1..=3 {
        let saved = create_employee(&app, employee_body("Emp", &format!("e{i}@example.com"))).await;
        codes.push(saved["employeeId"].as_str().unwrap().to_string());
    }
    assert_eq!(codes, vec!["EMP0001", "EMP0002", "EMP0003"]);
}

#[tokio::test]
async fn test_supplied_employee_id_is_kept() {
    let app = test_app().await;

    let mut body = employee_body("Ana", "ana@example.com");
    body["employeeId"] = json!("CHEF-01");
    let saved = create_employee(&app, body).await;
    assert_eq!(saved["employeeId"], "CHEF-01");

    // 重复的自定义编号
    let mut body = employee_body("Bo", "bo@example.com");
    body["employeeId"] = json!("CHEF-01");
    let (status, err) = post(&app, "/employees", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], 8007);
    assert_eq!(err["details"]["field"], "employeeId");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_all_succeed_with_unique_ids() {
    let app = test_app().await;
    const N: usize = 32;

    let mut handles = Vec::new();
    for i in 0..N {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            post(&app, "/employees", employee_body("Emp", &format!("c{i}@example.com"))).await
        }));
    }

    let mut codes = HashSet::new();
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
        let code = body["Data saved"]["employeeId"].as_str().unwrap().to_string();
        assert!(codes.insert(code.clone()), "duplicate employee id {code}");
    }

    let expected: HashSet<String> = (1..=N).map(|n| format!("EMP{n:04}")).collect();
    assert_eq!(codes, expected);

    let (_, list) = get(&app, "/employees").await;
    assert_eq!(list.as_array().unwrap().len(), N);
}

#[tokio::test]
async fn test_duplicate_email_rejected_and_nothing_written() {
    let app = test_app().await;
    create_employee(&app, employee_body("Ana", "ana@example.com")).await;

    let (status, err) = post(&app, "/employees", employee_body("Other", "ana@example.com")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], 8006);
    assert_eq!(err["details"]["field"], "email");
    assert_eq!(err["details"]["value"], "ana@example.com");

    let (_, list) = get(&app, "/employees").await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["name"], "Ana");
}

#[tokio::test]
async fn test_create_validation_errors() {
    let app = test_app().await;

    // 缺少字段：反序列化失败
    let (status, err) = post(&app, "/employees", json!({ "name": "Ana" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], 2);

    // 空字符串：校验失败
    let (status, err) = post(&app, "/employees", employee_body("", "ana@example.com")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], 2);
    assert!(err["message"].as_str().unwrap().contains("name: name is required"));
    assert_eq!(err["details"]["name"], "name is required");

    // 非法枚举
    let mut body = employee_body("Ana", "ana@example.com");
    body["position"] = json!("cashier");
    let (status, err) = post(&app, "/employees", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], 2);

    let (_, list) = get(&app, "/employees").await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_newest_first_and_filters() {
    let app = test_app().await;

    let mut chef = employee_body("Chef", "chef@example.com");
    chef["position"] = json!("chef");
    chef["shift"] = json!("morning");
    create_employee(&app, chef).await;
    tokio::time::sleep(Duration::from_millis(5)).await;

    let mut night = employee_body("Night", "night@example.com");
    night["shift"] = json!("night");
    night["status"] = json!("on-leave");
    create_employee(&app, night).await;
    tokio::time::sleep(Duration::from_millis(5)).await;

    create_employee(&app, employee_body("Day", "day@example.com")).await;

    let (status, list) = get(&app, "/employees").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Day", "Night", "Chef"]);

    let (_, list) = get(&app, "/employees?status=on-leave").await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["name"], "Night");

    let (_, list) = get(&app, "/employees?position=waiter&shift=flexible").await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["name"], "Day");

    // 空值等同于未过滤
    let (_, list) = get(&app, "/employees?status=").await;
    assert_eq!(list.as_array().unwrap().len(), 3);

    let (status, err) = get(&app, "/employees?shift=afternoon").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], 2);
}

#[tokio::test]
async fn test_list_by_position() {
    let app = test_app().await;

    let mut chef = employee_body("Chef", "chef@example.com");
    chef["position"] = json!("chef");
    create_employee(&app, chef).await;
    create_employee(&app, employee_body("Waiter", "waiter@example.com")).await;

    let (status, list) = get(&app, "/employees/chef").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["name"], "Chef");

    let (status, list) = get(&app, "/employees/bartender").await;
    assert_eq!(status, StatusCode::OK);
    assert!(list.as_array().unwrap().is_empty());

    let (status, err) = get(&app, "/employees/cashier").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err, json!({ "code": 2, "message": "Invalid position type" }));
}

#[tokio::test]
async fn test_update_employee() {
    let app = test_app().await;
    let ana = create_employee(&app, employee_body("Ana", "ana@example.com")).await;
    create_employee(&app, employee_body("Bo", "bo@example.com")).await;
    let id = ana["id"].as_str().unwrap();

    let (status, body) = put(
        &app,
        &format!("/employees/{id}"),
        json!({ "name": "Ana Maria", "salary": 3000, "email": "ana@example.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated = &body["Data updated"];
    assert_eq!(updated["name"], "Ana Maria");
    assert_eq!(updated["salary"], 3000.0);
    assert_eq!(updated["employeeId"], "EMP0001");
    assert_eq!(updated["mobile"], "555-0100");

    // 邮箱与其他员工冲突
    let (status, err) = put(&app, &format!("/employees/{id}"), json!({ "email": "bo@example.com" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], 8006);

    let (status, err) = put(&app, &format!("/employees/{id}"), json!({ "name": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], 2);

    let (_, before) = get(&app, "/employees").await;

    let (status, err) = put(&app, "/employees/missing", json!({ "name": "X" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["code"], 8001);
    assert_eq!(err["details"]["id"], "missing");

    let (_, after) = get(&app, "/employees").await;
    assert_eq!(after.as_array().unwrap().len(), 2);
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_patch_status() {
    let app = test_app().await;
    let ana = create_employee(&app, employee_body("Ana", "ana@example.com")).await;
    let id = ana["id"].as_str().unwrap();

    let (status, body) = patch(&app, &format!("/employees/{id}/status"), json!({ "status": "on-leave" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "on-leave");
    assert_eq!(body["name"], "Ana");
    assert!(body.get("Data updated").is_none());

    let (status, err) = patch(&app, &format!("/employees/{id}/status"), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], 7);
    assert_eq!(err["details"]["field"], "status");

    let (status, err) = patch(&app, &format!("/employees/{id}/status"), json!({ "status": "retired" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], 2);

    let (status, err) = patch(&app, "/employees/missing/status", json!({ "status": "active" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["code"], 8001);
}

#[tokio::test]
async fn test_delete_twice() {
    let app = test_app().await;
    let ana = create_employee(&app, employee_body("Ana", "ana@example.com")).await;
    let id = ana["id"].as_str().unwrap();

    let (status, body) = delete(&app, &format!("/employees/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Data deleted successfully"]["email"], "ana@example.com");

    let (status, err) = delete(&app, &format!("/employees/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["code"], 8001);

    let (_, list) = get(&app, "/employees").await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_stats_summary_counts_active_only() {
    let app = test_app().await;

    let (status, stats) = get(&app, "/employees/stats/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats, json!({ "totalEmployees": 0, "byPosition": [], "byShift": [] }));

    let mut chef = employee_body("Chef", "chef@example.com");
    chef["position"] = json!("chef");
    chef["shift"] = json!("morning");
    create_employee(&app, chef).await;
    create_employee(&app, employee_body("W1", "w1@example.com")).await;
    create_employee(&app, employee_body("W2", "w2@example.com")).await;
    let mut gone = employee_body("Gone", "gone@example.com");
    gone["status"] = json!("terminated");
    create_employee(&app, gone).await;

    let (_, stats) = get(&app, "/employees/stats/summary").await;
    assert_eq!(stats["totalEmployees"], 3);
    assert_eq!(
        stats["byPosition"],
        json!([{ "_id": "chef", "count": 1 }, { "_id": "waiter", "count": 2 }])
    );
    assert_eq!(
        stats["byShift"],
        json!([{ "_id": "flexible", "count": 2 }, { "_id": "morning", "count": 1 }])
    );
}

#[tokio::test]
async fn test_legacy_persons_routes() {
    let app = test_app().await;

    let (status, body) = post(&app, "/persons", employee_body("Ana", "ana@example.com")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["Data saved"]["employeeId"], "EMP0001");

    let (_, list) = get(&app, "/employees").await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let config = Config {
        legacy_routes: false,
        ..Config::in_memory()
    };
    let app = test_app_with(config).await;
    let (status, _) = get(&app, "/persons").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_and_root() {
    let app = test_app().await;

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["service"], "staff-server");
    assert!(body["timestamp"].is_string());

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_str().unwrap().contains("running"));
}

#[tokio::test]
async fn test_static_dir_fallback() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>Staff</h1>").unwrap();

    let config = Config {
        static_dir: Some(dir.path().to_string_lossy().into_owned()),
        ..Config::in_memory()
    };
    let app = test_app_with(config).await;

    let (status, body) = get(&app, "/index.html").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("<h1>Staff</h1>"));

    // API 路由优先于静态文件
    let (status, body) = get(&app, "/employees").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_array());
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    use axum::body::Body;
    use http::Request;
    use tower::ServiceExt;

    let app = test_app().await;
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));

    let app = test_app().await;
    let response = app
        .oneshot(
            Request::get("/health")
                .header("x-request-id", "abc-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "abc-123");
}
