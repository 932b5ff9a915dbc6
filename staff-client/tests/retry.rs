//! 列表加载重试 (脚本化传输 + 暂停时钟)

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use staff_client::state::manager::CONNECT_FAILED_BANNER;
use staff_client::{ClientConfig, ClientError, ClientResult, EmployeeManager, HttpClient};
use tokio::time::Instant;

enum Step {
    Network,
    Api(u16, &'static str),
    Ok(Value),
}

/// 按脚本依次返回结果的传输
#[derive(Default)]
struct ScriptedClient {
    steps: Mutex<VecDeque<Step>>,
    calls: AtomicUsize,
}

impl ScriptedClient {
    fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next<T: DeserializeOwned>(&self) -> ClientResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self
            .steps
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Step::Network);
        match step {
            Step::Network => Err(ClientError::Network("connection refused".into())),
            Step::Api(code, message) => Err(ClientError::Api {
                code,
                message: message.into(),
                details: None,
            }),
            Step::Ok(value) => Ok(serde_json::from_value(value)?),
        }
    }
}

#[async_trait]
impl HttpClient for ScriptedClient {
    async fn get<T: DeserializeOwned>(&self, _path: &str) -> ClientResult<T> {
        self.next()
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        _path: &str,
        _body: &B,
    ) -> ClientResult<T> {
        self.next()
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        _path: &str,
        _body: &B,
    ) -> ClientResult<T> {
        self.next()
    }

    async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        _path: &str,
        _body: &B,
    ) -> ClientResult<T> {
        self.next()
    }

    async fn delete<T: DeserializeOwned>(&self, _path: &str) -> ClientResult<T> {
        self.next()
    }
}

fn health() -> Value {
    json!({
        "status": "OK",
        "timestamp": "2024-05-01T08:00:00Z",
        "database": "connected",
        "service": "staff-server"
    })
}

#[tokio::test(start_paused = true)]
async fn test_network_errors_retry_with_linear_backoff() {
    let client = ScriptedClient::new(vec![Step::Network, Step::Network, Step::Ok(json!([]))]);
    let mut manager = EmployeeManager::new(client, ClientConfig::default());

    let started = Instant::now();
    manager.load_employees().await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(manager.api().http().calls(), 3);
    assert!(elapsed >= Duration::from_secs(3), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_secs(4), "elapsed {elapsed:?}");
    assert!(!manager.state().is_loading);
    assert!(manager.state().banner.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_retries_exhausted_shows_persistent_banner() {
    let client = ScriptedClient::new(vec![]);
    let mut manager = EmployeeManager::new(client, ClientConfig::default());

    let err = manager.load_employees().await.unwrap_err();
    assert!(err.is_network());
    assert_eq!(manager.api().http().calls(), 3);

    let state = manager.state();
    assert!(!state.is_loading);
    let banner = state.banner.as_ref().unwrap();
    assert_eq!(
        banner.message,
        "Failed to load employees: Unable to connect to the server. Please check if the backend is running."
    );
    assert!(banner.expires_at.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_http_errors_are_not_retried() {
    let client = ScriptedClient::new(vec![Step::Api(9002, "disk full")]);
    let mut manager = EmployeeManager::new(client, ClientConfig::default());

    manager.load_employees().await.unwrap_err();
    assert_eq!(manager.api().http().calls(), 1);
    assert_eq!(
        manager.state().banner_message(),
        Some("Failed to load employees: disk full")
    );
}

#[tokio::test(start_paused = true)]
async fn test_initialize_failure_banner() {
    let client = ScriptedClient::new(vec![Step::Network]);
    let mut manager = EmployeeManager::new(client, ClientConfig::default());

    manager.initialize().await.unwrap_err();
    assert_eq!(manager.api().http().calls(), 1);
    assert_eq!(manager.state().banner_message(), Some(CONNECT_FAILED_BANNER));

    // 健康检查通过，但列表加载失败
    let client = ScriptedClient::new(vec![Step::Ok(health()), Step::Api(9002, "boom")]);
    let mut manager = EmployeeManager::new(client, ClientConfig::default());

    manager.initialize().await.unwrap_err();
    assert_eq!(manager.state().banner_message(), Some(CONNECT_FAILED_BANNER));
    assert!(!manager.state().is_loading);
}

#[tokio::test(start_paused = true)]
async fn test_initialize_loads_list() {
    let client = ScriptedClient::new(vec![Step::Ok(health()), Step::Ok(json!([]))]);
    let mut manager = EmployeeManager::new(client, ClientConfig::default());

    manager.initialize().await.unwrap();
    assert!(manager.state().banner.is_none());
    assert!(manager.state().employees.is_empty());
}
