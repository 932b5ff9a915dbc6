//! Client configuration

use std::time::Duration;

/// 列表加载的重试策略
///
/// 仅网络类错误会重试，第 n 次重试前等待 `base_delay * n`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// 额外重试次数 (不含首次请求)
    pub max_retries: u32,
    /// 线性退避基数
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// 不重试
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// 第 `attempt` 次重试前的等待时间 (从 1 开始)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(2, Duration::from_secs(1))
    }
}

/// Client configuration for connecting to the staff server
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:3000")
    pub base_url: String,

    /// 员工资源路径，旧部署可用 `/persons`
    pub resource_path: String,

    /// Request timeout
    pub timeout: Duration,

    /// List-load retry policy
    pub retry: RetryPolicy,

    /// 成功提示的显示时长
    pub notification_ttl: Duration,

    /// 可自动关闭的错误横幅显示时长
    pub banner_ttl: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            resource_path: "/employees".to_string(),
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
            notification_ttl: Duration::from_secs(3),
            banner_ttl: Duration::from_secs(5),
        }
    }

    pub fn with_resource_path(mut self, path: impl Into<String>) -> Self {
        self.resource_path = path.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_notification_ttl(mut self, ttl: Duration) -> Self {
        self.notification_ttl = ttl;
        self
    }

    pub fn with_banner_ttl(mut self, ttl: Duration) -> Self {
        self.banner_ttl = ttl;
        self
    }

    /// Create a network HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::NetworkHttpClient> {
        crate::NetworkHttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:3000")
    }
}
