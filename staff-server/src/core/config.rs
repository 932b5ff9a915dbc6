use super::error::ServerError;

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATABASE_URL | (必填) | SurrealDB 连接串: `rocksdb://path` / `mem://` / `ws://host:port` |
/// | DB_NAMESPACE | restaurant | SurrealDB namespace |
/// | DB_DATABASE | staff | SurrealDB database |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LEGACY_ROUTES | true | 是否同时挂载 `/persons` |
/// | STATIC_DIR | - | 静态文件目录 (作为 fallback) |
/// | LOG_LEVEL | info | 未设置 RUST_LOG 时的日志级别 |
/// | LOG_JSON | false | JSON 格式日志 |
/// | LOG_DIR | - | 按天滚动的日志目录 |
///
/// # 示例
///
/// ```ignore
/// DATABASE_URL=rocksdb://./data/staff.db HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 数据库连接串
    pub database_url: String,
    pub db_namespace: String,
    pub db_database: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 兼容旧客户端的 `/persons` 路由
    pub legacy_routes: bool,
    pub static_dir: Option<String>,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// `DATABASE_URL` 必填，其余使用默认值
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载配置
    pub fn from_lookup<F>(get: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = get("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ServerError::Config("DATABASE_URL must be set".into()))?;

        Ok(Self {
            database_url,
            db_namespace: get("DB_NAMESPACE").unwrap_or_else(|| "restaurant".into()),
            db_database: get("DB_DATABASE").unwrap_or_else(|| "staff".into()),
            http_port: get("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: get("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            legacy_routes: get("LEGACY_ROUTES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            static_dir: get("STATIC_DIR").filter(|v| !v.is_empty()),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: get("LOG_JSON")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: get("LOG_DIR").filter(|v| !v.is_empty()),
        })
    }

    /// 内存数据库配置
    ///
    /// 常用于测试场景
    pub fn in_memory() -> Self {
        Self {
            database_url: "mem://".into(),
            db_namespace: "restaurant".into(),
            db_database: "staff".into(),
            http_port: 0,
            environment: "test".into(),
            legacy_routes: true,
            static_dir: None,
            log_level: "debug".into(),
            log_json: false,
            log_dir: None,
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
