use surrealdb::Surreal;
use surrealdb::engine::any::Any;

use crate::core::{Config, Result};
use crate::db::DbService;

/// 服务器状态 - 持有共享资源
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Any> | 数据库连接 (克隆即共享) |
///
/// # 使用示例
///
/// ```ignore
/// let repo = EmployeeRepository::new(state.get_db());
/// ```
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SurrealDB 连接
    pub db: Surreal<Any>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`ServerState::initialize`] 代替
    pub fn new(config: Config, db: Surreal<Any>) -> Self {
        Self { config, db }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 连接数据库并选择 namespace/database
    /// 2. 定义唯一索引
    /// 3. 校准员工编号序列
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db_service = DbService::new(config).await?;
        Ok(Self::new(config.clone(), db_service.db))
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Any> {
        self.db.clone()
    }
}
