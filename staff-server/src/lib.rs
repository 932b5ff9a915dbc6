//! Staff Server - 餐厅员工档案服务
//!
//! # 架构概述
//!
//! - **数据库** (`db`): SurrealDB 文档存储 (内嵌 RocksDB / 内存 / 远程)
//! - **HTTP API** (`api`): 员工增删改查、筛选、统计、健康检查
//! - **服务** (`services`): 路由装配与中间件
//!
//! # 模块结构
//!
//! ```text
//! staff-server/src/
//! ├── core/          # 配置、状态、服务器、错误
//! ├── api/           # HTTP 路由和处理器
//! ├── services/      # 路由装配、中间件
//! ├── utils/         # 日志等工具
//! └── db/            # 数据库层 (模型、仓储、编号序列)
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use services::{build_app, build_router};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger;

pub fn print_banner() {
    println!(
        r#"
   _____ __        ________
  / ___// /_____ _/ __/ __/
  \__ \/ __/ __ `/ /_/ /_
 ___/ / /_/ /_/ / __/ __/
/____/\__/\__,_/_/ /_/
    "#
    );
}
