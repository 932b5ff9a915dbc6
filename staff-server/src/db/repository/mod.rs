//! Repository Module
//!
//! Provides CRUD operations for SurrealDB tables.

pub mod employee;
pub mod sequence;

// Re-exports
pub use employee::EmployeeRepository;
pub use sequence::SequenceRepository;

use rand::Rng;
use std::time::Duration;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use thiserror::Error;

use super::{EMAIL_INDEX, EMPLOYEE_ID_INDEX};

/// 唯一性冲突的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Email,
    EmployeeId,
}

impl UniqueField {
    pub fn as_str(&self) -> &'static str {
        match self {
            UniqueField::Email => "email",
            UniqueField::EmployeeId => "employeeId",
        }
    }
}

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    /// 记录 key
    #[error("Employee {0} not found")]
    NotFound(String),

    #[error("Duplicate {}: {value}", .field.as_str())]
    Duplicate { field: UniqueField, value: String },

    /// 乐观事务冲突，可整体重试
    #[error("Transaction conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl RepoError {
    /// 按错误文本归类
    ///
    /// 语句级错误会被包进 "The query was not executed ..." 之类的外层信息，
    /// 这里只能看文本。
    fn classify(message: String) -> Self {
        // 并发写入绕过预检查时，由唯一索引兜底
        if message.contains(EMAIL_INDEX) {
            return RepoError::Duplicate {
                field: UniqueField::Email,
                value: String::new(),
            };
        }
        if message.contains(EMPLOYEE_ID_INDEX) {
            return RepoError::Duplicate {
                field: UniqueField::EmployeeId,
                value: String::new(),
            };
        }
        if message.contains("can be retried") || message.contains("read or write conflict") {
            return RepoError::Conflict(message);
        }
        RepoError::Database(message)
    }

    /// 索引兜底得到的 Duplicate 不带值，用提交的值补上
    pub fn with_submitted(self, email: Option<&str>, employee_id: Option<&str>) -> Self {
        match self {
            RepoError::Duplicate { field, value } if value.is_empty() => {
                let submitted = match field {
                    UniqueField::Email => email,
                    UniqueField::EmployeeId => employee_id,
                };
                RepoError::Duplicate {
                    field,
                    value: submitted.unwrap_or_default().to_string(),
                }
            }
            other => other,
        }
    }
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::classify(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Maximum attempts for a write that keeps hitting transaction conflicts
const MAX_CONFLICT_RETRIES: u32 = 64;
/// Upper bound of the random delay between attempts
const CONFLICT_BACKOFF_CAP_MS: u64 = 20;

/// 遇到事务冲突时重试整个操作
///
/// 延迟在 `1..=min(2^attempt, 20)` 毫秒内随机，避免竞争者同步重撞。
pub async fn retry_on_conflict<T, F, Fut>(mut op: F) -> RepoResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = RepoResult<T>>,
{
    let mut attempt: u32 = 0;
    loop {
        match op().await {
            Err(RepoError::Conflict(_)) if attempt < MAX_CONFLICT_RETRIES => {
                attempt += 1;
                let cap = CONFLICT_BACKOFF_CAP_MS.min(1u64 << attempt.min(5));
                let delay_ms = rand::thread_rng().gen_range(1..=cap);
                tracing::debug!(attempt, delay_ms, "Transaction conflict, retrying");
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
            other => return other,
        }
    }
}

// =============================================================================
// ID Convention
// =============================================================================
//
// API 层只暴露记录的 key (不带表名)：
//   - 创建: RecordId::from_table_key("employee", key)
//   - 取 key: api::convert::record_key(&id)

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Any>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Any> {
        &self.db
    }
}
