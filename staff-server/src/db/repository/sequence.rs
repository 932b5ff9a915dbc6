//! Employee number sequence
//!
//! 单文档 `sequence:employee` 上的原子自增，替代 "count + 1" 的做法。
//! 并发自增在提交时冲突，由 [`retry_on_conflict`] 重新执行。
//! 插入失败会留下空号，但不会产生重复编号。

use super::{BaseRepository, RepoError, RepoResult, retry_on_conflict};
use crate::db::models::SequenceRow;
use surrealdb::engine::any::Any;
use surrealdb::{RecordId, Surreal};

const SEQUENCE_TABLE: &str = "sequence";
const EMPLOYEE_SEQUENCE: &str = "employee";

/// 编号前缀
pub const EMPLOYEE_ID_PREFIX: &str = "EMP";

/// `EMP` + 至少 4 位补零
pub fn format_employee_id(n: i64) -> String {
    format!("{EMPLOYEE_ID_PREFIX}{n:04}")
}

/// 解析 `EMP0042` 形式的编号，其它格式返回 None
pub fn parse_employee_id(raw: &str) -> Option<i64> {
    let digits = raw.strip_prefix(EMPLOYEE_ID_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[derive(Clone)]
pub struct SequenceRepository {
    base: BaseRepository,
}

impl SequenceRepository {
    pub fn new(db: Surreal<Any>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn record() -> RecordId {
        RecordId::from_table_key(SEQUENCE_TABLE, EMPLOYEE_SEQUENCE)
    }

    /// Current value, 0 when the sequence has never been used
    pub async fn current(&self) -> RepoResult<i64> {
        let row: Option<SequenceRow> = self.base.db().select(Self::record()).await?;
        Ok(row.map(|r| r.value).unwrap_or(0))
    }

    /// 原子分配下一个编号
    pub async fn next_value(&self) -> RepoResult<i64> {
        retry_on_conflict(|| self.advance()).await
    }

    async fn advance(&self) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("UPSERT $seq SET value = (value OR 0) + 1 RETURN AFTER")
            .bind(("seq", Self::record()))
            .await?;
        let row: Option<SequenceRow> = result.take(0)?;
        row.map(|r| r.value)
            .ok_or_else(|| RepoError::Database("Failed to advance employee sequence".to_string()))
    }

    pub async fn next_employee_id(&self) -> RepoResult<String> {
        self.next_value().await.map(format_employee_id)
    }

    /// 序列不存在时，按现有数据初始化
    ///
    /// 取 "文档数" 与 "已有 EMPxxxx 最大号" 的较大者，保证后续分配不撞号。
    pub async fn ensure_seeded(&self) -> RepoResult<i64> {
        let existing: Option<SequenceRow> = self.base.db().select(Self::record()).await?;
        if let Some(row) = existing {
            return Ok(row.value);
        }

        let ids: Vec<Option<String>> = self
            .base
            .db()
            .query("SELECT VALUE employee_id FROM employee")
            .await?
            .take(0)?;

        let count = ids.len() as i64;
        let highest = ids
            .iter()
            .flatten()
            .filter_map(|id| parse_employee_id(id))
            .max()
            .unwrap_or(0);
        let start = count.max(highest);

        self.base
            .db()
            .query("UPSERT $seq SET value = $start")
            .bind(("seq", Self::record()))
            .bind(("start", start))
            .await?
            .check()?;

        tracing::debug!(count, highest, start, "Seeded employee sequence");
        Ok(start)
    }
}
