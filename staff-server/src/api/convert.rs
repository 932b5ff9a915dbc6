//! 类型转换模块
//!
//! - 数据库模型 (db::models) 转换为 API 响应模型 (shared::models)
//! - 仓储错误 (RepoError) 转换为 API 错误 (AppError)

use crate::db::models as db;
use crate::db::repository::{RepoError, UniqueField};
use crate::utils::AppError;
use shared::models as api;
use shared::util::millis_to_datetime;

// ============ Helper ============

/// 只暴露记录 key，不带表名
///
/// 员工记录的 key 都是字符串；其它类型的 key 退回完整的 `table:key` 形式。
pub fn record_key(id: &surrealdb::RecordId) -> String {
    String::try_from(id.key().clone()).unwrap_or_else(|_| id.to_string())
}

fn corrupt(field: &str, err: impl std::fmt::Display) -> AppError {
    AppError::database(format!("Corrupt employee record ({field}): {err}"))
}

// ============ Employee ============

impl TryFrom<db::Employee> for api::Employee {
    type Error = AppError;

    fn try_from(e: db::Employee) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record_key(&e.id),
            employee_id: e.employee_id,
            name: e.name,
            age: e.age,
            position: e.position.parse().map_err(|err| corrupt("position", err))?,
            mobile: e.mobile,
            email: e.email,
            address: e.address,
            salary: e.salary,
            hire_date: millis_to_datetime(e.hire_date),
            status: e.status.parse().map_err(|err| corrupt("status", err))?,
            shift: e.shift.parse().map_err(|err| corrupt("shift", err))?,
            emergency_contact: e.emergency_contact,
            created_at: millis_to_datetime(e.created_at),
            updated_at: millis_to_datetime(e.updated_at),
        })
    }
}

pub fn employees_to_api(records: Vec<db::Employee>) -> Result<Vec<api::Employee>, AppError> {
    records.into_iter().map(api::Employee::try_from).collect()
}

// ============ Errors ============

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(id) => AppError::employee_not_found(id),
            RepoError::Duplicate {
                field: UniqueField::Email,
                value,
            } => AppError::email_exists(value),
            RepoError::Duplicate {
                field: UniqueField::EmployeeId,
                value,
            } => AppError::employee_id_exists(value),
            RepoError::Conflict(msg) | RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;
    use shared::models::{EmployeeStatus, Position, Shift};
    use surrealdb::RecordId;

    fn record() -> db::Employee {
        db::Employee {
            id: RecordId::from_table_key("employee", "abc123"),
            employee_id: Some("EMP0001".into()),
            name: "Ana".into(),
            age: 30,
            position: "chef".into(),
            mobile: "555".into(),
            email: "ana@example.com".into(),
            address: "1 Main St".into(),
            salary: 1000.0,
            hire_date: 1_700_000_000_000,
            status: "on-leave".into(),
            shift: "night".into(),
            emergency_contact: None,
            created_at: 1_700_000_000_000,
            updated_at: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_employee_conversion() {
        let api: api::Employee = record().try_into().unwrap();
        assert_eq!(api.id, "abc123");
        assert_eq!(api.position, Position::Chef);
        assert_eq!(api.status, EmployeeStatus::OnLeave);
        assert_eq!(api.shift, Shift::Night);
        assert_eq!(api.hire_date.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_corrupt_enum_is_database_error() {
        let mut rec = record();
        rec.position = "cashier".into();
        let err = api::Employee::try_from(rec).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn test_record_key() {
        let id = RecordId::from_table_key("employee", "k9x2");
        assert_eq!(record_key(&id), "k9x2");

        let id = RecordId::from_table_key("employee", "with space");
        assert_eq!(record_key(&id), "with space");
    }

    #[test]
    fn test_repo_error_mapping() {
        let err: AppError = RepoError::NotFound("x".into()).into();
        assert_eq!(err.code, ErrorCode::EmployeeNotFound);
        assert_eq!(err.message, "Employee not found");
        assert_eq!(err.details.unwrap()["id"], "x");

        let err: AppError = RepoError::Duplicate {
            field: UniqueField::Email,
            value: "a@b.co".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::EmployeeEmailExists);

        let err: AppError = RepoError::Database("disk".into()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "disk");
    }
}
