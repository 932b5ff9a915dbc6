//! Employee Model

use serde::{Deserialize, Serialize};
use shared::models::EmergencyContact;
use surrealdb::RecordId;

/// Employee ID type
pub type EmployeeId = RecordId;

/// Employee model matching SurrealDB schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    #[serde(default)]
    pub employee_id: Option<String>,
    pub name: String,
    pub age: i64,
    pub position: String,
    pub mobile: String,
    pub email: String,
    pub address: String,
    pub salary: f64,
    /// 入职时间 (毫秒)
    pub hire_date: i64,
    pub status: String,
    pub shift: String,
    #[serde(default)]
    pub emergency_contact: Option<EmergencyContact>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Full document written by `CREATE employee CONTENT $data`
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeContent {
    pub employee_id: String,
    pub name: String,
    pub age: i64,
    pub position: String,
    pub mobile: String,
    pub email: String,
    pub address: String,
    pub salary: f64,
    pub hire_date: i64,
    pub status: String,
    pub shift: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<EmergencyContact>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Partial document for `UPDATE $id MERGE $patch`
///
/// `None` 字段不会被序列化，也就不会覆盖原值
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmployeePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<EmergencyContact>,
    pub updated_at: i64,
}

/// `sequence:employee` document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceRow {
    pub value: i64,
}

/// One `GROUP BY` bucket (position 或 shift)
#[derive(Debug, Clone, Deserialize)]
pub struct GroupRow {
    #[serde(alias = "position", alias = "shift")]
    pub key: String,
    pub count: i64,
}
