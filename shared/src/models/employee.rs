//! Employee Model (员工档案)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// 枚举字符串解析失败
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{value}` is not a valid {kind}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(ParseEnumError {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum!(
    /// Restaurant position
    Position, "position", {
        Waiter => "waiter",
        Chef => "chef",
        Manager => "manager",
        Bartender => "bartender",
        Host => "host",
        Dishwasher => "dishwasher",
    }
);

wire_enum!(
    /// Employment status
    EmployeeStatus, "status", {
        Active => "active",
        OnLeave => "on-leave",
        Terminated => "terminated",
    }
);

wire_enum!(
    /// Working shift
    Shift, "shift", {
        Morning => "morning",
        Evening => "evening",
        Night => "night",
        Flexible => "flexible",
    }
);

impl Default for EmployeeStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl Default for Shift {
    fn default() -> Self {
        Self::Flexible
    }
}

/// Emergency contact, every field optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmergencyContact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
}

/// Employee record as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Store-generated record key
    pub id: String,
    #[serde(default)]
    pub employee_id: Option<String>,
    pub name: String,
    pub age: i64,
    pub position: Position,
    pub mobile: String,
    pub email: String,
    pub address: String,
    pub salary: f64,
    pub hire_date: DateTime<Utc>,
    #[serde(default)]
    pub status: EmployeeStatus,
    #[serde(default)]
    pub shift: Shift,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<EmergencyContact>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCreate {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub age: i64,
    pub position: Position,
    #[validate(length(min = 1, message = "mobile is required"))]
    pub mobile: String,
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
    #[validate(range(min = 0.0, message = "salary must not be negative"))]
    pub salary: f64,
    /// Empty or absent means "assign the next sequence number"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "flexible_date::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub hire_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EmployeeStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<Shift>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<EmergencyContact>,
}

/// Update employee payload, only supplied fields are written
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "mobile is required"))]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "email is required"))]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "address is required"))]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "salary must not be negative"))]
    pub salary: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "employeeId must not be empty"))]
    pub employee_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "flexible_date::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub hire_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EmployeeStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<Shift>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<EmergencyContact>,
}

impl EmployeeUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.position.is_none()
            && self.mobile.is_none()
            && self.email.is_none()
            && self.address.is_none()
            && self.salary.is_none()
            && self.employee_id.is_none()
            && self.hire_date.is_none()
            && self.status.is_none()
            && self.shift.is_none()
            && self.emergency_contact.is_none()
    }
}

/// Status-only update payload (PATCH)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeStatusUpdate {
    #[serde(default)]
    pub status: Option<EmployeeStatus>,
}

/// Raw list query (`?status=&position=&shift=`)
///
/// 空字符串视为未提供。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<String>,
}

/// Parsed list filter, each `Some` is one equality predicate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub status: Option<EmployeeStatus>,
    pub position: Option<Position>,
    pub shift: Option<Shift>,
}

impl EmployeeFilter {
    pub fn by_position(position: Position) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }
}

impl TryFrom<EmployeeQuery> for EmployeeFilter {
    type Error = ParseEnumError;

    fn try_from(query: EmployeeQuery) -> Result<Self, Self::Error> {
        fn parse<T: FromStr<Err = ParseEnumError>>(
            raw: Option<String>,
        ) -> Result<Option<T>, ParseEnumError> {
            raw.filter(|s| !s.is_empty())
                .map(|s| s.parse())
                .transpose()
        }

        Ok(Self {
            status: parse(query.status)?,
            position: parse(query.position)?,
            shift: parse(query.shift)?,
        })
    }
}

/// One aggregation bucket, `_id` is the group key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    #[serde(rename = "_id")]
    pub id: String,
    pub count: i64,
}

/// Active-employee statistics
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total_employees: i64,
    pub by_position: Vec<GroupCount>,
    pub by_shift: Vec<GroupCount>,
}

/// `201 {"Data saved": employee}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeSaved {
    #[serde(rename = "Data saved")]
    pub employee: Employee,
}

/// `200 {"Data updated": employee}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeUpdated {
    #[serde(rename = "Data updated")]
    pub employee: Employee,
}

/// `200 {"Data deleted successfully": employee}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeDeleted {
    #[serde(rename = "Data deleted successfully")]
    pub employee: Employee,
}

/// Health report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub database: String,
    pub service: String,
}

impl HealthStatus {
    pub fn is_connected(&self) -> bool {
        self.database == "connected"
    }
}

/// 入职日期：接受 RFC 3339 或 `YYYY-MM-DD`
pub mod flexible_date {
    use super::*;

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) if s.is_empty() => Ok(None),
            Some(s) => parse(&s).map(Some).ok_or_else(|| {
                serde::de::Error::custom(format!("hireDate `{}` is not a valid date", s))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_body() -> serde_json::Value {
        json!({
            "name": "Ana",
            "age": 30,
            "position": "chef",
            "mobile": "555-0101",
            "email": "ana@example.com",
            "address": "1 Main St",
            "salary": 42000.0
        })
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_string(&EmployeeStatus::OnLeave).unwrap(),
            "\"on-leave\""
        );
        assert_eq!("dishwasher".parse::<Position>(), Ok(Position::Dishwasher));
        assert_eq!(Shift::default(), Shift::Flexible);
        assert_eq!(EmployeeStatus::default(), EmployeeStatus::Active);
    }

    #[test]
    fn test_enum_parse_rejects_unknown() {
        let err = "cashier".parse::<Position>().unwrap_err();
        assert_eq!(err.to_string(), "`cashier` is not a valid position");
        assert!("Active".parse::<EmployeeStatus>().is_err());
    }

    #[test]
    fn test_create_defaults() {
        let create: EmployeeCreate = serde_json::from_value(create_body()).unwrap();
        assert!(create.validate().is_ok());
        assert!(create.status.is_none());
        assert!(create.hire_date.is_none());
        assert!(create.employee_id.is_none());
    }

    #[test]
    fn test_create_rejects_empty_required_text() {
        let mut body = create_body();
        body["address"] = json!("");
        let create: EmployeeCreate = serde_json::from_value(body).unwrap();
        let errors = create.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("address"));
    }

    #[test]
    fn test_create_rejects_negative_salary() {
        let mut body = create_body();
        body["salary"] = json!(-5);
        let create: EmployeeCreate = serde_json::from_value(body).unwrap();
        assert!(create.validate().is_err());
    }

    #[test]
    fn test_create_rejects_bad_enum() {
        let mut body = create_body();
        body["shift"] = json!("afternoon");
        assert!(serde_json::from_value::<EmployeeCreate>(body).is_err());
    }

    #[test]
    fn test_hire_date_formats() {
        let mut body = create_body();
        body["hireDate"] = json!("2024-03-01");
        let create: EmployeeCreate = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(
            create.hire_date.unwrap().to_rfc3339(),
            "2024-03-01T00:00:00+00:00"
        );

        body["hireDate"] = json!("2024-03-01T09:30:00+02:00");
        let create: EmployeeCreate = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(
            create.hire_date.unwrap().to_rfc3339(),
            "2024-03-01T07:30:00+00:00"
        );

        body["hireDate"] = json!("yesterday");
        assert!(serde_json::from_value::<EmployeeCreate>(body).is_err());
    }

    #[test]
    fn test_update_validates_only_supplied() {
        let update: EmployeeUpdate = serde_json::from_value(json!({"age": 40})).unwrap();
        assert!(update.validate().is_ok());
        assert!(!update.is_empty());

        let update: EmployeeUpdate = serde_json::from_value(json!({"email": ""})).unwrap();
        assert!(update.validate().is_err());

        assert!(EmployeeUpdate::default().is_empty());
    }

    #[test]
    fn test_filter_from_query() {
        let query = EmployeeQuery {
            status: Some("active".into()),
            position: Some(String::new()),
            shift: Some("morning".into()),
        };
        let filter = EmployeeFilter::try_from(query).unwrap();
        assert_eq!(filter.status, Some(EmployeeStatus::Active));
        assert_eq!(filter.position, None);
        assert_eq!(filter.shift, Some(Shift::Morning));

        let query = EmployeeQuery {
            status: Some("retired".into()),
            ..Default::default()
        };
        assert!(EmployeeFilter::try_from(query).is_err());
    }

    #[test]
    fn test_stats_wire_shape() {
        let stats = StatsSummary {
            total_employees: 2,
            by_position: vec![GroupCount {
                id: "chef".into(),
                count: 2,
            }],
            by_shift: vec![],
        };
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["totalEmployees"], 2);
        assert_eq!(value["byPosition"][0]["_id"], "chef");
    }
}
