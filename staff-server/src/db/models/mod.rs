//! Database Models
//!
//! 存储层的字段使用 snake_case，时间戳为毫秒，枚举存字符串。

pub mod employee;

// Re-exports
pub use employee::{Employee, EmployeeContent, EmployeePatch, EmployeeId, GroupRow, SequenceRow};
