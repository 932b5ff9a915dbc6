//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    ///
    /// 唯一性冲突（邮箱、员工编号）按校验失败处理，返回 400 而不是 409。
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::EmployeeNotFound => StatusCode::NOT_FOUND,

            Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            Self::ValidationFailed
            | Self::RequiredField
            | Self::EmployeeEmailExists
            | Self::EmployeeIdExists => StatusCode::BAD_REQUEST,
        }
    }
}
