//! Client error types

use std::collections::HashMap;

use serde_json::Value;
use shared::ErrorCode;
use thiserror::Error;

/// 无法连接服务器时展示给用户的文案
pub const CONNECT_FAILURE_MESSAGE: &str =
    "Unable to connect to the server. Please check if the backend is running.";

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// 传输层失败 (连接、超时)，列表加载会重试这一类
    #[error("Network error: {0}")]
    Network(String),

    /// 服务端返回的统一错误体 `{code, message, details}`
    #[error("API error {code}: {message}")]
    Api {
        code: u16,
        message: String,
        details: Option<HashMap<String, Value>>,
    },

    /// Resource not found (无统一错误体)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error (无统一错误体)
    #[error("Validation error: {0}")]
    Validation(String),

    /// 其它非 2xx 响应
    #[error("Internal error: {0}")]
    Internal(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// 是否网络类错误 (HTTP 状态错误不算)
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }

    /// 结构化错误码，仅 `Api` 变体有
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            ClientError::Api { code, .. } => ErrorCode::try_from(*code).ok(),
            _ => None,
        }
    }

    /// 面向用户的文案
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Network(_) => CONNECT_FAILURE_MESSAGE.to_string(),
            ClientError::Api { message, .. } => message.clone(),
            ClientError::NotFound(msg)
            | ClientError::Validation(msg)
            | ClientError::Internal(msg)
            | ClientError::InvalidResponse(msg) => msg.clone(),
            ClientError::Serialization(e) => e.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::InvalidResponse(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
