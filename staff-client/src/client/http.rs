// staff-client/src/client/http.rs
// HTTP 客户端 - 网络通信

use async_trait::async_trait;
use http::StatusCode;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::ApiResponse;

use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP 客户端 trait
///
/// `path` 以 `/` 开头，由实现负责拼接服务器地址
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
}

/// 把状态码和响应体转换为结果
///
/// 非 2xx 时优先解析统一错误体，解析不了再按状态码降级
pub(crate) fn decode_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> ClientResult<T> {
    if !status.is_success() {
        if let Ok(api_err) = serde_json::from_slice::<ApiResponse>(body) {
            return Err(ClientError::Api {
                code: api_err.code,
                message: api_err.message,
                details: api_err.details,
            });
        }
        let text = String::from_utf8_lossy(body).to_string();
        return match status {
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
            StatusCode::BAD_REQUEST => Err(ClientError::Validation(text)),
            _ => Err(ClientError::Internal(format!("HTTP {}: {}", status.as_u16(), text))),
        };
    }

    serde_json::from_slice(body)
        .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
}

/// 网络 HTTP 客户端
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 获取基础 URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> ClientResult<T> {
        let response = req.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        decode_response(status, &body)
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.execute(self.client.get(self.url(path))).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.execute(self.client.post(self.url(path)).json(body)).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.execute(self.client.put(self.url(path)).json(body)).await
    }

    async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.execute(self.client.patch(self.url(path)).json(body)).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.execute(self.client.delete(self.url(path))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;

    #[test]
    fn test_decode_unified_error() {
        let body = br#"{"code":8001,"message":"Employee not found"}"#;
        let err = decode_response::<serde_json::Value>(StatusCode::NOT_FOUND, body).unwrap_err();
        assert_eq!(err.error_code(), Some(ErrorCode::EmployeeNotFound));
        assert!(!err.is_network());
    }

    #[test]
    fn test_decode_plain_error_falls_back_to_status() {
        let err = decode_response::<serde_json::Value>(StatusCode::NOT_FOUND, b"").unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)));

        let err = decode_response::<serde_json::Value>(StatusCode::BAD_GATEWAY, b"upstream")
            .unwrap_err();
        assert!(matches!(err, ClientError::Internal(_)));
    }

    #[test]
    fn test_decode_success_body() {
        let value: Vec<u32> = decode_response(StatusCode::OK, b"[1,2,3]").unwrap();
        assert_eq!(value, vec![1, 2, 3]);

        let err = decode_response::<Vec<u32>>(StatusCode::OK, b"not json").unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }
}
