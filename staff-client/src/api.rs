//! Typed employee API

use serde::Serialize;
use shared::models::{
    Employee, EmployeeCreate, EmployeeDeleted, EmployeeFilter, EmployeeSaved, EmployeeStatus,
    EmployeeUpdate, EmployeeUpdated, HealthStatus, Position, StatsSummary,
};

use crate::{ClientConfig, ClientResult, HttpClient};

#[derive(Serialize)]
struct StatusBody {
    status: EmployeeStatus,
}

/// 员工接口，解开服务端的字面量信封 (`Data saved` 等)
#[derive(Debug, Clone)]
pub struct EmployeeApi<C> {
    http: C,
    resource: String,
}

impl<C: HttpClient> EmployeeApi<C> {
    pub fn new(http: C, config: &ClientConfig) -> Self {
        Self {
            http,
            resource: config.resource_path.trim_end_matches('/').to_string(),
        }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    fn item(&self, id: &str) -> String {
        format!("{}/{}", self.resource, id)
    }

    pub async fn health(&self) -> ClientResult<HealthStatus> {
        self.http.get("/health").await
    }

    pub async fn list(&self) -> ClientResult<Vec<Employee>> {
        self.http.get(&self.resource).await
    }

    /// 服务端过滤 (`?status=&position=&shift=`)
    pub async fn list_filtered(&self, filter: &EmployeeFilter) -> ClientResult<Vec<Employee>> {
        let mut params = Vec::new();
        if let Some(status) = filter.status {
            params.push(format!("status={}", status));
        }
        if let Some(position) = filter.position {
            params.push(format!("position={}", position));
        }
        if let Some(shift) = filter.shift {
            params.push(format!("shift={}", shift));
        }

        if params.is_empty() {
            self.list().await
        } else {
            let path = format!("{}?{}", self.resource, params.join("&"));
            self.http.get(&path).await
        }
    }

    pub async fn list_by_position(&self, position: Position) -> ClientResult<Vec<Employee>> {
        self.http.get(&self.item(position.as_str())).await
    }

    pub async fn stats(&self) -> ClientResult<StatsSummary> {
        self.http
            .get(&format!("{}/stats/summary", self.resource))
            .await
    }

    pub async fn create(&self, data: &EmployeeCreate) -> ClientResult<Employee> {
        let saved: EmployeeSaved = self.http.post(&self.resource, data).await?;
        Ok(saved.employee)
    }

    pub async fn update(&self, id: &str, data: &EmployeeUpdate) -> ClientResult<Employee> {
        let updated: EmployeeUpdated = self.http.put(&self.item(id), data).await?;
        Ok(updated.employee)
    }

    /// 只改状态，服务端直接返回记录
    pub async fn update_status(&self, id: &str, status: EmployeeStatus) -> ClientResult<Employee> {
        self.http
            .patch(&format!("{}/status", self.item(id)), &StatusBody { status })
            .await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<Employee> {
        let deleted: EmployeeDeleted = self.http.delete(&self.item(id)).await?;
        Ok(deleted.employee)
    }
}
