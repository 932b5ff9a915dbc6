//! Employee Repository

use super::{
    BaseRepository, RepoError, RepoResult, SequenceRepository, UniqueField, retry_on_conflict,
};
use crate::db::models::{Employee, EmployeeContent, EmployeePatch, GroupRow};
use serde::Deserialize;
use shared::models::{
    EmployeeCreate, EmployeeFilter, EmployeeStatus, EmployeeUpdate, GroupCount, StatsSummary,
};
use shared::util::now_millis;
use surrealdb::engine::any::Any;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "employee";

#[derive(Debug, Deserialize)]
struct CountRow {
    total: i64,
}

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
    sequence: SequenceRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Any>) -> Self {
        Self {
            sequence: SequenceRepository::new(db.clone()),
            base: BaseRepository::new(db),
        }
    }

    fn record_id(id: &str) -> RecordId {
        RecordId::from_table_key(TABLE, id)
    }

    /// List employees, newest first
    ///
    /// 每个 `Some` 过滤条件追加一个等值谓词
    pub async fn find_all(&self, filter: &EmployeeFilter) -> RepoResult<Vec<Employee>> {
        let mut conditions = Vec::new();
        if filter.status.is_some() {
            conditions.push("status = $status");
        }
        if filter.position.is_some() {
            conditions.push("position = $position");
        }
        if filter.shift.is_some() {
            conditions.push("shift = $shift");
        }

        let mut sql = String::from("SELECT * FROM employee");
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut query = self.base.db().query(sql);
        if let Some(status) = filter.status {
            query = query.bind(("status", status.as_str()));
        }
        if let Some(position) = filter.position {
            query = query.bind(("position", position.as_str()));
        }
        if let Some(shift) = filter.shift {
            query = query.bind(("shift", shift.as_str()));
        }

        let employees: Vec<Employee> = query.await?.take(0)?;
        Ok(employees)
    }

    /// Find employee by record key
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Employee>> {
        let emp: Option<Employee> = self.base.db().select(Self::record_id(id)).await?;
        Ok(emp)
    }

    /// Find another employee holding `email` (excluding `except`)
    pub async fn find_by_email(
        &self,
        email: &str,
        except: Option<&str>,
    ) -> RepoResult<Option<Employee>> {
        self.find_by_field("email", email, except).await
    }

    /// Find another employee holding `employee_id` (excluding `except`)
    pub async fn find_by_employee_id(
        &self,
        employee_id: &str,
        except: Option<&str>,
    ) -> RepoResult<Option<Employee>> {
        self.find_by_field("employee_id", employee_id, except).await
    }

    async fn find_by_field(
        &self,
        field: &'static str,
        value: &str,
        except: Option<&str>,
    ) -> RepoResult<Option<Employee>> {
        let sql = format!(
            "SELECT * FROM employee WHERE {field} = $value AND id != $except LIMIT 1"
        );
        let except = except.map(Self::record_id);
        let mut result = self
            .base
            .db()
            .query(sql)
            .bind(("value", value.to_string()))
            .bind(("except", except))
            .await?;
        let employees: Vec<Employee> = result.take(0)?;
        Ok(employees.into_iter().next())
    }

    async fn ensure_unique(
        &self,
        email: Option<&str>,
        employee_id: Option<&str>,
        except: Option<&str>,
    ) -> RepoResult<()> {
        if let Some(email) = email
            && self.find_by_email(email, except).await?.is_some()
        {
            return Err(RepoError::Duplicate {
                field: UniqueField::Email,
                value: email.to_string(),
            });
        }
        if let Some(code) = employee_id
            && self.find_by_employee_id(code, except).await?.is_some()
        {
            return Err(RepoError::Duplicate {
                field: UniqueField::EmployeeId,
                value: code.to_string(),
            });
        }
        Ok(())
    }

    /// Create a new employee
    ///
    /// 未提供 (或为空) 的 employeeId 从序列分配；未提供的 hireDate 取当前时间
    pub async fn create(&self, data: EmployeeCreate) -> RepoResult<Employee> {
        let supplied_code = data.employee_id.filter(|c| !c.is_empty());
        self.ensure_unique(Some(&data.email), supplied_code.as_deref(), None)
            .await?;

        let employee_id = match supplied_code {
            Some(code) => code,
            None => self.sequence.next_employee_id().await?,
        };

        let now = now_millis();
        let content = EmployeeContent {
            employee_id,
            name: data.name,
            age: data.age,
            position: data.position.as_str().to_string(),
            mobile: data.mobile,
            email: data.email,
            address: data.address,
            salary: data.salary,
            hire_date: data.hire_date.map(|d| d.timestamp_millis()).unwrap_or(now),
            status: data.status.unwrap_or_default().as_str().to_string(),
            shift: data.shift.unwrap_or_default().as_str().to_string(),
            emergency_contact: data.emergency_contact,
            created_at: now,
            updated_at: now,
        };

        retry_on_conflict(|| self.insert(content.clone()))
            .await
            .map_err(|e| e.with_submitted(Some(&content.email), Some(&content.employee_id)))
    }

    async fn insert(&self, content: EmployeeContent) -> RepoResult<Employee> {
        let mut result = self
            .base
            .db()
            .query("CREATE employee CONTENT $data RETURN AFTER")
            .bind(("data", content))
            .await?;

        let created: Option<Employee> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create employee".to_string()))
    }

    /// Update the supplied fields of an employee
    pub async fn update(&self, id: &str, data: EmployeeUpdate) -> RepoResult<Employee> {
        if self.find_by_id(id).await?.is_none() {
            return Err(RepoError::NotFound(id.to_string()));
        }

        self.ensure_unique(data.email.as_deref(), data.employee_id.as_deref(), Some(id))
            .await?;

        let submitted_email = data.email.clone();
        let submitted_code = data.employee_id.clone();
        let patch = EmployeePatch {
            employee_id: data.employee_id,
            name: data.name,
            age: data.age,
            position: data.position.map(|p| p.as_str().to_string()),
            mobile: data.mobile,
            email: data.email,
            address: data.address,
            salary: data.salary,
            hire_date: data.hire_date.map(|d| d.timestamp_millis()),
            status: data.status.map(|s| s.as_str().to_string()),
            shift: data.shift.map(|s| s.as_str().to_string()),
            emergency_contact: data.emergency_contact,
            updated_at: now_millis(),
        };

        self.merge(id, patch)
            .await
            .map_err(|e| e.with_submitted(submitted_email.as_deref(), submitted_code.as_deref()))
    }

    /// Update only the status field
    pub async fn update_status(&self, id: &str, status: EmployeeStatus) -> RepoResult<Employee> {
        if self.find_by_id(id).await?.is_none() {
            return Err(RepoError::NotFound(id.to_string()));
        }

        let patch = EmployeePatch {
            status: Some(status.as_str().to_string()),
            updated_at: now_millis(),
            ..Default::default()
        };
        self.merge(id, patch).await
    }

    async fn merge(&self, id: &str, patch: EmployeePatch) -> RepoResult<Employee> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing MERGE $patch RETURN AFTER")
            .bind(("thing", Self::record_id(id)))
            .bind(("patch", patch))
            .await?;

        result
            .take::<Option<Employee>>(0)?
            .ok_or_else(|| RepoError::NotFound(id.to_string()))
    }

    /// Hard delete, returns the document as it was before deletion
    pub async fn delete(&self, id: &str) -> RepoResult<Employee> {
        let mut result = self
            .base
            .db()
            .query("DELETE $thing RETURN BEFORE")
            .bind(("thing", Self::record_id(id)))
            .await?;

        result
            .take::<Option<Employee>>(0)?
            .ok_or_else(|| RepoError::NotFound(id.to_string()))
    }

    /// Active-employee statistics: total, by position, by shift
    pub async fn stats(&self) -> RepoResult<StatsSummary> {
        let mut result = self
            .base
            .db()
            .query(
                r#"
                SELECT count() AS total FROM employee WHERE status = $status GROUP ALL;
                SELECT position, count() AS count FROM employee WHERE status = $status GROUP BY position;
                SELECT shift, count() AS count FROM employee WHERE status = $status GROUP BY shift;
                "#,
            )
            .bind(("status", EmployeeStatus::Active.as_str()))
            .await?;

        let totals: Vec<CountRow> = result.take(0)?;
        let by_position: Vec<GroupRow> = result.take(1)?;
        let by_shift: Vec<GroupRow> = result.take(2)?;

        Ok(StatsSummary {
            total_employees: totals.first().map(|r| r.total).unwrap_or(0),
            by_position: into_groups(by_position),
            by_shift: into_groups(by_shift),
        })
    }
}

fn into_groups(rows: Vec<GroupRow>) -> Vec<GroupCount> {
    let mut groups: Vec<GroupCount> = rows
        .into_iter()
        .map(|r| GroupCount {
            id: r.key,
            count: r.count,
        })
        .collect();
    groups.sort_by(|a, b| a.id.cmp(&b.id));
    groups
}
