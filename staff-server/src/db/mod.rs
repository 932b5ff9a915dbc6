//! Database Module
//!
//! Handles the SurrealDB connection, schema (unique indexes) and the
//! employee number sequence.

pub mod models;
pub mod repository;

use crate::core::Config;
use crate::utils::AppError;
use repository::SequenceRepository;
use surrealdb::Surreal;
use surrealdb::engine::any::{self, Any};

/// 唯一索引名称，违反时的错误信息会带上索引名
pub const EMAIL_INDEX: &str = "employee_email_unique";
pub const EMPLOYEE_ID_INDEX: &str = "employee_code_unique";

const SCHEMA: &str = r#"
    DEFINE TABLE IF NOT EXISTS employee SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS employee_email_unique ON TABLE employee FIELDS email UNIQUE;
    DEFINE INDEX IF NOT EXISTS employee_code_unique ON TABLE employee FIELDS employee_id UNIQUE;
    DEFINE TABLE IF NOT EXISTS sequence SCHEMALESS;
"#;

/// Database service, owns one SurrealDB connection
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Any>,
}

impl DbService {
    /// Connect, select namespace/database, define schema, seed the sequence
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        let db = any::connect(config.database_url.as_str())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(config.db_namespace.as_str())
            .use_db(config.db_database.as_str())
            .await
            .map_err(|e| AppError::database(format!("Failed to select database: {e}")))?;

        tracing::info!(
            url = %config.database_url,
            ns = %config.db_namespace,
            db = %config.db_database,
            "Database connection established"
        );

        db.query(SCHEMA)
            .await
            .and_then(|r| r.check())
            .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;

        let seeded = SequenceRepository::new(db.clone())
            .ensure_seeded()
            .await
            .map_err(|e| AppError::database(format!("Failed to seed employee sequence: {e}")))?;
        tracing::info!(current = seeded, "Employee sequence ready");

        Ok(Self { db })
    }

    /// 数据库是否可用
    pub async fn is_healthy(db: &Surreal<Any>) -> bool {
        db.health().await.is_ok()
    }
}
