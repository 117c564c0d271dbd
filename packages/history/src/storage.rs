// ABOUTME: History storage layer using SQLite
// ABOUTME: Inserts invocation records and queries them most-recent-first with a caller-supplied limit

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use thiserror::Error;
use tracing::{debug, warn};

use speccraft_pipeline::Specification;

use crate::types::{RequestKind, SpecRequestRecord};

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HistoryError>;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS spec_requests (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    input_text TEXT NOT NULL,
    output_json TEXT NOT NULL,
    request_type TEXT NOT NULL,
    created_at TEXT NOT NULL
)
"#;

pub struct HistoryStorage {
    pool: SqlitePool,
}

impl HistoryStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    /// Persist one pipeline invocation. Returns the new record id.
    pub async fn record(
        &self,
        user_id: i64,
        input_text: &str,
        specification: &Specification,
        kind: RequestKind,
    ) -> Result<i64> {
        let output_json = serde_json::to_string(specification)?;
        let created_at = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            INSERT INTO spec_requests (user_id, input_text, output_json, request_type, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(input_text)
        .bind(&output_json)
        .bind(kind.as_str())
        .bind(&created_at)
        .execute(&self.pool)
        .await?;

        debug!(
            "Recorded {} request for user {}: {} bytes of output",
            kind.as_str(),
            user_id,
            output_json.len()
        );

        Ok(result.last_insert_rowid())
    }

    /// Fetch a user's most recent invocations, newest first.
    ///
    /// Rows whose stored specification no longer decodes are skipped
    /// with a warning rather than failing the whole query.
    pub async fn recent(&self, user_id: i64, limit: i64) -> Result<Vec<SpecRequestRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, input_text, output_json, request_type, created_at
            FROM spec_requests
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let id: i64 = row.get("id");

            let output_json: String = row.get("output_json");
            let specification: Specification = match serde_json::from_str(&output_json) {
                Ok(spec) => spec,
                Err(e) => {
                    warn!("Skipping history record {}: stored output no longer decodes: {}", id, e);
                    continue;
                }
            };

            let request_type: String = row.get("request_type");
            let Some(request_type) = RequestKind::parse(&request_type) else {
                warn!("Skipping history record {}: unknown request type {}", id, request_type);
                continue;
            };

            let created_at: String = row.get("created_at");
            let created_at = match DateTime::parse_from_rfc3339(&created_at) {
                Ok(ts) => ts.with_timezone(&Utc),
                Err(e) => {
                    warn!("Skipping history record {}: bad timestamp: {}", id, e);
                    continue;
                }
            };

            records.push(SpecRequestRecord {
                id,
                user_id: row.get("user_id"),
                input_text: row.get("input_text"),
                specification,
                request_type,
                created_at,
            });
        }

        Ok(records)
    }
}
