use sqlx::{PgPool, Row};
use anyhow::{Context, Result};
use crate::domains::support::models::{Report, ReportTarget};

pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 신고 저장
    /// Persist a report
    pub async fn insert(
        &self,
        reporter_id: u64,
        target_type: ReportTarget,
        target_id: &str,
        reason: &str,
        details: Option<&str>,
        item_url: Option<&str>,
    ) -> Result<Report> {
        let row = sqlx::query(
            r#"
            INSERT INTO reports (reporter_id, target_type, target_id, reason, details, item_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            RETURNING id, created_at
            "#,
        )
        .bind(reporter_id as i64)
        .bind(target_type.as_str())
        .bind(target_id)
        .bind(reason)
        .bind(details)
        .bind(item_url)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert report")?;

        Ok(Report {
            id: row.get::<i64, _>("id") as u64,
            reporter_id,
            target_type,
            target_id: target_id.to_string(),
            reason: reason.to_string(),
            details: details.map(str::to_string),
            item_url: item_url.map(str::to_string),
            created_at: row.get("created_at"),
        })
    }
}
