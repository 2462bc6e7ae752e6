use sqlx::{PgConnection, PgPool, Row};
use sqlx::postgres::PgRow;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use crate::domains::notifications::models::{EventType, Notification, NotificationCreate};

const NOTIFICATION_COLUMNS: &str = r#"
    id, user_id, event_type, request_id, item_id, message, item_title,
    other_user_id, other_user_name, status, read, read_at, created_at
"#;

fn map_notification(row: &PgRow) -> Notification {
    Notification {
        id: row.get::<i64, _>("id") as u64,
        user_id: row.get::<i64, _>("user_id") as u64,
        event_type: row
            .get::<String, _>("event_type")
            .parse()
            .unwrap_or(EventType::NewRequest),
        request_id: row.get::<Option<i64>, _>("request_id").map(|id| id as u64),
        item_id: row.get::<Option<i64>, _>("item_id").map(|id| id as u64),
        message: row.get("message"),
        item_title: row.get("item_title"),
        other_user_id: row.get::<Option<i64>, _>("other_user_id").map(|id| id as u64),
        other_user_name: row.get("other_user_name"),
        status: row.get("status"),
        read: row.get("read"),
        read_at: row.get("read_at"),
        created_at: row.get("created_at"),
    }
}

pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 알림 생성 (스왑 트랜잭션 안에서)
    pub async fn insert(conn: &mut PgConnection, data: &NotificationCreate) -> Result<u64> {
        let row = sqlx::query(
            r#"
            INSERT INTO notifications (user_id, event_type, request_id, item_id, message,
                                       item_title, other_user_id, other_user_name, status,
                                       read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, FALSE, NOW())
            RETURNING id
            "#,
        )
        .bind(data.user_id as i64)
        .bind(data.event_type.as_str())
        .bind(data.request_id as i64)
        .bind(data.item_id as i64)
        .bind(data.message())
        .bind(&data.item_title)
        .bind(data.other_user_id as i64)
        .bind(&data.other_user_name)
        .bind(&data.status)
        .fetch_one(&mut *conn)
        .await
        .context("Failed to insert notification")?;

        Ok(row.get::<i64, _>("id") as u64)
    }

    /// 알림 목록 (최신순)
    pub async fn list(&self, user_id: u64, limit: i64, unread_only: bool) -> Result<Vec<Notification>> {
        let sql = format!(
            r#"
            SELECT {} FROM notifications
            WHERE user_id = $1 AND ($2 = FALSE OR read = FALSE)
            ORDER BY created_at DESC, id DESC
            LIMIT $3
            "#,
            NOTIFICATION_COLUMNS
        );

        let rows = sqlx::query(&sql)
            .bind(user_id as i64)
            .bind(unread_only)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list notifications")?;

        Ok(rows.iter().map(map_notification).collect())
    }

    /// since 이후 생성된 알림
    pub async fn list_since(&self, user_id: u64, since: DateTime<Utc>) -> Result<Vec<Notification>> {
        let sql = format!(
            r#"
            SELECT {} FROM notifications
            WHERE user_id = $1 AND created_at >= $2
            ORDER BY created_at DESC, id DESC
            "#,
            NOTIFICATION_COLUMNS
        );

        let rows = sqlx::query(&sql)
            .bind(user_id as i64)
            .bind(since)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list recent notifications")?;

        Ok(rows.iter().map(map_notification).collect())
    }

    pub async fn unread_count(&self, user_id: u64) -> Result<i64> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS count FROM notifications WHERE user_id = $1 AND read = FALSE",
        )
        .bind(user_id as i64)
        .fetch_one(&self.pool)
        .await
        .context("Failed to count unread notifications")?;

        Ok(row.get("count"))
    }

    /// 읽음 처리 (본인 알림만), 대상이 없으면 false
    pub async fn mark_read(&self, id: u64, user_id: u64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET read = TRUE, read_at = COALESCE(read_at, NOW())
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id as i64)
        .bind(user_id as i64)
        .execute(&self.pool)
        .await
        .context("Failed to mark notification read")?;

        Ok(result.rows_affected() > 0)
    }

    /// 모두 읽음 처리, 변경된 개수 반환
    pub async fn mark_all_read(&self, user_id: u64) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET read = TRUE, read_at = NOW()
            WHERE user_id = $1 AND read = FALSE
            "#,
        )
        .bind(user_id as i64)
        .execute(&self.pool)
        .await
        .context("Failed to mark all notifications read")?;

        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: u64, user_id: u64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND user_id = $2")
            .bind(id as i64)
            .bind(user_id as i64)
            .execute(&self.pool)
            .await
            .context("Failed to delete notification")?;

        Ok(result.rows_affected() > 0)
    }
}
