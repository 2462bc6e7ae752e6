use sqlx::{PgConnection, PgPool, Row};
use sqlx::postgres::PgRow;
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::collections::HashMap;
use crate::domains::items::models::ItemRecord;
use crate::domains::swaps::models::{SwapParty, SwapRequest, SwapStatus};

const REQUEST_COLUMNS: &str =
    "id, item_id, owner_id, item_title, requester_id, credits_required, status, created_at, updated_at";

fn map_request(row: &PgRow) -> SwapRequest {
    SwapRequest {
        id: row.get::<i64, _>("id") as u64,
        item_id: row.get::<Option<i64>, _>("item_id").map(|id| id as u64),
        owner_id: row.get::<i64, _>("owner_id") as u64,
        item_title: row.get("item_title"),
        requester_id: row.get::<i64, _>("requester_id") as u64,
        credits_required: row.get("credits_required"),
        status: row
            .get::<String, _>("status")
            .parse()
            .unwrap_or(SwapStatus::Pending),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Swap Request Repository
/// 스왑 요청 데이터베이스 작업 처리
pub struct SwapRequestRepository {
    pool: PgPool,
}

impl SwapRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// pending 요청 생성 (소유자와 제목은 요청 시점 값으로 보관)
    pub async fn insert_pending(
        conn: &mut PgConnection,
        item: &ItemRecord,
        requester_id: u64,
        credits_required: Decimal,
    ) -> Result<SwapRequest> {
        let sql = format!(
            r#"
            INSERT INTO swap_requests
                (item_id, owner_id, item_title, requester_id, credits_required, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, 'pending', NOW(), NOW())
            RETURNING {}
            "#,
            REQUEST_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(item.id as i64)
            .bind(item.owner_id as i64)
            .bind(&item.title)
            .bind(requester_id as i64)
            .bind(credits_required)
            .fetch_one(&mut *conn)
            .await
            .context("Failed to insert swap request")?;

        Ok(map_request(&row))
    }

    /// 요청 행 잠금
    pub async fn lock_for_update(conn: &mut PgConnection, id: u64) -> Result<Option<SwapRequest>> {
        let sql = format!("SELECT {} FROM swap_requests WHERE id = $1 FOR UPDATE", REQUEST_COLUMNS);

        let row = sqlx::query(&sql)
            .bind(id as i64)
            .fetch_optional(&mut *conn)
            .await
            .context("Failed to lock swap request")?;

        Ok(row.as_ref().map(map_request))
    }

    /// 요청자의 특정 아이템 pending 요청 (잠금)
    pub async fn lock_pending_by_requester(
        conn: &mut PgConnection,
        item_id: u64,
        requester_id: u64,
    ) -> Result<Option<SwapRequest>> {
        let sql = format!(
            r#"
            SELECT {} FROM swap_requests
            WHERE item_id = $1 AND requester_id = $2 AND status = 'pending'
            FOR UPDATE
            "#,
            REQUEST_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(item_id as i64)
            .bind(requester_id as i64)
            .fetch_optional(&mut *conn)
            .await
            .context("Failed to find pending swap request for requester")?;

        Ok(row.as_ref().map(map_request))
    }

    /// 아이템의 pending 요청 전부 (잠금)
    pub async fn lock_pending_for_item(conn: &mut PgConnection, item_id: u64) -> Result<Vec<SwapRequest>> {
        let sql = format!(
            r#"
            SELECT {} FROM swap_requests
            WHERE item_id = $1 AND status = 'pending'
            ORDER BY id ASC
            FOR UPDATE
            "#,
            REQUEST_COLUMNS
        );

        let rows = sqlx::query(&sql)
            .bind(item_id as i64)
            .fetch_all(&mut *conn)
            .await
            .context("Failed to lock pending swap requests for item")?;

        Ok(rows.iter().map(map_request).collect())
    }

    /// 요청자의 pending 요청 개수
    pub async fn count_pending_for_requester(conn: &mut PgConnection, requester_id: u64) -> Result<i64> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS count FROM swap_requests WHERE requester_id = $1 AND status = 'pending'",
        )
        .bind(requester_id as i64)
        .fetch_one(&mut *conn)
        .await
        .context("Failed to count pending swap requests")?;

        Ok(row.get("count"))
    }

    /// 상태 변경 (pending 에서만)
    /// Move a pending request to a terminal status; returns false if it was not pending
    pub async fn finish(conn: &mut PgConnection, id: u64, status: SwapStatus) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE swap_requests
            SET status = $2, updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(id as i64)
        .bind(status.as_str())
        .execute(&mut *conn)
        .await
        .context("Failed to update swap request status")?;

        Ok(result.rows_affected() == 1)
    }

    /// 내 아이템에 들어온 pending 요청
    pub async fn list_pending_for_owner(&self, owner_id: u64) -> Result<Vec<SwapRequest>> {
        let sql = format!(
            r#"
            SELECT {} FROM swap_requests
            WHERE owner_id = $1 AND status = 'pending'
            ORDER BY created_at DESC, id DESC
            "#,
            REQUEST_COLUMNS
        );

        let rows = sqlx::query(&sql)
            .bind(owner_id as i64)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list pending swap requests for owner")?;

        Ok(rows.iter().map(map_request).collect())
    }

    /// 내가 보낸 모든 요청
    pub async fn list_for_requester(&self, requester_id: u64) -> Result<Vec<SwapRequest>> {
        let sql = format!(
            r#"
            SELECT {} FROM swap_requests
            WHERE requester_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
            REQUEST_COLUMNS
        );

        let rows = sqlx::query(&sql)
            .bind(requester_id as i64)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list swap requests for requester")?;

        Ok(rows.iter().map(map_request).collect())
    }

    /// 승인된 스왑 (소유자 또는 요청자), 최신순
    /// Approved swaps the user took part in; survives item deletion
    pub async fn list_approved_for_user(&self, user_id: u64) -> Result<Vec<SwapRequest>> {
        let sql = format!(
            r#"
            SELECT {} FROM swap_requests
            WHERE status = 'approved' AND (requester_id = $1 OR owner_id = $1)
            ORDER BY updated_at DESC, id DESC
            "#,
            REQUEST_COLUMNS
        );

        let rows = sqlx::query(&sql)
            .bind(user_id as i64)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list swap history")?;

        Ok(rows.iter().map(map_request).collect())
    }

    /// 사용자별 완료된 스왑 수 (소유자 또는 요청자)
    pub async fn count_approved_for_users(&self, user_ids: &[u64]) -> Result<HashMap<u64, i64>> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let ids: Vec<i64> = user_ids.iter().map(|id| *id as i64).collect();
        let rows = sqlx::query(
            r#"
            SELECT u.id AS user_id,
                   (SELECT COUNT(*)
                    FROM swap_requests sr
                    WHERE sr.status = 'approved'
                      AND (sr.requester_id = u.id OR sr.owner_id = u.id)) AS swaps
            FROM UNNEST($1::BIGINT[]) AS u(id)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .context("Failed to count completed swaps")?;

        Ok(rows
            .iter()
            .map(|row| (row.get::<i64, _>("user_id") as u64, row.get::<i64, _>("swaps")))
            .collect())
    }

    /// 사용자 요약 (요청/이력 응답용)
    pub async fn parties(&self, user_ids: &[u64]) -> Result<HashMap<u64, SwapParty>> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let ids: Vec<i64> = user_ids.iter().map(|id| *id as i64).collect();
        let rows = sqlx::query(
            "SELECT id, username, full_name, profile_pic FROM users WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch swap parties")?;

        Ok(rows
            .iter()
            .map(|row| {
                let party = SwapParty {
                    id: row.get::<i64, _>("id") as u64,
                    username: row.get("username"),
                    full_name: row.get("full_name"),
                    profile_pic: row.get("profile_pic"),
                };
                (party.id, party)
            })
            .collect())
    }
}
