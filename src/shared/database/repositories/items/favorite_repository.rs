use sqlx::{PgPool, Row};
use anyhow::{Context, Result};

/// 즐겨찾기 Repository
pub struct FavoriteRepository {
    pool: PgPool,
}

impl FavoriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 즐겨찾기 추가 (이미 있으면 무시)
    pub async fn add(&self, user_id: u64, item_id: u64) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO favorites (user_id, item_id, created_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (user_id, item_id) DO NOTHING
            "#,
        )
        .bind(user_id as i64)
        .bind(item_id as i64)
        .execute(&self.pool)
        .await
        .context("Failed to add favorite")?;

        Ok(())
    }

    pub async fn remove(&self, user_id: u64, item_id: u64) -> Result<()> {
        sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND item_id = $2")
            .bind(user_id as i64)
            .bind(item_id as i64)
            .execute(&self.pool)
            .await
            .context("Failed to remove favorite")?;

        Ok(())
    }

    /// 즐겨찾기한 아이템 id (추가한 순서)
    pub async fn list_item_ids(&self, user_id: u64) -> Result<Vec<u64>> {
        let rows = sqlx::query(
            r#"
            SELECT item_id FROM favorites
            WHERE user_id = $1
            ORDER BY created_at ASC, item_id ASC
            "#,
        )
        .bind(user_id as i64)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list favorites")?;

        Ok(rows.iter().map(|row| row.get::<i64, _>("item_id") as u64).collect())
    }
}
