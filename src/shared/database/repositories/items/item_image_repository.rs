use sqlx::{PgConnection, PgPool, Row};
use anyhow::{Context, Result};
use std::collections::HashMap;
use crate::domains::items::models::ItemImage;

pub struct ItemImageRepository {
    pool: PgPool,
}

impl ItemImageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 아이템 이미지 목록 (등록 순서)
    pub async fn list_for_item(&self, item_id: u64) -> Result<Vec<ItemImage>> {
        let rows = sqlx::query(
            r#"
            SELECT id, url FROM item_images
            WHERE item_id = $1
            ORDER BY position ASC, created_at ASC
            "#,
        )
        .bind(item_id as i64)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list item images")?;

        Ok(rows
            .iter()
            .map(|row| ItemImage { id: row.get("id"), url: row.get("url") })
            .collect())
    }

    /// 여러 아이템의 이미지 (item_id -> 이미지 목록)
    pub async fn list_for_items(&self, item_ids: &[u64]) -> Result<HashMap<u64, Vec<ItemImage>>> {
        let mut grouped: HashMap<u64, Vec<ItemImage>> = HashMap::new();
        if item_ids.is_empty() {
            return Ok(grouped);
        }

        let ids: Vec<i64> = item_ids.iter().map(|id| *id as i64).collect();
        let rows = sqlx::query(
            r#"
            SELECT id, item_id, url FROM item_images
            WHERE item_id = ANY($1)
            ORDER BY item_id, position ASC, created_at ASC
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list images for items")?;

        for row in rows {
            grouped
                .entry(row.get::<i64, _>("item_id") as u64)
                .or_default()
                .push(ItemImage { id: row.get("id"), url: row.get("url") });
        }
        Ok(grouped)
    }

    /// 이미지 추가 (맨 뒤에)
    /// Append an image after the existing ones
    pub async fn append(&self, item_id: u64, image: &ItemImage) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO item_images (id, item_id, url, position, created_at)
            VALUES (
                $1, $2, $3,
                (SELECT COALESCE(MAX(position) + 1, 0) FROM item_images WHERE item_id = $2),
                NOW()
            )
            "#,
        )
        .bind(&image.id)
        .bind(item_id as i64)
        .bind(&image.url)
        .execute(&self.pool)
        .await
        .context("Failed to insert item image")?;

        Ok(())
    }

    /// keep 목록에 없는 이미지 삭제, 삭제된 이미지 반환
    /// Drop images not listed in `keep`
    pub async fn delete_except(
        conn: &mut PgConnection,
        item_id: u64,
        keep: &[String],
    ) -> Result<Vec<ItemImage>> {
        let rows = sqlx::query(
            r#"
            DELETE FROM item_images
            WHERE item_id = $1 AND NOT (id = ANY($2))
            RETURNING id, url
            "#,
        )
        .bind(item_id as i64)
        .bind(keep.to_vec())
        .fetch_all(&mut *conn)
        .await
        .context("Failed to delete dropped item images")?;

        Ok(rows
            .iter()
            .map(|row| ItemImage { id: row.get("id"), url: row.get("url") })
            .collect())
    }

    /// 아이템의 모든 이미지 삭제
    pub async fn delete_for_item(conn: &mut PgConnection, item_id: u64) -> Result<Vec<ItemImage>> {
        Self::delete_except(conn, item_id, &[]).await
    }
}
