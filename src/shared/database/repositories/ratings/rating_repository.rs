use sqlx::{PgPool, Row};
use sqlx::postgres::PgRow;
use anyhow::{Context, Result};
use std::collections::HashMap;
use crate::domains::ratings::models::Rating;

fn map_rating(row: &PgRow) -> Rating {
    Rating {
        id: row.get::<i64, _>("id") as u64,
        rater_user_id: row.get::<i64, _>("rater_user_id") as u64,
        rated_user_id: row.get::<i64, _>("rated_user_id") as u64,
        stars: row.get("stars"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

pub struct RatingRepository {
    pool: PgPool,
}

impl RatingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 평점 저장 (rater/rated 쌍당 하나, 있으면 갱신)
    /// Insert or replace the rater's rating
    pub async fn upsert(&self, rater_id: u64, rated_id: u64, stars: i16) -> Result<Rating> {
        let row = sqlx::query(
            r#"
            INSERT INTO ratings (rater_user_id, rated_user_id, stars, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            ON CONFLICT (rater_user_id, rated_user_id)
            DO UPDATE SET stars = EXCLUDED.stars, updated_at = NOW()
            RETURNING id, rater_user_id, rated_user_id, stars, created_at, updated_at
            "#,
        )
        .bind(rater_id as i64)
        .bind(rated_id as i64)
        .bind(stars)
        .fetch_one(&self.pool)
        .await
        .context("Failed to upsert rating")?;

        Ok(map_rating(&row))
    }

    pub async fn find(&self, rater_id: u64, rated_id: u64) -> Result<Option<Rating>> {
        let row = sqlx::query(
            r#"
            SELECT id, rater_user_id, rated_user_id, stars, created_at, updated_at
            FROM ratings
            WHERE rater_user_id = $1 AND rated_user_id = $2
            "#,
        )
        .bind(rater_id as i64)
        .bind(rated_id as i64)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch rating")?;

        Ok(row.as_ref().map(map_rating))
    }

    /// 별점별 개수 (인덱스 0 = 1점)
    pub async fn star_counts(&self, rated_id: u64) -> Result<[i64; 5]> {
        let all = self.star_counts_for_users(&[rated_id]).await?;
        Ok(all.get(&rated_id).copied().unwrap_or([0; 5]))
    }

    /// 여러 사용자의 별점별 개수
    pub async fn star_counts_for_users(&self, rated_ids: &[u64]) -> Result<HashMap<u64, [i64; 5]>> {
        let mut counts: HashMap<u64, [i64; 5]> = HashMap::new();
        if rated_ids.is_empty() {
            return Ok(counts);
        }

        let ids: Vec<i64> = rated_ids.iter().map(|id| *id as i64).collect();
        let rows = sqlx::query(
            r#"
            SELECT rated_user_id, stars, COUNT(*) AS count
            FROM ratings
            WHERE rated_user_id = ANY($1)
            GROUP BY rated_user_id, stars
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .context("Failed to aggregate ratings")?;

        for row in rows {
            let user_id = row.get::<i64, _>("rated_user_id") as u64;
            let stars: i16 = row.get("stars");
            if (1..=5).contains(&stars) {
                counts.entry(user_id).or_insert([0; 5])[(stars - 1) as usize] = row.get("count");
            }
        }
        Ok(counts)
    }
}
