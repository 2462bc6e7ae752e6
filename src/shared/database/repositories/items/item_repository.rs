use sqlx::{PgConnection, PgPool, Row};
use sqlx::postgres::PgRow;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use crate::domains::items::models::{Item, ItemFilter, ItemRecord, ItemStatus, ItemUpdate};
use crate::shared::database::repositories::auth::escape_like;
use crate::shared::database::repositories::items::ItemImageRepository;

// available 이면서 pending 요청이 있으면 pending으로 보고
const ITEM_SELECT: &str = r#"
    SELECT i.id, i.owner_id, i.title, i.description, i.category, i.size, i.location,
           i.condition, i.branded, i.credits, i.locked_by, i.locked_until,
           i.created_at, i.updated_at,
           CASE
               WHEN i.status = 'available' AND EXISTS (
                   SELECT 1 FROM swap_requests sr
                   WHERE sr.item_id = i.id AND sr.status = 'pending'
               ) THEN 'pending'
               ELSE i.status
           END AS effective_status
    FROM items i
"#;

fn parse_status(raw: &str) -> ItemStatus {
    raw.parse().unwrap_or(ItemStatus::Available)
}

fn map_item(row: &PgRow) -> Item {
    Item {
        id: row.get::<i64, _>("id") as u64,
        owner_id: row.get::<i64, _>("owner_id") as u64,
        title: row.get("title"),
        description: row.get("description"),
        category: row.get("category"),
        size: row.get("size"),
        location: row.get("location"),
        condition: row.get("condition"),
        branded: row.get("branded"),
        credits: row.get("credits"),
        status: parse_status(row.get::<String, _>("effective_status").as_str()),
        locked_by: row.get::<Option<i64>, _>("locked_by").map(|id| id as u64),
        locked_until: row.get("locked_until"),
        images: Vec::new(),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn map_record(row: &PgRow) -> ItemRecord {
    ItemRecord {
        id: row.get::<i64, _>("id") as u64,
        owner_id: row.get::<i64, _>("owner_id") as u64,
        title: row.get("title"),
        credits: row.get("credits"),
        status: parse_status(row.get::<String, _>("status").as_str()),
        locked_by: row.get::<Option<i64>, _>("locked_by").map(|id| id as u64),
        locked_until: row.get("locked_until"),
    }
}

/// 새 아이템 컬럼 값 (검증 끝난 값)
pub struct NewItem<'a> {
    pub owner_id: u64,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub category: Option<&'a str>,
    pub size: Option<&'a str>,
    pub location: Option<&'a str>,
    pub condition: Option<&'a str>,
    pub branded: &'a str,
    pub credits: Decimal,
}

pub struct ItemRepository {
    pool: PgPool,
}

impl ItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 아이템 생성 (트랜잭션 안에서)
    /// Insert a new available item and return its id
    pub async fn insert(conn: &mut PgConnection, item: &NewItem<'_>) -> Result<u64> {
        let row = sqlx::query(
            r#"
            INSERT INTO items (owner_id, title, description, category, size, location,
                               condition, branded, credits, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'available', NOW(), NOW())
            RETURNING id
            "#,
        )
        .bind(item.owner_id as i64)
        .bind(item.title)
        .bind(item.description)
        .bind(item.category)
        .bind(item.size)
        .bind(item.location)
        .bind(item.condition)
        .bind(item.branded)
        .bind(item.credits)
        .fetch_one(&mut *conn)
        .await
        .context("Failed to insert item")?;

        Ok(row.get::<i64, _>("id") as u64)
    }

    /// ID로 아이템 조회 (이미지 포함)
    /// Get item by id, with images and derived status
    pub async fn find_by_id(&self, id: u64) -> Result<Option<Item>> {
        let sql = format!("{} WHERE i.id = $1", ITEM_SELECT);

        let row = sqlx::query(&sql)
            .bind(id as i64)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch item by id")?;

        let mut item = match row {
            Some(r) => map_item(&r),
            None => return Ok(None),
        };

        item.images = ItemImageRepository::new(self.pool.clone())
            .list_for_item(item.id)
            .await?;

        Ok(Some(item))
    }

    /// 여러 아이템 조회 (id -> Item)
    pub async fn find_many(&self, ids: &[u64]) -> Result<HashMap<u64, Item>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let sql = format!("{} WHERE i.id = ANY($1)", ITEM_SELECT);
        let id_list: Vec<i64> = ids.iter().map(|id| *id as i64).collect();

        let rows = sqlx::query(&sql)
            .bind(id_list)
            .fetch_all(&self.pool)
            .await
            .context("Failed to fetch items by ids")?;

        let mut items: Vec<Item> = rows.iter().map(map_item).collect();
        self.attach_images(&mut items).await?;

        Ok(items.into_iter().map(|item| (item.id, item)).collect())
    }

    /// 필터 조회
    /// List items matching the filter
    pub async fn list(&self, filter: &ItemFilter) -> Result<Vec<Item>> {
        let (limit, offset) = filter.page();
        let sql = format!(
            r#"
            SELECT * FROM ({select}) AS i
            WHERE ($1::BIGINT IS NULL OR i.owner_id = $1)
              AND ($2::TEXT IS NULL OR i.effective_status = $2)
              AND ($3::TEXT IS NULL OR LOWER(i.category) = LOWER($3))
              AND ($4::TEXT IS NULL OR LOWER(i.size) = LOWER($4))
              AND ($5::TEXT IS NULL OR LOWER(i.condition) = LOWER($5))
              AND ($6::TEXT IS NULL OR i.location ILIKE '%' || $6 || '%')
              AND ($7::TEXT IS NULL
                   OR i.title ILIKE '%' || $7 || '%'
                   OR i.description ILIKE '%' || $7 || '%')
            ORDER BY {order}
            LIMIT $8 OFFSET $9
            "#,
            select = ITEM_SELECT,
            order = filter.sort.unwrap_or_default().order_by(),
        );

        let q = filter
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(escape_like);
        let location = filter
            .location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(escape_like);

        let rows = sqlx::query(&sql)
            .bind(filter.owner_id.map(|id| id as i64))
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.category.as_deref())
            .bind(filter.size.as_deref())
            .bind(filter.condition.as_deref())
            .bind(location)
            .bind(q)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list items")?;

        let mut items: Vec<Item> = rows.iter().map(map_item).collect();
        self.attach_images(&mut items).await?;
        Ok(items)
    }

    async fn attach_images(&self, items: &mut [Item]) -> Result<()> {
        let ids: Vec<u64> = items.iter().map(|item| item.id).collect();
        let mut images = ItemImageRepository::new(self.pool.clone())
            .list_for_items(&ids)
            .await?;

        for item in items.iter_mut() {
            item.images = images.remove(&item.id).unwrap_or_default();
        }
        Ok(())
    }

    /// 아이템 행 잠금 (SELECT ... FOR UPDATE)
    /// Lock the item row for the rest of the transaction
    pub async fn lock_for_update(conn: &mut PgConnection, id: u64) -> Result<Option<ItemRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_id, title, credits, status, locked_by, locked_until
            FROM items
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id as i64)
        .fetch_optional(&mut *conn)
        .await
        .context("Failed to lock item")?;

        Ok(row.as_ref().map(map_record))
    }

    /// 상태 변경 (잠금 정보는 지움)
    pub async fn set_status(conn: &mut PgConnection, id: u64, status: ItemStatus) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE items
            SET status = $2, locked_by = NULL, locked_until = NULL, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id as i64)
        .bind(status.as_str())
        .execute(&mut *conn)
        .await
        .context("Failed to update item status")?;

        Ok(())
    }

    /// 아이템 예약 잠금
    /// Reserve the item for `locked_by` until `locked_until`
    pub async fn set_lock(
        conn: &mut PgConnection,
        id: u64,
        locked_by: u64,
        locked_until: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE items
            SET status = 'locked', locked_by = $2, locked_until = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id as i64)
        .bind(locked_by as i64)
        .bind(locked_until)
        .execute(&mut *conn)
        .await
        .context("Failed to lock item for user")?;

        Ok(())
    }

    /// 메타데이터 부분 수정 (None 필드는 유지)
    pub async fn update_metadata(conn: &mut PgConnection, id: u64, update: &ItemUpdate) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE items SET
                title       = COALESCE($2, title),
                description = COALESCE($3, description),
                category    = COALESCE($4, category),
                size        = COALESCE($5, size),
                location    = COALESCE($6, location),
                condition   = COALESCE($7, condition),
                branded     = COALESCE($8, branded),
                credits     = COALESCE($9, credits),
                updated_at  = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id as i64)
        .bind(update.title.as_deref().map(str::trim))
        .bind(update.description.as_deref())
        .bind(update.category.as_deref())
        .bind(update.size.as_deref())
        .bind(update.location.as_deref())
        .bind(update.condition.as_deref())
        .bind(update.branded.as_deref())
        .bind(update.credits)
        .execute(&mut *conn)
        .await
        .context("Failed to update item")?;

        Ok(())
    }

    /// 만료된 잠금 해제 (locked -> available)
    /// Release locks whose `locked_until` has passed
    pub async fn release_expired_locks(&self) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE items
            SET status = 'available', locked_by = NULL, locked_until = NULL, updated_at = NOW()
            WHERE status = 'locked' AND locked_until IS NOT NULL AND locked_until < NOW()
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to release expired item locks")?;

        Ok(result.rows_affected())
    }

    pub async fn delete(conn: &mut PgConnection, id: u64) -> Result<()> {
        sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id as i64)
            .execute(&mut *conn)
            .await
            .context("Failed to delete item")?;

        Ok(())
    }
}
