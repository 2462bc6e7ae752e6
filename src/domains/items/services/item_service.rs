use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use crate::domains::credits::models::{LedgerEntry, TransactionType};
use crate::domains::credits::services::ledger;
use crate::domains::items::models::{
    Item, ItemCreate, ItemFilter, ItemImage, ItemRecord, ItemStatus, ItemUpdate, MAX_TITLE_LEN,
};
use crate::domains::notifications::models::{EventType, NotificationCreate};
use crate::domains::swaps::models::SwapStatus;
use crate::shared::clients::{validate_image, ImageStore};
use crate::shared::database::{
    Database, ItemImageRepository, ItemRepository, NewItem, NotificationRepository,
    SwapRequestRepository, UserRepository,
};
use crate::shared::errors::ItemError;
use crate::shared::utils::UploadedFile;

/// 잠금 유지 시간
pub const LOCK_DURATION_HOURS: i64 = 24;

/// 아이템 업로드 보상 크레딧
pub const UPLOAD_REWARD: Decimal = Decimal::ONE;

fn db_err(context: &str) -> impl Fn(anyhow::Error) -> ItemError + '_ {
    move |e| ItemError::DatabaseError(format!("{}: {:#}", context, e))
}

fn sqlx_err(context: &str) -> impl Fn(sqlx::Error) -> ItemError + '_ {
    move |e| ItemError::DatabaseError(format!("{}: {}", context, e))
}

/// 제목 검증: 공백 불가, 최대 120자
pub fn validate_title(title: &str) -> Result<&str, ItemError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ItemError::Validation("Title is required".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ItemError::Validation(format!(
            "Title must be at most {} characters",
            MAX_TITLE_LEN
        )));
    }
    Ok(title)
}

pub fn validate_credits(credits: Decimal) -> Result<Decimal, ItemError> {
    if credits <= Decimal::ZERO {
        return Err(ItemError::Validation("Credits must be greater than 0".to_string()));
    }
    Ok(credits.round_dp(2))
}

/// 삭제 시 차감할 크레딧 (available 아이템만, 잔액 한도 내)
/// Anti-fraud debit for deleting a listing; never exceeds the balance
pub fn deletion_debit(status: ItemStatus, item_credits: Decimal, balance: Decimal) -> Decimal {
    if status != ItemStatus::Available {
        return Decimal::ZERO;
    }
    item_credits.min(balance).max(Decimal::ZERO)
}

// 아이템 서비스
// ItemService: listing CRUD, images, reservations
#[derive(Clone)]
pub struct ItemService {
    db: Database,
    images: ImageStore,
}

impl ItemService {
    pub fn new(db: Database, images: ImageStore) -> Self {
        Self { db, images }
    }

    async fn load(&self, id: u64) -> Result<Item, ItemError> {
        ItemRepository::new(self.db.pool().clone())
            .find_by_id(id)
            .await
            .map_err(db_err("Failed to fetch item"))?
            .ok_or(ItemError::NotFound { id })
    }

    /// 아이템 생성 + 업로드 보상 1 크레딧 (같은 트랜잭션)
    /// Create an available listing and award the upload credit
    pub async fn create_item(&self, owner_id: u64, request: ItemCreate) -> Result<Item, ItemError> {
        let title = validate_title(&request.title)?;
        let credits = validate_credits(request.credits.unwrap_or(Decimal::ONE))?;
        let branded = request
            .branded
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .unwrap_or("No");

        let mut tx = self.db.pool().begin().await.map_err(sqlx_err("Failed to begin transaction"))?;

        let item_id = ItemRepository::insert(
            &mut *tx,
            &NewItem {
                owner_id,
                title,
                description: request.description.as_deref(),
                category: request.category.as_deref(),
                size: request.size.as_deref(),
                location: request.location.as_deref(),
                condition: request.condition.as_deref(),
                branded,
                credits,
            },
        )
        .await
        .map_err(db_err("Failed to create item"))?;

        ledger::apply(
            &mut *tx,
            &LedgerEntry::new(
                owner_id,
                UPLOAD_REWARD,
                TransactionType::ItemUpload,
                format!("Credits earned for uploading item: {}", title),
            ),
        )
        .await?;

        tx.commit().await.map_err(sqlx_err("Failed to commit item creation"))?;

        tracing::info!(item_id, owner_id, "item created");
        self.load(item_id).await
    }

    pub async fn list_items(&self, filter: &ItemFilter) -> Result<Vec<Item>, ItemError> {
        ItemRepository::new(self.db.pool().clone())
            .list(filter)
            .await
            .map_err(db_err("Failed to list items"))
    }

    pub async fn get_item(&self, id: u64) -> Result<Item, ItemError> {
        self.load(id).await
    }

    async fn lock_owned(
        conn: &mut sqlx::PgConnection,
        id: u64,
        user_id: u64,
        forbidden: ItemError,
    ) -> Result<ItemRecord, ItemError> {
        let record = ItemRepository::lock_for_update(conn, id)
            .await
            .map_err(db_err("Failed to lock item"))?
            .ok_or(ItemError::NotFound { id })?;

        if record.owner_id != user_id {
            return Err(forbidden);
        }
        Ok(record)
    }

    /// 메타데이터 부분 수정 (소유자만)
    /// Partial update; status may only move between available and locked
    pub async fn update_item(&self, user_id: u64, id: u64, mut update: ItemUpdate) -> Result<Item, ItemError> {
        if let Some(title) = update.title.as_deref() {
            update.title = Some(validate_title(title)?.to_string());
        }
        if let Some(credits) = update.credits {
            update.credits = Some(validate_credits(credits)?);
        }

        let mut tx = self.db.pool().begin().await.map_err(sqlx_err("Failed to begin transaction"))?;
        let record = Self::lock_owned(&mut *tx, id, user_id, ItemError::Forbidden).await?;

        if let Some(next) = update.status {
            if !record.status.can_patch_to(next) {
                return Err(ItemError::InvalidStatusChange);
            }
        }

        ItemRepository::update_metadata(&mut *tx, id, &update)
            .await
            .map_err(db_err("Failed to update item"))?;

        if let Some(next) = update.status.filter(|next| *next != record.status) {
            ItemRepository::set_status(&mut *tx, id, next)
                .await
                .map_err(db_err("Failed to update item status"))?;
        }

        let removed = match update.keep_image_ids.as_deref() {
            Some(keep) => ItemImageRepository::delete_except(&mut *tx, id, keep)
                .await
                .map_err(db_err("Failed to drop item images"))?,
            None => Vec::new(),
        };

        tx.commit().await.map_err(sqlx_err("Failed to commit item update"))?;

        let removed_ids: Vec<String> = removed.into_iter().map(|img| img.id).collect();
        self.images.delete_all(&removed_ids).await;
        self.load(id).await
    }

    /// 이미지 추가 (전부 검증 후 저장)
    pub async fn add_images(&self, user_id: u64, id: u64, files: Vec<UploadedFile>) -> Result<Item, ItemError> {
        let item = self.load(id).await?;
        if item.owner_id != user_id {
            return Err(ItemError::Forbidden);
        }
        if files.is_empty() {
            return Err(ItemError::Validation("No images uploaded".to_string()));
        }

        for file in &files {
            validate_image(file.content_type.as_deref(), &file.bytes)?;
        }

        let image_repo = ItemImageRepository::new(self.db.pool().clone());
        for file in files {
            let stored = self.images.save(file.content_type.as_deref(), &file.bytes).await?;
            let image = ItemImage { id: stored.id, url: stored.url };

            if let Err(e) = image_repo.append(id, &image).await {
                self.images.delete_all(std::slice::from_ref(&image.id)).await;
                return Err(db_err("Failed to save item image")(e));
            }
        }

        tracing::info!(item_id = id, "item images added");
        self.load(id).await
    }

    /// 아이템 삭제
    /// - available 아이템이면 크레딧 차감 (잔액 한도 내)
    /// - pending 요청은 취소 + 환불 + 요청자 알림
    pub async fn delete_item(&self, user_id: u64, id: u64) -> Result<(), ItemError> {
        let owner_name = UserRepository::new(self.db.pool().clone())
            .get_user_by_id(user_id)
            .await
            .map_err(db_err("Failed to fetch owner"))?
            .map(|u| u.display_name().to_string())
            .unwrap_or_else(|| "The owner".to_string());

        let mut tx = self.db.pool().begin().await.map_err(sqlx_err("Failed to begin transaction"))?;
        let record = Self::lock_owned(&mut *tx, id, user_id, ItemError::DeleteForbidden).await?;

        // 1. pending 요청 정리
        let pending = SwapRequestRepository::lock_pending_for_item(&mut *tx, id)
            .await
            .map_err(db_err("Failed to load pending requests"))?;

        for request in &pending {
            SwapRequestRepository::finish(&mut *tx, request.id, SwapStatus::Cancelled)
                .await
                .map_err(db_err("Failed to cancel swap request"))?;

            ledger::apply(
                &mut *tx,
                &LedgerEntry::new(
                    request.requester_id,
                    request.credits_required,
                    TransactionType::CreditAdd,
                    format!("Credits refunded for cancelled swap request of item: {}", record.title),
                ),
            )
            .await?;

            NotificationRepository::insert(
                &mut *tx,
                &NotificationCreate {
                    user_id: request.requester_id,
                    event_type: EventType::RequestCancelled,
                    request_id: request.id,
                    item_id: id,
                    item_title: record.title.clone(),
                    other_user_id: user_id,
                    other_user_name: owner_name.clone(),
                    status: SwapStatus::Cancelled.to_string(),
                    message: Some(format!(
                        "\"{}\" was removed by its owner; your swap request was cancelled and credits refunded",
                        record.title
                    )),
                },
            )
            .await
            .map_err(db_err("Failed to notify requester"))?;
        }

        // 2. 삭제 차감 (available 일 때만)
        let balance = ledger::lock_balance(&mut *tx, user_id).await?;
        let debit = deletion_debit(record.status, record.credits, balance);
        if debit > Decimal::ZERO {
            ledger::apply(
                &mut *tx,
                &LedgerEntry::new(
                    user_id,
                    debit,
                    TransactionType::ItemDeletion,
                    format!("Credits deducted for deleting item: {}", record.title),
                ),
            )
            .await?;
        }

        // 3. 이미지 + 아이템 삭제
        let images = ItemImageRepository::delete_for_item(&mut *tx, id)
            .await
            .map_err(db_err("Failed to delete item images"))?;
        ItemRepository::delete(&mut *tx, id)
            .await
            .map_err(db_err("Failed to delete item"))?;

        tx.commit().await.map_err(sqlx_err("Failed to commit item deletion"))?;

        let image_ids: Vec<String> = images.into_iter().map(|img| img.id).collect();
        self.images.delete_all(&image_ids).await;

        tracing::info!(
            item_id = id,
            owner_id = user_id,
            cancelled_requests = pending.len(),
            debit = %debit,
            "item deleted"
        );
        Ok(())
    }

    /// 24시간 예약 (소유자 제외)
    pub async fn lock_item(&self, user_id: u64, id: u64) -> Result<Item, ItemError> {
        let mut tx = self.db.pool().begin().await.map_err(sqlx_err("Failed to begin transaction"))?;

        let record = ItemRepository::lock_for_update(&mut *tx, id)
            .await
            .map_err(db_err("Failed to lock item"))?
            .ok_or(ItemError::NotFound { id })?;

        if record.owner_id == user_id {
            return Err(ItemError::OwnItem);
        }
        let now = Utc::now();
        let lock_expired = record.locked_until.is_some_and(|until| until <= now);
        match record.status {
            ItemStatus::Available => {}
            ItemStatus::Locked if lock_expired => {}
            ItemStatus::Locked => return Err(ItemError::AlreadyLocked),
            other => return Err(ItemError::NotAvailable { status: other.to_string() }),
        }

        let locked_until = now + Duration::hours(LOCK_DURATION_HOURS);
        ItemRepository::set_lock(&mut *tx, id, user_id, locked_until)
            .await
            .map_err(db_err("Failed to lock item"))?;

        tx.commit().await.map_err(sqlx_err("Failed to commit item lock"))?;

        tracing::info!(item_id = id, locked_by = user_id, %locked_until, "item locked");
        self.load(id).await
    }

    /// 예약 해제 (소유자만)
    pub async fn unlock_item(&self, user_id: u64, id: u64) -> Result<Item, ItemError> {
        let mut tx = self.db.pool().begin().await.map_err(sqlx_err("Failed to begin transaction"))?;
        let record = Self::lock_owned(&mut *tx, id, user_id, ItemError::UnlockForbidden).await?;

        if record.status != ItemStatus::Locked {
            return Err(ItemError::NotLocked);
        }

        ItemRepository::set_status(&mut *tx, id, ItemStatus::Available)
            .await
            .map_err(db_err("Failed to unlock item"))?;

        tx.commit().await.map_err(sqlx_err("Failed to commit item unlock"))?;

        tracing::info!(item_id = id, "item unlocked");
        self.load(id).await
    }

    /// 만료된 예약 해제
    pub async fn release_expired_locks(&self) -> Result<u64, ItemError> {
        ItemRepository::new(self.db.pool().clone())
            .release_expired_locks()
            .await
            .map_err(db_err("Failed to release expired locks"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_are_trimmed_and_bounded() {
        assert_eq!(validate_title("  Denim jacket ").unwrap(), "Denim jacket");
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"x".repeat(MAX_TITLE_LEN)).is_ok());
        assert!(validate_title(&"x".repeat(MAX_TITLE_LEN + 1)).is_err());
    }

    #[test]
    fn credits_must_be_positive() {
        assert_eq!(validate_credits(Decimal::new(1234, 3)).unwrap(), Decimal::new(123, 2));
        assert!(validate_credits(Decimal::ZERO).is_err());
        assert!(validate_credits(Decimal::NEGATIVE_ONE).is_err());
    }

    #[test]
    fn deletion_debit_only_for_available_items_and_clamped() {
        let two = Decimal::new(2, 0);
        assert_eq!(deletion_debit(ItemStatus::Available, two, Decimal::TEN), two);
        assert_eq!(deletion_debit(ItemStatus::Available, two, Decimal::ONE), Decimal::ONE);
        assert_eq!(deletion_debit(ItemStatus::Available, two, Decimal::ZERO), Decimal::ZERO);
        assert_eq!(deletion_debit(ItemStatus::Pending, two, Decimal::TEN), Decimal::ZERO);
        assert_eq!(deletion_debit(ItemStatus::Swapped, two, Decimal::TEN), Decimal::ZERO);
        assert_eq!(deletion_debit(ItemStatus::Locked, two, Decimal::TEN), Decimal::ZERO);
    }
}
