use chrono::Utc;
use sqlx::PgConnection;
use crate::domains::credits::models::{LedgerEntry, TransactionType};
use crate::domains::credits::services::ledger;
use crate::domains::items::models::{ItemRecord, ItemStatus};
use crate::domains::notifications::models::{EventType, NotificationCreate};
use crate::domains::swaps::models::{
    OwnerRequestView, RequesterRequestView, SwapDecisionResponse, SwapHistoryEntry,
    SwapHistoryResponse, SwapRequest, SwapRequestCreated, SwapRequestsResponse, SwapStatus,
};
use crate::domains::swaps::services::policy;
use crate::shared::database::{
    Database, ItemRepository, NotificationRepository, SwapRequestRepository, UserRepository,
};
use crate::shared::errors::SwapError;

fn db_err(context: &str) -> impl Fn(anyhow::Error) -> SwapError + '_ {
    move |e| SwapError::DatabaseError(format!("{}: {:#}", context, e))
}

fn sqlx_err(context: &str) -> impl Fn(sqlx::Error) -> SwapError + '_ {
    move |e| SwapError::DatabaseError(format!("{}: {}", context, e))
}

// =====================================================
// 스왑 요청 서비스
// =====================================================
// 모든 상태 변경은 하나의 트랜잭션 안에서:
//   items 행 잠금 -> swap_requests 행 잠금 -> users 잔액 잠금 (ledger)
// 잠금 순서를 항상 같게 유지
// =====================================================
#[derive(Clone)]
pub struct SwapService {
    db: Database,
}

impl SwapService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    async fn display_name(&self, user_id: u64) -> Result<String, SwapError> {
        Ok(UserRepository::new(self.db.pool().clone())
            .get_user_by_id(user_id)
            .await
            .map_err(db_err("Failed to fetch user"))?
            .map(|u| u.display_name().to_string())
            .unwrap_or_else(|| "Someone".to_string()))
    }

    async fn lock_item(conn: &mut PgConnection, item_id: u64) -> Result<ItemRecord, SwapError> {
        ItemRepository::lock_for_update(conn, item_id)
            .await
            .map_err(db_err("Failed to lock item"))?
            .ok_or(SwapError::ItemNotFound { id: item_id })
    }

    /// 소유자 결정 (승인/거절) 공통 검증
    async fn lock_for_decision(
        conn: &mut PgConnection,
        owner_id: u64,
        item_id: u64,
        request_id: u64,
        action: &'static str,
    ) -> Result<(ItemRecord, SwapRequest), SwapError> {
        let item = Self::lock_item(&mut *conn, item_id).await?;
        if item.owner_id != owner_id {
            return Err(SwapError::NotOwner { action });
        }

        let request = SwapRequestRepository::lock_for_update(&mut *conn, request_id)
            .await
            .map_err(db_err("Failed to lock swap request"))?
            .ok_or(SwapError::RequestNotFound { id: request_id })?;

        if request.item_id != Some(item_id) {
            return Err(SwapError::ItemMismatch);
        }
        if request.status != SwapStatus::Pending {
            return Err(SwapError::NotPending { status: request.status.to_string() });
        }
        Ok((item, request))
    }

    /// pending 요청 종료 + 요청자 환불
    async fn close_and_refund(
        conn: &mut PgConnection,
        request: &SwapRequest,
        status: SwapStatus,
        item_title: &str,
    ) -> Result<(), SwapError> {
        let closed = SwapRequestRepository::finish(&mut *conn, request.id, status)
            .await
            .map_err(db_err("Failed to update swap request"))?;
        if !closed {
            return Err(SwapError::NotPending { status: request.status.to_string() });
        }

        let reason = match status {
            SwapStatus::Rejected => "rejected",
            _ => "cancelled",
        };
        ledger::apply(
            &mut *conn,
            &LedgerEntry::new(
                request.requester_id,
                request.credits_required,
                TransactionType::CreditAdd,
                format!("Credits refunded for {} swap request of item: {}", reason, item_title),
            ),
        )
        .await?;
        Ok(())
    }

    /// 남은 pending 요청이 없으면 아이템을 available 로 되돌림
    async fn reopen_if_idle(conn: &mut PgConnection, item: &ItemRecord) -> Result<(), SwapError> {
        if item.status != ItemStatus::Pending {
            return Ok(());
        }

        let remaining = SwapRequestRepository::lock_pending_for_item(&mut *conn, item.id)
            .await
            .map_err(db_err("Failed to load pending requests"))?;
        if remaining.is_empty() {
            ItemRepository::set_status(&mut *conn, item.id, ItemStatus::Available)
                .await
                .map_err(db_err("Failed to reopen item"))?;
        }
        Ok(())
    }

    async fn notify(conn: &mut PgConnection, data: NotificationCreate) -> Result<(), SwapError> {
        NotificationRepository::insert(conn, &data)
            .await
            .map_err(db_err("Failed to create notification"))?;
        Ok(())
    }

    /// 스왑 요청
    /// 1. 아이템 잠금 + 요청 가능 여부
    /// 2. 중복 요청, 잔액, pending 한도 확인
    /// 3. 크레딧 보류 (swap_debit) + 요청 생성 + 소유자 알림
    pub async fn request_swap(&self, requester_id: u64, item_id: u64) -> Result<SwapRequestCreated, SwapError> {
        let requester_name = self.display_name(requester_id).await?;

        let mut tx = self.db.pool().begin().await.map_err(sqlx_err("Failed to begin transaction"))?;

        let item = Self::lock_item(&mut *tx, item_id).await?;
        policy::ensure_requestable(&item, requester_id, Utc::now())?;

        let existing = SwapRequestRepository::lock_pending_by_requester(&mut *tx, item_id, requester_id)
            .await
            .map_err(db_err("Failed to check existing request"))?;
        if existing.is_some() {
            return Err(SwapError::DuplicateRequest);
        }

        let credits_required = item.credits;
        let balance = ledger::lock_balance(&mut *tx, requester_id).await?;
        policy::ensure_affordable(balance, credits_required)?;

        let pending = SwapRequestRepository::count_pending_for_requester(&mut *tx, requester_id)
            .await
            .map_err(db_err("Failed to count pending requests"))?;
        policy::ensure_below_pending_limit(balance, pending)?;

        ItemRepository::set_status(&mut *tx, item_id, ItemStatus::Pending)
            .await
            .map_err(db_err("Failed to mark item pending"))?;

        ledger::apply(
            &mut *tx,
            &LedgerEntry::new(
                requester_id,
                credits_required,
                TransactionType::SwapDebit,
                format!("Credits held for swap request of item: {}", item.title),
            ),
        )
        .await?;

        let request = SwapRequestRepository::insert_pending(&mut *tx, &item, requester_id, credits_required)
            .await
            .map_err(db_err("Failed to create swap request"))?;

        Self::notify(
            &mut *tx,
            NotificationCreate {
                user_id: item.owner_id,
                event_type: EventType::NewRequest,
                request_id: request.id,
                item_id,
                item_title: item.title.clone(),
                other_user_id: requester_id,
                other_user_name: requester_name,
                status: SwapStatus::Pending.to_string(),
                message: None,
            },
        )
        .await?;

        tx.commit().await.map_err(sqlx_err("Failed to commit swap request"))?;

        tracing::info!(request_id = request.id, item_id, requester_id, credits = %credits_required, "swap requested");

        Ok(SwapRequestCreated {
            status: "requested".to_string(),
            message: "Swap request created. Waiting for owner approval.".to_string(),
            request_id: request.id,
            item_id,
            credits_required: credits_required.normalize(),
        })
    }

    /// 승인: 소유자에게 크레딧 이전, 나머지 pending 요청은 취소 + 환불, 아이템 swapped
    pub async fn approve(&self, owner_id: u64, item_id: u64, request_id: u64) -> Result<SwapDecisionResponse, SwapError> {
        let owner_name = self.display_name(owner_id).await?;

        let mut tx = self.db.pool().begin().await.map_err(sqlx_err("Failed to begin transaction"))?;
        let (item, request) = Self::lock_for_decision(&mut *tx, owner_id, item_id, request_id, "approve").await?;

        let closed = SwapRequestRepository::finish(&mut *tx, request.id, SwapStatus::Approved)
            .await
            .map_err(db_err("Failed to approve swap request"))?;
        if !closed {
            return Err(SwapError::NotPending { status: request.status.to_string() });
        }

        ledger::apply(
            &mut *tx,
            &LedgerEntry::new(
                owner_id,
                request.credits_required,
                TransactionType::SwapCredit,
                format!("Credits received from approved swap of item: {}", item.title),
            ),
        )
        .await?;

        let others = SwapRequestRepository::lock_pending_for_item(&mut *tx, item_id)
            .await
            .map_err(db_err("Failed to load competing requests"))?;
        for other in &others {
            Self::close_and_refund(&mut *tx, other, SwapStatus::Cancelled, &item.title).await?;
            Self::notify(
                &mut *tx,
                NotificationCreate {
                    user_id: other.requester_id,
                    event_type: EventType::RequestCancelled,
                    request_id: other.id,
                    item_id,
                    item_title: item.title.clone(),
                    other_user_id: owner_id,
                    other_user_name: owner_name.clone(),
                    status: SwapStatus::Cancelled.to_string(),
                    message: Some(format!(
                        "\"{}\" was swapped with another member; your request was cancelled and credits refunded",
                        item.title
                    )),
                },
            )
            .await?;
        }

        ItemRepository::set_status(&mut *tx, item_id, ItemStatus::Swapped)
            .await
            .map_err(db_err("Failed to mark item swapped"))?;

        Self::notify(
            &mut *tx,
            NotificationCreate {
                user_id: request.requester_id,
                event_type: EventType::Approved,
                request_id: request.id,
                item_id,
                item_title: item.title.clone(),
                other_user_id: owner_id,
                other_user_name: owner_name,
                status: SwapStatus::Approved.to_string(),
                message: None,
            },
        )
        .await?;

        tx.commit().await.map_err(sqlx_err("Failed to commit swap approval"))?;

        tracing::info!(
            request_id,
            item_id,
            owner_id,
            requester_id = request.requester_id,
            cancelled_others = others.len(),
            "swap approved"
        );

        Ok(SwapDecisionResponse {
            status: SwapStatus::Approved,
            message: format!(
                "Swap request approved. {} credits transferred.",
                request.credits_required.normalize()
            ),
            request_id,
            item_id,
        })
    }

    /// 거절: 요청자 환불, pending 이 남지 않으면 아이템 available
    pub async fn reject(&self, owner_id: u64, item_id: u64, request_id: u64) -> Result<SwapDecisionResponse, SwapError> {
        let owner_name = self.display_name(owner_id).await?;

        let mut tx = self.db.pool().begin().await.map_err(sqlx_err("Failed to begin transaction"))?;
        let (item, request) = Self::lock_for_decision(&mut *tx, owner_id, item_id, request_id, "reject").await?;

        Self::close_and_refund(&mut *tx, &request, SwapStatus::Rejected, &item.title).await?;
        Self::reopen_if_idle(&mut *tx, &item).await?;

        Self::notify(
            &mut *tx,
            NotificationCreate {
                user_id: request.requester_id,
                event_type: EventType::Rejected,
                request_id,
                item_id,
                item_title: item.title.clone(),
                other_user_id: owner_id,
                other_user_name: owner_name,
                status: SwapStatus::Rejected.to_string(),
                message: None,
            },
        )
        .await?;

        tx.commit().await.map_err(sqlx_err("Failed to commit swap rejection"))?;

        tracing::info!(request_id, item_id, owner_id, "swap rejected");

        Ok(SwapDecisionResponse {
            status: SwapStatus::Rejected,
            message: "Swap request rejected.".to_string(),
            request_id,
            item_id,
        })
    }

    /// 요청자 취소
    pub async fn cancel(&self, requester_id: u64, item_id: u64) -> Result<SwapDecisionResponse, SwapError> {
        let requester_name = self.display_name(requester_id).await?;

        let mut tx = self.db.pool().begin().await.map_err(sqlx_err("Failed to begin transaction"))?;
        let item = Self::lock_item(&mut *tx, item_id).await?;

        let request = SwapRequestRepository::lock_pending_by_requester(&mut *tx, item_id, requester_id)
            .await
            .map_err(db_err("Failed to find swap request"))?
            .ok_or(SwapError::NoPendingRequest)?;

        Self::close_and_refund(&mut *tx, &request, SwapStatus::Cancelled, &item.title).await?;
        Self::reopen_if_idle(&mut *tx, &item).await?;

        Self::notify(
            &mut *tx,
            NotificationCreate {
                user_id: item.owner_id,
                event_type: EventType::RequestCancelled,
                request_id: request.id,
                item_id,
                item_title: item.title.clone(),
                other_user_id: requester_id,
                other_user_name: requester_name,
                status: SwapStatus::Cancelled.to_string(),
                message: None,
            },
        )
        .await?;

        tx.commit().await.map_err(sqlx_err("Failed to commit swap cancellation"))?;

        tracing::info!(request_id = request.id, item_id, requester_id, "swap cancelled");

        Ok(SwapDecisionResponse {
            status: SwapStatus::Cancelled,
            message: "Swap request cancelled successfully.".to_string(),
            request_id: request.id,
            item_id,
        })
    }

    /// 내 아이템에 들어온 pending 요청 + 내가 보낸 요청
    pub async fn requests_for(&self, user_id: u64) -> Result<SwapRequestsResponse, SwapError> {
        let repo = SwapRequestRepository::new(self.db.pool().clone());

        let incoming = repo
            .list_pending_for_owner(user_id)
            .await
            .map_err(db_err("Failed to list incoming requests"))?;
        let outgoing = repo
            .list_for_requester(user_id)
            .await
            .map_err(db_err("Failed to list outgoing requests"))?;

        let mut item_ids: Vec<u64> = incoming.iter().chain(&outgoing).filter_map(|r| r.item_id).collect();
        item_ids.sort_unstable();
        item_ids.dedup();

        let items = ItemRepository::new(self.db.pool().clone())
            .find_many(&item_ids)
            .await
            .map_err(db_err("Failed to load request items"))?;

        let requester_ids: Vec<u64> = incoming.iter().map(|r| r.requester_id).collect();
        let parties = repo
            .parties(&requester_ids)
            .await
            .map_err(db_err("Failed to load requesters"))?;

        let as_owner = incoming
            .into_iter()
            .map(|request| OwnerRequestView {
                item: request.item_id.and_then(|id| items.get(&id).cloned()),
                requester: parties.get(&request.requester_id).cloned(),
                request,
            })
            .collect();

        let as_requester = outgoing
            .into_iter()
            .map(|request| RequesterRequestView {
                item: request.item_id.and_then(|id| items.get(&id).cloned()),
                request,
            })
            .collect();

        Ok(SwapRequestsResponse { as_owner, as_requester })
    }

    /// 완료된 스왑 이력 (최신순)
    pub async fn history_for(&self, user_id: u64) -> Result<SwapHistoryResponse, SwapError> {
        let repo = SwapRequestRepository::new(self.db.pool().clone());

        let approved = repo
            .list_approved_for_user(user_id)
            .await
            .map_err(db_err("Failed to list swap history"))?;

        let item_ids: Vec<u64> = approved.iter().filter_map(|r| r.item_id).collect();
        let items = ItemRepository::new(self.db.pool().clone())
            .find_many(&item_ids)
            .await
            .map_err(db_err("Failed to load swapped items"))?;

        let mut user_ids: Vec<u64> = approved
            .iter()
            .flat_map(|r| [r.requester_id, r.owner_id])
            .collect();
        user_ids.sort_unstable();
        user_ids.dedup();
        let parties = repo
            .parties(&user_ids)
            .await
            .map_err(db_err("Failed to load swap parties"))?;

        let swaps = approved
            .into_iter()
            .map(|request| SwapHistoryEntry {
                item: request.item_id.and_then(|id| items.get(&id).cloned()),
                requester: parties.get(&request.requester_id).cloned(),
                owner: parties.get(&request.owner_id).cloned(),
                request,
            })
            .collect();

        Ok(SwapHistoryResponse { swaps })
    }
}
