use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use chrono::{DateTime, Utc};
use crate::domains::items::models::{ItemRecord, ItemStatus};
use crate::shared::errors::SwapError;

// =====================================================
// 스왑 요청 규칙 (DB 없이 판단 가능한 부분)
// =====================================================

/// 요청 가능한 아이템인지
/// - available
/// - 잠금이 만료되었거나 요청자 본인이 잠근 locked
pub fn ensure_requestable(item: &ItemRecord, requester_id: u64, now: DateTime<Utc>) -> Result<(), SwapError> {
    let requestable = match item.status {
        ItemStatus::Available => true,
        ItemStatus::Locked => {
            item.locked_by == Some(requester_id)
                || item.locked_until.is_some_and(|until| until <= now)
        }
        ItemStatus::Pending | ItemStatus::Swapped => false,
    };

    if !requestable {
        return Err(SwapError::ItemNotAvailable);
    }
    if item.owner_id == requester_id {
        return Err(SwapError::OwnItem);
    }
    Ok(())
}

/// 잔액 확인 (1 크레딧 이하 아이템이면 402)
pub fn ensure_affordable(balance: Decimal, required: Decimal) -> Result<(), SwapError> {
    if balance < required {
        return Err(SwapError::InsufficientCredits {
            payment_required: required <= Decimal::ONE,
        });
    }
    Ok(())
}

/// 동시에 가질 수 있는 pending 요청 수 = floor(balance)
pub fn pending_limit(balance: Decimal) -> i64 {
    balance.floor().to_i64().unwrap_or(i64::MAX).max(0)
}

pub fn ensure_below_pending_limit(balance: Decimal, pending: i64) -> Result<(), SwapError> {
    let limit = pending_limit(balance);
    if pending >= limit {
        return Err(SwapError::PendingLimitReached { limit });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::Duration;

    fn record(status: ItemStatus) -> ItemRecord {
        ItemRecord {
            id: 1,
            owner_id: 10,
            title: "Linen shirt".to_string(),
            credits: Decimal::ONE,
            status,
            locked_by: None,
            locked_until: None,
        }
    }

    fn status_of(err: SwapError) -> StatusCode {
        let (status, _): (StatusCode, axum::Json<serde_json::Value>) = err.into();
        status
    }

    #[test]
    fn only_available_items_are_requestable() {
        let now = Utc::now();
        assert!(ensure_requestable(&record(ItemStatus::Available), 2, now).is_ok());
        assert!(matches!(
            ensure_requestable(&record(ItemStatus::Pending), 2, now),
            Err(SwapError::ItemNotAvailable)
        ));
        assert!(matches!(
            ensure_requestable(&record(ItemStatus::Swapped), 2, now),
            Err(SwapError::ItemNotAvailable)
        ));
    }

    #[test]
    fn locked_items_open_to_holder_or_after_expiry() {
        let now = Utc::now();
        let mut item = record(ItemStatus::Locked);
        item.locked_by = Some(3);
        item.locked_until = Some(now + Duration::hours(2));

        assert!(ensure_requestable(&item, 3, now).is_ok());
        assert!(ensure_requestable(&item, 4, now).is_err());

        item.locked_until = Some(now - Duration::minutes(1));
        assert!(ensure_requestable(&item, 4, now).is_ok());
    }

    #[test]
    fn owner_cannot_request_own_item() {
        let err = ensure_requestable(&record(ItemStatus::Available), 10, Utc::now()).unwrap_err();
        assert_eq!(status_of(err), StatusCode::FORBIDDEN);
    }

    #[test]
    fn cheap_items_answer_payment_required() {
        let err = ensure_affordable(Decimal::ZERO, Decimal::ONE).unwrap_err();
        assert_eq!(status_of(err), StatusCode::PAYMENT_REQUIRED);

        let err = ensure_affordable(Decimal::ONE, Decimal::new(3, 0)).unwrap_err();
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);

        assert!(ensure_affordable(Decimal::new(3, 0), Decimal::new(3, 0)).is_ok());
    }

    #[test]
    fn pending_limit_is_floor_of_balance() {
        assert_eq!(pending_limit(Decimal::new(35, 1)), 3);
        assert_eq!(pending_limit(Decimal::new(9, 1)), 0);
        assert_eq!(pending_limit(Decimal::ZERO), 0);

        assert!(ensure_below_pending_limit(Decimal::new(2, 0), 1).is_ok());
        let err = ensure_below_pending_limit(Decimal::new(2, 0), 2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "You've reached your pending request limit (2 max pending requests based on credits)."
        );
    }
}
