use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use crate::domains::items::models::Item;

// =====================================================
// SwapRequest 상태 머신
// =====================================================
//   pending -> approved   (소유자 승인, 크레딧 이전)
//   pending -> rejected   (소유자 거절, 환불)
//   pending -> cancelled  (요청자 취소 / 다른 요청 승인 / 아이템 삭제, 환불)
// approved / rejected / cancelled 는 종료 상태
// =====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SwapStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl SwapStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwapStatus::Pending => "pending",
            SwapStatus::Approved => "approved",
            SwapStatus::Rejected => "rejected",
            SwapStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, SwapStatus::Pending)
    }

    /// 허용된 전환인지 (pending에서 종료 상태로 한 번만)
    pub fn can_transition_to(&self, next: SwapStatus) -> bool {
        *self == SwapStatus::Pending && next.is_terminal()
    }
}

impl fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwapStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(SwapStatus::Pending),
            "approved" => Ok(SwapStatus::Approved),
            "rejected" => Ok(SwapStatus::Rejected),
            "cancelled" => Ok(SwapStatus::Cancelled),
            other => Err(format!("unknown swap status: {}", other)),
        }
    }
}

/// 스왑 요청
/// Swap request row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(as = SwapRequest)]
pub struct SwapRequest {
    pub id: u64,
    /// 아이템이 삭제되면 None
    pub item_id: Option<u64>,
    /// Item owner when the request was made
    pub owner_id: u64,
    /// Item title when the request was made
    pub item_title: String,
    pub requester_id: u64,

    /// Credits held when the request was created
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub credits_required: Decimal,

    pub status: SwapStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 요청 목록에 붙는 사용자 요약
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SwapParty {
    pub id: u64,
    pub username: String,
    pub full_name: String,
    pub profile_pic: Option<String>,
}

/// POST /items/{id}/request 응답
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = SwapRequestCreated)]
pub struct SwapRequestCreated {
    pub status: String,
    pub message: String,
    pub request_id: u64,
    pub item_id: u64,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub credits_required: Decimal,
}

/// approve / reject / cancel 응답
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = SwapDecisionResponse)]
pub struct SwapDecisionResponse {
    pub status: SwapStatus,
    pub message: String,
    pub request_id: u64,
    pub item_id: u64,
}

/// 내 아이템에 들어온 pending 요청
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OwnerRequestView {
    #[serde(flatten)]
    pub request: SwapRequest,
    pub item: Option<Item>,
    pub requester: Option<SwapParty>,
}

/// 내가 보낸 요청
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RequesterRequestView {
    #[serde(flatten)]
    pub request: SwapRequest,
    pub item: Option<Item>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = SwapRequestsResponse)]
pub struct SwapRequestsResponse {
    pub as_owner: Vec<OwnerRequestView>,
    pub as_requester: Vec<RequesterRequestView>,
}

/// 완료된 스왑 (승인된 요청)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SwapHistoryEntry {
    #[serde(flatten)]
    pub request: SwapRequest,
    pub item: Option<Item>,
    pub requester: Option<SwapParty>,
    pub owner: Option<SwapParty>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = SwapHistoryResponse)]
pub struct SwapHistoryResponse {
    pub swaps: Vec<SwapHistoryEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_leaves_exactly_once() {
        for next in [SwapStatus::Approved, SwapStatus::Rejected, SwapStatus::Cancelled] {
            assert!(SwapStatus::Pending.can_transition_to(next));
            for after in [
                SwapStatus::Pending,
                SwapStatus::Approved,
                SwapStatus::Rejected,
                SwapStatus::Cancelled,
            ] {
                assert!(!next.can_transition_to(after), "{} -> {}", next, after);
            }
        }
        assert!(!SwapStatus::Pending.can_transition_to(SwapStatus::Pending));
    }

    #[test]
    fn flattened_request_keeps_top_level_fields() {
        let view = RequesterRequestView {
            request: SwapRequest {
                id: 4,
                item_id: Some(9),
                owner_id: 3,
                item_title: "Scarf".to_string(),
                requester_id: 2,
                credits_required: Decimal::new(15, 1),
                status: SwapStatus::Pending,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            item: None,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["id"], 4);
        assert_eq!(json["status"], "pending");
        assert_eq!(json["credits_required"], 1.5);
        assert!(json["item"].is_null());
    }
}
