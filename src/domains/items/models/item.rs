use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

// =====================================================
// Item (리스팅) 모델
// =====================================================
// status 흐름:
//   available -> pending (스왑 요청) -> swapped (승인)
//   available <-> locked (24시간 예약)
// =====================================================

/// 아이템 상태
/// Listing status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Available,
    Pending,
    Swapped,
    Locked,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Available => "available",
            ItemStatus::Pending => "pending",
            ItemStatus::Swapped => "swapped",
            ItemStatus::Locked => "locked",
        }
    }

    /// PATCH로 바꿀 수 있는 상태 전환인지 (available <-> locked 만 허용)
    pub fn can_patch_to(&self, next: ItemStatus) -> bool {
        matches!(
            (self, next),
            (ItemStatus::Available, ItemStatus::Available)
                | (ItemStatus::Available, ItemStatus::Locked)
                | (ItemStatus::Locked, ItemStatus::Locked)
                | (ItemStatus::Locked, ItemStatus::Available)
        )
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(ItemStatus::Available),
            "pending" => Ok(ItemStatus::Pending),
            "swapped" => Ok(ItemStatus::Swapped),
            "locked" => Ok(ItemStatus::Locked),
            other => Err(format!("unknown item status: {}", other)),
        }
    }
}

/// 아이템 이미지
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemImage {
    /// Stored image id (file stem)
    pub id: String,
    /// Public URL
    pub url: String,
}

/// 아이템 (응답에도 그대로 사용)
/// Listing (also used as the response body)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(as = Item)]
pub struct Item {
    pub id: u64,
    pub owner_id: u64,

    #[schema(example = "Vintage denim jacket")]
    pub title: String,
    pub description: Option<String>,

    #[schema(example = "Jackets")]
    pub category: Option<String>,
    #[schema(example = "M")]
    pub size: Option<String>,
    pub location: Option<String>,
    #[schema(example = "Like New")]
    pub condition: Option<String>,
    #[schema(example = "No")]
    pub branded: String,

    /// Credits required to request this item
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 1.0)]
    pub credits: Decimal,

    /// pending 요청이 있는 available 아이템은 pending으로 보고됨
    pub status: ItemStatus,

    pub locked_by: Option<u64>,
    pub locked_until: Option<DateTime<Utc>>,

    pub images: Vec<ItemImage>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 트랜잭션 안에서 잠근 아이템 행 (이미지 제외, 저장된 status 그대로)
/// Item row locked with FOR UPDATE
#[derive(Debug, Clone)]
pub struct ItemRecord {
    pub id: u64,
    pub owner_id: u64,
    pub title: String,
    pub credits: Decimal,
    pub status: ItemStatus,
    pub locked_by: Option<u64>,
    pub locked_until: Option<DateTime<Utc>>,
}

/// 아이템 생성 요청
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(as = ItemCreate)]
pub struct ItemCreate {
    #[schema(example = "Vintage denim jacket")]
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub size: Option<String>,
    pub location: Option<String>,
    pub condition: Option<String>,
    pub branded: Option<String>,

    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>, example = 1.0)]
    pub credits: Option<Decimal>,
}

/// 아이템 수정 요청 (부분 수정)
/// Partial listing update
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = ItemUpdate)]
pub struct ItemUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub size: Option<String>,
    pub location: Option<String>,
    pub condition: Option<String>,
    pub branded: Option<String>,

    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub credits: Option<Decimal>,

    pub status: Option<ItemStatus>,

    /// 유지할 이미지 id 목록 (없으면 이미지 변경 없음)
    pub keep_image_ids: Option<Vec<String>>,
}

pub const MAX_TITLE_LEN: usize = 120;

/// 이미지 업로드 multipart 형식 (문서용)
#[derive(Debug, ToSchema)]
#[schema(as = ItemImagesUpload)]
pub struct ItemImagesUpload {
    /// Repeat the part to upload several images
    #[schema(value_type = Vec<String>)]
    pub images: Vec<Vec<u8>>,
}

/// 정렬 순서
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum ItemSort {
    #[default]
    #[serde(rename = "newest")]
    Newest,
    #[serde(rename = "oldest")]
    Oldest,
    #[serde(rename = "title-asc")]
    TitleAsc,
    #[serde(rename = "title-desc")]
    TitleDesc,
}

impl ItemSort {
    pub fn order_by(&self) -> &'static str {
        match self {
            ItemSort::Newest => "i.created_at DESC, i.id DESC",
            ItemSort::Oldest => "i.created_at ASC, i.id ASC",
            ItemSort::TitleAsc => "LOWER(i.title) ASC, i.id ASC",
            ItemSort::TitleDesc => "LOWER(i.title) DESC, i.id DESC",
        }
    }
}

/// 목록 조회 필터
/// Listing filters (query string)
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ItemFilter {
    pub owner_id: Option<u64>,
    pub status: Option<ItemStatus>,
    pub category: Option<String>,
    pub size: Option<String>,
    pub condition: Option<String>,
    pub location: Option<String>,
    /// Title/description search
    pub q: Option<String>,
    pub sort: Option<ItemSort>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub const DEFAULT_ITEM_PAGE: i64 = 50;
pub const MAX_ITEM_PAGE: i64 = 100;

impl ItemFilter {
    pub fn page(&self) -> (i64, i64) {
        let limit = self.limit.unwrap_or(DEFAULT_ITEM_PAGE).clamp(1, MAX_ITEM_PAGE);
        let offset = self.offset.unwrap_or(0).max(0);
        (limit, offset)
    }
}

/// 잠금/해제 응답
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = ItemLockResponse)]
pub struct ItemLockResponse {
    pub message: String,
    pub item: Item,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_available_and_locked_are_patchable() {
        assert!(ItemStatus::Available.can_patch_to(ItemStatus::Locked));
        assert!(ItemStatus::Locked.can_patch_to(ItemStatus::Available));
        assert!(!ItemStatus::Available.can_patch_to(ItemStatus::Swapped));
        assert!(!ItemStatus::Pending.can_patch_to(ItemStatus::Available));
        assert!(!ItemStatus::Swapped.can_patch_to(ItemStatus::Available));
    }

    #[test]
    fn status_round_trips_through_text() {
        for status in [
            ItemStatus::Available,
            ItemStatus::Pending,
            ItemStatus::Swapped,
            ItemStatus::Locked,
        ] {
            assert_eq!(status.as_str().parse::<ItemStatus>(), Ok(status));
        }
        assert!("sold".parse::<ItemStatus>().is_err());
    }

    #[test]
    fn sort_accepts_frontend_names() {
        let sort: ItemSort = serde_json::from_str("\"title-desc\"").unwrap();
        assert_eq!(sort, ItemSort::TitleDesc);
        assert_eq!(ItemSort::default(), ItemSort::Newest);
    }

    #[test]
    fn page_is_clamped() {
        let filter = ItemFilter { limit: Some(500), offset: Some(-3), ..Default::default() };
        assert_eq!(filter.page(), (MAX_ITEM_PAGE, 0));
        assert_eq!(ItemFilter::default().page(), (DEFAULT_ITEM_PAGE, 0));
    }

    #[test]
    fn update_reads_camel_case_keep_ids() {
        let update: ItemUpdate =
            serde_json::from_str(r#"{"keepImageIds": ["a", "b"], "credits": 2.5}"#).unwrap();
        assert_eq!(update.keep_image_ids, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(update.credits, Some(Decimal::new(25, 1)));
    }
}
