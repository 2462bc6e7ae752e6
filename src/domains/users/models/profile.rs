use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use crate::domains::auth::models::User;

/// 공개 프로필
/// Public profile; `credits` is only filled in for the profile owner
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(as = UserProfile)]
pub struct UserProfile {
    pub id: u64,
    pub username: String,
    pub full_name: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub profile_pic: Option<String>,
    pub instagram_handle: Option<String>,
    pub whatsapp_number: Option<String>,
    pub facebook_url: Option<String>,
    pub twitter_handle: Option<String>,
    pub linkedin_url: Option<String>,

    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub credits: Decimal,

    /// 즐겨찾기한 아이템 id
    pub favorites: Vec<u64>,

    pub average_rating: f64,
    pub total_ratings: i64,

    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// 조회자가 본인일 때만 크레딧 노출
    pub fn from_user(user: User, viewer_id: Option<u64>) -> Self {
        let credits = if viewer_id == Some(user.id) {
            user.credits
        } else {
            Decimal::ZERO
        };

        Self {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            bio: user.bio,
            location: user.location,
            profile_pic: user.profile_pic,
            instagram_handle: user.instagram_handle,
            whatsapp_number: user.whatsapp_number,
            facebook_url: user.facebook_url,
            twitter_handle: user.twitter_handle,
            linkedin_url: user.linkedin_url,
            credits,
            favorites: Vec::new(),
            average_rating: 0.0,
            total_ratings: 0,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = UserListResponse)]
pub struct UserListResponse {
    pub users: Vec<UserProfile>,
}

/// 프로필 수정 요청 (허용된 필드만 존재, 나머지 키는 무시됨)
/// Settings update; unknown keys such as `credits` are ignored
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[schema(as = ProfileUpdateRequest)]
pub struct ProfileUpdateRequest {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub profile_pic: Option<String>,
    pub instagram_handle: Option<String>,
    pub whatsapp_number: Option<String>,
    pub facebook_url: Option<String>,
    pub twitter_handle: Option<String>,
    pub linkedin_url: Option<String>,
    pub location: Option<String>,
}

impl ProfileUpdateRequest {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.full_name.is_none()
            && self.bio.is_none()
            && self.profile_pic.is_none()
            && self.instagram_handle.is_none()
            && self.whatsapp_number.is_none()
            && self.facebook_url.is_none()
            && self.twitter_handle.is_none()
            && self.linkedin_url.is_none()
            && self.location.is_none()
    }
}

/// 프로필 사진 multipart 형식 (문서용)
#[derive(Debug, ToSchema)]
#[schema(as = ProfilePictureUpload)]
pub struct ProfilePictureUpload {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct UserSearchQuery {
    pub q: String,
    pub limit: Option<i64>,
}

pub const MAX_SEARCH_QUERY_LEN: usize = 100;
pub const MAX_SEARCH_LIMIT: i64 = 50;

impl UserSearchQuery {
    /// 검색어 정리 및 검증
    /// Trimmed query text, or an error message
    pub fn validated(&self) -> Result<(String, i64), String> {
        let q = self.q.trim();
        if q.is_empty() {
            return Err("Search query must not be empty".to_string());
        }
        if q.chars().count() > MAX_SEARCH_QUERY_LEN {
            return Err(format!(
                "Search query must be at most {} characters",
                MAX_SEARCH_QUERY_LEN
            ));
        }

        let limit = self.limit.unwrap_or(10);
        if !(1..=MAX_SEARCH_LIMIT).contains(&limit) {
            return Err(format!("limit must be between 1 and {}", MAX_SEARCH_LIMIT));
        }

        Ok((q.to_string(), limit))
    }
}

/// 검색 결과 한 건 (프론트엔드가 camelCase로 읽음)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = UserSearchResult)]
pub struct UserSearchResult {
    pub id: u64,
    pub username: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub initials: String,
    pub location: Option<String>,
    pub average_rating: f64,
    pub total_ratings: i64,
    pub total_swaps: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = UserSearchResponse)]
pub struct UserSearchResponse {
    pub users: Vec<UserSearchResult>,
    pub total: usize,
    pub query: String,
}

/// 이니셜: full_name 첫 글자, 없으면 username 첫 글자, 둘 다 없으면 "U"
pub fn initials_for(full_name: &str, username: &str) -> String {
    full_name
        .trim()
        .chars()
        .next()
        .or_else(|| username.trim().chars().next())
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "U".to_string())
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = FavoritesResponse)]
pub struct FavoritesResponse {
    pub message: String,
    pub favorites: Vec<u64>,
}
