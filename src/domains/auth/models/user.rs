use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

// =====================================================
// User 모델
// =====================================================
// 역할: users 테이블의 한 행
// credits: 크레딧 원장(credit_transactions) 합계의 캐시
// =====================================================

/// 사용자 정보 (DB에서 조회한 전체 행, 비밀번호 해시 포함)
/// User row (includes password hash, never serialized directly)
#[derive(Debug, Clone)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub password_hash: String,
    pub credits: Decimal,
    pub email_verified: bool,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub profile_pic: Option<String>,
    pub instagram_handle: Option<String>,
    pub whatsapp_number: Option<String>,
    pub facebook_url: Option<String>,
    pub twitter_handle: Option<String>,
    pub linkedin_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// 알림 등에 쓰는 표시 이름 (full_name 없으면 username)
    pub fn display_name(&self) -> &str {
        let full_name = self.full_name.trim();
        if full_name.is_empty() { &self.username } else { full_name }
    }
}

/// 사용자 응답 모델 (비밀번호 제외)
/// User response (without password)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(as = UserResponse)]
pub struct UserResponse {
    pub id: u64,

    #[schema(example = "student@college.edu")]
    pub email: String,

    #[schema(example = "thrift_queen")]
    pub username: String,

    #[schema(example = "Sarah Kim")]
    pub full_name: String,

    /// Current credit balance
    /// 현재 크레딧 잔액
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 3.0)]
    pub credits: Decimal,

    pub email_verified: bool,

    pub bio: Option<String>,
    pub location: Option<String>,
    pub profile_pic: Option<String>,
    pub instagram_handle: Option<String>,
    pub whatsapp_number: Option<String>,
    pub facebook_url: Option<String>,
    pub twitter_handle: Option<String>,
    pub linkedin_url: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            full_name: user.full_name,
            credits: user.credits,
            email_verified: user.email_verified,
            bio: user.bio,
            location: user.location,
            profile_pic: user.profile_pic,
            instagram_handle: user.instagram_handle,
            whatsapp_number: user.whatsapp_number,
            facebook_url: user.facebook_url,
            twitter_handle: user.twitter_handle,
            linkedin_url: user.linkedin_url,
            created_at: user.created_at,
        }
    }
}

/// GET /api/auth/me 응답
/// Current user summary
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = MeResponse)]
pub struct MeResponse {
    pub id: u64,
    pub email: String,
    pub username: String,
    pub full_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub credits: Decimal,
    pub email_verified: bool,
}

impl From<User> for MeResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            full_name: user.full_name,
            credits: user.credits,
            email_verified: user.email_verified,
        }
    }
}
