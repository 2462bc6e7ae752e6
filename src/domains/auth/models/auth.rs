use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use crate::domains::auth::models::user::UserResponse;

// 회원가입 요청 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = RegisterRequest)]
pub struct RegisterRequest {
    /// Email address
    /// 이메일 주소
    #[schema(example = "student@college.edu")]
    pub email: String,

    /// Username (unique, 3-30 chars)
    /// 사용자명
    #[schema(example = "thrift_queen")]
    pub username: String,

    /// Full name (optional)
    #[schema(example = "Sarah Kim")]
    pub full_name: Option<String>,

    /// Password (will be hashed)
    /// 비밀번호 (해싱됨)
    #[schema(example = "password123")]
    pub password: String,
}

// 로그인 요청 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = LoginRequest)]
pub struct LoginRequest {
    #[schema(example = "student@college.edu")]
    pub email: String,

    #[schema(example = "password123")]
    pub password: String,
}

// 로그인/회원가입 응답 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = AuthResponse)]
pub struct AuthResponse {
    /// JWT Access Token (짧은 수명)
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,

    /// Refresh Token (긴 수명, DB에 해시 저장)
    #[schema(example = "abc123def456...")]
    pub refresh_token: String,

    pub user: UserResponse,
}

// 토큰 갱신 요청 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = RefreshTokenRequest)]
pub struct RefreshTokenRequest {
    #[schema(example = "abc123def456...")]
    pub refresh_token: String,
}

// 토큰 갱신 응답 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = RefreshTokenResponse)]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub message: String,
}

// 로그아웃 요청 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = LogoutRequest)]
pub struct LogoutRequest {
    #[schema(example = "abc123def456...")]
    pub refresh_token: String,
}

/// 단순 메시지 응답
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = MessageResponse)]
pub struct MessageResponse {
    pub message: String,
}
