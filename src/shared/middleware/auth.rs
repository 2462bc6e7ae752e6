use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    Json,
};
use crate::shared::services::AppState;
use serde_json::json;

type Rejection = (StatusCode, Json<serde_json::Value>);

fn unauthorized(message: &str) -> Rejection {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": message })))
}

/// 인증된 사용자 정보 (JWT 토큰에서 추출)
/// Authenticated user information (extracted from JWT token)
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: u64,
    pub email: String,
}

/// "Authorization: Bearer <token>" 헤더 파싱 및 검증
/// Returns Ok(None) when no Authorization header is present
fn authenticate(parts: &Parts, state: &AppState) -> Result<Option<AuthenticatedUser>, Rejection> {
    // 1. Authorization 헤더에서 토큰 추출
    let auth_header = match parts.headers.get(axum::http::header::AUTHORIZATION) {
        Some(value) => value
            .to_str()
            .map_err(|_| unauthorized("Invalid authorization header"))?,
        None => return Ok(None),
    };

    // 2. "Bearer <token>" 형식 파싱
    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| unauthorized("Invalid authorization format. Expected: 'Bearer <token>'"))?;

    // 3. JWT Service로 토큰 검증 (AppState에서 가져옴)
    let claims = state
        .auth_state
        .jwt_service
        .verify_access_token(token)
        .map_err(|e| unauthorized(&e.to_string()))?;

    Ok(Some(AuthenticatedUser {
        user_id: claims.user_id,
        email: claims.email,
    }))
}

/// 인증 필수 Extractor
///
/// 사용법:
/// ```rust,ignore
/// pub async fn create_item(
///     State(app_state): State<AppState>,
///     authenticated_user: AuthenticatedUser,
/// ) -> Result<...> {
///     let user_id = authenticated_user.user_id;
///     // ...
/// }
/// ```
#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        authenticate(parts, state)?.ok_or_else(|| unauthorized("Missing authorization header"))
    }
}

/// 인증 선택 Extractor (헤더가 없거나 토큰이 잘못되면 None)
/// Optional authentication for public endpoints that personalize output
#[derive(Debug, Clone)]
pub struct MaybeAuthenticatedUser(pub Option<AuthenticatedUser>);

impl MaybeAuthenticatedUser {
    pub fn user_id(&self) -> Option<u64> {
        self.0.as_ref().map(|u| u.user_id)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeAuthenticatedUser {
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthenticatedUser(authenticate(parts, state).ok().flatten()))
    }
}
