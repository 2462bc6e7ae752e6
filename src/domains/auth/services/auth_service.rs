use std::sync::Arc;
use crate::shared::database::{Database, UserRepository, RefreshTokenRepository};
use crate::shared::clients::{Mailer, OutgoingMail};
use crate::shared::errors::AuthError;
use crate::shared::utils::{validate_email, validate_password, validate_username};
use crate::domains::auth::models::{User, RegisterRequest, LoginRequest, RefreshTokenCreate};
use crate::domains::auth::services::JwtService;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use argon2::password_hash::{rand_core::OsRng, SaltString};
use chrono::{Duration, Utc};

/// 로그인/회원가입 결과 (사용자 + 토큰 쌍)
pub struct IssuedSession {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

// 인증 서비스
// AuthService: handles authentication business logic
#[derive(Clone)]
pub struct AuthService {
    db: Database,
    jwt_service: JwtService,
    mailer: Arc<dyn Mailer>,
    public_url: String,
    refresh_token_days: i64,
}

impl AuthService {
    pub fn new(
        db: Database,
        jwt_service: JwtService,
        mailer: Arc<dyn Mailer>,
        public_url: String,
        refresh_token_days: i64,
    ) -> Self {
        Self {
            db,
            jwt_service,
            mailer,
            public_url,
            refresh_token_days,
        }
    }

    // 회원가입 (비즈니스 로직)
    pub async fn register(&self, request: RegisterRequest) -> Result<IssuedSession, AuthError> {
        let email = request.email.trim().to_lowercase();
        let username = request.username.trim().to_string();

        validate_email(&email).map_err(AuthError::Validation)?;
        validate_username(&username).map_err(AuthError::Validation)?;
        validate_password(&request.password).map_err(AuthError::Validation)?;

        let user_repo = UserRepository::new(self.db.pool().clone());

        // 1. 이메일 / 사용자명 중복 확인
        let existing = user_repo
            .get_user_by_email(&email)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to check email existence: {}", e)))?;
        if existing.is_some() {
            return Err(AuthError::EmailAlreadyExists { email });
        }

        let existing = user_repo
            .get_user_by_username(&username)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to check username: {}", e)))?;
        if existing.is_some() {
            return Err(AuthError::UsernameTaken { username });
        }

        // 2. 비밀번호 해싱
        let password_hash = Self::hash_password(&request.password)?;

        // 3. 사용자 생성
        let full_name = request.full_name.as_deref().map(str::trim).unwrap_or_default();
        let user = user_repo
            .create_user(&email, &username, full_name, &password_hash)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to create user: {}", e)))?;

        tracing::info!(user_id = user.id, username = %user.username, "user registered");

        // 4. 인증 메일 (실패해도 가입은 유지)
        self.send_verification_mail(&user).await;

        self.issue_session(user).await
    }

    // 로그인 (비즈니스 로직)
    pub async fn login(&self, request: LoginRequest) -> Result<IssuedSession, AuthError> {
        let user_repo = UserRepository::new(self.db.pool().clone());

        // 1. 이메일로 사용자 조회
        let user = user_repo
            .get_user_by_email(request.email.trim())
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to fetch user: {}", e)))?
            .ok_or(AuthError::InvalidCredentials)?;

        // 2. 비밀번호 검증
        Self::verify_password(&request.password, &user.password_hash)?;

        // 3. 이전 Refresh Token들 무효화 (새 로그인 시 기존 세션 종료)
        RefreshTokenRepository::new(self.db.pool().clone())
            .revoke_all_for_user(user.id)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to revoke previous tokens: {}", e)))?;

        tracing::info!(user_id = user.id, "user logged in");
        self.issue_session(user).await
    }

    async fn issue_session(&self, user: User) -> Result<IssuedSession, AuthError> {
        let access_token = self.jwt_service.generate_access_token(user.id, user.email.clone())?;
        let refresh_token = self.create_refresh_token(user.id).await?;

        Ok(IssuedSession {
            user,
            access_token,
            refresh_token,
        })
    }

    /// Refresh Token 생성 및 DB 저장
    /// Create and store refresh token
    async fn create_refresh_token(&self, user_id: u64) -> Result<String, AuthError> {
        let refresh_token = self.jwt_service.generate_refresh_token();
        let token_hash = self.jwt_service.hash_refresh_token(&refresh_token);
        let expires_at = Utc::now() + Duration::days(self.refresh_token_days);

        RefreshTokenRepository::new(self.db.pool().clone())
            .create(RefreshTokenCreate {
                user_id,
                token_hash,
                expires_at,
            })
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to create refresh token: {}", e)))?;

        // 원본 토큰 반환 (해싱 전)
        Ok(refresh_token)
    }

    /// Refresh Token 검증 및 새 토큰 쌍 발급 (rotation)
    /// Verify refresh token and issue a rotated pair
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<(String, String), AuthError> {
        let refresh_token_repo = RefreshTokenRepository::new(self.db.pool().clone());
        let token_hash = self.jwt_service.hash_refresh_token(refresh_token);

        let stored_token = refresh_token_repo
            .find_by_token_hash(&token_hash)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to find refresh token: {}", e)))?
            .ok_or(AuthError::InvalidToken)?;

        if !stored_token.is_usable(Utc::now()) {
            return Err(AuthError::InvalidToken);
        }

        let user = UserRepository::new(self.db.pool().clone())
            .get_user_by_id(stored_token.user_id as u64)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to fetch user: {}", e)))?
            .ok_or(AuthError::InvalidToken)?;

        let access_token = self.jwt_service.generate_access_token(user.id, user.email.clone())?;

        // 기존 토큰을 먼저 무효화한 후 새 토큰 생성
        refresh_token_repo
            .revoke(&token_hash)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to revoke old refresh token: {}", e)))?;

        let new_refresh_token = self.create_refresh_token(user.id).await?;

        Ok((access_token, new_refresh_token))
    }

    /// 로그아웃 - Refresh Token 무효화
    /// Logout - Revoke refresh token
    pub async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
        let token_hash = self.jwt_service.hash_refresh_token(refresh_token);

        RefreshTokenRepository::new(self.db.pool().clone())
            .revoke(&token_hash)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to revoke refresh token: {}", e)))?;

        Ok(())
    }

    /// 이메일 인증 처리
    /// Mark the token's user as verified
    pub async fn verify_email(&self, token: &str) -> Result<(), AuthError> {
        let claims = self.jwt_service.verify_verification_token(token)?;

        let updated = UserRepository::new(self.db.pool().clone())
            .mark_email_verified(claims.user_id)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to verify email: {}", e)))?;

        if !updated {
            return Err(AuthError::UserNotFound { id: claims.user_id });
        }

        tracing::info!(user_id = claims.user_id, "email verified");
        Ok(())
    }

    async fn send_verification_mail(&self, user: &User) {
        let token = match self.jwt_service.generate_verification_token(user.id, user.email.clone()) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(user_id = user.id, error = %e, "could not create verification token");
                return;
            }
        };

        let link = format!("{}/api/auth/verify/{}", self.public_url, token);
        let mail = OutgoingMail::new(
            user.email.clone(),
            "Verify your SwapCircle email",
            format!(
                "Hi {},\n\nConfirm your email address by visiting:\n{}\n\nThe link expires in 24 hours.",
                user.username, link
            ),
        );

        if let Err(e) = self.mailer.send(mail).await {
            tracing::warn!(user_id = user.id, error = %e, "verification mail failed");
        }
    }

    fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::PasswordHashingFailed(format!("Failed to hash password: {}", e)))?
            .to_string();

        Ok(password_hash)
    }

    fn verify_password(password: &str, password_hash: &str) -> Result<(), AuthError> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|e| AuthError::PasswordVerificationFailed(format!("Invalid password hash: {}", e)))?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AuthError::InvalidCredentials)?;

        Ok(())
    }

    pub async fn get_user_info(&self, user_id: u64) -> Result<User, AuthError> {
        UserRepository::new(self.db.pool().clone())
            .get_user_by_id(user_id)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to fetch user: {}", e)))?
            .ok_or(AuthError::UserNotFound { id: user_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_verifies() {
        let hash = AuthService::hash_password("password123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(AuthService::verify_password("password123", &hash).is_ok());
        assert!(matches!(
            AuthService::verify_password("wrong-password", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
