// src/domains/auth/services/jwt_service.rs
use crate::shared::errors::AuthError;
use crate::domains::auth::models::jwt::{Claims, TokenPurpose};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sha2::{Sha256, Digest};
use rand::Rng;
use rand::distributions::Alphanumeric;

/// 이메일 인증 토큰 유효 시간
pub const EMAIL_VERIFICATION_HOURS: i64 = 24;

/// JWT 서비스
/// JWT Service for token generation and verification
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_hours: i64,
}

impl JwtService {
    /// JWT Service 생성
    /// Create JWT Service
    pub fn new(secret: &str, access_token_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_hours,
        }
    }

    fn issue(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Access Token 발급 (짧은 수명)
    /// Generate Access Token (short lifetime)
    pub fn generate_access_token(&self, user_id: u64, email: String) -> Result<String, AuthError> {
        let claims = Claims::new(user_id, email, TokenPurpose::Access, self.access_token_hours);
        self.issue(&claims)
    }

    /// 이메일 인증 토큰 발급
    pub fn generate_verification_token(&self, user_id: u64, email: String) -> Result<String, AuthError> {
        let claims = Claims::new(
            user_id,
            email,
            TokenPurpose::EmailVerification,
            EMAIL_VERIFICATION_HOURS,
        );
        self.issue(&claims)
    }

    /// Refresh Token 생성 (랜덤 문자열, DB에 저장할 것)
    /// Generate Refresh Token (random string, to be stored in DB)
    pub fn generate_refresh_token(&self) -> String {
        // 64자 랜덤 문자열 생성
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(64)
            .map(char::from)
            .collect()
    }

    /// Refresh Token 해싱 (DB 저장용)
    /// Hash Refresh Token (for database storage)
    pub fn hash_refresh_token(&self, token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    fn verify(&self, token: &str, purpose: TokenPurpose) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|_| AuthError::InvalidToken)?;

        if token_data.claims.purpose != purpose {
            return Err(AuthError::InvalidToken);
        }
        Ok(token_data.claims)
    }

    /// Access Token 검증
    /// Verify Access Token
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify(token, TokenPurpose::Access)
    }

    /// 이메일 인증 토큰 검증
    pub fn verify_verification_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify(token, TokenPurpose::EmailVerification)
            .map_err(|_| AuthError::InvalidVerificationToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret", 1)
    }

    #[test]
    fn access_token_round_trip() {
        let jwt = service();
        let token = jwt.generate_access_token(42, "a@b.co".into()).unwrap();
        let claims = jwt.verify_access_token(&token).unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.email, "a@b.co");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_purposes_are_not_interchangeable() {
        let jwt = service();
        let verify = jwt.generate_verification_token(7, "a@b.co".into()).unwrap();
        assert!(matches!(jwt.verify_access_token(&verify), Err(AuthError::InvalidToken)));

        let access = jwt.generate_access_token(7, "a@b.co".into()).unwrap();
        assert!(matches!(
            jwt.verify_verification_token(&access),
            Err(AuthError::InvalidVerificationToken)
        ));
        assert_eq!(jwt.verify_verification_token(&verify).unwrap().user_id, 7);
    }

    #[test]
    fn other_secret_is_rejected() {
        let token = service().generate_access_token(1, "a@b.co".into()).unwrap();
        let other = JwtService::new("another-secret", 1);
        assert!(other.verify_access_token(&token).is_err());
        assert!(other.verify_access_token("not-a-jwt").is_err());
    }

    #[test]
    fn refresh_tokens_are_random_and_hash_stably() {
        let jwt = service();
        let a = jwt.generate_refresh_token();
        let b = jwt.generate_refresh_token();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
        assert_eq!(jwt.hash_refresh_token(&a), jwt.hash_refresh_token(&a));
        assert_eq!(jwt.hash_refresh_token(&a).len(), 64);
    }
}
