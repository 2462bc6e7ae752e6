use chrono::{DateTime, Utc};

/// Refresh Token 모델 (DB 저장용)
/// Refresh Token model (for database storage)
#[derive(Debug, Clone)]
pub struct RefreshToken {
    pub id: i64,
    pub user_id: i64,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub revoked: bool,
}

impl RefreshToken {
    /// 사용 가능한 토큰인지 (무효화되지 않았고 만료 전)
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        !self.revoked && self.expires_at > now
    }
}

/// Refresh Token 생성 요청
/// Refresh Token creation request
#[derive(Debug)]
pub struct RefreshTokenCreate {
    pub user_id: u64,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn token(revoked: bool, expires_in: Duration) -> RefreshToken {
        let now = Utc::now();
        RefreshToken {
            id: 1,
            user_id: 7,
            token_hash: "abc".to_string(),
            expires_at: now + expires_in,
            created_at: now,
            revoked,
        }
    }

    #[test]
    fn revoked_or_expired_tokens_are_unusable() {
        let now = Utc::now();
        assert!(token(false, Duration::days(1)).is_usable(now));
        assert!(!token(true, Duration::days(1)).is_usable(now));
        assert!(!token(false, Duration::seconds(-5)).is_usable(now));
    }
}
