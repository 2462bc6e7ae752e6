use sqlx::{PgPool, Row};
use sqlx::postgres::PgRow;
use anyhow::{Context, Result};
use crate::domains::auth::models::user::User;
use crate::domains::users::models::ProfileUpdateRequest;

const USER_COLUMNS: &str = r#"
    id, email, username, full_name, password_hash, credits, email_verified,
    bio, location, profile_pic, instagram_handle, whatsapp_number,
    facebook_url, twitter_handle, linkedin_url, created_at, updated_at
"#;

fn map_user(row: &PgRow) -> User {
    User {
        id: row.get::<i64, _>("id") as u64,
        email: row.get("email"),
        username: row.get("username"),
        full_name: row.get("full_name"),
        password_hash: row.get("password_hash"),
        credits: row.get("credits"),
        email_verified: row.get("email_verified"),
        bio: row.get("bio"),
        location: row.get("location"),
        profile_pic: row.get("profile_pic"),
        instagram_handle: row.get("instagram_handle"),
        whatsapp_number: row.get("whatsapp_number"),
        facebook_url: row.get("facebook_url"),
        twitter_handle: row.get("twitter_handle"),
        linkedin_url: row.get("linkedin_url"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // 사용자 생성 (크레딧 0, 이메일 미인증)
    // Create user
    pub async fn create_user(
        &self,
        email: &str,
        username: &str,
        full_name: &str,
        password_hash: &str,
    ) -> Result<User> {
        let sql = format!(
            r#"
            INSERT INTO users (email, username, full_name, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(email)
            .bind(username)
            .bind(full_name)
            .bind(password_hash)
            .fetch_one(&self.pool)
            .await
            .context("Failed to create user")?;

        Ok(map_user(&row))
    }

    // 이메일로 사용자 조회 (로그인용)
    // Get user by email (for login)
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE LOWER(email) = LOWER($1)", USER_COLUMNS);

        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch user by email")?;

        Ok(row.as_ref().map(map_user))
    }

    // ID로 사용자 조회
    // Get user by ID
    pub async fn get_user_by_id(&self, id: u64) -> Result<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);

        let row = sqlx::query(&sql)
            .bind(id as i64)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch user by id")?;

        Ok(row.as_ref().map(map_user))
    }

    // 사용자명으로 조회
    // Get user by username
    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);

        let row = sqlx::query(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch user by username")?;

        Ok(row.as_ref().map(map_user))
    }

    /// 전체 사용자 목록 (가입순)
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let sql = format!("SELECT {} FROM users ORDER BY id ASC", USER_COLUMNS);

        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list users")?;

        Ok(rows.iter().map(map_user).collect())
    }

    /// 사용자 검색
    /// 정렬: username 완전 일치 -> username 포함 -> full_name 포함
    pub async fn search_users(&self, query: &str, limit: i64) -> Result<Vec<User>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM users
            WHERE username ILIKE '%' || $2 || '%' OR full_name ILIKE '%' || $2 || '%'
            ORDER BY
                CASE
                    WHEN LOWER(username) = LOWER($1) THEN 0
                    WHEN username ILIKE '%' || $2 || '%' THEN 1
                    ELSE 2
                END,
                username ASC
            LIMIT $3
            "#,
            USER_COLUMNS
        );

        let rows = sqlx::query(&sql)
            .bind(query)
            .bind(escape_like(query))
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .context("Failed to search users")?;

        Ok(rows.iter().map(map_user).collect())
    }

    /// 프로필 부분 수정 (None 필드는 유지)
    /// Partial profile update
    pub async fn update_profile(&self, id: u64, update: &ProfileUpdateRequest) -> Result<Option<User>> {
        let sql = format!(
            r#"
            UPDATE users SET
                username         = COALESCE($2, username),
                full_name        = COALESCE($3, full_name),
                bio              = COALESCE($4, bio),
                profile_pic      = COALESCE($5, profile_pic),
                instagram_handle = COALESCE($6, instagram_handle),
                whatsapp_number  = COALESCE($7, whatsapp_number),
                facebook_url     = COALESCE($8, facebook_url),
                twitter_handle   = COALESCE($9, twitter_handle),
                linkedin_url     = COALESCE($10, linkedin_url),
                location         = COALESCE($11, location),
                updated_at       = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(id as i64)
            .bind(update.username.as_deref())
            .bind(update.full_name.as_deref())
            .bind(update.bio.as_deref())
            .bind(update.profile_pic.as_deref())
            .bind(update.instagram_handle.as_deref())
            .bind(update.whatsapp_number.as_deref())
            .bind(update.facebook_url.as_deref())
            .bind(update.twitter_handle.as_deref())
            .bind(update.linkedin_url.as_deref())
            .bind(update.location.as_deref())
            .fetch_optional(&self.pool)
            .await
            .context("Failed to update user profile")?;

        Ok(row.as_ref().map(map_user))
    }

    /// 이메일 인증 완료 처리
    pub async fn mark_email_verified(&self, id: u64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users SET email_verified = TRUE, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id as i64)
        .execute(&self.pool)
        .await
        .context("Failed to mark email verified")?;

        Ok(result.rows_affected() > 0)
    }
}

/// ILIKE 패턴 특수문자 이스케이프
pub fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("thrift_queen"), "thrift\\_queen");
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("plain"), "plain");
    }
}
