use crate::domains::ratings::models::RatingStats;
use crate::domains::users::models::{
    initials_for, ProfileUpdateRequest, UserProfile, UserSearchQuery, UserSearchResponse, UserSearchResult,
};
use crate::shared::clients::{validate_image, ImageStore};
use crate::shared::database::{
    Database, FavoriteRepository, ItemRepository, RatingRepository, SwapRequestRepository, UserRepository,
};
use crate::shared::errors::UserError;
use crate::shared::utils::{validate_username, UploadedFile};

fn db_err(context: &str) -> impl Fn(anyhow::Error) -> UserError + '_ {
    move |e| UserError::DatabaseError(format!("{}: {:#}", context, e))
}

/// 본인 리소스인지 확인
fn ensure_self(caller_id: u64, user_id: u64) -> Result<(), UserError> {
    if caller_id != user_id {
        return Err(UserError::Forbidden);
    }
    Ok(())
}

// 사용자 프로필 서비스
// UserService: profiles, settings, profile pictures, favorites
#[derive(Clone)]
pub struct UserService {
    db: Database,
    images: ImageStore,
}

impl UserService {
    pub fn new(db: Database, images: ImageStore) -> Self {
        Self { db, images }
    }

    fn users(&self) -> UserRepository {
        UserRepository::new(self.db.pool().clone())
    }

    fn favorites(&self) -> FavoriteRepository {
        FavoriteRepository::new(self.db.pool().clone())
    }

    /// 평점 통계를 붙인 프로필 목록
    pub async fn list_users(&self, viewer_id: Option<u64>) -> Result<Vec<UserProfile>, UserError> {
        let users = self.users().list_users().await.map_err(db_err("Failed to list users"))?;

        let ids: Vec<u64> = users.iter().map(|u| u.id).collect();
        let counts = RatingRepository::new(self.db.pool().clone())
            .star_counts_for_users(&ids)
            .await
            .map_err(db_err("Failed to load rating stats"))?;

        Ok(users
            .into_iter()
            .map(|user| {
                let stats = RatingStats::from_counts(counts.get(&user.id).copied().unwrap_or([0; 5]));
                let mut profile = UserProfile::from_user(user, viewer_id);
                profile.average_rating = stats.average_rating;
                profile.total_ratings = stats.total_ratings;
                profile
            })
            .collect())
    }

    /// 사용자 검색
    /// 정렬: username 완전 일치 -> username 포함 -> full_name 포함
    pub async fn search_users(&self, query: &UserSearchQuery) -> Result<UserSearchResponse, UserError> {
        let (q, limit) = query.validated().map_err(UserError::Validation)?;

        let users = self
            .users()
            .search_users(&q, limit)
            .await
            .map_err(db_err("Failed to search users"))?;

        let ids: Vec<u64> = users.iter().map(|u| u.id).collect();
        let ratings = RatingRepository::new(self.db.pool().clone())
            .star_counts_for_users(&ids)
            .await
            .map_err(db_err("Failed to load rating stats"))?;
        let swaps = SwapRequestRepository::new(self.db.pool().clone())
            .count_approved_for_users(&ids)
            .await
            .map_err(db_err("Failed to count swaps"))?;

        let results: Vec<UserSearchResult> = users
            .into_iter()
            .map(|user| {
                let stats = RatingStats::from_counts(ratings.get(&user.id).copied().unwrap_or([0; 5]));
                UserSearchResult {
                    id: user.id,
                    initials: initials_for(&user.full_name, &user.username),
                    avatar: user.profile_pic,
                    location: user.location,
                    average_rating: stats.average_rating,
                    total_ratings: stats.total_ratings,
                    total_swaps: swaps.get(&user.id).copied().unwrap_or(0),
                    username: user.username,
                    full_name: user.full_name,
                }
            })
            .collect();

        Ok(UserSearchResponse {
            total: results.len(),
            users: results,
            query: q,
        })
    }

    /// 즐겨찾기 + 평점 통계를 채운 프로필
    async fn enrich(&self, profile: &mut UserProfile) -> Result<(), UserError> {
        let stats = RatingStats::from_counts(
            RatingRepository::new(self.db.pool().clone())
                .star_counts(profile.id)
                .await
                .map_err(db_err("Failed to load rating stats"))?,
        );
        profile.average_rating = stats.average_rating;
        profile.total_ratings = stats.total_ratings;
        profile.favorites = self
            .favorites()
            .list_item_ids(profile.id)
            .await
            .map_err(db_err("Failed to load favorites"))?;
        Ok(())
    }

    pub async fn get_profile(&self, user_id: u64, viewer_id: Option<u64>) -> Result<UserProfile, UserError> {
        let user = self
            .users()
            .get_user_by_id(user_id)
            .await
            .map_err(db_err("Failed to fetch user"))?
            .ok_or(UserError::NotFound)?;

        let mut profile = UserProfile::from_user(user, viewer_id);
        self.enrich(&mut profile).await?;
        Ok(profile)
    }

    pub async fn get_by_username(&self, username: &str, viewer_id: Option<u64>) -> Result<UserProfile, UserError> {
        let user = self
            .users()
            .get_user_by_username(username.trim())
            .await
            .map_err(db_err("Failed to fetch user"))?
            .ok_or(UserError::NotFound)?;

        let mut profile = UserProfile::from_user(user, viewer_id);
        self.enrich(&mut profile).await?;
        Ok(profile)
    }

    /// 설정 변경 (허용 필드만, 본인만)
    pub async fn update_profile(
        &self,
        caller_id: u64,
        user_id: u64,
        mut update: ProfileUpdateRequest,
    ) -> Result<UserProfile, UserError> {
        ensure_self(caller_id, user_id)?;
        if update.is_empty() {
            return Err(UserError::NoValidFields);
        }

        if let Some(username) = update.username.as_deref().map(str::trim) {
            validate_username(username).map_err(UserError::Validation)?;

            let taken = self
                .users()
                .get_user_by_username(username)
                .await
                .map_err(db_err("Failed to check username"))?
                .is_some_and(|existing| existing.id != user_id);
            if taken {
                return Err(UserError::UsernameTaken { username: username.to_string() });
            }
            update.username = Some(username.to_string());
        }

        let user = self
            .users()
            .update_profile(user_id, &update)
            .await
            .map_err(db_err("Failed to update profile"))?
            .ok_or(UserError::NotFound)?;

        tracing::info!(user_id, "profile updated");

        let mut profile = UserProfile::from_user(user, Some(caller_id));
        self.enrich(&mut profile).await?;
        Ok(profile)
    }

    /// 프로필 사진 업로드 (첫 번째 `file` 파트 사용)
    pub async fn upload_profile_picture(
        &self,
        caller_id: u64,
        user_id: u64,
        files: Vec<UploadedFile>,
    ) -> Result<UserProfile, UserError> {
        ensure_self(caller_id, user_id)?;

        let file = files
            .into_iter()
            .next()
            .ok_or_else(|| UserError::Validation("No file uploaded".to_string()))?;
        validate_image(file.content_type.as_deref(), &file.bytes)?;

        let stored = self.images.save(file.content_type.as_deref(), &file.bytes).await?;

        let update = ProfileUpdateRequest {
            profile_pic: Some(stored.url.clone()),
            ..Default::default()
        };
        let user = match self.users().update_profile(user_id, &update).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                self.images.delete_all(std::slice::from_ref(&stored.id)).await;
                return Err(UserError::NotFound);
            }
            Err(e) => {
                self.images.delete_all(std::slice::from_ref(&stored.id)).await;
                return Err(db_err("Failed to save profile picture")(e));
            }
        };

        tracing::info!(user_id, image_id = %stored.id, "profile picture updated");

        let mut profile = UserProfile::from_user(user, Some(caller_id));
        self.enrich(&mut profile).await?;
        Ok(profile)
    }

    pub async fn list_favorites(&self, caller_id: u64, user_id: u64) -> Result<Vec<u64>, UserError> {
        ensure_self(caller_id, user_id)?;
        self.favorites()
            .list_item_ids(user_id)
            .await
            .map_err(db_err("Failed to load favorites"))
    }

    /// 즐겨찾기 추가 (중복 추가는 무시)
    pub async fn add_favorite(&self, caller_id: u64, user_id: u64, item_id: u64) -> Result<Vec<u64>, UserError> {
        ensure_self(caller_id, user_id)?;

        let exists = ItemRepository::new(self.db.pool().clone())
            .find_by_id(item_id)
            .await
            .map_err(db_err("Failed to fetch item"))?
            .is_some();
        if !exists {
            return Err(UserError::ItemNotFound { id: item_id });
        }

        self.favorites()
            .add(user_id, item_id)
            .await
            .map_err(db_err("Failed to add favorite"))?;

        self.list_favorites(caller_id, user_id).await
    }

    pub async fn remove_favorite(&self, caller_id: u64, user_id: u64, item_id: u64) -> Result<Vec<u64>, UserError> {
        ensure_self(caller_id, user_id)?;

        self.favorites()
            .remove(user_id, item_id)
            .await
            .map_err(db_err("Failed to remove favorite"))?;

        self.list_favorites(caller_id, user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_owner_passes() {
        assert!(ensure_self(4, 4).is_ok());
        assert!(matches!(ensure_self(4, 5), Err(UserError::Forbidden)));
    }
}
