use crate::domains::ratings::models::{Rating, RatingStats};
use crate::shared::database::{Database, RatingRepository, UserRepository};
use crate::shared::errors::RatingError;

/// 별점 검증 (1~5)
pub fn validate_stars(stars: i64) -> Result<i16, RatingError> {
    if !(1..=5).contains(&stars) {
        return Err(RatingError::InvalidStars { stars });
    }
    Ok(stars as i16)
}

#[derive(Clone)]
pub struct RatingService {
    db: Database,
}

impl RatingService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn repo(&self) -> RatingRepository {
        RatingRepository::new(self.db.pool().clone())
    }

    /// 평점 등록/수정 (rater, rated 쌍마다 하나)
    pub async fn rate_user(&self, rater_id: u64, rated_id: u64, stars: i64) -> Result<Rating, RatingError> {
        let stars = validate_stars(stars)?;
        if rater_id == rated_id {
            return Err(RatingError::SelfRating);
        }

        let exists = UserRepository::new(self.db.pool().clone())
            .get_user_by_id(rated_id)
            .await
            .map_err(|e| RatingError::DatabaseError(format!("Failed to fetch user: {}", e)))?
            .is_some();
        if !exists {
            return Err(RatingError::UserNotFound { id: rated_id });
        }

        let rating = self
            .repo()
            .upsert(rater_id, rated_id, stars)
            .await
            .map_err(|e| RatingError::DatabaseError(format!("Failed to save rating: {}", e)))?;

        tracing::info!(rater_id, rated_id, stars, "user rated");
        Ok(rating)
    }

    pub async fn my_rating(&self, rater_id: u64, rated_id: u64) -> Result<Option<Rating>, RatingError> {
        self.repo()
            .find(rater_id, rated_id)
            .await
            .map_err(|e| RatingError::DatabaseError(format!("Failed to fetch rating: {}", e)))
    }

    pub async fn stats(&self, rated_id: u64) -> Result<RatingStats, RatingError> {
        let counts = self
            .repo()
            .star_counts(rated_id)
            .await
            .map_err(|e| RatingError::DatabaseError(format!("Failed to compute rating stats: {}", e)))?;

        Ok(RatingStats::from_counts(counts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_outside_one_to_five_are_rejected() {
        assert_eq!(validate_stars(1).unwrap(), 1);
        assert_eq!(validate_stars(5).unwrap(), 5);
        assert!(matches!(validate_stars(0), Err(RatingError::InvalidStars { stars: 0 })));
        assert!(validate_stars(6).is_err());
        assert!(validate_stars(-3).is_err());
    }
}
