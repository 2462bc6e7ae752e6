// Ratings domain state
use crate::shared::database::Database;
use crate::domains::ratings::services::RatingService;

#[derive(Clone)]
pub struct RatingState {
    pub rating_service: RatingService,
}

impl RatingState {
    pub fn new(db: Database) -> Self {
        Self {
            rating_service: RatingService::new(db),
        }
    }
}
