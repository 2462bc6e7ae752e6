// Users domain state
use crate::shared::clients::ImageStore;
use crate::shared::database::Database;
use crate::domains::users::services::UserService;

#[derive(Clone)]
pub struct UserState {
    pub user_service: UserService,
}

impl UserState {
    pub fn new(db: Database, images: ImageStore) -> Self {
        Self {
            user_service: UserService::new(db, images),
        }
    }
}
