// Items domain state
use crate::shared::clients::ImageStore;
use crate::shared::database::Database;
use crate::domains::items::services::ItemService;

#[derive(Clone)]
pub struct ItemState {
    pub item_service: ItemService,
}

impl ItemState {
    pub fn new(db: Database, images: ImageStore) -> Self {
        Self {
            item_service: ItemService::new(db, images),
        }
    }
}
