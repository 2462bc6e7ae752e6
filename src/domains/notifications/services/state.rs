// Notifications domain state
use crate::shared::database::Database;
use crate::domains::notifications::services::NotificationService;

#[derive(Clone)]
pub struct NotificationState {
    pub notification_service: NotificationService,
}

impl NotificationState {
    pub fn new(db: Database) -> Self {
        Self {
            notification_service: NotificationService::new(db),
        }
    }
}
