// Support domain state
use std::sync::Arc;
use crate::shared::clients::Mailer;
use crate::shared::database::Database;
use crate::domains::support::services::SupportService;

#[derive(Clone)]
pub struct SupportState {
    pub support_service: SupportService,
}

impl SupportState {
    pub fn new(db: Database, mailer: Arc<dyn Mailer>, admin_email: String) -> Self {
        Self {
            support_service: SupportService::new(db, mailer, admin_email),
        }
    }
}
