// Credits domain state
use crate::shared::database::Database;
use crate::domains::credits::services::CreditService;

#[derive(Clone)]
pub struct CreditState {
    pub credit_service: CreditService,
}

impl CreditState {
    pub fn new(db: Database) -> Self {
        Self {
            credit_service: CreditService::new(db),
        }
    }
}
