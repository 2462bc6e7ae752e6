// Swaps domain state
use crate::shared::database::Database;
use crate::domains::swaps::services::SwapService;

#[derive(Clone)]
pub struct SwapState {
    pub swap_service: SwapService,
}

impl SwapState {
    pub fn new(db: Database) -> Self {
        Self {
            swap_service: SwapService::new(db),
        }
    }
}
