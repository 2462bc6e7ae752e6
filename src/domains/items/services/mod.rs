// Items domain services
pub mod item_service;
pub mod lock_scheduler;
pub mod state;

pub use item_service::*;
pub use lock_scheduler::*;
pub use state::*;
