// Notifications domain services
pub mod notification_service;
pub mod state;

pub use notification_service::*;
pub use state::*;
