// Notifications domain handlers
pub mod notification_handler;

pub use notification_handler::*;
