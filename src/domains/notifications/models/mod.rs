// Notifications domain models
pub mod notification;

pub use notification::*;
