// Ratings domain handlers
pub mod rating_handler;

pub use rating_handler::*;
