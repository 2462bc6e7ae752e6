// Ratings domain services
pub mod rating_service;
pub mod state;

pub use rating_service::*;
pub use state::*;
