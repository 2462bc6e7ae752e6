// Ratings domain models
pub mod rating;

pub use rating::*;
