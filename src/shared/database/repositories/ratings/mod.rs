// Rating repositories
pub mod rating_repository;

pub use rating_repository::*;
