// Swap repositories
pub mod swap_request_repository;

pub use swap_request_repository::*;
