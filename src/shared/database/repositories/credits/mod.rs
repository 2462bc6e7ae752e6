// Credit repositories
pub mod credit_transaction_repository;

pub use credit_transaction_repository::*;
