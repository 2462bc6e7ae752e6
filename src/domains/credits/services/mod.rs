// Credits domain services
pub mod ledger;
pub mod credit_service;
pub mod state;

pub use credit_service::*;
pub use state::*;
