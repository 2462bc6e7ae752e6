// Credits domain handlers
pub mod credit_handler;

pub use credit_handler::*;
