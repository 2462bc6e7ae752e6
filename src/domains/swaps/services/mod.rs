// Swaps domain services
pub mod policy;
pub mod swap_service;
pub mod state;

pub use swap_service::*;
pub use state::*;
