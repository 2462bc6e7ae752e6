// Swaps domain models
pub mod swap_request;

pub use swap_request::*;
