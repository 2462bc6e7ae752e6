// Swaps domain handlers
pub mod swap_handler;

pub use swap_handler::*;
