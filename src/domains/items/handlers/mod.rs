// Items domain handlers
pub mod item_handler;

pub use item_handler::*;
