// Support domain handlers
pub mod support_handler;

pub use support_handler::*;
