// Support domain services
pub mod support_service;
pub mod state;

pub use support_service::*;
pub use state::*;
