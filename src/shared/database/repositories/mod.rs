// All repositories module
pub mod auth;
pub mod items;
pub mod swaps;
pub mod credits;
pub mod notifications;
pub mod ratings;
pub mod support;

// Re-export all repositories for convenience
pub use auth::*;
pub use items::*;
pub use swaps::*;
pub use credits::*;
pub use notifications::*;
pub use ratings::*;
pub use support::*;
