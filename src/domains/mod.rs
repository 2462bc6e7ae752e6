// Domain modules
pub mod auth;
pub mod users;
pub mod items;
pub mod swaps;
pub mod credits;
pub mod notifications;
pub mod ratings;
pub mod support;
