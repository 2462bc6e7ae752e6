// Notifications domain module
pub mod handlers;
pub mod services;
pub mod models;
pub mod routes;
