// Users domain module (profiles, settings, favorites)
pub mod handlers;
pub mod services;
pub mod models;
pub mod routes;
