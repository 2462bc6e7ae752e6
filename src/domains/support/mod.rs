// Support domain module (reports, contact form)
pub mod handlers;
pub mod services;
pub mod models;
pub mod routes;
