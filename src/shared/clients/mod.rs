// Shared clients (outbound mail, image storage)
pub mod mailer;
pub mod image_store;

pub use mailer::*;
pub use image_store::*;
