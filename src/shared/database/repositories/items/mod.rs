// Item repositories
pub mod item_repository;
pub mod item_image_repository;
pub mod favorite_repository;

pub use item_repository::*;
pub use item_image_repository::*;
pub use favorite_repository::*;
