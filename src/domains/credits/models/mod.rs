// Credits domain models
pub mod credit;

pub use credit::*;
