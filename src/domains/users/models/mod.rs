// Users domain models
pub mod profile;

pub use profile::*;
