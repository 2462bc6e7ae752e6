// Support domain models (reports, contact form)
pub mod support;

pub use support::*;
