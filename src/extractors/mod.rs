//! Request extractors and route middleware.

pub mod resource;
pub use resource::*;
