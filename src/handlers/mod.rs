//! HTTP handlers for the resource collection.

pub mod resource;
pub use resource::*;
