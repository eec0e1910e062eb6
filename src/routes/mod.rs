//! Router assembly.

mod common;
mod resource;
pub use common::{common_routes, common_routes_with_ready};
pub use resource::resource_routes;
