//! Resource service: REST CRUD for a single `resource` entity stored in PostgreSQL.

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod server;
pub mod state;
pub mod store;

pub use config::{DatabaseSettings, ServerSettings};
pub use db::ConnectionProvider;
pub use error::{AppError, ConfigError};
pub use extractors::LoadedResource;
pub use model::{Resource, ResourcePayload};
pub use routes::{common_routes, common_routes_with_ready, resource_routes};
pub use server::build_app;
pub use state::AppState;
pub use store::{PgResourceStore, ResourceRepository};
