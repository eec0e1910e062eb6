//! The resource entity and its request payload.

use serde::{Deserialize, Serialize};

/// A stored resource. `id` is assigned by the database on insert and never changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Resource {
    pub id: i32,
    pub name: String,
}

/// Body accepted by create and update. An `id` sent by the client is ignored;
/// a missing `name` is stored as the empty string.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ResourcePayload {
    #[serde(default)]
    pub name: String,
}

impl ResourcePayload {
    pub fn new(name: impl Into<String>) -> Self {
        ResourcePayload { name: name.into() }
    }
}
