//! Resource routes. Item routes run the load stage before their handler.

use crate::extractors::load_resource;
use crate::handlers::resource;
use crate::state::AppState;
use axum::{middleware, routing::get, Router};

pub fn resource_routes(state: AppState) -> Router {
    let item = Router::new()
        .route(
            "/resources/:id",
            get(resource::get).put(resource::update).delete(resource::delete),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), load_resource));

    Router::new()
        .route("/resources", get(resource::list).post(resource::create))
        .merge(item)
        .with_state(state)
}
