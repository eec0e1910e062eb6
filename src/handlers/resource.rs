//! Resource handlers: create, list, get, update, delete.

use crate::error::AppError;
use crate::extractors::{require_json, LoadedResource};
use crate::model::{Resource, ResourcePayload};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header::LOCATION, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

fn parse_payload(body: Result<Bytes, BytesRejection>) -> Result<ResourcePayload, AppError> {
    let bytes = body.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(e.body_text())
        } else {
            AppError::Body(e.body_text())
        }
    })?;
    serde_json::from_slice(&bytes).map_err(|e| AppError::Validation(e.to_string()))
}

pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, AppError> {
    require_json(&headers)?;
    let payload = parse_payload(body)?;
    let id = state.store.create(&payload).await?;
    Ok((StatusCode::CREATED, [(LOCATION, format!("/resources/{}", id))]))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Resource>>, AppError> {
    let resources = state.store.read_all().await?;
    Ok(Json(resources))
}

pub async fn get(loaded: Result<LoadedResource, AppError>) -> Result<Json<Resource>, AppError> {
    let LoadedResource(resource) = loaded?;
    Ok(Json(resource))
}

/// Content-type is checked before the loaded resource so a bad header wins over a missing context.
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    loaded: Result<LoadedResource, AppError>,
    body: Result<Bytes, BytesRejection>,
) -> Result<StatusCode, AppError> {
    require_json(&headers)?;
    let LoadedResource(current) = loaded?;
    let payload = parse_payload(body)?;
    state.store.update(current.id, &payload).await?;
    Ok(StatusCode::OK)
}

pub async fn delete(
    State(state): State<AppState>,
    loaded: Result<LoadedResource, AppError>,
) -> Result<StatusCode, AppError> {
    let LoadedResource(current) = loaded?;
    state.store.delete(current.id).await?;
    Ok(StatusCode::OK)
}
