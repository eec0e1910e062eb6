//! Load stage for `/resources/:id`: resolve the path id to a stored resource and hand it to the handler.

use crate::error::{AppError, CONTEXT_MISSING};
use crate::model::Resource;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path, Request, State},
    http::{header::CONTENT_TYPE, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

pub const INVALID_CONTENT_TYPE: &str = "invalid Content-Type - should be application/json";

/// Resource resolved by [`load_resource`], stored in the request extensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedResource(pub Resource);

#[async_trait]
impl<S> FromRequestParts<S> for LoadedResource
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<LoadedResource>()
            .cloned()
            .ok_or(AppError::Context(CONTEXT_MISSING))
    }
}

/// Route middleware: 400 for a non-integer id, 404 when the store cannot produce the row.
/// Store failures other than not-found also answer 404 at this stage.
pub async fn load_resource(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let id = parse_id(&raw_id)?;
    let resource = state.store.read(id).await.map_err(|e| match e {
        AppError::NotFound(_) => e,
        other => {
            tracing::warn!(id, error = %other, "resource lookup failed");
            AppError::NotFound(other.to_string())
        }
    })?;
    request.extensions_mut().insert(LoadedResource(resource));
    Ok(next.run(request).await)
}

/// 400 for text that is not an integer. An integer outside the `INT` column range
/// cannot name a stored row, so it is reported as not found.
pub fn parse_id(raw: &str) -> Result<i32, AppError> {
    let wide = raw
        .parse::<i64>()
        .map_err(|e| AppError::Validation(format!("invalid resource id {:?}: {}", raw, e)))?;
    i32::try_from(wide).map_err(|_| AppError::NotFound(format!("resource {} not found", wide)))
}

/// Accepts `application/json` with optional parameters (e.g. `; charset=utf-8`).
pub fn require_json(headers: &HeaderMap) -> Result<(), AppError> {
    let is_json = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false);
    if is_json {
        Ok(())
    } else {
        Err(AppError::Validation(INVALID_CONTENT_TYPE.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn with_content_type(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn json_content_type_variants_pass() {
        assert!(require_json(&with_content_type("application/json")).is_ok());
        assert!(require_json(&with_content_type("application/json; charset=utf-8")).is_ok());
        assert!(require_json(&with_content_type("Application/JSON")).is_ok());
    }

    #[test]
    fn other_content_types_are_rejected() {
        assert!(require_json(&HeaderMap::new()).is_err());
        assert!(require_json(&with_content_type("text/plain")).is_err());
        assert!(require_json(&with_content_type("application/jsonp")).is_err());
        let err = require_json(&with_content_type("application/xml")).unwrap_err();
        assert_eq!(err.to_string(), INVALID_CONTENT_TYPE);
    }

    #[test]
    fn ids_must_be_integers() {
        assert_eq!(parse_id("123").unwrap(), 123);
        assert!(matches!(parse_id("abc"), Err(AppError::Validation(_))));
        assert!(matches!(parse_id("1.5"), Err(AppError::Validation(_))));
        assert_eq!(parse_id("-7").unwrap(), -7);
    }

    #[test]
    fn out_of_range_ids_are_not_found() {
        assert!(matches!(parse_id("99999999999"), Err(AppError::NotFound(_))));
        assert!(matches!(parse_id("-99999999999"), Err(AppError::NotFound(_))));
        assert!(matches!(parse_id("99999999999999999999"), Err(AppError::Validation(_))));
    }
}
