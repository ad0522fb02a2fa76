//! Request extractors

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;

use crate::AppError;
use crate::models::FilterQuery;

/// Filter query string; malformed queries become JSON validation errors
#[derive(Debug, Clone)]
pub struct FilterParams(pub FilterQuery);

#[axum::async_trait]
impl<S> FromRequestParts<S> for FilterParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<FilterQuery>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::ValidationError(rejection.body_text()))?;
        Ok(FilterParams(query))
    }
}
