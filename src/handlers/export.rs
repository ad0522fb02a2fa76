//! CSV download handler

use axum::{
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
};

use crate::{AppState, AppResult};
use crate::data::export::{to_csv, EXPORT_CONTENT_TYPE, EXPORT_FILE_NAME};
use super::analytics::apply_filters;
use super::extract::FilterParams;

/// Filtered view as a CSV attachment
pub async fn download(
    State(state): State<AppState>,
    FilterParams(query): FilterParams,
) -> AppResult<impl IntoResponse> {
    let (_, view) = apply_filters(&state, query).await?;
    let body = to_csv(&view)?;

    tracing::info!("Exporting {} records ({} bytes)", view.len(), body.len());

    Ok((
        [
            (CONTENT_TYPE, EXPORT_CONTENT_TYPE.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
            ),
        ],
        body,
    ))
}
