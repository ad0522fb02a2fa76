//! Dataset handlers

use axum::{body::Bytes, extract::State, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{AppState, AppResult, AppError};
use crate::config::MAX_RECORDS;
use crate::data::{generate, GeneratorConfig};
use crate::models::{Dataset, FilteredView, MachineStatus};
use super::analytics::apply_filters;
use super::extract::FilterParams;

#[derive(Debug, Default, Deserialize)]
pub struct RegenerateRequest {
    pub seed: Option<u64>,
    pub records: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RegenerateResponse {
    pub seed: u64,
    pub records: usize,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Selectable values for the filter controls
#[derive(Debug, Serialize)]
pub struct FilterOptions {
    /// In order of first appearance; all selected by default
    pub statuses: Vec<MachineStatus>,
    pub machine_ids: Vec<String>,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
}

/// Full base dataset
pub async fn get(State(state): State<AppState>) -> Json<Dataset> {
    let dataset = state.dataset().await;
    Json(Dataset::clone(&dataset))
}

/// Replace the dataset with a newly generated one
pub async fn regenerate(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<RegenerateResponse>> {
    let req = parse_regenerate_body(&body)?;

    let mut generator = GeneratorConfig::from_config(&state.config);
    if let Some(seed) = req.seed {
        generator.seed = seed;
    }
    if let Some(records) = req.records {
        if records > MAX_RECORDS {
            return Err(AppError::ValidationError(format!(
                "records must be at most {}",
                MAX_RECORDS
            )));
        }
        generator.records = records;
    }

    let dataset = state.replace_dataset(generate(&generator)).await;
    let bounds = dataset.date_bounds();

    tracing::info!(
        "Dataset regenerated: {} records, seed {}",
        dataset.len(),
        generator.seed
    );

    Ok(Json(RegenerateResponse {
        seed: generator.seed,
        records: dataset.len(),
        start_date: bounds.map(|(start, _)| start),
        end_date: bounds.map(|(_, end)| end),
    }))
}

/// Empty body means "use the configured defaults"
fn parse_regenerate_body(body: &[u8]) -> AppResult<RegenerateRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(RegenerateRequest::default());
    }

    serde_json::from_slice(body)
        .map_err(|e| AppError::ValidationError(format!("invalid regenerate request: {}", e)))
}

/// Filter control domains
pub async fn filter_options(State(state): State<AppState>) -> Json<FilterOptions> {
    let dataset = state.dataset().await;
    let bounds = dataset.date_bounds();

    Json(FilterOptions {
        statuses: dataset.observed_statuses(),
        machine_ids: dataset.observed_machine_ids(),
        min_date: bounds.map(|(min, _)| min),
        max_date: bounds.map(|(_, max)| max),
    })
}

/// Filtered view
pub async fn records(
    State(state): State<AppState>,
    FilterParams(query): FilterParams,
) -> AppResult<Json<FilteredView>> {
    let (_, view) = apply_filters(&state, query).await?;
    Ok(Json(view))
}
