//! Analytics handlers
//!
//! Each request recomputes from the current dataset and the predicate in
//! its query string.

use axum::{extract::State, Json};

use crate::{AppState, AppResult};
use crate::data::{self, aggregates, DashboardSnapshot};
use crate::data::types::*;
use crate::models::{FilteredView, FilterPredicate, FilterQuery, MachineRecord};
use super::extract::FilterParams;

/// Resolve the query against the current dataset and filter it
pub(crate) async fn apply_filters(
    state: &AppState,
    query: FilterQuery,
) -> AppResult<(FilterPredicate, FilteredView)> {
    let dataset = state.dataset().await;
    let predicate = query.into_predicate(&dataset)?;
    let view = data::filter(&dataset, &predicate);
    Ok((predicate, view))
}

/// Every tab at once
pub async fn dashboard(
    State(state): State<AppState>,
    FilterParams(query): FilterParams,
) -> AppResult<Json<DashboardSnapshot>> {
    let dataset = state.dataset().await;
    let predicate = query.into_predicate(&dataset)?;
    Ok(Json(DashboardSnapshot::compute(
        &dataset,
        predicate,
        state.config.histogram_bins,
    )))
}

pub async fn overview(
    State(state): State<AppState>,
    FilterParams(query): FilterParams,
) -> AppResult<Json<OverviewMetrics>> {
    let (predicate, view) = apply_filters(&state, query).await?;
    Ok(Json(aggregates::overview(&view, &predicate)))
}

pub async fn sensor_means(
    State(state): State<AppState>,
    FilterParams(query): FilterParams,
) -> AppResult<Json<Vec<MachineSensorMeans>>> {
    let (_, view) = apply_filters(&state, query).await?;
    Ok(Json(aggregates::sensor_means_by_machine(&view)))
}

pub async fn status_distribution(
    State(state): State<AppState>,
    FilterParams(query): FilterParams,
) -> AppResult<Json<Vec<StatusShare>>> {
    let (_, view) = apply_filters(&state, query).await?;
    Ok(Json(aggregates::status_distribution(&view)))
}

pub async fn maintenance(
    State(state): State<AppState>,
    FilterParams(query): FilterParams,
) -> AppResult<Json<Vec<MachineRecord>>> {
    let (_, view) = apply_filters(&state, query).await?;
    Ok(Json(aggregates::maintenance_subset(&view)))
}

pub async fn sensor1_histogram(
    State(state): State<AppState>,
    FilterParams(query): FilterParams,
) -> AppResult<Json<Histogram>> {
    let (_, view) = apply_filters(&state, query).await?;
    Ok(Json(aggregates::sensor1_histogram(&view, state.config.histogram_bins)))
}

pub async fn operating_time(
    State(state): State<AppState>,
    FilterParams(query): FilterParams,
) -> AppResult<Json<Vec<StatusOperatingTime>>> {
    let (_, view) = apply_filters(&state, query).await?;
    Ok(Json(aggregates::operating_time_by_status(&view)))
}

pub async fn sensor_scatter(
    State(state): State<AppState>,
    FilterParams(query): FilterParams,
) -> AppResult<Json<Vec<ScatterPoint>>> {
    let (_, view) = apply_filters(&state, query).await?;
    Ok(Json(aggregates::sensor_scatter(&view)))
}

/// Correlation matrix, 422 when fewer than two records match
pub async fn correlation(
    State(state): State<AppState>,
    FilterParams(query): FilterParams,
) -> AppResult<Json<CorrelationMatrix>> {
    let (_, view) = apply_filters(&state, query).await?;
    Ok(Json(aggregates::correlation_matrix(&view)?))
}

pub async fn trend(
    State(state): State<AppState>,
    FilterParams(query): FilterParams,
) -> AppResult<Json<Vec<TrendPoint>>> {
    let (_, view) = apply_filters(&state, query).await?;
    Ok(Json(aggregates::daily_sensor_trend(&view)))
}
