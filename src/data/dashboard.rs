//! Dashboard snapshot
//!
//! One pull-based recomputation: filter the dataset with the current
//! predicate, then derive every aggregate from the filtered view. Nothing is
//! cached between calls; a new predicate means a new snapshot.

use serde::Serialize;

use crate::models::{Dataset, FilteredView, FilterPredicate, MachineRecord};
use super::aggregates;
use super::filter::filter;
use super::types::*;

/// Correlation result as shown to the client
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CorrelationView {
    Computed(CorrelationMatrix),
    InsufficientData { required: usize, available: usize },
}

impl From<Result<CorrelationMatrix, AggregateError>> for CorrelationView {
    fn from(result: Result<CorrelationMatrix, AggregateError>) -> Self {
        match result {
            Ok(matrix) => Self::Computed(matrix),
            Err(AggregateError::InsufficientData { required, available }) => {
                Self::InsufficientData { required, available }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewTab {
    pub metrics: OverviewMetrics,
    pub sensor_means: Vec<MachineSensorMeans>,
    pub status_distribution: Vec<StatusShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailsTab {
    pub maintenance: Vec<MachineRecord>,
    pub sensor1_histogram: Histogram,
    pub operating_time: Vec<StatusOperatingTime>,
    pub sensor_scatter: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightsTab {
    pub correlation: CorrelationView,
    pub trend: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub predicate: FilterPredicate,
    pub overview: OverviewTab,
    pub details: DetailsTab,
    pub insights: InsightsTab,
    pub records: FilteredView,
}

impl DashboardSnapshot {
    pub fn compute(dataset: &Dataset, predicate: FilterPredicate, histogram_bins: usize) -> Self {
        let view = filter(dataset, &predicate);
        Self::from_view(view, predicate, histogram_bins)
    }

    pub fn from_view(view: FilteredView, predicate: FilterPredicate, histogram_bins: usize) -> Self {
        tracing::debug!("Computing dashboard over {} filtered records", view.len());

        let overview = OverviewTab {
            metrics: aggregates::overview(&view, &predicate),
            sensor_means: aggregates::sensor_means_by_machine(&view),
            status_distribution: aggregates::status_distribution(&view),
        };

        let details = DetailsTab {
            maintenance: aggregates::maintenance_subset(&view),
            sensor1_histogram: aggregates::sensor1_histogram(&view, histogram_bins),
            operating_time: aggregates::operating_time_by_status(&view),
            sensor_scatter: aggregates::sensor_scatter(&view),
        };

        let insights = InsightsTab {
            correlation: aggregates::correlation_matrix(&view).into(),
            trend: aggregates::daily_sensor_trend(&view),
        };

        Self {
            predicate,
            overview,
            details,
            insights,
            records: view,
        }
    }
}
