//! Aggregate result types and errors

use serde::Serialize;
use chrono::NaiveDate;

use crate::models::{DateRange, MachineStatus};

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AggregateError {
    #[error("insufficient data: {required} records required, {available} available")]
    InsufficientData { required: usize, available: usize },
}

// ============================================================================
// OVERVIEW
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewMetrics {
    /// Distinct machines in the filtered view
    pub machine_count: usize,
    /// Filtered records flagged for maintenance
    pub maintenance_count: usize,
    pub record_count: usize,
    /// Analysed period as selected by the user
    pub period: DateRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MachineSensorMeans {
    pub machine_id: String,
    pub records: usize,
    pub sensor1: f64,
    pub sensor2: f64,
    pub sensor3: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusShare {
    pub status: MachineStatus,
    pub count: usize,
    /// Share of the filtered view, 0..=100
    pub percentage: f64,
}

// ============================================================================
// DETAILS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityPoint {
    pub x: f64,
    pub density: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
    /// Gaussian kernel density estimate over the same range
    pub density: Vec<DensityPoint>,
}

impl Histogram {
    #[cfg(test)]
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusOperatingTime {
    pub status: MachineStatus,
    pub count: usize,
    #[serde(flatten)]
    pub summary: FiveNumberSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub machine_id: String,
    pub status: MachineStatus,
    pub sensor1: f64,
    pub sensor2: f64,
}

// ============================================================================
// INSIGHTS
// ============================================================================

pub const CORRELATION_VARIABLES: [&str; 4] = ["sensor1", "sensor2", "sensor3", "operating_time"];

/// Pearson correlations; `None` where a variable has no variance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub variables: [&'static str; 4],
    pub values: [[Option<f64>; 4]; 4],
    pub sample_size: usize,
}

impl CorrelationMatrix {
    #[cfg(test)]
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = CORRELATION_VARIABLES.iter().position(|v| *v == a)?;
        let j = CORRELATION_VARIABLES.iter().position(|v| *v == b)?;
        self.values[i][j]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub records: usize,
    pub sensor1: f64,
    pub sensor2: f64,
}
