//! Aggregate views over a filtered view
//!
//! Every function here is pure: same view in, same output out.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;

use crate::models::{FilteredView, FilterPredicate, MachineRecord, MachineStatus};
use super::types::*;

// ============================================================================
// CONSTANTS
// ============================================================================

pub const DEFAULT_HISTOGRAM_BINS: usize = 30;

/// Points at which the density curve is sampled
const DENSITY_POINTS: usize = 100;

/// Pearson correlation needs at least this many rows
const MIN_CORRELATION_RECORDS: usize = 2;

// ============================================================================
// OVERVIEW
// ============================================================================

pub fn overview(view: &FilteredView, predicate: &FilterPredicate) -> OverviewMetrics {
    let machines: HashSet<&str> = view.records().iter().map(|r| r.machine_id()).collect();

    OverviewMetrics {
        machine_count: machines.len(),
        maintenance_count: view
            .records()
            .iter()
            .filter(|r| r.needs_maintenance().is_yes())
            .count(),
        record_count: view.len(),
        period: predicate.date_range,
    }
}

/// Mean of sensor1..3 per machine, ordered by machine id
pub fn sensor_means_by_machine(view: &FilteredView) -> Vec<MachineSensorMeans> {
    let mut groups: BTreeMap<&str, (usize, [f64; 3])> = BTreeMap::new();

    for record in view.records() {
        let (count, sums) = groups.entry(record.machine_id()).or_insert((0, [0.0; 3]));
        *count += 1;
        sums[0] += record.sensor1();
        sums[1] += record.sensor2();
        sums[2] += record.sensor3();
    }

    groups
        .into_iter()
        .map(|(machine_id, (count, sums))| {
            let n = count as f64;
            MachineSensorMeans {
                machine_id: machine_id.to_string(),
                records: count,
                sensor1: sums[0] / n,
                sensor2: sums[1] / n,
                sensor3: sums[2] / n,
            }
        })
        .collect()
}

/// Percentage of each status, most frequent first
pub fn status_distribution(view: &FilteredView) -> Vec<StatusShare> {
    if view.is_empty() {
        return Vec::new();
    }

    let total = view.len() as f64;
    let mut shares: Vec<StatusShare> = MachineStatus::ALL
        .into_iter()
        .map(|status| {
            let count = view.records().iter().filter(|r| r.status() == status).count();
            StatusShare {
                status,
                count,
                percentage: count as f64 * 100.0 / total,
            }
        })
        .filter(|share| share.count > 0)
        .collect();

    // Stable: equal counts keep enum order
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares
}

// ============================================================================
// DETAILS
// ============================================================================

pub fn maintenance_subset(view: &FilteredView) -> Vec<MachineRecord> {
    view.records()
        .iter()
        .filter(|r| r.needs_maintenance().is_yes())
        .cloned()
        .collect()
}

/// Equal-width histogram of sensor1 with a density curve.
///
/// Bins span [min, max] with the last bin closed. A constant sample is
/// widened to [v - 0.5, v + 0.5].
pub fn sensor1_histogram(view: &FilteredView, bins: usize) -> Histogram {
    let values: Vec<f64> = view.records().iter().map(|r| r.sensor1()).collect();
    let Some((min, max)) = min_max(&values) else {
        return Histogram::default();
    };
    if bins == 0 {
        return Histogram::default();
    }

    let (lo, hi) = if min == max { (min - 0.5, max + 0.5) } else { (min, max) };
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for v in &values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    let last = bins - 1;
    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: lo + i as f64 * width,
            upper: if i == last { hi } else { lo + (i + 1) as f64 * width },
            count,
        })
        .collect();

    Histogram {
        bins,
        density: kernel_density(&values, min, max),
    }
}

/// Five-number summary of operating time per status, enum order
pub fn operating_time_by_status(view: &FilteredView) -> Vec<StatusOperatingTime> {
    MachineStatus::ALL
        .into_iter()
        .filter_map(|status| {
            let values: Vec<f64> = view
                .records()
                .iter()
                .filter(|r| r.status() == status)
                .map(|r| r.operating_time())
                .collect();

            five_number_summary(&values).map(|summary| StatusOperatingTime {
                status,
                count: values.len(),
                summary,
            })
        })
        .collect()
}

pub fn sensor_scatter(view: &FilteredView) -> Vec<ScatterPoint> {
    view.records()
        .iter()
        .map(|r| ScatterPoint {
            machine_id: r.machine_id().to_string(),
            status: r.status(),
            sensor1: r.sensor1(),
            sensor2: r.sensor2(),
        })
        .collect()
}

// ============================================================================
// INSIGHTS
// ============================================================================

/// Pearson correlation across sensor1..3 and operating time
pub fn correlation_matrix(view: &FilteredView) -> Result<CorrelationMatrix, AggregateError> {
    let n = view.len();
    if n < MIN_CORRELATION_RECORDS {
        return Err(AggregateError::InsufficientData {
            required: MIN_CORRELATION_RECORDS,
            available: n,
        });
    }

    let columns: [Vec<f64>; 4] = [
        view.records().iter().map(|r| r.sensor1()).collect(),
        view.records().iter().map(|r| r.sensor2()).collect(),
        view.records().iter().map(|r| r.sensor3()).collect(),
        view.records().iter().map(|r| r.operating_time()).collect(),
    ];

    let mut values = [[None; 4]; 4];
    for (i, row) in values.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = pearson(&columns[i], &columns[j]);
        }
    }

    Ok(CorrelationMatrix {
        variables: CORRELATION_VARIABLES,
        values,
        sample_size: n,
    })
}

/// Daily mean of sensor1 and sensor2, ascending by date
pub fn daily_sensor_trend(view: &FilteredView) -> Vec<TrendPoint> {
    let mut days: BTreeMap<NaiveDate, (usize, f64, f64)> = BTreeMap::new();

    for record in view.records() {
        let (count, s1, s2) = days.entry(record.date()).or_insert((0, 0.0, 0.0));
        *count += 1;
        *s1 += record.sensor1();
        *s2 += record.sensor2();
    }

    days.into_iter()
        .map(|(date, (count, s1, s2))| TrendPoint {
            date,
            records: count,
            sensor1: s1 / count as f64,
            sensor2: s2 / count as f64,
        })
        .collect()
}

// ============================================================================
// HELPERS
// ============================================================================

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(values.iter().fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))))
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Quantile with linear interpolation between order statistics
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (pos - lower as f64)
}

pub fn five_number_summary(values: &[f64]) -> Option<FiveNumberSummary> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    Some(FiveNumberSummary {
        min: sorted[0],
        q1: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q3: quantile(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    })
}

fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let (mx, my) = (mean(x), mean(y));

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in x.iter().zip(y) {
        let (dx, dy) = (a - mx, b - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let denom = (sxx * syy).sqrt();
    if denom.is_nan() || denom <= f64::EPSILON {
        return None;
    }
    Some((sxy / denom).clamp(-1.0, 1.0))
}

/// Gaussian KDE with Scott's bandwidth, sampled over [min, max]
fn kernel_density(values: &[f64], min: f64, max: f64) -> Vec<DensityPoint> {
    let n = values.len();
    if n < 2 || min == max {
        return Vec::new();
    }

    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64;
    let bandwidth = variance.sqrt() * (n as f64).powf(-0.2);
    if bandwidth.is_nan() || bandwidth <= 0.0 {
        return Vec::new();
    }

    let norm = 1.0 / (n as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    let step = (max - min) / (DENSITY_POINTS - 1) as f64;

    (0..DENSITY_POINTS)
        .map(|i| {
            let x = min + i as f64 * step;
            let density = values
                .iter()
                .map(|v| (-0.5 * ((x - v) / bandwidth).powi(2)).exp())
                .sum::<f64>()
                * norm;
            DensityPoint { x, density }
        })
        .collect()
}
