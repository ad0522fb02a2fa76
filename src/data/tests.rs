//! Pipeline tests over generated datasets

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};

use super::aggregates::*;
use super::dashboard::CorrelationView;
use super::export::{from_csv, to_csv};
use super::{filter, generate, DashboardSnapshot, GeneratorConfig};
use crate::models::{
    Dataset, DateRange, FilterPredicate, MachineStatus, MaintenanceFlag, SENSOR1_MAINTENANCE_LIMIT,
};

fn dataset() -> Dataset {
    generate(&GeneratorConfig::default())
}

fn day(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + Days::new(offset)
}

#[test]
fn test_generation_is_deterministic() {
    let a = dataset();
    let b = dataset();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_vec(&a).unwrap(),
        serde_json::to_vec(&b).unwrap()
    );
}

#[test]
fn test_consecutive_dates() {
    let data = dataset();
    assert_eq!(data.len(), 200);

    for (i, record) in data.records().iter().enumerate() {
        assert_eq!(record.date(), day(i as u64));
    }
    assert_eq!(data.date_bounds(), Some((day(0), day(199))));
}

#[test]
fn test_maintenance_flag_matches_rule() {
    for record in dataset().records() {
        let expected = record.sensor1() > SENSOR1_MAINTENANCE_LIMIT
            || record.status() == MachineStatus::Failed;
        assert_eq!(record.needs_maintenance() == MaintenanceFlag::Yes, expected);
    }
}

#[test]
fn test_filter_membership() {
    let data = dataset();
    let predicate = FilterPredicate {
        statuses: BTreeSet::from([MachineStatus::Running, MachineStatus::Stopped]),
        machine_ids: BTreeSet::from(["Maq_1".to_string(), "Maq_5".to_string(), "Maq_12".to_string()]),
        date_range: DateRange::new(day(20), day(150)),
    };
    let view = filter(&data, &predicate);

    let expected: Vec<_> = data
        .records()
        .iter()
        .filter(|r| {
            predicate.statuses.contains(&r.status())
                && predicate.machine_ids.contains(r.machine_id())
                && r.date() >= day(20)
                && r.date() <= day(150)
        })
        .cloned()
        .collect();

    assert!(!view.is_empty());
    assert_eq!(view.records(), expected.as_slice());
}

#[test]
fn test_filter_all_keeps_everything() {
    let data = dataset();
    let view = filter(&data, &FilterPredicate::all(&data));
    assert_eq!(view.records(), data.records());
}

#[test]
fn test_inverted_range_is_empty() {
    let data = dataset();
    let mut predicate = FilterPredicate::all(&data);
    predicate.date_range = DateRange::new(day(100), day(10));

    assert!(filter(&data, &predicate).is_empty());
}

#[test]
fn test_unknown_machine_matches_nothing() {
    let data = dataset();
    let mut predicate = FilterPredicate::all(&data);
    predicate.machine_ids = BTreeSet::from(["Maq_404".to_string()]);

    assert!(filter(&data, &predicate).is_empty());
}

#[test]
fn test_status_percentages_sum_to_hundred() {
    let data = dataset();
    let view = filter(&data, &FilterPredicate::all(&data));
    let total: f64 = status_distribution(&view).iter().map(|s| s.percentage).sum();
    assert!((total - 100.0).abs() < 1e-9);

    let mut predicate = FilterPredicate::all(&data);
    predicate.statuses.clear();
    assert!(status_distribution(&filter(&data, &predicate)).is_empty());
}

#[test]
fn test_aggregates_idempotent() {
    let data = dataset();
    let predicate = FilterPredicate::all(&data);

    let first = DashboardSnapshot::compute(&data, predicate.clone(), DEFAULT_HISTOGRAM_BINS);
    let second = DashboardSnapshot::compute(&data, predicate, DEFAULT_HISTOGRAM_BINS);
    assert_eq!(first, second);
}

#[test]
fn test_csv_round_trip() {
    let data = dataset();
    let mut predicate = FilterPredicate::all(&data);
    predicate.statuses = BTreeSet::from([MachineStatus::Failed, MachineStatus::Stopped]);
    let view = filter(&data, &predicate);

    let bytes = to_csv(&view).unwrap();
    let parsed = from_csv(&bytes).unwrap();

    assert_eq!(parsed.as_slice(), view.records());
}

#[test]
fn test_failed_only_maintenance_subset() {
    let data = dataset();
    let mut predicate = FilterPredicate::all(&data);
    predicate.statuses = BTreeSet::from([MachineStatus::Failed]);
    let view = filter(&data, &predicate);

    let failed = view
        .records()
        .iter()
        .filter(|r| r.status() == MachineStatus::Failed)
        .count();
    let maintenance = maintenance_subset(&view);

    assert!(failed > 0);
    assert_eq!(failed, view.len());
    assert_eq!(maintenance.len(), failed);
}

#[test]
fn test_snapshot_on_empty_view() {
    let data = dataset();
    let mut predicate = FilterPredicate::all(&data);
    predicate.machine_ids.clear();
    let snapshot = DashboardSnapshot::compute(&data, predicate, DEFAULT_HISTOGRAM_BINS);

    assert!(snapshot.records.is_empty());
    assert_eq!(snapshot.overview.metrics.machine_count, 0);
    assert!(snapshot.overview.sensor_means.is_empty());
    assert!(snapshot.details.sensor1_histogram.bins.is_empty());
    assert!(snapshot.details.operating_time.is_empty());
    assert!(snapshot.insights.trend.is_empty());
    assert_eq!(
        snapshot.insights.correlation,
        CorrelationView::InsufficientData { required: 2, available: 0 }
    );
}

#[test]
fn test_snapshot_full_view() {
    let data = dataset();
    let snapshot = DashboardSnapshot::compute(&data, FilterPredicate::all(&data), DEFAULT_HISTOGRAM_BINS);

    assert_eq!(snapshot.details.sensor1_histogram.bins.len(), DEFAULT_HISTOGRAM_BINS);
    assert_eq!(snapshot.details.sensor1_histogram.total(), 200);
    assert_eq!(snapshot.insights.trend.len(), 200);
    assert!(snapshot.overview.metrics.machine_count <= 20);

    let means_total: usize = snapshot.overview.sensor_means.iter().map(|m| m.records).sum();
    assert_eq!(means_total, 200);

    match &snapshot.insights.correlation {
        CorrelationView::Computed(matrix) => {
            for i in 0..4 {
                let diag = matrix.values[i][i].unwrap();
                assert!((diag - 1.0).abs() < 1e-9);
            }
        }
        other => panic!("expected computed matrix, got {:?}", other),
    }
}
