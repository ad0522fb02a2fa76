//! Synthetic dataset generator
//!
//! Produces a reproducible fleet table: machine ids, statuses, three
//! normally distributed sensors and a uniform operating time, one record
//! per consecutive day.

use chrono::{Days, NaiveDate};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand_distr::StandardNormal;

use crate::config::Config;
use crate::models::{Dataset, MachineRecord, MachineStatus};

// ============================================================================
// CONSTANTS
// ============================================================================

pub const MACHINE_COUNT: usize = 20;

/// (mean, standard deviation) of sensor1..sensor3
const SENSOR_PARAMS: [(f64, f64); 3] = [(50.0, 10.0), (75.0, 15.0), (100.0, 20.0)];

const OPERATING_TIME_MIN: f64 = 100.0;
const OPERATING_TIME_MAX: f64 = 500.0;

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// PRNG seed; equal configs produce equal datasets
    pub seed: u64,
    /// Number of records
    pub records: usize,
    /// Date of the first record
    pub start_date: NaiveDate,
}

impl GeneratorConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            seed: config.dataset_seed,
            records: config.dataset_records,
            start_date: config.dataset_start_date,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Machine label for a 1-based index
pub fn machine_label(index: usize) -> String {
    format!("Maq_{}", index)
}

// ============================================================================
// GENERATION
// ============================================================================

/// Generate the dataset described by `config`.
///
/// Columns are drawn one after another from a single seeded stream, so the
/// output only depends on the config.
pub fn generate(config: &GeneratorConfig) -> Dataset {
    let n = config.records;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let labels: Vec<String> = (1..=MACHINE_COUNT).map(machine_label).collect();
    let machine_ids: Vec<&String> = (0..n)
        .map(|_| &labels[rng.gen_range(0..labels.len())])
        .collect();

    let statuses = sample_statuses(&mut rng, n);

    let [sensor1, sensor2, sensor3] = SENSOR_PARAMS.map(|(mean, std_dev)| {
        (0..n)
            .map(|_| mean + std_dev * rng.sample::<f64, _>(StandardNormal))
            .collect::<Vec<f64>>()
    });

    let operating_time: Vec<f64> = (0..n)
        .map(|_| rng.gen_range(OPERATING_TIME_MIN..OPERATING_TIME_MAX))
        .collect();

    let records: Vec<MachineRecord> = (0..n)
        .filter_map(|i| {
            let date = config.start_date.checked_add_days(Days::new(i as u64))?;
            Some(MachineRecord::new(
                machine_ids[i].as_str(),
                statuses[i],
                [sensor1[i], sensor2[i], sensor3[i]],
                operating_time[i],
                date,
            ))
        })
        .collect();

    if records.len() < n {
        tracing::warn!(
            "Start date {} leaves room for {} of {} requested records; the rest were dropped",
            config.start_date,
            records.len(),
            n
        );
    }

    tracing::debug!(
        "Generated {} records (seed={}, start={})",
        records.len(),
        config.seed,
        config.start_date
    );

    Dataset::new(records)
}

fn sample_statuses(rng: &mut StdRng, n: usize) -> Vec<MachineStatus> {
    let weights = MachineStatus::ALL.map(MachineStatus::weight);
    match WeightedIndex::new(weights) {
        Ok(dist) => (0..n).map(|_| MachineStatus::ALL[rng.sample(&dist)]).collect(),
        Err(_) => vec![MachineStatus::Running; n],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_default_size() {
        let dataset = generate(&GeneratorConfig::default());
        assert_eq!(dataset.len(), 200);
    }

    #[test]
    fn test_generate_empty() {
        let config = GeneratorConfig {
            records: 0,
            ..Default::default()
        };
        let dataset = generate(&config);
        assert!(dataset.is_empty());
        assert_eq!(dataset.date_bounds(), None);
    }

    #[test]
    fn test_machine_labels_in_domain() {
        let dataset = generate(&GeneratorConfig::default());
        let labels: Vec<String> = (1..=MACHINE_COUNT).map(machine_label).collect();

        for record in dataset.records() {
            assert!(labels.iter().any(|l| l == record.machine_id()));
        }
    }

    #[test]
    fn test_value_ranges() {
        let dataset = generate(&GeneratorConfig {
            records: 2_000,
            ..Default::default()
        });

        for record in dataset.records() {
            assert!(record.operating_time() >= OPERATING_TIME_MIN);
            assert!(record.operating_time() < OPERATING_TIME_MAX);
        }

        // Sample means land near the configured distribution means
        let n = dataset.len() as f64;
        let mean1 = dataset.records().iter().map(|r| r.sensor1()).sum::<f64>() / n;
        let mean3 = dataset.records().iter().map(|r| r.sensor3()).sum::<f64>() / n;
        assert!((mean1 - 50.0).abs() < 2.0, "sensor1 mean {}", mean1);
        assert!((mean3 - 100.0).abs() < 4.0, "sensor3 mean {}", mean3);

        let failed = dataset
            .records()
            .iter()
            .filter(|r| r.status() == MachineStatus::Failed)
            .count() as f64;
        assert!((failed / n - 0.15).abs() < 0.05);
    }

    #[test]
    fn test_dates_stop_at_calendar_end() {
        let start = NaiveDate::MAX - Days::new(4);
        let dataset = generate(&GeneratorConfig {
            records: 10,
            start_date: start,
            ..Default::default()
        });

        assert_eq!(dataset.len(), 5);
        assert_eq!(dataset.date_bounds(), Some((start, NaiveDate::MAX)));
    }

    #[test]
    fn test_seed_changes_output() {
        let a = generate(&GeneratorConfig::default());
        let b = generate(&GeneratorConfig {
            seed: 7,
            ..Default::default()
        });
        assert_ne!(a, b);
    }
}
