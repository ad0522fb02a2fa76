//! Configuration module

use std::env;

use chrono::NaiveDate;

use crate::data::aggregates::DEFAULT_HISTOGRAM_BINS;

/// Upper bound for a generated dataset
pub const MAX_RECORDS: usize = 100_000;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Seed for the synthetic dataset
    pub dataset_seed: u64,

    /// Number of generated records
    pub dataset_records: usize,

    /// Date of the first record
    pub dataset_start_date: NaiveDate,

    /// Bucket count of the sensor1 histogram
    pub histogram_bins: usize,

    /// Log output format (pretty, json)
    pub log_format: String,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            dataset_seed: env::var("DATASET_SEED")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(42),

            dataset_records: env::var("DATASET_RECORDS")
                .ok()
                .and_then(|n| n.parse().ok())
                .map(|n: usize| {
                    if n > MAX_RECORDS {
                        tracing::warn!(
                            "DATASET_RECORDS={} exceeds the limit, capping at {}",
                            n,
                            MAX_RECORDS
                        );
                    }
                    n.min(MAX_RECORDS)
                })
                .unwrap_or(200),

            dataset_start_date: env::var("DATASET_START_DATE")
                .ok()
                .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok())
                .unwrap_or_else(default_start_date),

            histogram_bins: env::var("HISTOGRAM_BINS")
                .ok()
                .and_then(|b| b.parse().ok())
                .filter(|b: &usize| *b > 0)
                .unwrap_or(DEFAULT_HISTOGRAM_BINS),

            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string()),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            dataset_seed: 42,
            dataset_records: 200,
            dataset_start_date: default_start_date(),
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            log_format: "pretty".to_string(),
            environment: "development".to_string(),
        }
    }
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or(NaiveDate::MIN)
}
