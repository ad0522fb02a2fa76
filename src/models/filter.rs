//! Filter predicate model

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

use super::dataset::Dataset;
use super::record::{MachineRecord, MachineStatus};

#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("invalid {field} date '{value}', expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },
}

/// Inclusive calendar date range. `start > end` is allowed and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// User selection: status set, machine id set and date range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterPredicate {
    pub statuses: BTreeSet<MachineStatus>,
    pub machine_ids: BTreeSet<String>,
    pub date_range: DateRange,
}

impl FilterPredicate {
    /// Predicate selecting every observed value of the dataset
    pub fn all(dataset: &Dataset) -> Self {
        let (start, end) = dataset
            .date_bounds()
            .unwrap_or((NaiveDate::MIN, NaiveDate::MAX));

        Self {
            statuses: dataset.observed_statuses().into_iter().collect(),
            machine_ids: dataset.observed_machine_ids().into_iter().collect(),
            date_range: DateRange::new(start, end),
        }
    }

    pub fn matches(&self, record: &MachineRecord) -> bool {
        self.statuses.contains(&record.status())
            && self.machine_ids.contains(record.machine_id())
            && self.date_range.contains(record.date())
    }

    /// True when no record can pass, whatever the dataset
    pub fn is_unsatisfiable(&self) -> bool {
        self.statuses.is_empty() || self.machine_ids.is_empty() || self.date_range.is_inverted()
    }
}

/// Query string form of the predicate.
///
/// Lists are comma separated. A missing key selects everything observed;
/// a present but empty key selects nothing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterQuery {
    pub status: Option<String>,
    pub machine_id: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl FilterQuery {
    pub fn into_predicate(self, dataset: &Dataset) -> Result<FilterPredicate, FilterError> {
        let mut predicate = FilterPredicate::all(dataset);

        if let Some(raw) = self.status {
            predicate.statuses = split_list(&raw)
                .filter_map(|label| {
                    let status = MachineStatus::from_label(label);
                    if status.is_none() {
                        tracing::debug!("Ignoring unknown status label '{}'", label);
                    }
                    status
                })
                .collect();
        }

        if let Some(raw) = self.machine_id {
            predicate.machine_ids = split_list(&raw).map(str::to_string).collect();
        }

        if let Some(raw) = self.start {
            predicate.date_range.start = parse_date("start", &raw)?;
        }

        if let Some(raw) = self.end {
            predicate.date_range.end = parse_date("end", &raw)?;
        }

        Ok(predicate)
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, FilterError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| FilterError::InvalidDate {
        field,
        value: value.to_string(),
    })
}
