//! Dataset and filtered view models

use serde::Serialize;
use chrono::NaiveDate;

use super::record::{MachineRecord, MachineStatus};

/// Immutable set of generated records
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<MachineRecord>,
}

impl Dataset {
    pub fn new(records: Vec<MachineRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[MachineRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest record date, `None` for an empty dataset
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.date()).min()?;
        let max = self.records.iter().map(|r| r.date()).max()?;
        Some((min, max))
    }

    /// Distinct statuses in order of first appearance
    pub fn observed_statuses(&self) -> Vec<MachineStatus> {
        let mut seen = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.status()) {
                seen.push(record.status());
            }
        }
        seen
    }

    /// Distinct machine ids in order of first appearance
    pub fn observed_machine_ids(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for record in &self.records {
            if !seen.iter().any(|id| id == record.machine_id()) {
                seen.push(record.machine_id().to_string());
            }
        }
        seen
    }
}

/// Records that passed a predicate, in dataset order
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct FilteredView {
    records: Vec<MachineRecord>,
}

impl FilteredView {
    pub fn new(records: Vec<MachineRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[MachineRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
