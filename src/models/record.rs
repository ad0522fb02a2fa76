//! Machine record model

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

/// sensor1 readings strictly above this flag the machine for maintenance
pub const SENSOR1_MAINTENANCE_LIMIT: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MachineStatus {
    Running,
    Stopped,
    Failed,
}

impl MachineStatus {
    pub const ALL: [MachineStatus; 3] = [Self::Running, Self::Stopped, Self::Failed];

    /// Sampling probability used by the generator
    pub fn weight(self) -> f64 {
        match self {
            Self::Running => 0.60,
            Self::Stopped => 0.25,
            Self::Failed => 0.15,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Stopped => "Stopped",
            Self::Failed => "Failed",
        }
    }

    /// Case-insensitive label lookup. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(label.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaintenanceFlag {
    Yes,
    No,
}

impl MaintenanceFlag {
    /// Maintenance rule: sensor1 above the limit, or a failed machine
    pub fn derive(sensor1: f64, status: MachineStatus) -> Self {
        if sensor1 > SENSOR1_MAINTENANCE_LIMIT || status == MachineStatus::Failed {
            Self::Yes
        } else {
            Self::No
        }
    }

    pub fn is_yes(self) -> bool {
        self == Self::Yes
    }
}

/// One machine observation on one date.
///
/// Fields are read-only; `needs_maintenance` is derived once in
/// [`MachineRecord::new`] and cannot drift from `sensor1`/`status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RecordRow")]
pub struct MachineRecord {
    machine_id: String,
    status: MachineStatus,
    sensor1: f64,
    sensor2: f64,
    sensor3: f64,
    operating_time: f64,
    date: NaiveDate,
    needs_maintenance: MaintenanceFlag,
}

impl MachineRecord {
    pub fn new(
        machine_id: impl Into<String>,
        status: MachineStatus,
        sensors: [f64; 3],
        operating_time: f64,
        date: NaiveDate,
    ) -> Self {
        let [sensor1, sensor2, sensor3] = sensors;
        Self {
            machine_id: machine_id.into(),
            status,
            sensor1,
            sensor2,
            sensor3,
            operating_time,
            date,
            needs_maintenance: MaintenanceFlag::derive(sensor1, status),
        }
    }

    pub fn machine_id(&self) -> &str {
        &self.machine_id
    }

    pub fn status(&self) -> MachineStatus {
        self.status
    }

    pub fn sensor1(&self) -> f64 {
        self.sensor1
    }

    pub fn sensor2(&self) -> f64 {
        self.sensor2
    }

    pub fn sensor3(&self) -> f64 {
        self.sensor3
    }

    pub fn operating_time(&self) -> f64 {
        self.operating_time
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn needs_maintenance(&self) -> MaintenanceFlag {
        self.needs_maintenance
    }
}

/// Flat row as it appears in exported CSV files
#[derive(Debug, Deserialize)]
struct RecordRow {
    machine_id: String,
    status: MachineStatus,
    sensor1: f64,
    sensor2: f64,
    sensor3: f64,
    operating_time: f64,
    date: NaiveDate,
    needs_maintenance: MaintenanceFlag,
}

impl TryFrom<RecordRow> for MachineRecord {
    type Error = String;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        let record = MachineRecord::new(
            row.machine_id,
            row.status,
            [row.sensor1, row.sensor2, row.sensor3],
            row.operating_time,
            row.date,
        );

        if record.needs_maintenance != row.needs_maintenance {
            return Err(format!(
                "needs_maintenance={:?} contradicts sensor1={} status={}",
                row.needs_maintenance,
                row.sensor1,
                row.status.as_str()
            ));
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn test_maintenance_rule() {
        assert_eq!(MaintenanceFlag::derive(70.0, MachineStatus::Running), MaintenanceFlag::No);
        assert_eq!(MaintenanceFlag::derive(70.01, MachineStatus::Running), MaintenanceFlag::Yes);
        assert_eq!(MaintenanceFlag::derive(10.0, MachineStatus::Failed), MaintenanceFlag::Yes);
        assert_eq!(MaintenanceFlag::derive(10.0, MachineStatus::Stopped), MaintenanceFlag::No);
    }

    #[test]
    fn test_record_derives_flag() {
        let r = MachineRecord::new("Maq_3", MachineStatus::Failed, [40.0, 70.0, 90.0], 250.0, day());
        assert!(r.needs_maintenance().is_yes());
        assert_eq!(r.machine_id(), "Maq_3");
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(MachineStatus::from_label("failed"), Some(MachineStatus::Failed));
        assert_eq!(MachineStatus::from_label(" Running "), Some(MachineStatus::Running));
        assert_eq!(MachineStatus::from_label("Broken"), None);

        let total: f64 = MachineStatus::ALL.iter().map(|s| s.weight()).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_reject_inconsistent_row() {
        let row = RecordRow {
            machine_id: "Maq_1".to_string(),
            status: MachineStatus::Running,
            sensor1: 20.0,
            sensor2: 70.0,
            sensor3: 100.0,
            operating_time: 300.0,
            date: day(),
            needs_maintenance: MaintenanceFlag::Yes,
        };
        assert!(MachineRecord::try_from(row).is_err());
    }
}
