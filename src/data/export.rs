//! CSV export of filtered views

use crate::models::FilteredView;

pub const EXPORT_FILE_NAME: &str = "dados_maquinas_filtrado.csv";
pub const EXPORT_CONTENT_TYPE: &str = "text/csv";

pub const CSV_HEADER: [&str; 8] = [
    "machine_id",
    "status",
    "sensor1",
    "sensor2",
    "sensor3",
    "operating_time",
    "date",
    "needs_maintenance",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("csv buffer error: {0}")]
    Buffer(String),
}

/// Serialize a view to CSV with a header row.
///
/// The header is written even for an empty view.
pub fn to_csv(view: &FilteredView) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for record in view.records() {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))
}

/// Parse CSV produced by [`to_csv`] back into records
#[cfg(test)]
pub fn from_csv(data: &[u8]) -> Result<Vec<crate::models::MachineRecord>, ExportError> {
    let mut reader = csv::Reader::from_reader(data);
    let mut records = Vec::new();

    for row in reader.deserialize() {
        records.push(row?);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::models::{MachineRecord, MachineStatus};

    #[test]
    fn test_export_header_only() {
        let bytes = to_csv(&FilteredView::default()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text.trim_end(),
            "machine_id,status,sensor1,sensor2,sensor3,operating_time,date,needs_maintenance"
        );
    }

    #[test]
    fn test_export_row_format() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let view = FilteredView::new(vec![MachineRecord::new(
            "Maq_7",
            MachineStatus::Failed,
            [51.5, 75.0, 99.25],
            312.5,
            date,
        )]);

        let text = String::from_utf8(to_csv(&view).unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "Maq_7,Failed,51.5,75.0,99.25,312.5,2025-01-01,Yes");
    }

    #[test]
    fn test_reject_tampered_flag() {
        let csv = "machine_id,status,sensor1,sensor2,sensor3,operating_time,date,needs_maintenance\n\
                   Maq_1,Running,10.0,70.0,100.0,300.0,2025-01-01,Yes\n";
        assert!(from_csv(csv.as_bytes()).is_err());
    }
}
