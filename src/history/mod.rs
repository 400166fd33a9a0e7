//! Import of past trip behaviour answers from CSV exports.
//!
//! Each row carries one behaviour item of one inspection:
//! `inspection_id,driver_id,inspection_date,behavior_item,status`.

mod parser;

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use crate::inspection::{AnswerValue, BehaviorStatus, DriverId, InspectionId, SectionAnswers};
use crate::scoring::TripRecord;

#[derive(Debug)]
pub enum HistoryImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidDate { line: u64, value: String },
    InvalidStatus { line: u64, value: String },
    DriverMismatch { line: u64, inspection_id: String },
}

impl std::fmt::Display for HistoryImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryImportError::Io(err) => write!(f, "failed to read trip history: {}", err),
            HistoryImportError::Csv(err) => write!(f, "invalid trip history CSV data: {}", err),
            HistoryImportError::InvalidDate { line, value } => {
                write!(f, "line {}: unrecognised inspection date '{}'", line, value)
            }
            HistoryImportError::InvalidStatus { line, value } => {
                write!(f, "line {}: unrecognised behaviour status '{}'", line, value)
            }
            HistoryImportError::DriverMismatch {
                line,
                inspection_id,
            } => write!(
                f,
                "line {}: inspection {} is already assigned to another driver",
                line, inspection_id
            ),
        }
    }
}

impl std::error::Error for HistoryImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HistoryImportError::Io(err) => Some(err),
            HistoryImportError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for HistoryImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for HistoryImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct TripHistoryImporter;

impl TripHistoryImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<TripRecord>, HistoryImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Group rows into one record per inspection, in order of first appearance.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<TripRecord>, HistoryImportError> {
        let mut records: Vec<TripRecord> = Vec::new();
        let mut positions: BTreeMap<String, usize> = BTreeMap::new();

        for row in parser::parse_rows(reader)? {
            let inspection_date = parser::parse_date(&row.inspection_date).ok_or_else(|| {
                HistoryImportError::InvalidDate {
                    line: row.line,
                    value: row.inspection_date.clone(),
                }
            })?;

            let position = match positions.get(&row.inspection_id) {
                Some(position) => *position,
                None => {
                    records.push(TripRecord {
                        inspection_id: InspectionId(row.inspection_id.clone()),
                        driver_id: DriverId(row.driver_id.clone()),
                        inspection_date,
                        trip_behavior: SectionAnswers::new(),
                    });
                    positions.insert(row.inspection_id.clone(), records.len() - 1);
                    records.len() - 1
                }
            };

            let record = &mut records[position];
            if record.driver_id.0 != row.driver_id {
                return Err(HistoryImportError::DriverMismatch {
                    line: row.line,
                    inspection_id: row.inspection_id,
                });
            }

            // Rows without a status only register the inspection.
            let Some(raw_status) = row.status else {
                continue;
            };
            let status = BehaviorStatus::from_label(&raw_status).ok_or(
                HistoryImportError::InvalidStatus {
                    line: row.line,
                    value: raw_status.clone(),
                },
            )?;
            record
                .trip_behavior
                .insert(&row.behavior_item, AnswerValue::Behavior(status));
        }

        Ok(records)
    }
}
