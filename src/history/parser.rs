use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug)]
pub(crate) struct BehaviorRow {
    pub(crate) line: u64,
    pub(crate) inspection_id: String,
    pub(crate) driver_id: String,
    pub(crate) inspection_date: String,
    pub(crate) behavior_item: String,
    pub(crate) status: Option<String>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<BehaviorRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut rows = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        // Quoted fields may span lines, so take the line the record starts on.
        let line = record.position().map_or(0, csv::Position::line);
        let row: HistoryRow = record.deserialize(Some(&headers))?;
        rows.push(BehaviorRow {
            line,
            inspection_id: row.inspection_id,
            driver_id: row.driver_id,
            inspection_date: row.inspection_date,
            behavior_item: row.behavior_item,
            status: row.status,
        });
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct HistoryRow {
    inspection_id: String,
    driver_id: String,
    inspection_date: String,
    behavior_item: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.naive_utc().date())
}
