use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use fleet_inspect::history::TripHistoryImporter;
use fleet_inspect::inspection::DriverId;
use fleet_inspect::scoring::{HistoryError, TripHistory, TripRecord};
use fleet_inspect::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Trip history held in process, seeded from a CSV export when one is supplied.
#[derive(Default, Clone)]
pub(crate) struct InMemoryTripHistory {
    records: Arc<Mutex<Vec<TripRecord>>>,
}

impl InMemoryTripHistory {
    pub(crate) fn from_records(records: Vec<TripRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    pub(crate) fn load(csv_path: Option<&Path>) -> Result<Self, AppError> {
        match csv_path {
            Some(path) => Ok(Self::from_records(TripHistoryImporter::from_path(path)?)),
            None => Ok(Self::default()),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.records.lock().map(|guard| guard.len()).unwrap_or(0)
    }
}

impl TripHistory for InMemoryTripHistory {
    fn trips_for_driver(
        &self,
        driver_id: &DriverId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TripRecord>, HistoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| HistoryError::Unavailable("history lock poisoned".to_string()))?;
        Ok(guard
            .iter()
            .filter(|record| &record.driver_id == driver_id)
            .filter(|record| from <= record.inspection_date && record.inspection_date <= to)
            .cloned()
            .collect())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Midday UTC on `as_of`, or the current instant.
pub(crate) fn evaluation_instant(as_of: Option<NaiveDate>) -> DateTime<Utc> {
    as_of
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .unwrap_or_else(Utc::now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_inspect::inspection::{InspectionId, SectionAnswers};

    fn record(id: &str, driver: &str, date: NaiveDate) -> TripRecord {
        TripRecord {
            inspection_id: InspectionId(id.to_string()),
            driver_id: DriverId(driver.to_string()),
            inspection_date: date,
            trip_behavior: SectionAnswers::new(),
        }
    }

    #[test]
    fn history_filters_by_driver_and_dates() {
        let day = |d| NaiveDate::from_ymd_opt(2025, 6, d).expect("valid date");
        let history = InMemoryTripHistory::from_records(vec![
            record("a", "drv-1", day(1)),
            record("b", "drv-1", day(15)),
            record("c", "drv-2", day(15)),
        ]);

        let trips = history
            .trips_for_driver(&DriverId("drv-1".to_string()), day(10), day(20))
            .expect("history readable");

        assert_eq!(history.len(), 3);
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].inspection_id.0, "b");
    }

    #[test]
    fn parse_date_reports_bad_input() {
        assert!(parse_date("2025-02-30").is_err());
        assert_eq!(
            parse_date(" 2025-02-28 "),
            Ok(NaiveDate::from_ymd_opt(2025, 2, 28).expect("valid date"))
        );
    }

    #[test]
    fn evaluation_instant_uses_midday_of_given_date() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date");
        let instant = evaluation_instant(Some(date));
        assert_eq!(instant.date_naive(), date);
        assert_eq!(instant.format("%H:%M").to_string(), "12:00");
    }
}
