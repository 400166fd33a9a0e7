use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::inspection::{
    AnswerValue, BehaviorStatus, Catalog, CheckStatus, DriverId, Expectation,
    InspectionSnapshot, SectionAnswers, SectionKind,
};
use crate::scoring::{
    scoring_router, HistoryError, ScoringEngine, ScoringPolicy, ScoringService, TripHistory,
    TripRecord,
};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Fixed clock: mid-afternoon on 30 June 2025.
pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 30, 15, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn yes() -> AnswerValue {
    AnswerValue::Flag(true)
}

pub(super) fn no() -> AnswerValue {
    AnswerValue::Flag(false)
}

pub(super) fn pass() -> AnswerValue {
    AnswerValue::Check(CheckStatus::Pass)
}

pub(super) fn fail() -> AnswerValue {
    AnswerValue::Check(CheckStatus::Fail)
}

pub(super) fn compliant() -> AnswerValue {
    AnswerValue::Behavior(BehaviorStatus::Compliant)
}

pub(super) fn violation() -> AnswerValue {
    AnswerValue::Behavior(BehaviorStatus::Violation)
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(ScoringPolicy::default())
}

pub(super) fn healthy_driver() -> SectionAnswers {
    SectionAnswers::new()
        .with("adequate_rest", yes())
        .with("alcohol_test", pass())
        .with("fit_for_duty", yes())
        .with("no_health_impairment", yes())
        .with("fatigue_checklist", yes())
        .with("temperature_check", pass())
        .with("medication_status", no())
}

/// Every item of a section answered favourably.
pub(super) fn all_favourable(kind: SectionKind) -> SectionAnswers {
    let definition = Catalog::standard().section(kind);
    definition
        .items
        .iter()
        .map(|item| {
            let value = match (kind, item.expectation) {
                (SectionKind::TripBehavior, _) => compliant(),
                (_, Expectation::Affirmative) => yes(),
                (_, Expectation::Negative) => no(),
                (_, Expectation::Within { .. }) => AnswerValue::Number(36.6),
                (_, Expectation::FreeText) => {
                    AnswerValue::Text("Fleet control +260 211 000 000".to_string())
                }
            };
            (item.id.to_string(), value)
        })
        .collect()
}

/// Every item of a section answered unfavourably.
pub(super) fn all_unfavourable(kind: SectionKind) -> SectionAnswers {
    let definition = Catalog::standard().section(kind);
    definition
        .items
        .iter()
        .map(|item| {
            let value = match (kind, item.expectation) {
                (SectionKind::TripBehavior, _) => violation(),
                (_, Expectation::Affirmative) => no(),
                (_, Expectation::Negative) => yes(),
                (_, Expectation::Within { .. }) => AnswerValue::Number(39.4),
                (_, Expectation::FreeText) => AnswerValue::Text(String::new()),
            };
            (item.id.to_string(), value)
        })
        .collect()
}

pub(super) fn snapshot(inspection_id: &str, driver_id: &str) -> InspectionSnapshot {
    InspectionSnapshot::new(inspection_id, driver_id, date(2025, 6, 30))
}

pub(super) fn pre_trip_snapshot() -> InspectionSnapshot {
    SectionKind::pre_trip()
        .into_iter()
        .fold(snapshot("insp-pre", "drv-001"), |snapshot, kind| {
            snapshot.with_section(kind, all_favourable(kind))
        })
}

pub(super) fn complete_snapshot() -> InspectionSnapshot {
    SectionKind::post_trip()
        .into_iter()
        .fold(pre_trip_snapshot(), |snapshot, kind| {
            snapshot.with_section(kind, all_favourable(kind))
        })
}

pub(super) fn trip(
    inspection_id: &str,
    driver_id: &str,
    inspection_date: NaiveDate,
    violations: &[&str],
) -> TripRecord {
    TripRecord {
        inspection_id: crate::inspection::InspectionId(inspection_id.to_string()),
        driver_id: DriverId(driver_id.to_string()),
        inspection_date,
        trip_behavior: violations
            .iter()
            .map(|item| (item.to_string(), violation()))
            .collect(),
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryHistory {
    pub(super) records: Arc<Mutex<Vec<TripRecord>>>,
}

impl MemoryHistory {
    pub(super) fn with_records(records: Vec<TripRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }
}

impl TripHistory for MemoryHistory {
    fn trips_for_driver(
        &self,
        driver_id: &DriverId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TripRecord>, HistoryError> {
        let guard = self.records.lock().expect("history mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| &record.driver_id == driver_id)
            .filter(|record| from <= record.inspection_date && record.inspection_date <= to)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableHistory;

impl TripHistory for UnavailableHistory {
    fn trips_for_driver(
        &self,
        _driver_id: &DriverId,
        _from: NaiveDate,
        _to: NaiveDate,
    ) -> Result<Vec<TripRecord>, HistoryError> {
        Err(HistoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service(records: Vec<TripRecord>) -> ScoringService<MemoryHistory> {
    ScoringService::new(
        Arc::new(MemoryHistory::with_records(records)),
        ScoringPolicy::default(),
    )
}

pub(super) fn router_with_service(service: ScoringService<MemoryHistory>) -> axum::Router {
    scoring_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
