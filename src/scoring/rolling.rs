use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::risk::ViolationRiskLevel;
use crate::inspection::{
    AnswerValue, BehaviorStatus, Catalog, DriverId, InspectionId, InspectionSnapshot,
    SectionAnswers, SectionKind,
};

/// Trip behaviour answers of one stored inspection, as supplied by the history provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    pub inspection_id: InspectionId,
    pub driver_id: DriverId,
    pub inspection_date: NaiveDate,
    #[serde(default)]
    pub trip_behavior: SectionAnswers,
}

impl TripRecord {
    pub fn from_snapshot(snapshot: &InspectionSnapshot) -> Self {
        Self {
            inspection_id: snapshot.inspection_id.clone(),
            driver_id: snapshot.driver_id.clone(),
            inspection_date: snapshot.inspection_date,
            trip_behavior: snapshot
                .section(SectionKind::TripBehavior)
                .cloned()
                .unwrap_or_default(),
        }
    }
}

/// Read access to a driver's past inspections.
pub trait TripHistory: Send + Sync {
    /// Records for `driver_id` dated within `[from, to]`, inclusive.
    fn trips_for_driver(
        &self,
        driver_id: &DriverId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TripRecord>, HistoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("trip history unavailable: {0}")]
    Unavailable(String),
}

/// Inclusive calendar window ending on the day of `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RollingWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl RollingWindow {
    pub fn ending(now: DateTime<Utc>, days: u16) -> Self {
        Self {
            start: (now - Duration::days(i64::from(days))).date_naive(),
            end: now.date_naive(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollingRiskRecord {
    pub driver_id: DriverId,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub total_points: u32,
    pub risk_level: ViolationRiskLevel,
    pub inspections_considered: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRiskSummary {
    pub total_points_this_trip: u32,
    pub risk_level: ViolationRiskLevel,
    pub rolling: RollingRiskRecord,
}

/// Points charged for every `Violation` answer. Other statuses and unknown items are free.
pub fn violation_points(catalog: &Catalog, answers: &SectionAnswers) -> u32 {
    answers
        .iter()
        .filter(|(_, value)| **value == AnswerValue::Behavior(BehaviorStatus::Violation))
        .filter_map(|(item, _)| catalog.violation_points(item))
        .sum()
}

/// Sum violation points for a driver over the window.
///
/// `current`, when given, supersedes any history record sharing its id, and
/// counts only when its own date falls inside the window.
pub fn rolling_record(
    catalog: &Catalog,
    driver_id: &DriverId,
    history: &[TripRecord],
    window: RollingWindow,
    current: Option<&TripRecord>,
) -> RollingRiskRecord {
    let replaced = current.map(|record| &record.inspection_id);

    let considered: Vec<&TripRecord> = history
        .iter()
        .filter(|record| &record.driver_id == driver_id)
        .filter(|record| window.contains(record.inspection_date))
        .filter(|record| Some(&record.inspection_id) != replaced)
        .chain(current.filter(|record| window.contains(record.inspection_date)))
        .collect();

    let total_points = considered
        .iter()
        .map(|record| violation_points(catalog, &record.trip_behavior))
        .sum();

    RollingRiskRecord {
        driver_id: driver_id.clone(),
        window_start: window.start,
        window_end: window.end,
        total_points,
        risk_level: ViolationRiskLevel::classify(total_points),
        inspections_considered: considered.len() as u32,
    }
}

pub fn trip_risk(
    catalog: &Catalog,
    snapshot: &InspectionSnapshot,
    history: &[TripRecord],
    window: RollingWindow,
) -> TripRiskSummary {
    let current = TripRecord::from_snapshot(snapshot);
    let total_points_this_trip = violation_points(catalog, &current.trip_behavior);
    let rolling = rolling_record(
        catalog,
        &snapshot.driver_id,
        history,
        window,
        Some(&current),
    );

    TripRiskSummary {
        total_points_this_trip,
        risk_level: ViolationRiskLevel::classify(total_points_this_trip),
        rolling,
    }
}
