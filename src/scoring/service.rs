use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::rolling::{HistoryError, RollingRiskRecord, TripHistory};
use super::{InspectionScorecard, ScoringEngine, ScoringPolicy};
use crate::inspection::{DriverId, InspectionSnapshot, SectionKind};

/// Service combining the scoring engine with the driver trip history.
pub struct ScoringService<H> {
    history: Arc<H>,
    engine: Arc<ScoringEngine>,
}

impl<H> ScoringService<H>
where
    H: TripHistory + 'static,
{
    pub fn new(history: Arc<H>, policy: ScoringPolicy) -> Self {
        Self {
            history,
            engine: Arc::new(ScoringEngine::new(policy)),
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Recompute every summary for a snapshot as of `now`.
    pub fn scorecard(
        &self,
        snapshot: &InspectionSnapshot,
        now: DateTime<Utc>,
    ) -> Result<InspectionScorecard, ScoringServiceError> {
        let window = self.engine.window(now);
        let history =
            self.history
                .trips_for_driver(&snapshot.driver_id, window.start, window.end)?;

        for kind in SectionKind::pre_trip()
            .into_iter()
            .chain(SectionKind::post_trip())
        {
            if snapshot.section(kind).is_none() {
                warn!(
                    inspection_id = %snapshot.inspection_id.0,
                    section = kind.label(),
                    "section absent from inspection; scored as incomplete"
                );
            }
        }

        let scorecard = self.engine.scorecard(snapshot, &history, now);

        for section in scorecard
            .pre_trip
            .sections
            .iter()
            .chain(&scorecard.post_trip.sections)
        {
            debug!(
                inspection_id = %snapshot.inspection_id.0,
                section = section.name,
                earned = section.earned,
                max = section.max,
                percentage = %section.percentage,
                "section scored"
            );
        }

        if !scorecard.pre_trip.is_cleared_for_travel {
            warn!(
                inspection_id = %snapshot.inspection_id.0,
                driver_id = %snapshot.driver_id.0,
                notes = %scorecard.pre_trip.clearance_notes,
                "inspection not cleared for travel"
            );
        }

        info!(
            inspection_id = %snapshot.inspection_id.0,
            driver_id = %snapshot.driver_id.0,
            pre_trip = %scorecard.pre_trip.score_percentage,
            post_trip = %scorecard.post_trip.score_percentage,
            final_percentage = %scorecard.final_summary.final_percentage,
            final_status = scorecard.final_summary.final_status.label(),
            rolling_points = scorecard.trip_risk.rolling.total_points,
            "inspection scorecard produced"
        );

        Ok(scorecard)
    }

    /// Violation points accumulated by a driver over the trailing window.
    pub fn driver_risk(
        &self,
        driver_id: &DriverId,
        now: DateTime<Utc>,
    ) -> Result<RollingRiskRecord, ScoringServiceError> {
        let window = self.engine.window(now);
        let history = self
            .history
            .trips_for_driver(driver_id, window.start, window.end)?;
        let record = self.engine.rolling(driver_id, &history, now);

        info!(
            driver_id = %driver_id.0,
            total_points = record.total_points,
            risk_level = record.risk_level.label(),
            "rolling driver risk computed"
        );

        Ok(record)
    }
}

/// Error raised by the scoring service.
#[derive(Debug, thiserror::Error)]
pub enum ScoringServiceError {
    #[error(transparent)]
    History(#[from] HistoryError),
}
