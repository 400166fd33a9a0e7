//! Inspection scoring, risk classification and travel clearance.
//!
//! Everything here is a pure function of an [`InspectionSnapshot`]. Results are
//! recomputed on every call and never cached.

mod critical;
mod final_summary;
mod policy;
mod post_trip;
mod pre_trip;
mod risk;
mod rolling;
mod section;

pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use critical::detect_critical_failures;
pub use final_summary::{combine, final_comment, ChecklistTotals, FinalSummary};
pub use policy::ScoringPolicy;
pub use post_trip::{summarize_post_trip, PostTripSummary};
pub use pre_trip::{
    clearance_notes, documentation_compliance, health_clearance, is_cleared_for_travel,
    summarize_pre_trip, DocumentationCompliance, HealthClearance, PreTripSummary, RestClearance,
    SectionBreakdown, ALL_CHECKS_PASSED_NOTE, CLEARANCE_FLOOR_PERCENTAGE,
};
pub use risk::{FinalStatus, RiskTier, ViolationRiskLevel};
pub use rolling::{
    rolling_record, trip_risk, violation_points, HistoryError, RollingRiskRecord, RollingWindow,
    TripHistory, TripRecord, TripRiskSummary,
};
pub use router::scoring_router;
pub use section::{item_breakdown, percentage, score_section, ItemScore, ItemStatus, SectionResult};
pub use service::{ScoringService, ScoringServiceError};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::inspection::{
    Catalog, ChecklistPhase, DriverId, InspectionId, InspectionSnapshot, SectionKind,
};

/// Stateless engine binding the standard catalog to a scoring policy.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    catalog: &'static Catalog,
    policy: ScoringPolicy,
}

impl ScoringEngine {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self {
            catalog: Catalog::standard(),
            policy,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn section(&self, snapshot: &InspectionSnapshot, kind: SectionKind) -> SectionResult {
        score_section(self.catalog.section(kind), snapshot.section(kind))
    }

    pub fn pre_trip(&self, snapshot: &InspectionSnapshot) -> PreTripSummary {
        summarize_pre_trip(self.catalog, snapshot, &self.policy)
    }

    pub fn post_trip(&self, snapshot: &InspectionSnapshot) -> PostTripSummary {
        summarize_post_trip(self.catalog, snapshot)
    }

    pub fn window(&self, now: DateTime<Utc>) -> RollingWindow {
        RollingWindow::ending(now, self.policy.rolling_window_days)
    }

    pub fn rolling(
        &self,
        driver_id: &DriverId,
        history: &[TripRecord],
        now: DateTime<Utc>,
    ) -> RollingRiskRecord {
        rolling_record(self.catalog, driver_id, history, self.window(now), None)
    }

    /// Full scorecard for a snapshot plus the driver's stored trips.
    pub fn scorecard(
        &self,
        snapshot: &InspectionSnapshot,
        history: &[TripRecord],
        now: DateTime<Utc>,
    ) -> InspectionScorecard {
        let pre_trip = self.pre_trip(snapshot);
        let post_trip = self.post_trip(snapshot);

        let pre_totals =
            has_phase(snapshot, ChecklistPhase::PreTrip).then(|| ChecklistTotals::from(&pre_trip));
        let post_totals = has_phase(snapshot, ChecklistPhase::PostTrip)
            .then(|| ChecklistTotals::from(&post_trip));
        let final_summary = combine(pre_totals, post_totals);

        let trip_risk = trip_risk(self.catalog, snapshot, history, self.window(now));

        InspectionScorecard {
            inspection_id: snapshot.inspection_id.clone(),
            driver_id: snapshot.driver_id.clone(),
            pre_trip,
            post_trip,
            final_summary,
            trip_risk,
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(ScoringPolicy::default())
    }
}

fn has_phase(snapshot: &InspectionSnapshot, phase: ChecklistPhase) -> bool {
    snapshot.sections.keys().any(|kind| kind.phase() == phase)
}

/// Every derived value for one inspection, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectionScorecard {
    pub inspection_id: InspectionId,
    pub driver_id: DriverId,
    pub pre_trip: PreTripSummary,
    pub post_trip: PostTripSummary,
    pub final_summary: FinalSummary,
    pub trip_risk: TripRiskSummary,
}
