use rust_decimal::Decimal;

use super::common::*;
use crate::inspection::{AnswerValue, BehaviorStatus, SectionAnswers, SectionKind};
use crate::scoring::RiskTier;

#[test]
fn fully_favourable_post_trip_scores_twenty_eight() {
    let summary = engine().post_trip(&complete_snapshot());

    assert_eq!(summary.sections.len(), 3);
    assert_eq!(summary.total_score, 28);
    assert_eq!(summary.max_possible_score, 28);
    assert_eq!(summary.total_questions, 28);
    assert_eq!(summary.score_percentage, Decimal::ONE_HUNDRED);
    assert_eq!(summary.risk_status, RiskTier::NoRisk);
}

#[test]
fn missing_post_trip_sections_keep_the_fixed_maximum() {
    let summary = engine().post_trip(&pre_trip_snapshot());

    assert_eq!(summary.total_score, 0);
    assert_eq!(summary.max_possible_score, 28);
    assert_eq!(summary.score_percentage, Decimal::ZERO);
    assert_eq!(summary.risk_status, RiskTier::HighRisk);
    assert!(summary.sections.iter().all(|section| !section.completed));
}

#[test]
fn only_compliant_trip_behaviour_earns_points() {
    let trip = SectionAnswers::new()
        .with("speed_school_zone", compliant())
        .with("railway_crossing", violation())
        .with(
            "toll_gate",
            AnswerValue::Behavior(BehaviorStatus::None),
        );
    let inspection = snapshot("insp-post", "drv-001").with_section(SectionKind::TripBehavior, trip);

    let summary = engine().post_trip(&inspection);

    let behaviour = &summary.sections[0];
    assert_eq!(behaviour.section, SectionKind::TripBehavior);
    assert_eq!(behaviour.earned, 1);
    assert_eq!(behaviour.max, 12);
    assert_eq!(summary.max_possible_score, 28);
}

#[test]
fn post_trip_report_rewards_the_favourable_direction() {
    let report = all_favourable(SectionKind::PostTripReport)
        .with("vehicle_fault_submitted", yes())
        .with("incidents_recorded", no());
    let inspection = complete_snapshot().with_section(SectionKind::PostTripReport, report);

    let summary = engine().post_trip(&inspection);

    let report = &summary.sections[2];
    assert_eq!(report.earned, 4);
    assert_eq!(report.max, 5);
    assert_eq!(summary.total_score, 27);
    assert_eq!(summary.score_percentage, Decimal::new(9643, 2));
    assert_eq!(summary.risk_status, RiskTier::VeryLowRisk);
}
