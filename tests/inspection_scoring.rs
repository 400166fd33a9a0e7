use chrono::{NaiveDate, TimeZone, Utc};
use fleet_inspect::inspection::{InspectionSnapshot, SectionKind};
use fleet_inspect::scoring::{FinalStatus, RiskTier, ViolationRiskLevel};
use fleet_inspect::{ScoringEngine, ScoringPolicy};
use rust_decimal::Decimal;

fn recorded_inspection() -> InspectionSnapshot {
    serde_json::from_str(
        r#"{
            "inspection_id": "insp-2025-0611",
            "driver_id": "drv-118",
            "inspection_date": "2025-06-11",
            "sections": {
                "health_fitness": {
                    "adequate_rest": true,
                    "alcohol_test": "pass",
                    "fit_for_duty": true,
                    "no_health_impairment": true,
                    "fatigue_checklist": true,
                    "temperature_check": 36.4,
                    "medication_status": false
                },
                "documentation": {
                    "certificate_of_fitness": true,
                    "road_tax_valid": true,
                    "insurance_valid": true,
                    "trip_authorization_signed": true,
                    "logbook_present": false,
                    "emergency_contact": "Control room +260 211 000 000"
                },
                "vehicle_exterior": { "tires": "pass", "lights": "pass", "mirrors": "pass" },
                "engine_fluid": { "engine_oil": "pass", "brake_fluid": "pass" },
                "interior_cabin": { "seatbelts": "pass", "horn": "fail" },
                "functional": { "brakes": "pass", "steering": "pass" },
                "safety_equipment": { "fire_extinguisher": true, "first_aid_kit": true },
                "brakes_steering": {
                    "brakes_condition": "pass", "brake_pads": "pass", "brake_fluid_level": "pass",
                    "brake_lines": "pass", "handbrake": "pass", "steering_wheel": "pass",
                    "steering_response": "pass", "power_steering": "pass", "steering_fluid": "pass"
                },
                "trip_behavior": {
                    "speed_school_zone": "compliant",
                    "railway_crossing": "compliant",
                    "toll_gate": "violation",
                    "scheduled_breaks": "violation"
                },
                "driving_behavior": {
                    "obeys_traffic_rules": true,
                    "safe_speed_distance": true,
                    "no_phone_use": true
                },
                "post_trip_report": {
                    "vehicle_fault_submitted": false,
                    "final_inspection_signed": true,
                    "compliance_with_policy": true,
                    "attitude_cooperation": true,
                    "incidents_recorded": false
                }
            }
        }"#,
    )
    .expect("snapshot parses")
}

#[test]
fn recorded_inspection_produces_a_consistent_scorecard() {
    let now = Utc
        .with_ymd_and_hms(2025, 6, 11, 18, 30, 0)
        .single()
        .expect("valid timestamp");
    let engine = ScoringEngine::new(ScoringPolicy::default());

    let scorecard = engine.scorecard(&recorded_inspection(), &[], now);

    let pre = &scorecard.pre_trip;
    assert_eq!(pre.total_score, 31);
    assert_eq!(pre.max_possible_score, 33);
    assert_eq!(pre.score_percentage, Decimal::new(9394, 2));
    assert_eq!(pre.risk_status, RiskTier::VeryLowRisk);
    assert!(!pre.has_critical_failures);
    assert!(pre.is_cleared_for_travel);
    assert!(!pre.documentation.is_compliant);
    assert_eq!(pre.documentation.missing_documents, vec!["Logbook"]);

    let post = &scorecard.post_trip;
    assert_eq!(post.total_score, 10);
    assert_eq!(post.max_possible_score, 28);
    assert_eq!(post.score_percentage, Decimal::new(3571, 2));

    let summary = &scorecard.final_summary;
    assert_eq!(summary.pre_checklist_weighted, Decimal::new(4697, 2));
    assert_eq!(summary.post_checklist_weighted, Decimal::new(1786, 2));
    assert_eq!(summary.final_percentage, Decimal::new(6483, 2));
    assert_eq!(summary.final_status, FinalStatus::NeedsReview);
    assert_eq!(summary.final_risk_level, RiskTier::HighRisk);

    assert_eq!(scorecard.trip_risk.total_points_this_trip, 5);
    assert_eq!(scorecard.trip_risk.risk_level, ViolationRiskLevel::Medium);
}

#[test]
fn scorecard_serializes_for_report_rendering() {
    let now = Utc
        .with_ymd_and_hms(2025, 6, 11, 18, 30, 0)
        .single()
        .expect("valid timestamp");
    let scorecard = ScoringEngine::default().scorecard(&recorded_inspection(), &[], now);

    let json = serde_json::to_value(&scorecard).expect("serialize scorecard");

    assert_eq!(json["pre_trip"]["risk_status"], "very_low_risk");
    assert_eq!(json["pre_trip"]["sections"][0]["section"], "health_fitness");
    assert_eq!(json["pre_trip"]["breakdown"][1]["items"][4]["status"], "No");
    assert_eq!(json["final_summary"]["final_status"], "needs_review");
    assert_eq!(
        json["trip_risk"]["rolling"]["window_start"],
        "2025-05-12"
    );
    assert!(json["final_summary"]["final_comment"]
        .as_str()
        .expect("comment string")
        .contains("64.83%"));
}

#[test]
fn removing_a_critical_section_changes_only_the_clearance_gate() {
    let now = Utc
        .with_ymd_and_hms(2025, 6, 11, 9, 0, 0)
        .single()
        .expect("valid timestamp");
    let mut inspection = recorded_inspection();
    inspection.sections.remove(&SectionKind::BrakesSteering);

    let strict = ScoringEngine::new(ScoringPolicy::default()).scorecard(&inspection, &[], now);
    let lenient = ScoringEngine::new(ScoringPolicy::lenient()).scorecard(&inspection, &[], now);

    assert_eq!(
        strict.pre_trip.critical_failures,
        vec!["Critical Section Not Completed: Brakes & Steering".to_string()]
    );
    assert!(!strict.pre_trip.is_cleared_for_travel);
    assert!(lenient.pre_trip.critical_failures.is_empty());
    assert_eq!(
        strict.pre_trip.score_percentage,
        lenient.pre_trip.score_percentage
    );
    assert_eq!(
        inspection.inspection_date,
        NaiveDate::from_ymd_opt(2025, 6, 11).expect("valid date")
    );
}
