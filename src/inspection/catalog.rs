//! Canonical question catalog for every inspection section.
//!
//! One point per answered question. The catalog is immutable and shared; callers
//! pass it explicitly into the scorers rather than reaching for module globals.

use serde::{Deserialize, Serialize};

/// Which half of the inspection a section belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistPhase {
    PreTrip,
    PostTrip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    HealthFitness,
    Documentation,
    VehicleExterior,
    EngineFluid,
    InteriorCabin,
    Functional,
    SafetyEquipment,
    BrakesSteering,
    TripBehavior,
    DrivingBehavior,
    PostTripReport,
}

impl SectionKind {
    pub const fn pre_trip() -> [Self; 8] {
        [
            Self::HealthFitness,
            Self::Documentation,
            Self::VehicleExterior,
            Self::EngineFluid,
            Self::InteriorCabin,
            Self::Functional,
            Self::SafetyEquipment,
            Self::BrakesSteering,
        ]
    }

    pub const fn post_trip() -> [Self; 3] {
        [
            Self::TripBehavior,
            Self::DrivingBehavior,
            Self::PostTripReport,
        ]
    }

    pub const fn phase(self) -> ChecklistPhase {
        match self {
            Self::TripBehavior | Self::DrivingBehavior | Self::PostTripReport => {
                ChecklistPhase::PostTrip
            }
            _ => ChecklistPhase::PreTrip,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::HealthFitness => "Health & Fitness",
            Self::Documentation => "Documentation & Compliance",
            Self::VehicleExterior => "Vehicle Exterior",
            Self::EngineFluid => "Engine & Fluid",
            Self::InteriorCabin => "Interior & Cabin",
            Self::Functional => "Functional",
            Self::SafetyEquipment => "Safety Equipment",
            Self::BrakesSteering => "Brakes & Steering",
            Self::TripBehavior => "Trip Behavior Monitoring",
            Self::DrivingBehavior => "Driving Behavior",
            Self::PostTripReport => "Post-Trip Report",
        }
    }
}

/// Direction in which an answer earns its point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expectation {
    /// yes / pass / valid / compliant
    Affirmative,
    /// no (e.g. "on medication", "incidents recorded")
    Negative,
    /// numeric reading inside an inclusive range, or an affirmative status
    Within { min: f64, max: f64 },
    /// non-blank prose or an affirmative flag
    FreeText,
}

/// How a section's maximum is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sizing {
    /// Only items carrying a value count toward the maximum.
    Answered,
    /// The maximum is always the full item count.
    Nominal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemDefinition {
    pub id: &'static str,
    pub label: &'static str,
    pub expectation: Expectation,
    pub critical: bool,
    /// Overrides the generic "Failed Critical Check" wording.
    pub failure_note: Option<&'static str>,
    /// Points charged when a trip behaviour item is recorded as a violation.
    pub violation_points: u32,
}

impl ItemDefinition {
    const fn check(id: &'static str, label: &'static str) -> Self {
        Self {
            id,
            label,
            expectation: Expectation::Affirmative,
            critical: false,
            failure_note: None,
            violation_points: 0,
        }
    }

    const fn critical(id: &'static str, label: &'static str) -> Self {
        Self {
            critical: true,
            ..Self::check(id, label)
        }
    }

    const fn critical_with_note(
        id: &'static str,
        label: &'static str,
        failure_note: &'static str,
    ) -> Self {
        Self {
            critical: true,
            failure_note: Some(failure_note),
            ..Self::check(id, label)
        }
    }

    const fn negative(id: &'static str, label: &'static str) -> Self {
        Self {
            expectation: Expectation::Negative,
            ..Self::check(id, label)
        }
    }

    const fn free_text(id: &'static str, label: &'static str) -> Self {
        Self {
            expectation: Expectation::FreeText,
            ..Self::check(id, label)
        }
    }

    const fn behavior(id: &'static str, label: &'static str, violation_points: u32) -> Self {
        Self {
            violation_points,
            ..Self::check(id, label)
        }
    }

    /// Human-readable description used when this item fails a critical check.
    pub fn failure_description(&self) -> String {
        match self.failure_note {
            Some(note) => note.to_string(),
            None => format!("Failed Critical Check: {}", self.label),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionDefinition {
    pub kind: SectionKind,
    pub sizing: Sizing,
    pub items: &'static [ItemDefinition],
}

impl SectionDefinition {
    pub fn name(&self) -> &'static str {
        self.kind.label()
    }

    /// Question count used when the section is absent or sized nominally.
    pub fn nominal_questions(&self) -> u32 {
        self.items.len() as u32
    }

    pub fn has_critical_items(&self) -> bool {
        self.items.iter().any(|item| item.critical)
    }

    pub fn item(&self, id: &str) -> Option<&'static ItemDefinition> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// Upper bound of an acceptable body temperature reading in Celsius.
pub const FEVER_THRESHOLD_CELSIUS: f64 = 37.5;
pub const HYPOTHERMIA_THRESHOLD_CELSIUS: f64 = 35.0;

const HEALTH_FITNESS_ITEMS: &[ItemDefinition] = &[
    ItemDefinition::critical_with_note(
        "adequate_rest",
        "Adequate Rest (8+ hours)",
        "Inadequate Rest (less than 8 hours)",
    ),
    ItemDefinition::critical_with_note(
        "alcohol_test",
        "Alcohol/Drug Test",
        "Failed Alcohol/Drug Test",
    ),
    ItemDefinition::critical_with_note("fit_for_duty", "Fit for Duty", "Driver Not Fit for Duty"),
    ItemDefinition::critical_with_note(
        "no_health_impairment",
        "No Health Impairment",
        "Health Impairment Present",
    ),
    ItemDefinition::check("fatigue_checklist", "Fatigue Checklist Completed"),
    ItemDefinition {
        expectation: Expectation::Within {
            min: HYPOTHERMIA_THRESHOLD_CELSIUS,
            max: FEVER_THRESHOLD_CELSIUS,
        },
        ..ItemDefinition::check("temperature_check", "Temperature Check")
    },
    ItemDefinition::negative("medication_status", "Not on Medication"),
];

const DOCUMENTATION_ITEMS: &[ItemDefinition] = &[
    ItemDefinition::check("certificate_of_fitness", "Certificate of Fitness"),
    ItemDefinition::check("road_tax_valid", "Road Tax"),
    ItemDefinition::check("insurance_valid", "Insurance"),
    ItemDefinition::check("trip_authorization_signed", "Trip Authorization"),
    ItemDefinition::check("logbook_present", "Logbook"),
    ItemDefinition::check("driver_handbook_present", "Driver Handbook"),
    ItemDefinition::check("permits_valid", "Permits"),
    ItemDefinition::check("ppe_available", "PPE"),
    ItemDefinition::check("route_familiarity", "Route Familiarity"),
    ItemDefinition::check(
        "emergency_procedures_known",
        "Emergency Procedures Knowledge",
    ),
    ItemDefinition::check("gps_activated", "GPS Activation"),
    ItemDefinition::check("safety_briefing_provided", "Safety Briefing"),
    ItemDefinition::check("rtsa_clearance", "RTSA Clearance"),
    ItemDefinition::free_text("emergency_contact", "Emergency Contact"),
    ItemDefinition::check("drivers_license_valid", "Driver's License"),
    ItemDefinition::check("vehicle_registration_valid", "Vehicle Registration"),
    ItemDefinition::check("fuel_card_issued", "Fuel Card"),
];

/// Documents that must all be valid for the documentation section to be compliant.
pub const REQUIRED_DOCUMENTS: [&str; 5] = [
    "certificate_of_fitness",
    "road_tax_valid",
    "insurance_valid",
    "trip_authorization_signed",
    "logbook_present",
];

const EXTERIOR_ITEMS: &[ItemDefinition] = &[
    ItemDefinition::critical("tires", "Tires"),
    ItemDefinition::critical("lights", "Lights"),
    ItemDefinition::check("mirrors", "Mirrors"),
    ItemDefinition::check("windshield", "Windshield"),
    ItemDefinition::check("body_condition", "Body Condition"),
    ItemDefinition::check("loose_parts", "Loose Parts"),
    ItemDefinition::check("leaks", "Leaks"),
];

const ENGINE_FLUID_ITEMS: &[ItemDefinition] = &[
    ItemDefinition::critical("engine_oil", "Engine Oil"),
    ItemDefinition::check("coolant", "Coolant"),
    ItemDefinition::critical("brake_fluid", "Brake Fluid"),
    ItemDefinition::check("transmission_fluid", "Transmission Fluid"),
    ItemDefinition::check("power_steering_fluid", "Power Steering Fluid"),
    ItemDefinition::check("battery", "Battery"),
];

const INTERIOR_CABIN_ITEMS: &[ItemDefinition] = &[
    ItemDefinition::check("dashboard_indicators", "Dashboard Indicators"),
    ItemDefinition::critical("seatbelts", "Seatbelts"),
    ItemDefinition::check("horn", "Horn"),
    ItemDefinition::check("fire_extinguisher", "Fire Extinguisher"),
    ItemDefinition::check("first_aid_kit", "First Aid Kit"),
    ItemDefinition::check("safety_triangles", "Safety Triangles"),
];

const FUNCTIONAL_ITEMS: &[ItemDefinition] = &[
    ItemDefinition::critical("brakes", "Brakes"),
    ItemDefinition::critical("steering", "Steering"),
    ItemDefinition::check("suspension", "Suspension"),
    ItemDefinition::check("hvac", "HVAC"),
];

const SAFETY_EQUIPMENT_ITEMS: &[ItemDefinition] = &[
    ItemDefinition::check("fire_extinguisher", "Fire Extinguisher"),
    ItemDefinition::check("first_aid_kit", "First Aid Kit"),
    ItemDefinition::check("reflective_triangles", "Reflective Triangles"),
    ItemDefinition::check("wheel_chocks", "Wheel Chocks"),
    ItemDefinition::check("spare_tyre", "Spare Tyre"),
    ItemDefinition::check("torch", "Torch"),
    ItemDefinition::check("emergency_contacts", "Emergency Contacts"),
    ItemDefinition::check("gps_tracker", "GPS Tracker"),
];

const BRAKES_STEERING_ITEMS: &[ItemDefinition] = &[
    ItemDefinition::critical("brakes_condition", "Brakes Condition"),
    ItemDefinition::critical("brake_pads", "Brake Pads"),
    ItemDefinition::critical("brake_fluid_level", "Brake Fluid Level"),
    ItemDefinition::critical("brake_lines", "Brake Lines"),
    ItemDefinition::critical("handbrake", "Handbrake/Parking Brake"),
    ItemDefinition::critical("steering_wheel", "Steering Wheel"),
    ItemDefinition::critical("steering_response", "Steering Response"),
    ItemDefinition::critical("power_steering", "Power Steering"),
    ItemDefinition::critical("steering_fluid", "Steering Fluid Level"),
];

const TRIP_BEHAVIOR_ITEMS: &[ItemDefinition] = &[
    ItemDefinition::behavior("speed_school_zone", "Speed in School Zone", 5),
    ItemDefinition::behavior("speed_market_area", "Speed in Market Area", 5),
    ItemDefinition::behavior("max_speed_open_road", "Max Speed on Open Road", 3),
    ItemDefinition::behavior("railway_crossing", "Railway Crossing", 10),
    ItemDefinition::behavior("toll_gate", "Toll Gate", 2),
    ItemDefinition::behavior("hazardous_zone_speed", "Speed in Hazardous Zone", 10),
    ItemDefinition::behavior("excessive_driving", "Excessive Driving", 8),
    ItemDefinition::behavior("traffic_infractions", "Traffic Infractions", 10),
    ItemDefinition::behavior("incidents", "Incidents", 15),
    ItemDefinition::behavior("scheduled_breaks", "Scheduled Breaks", 3),
    ItemDefinition::behavior("fatigue_reporting", "Fatigue Reporting", 5),
    ItemDefinition::behavior("rest_stops_usage", "Rest Stops Usage", 2),
];

const DRIVING_BEHAVIOR_ITEMS: &[ItemDefinition] = &[
    ItemDefinition::check("obeys_traffic_rules", "Obeys Traffic Rules"),
    ItemDefinition::check("safe_speed_distance", "Safe Speed & Distance"),
    ItemDefinition::check("avoids_harsh_maneuvers", "Avoids Harsh Maneuvers"),
    ItemDefinition::check("no_phone_use", "No Phone Use While Driving"),
    ItemDefinition::check("headlights_visibility", "Headlights & Visibility"),
    ItemDefinition::check("load_security", "Load Security"),
    ItemDefinition::check("abnormal_sounds_reporting", "Reports Abnormal Sounds"),
    ItemDefinition::check("no_overloading", "No Overloading"),
    ItemDefinition::check("breakdown_reporting", "Reports Breakdowns"),
    ItemDefinition::check("emergency_procedures", "Follows Emergency Procedures"),
    ItemDefinition::check("contact_control_center", "Contacts Control Center"),
];

const POST_TRIP_REPORT_ITEMS: &[ItemDefinition] = &[
    ItemDefinition::negative("vehicle_fault_submitted", "No Vehicle Fault"),
    ItemDefinition::check("final_inspection_signed", "Final Inspection Signed"),
    ItemDefinition::check("compliance_with_policy", "Compliance with Policy"),
    ItemDefinition::check("attitude_cooperation", "Attitude & Cooperation"),
    ItemDefinition::negative("incidents_recorded", "No Incidents Recorded"),
];

const fn section(
    kind: SectionKind,
    sizing: Sizing,
    items: &'static [ItemDefinition],
) -> SectionDefinition {
    SectionDefinition {
        kind,
        sizing,
        items,
    }
}

static STANDARD_CATALOG: Catalog = Catalog {
    sections: [
        section(SectionKind::HealthFitness, Sizing::Answered, HEALTH_FITNESS_ITEMS),
        section(SectionKind::Documentation, Sizing::Answered, DOCUMENTATION_ITEMS),
        section(SectionKind::VehicleExterior, Sizing::Answered, EXTERIOR_ITEMS),
        section(SectionKind::EngineFluid, Sizing::Answered, ENGINE_FLUID_ITEMS),
        section(SectionKind::InteriorCabin, Sizing::Answered, INTERIOR_CABIN_ITEMS),
        section(SectionKind::Functional, Sizing::Answered, FUNCTIONAL_ITEMS),
        section(SectionKind::SafetyEquipment, Sizing::Answered, SAFETY_EQUIPMENT_ITEMS),
        section(SectionKind::BrakesSteering, Sizing::Answered, BRAKES_STEERING_ITEMS),
        section(SectionKind::TripBehavior, Sizing::Nominal, TRIP_BEHAVIOR_ITEMS),
        section(SectionKind::DrivingBehavior, Sizing::Nominal, DRIVING_BEHAVIOR_ITEMS),
        section(SectionKind::PostTripReport, Sizing::Nominal, POST_TRIP_REPORT_ITEMS),
    ],
};

/// Immutable table of section definitions.
#[derive(Debug, PartialEq)]
pub struct Catalog {
    sections: [SectionDefinition; 11],
}

impl Catalog {
    pub fn standard() -> &'static Catalog {
        &STANDARD_CATALOG
    }

    pub fn section(&self, kind: SectionKind) -> &SectionDefinition {
        // Array order mirrors the enum declaration order.
        &self.sections[kind as usize]
    }

    pub fn sections(&self) -> impl Iterator<Item = &SectionDefinition> {
        self.sections.iter()
    }

    pub fn phase_questions(&self, phase: ChecklistPhase) -> u32 {
        self.sections
            .iter()
            .filter(|definition| definition.kind.phase() == phase)
            .map(SectionDefinition::nominal_questions)
            .sum()
    }

    /// Violation points for a trip behaviour item, `None` for unknown items.
    pub fn violation_points(&self, item: &str) -> Option<u32> {
        self.section(SectionKind::TripBehavior)
            .item(item)
            .map(|definition| definition.violation_points)
    }
}

/// Grand total of pre-trip questions across all eight sections.
pub const TOTAL_PRE_TRIP_QUESTIONS: u32 = 64;
/// Grand total of post-trip questions across all three sections.
pub const TOTAL_POST_TRIP_QUESTIONS: u32 = 28;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_order_matches_section_kinds() {
        let catalog = Catalog::standard();
        for kind in SectionKind::pre_trip()
            .into_iter()
            .chain(SectionKind::post_trip())
        {
            assert_eq!(catalog.section(kind).kind, kind);
        }
    }

    #[test]
    fn nominal_question_counts_add_up() {
        let catalog = Catalog::standard();
        assert_eq!(
            catalog.phase_questions(ChecklistPhase::PreTrip),
            TOTAL_PRE_TRIP_QUESTIONS
        );
        assert_eq!(
            catalog.phase_questions(ChecklistPhase::PostTrip),
            TOTAL_POST_TRIP_QUESTIONS
        );
        assert_eq!(catalog.section(SectionKind::HealthFitness).nominal_questions(), 7);
        assert_eq!(catalog.section(SectionKind::Documentation).nominal_questions(), 17);
        assert_eq!(catalog.section(SectionKind::BrakesSteering).nominal_questions(), 9);
        assert_eq!(catalog.section(SectionKind::TripBehavior).nominal_questions(), 12);
        assert_eq!(catalog.section(SectionKind::DrivingBehavior).nominal_questions(), 11);
        assert_eq!(catalog.section(SectionKind::PostTripReport).nominal_questions(), 5);
    }

    #[test]
    fn every_brakes_and_steering_item_is_critical() {
        let definition = Catalog::standard().section(SectionKind::BrakesSteering);
        assert!(definition.items.iter().all(|item| item.critical));
    }

    #[test]
    fn emergency_contact_is_the_only_free_text_item() {
        let free_text: Vec<&str> = Catalog::standard()
            .sections()
            .flat_map(|definition| definition.items.iter())
            .filter(|item| item.expectation == Expectation::FreeText)
            .map(|item| item.id)
            .collect();
        assert_eq!(free_text, vec!["emergency_contact"]);
    }

    #[test]
    fn violation_point_table_covers_every_behavior_item() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.violation_points("railway_crossing"), Some(10));
        assert_eq!(catalog.violation_points("toll_gate"), Some(2));
        assert_eq!(catalog.violation_points("incidents"), Some(15));
        assert_eq!(catalog.violation_points("unknown_item"), None);
        assert!(catalog
            .section(SectionKind::TripBehavior)
            .items
            .iter()
            .all(|item| item.violation_points > 0));
    }
}
