//! Inspection answer snapshots and the canonical question catalog.

mod answers;
mod catalog;

pub use answers::{
    AnswerValue, BehaviorStatus, CheckStatus, DriverId, InspectionId, InspectionSnapshot,
    SectionAnswers,
};
pub use catalog::{
    Catalog, ChecklistPhase, Expectation, ItemDefinition, SectionDefinition, SectionKind, Sizing,
    FEVER_THRESHOLD_CELSIUS, HYPOTHERMIA_THRESHOLD_CELSIUS, REQUIRED_DOCUMENTS,
    TOTAL_POST_TRIP_QUESTIONS, TOTAL_PRE_TRIP_QUESTIONS,
};
