use rust_decimal::Decimal;
use serde::Serialize;

use super::critical::detect_critical_failures;
use super::policy::ScoringPolicy;
use super::risk::RiskTier;
use super::section::{item_breakdown, percentage, score_section, ItemScore, SectionResult};
use crate::inspection::{
    AnswerValue, Catalog, Expectation, InspectionSnapshot, SectionKind, REQUIRED_DOCUMENTS,
    TOTAL_PRE_TRIP_QUESTIONS,
};

/// Minimum pre-trip percentage for travel clearance, separate from the risk tiers.
pub const CLEARANCE_FLOOR_PERCENTAGE: u32 = 60;

pub const ALL_CHECKS_PASSED_NOTE: &str = "All checks passed. Vehicle and driver cleared for travel.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreTripSummary {
    pub sections: Vec<SectionResult>,
    pub breakdown: Vec<SectionBreakdown>,
    pub total_score: u32,
    pub max_possible_score: u32,
    pub total_questions: u32,
    pub score_percentage: Decimal,
    pub risk_status: RiskTier,
    pub critical_failures: Vec<String>,
    pub has_critical_failures: bool,
    pub is_cleared_for_travel: bool,
    pub clearance_notes: String,
    pub health_clearance: HealthClearance,
    pub documentation: DocumentationCompliance,
}

/// Section result expressed against the 64-question pre-trip total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionBreakdown {
    pub section: SectionKind,
    pub name: &'static str,
    pub earned: u32,
    pub max: u32,
    pub percentage: Decimal,
    pub contribution_to_total: Decimal,
    pub max_contribution: Decimal,
    pub risk_tier: RiskTier,
    pub items: Vec<ItemScore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RestClearance {
    Cleared,
    NotCleared,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthClearance {
    pub rest: RestClearance,
    pub message: &'static str,
}

/// `missing_documents` lists every failing document in catalog order; only the
/// required ones decide `is_compliant`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentationCompliance {
    pub missing_documents: Vec<&'static str>,
    pub missing_required_documents: Vec<&'static str>,
    pub is_compliant: bool,
}

/// Travel gate: no critical failure and a percentage at or above the floor.
pub fn is_cleared_for_travel(score_percentage: Decimal, has_critical_failures: bool) -> bool {
    !has_critical_failures && score_percentage >= Decimal::from(CLEARANCE_FLOOR_PERCENTAGE)
}

pub fn clearance_notes(critical_failures: &[String], score_percentage: Decimal) -> String {
    if !critical_failures.is_empty() {
        format!(
            "Travel not cleared due to critical failures: {}",
            critical_failures.join(", ")
        )
    } else if score_percentage < Decimal::from(CLEARANCE_FLOOR_PERCENTAGE) {
        format!("Travel not cleared due to low overall score ({score_percentage:.2}%)")
    } else {
        ALL_CHECKS_PASSED_NOTE.to_string()
    }
}

pub fn summarize_pre_trip(
    catalog: &Catalog,
    snapshot: &InspectionSnapshot,
    policy: &ScoringPolicy,
) -> PreTripSummary {
    let mut sections = Vec::new();
    let mut breakdown = Vec::new();

    for kind in SectionKind::pre_trip() {
        let definition = catalog.section(kind);
        let answers = snapshot.section(kind);
        let result = score_section(definition, answers);

        breakdown.push(SectionBreakdown {
            section: kind,
            name: result.name,
            earned: result.earned,
            max: result.max,
            percentage: result.percentage,
            contribution_to_total: percentage(result.earned, TOTAL_PRE_TRIP_QUESTIONS),
            max_contribution: percentage(result.questions, TOTAL_PRE_TRIP_QUESTIONS),
            risk_tier: result.risk_tier,
            items: item_breakdown(definition, answers),
        });
        sections.push(result);
    }

    let total_score = sections.iter().map(|section| section.earned).sum();
    let max_possible_score = sections.iter().map(|section| section.max).sum();
    let total_questions = sections.iter().map(|section| section.questions).sum();
    let score_percentage = percentage(total_score, max_possible_score);

    let critical_failures = detect_critical_failures(catalog, snapshot, policy);
    let has_critical_failures = !critical_failures.is_empty();
    let clearance_notes = clearance_notes(&critical_failures, score_percentage);

    PreTripSummary {
        sections,
        breakdown,
        total_score,
        max_possible_score,
        total_questions,
        score_percentage,
        risk_status: RiskTier::classify(score_percentage),
        is_cleared_for_travel: is_cleared_for_travel(score_percentage, has_critical_failures),
        has_critical_failures,
        critical_failures,
        clearance_notes,
        health_clearance: health_clearance(snapshot),
        documentation: documentation_compliance(catalog, snapshot),
    }
}

pub fn health_clearance(snapshot: &InspectionSnapshot) -> HealthClearance {
    let rest = snapshot
        .section(SectionKind::HealthFitness)
        .and_then(|answers| answers.get("adequate_rest"))
        .map(AnswerValue::is_affirmative);

    match rest {
        Some(true) => HealthClearance {
            rest: RestClearance::Cleared,
            message: "Driver has had adequate rest and is cleared for duty.",
        },
        Some(false) => HealthClearance {
            rest: RestClearance::NotCleared,
            message: "Driver has not had adequate rest (8+ hours) and is not cleared for duty.",
        },
        None => HealthClearance {
            rest: RestClearance::Unknown,
            message: "Rest status has not been recorded.",
        },
    }
}

pub fn documentation_compliance(
    catalog: &Catalog,
    snapshot: &InspectionSnapshot,
) -> DocumentationCompliance {
    let definition = catalog.section(SectionKind::Documentation);
    let answers = snapshot.section(SectionKind::Documentation);

    let mut missing_documents = Vec::new();
    let mut missing_required_documents = Vec::new();
    for item in definition.items {
        if item.expectation == Expectation::FreeText {
            continue;
        }
        let required = REQUIRED_DOCUMENTS.contains(&item.id);
        let missing = match answers.and_then(|answers| answers.get(item.id)) {
            Some(value) => !value.satisfies(item.expectation),
            // Unrecorded optional documents are not applicable.
            None => required,
        };
        if missing {
            missing_documents.push(item.label);
            if required {
                missing_required_documents.push(item.label);
            }
        }
    }

    DocumentationCompliance {
        is_compliant: missing_required_documents.is_empty(),
        missing_documents,
        missing_required_documents,
    }
}
