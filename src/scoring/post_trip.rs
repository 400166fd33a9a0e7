use rust_decimal::Decimal;
use serde::Serialize;

use super::risk::RiskTier;
use super::section::{percentage, score_section, SectionResult};
use crate::inspection::{Catalog, InspectionSnapshot, SectionKind};

/// Post-trip totals. Every section is sized nominally so the maximum is fixed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostTripSummary {
    pub sections: Vec<SectionResult>,
    pub total_score: u32,
    pub max_possible_score: u32,
    pub total_questions: u32,
    pub score_percentage: Decimal,
    pub risk_status: RiskTier,
}

pub fn summarize_post_trip(catalog: &Catalog, snapshot: &InspectionSnapshot) -> PostTripSummary {
    let sections: Vec<SectionResult> = SectionKind::post_trip()
        .into_iter()
        .map(|kind| score_section(catalog.section(kind), snapshot.section(kind)))
        .collect();

    let total_score = sections.iter().map(|section| section.earned).sum();
    let max_possible_score = sections.iter().map(|section| section.max).sum();
    let total_questions = sections.iter().map(|section| section.questions).sum();
    let score_percentage = percentage(total_score, max_possible_score);

    PostTripSummary {
        sections,
        total_score,
        max_possible_score,
        total_questions,
        score_percentage,
        risk_status: RiskTier::classify(score_percentage),
    }
}
