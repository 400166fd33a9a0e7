use rust_decimal::Decimal;
use serde::Serialize;

use super::risk::RiskTier;
use crate::inspection::{SectionAnswers, SectionDefinition, SectionKind, Sizing};

/// Score of a single section, recomputed from its answers on every call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionResult {
    pub section: SectionKind,
    pub name: &'static str,
    pub earned: u32,
    pub max: u32,
    pub questions: u32,
    pub percentage: Decimal,
    pub risk_tier: RiskTier,
    pub completed: bool,
}

/// Rendering of a single item inside a section breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ItemStatus {
    Yes,
    No,
    #[serde(rename = "N/A")]
    NotApplicable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemScore {
    pub item: &'static str,
    pub label: &'static str,
    pub status: ItemStatus,
    pub earned: u32,
    pub critical: bool,
}

/// `round(earned / max * 100, 2)`, or zero for an empty section.
pub fn percentage(earned: u32, max: u32) -> Decimal {
    if max == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(earned) * Decimal::ONE_HUNDRED / Decimal::from(max)).round_dp(2)
}

pub fn score_section(
    definition: &SectionDefinition,
    answers: Option<&SectionAnswers>,
) -> SectionResult {
    let Some(answers) = answers else {
        let nominal = definition.nominal_questions();
        return SectionResult {
            section: definition.kind,
            name: definition.name(),
            earned: 0,
            max: nominal,
            questions: nominal,
            percentage: Decimal::ZERO,
            risk_tier: RiskTier::classify(Decimal::ZERO),
            completed: false,
        };
    };

    let mut earned = 0;
    let mut answered = 0;
    for item in definition.items {
        if let Some(value) = answers.get(item.id) {
            answered += 1;
            if value.satisfies(item.expectation) {
                earned += 1;
            }
        }
    }

    let max = match definition.sizing {
        Sizing::Answered => answered,
        Sizing::Nominal => definition.nominal_questions(),
    };
    let percentage = percentage(earned, max);

    SectionResult {
        section: definition.kind,
        name: definition.name(),
        earned,
        max,
        questions: max,
        percentage,
        risk_tier: RiskTier::classify(percentage),
        completed: true,
    }
}

/// Item-level rows for a section, in catalog order.
pub fn item_breakdown(
    definition: &SectionDefinition,
    answers: Option<&SectionAnswers>,
) -> Vec<ItemScore> {
    definition
        .items
        .iter()
        .map(|item| {
            let (status, earned) = match answers.and_then(|answers| answers.get(item.id)) {
                Some(value) if value.satisfies(item.expectation) => (ItemStatus::Yes, 1),
                Some(_) => (ItemStatus::No, 0),
                None => (ItemStatus::NotApplicable, 0),
            };
            ItemScore {
                item: item.id,
                label: item.label,
                status,
                earned,
                critical: item.critical,
            }
        })
        .collect()
}
