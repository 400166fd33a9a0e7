use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::post_trip::PostTripSummary;
use super::pre_trip::PreTripSummary;
use super::risk::{FinalStatus, RiskTier};
use crate::inspection::{TOTAL_POST_TRIP_QUESTIONS, TOTAL_PRE_TRIP_QUESTIONS};

/// Weight of each checklist in the final percentage.
const CHECKLIST_WEIGHT: i64 = 50;

/// Score, maximum and percentage of one checklist as seen by the combiner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChecklistTotals {
    pub score: u32,
    pub max: u32,
    pub percentage: Decimal,
}

impl ChecklistTotals {
    /// Totals used when a checklist was never recorded.
    pub fn missing(nominal_max: u32) -> Self {
        Self {
            score: 0,
            max: nominal_max,
            percentage: Decimal::ZERO,
        }
    }
}

impl From<&PreTripSummary> for ChecklistTotals {
    fn from(summary: &PreTripSummary) -> Self {
        Self {
            score: summary.total_score,
            max: summary.max_possible_score,
            percentage: summary.score_percentage,
        }
    }
}

impl From<&PostTripSummary> for ChecklistTotals {
    fn from(summary: &PostTripSummary) -> Self {
        Self {
            score: summary.total_score,
            max: summary.max_possible_score,
            percentage: summary.score_percentage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalSummary {
    pub pre_checklist_score: u32,
    pub pre_checklist_max: u32,
    pub pre_checklist_percentage: Decimal,
    pub pre_checklist_weighted: Decimal,
    pub post_checklist_score: u32,
    pub post_checklist_max: u32,
    pub post_checklist_percentage: Decimal,
    pub post_checklist_weighted: Decimal,
    pub final_percentage: Decimal,
    pub final_risk_level: RiskTier,
    pub final_status: FinalStatus,
    pub final_comment: String,
}

fn weighted(percentage: Decimal) -> Decimal {
    (percentage * Decimal::from(CHECKLIST_WEIGHT) / Decimal::ONE_HUNDRED).round_dp(2)
}

/// Combine both checklists 50/50. A missing side counts as zero out of its nominal maximum.
pub fn combine(pre: Option<ChecklistTotals>, post: Option<ChecklistTotals>) -> FinalSummary {
    let pre = pre.unwrap_or_else(|| ChecklistTotals::missing(TOTAL_PRE_TRIP_QUESTIONS));
    let post = post.unwrap_or_else(|| ChecklistTotals::missing(TOTAL_POST_TRIP_QUESTIONS));

    let pre_weighted = weighted(pre.percentage);
    let post_weighted = weighted(post.percentage);
    let final_percentage = pre_weighted + post_weighted;

    FinalSummary {
        pre_checklist_score: pre.score,
        pre_checklist_max: pre.max,
        pre_checklist_percentage: pre.percentage,
        pre_checklist_weighted: pre_weighted,
        post_checklist_score: post.score,
        post_checklist_max: post.max,
        post_checklist_percentage: post.percentage,
        post_checklist_weighted: post_weighted,
        final_percentage,
        final_risk_level: RiskTier::classify(final_percentage),
        final_status: FinalStatus::classify(final_percentage),
        final_comment: final_comment(pre.percentage, post.percentage, final_percentage),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Band {
    Excellent,
    Satisfactory,
    Weak,
    Poor,
}

impl Band {
    fn of(percentage: Decimal) -> Self {
        if percentage >= Decimal::from(85) {
            Band::Excellent
        } else if percentage >= Decimal::from(70) {
            Band::Satisfactory
        } else if percentage >= Decimal::from(50) {
            Band::Weak
        } else {
            Band::Poor
        }
    }
}

pub fn final_comment(pre: Decimal, post: Decimal, final_percentage: Decimal) -> String {
    let pre_sentence = match Band::of(pre) {
        Band::Excellent => "Pre-trip inspection was completed to an excellent standard.",
        Band::Satisfactory => "Pre-trip inspection was satisfactory.",
        Band::Weak => "Pre-trip inspection revealed several deficiencies.",
        Band::Poor => "Pre-trip inspection was poor or incomplete.",
    };
    let post_sentence = match Band::of(post) {
        Band::Excellent => "Trip conduct and post-trip reporting were excellent.",
        Band::Satisfactory => "Trip conduct and post-trip reporting were acceptable.",
        Band::Weak => "Trip conduct showed lapses that should be addressed.",
        Band::Poor => "Trip conduct and post-trip reporting were unsatisfactory.",
    };
    let final_sentence = match Band::of(final_percentage) {
        Band::Excellent => format!(
            "Overall result of {final_percentage:.2}% is commendable."
        ),
        Band::Satisfactory => format!(
            "Overall result of {final_percentage:.2}% meets the required standard."
        ),
        Band::Weak => format!(
            "Overall result of {final_percentage:.2}% requires supervisor review."
        ),
        Band::Poor => format!(
            "Overall result of {final_percentage:.2}% is a failure and needs corrective action."
        ),
    };

    format!("{pre_sentence} {post_sentence} {final_sentence}")
}
