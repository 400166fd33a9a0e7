use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Four-tier scale shared by sections, checklists and the final combination.
///
/// Variants are declared in order of increasing severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    NoRisk,
    VeryLowRisk,
    LowRisk,
    HighRisk,
}

impl RiskTier {
    pub fn classify(percentage: Decimal) -> Self {
        if percentage >= Decimal::ONE_HUNDRED {
            RiskTier::NoRisk
        } else if percentage >= Decimal::from(85) {
            RiskTier::VeryLowRisk
        } else if percentage >= Decimal::from(70) {
            RiskTier::LowRisk
        } else {
            RiskTier::HighRisk
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskTier::NoRisk => "No Risk",
            RiskTier::VeryLowRisk => "Very Low Risk",
            RiskTier::LowRisk => "Low Risk",
            RiskTier::HighRisk => "High Risk",
        }
    }
}

/// Three-tier scale for accumulated trip violation points.
///
/// Deliberately separate from [`RiskTier`]; the two scales answer different questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationRiskLevel {
    Low,
    Medium,
    High,
}

impl ViolationRiskLevel {
    pub fn classify(points: u32) -> Self {
        match points {
            0..=3 => ViolationRiskLevel::Low,
            4..=9 => ViolationRiskLevel::Medium,
            _ => ViolationRiskLevel::High,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ViolationRiskLevel::Low => "Low",
            ViolationRiskLevel::Medium => "Medium",
            ViolationRiskLevel::High => "High",
        }
    }
}

/// Verdict attached to the combined pre-trip and post-trip percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalStatus {
    Passed,
    NeedsReview,
    Failed,
}

impl FinalStatus {
    pub fn classify(final_percentage: Decimal) -> Self {
        if final_percentage >= Decimal::from(70) {
            FinalStatus::Passed
        } else if final_percentage >= Decimal::from(50) {
            FinalStatus::NeedsReview
        } else {
            FinalStatus::Failed
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            FinalStatus::Passed => "Passed",
            FinalStatus::NeedsReview => "Needs Review",
            FinalStatus::Failed => "Failed",
        }
    }
}
