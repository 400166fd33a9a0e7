use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::catalog::{Expectation, SectionKind};

/// Identifier wrapper for a persisted inspection.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InspectionId(pub String);

/// Identifier wrapper for the driver an inspection belongs to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverId(pub String);

/// Pass/fail result recorded for a vehicle or health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Fail,
}

impl CheckStatus {
    /// Case-insensitive; document validity (`valid` / `invalid`) reads as pass / fail.
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pass" | "valid" => Some(Self::Pass),
            "fail" | "invalid" => Some(Self::Fail),
            _ => None,
        }
    }
}

/// Compliance status recorded for a trip behaviour item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorStatus {
    Compliant,
    Violation,
    None,
}

impl BehaviorStatus {
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compliant" => Some(Self::Compliant),
            "violation" => Some(Self::Violation),
            "none" | "n/a" => Some(Self::None),
            _ => None,
        }
    }
}

/// A single recorded answer.
///
/// Status strings are matched case-insensitively when deserialized; anything
/// else stays `Text`, which only free-text items accept.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Flag(bool),
    Number(f64),
    Check(CheckStatus),
    Behavior(BehaviorStatus),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAnswer {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl From<RawAnswer> for AnswerValue {
    fn from(raw: RawAnswer) -> Self {
        match raw {
            RawAnswer::Flag(value) => AnswerValue::Flag(value),
            RawAnswer::Number(value) => AnswerValue::Number(value),
            RawAnswer::Text(text) => {
                if let Some(status) = CheckStatus::from_label(&text) {
                    AnswerValue::Check(status)
                } else if let Some(status) = BehaviorStatus::from_label(&text) {
                    AnswerValue::Behavior(status)
                } else {
                    AnswerValue::Text(text)
                }
            }
        }
    }
}

impl<'de> Deserialize<'de> for AnswerValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawAnswer::deserialize(deserializer).map(AnswerValue::from)
    }
}

impl AnswerValue {
    /// Whether the answer reads as "yes" / "pass" / "compliant". Prose never does.
    pub fn is_affirmative(&self) -> bool {
        match self {
            AnswerValue::Flag(value) => *value,
            AnswerValue::Number(value) => value.is_finite() && *value != 0.0,
            AnswerValue::Check(status) => *status == CheckStatus::Pass,
            AnswerValue::Behavior(status) => *status == BehaviorStatus::Compliant,
            AnswerValue::Text(_) => false,
        }
    }

    /// Whether the answer satisfies the favourable direction of an item.
    ///
    /// Unrecognised text is unfavourable for every item that is not free text,
    /// whichever direction the item points.
    pub fn satisfies(&self, expectation: Expectation) -> bool {
        match (expectation, self) {
            (Expectation::FreeText, AnswerValue::Text(text)) => !text.trim().is_empty(),
            (_, AnswerValue::Text(_)) => false,
            (Expectation::Affirmative | Expectation::FreeText, other) => other.is_affirmative(),
            (Expectation::Negative, other) => !other.is_affirmative(),
            (Expectation::Within { min, max }, AnswerValue::Number(value)) => {
                *value >= min && *value <= max
            }
            (Expectation::Within { .. }, other) => other.is_affirmative(),
        }
    }

    /// `Yes` / `No` rendering used by item breakdowns.
    pub fn display(&self) -> String {
        match self {
            AnswerValue::Flag(true) => "Yes".to_string(),
            AnswerValue::Flag(false) => "No".to_string(),
            AnswerValue::Number(value) => format!("{value}"),
            AnswerValue::Check(CheckStatus::Pass) => "Pass".to_string(),
            AnswerValue::Check(CheckStatus::Fail) => "Fail".to_string(),
            AnswerValue::Behavior(BehaviorStatus::Compliant) => "Compliant".to_string(),
            AnswerValue::Behavior(BehaviorStatus::Violation) => "Violation".to_string(),
            AnswerValue::Behavior(BehaviorStatus::None) => "None".to_string(),
            AnswerValue::Text(text) => text.clone(),
        }
    }
}

/// Answers recorded for one section, keyed by item id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionAnswers {
    values: BTreeMap<String, AnswerValue>,
}

impl SectionAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, item: &str, value: AnswerValue) -> Self {
        self.insert(item, value);
        self
    }

    pub fn insert(&mut self, item: &str, value: AnswerValue) {
        self.values.insert(item.to_string(), value);
    }

    pub fn get(&self, item: &str) -> Option<&AnswerValue> {
        self.values.get(item)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.values
            .iter()
            .map(|(item, value)| (item.as_str(), value))
    }
}

impl FromIterator<(String, AnswerValue)> for SectionAnswers {
    fn from_iter<I: IntoIterator<Item = (String, AnswerValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Point-in-time copy of every section recorded against an inspection.
///
/// A section missing from `sections` was never filled in; scoring treats it as
/// incomplete rather than failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionSnapshot {
    pub inspection_id: InspectionId,
    pub driver_id: DriverId,
    pub inspection_date: NaiveDate,
    #[serde(default)]
    pub sections: BTreeMap<SectionKind, SectionAnswers>,
}

impl InspectionSnapshot {
    pub fn new(inspection_id: &str, driver_id: &str, inspection_date: NaiveDate) -> Self {
        Self {
            inspection_id: InspectionId(inspection_id.to_string()),
            driver_id: DriverId(driver_id.to_string()),
            inspection_date,
            sections: BTreeMap::new(),
        }
    }

    pub fn with_section(mut self, kind: SectionKind, answers: SectionAnswers) -> Self {
        self.sections.insert(kind, answers);
        self
    }

    pub fn section(&self, kind: SectionKind) -> Option<&SectionAnswers> {
        self.sections.get(&kind)
    }
}
