use serde::{Deserialize, Serialize};

/// Tunable knobs applied on top of the fixed catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    /// Report an absent section holding critical items as a critical failure.
    pub absent_critical_section_fails: bool,
    /// Length of the trailing violation window, in days.
    pub rolling_window_days: u16,
}

impl ScoringPolicy {
    pub const DEFAULT_ROLLING_WINDOW_DAYS: u16 = 30;

    /// Matches the historical behaviour where missing sections never block travel.
    pub fn lenient() -> Self {
        Self {
            absent_critical_section_fails: false,
            ..Self::default()
        }
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            absent_critical_section_fails: true,
            rolling_window_days: Self::DEFAULT_ROLLING_WINDOW_DAYS,
        }
    }
}
