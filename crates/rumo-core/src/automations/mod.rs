//! Automations built on top of the analytics layer
//!
//! - **overload** - Weighted burnout-risk assessment and pause candidates
//! - **projection** - Multi-scenario balance projection with runway
//! - **suggestion** - Pre-filled check-in from history
//! - **weekly** - Weekly review (victories, blockers, snapshots)

pub mod overload;
pub mod projection;
pub mod suggestion;
pub mod weekly;

use serde::{Deserialize, Serialize};

pub use overload::{
    assess_overload, OverloadAssessment, OverloadFactor, OverloadFactorKind, OverloadLevel,
    PauseCandidate,
};
pub use projection::{
    project_finances, FinancialProjection, HorizonProjection, Scenario, ScenarioProjection,
};
pub use suggestion::{suggest_checkin, CheckinSuggestion, SuggestionBasis};
pub use weekly::{
    generate_weekly_summary, CategorySpending, FinancialSnapshot, ProjectFocus, ProjectSnapshot,
    WeeklySummary, WellbeingSnapshot,
};

/// Direction of a wellbeing comparison between two periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

impl Trend {
    /// Classify `later - earlier`; anything within `threshold` is stable
    pub fn from_difference(difference: f64, threshold: f64) -> Self {
        if difference > threshold {
            Self::Improving
        } else if difference < -threshold {
            Self::Declining
        } else {
            Self::Stable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Declining => "declining",
            Self::Stable => "stable",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_threshold_is_exclusive() {
        assert_eq!(Trend::from_difference(0.2, 0.2), Trend::Stable);
        assert_eq!(Trend::from_difference(-0.2, 0.2), Trend::Stable);
        assert_eq!(Trend::from_difference(0.21, 0.2), Trend::Improving);
        assert_eq!(Trend::from_difference(-0.3, 0.2), Trend::Declining);
    }
}
