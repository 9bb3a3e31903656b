//! Aggregated insight types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analytics::{EnhancedFinanceSummary, WeeklyEnergyPattern};
use crate::automations::OverloadAssessment;
use crate::models::{AlertType, OperationalState, ProjectStats};

/// The highest-priority active project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrioritizedProject {
    pub project_id: i64,
    pub name: String,
    pub next_action: Option<String>,
    pub score: u32,
}

/// A warning raised while aggregating, tagged with the area it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub source: AlertType,
    pub message: String,
}

impl Warning {
    pub fn new(source: AlertType, message: impl Into<String>) -> Self {
        Self {
            source,
            message: message.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Everything the decision layer needs about a user's current situation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationalInsights {
    /// State of today's check-in; `None` when the user has not checked in
    pub current_state: Option<OperationalState>,
    pub finance: EnhancedFinanceSummary,
    pub energy_pattern: WeeklyEnergyPattern,
    /// Consecutive alta/media days, most recent backwards
    pub energy_streak: u32,
    /// Pearson correlation between energy and completed tasks, in [-1, 1]
    pub productivity_correlation: f64,
    pub top_priority_project: Option<PrioritizedProject>,
    pub overload: OverloadAssessment,
    pub project_stats: ProjectStats,
    pub warnings: Vec<Warning>,
    pub recommended_actions: Vec<String>,
    /// 0–100 blend of finance, state and energy
    pub health_score: u8,
}

impl OperationalInsights {
    /// Current state, treating a missing check-in as caution
    pub fn effective_state(&self) -> OperationalState {
        self.current_state.unwrap_or(OperationalState::Caution)
    }
}
