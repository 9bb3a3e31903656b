//! Daily guidance: DO, HOLD or CUT

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analytics::SpendingTrend;
use crate::insights::OperationalInsights;
use crate::models::{Alert, AlertType, OperationalState};

const CUT_HEALTH: u8 = 40;
const DO_HEALTH: u8 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GuidanceMode {
    Do,
    Hold,
    Cut,
}

impl GuidanceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Do => "DO",
            Self::Hold => "HOLD",
            Self::Cut => "CUT",
        }
    }
}

impl std::fmt::Display for GuidanceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guidance {
    pub mode: GuidanceMode,
    pub text: String,
}

impl Guidance {
    fn new(mode: GuidanceMode, text: &str) -> Self {
        Self {
            mode,
            text: text.to_string(),
        }
    }
}

/// Pick today's mode from the insights and the user's stored alerts.
///
/// Unresolved finance or overload alerts force CUT.
pub fn guidance(insights: &OperationalInsights, alerts: &[Alert]) -> Guidance {
    let pressing_alert = alerts.iter().any(|a| {
        !a.resolved && matches!(a.alert_type, AlertType::Finance | AlertType::Overload)
    });
    let state = insights.current_state;

    let result = if state == Some(OperationalState::Critical)
        || insights.health_score < CUT_HEALTH
        || pressing_alert
    {
        Guidance::new(
            GuidanceMode::Cut,
            "Cut back: drop non-essential spending and commitments until things stabilize.",
        )
    } else if state == Some(OperationalState::Attack) && insights.health_score > DO_HEALTH {
        Guidance::new(
            GuidanceMode::Do,
            "Go for it: conditions are good to push your top priority forward.",
        )
    } else if insights.finance.spending_trend == SpendingTrend::Increasing {
        Guidance::new(
            GuidanceMode::Hold,
            "Hold steady and watch your spending; it has been trending up.",
        )
    } else {
        Guidance::new(
            GuidanceMode::Hold,
            "Hold steady: keep the current pace and avoid new commitments.",
        )
    };

    debug!(
        mode = result.mode.as_str(),
        health_score = insights.health_score,
        pressing_alert,
        "Guidance selected"
    );
    result
}
