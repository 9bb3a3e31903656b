//! Action-mother: the single most useful thing to do next

use crate::insights::OperationalInsights;
use crate::models::OperationalState;

const CRITICAL_FORECAST_DAYS: i64 = 7;
const CRITICAL_HEALTH: u8 = 30;
const GOOD_STREAK: u32 = 3;

/// Walk the decision cascade and return the first matching recommendation
pub fn recommend_action(insights: &OperationalInsights) -> String {
    if insights.current_state == Some(OperationalState::Critical) {
        return "Stabilize first: secure cash for the essentials and drop everything optional today"
            .to_string();
    }

    if let Some(days) = insights.finance.summary.forecast_days {
        if days < CRITICAL_FORECAST_DAYS {
            return format!(
                "Bring money in: at the current pace cash lasts {} more days",
                days
            );
        }
    }

    if insights.health_score < CRITICAL_HEALTH {
        return format!(
            "Recover before pushing: overall health is {}/100",
            insights.health_score
        );
    }

    if let Some(project) = &insights.top_priority_project {
        return match &project.next_action {
            Some(action) => format!("{}: {}", project.name, action),
            None => format!("Define the next action for {}", project.name),
        };
    }

    if insights.energy_streak > GOOD_STREAK {
        return format!(
            "{} good-energy days in a row: tackle your hardest task",
            insights.energy_streak
        );
    }

    if let Some(action) = insights.recommended_actions.first() {
        return action.clone();
    }

    if insights.energy_streak == 0 {
        return "Rest and recover before taking on more".to_string();
    }

    "Maintain your rhythm".to_string()
}
