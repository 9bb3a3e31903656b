//! Project analytics: staleness, velocity, completion estimates, priority

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Project, ProjectStats, ProjectStatus};

/// Active projects not updated for strictly more than `threshold_days`
pub fn find_stalled_projects<'a>(
    projects: &'a [Project],
    threshold_days: i64,
    now: DateTime<Utc>,
) -> Vec<&'a Project> {
    let threshold = Duration::days(threshold_days);
    projects
        .iter()
        .filter(|p| p.is_active() && now - p.updated_at > threshold)
        .collect()
}

/// Counts by status, including stalled active projects
pub fn project_stats(
    projects: &[Project],
    now: DateTime<Utc>,
    threshold_days: i64,
) -> ProjectStats {
    let count = |status: ProjectStatus| projects.iter().filter(|p| p.status == status).count();

    ProjectStats {
        total: projects.len(),
        active: count(ProjectStatus::Active),
        paused: count(ProjectStatus::Paused),
        done: count(ProjectStatus::Done),
        stalled: find_stalled_projects(projects, threshold_days, now).len(),
    }
}

/// Completed tasks per week (0 when `weeks` is not positive)
pub fn velocity(completed_tasks: u32, weeks: f64) -> f64 {
    if weeks <= 0.0 {
        return 0.0;
    }
    completed_tasks as f64 / weeks
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Weeks remaining at the current velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompletionEstimate {
    /// `None` when nothing is getting done
    pub weeks: Option<f64>,
    pub confidence: Confidence,
}

impl CompletionEstimate {
    pub fn is_unbounded(&self) -> bool {
        self.weeks.is_none()
    }
}

pub fn estimate_completion(remaining_tasks: u32, velocity: f64) -> CompletionEstimate {
    if velocity <= 0.0 {
        return CompletionEstimate {
            weeks: None,
            confidence: Confidence::Low,
        };
    }

    let confidence = if velocity >= 3.0 {
        Confidence::High
    } else if velocity >= 1.0 {
        Confidence::Medium
    } else {
        Confidence::Low
    };

    CompletionEstimate {
        weeks: Some(remaining_tasks as f64 / velocity),
        confidence,
    }
}

/// Inputs for [`priority_score`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorityFactors {
    /// 0–10
    pub financial_impact: u8,
    /// 0–10
    pub energy_required: u8,
    pub deadline: Option<NaiveDate>,
}

impl Default for PriorityFactors {
    /// Neutral midpoint used when no project metadata is available
    fn default() -> Self {
        Self {
            financial_impact: 5,
            energy_required: 5,
            deadline: None,
        }
    }
}

/// Priority in [0, 100]: financial impact, deadline urgency, low energy cost
/// and being active all push a project up.
pub fn priority_score(project: &Project, factors: &PriorityFactors, today: NaiveDate) -> u32 {
    let impact = factors.financial_impact as u32;
    let energy = factors.energy_required.min(10) as u32;

    let mut score = impact * 4;

    if let Some(deadline) = factors.deadline {
        let days_left = (deadline - today).num_days();
        score += match days_left {
            d if d < 7 => 30,
            d if d < 30 => 20,
            d if d < 90 => 10,
            _ => 0,
        };
    }

    score += (10 - energy) * 2;

    if project.is_active() {
        score += 10;
    }

    score.min(100)
}
