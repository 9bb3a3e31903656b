//! Overload (burnout) assessment
//!
//! Weighted sum of independent factors over the most recent check-ins and the
//! active project load. Each triggered factor contributes
//! `severity (0–100) × weight`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Checkin, Energia, Pressao, Project};

const LOW_ENERGY_WEIGHT: f64 = 0.30;
const HIGH_PRESSURE_WEIGHT: f64 = 0.25;
const TOO_MANY_PROJECTS_WEIGHT: f64 = 0.20;
const CONSECUTIVE_BAD_DAYS_WEIGHT: f64 = 0.15;
const NO_REST_DAYS_WEIGHT: f64 = 0.10;

const LOW_ENERGY_MIN_DAYS: usize = 3;
const HIGH_PRESSURE_MIN_DAYS: usize = 4;
const MAX_ACTIVE_PROJECTS: usize = 5;
const BAD_RUN_MIN_DAYS: usize = 3;
const NO_REST_MIN_OBSERVED: usize = 5;
const NO_REST_SEVERITY: f64 = 70.0;
/// Projects kept running when pausing is recommended
const SUSTAINABLE_PROJECTS: usize = 3;
/// Severity denominators are fixed to a week regardless of how many days were observed
const WEEK: f64 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverloadLevel {
    None,
    Moderate,
    High,
    Critical,
}

impl OverloadLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            Self::Critical
        } else if score >= 50.0 {
            Self::High
        } else if score >= 25.0 {
            Self::Moderate
        } else {
            Self::None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn is_severe(&self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

impl std::fmt::Display for OverloadLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverloadFactorKind {
    LowEnergy,
    HighPressure,
    TooManyProjects,
    ConsecutiveBadDays,
    NoRestDays,
}

impl OverloadFactorKind {
    pub fn weight(&self) -> f64 {
        match self {
            Self::LowEnergy => LOW_ENERGY_WEIGHT,
            Self::HighPressure => HIGH_PRESSURE_WEIGHT,
            Self::TooManyProjects => TOO_MANY_PROJECTS_WEIGHT,
            Self::ConsecutiveBadDays => CONSECUTIVE_BAD_DAYS_WEIGHT,
            Self::NoRestDays => NO_REST_DAYS_WEIGHT,
        }
    }

    fn recommendation(&self) -> &'static str {
        match self {
            Self::LowEnergy => "Protect sleep and cut optional commitments until energy recovers",
            Self::HighPressure => "Renegotiate deadlines or delegate to bring pressure down",
            Self::TooManyProjects => "Reduce the number of projects running in parallel",
            Self::ConsecutiveBadDays => "Schedule a lighter day to break the run of bad days",
            Self::NoRestDays => "Book at least one light-pressure day this week",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverloadFactor {
    pub kind: OverloadFactorKind,
    /// 0–100
    pub severity: f64,
    pub weight: f64,
    pub description: String,
}

impl OverloadFactor {
    fn new(kind: OverloadFactorKind, severity: f64, description: String) -> Self {
        Self {
            kind,
            severity: severity.min(100.0),
            weight: kind.weight(),
            description,
        }
    }

    pub fn contribution(&self) -> f64 {
        self.severity * self.weight
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauseCandidate {
    pub project_id: i64,
    pub name: String,
    pub has_next_action: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverloadAssessment {
    pub score: f64,
    pub level: OverloadLevel,
    pub factors: Vec<OverloadFactor>,
    pub should_pause_projects: bool,
    pub projects_to_pause: Vec<PauseCandidate>,
    pub recommendations: Vec<String>,
}

/// Longest run of consecutive bad days, in chronological order
fn longest_bad_run(chronological: &[&Checkin]) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for checkin in chronological {
        if checkin.is_bad_day() {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Assess overload from recent check-ins and the active project load.
///
/// Only the `window` most recent check-ins are considered; `projects` is
/// filtered to active ones.
pub fn assess_overload(
    checkins: &[Checkin],
    projects: &[Project],
    window: usize,
) -> OverloadAssessment {
    let mut recent: Vec<&Checkin> = checkins.iter().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(window);
    recent.reverse();

    let active: Vec<&Project> = projects.iter().filter(|p| p.is_active()).collect();
    let mut factors = Vec::new();

    let low_energy = recent.iter().filter(|c| c.energia == Energia::Baixa).count();
    if low_energy >= LOW_ENERGY_MIN_DAYS {
        factors.push(OverloadFactor::new(
            OverloadFactorKind::LowEnergy,
            low_energy as f64 / WEEK * 100.0,
            format!("Low energy on {} of the last {} days", low_energy, recent.len()),
        ));
    }

    let high_pressure = recent.iter().filter(|c| c.pressao == Pressao::Alta).count();
    if high_pressure >= HIGH_PRESSURE_MIN_DAYS {
        factors.push(OverloadFactor::new(
            OverloadFactorKind::HighPressure,
            high_pressure as f64 / WEEK * 100.0,
            format!("High pressure on {} of the last {} days", high_pressure, recent.len()),
        ));
    }

    if active.len() > MAX_ACTIVE_PROJECTS {
        let excess = (active.len() - MAX_ACTIVE_PROJECTS) as f64;
        factors.push(OverloadFactor::new(
            OverloadFactorKind::TooManyProjects,
            excess / MAX_ACTIVE_PROJECTS as f64 * 100.0,
            format!("{} active projects (more than {})", active.len(), MAX_ACTIVE_PROJECTS),
        ));
    }

    let bad_run = longest_bad_run(&recent);
    if bad_run >= BAD_RUN_MIN_DAYS {
        factors.push(OverloadFactor::new(
            OverloadFactorKind::ConsecutiveBadDays,
            bad_run as f64 / WEEK * 100.0,
            format!("{} bad days in a row", bad_run),
        ));
    }

    let rest_days = recent.iter().filter(|c| c.pressao == Pressao::Leve).count();
    if recent.len() >= NO_REST_MIN_OBSERVED && rest_days == 0 {
        factors.push(OverloadFactor::new(
            OverloadFactorKind::NoRestDays,
            NO_REST_SEVERITY,
            format!("No light-pressure day in the last {} days", recent.len()),
        ));
    }

    let score: f64 = factors.iter().map(OverloadFactor::contribution).sum();
    let level = OverloadLevel::from_score(score);

    let should_pause_projects = level.is_severe() && active.len() > SUSTAINABLE_PROJECTS;
    let projects_to_pause = if should_pause_projects {
        let mut candidates = active.clone();
        // Projects without a next action go first; stable sort keeps input order otherwise
        candidates.sort_by_key(|p| p.next_action().is_some());
        candidates
            .into_iter()
            .take(active.len() - SUSTAINABLE_PROJECTS)
            .map(|p| PauseCandidate {
                project_id: p.id,
                name: p.name.clone(),
                has_next_action: p.next_action().is_some(),
            })
            .collect()
    } else {
        Vec::new()
    };

    let mut recommendations: Vec<String> = factors
        .iter()
        .map(|f| f.kind.recommendation().to_string())
        .collect();
    if should_pause_projects {
        recommendations.push(format!(
            "Pause {} project(s) to get back to {} active",
            projects_to_pause.len(),
            SUSTAINABLE_PROJECTS
        ));
    }

    debug!(
        score,
        level = level.as_str(),
        factors = factors.len(),
        pause = projects_to_pause.len(),
        "Overload assessed"
    );

    OverloadAssessment {
        score,
        level,
        factors,
        should_pause_projects,
        projects_to_pause,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CaixaStatus, ProjectStatus};
    use chrono::{Duration, NaiveDate, Utc};

    fn checkin(day: i64, caixa: CaixaStatus, energia: Energia, pressao: Pressao) -> Checkin {
        Checkin {
            id: day,
            user_id: 1,
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap() + Duration::days(day),
            caixa_status: caixa,
            energia,
            pressao,
            estado_calculado: None,
        }
    }

    fn projects(count: usize, with_next_action: usize) -> Vec<Project> {
        let now = Utc::now();
        (0..count)
            .map(|i| Project {
                id: i as i64 + 1,
                user_id: 1,
                name: format!("P{}", i + 1),
                status: ProjectStatus::Active,
                objective: "Deliver".to_string(),
                next_action: (i < with_next_action).then(|| "Call client".to_string()),
                created_at: now,
                updated_at: now,
            })
            .collect()
    }

    #[test]
    fn test_worst_week_with_ten_projects() {
        let checkins: Vec<Checkin> = (0..7)
            .map(|d| checkin(d, CaixaStatus::Critico, Energia::Baixa, Pressao::Alta))
            .collect();
        let assessment = assess_overload(&checkins, &projects(10, 4), 7);

        assert!(assessment.score > 50.0);
        assert!(assessment.level.is_severe());
        assert_eq!(assessment.level, OverloadLevel::Critical);
        assert_eq!(assessment.factors.len(), 5);
        assert!(assessment.should_pause_projects);
        assert_eq!(assessment.projects_to_pause.len(), 7);
        // The six projects without a next action are picked first
        assert!(assessment.projects_to_pause[..6]
            .iter()
            .all(|c| !c.has_next_action));
        assert!(assessment.projects_to_pause[6].has_next_action);
    }

    #[test]
    fn test_score_matches_weights() {
        let checkins: Vec<Checkin> = (0..7)
            .map(|d| checkin(d, CaixaStatus::Critico, Energia::Baixa, Pressao::Alta))
            .collect();
        let assessment = assess_overload(&checkins, &projects(10, 0), 7);
        // 100*0.30 + 100*0.25 + 100*0.20 + 100*0.15 + 70*0.10
        assert!((assessment.score - 97.0).abs() < 1e-9);
    }

    #[test]
    fn test_healthy_week() {
        let checkins: Vec<Checkin> = (0..7)
            .map(|d| checkin(d, CaixaStatus::Tranquilo, Energia::Alta, Pressao::Leve))
            .collect();
        let assessment = assess_overload(&checkins, &projects(2, 2), 7);
        assert_eq!(assessment.level, OverloadLevel::None);
        assert_eq!(assessment.score, 0.0);
        assert!(!assessment.should_pause_projects);
        assert!(assessment.recommendations.is_empty());
    }

    #[test]
    fn test_only_window_is_considered() {
        let mut checkins: Vec<Checkin> = (0..7)
            .map(|d| checkin(d, CaixaStatus::Critico, Energia::Baixa, Pressao::Alta))
            .collect();
        checkins.extend(
            (7..14).map(|d| checkin(d, CaixaStatus::Tranquilo, Energia::Alta, Pressao::Leve)),
        );
        let assessment = assess_overload(&checkins, &[], 7);
        assert_eq!(assessment.level, OverloadLevel::None);
    }

    #[test]
    fn test_bad_run_breaks_on_good_day() {
        let checkins = vec![
            checkin(0, CaixaStatus::Tranquilo, Energia::Baixa, Pressao::Normal),
            checkin(1, CaixaStatus::Tranquilo, Energia::Media, Pressao::Alta),
            checkin(2, CaixaStatus::Tranquilo, Energia::Alta, Pressao::Leve),
            checkin(3, CaixaStatus::Critico, Energia::Media, Pressao::Normal),
            checkin(4, CaixaStatus::Tranquilo, Energia::Media, Pressao::Normal),
        ];
        let assessment = assess_overload(&checkins, &[], 7);
        assert!(assessment
            .factors
            .iter()
            .all(|f| f.kind != OverloadFactorKind::ConsecutiveBadDays));
    }

    #[test]
    fn test_no_rest_needs_five_observed_days() {
        let four: Vec<Checkin> = (0..4)
            .map(|d| checkin(d, CaixaStatus::Tranquilo, Energia::Media, Pressao::Normal))
            .collect();
        assert!(assess_overload(&four, &[], 7).factors.is_empty());

        let five: Vec<Checkin> = (0..5)
            .map(|d| checkin(d, CaixaStatus::Tranquilo, Energia::Media, Pressao::Normal))
            .collect();
        let assessment = assess_overload(&five, &[], 7);
        assert_eq!(assessment.factors.len(), 1);
        assert_eq!(assessment.factors[0].kind, OverloadFactorKind::NoRestDays);
        assert!((assessment.score - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_levels() {
        assert_eq!(OverloadLevel::from_score(75.0), OverloadLevel::Critical);
        assert_eq!(OverloadLevel::from_score(50.0), OverloadLevel::High);
        assert_eq!(OverloadLevel::from_score(25.0), OverloadLevel::Moderate);
        assert_eq!(OverloadLevel::from_score(24.9), OverloadLevel::None);
    }
}
