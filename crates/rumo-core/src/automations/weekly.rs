//! Weekly summary
//!
//! Reviews one week (both bounds inclusive) of check-ins, ledger entries,
//! projects and decisions. The wellbeing trend compares against the seven
//! days immediately before `week_start`.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Trend;
use crate::models::{
    format_amount, CaixaStatus, Checkin, Decision, Energia, FinancialEntry, Pressao, Project,
    ProjectStatus,
};

const BAD_DAYS_BLOCKER: usize = 3;
const HIGH_PRESSURE_BLOCKER: usize = 4;
const TOP_CATEGORIES: usize = 3;
const FOCUS_PROJECTS: usize = 3;
const ENERGY_TREND_THRESHOLD: f64 = 0.2;
const MIN_WEEKLY_CHECKINS: usize = 5;
const LOW_ENERGY_AVERAGE: f64 = 0.4;
const MAX_ACTIVE_PROJECTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpending {
    pub category: String,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    pub income: i64,
    pub expenses: i64,
    pub net: i64,
    pub top_categories: Vec<CategorySpending>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellbeingSnapshot {
    pub checkin_count: usize,
    /// 0–1, alta = 1
    pub avg_energy: f64,
    /// 0–1, tranquilo = 1
    pub avg_caixa: f64,
    pub high_pressure_days: usize,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFocus {
    pub project_id: i64,
    pub name: String,
    pub next_action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub active_count: usize,
    pub completed_this_week: usize,
    pub focus: Vec<ProjectFocus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub victories: Vec<String>,
    pub blockers: Vec<String>,
    pub financial: FinancialSnapshot,
    pub wellbeing: WellbeingSnapshot,
    pub projects: ProjectSnapshot,
    pub decisions_made: Vec<Decision>,
    pub insights: Vec<String>,
}

fn in_window(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    date >= start && date <= end
}

fn average_energy(checkins: &[&Checkin]) -> Option<f64> {
    if checkins.is_empty() {
        return None;
    }
    Some(checkins.iter().map(|c| c.energia.score()).sum::<f64>() / checkins.len() as f64)
}

fn financial_snapshot(entries: &[&FinancialEntry]) -> FinancialSnapshot {
    let mut income = 0;
    let mut expenses = 0;
    let mut by_category: HashMap<&str, i64> = HashMap::new();

    for entry in entries {
        if entry.is_income() {
            income += entry.value;
        } else {
            expenses += entry.value;
            *by_category.entry(entry.category.as_str()).or_insert(0) += entry.value;
        }
    }

    let mut categories: Vec<CategorySpending> = by_category
        .into_iter()
        .map(|(category, total)| CategorySpending {
            category: category.to_string(),
            total,
        })
        .collect();
    categories.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    categories.truncate(TOP_CATEGORIES);

    FinancialSnapshot {
        income,
        expenses,
        net: income - expenses,
        top_categories: categories,
    }
}

/// Summarize the week `[week_start, week_end]`.
///
/// Inputs may span more than the week; everything is filtered here.
pub fn generate_weekly_summary(
    checkins: &[Checkin],
    entries: &[FinancialEntry],
    projects: &[Project],
    decisions: &[Decision],
    week_start: NaiveDate,
    week_end: NaiveDate,
) -> WeeklySummary {
    let week: Vec<&Checkin> = checkins
        .iter()
        .filter(|c| in_window(c.date, week_start, week_end))
        .collect();
    let previous_start = week_start - Duration::days(7);
    let previous_end = week_start - Duration::days(1);
    let previous: Vec<&Checkin> = checkins
        .iter()
        .filter(|c| in_window(c.date, previous_start, previous_end))
        .collect();
    let week_entries: Vec<&FinancialEntry> = entries
        .iter()
        .filter(|e| in_window(e.date, week_start, week_end))
        .collect();
    let completed: Vec<&Project> = projects
        .iter()
        .filter(|p| {
            p.status == ProjectStatus::Done
                && in_window(p.updated_at.date_naive(), week_start, week_end)
        })
        .collect();
    let active: Vec<&Project> = projects.iter().filter(|p| p.is_active()).collect();

    let financial = financial_snapshot(&week_entries);

    let good_days = week
        .iter()
        .filter(|c| c.energia == Energia::Alta && c.caixa_status == CaixaStatus::Tranquilo)
        .count();
    let bad_days = week
        .iter()
        .filter(|c| c.energia == Energia::Baixa || c.caixa_status == CaixaStatus::Critico)
        .count();
    let high_pressure_days = week.iter().filter(|c| c.pressao == Pressao::Alta).count();

    let avg_energy = average_energy(&week);
    let trend = match (avg_energy, average_energy(&previous)) {
        (Some(now), Some(before)) => Trend::from_difference(now - before, ENERGY_TREND_THRESHOLD),
        _ => Trend::Stable,
    };
    let avg_caixa = if week.is_empty() {
        0.0
    } else {
        week.iter().map(|c| c.caixa_status.score()).sum::<f64>() / week.len() as f64
    };

    let wellbeing = WellbeingSnapshot {
        checkin_count: week.len(),
        avg_energy: avg_energy.unwrap_or(0.0),
        avg_caixa,
        high_pressure_days,
        trend,
    };

    let mut victories = Vec::new();
    if good_days > 0 {
        victories.push(format!("{} day(s) with high energy and calm cash flow", good_days));
    }
    if !completed.is_empty() {
        let names: Vec<&str> = completed.iter().map(|p| p.name.as_str()).collect();
        victories.push(format!(
            "Completed {} project(s): {}",
            completed.len(),
            names.join(", ")
        ));
    }
    if financial.income > 0 {
        victories.push(format!("Brought in {} in income", format_amount(financial.income)));
    }

    let mut blockers = Vec::new();
    if bad_days >= BAD_DAYS_BLOCKER {
        blockers.push(format!("{} difficult days (low energy or critical cash)", bad_days));
    }
    if high_pressure_days >= HIGH_PRESSURE_BLOCKER {
        blockers.push(format!("High pressure on {} days", high_pressure_days));
    }

    let focus: Vec<ProjectFocus> = active
        .iter()
        .filter_map(|p| {
            p.next_action().map(|action| ProjectFocus {
                project_id: p.id,
                name: p.name.clone(),
                next_action: action.to_string(),
            })
        })
        .take(FOCUS_PROJECTS)
        .collect();

    let project_snapshot = ProjectSnapshot {
        active_count: active.len(),
        completed_this_week: completed.len(),
        focus,
    };

    let mut insights = Vec::new();
    if wellbeing.checkin_count < MIN_WEEKLY_CHECKINS {
        insights.push(format!(
            "Only {} check-in(s) this week; daily check-ins sharpen the analysis",
            wellbeing.checkin_count
        ));
    }
    if financial.expenses > financial.income {
        insights.push(format!(
            "Spending exceeded income by {}",
            format_amount(financial.expenses - financial.income)
        ));
    }
    if wellbeing.checkin_count > 0 && wellbeing.avg_energy < LOW_ENERGY_AVERAGE {
        insights.push("Average energy was low this week; protect time to recover".to_string());
    }
    if project_snapshot.active_count > MAX_ACTIVE_PROJECTS {
        insights.push(format!(
            "{} active projects; consider narrowing focus",
            project_snapshot.active_count
        ));
    }
    if trend == Trend::Improving {
        insights.push("Energy improved compared with last week".to_string());
    }

    let decisions_made: Vec<Decision> = decisions
        .iter()
        .filter(|d| in_window(d.date, week_start, week_end))
        .cloned()
        .collect();

    debug!(
        %week_start,
        %week_end,
        checkins = wellbeing.checkin_count,
        victories = victories.len(),
        blockers = blockers.len(),
        "Weekly summary generated"
    );

    WeeklySummary {
        week_start,
        week_end,
        victories,
        blockers,
        financial,
        wellbeing,
        projects: project_snapshot,
        decisions_made,
        insights,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryType;
    use chrono::{TimeZone, Utc};

    /// 2026-03-02 is a Monday
    fn week_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn week_end() -> NaiveDate {
        week_start() + Duration::days(6)
    }

    fn checkin(offset: i64, caixa: CaixaStatus, energia: Energia, pressao: Pressao) -> Checkin {
        Checkin {
            id: offset,
            user_id: 1,
            date: week_start() + Duration::days(offset),
            caixa_status: caixa,
            energia,
            pressao,
            estado_calculado: None,
        }
    }

    fn entry(entry_type: EntryType, value: i64, category: &str, offset: i64) -> FinancialEntry {
        FinancialEntry {
            id: offset,
            user_id: 1,
            entry_type,
            value,
            category: category.to_string(),
            date: week_start() + Duration::days(offset),
            notes: None,
        }
    }

    fn project(id: i64, status: ProjectStatus, next_action: Option<&str>) -> Project {
        let updated = Utc.with_ymd_and_hms(2026, 3, 4, 12, 0, 0).unwrap();
        Project {
            id,
            user_id: 1,
            name: format!("Project {}", id),
            status,
            objective: "Ship".to_string(),
            next_action: next_action.map(String::from),
            created_at: updated,
            updated_at: updated,
        }
    }

    fn summarize(
        checkins: &[Checkin],
        entries: &[FinancialEntry],
        projects: &[Project],
    ) -> WeeklySummary {
        generate_weekly_summary(checkins, entries, projects, &[], week_start(), week_end())
    }

    #[test]
    fn test_empty_week() {
        let summary = summarize(&[], &[], &[]);
        assert!(summary.victories.is_empty());
        assert!(summary.blockers.is_empty());
        assert_eq!(summary.wellbeing.trend, Trend::Stable);
        assert_eq!(summary.wellbeing.avg_energy, 0.0);
        assert!(summary.insights.iter().any(|i| i.contains("Only 0 check-in")));
    }

    #[test]
    fn test_victories_and_blockers() {
        let mut checkins = vec![
            checkin(0, CaixaStatus::Tranquilo, Energia::Alta, Pressao::Leve),
            checkin(1, CaixaStatus::Tranquilo, Energia::Alta, Pressao::Alta),
        ];
        for offset in 2..6 {
            checkins.push(checkin(offset, CaixaStatus::Critico, Energia::Baixa, Pressao::Alta));
        }
        let entries = vec![entry(EntryType::Entrada, 250_000, "salario", 0)];
        let projects = vec![project(1, ProjectStatus::Done, None)];

        let summary = summarize(&checkins, &entries, &projects);
        assert_eq!(summary.victories.len(), 3);
        assert!(summary.victories[0].starts_with("2 day(s)"));
        assert!(summary.victories[1].contains("Project 1"));
        assert!(summary.victories[2].contains("2500.00"));

        assert_eq!(summary.blockers.len(), 2);
        assert!(summary.blockers[0].starts_with("4 difficult days"));
        assert_eq!(summary.wellbeing.high_pressure_days, 5);
        assert_eq!(summary.projects.completed_this_week, 1);
    }

    #[test]
    fn test_financial_snapshot_top_categories() {
        let entries = vec![
            entry(EntryType::Saida, 5_000, "mercado", 0),
            entry(EntryType::Saida, 7_000, "mercado", 1),
            entry(EntryType::Saida, 9_000, "aluguel", 2),
            entry(EntryType::Saida, 1_000, "cafe", 3),
            entry(EntryType::Saida, 500, "lazer", 4),
            entry(EntryType::Entrada, 10_000, "freela", 5),
            // Outside the week
            entry(EntryType::Saida, 99_000, "viagem", 9),
        ];
        let summary = summarize(&[], &entries, &[]);
        let financial = &summary.financial;
        assert_eq!(financial.expenses, 22_500);
        assert_eq!(financial.net, -12_500);
        let names: Vec<&str> =
            financial.top_categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["mercado", "aluguel", "cafe"]);
        assert!(summary.insights.iter().any(|i| i.contains("125.00")));
    }

    #[test]
    fn test_trend_against_previous_week() {
        let mut checkins: Vec<Checkin> = (0..5)
            .map(|d| checkin(d, CaixaStatus::Tranquilo, Energia::Alta, Pressao::Normal))
            .collect();
        for d in 1..=3 {
            checkins.push(checkin(-d, CaixaStatus::Atencao, Energia::Baixa, Pressao::Normal));
        }

        let summary = summarize(&checkins, &[], &[]);
        assert_eq!(summary.wellbeing.checkin_count, 5);
        assert_eq!(summary.wellbeing.avg_energy, 1.0);
        assert_eq!(summary.wellbeing.trend, Trend::Improving);
        assert!(summary.insights.iter().any(|i| i.contains("improved")));
    }

    #[test]
    fn test_low_energy_insight() {
        let checkins: Vec<Checkin> = (0..5)
            .map(|d| checkin(d, CaixaStatus::Atencao, Energia::Baixa, Pressao::Normal))
            .collect();
        let summary = summarize(&checkins, &[], &[]);
        assert_eq!(summary.wellbeing.avg_caixa, 0.5);
        assert!(summary.insights.iter().any(|i| i.contains("energy was low")));
        assert!(!summary.insights.iter().any(|i| i.contains("check-in(s) this week")));
    }

    #[test]
    fn test_project_focus_and_overcommitment() {
        let mut projects: Vec<Project> = (1..=6)
            .map(|id| project(id, ProjectStatus::Active, Some("Call client")))
            .collect();
        projects[0].next_action = Some("  ".to_string());
        projects.push(project(7, ProjectStatus::Paused, Some("Later")));

        let summary = summarize(&[], &[], &projects);
        assert_eq!(summary.projects.active_count, 6);
        let ids: Vec<i64> = summary.projects.focus.iter().map(|f| f.project_id).collect();
        assert_eq!(ids, vec![2, 3, 4]);
        assert!(summary.insights.iter().any(|i| i.starts_with("6 active projects")));
    }

    #[test]
    fn test_decisions_within_window() {
        let decision = |id: i64, offset: i64| Decision {
            id,
            user_id: 1,
            context: "Pricing".to_string(),
            decision: "Raise rates".to_string(),
            date: week_start() + Duration::days(offset),
        };
        let decisions = vec![decision(1, 2), decision(2, 8), decision(3, -1)];
        let summary = generate_weekly_summary(&[], &[], &[], &decisions, week_start(), week_end());
        assert_eq!(summary.decisions_made.len(), 1);
        assert_eq!(summary.decisions_made[0].id, 1);
    }
}
