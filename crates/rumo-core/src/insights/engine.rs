//! Insight aggregation - combines every analytics component into one view

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use tracing::info;

use crate::analytics::{
    analyze_weekly_patterns, correlate_mood_and_productivity, energy_streak, enhance_summary,
    find_stalled_projects, priority_score, project_stats, PriorityFactors, SpendingTrend,
};
use crate::automations::assess_overload;
use crate::config::AnalyticsConfig;
use crate::models::{
    AlertType, Checkin, Decision, Energia, FinancialEntry, OperationalState, Project,
};
use crate::store::Repository;
use crate::Result;

use super::types::{OperationalInsights, PrioritizedProject, Warning};

const FINANCE_WEIGHT: f64 = 0.5;
const STATE_WEIGHT: f64 = 0.3;
const ENERGY_WEIGHT: f64 = 0.2;
const LOW_FINANCE_HEALTH: u8 = 40;
const STRONG_CORRELATION: f64 = 0.5;

/// Context provided to the aggregator: one user's history plus the
/// reference day and tuning.
#[derive(Debug, Clone)]
pub struct AnalysisContext<'a> {
    pub user_id: i64,
    /// Day being analyzed; later records are ignored
    pub today: NaiveDate,
    /// Reference instant for project staleness
    pub now: DateTime<Utc>,
    pub checkins: Vec<Checkin>,
    pub entries: Vec<FinancialEntry>,
    pub projects: Vec<Project>,
    pub decisions: Vec<Decision>,
    /// Completed tasks per day
    pub task_counts: HashMap<NaiveDate, u32>,
    pub config: &'a AnalyticsConfig,
}

impl<'a> AnalysisContext<'a> {
    /// Create an empty context for `today`, with staleness measured from its start
    pub fn new(user_id: i64, today: NaiveDate, config: &'a AnalyticsConfig) -> Self {
        Self {
            user_id,
            today,
            now: Utc.from_utc_datetime(&today.and_time(NaiveTime::MIN)),
            checkins: Vec::new(),
            entries: Vec::new(),
            projects: Vec::new(),
            decisions: Vec::new(),
            task_counts: HashMap::new(),
            config,
        }
    }

    /// Days of history the aggregator and automations look at
    pub fn history_days(config: &AnalyticsConfig) -> u32 {
        config
            .finance
            .summary_window_days
            .max(config.projection.lookback_days)
            .max(config.suggestion_lookback_days)
            .max(config.overload_window as u32)
            .max(14)
    }

    /// Fetch everything needed for `today` from a repository
    pub fn load<R: Repository + ?Sized>(
        repo: &R,
        user_id: i64,
        today: NaiveDate,
        config: &'a AnalyticsConfig,
    ) -> Result<Self> {
        let since = today - Duration::days(Self::history_days(config) as i64);
        let mut ctx = Self::new(user_id, today, config);
        ctx.checkins = repo.checkins(user_id, since)?;
        ctx.entries = repo.financial_entries(user_id, since)?;
        ctx.projects = repo.projects(user_id)?;
        ctx.decisions = repo.decisions(user_id, since)?;
        ctx.task_counts = repo.task_counts(user_id, since)?;
        Ok(ctx)
    }

    /// Override the staleness reference instant
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Check-ins dated on or before `today`
    pub fn checkins_to_date(&self) -> Vec<Checkin> {
        self.checkins
            .iter()
            .filter(|c| c.date <= self.today)
            .cloned()
            .collect()
    }

    /// Today's check-in, if the user has made one
    pub fn todays_checkin(&self) -> Option<&Checkin> {
        self.checkins.iter().find(|c| c.date == self.today)
    }
}

fn state_score(state: Option<OperationalState>) -> f64 {
    state.unwrap_or(OperationalState::Caution).score()
}

fn energy_score(energia: Option<Energia>) -> f64 {
    match energia.unwrap_or(Energia::Media) {
        Energia::Alta => 100.0,
        Energia::Media => 60.0,
        Energia::Baixa => 20.0,
    }
}

/// Compute the combined operational view for the context's user and day
pub fn compute_operational_insights(ctx: &AnalysisContext<'_>) -> OperationalInsights {
    let config = ctx.config;
    let checkins = ctx.checkins_to_date();
    let current = ctx.todays_checkin();
    let current_state = current.map(Checkin::computed_state);

    let finance = enhance_summary(&ctx.entries, ctx.today, &config.finance);
    let energy_pattern = analyze_weekly_patterns(&checkins);
    let streak = energy_streak(&checkins);
    let correlation = correlate_mood_and_productivity(&checkins, &ctx.task_counts);
    let overload = assess_overload(&checkins, &ctx.projects, config.overload_window);
    let stats = project_stats(&ctx.projects, ctx.now, config.stalled_threshold_days);
    let stalled = find_stalled_projects(&ctx.projects, config.stalled_threshold_days, ctx.now);

    let factors = PriorityFactors::default();
    let top_priority_project = ctx
        .projects
        .iter()
        .filter(|p| p.is_active())
        .map(|p| (p, priority_score(p, &factors, ctx.today)))
        .fold(None, |best: Option<(&Project, u32)>, (p, score)| match best {
            Some((_, best_score)) if best_score >= score => best,
            _ => Some((p, score)),
        })
        .map(|(p, score)| PrioritizedProject {
            project_id: p.id,
            name: p.name.clone(),
            next_action: p.next_action().map(String::from),
            score,
        });

    let mut warnings = Vec::new();
    if overload.level.is_severe() {
        warnings.push(Warning::new(
            AlertType::Overload,
            format!(
                "Overload risk is {} (score {:.0})",
                overload.level, overload.score
            ),
        ));
    }
    if !stalled.is_empty() {
        warnings.push(Warning::new(
            AlertType::Project,
            format!(
                "{} project(s) without updates for more than {} days",
                stalled.len(),
                config.stalled_threshold_days
            ),
        ));
    }
    if finance.health_score < LOW_FINANCE_HEALTH {
        warnings.push(Warning::new(
            AlertType::Finance,
            format!("Financial health is low ({}/100)", finance.health_score),
        ));
    }
    if finance.anomaly_detected {
        let dates: Vec<String> = finance.anomaly_dates.iter().map(|d| d.to_string()).collect();
        warnings.push(Warning::new(
            AlertType::Finance,
            format!("Unusual spending on {}", dates.join(", ")),
        ));
    }

    let mut recommended_actions = Vec::new();
    if !overload.projects_to_pause.is_empty() {
        let names: Vec<&str> = overload
            .projects_to_pause
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        recommended_actions.push(format!("Pause {}", names.join(", ")));
    }
    for project in &stalled {
        recommended_actions.push(format!("Review stalled project \"{}\"", project.name));
    }
    if correlation > STRONG_CORRELATION {
        if let Some(best_day) = energy_pattern.best_day {
            recommended_actions.push(format!(
                "Schedule demanding work on {:?}, your highest-energy day",
                best_day
            ));
        }
    }
    if finance.spending_trend == SpendingTrend::Increasing {
        recommended_actions.push("Review recent expenses; spending is trending up".to_string());
    }

    let blended = finance.health_score as f64 * FINANCE_WEIGHT
        + state_score(current_state) * STATE_WEIGHT
        + energy_score(current.map(|c| c.energia)) * ENERGY_WEIGHT;
    let health_score = blended.round().clamp(0.0, 100.0) as u8;

    info!(
        user_id = ctx.user_id,
        today = %ctx.today,
        health_score,
        state = current_state.map(|s| s.as_str()).unwrap_or("none"),
        warnings = warnings.len(),
        actions = recommended_actions.len(),
        "Operational insights computed"
    );

    OperationalInsights {
        current_state,
        finance,
        energy_pattern,
        energy_streak: streak,
        productivity_correlation: correlation,
        top_priority_project,
        overload,
        project_stats: stats,
        warnings,
        recommended_actions,
        health_score,
    }
}
