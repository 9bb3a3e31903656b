//! Alert rules
//!
//! Two independent rule sets produce [`AlertDraft`]s: the basic set reads raw
//! summaries, the advanced set reads [`OperationalInsights`]. Callers pick
//! either (or both); ids and dates are assigned when the drafts are stored.

use tracing::debug;

use crate::analytics::SpendingTrend;
use crate::insights::OperationalInsights;
use crate::models::{format_amount, AlertDraft, AlertType, FinanceSummary, ProjectStats};

const LOW_FORECAST_DAYS: i64 = 15;
const CRITICAL_FORECAST_DAYS: i64 = 7;
const SPIKE_FACTOR: f64 = 1.5;
const MAX_ACTIVE_PROJECTS: usize = 5;
const CRITICAL_HEALTH: u8 = 30;
const LOW_HEALTH: u8 = 60;

/// Basic rules over the ledger summary and project counts
pub fn generate_alerts(
    user_id: i64,
    summary: &FinanceSummary,
    stats: &ProjectStats,
) -> Vec<AlertDraft> {
    let mut alerts = Vec::new();

    if summary.balance < 0 {
        alerts.push(AlertDraft::new(
            user_id,
            AlertType::Finance,
            format!("Balance is negative ({})", format_amount(summary.balance)),
        ));
    }

    if let Some(days) = summary.forecast_days {
        if days < LOW_FORECAST_DAYS {
            alerts.push(AlertDraft::new(
                user_id,
                AlertType::Finance,
                format!("Cash lasts about {} more days at the current pace", days),
            ));
        }
    }

    if summary.spending_ratio().is_some_and(|r| r > 1.0) {
        alerts.push(AlertDraft::new(
            user_id,
            AlertType::Finance,
            "Spending exceeds income this period",
        ));
    }

    // The baseline is the same average, so this comparison never holds
    let current = summary.avg_daily_spending as f64;
    let baseline = summary.avg_daily_spending as f64;
    if current > 0.0 && current > baseline * SPIKE_FACTOR {
        alerts.push(AlertDraft::new(
            user_id,
            AlertType::Finance,
            format!(
                "Daily spending spiked to {}",
                format_amount(summary.avg_daily_spending)
            ),
        ));
    }

    if stats.stalled > 0 {
        alerts.push(AlertDraft::new(
            user_id,
            AlertType::Project,
            format!("{} project(s) stalled", stats.stalled),
        ));
    }

    if stats.active > MAX_ACTIVE_PROJECTS {
        alerts.push(AlertDraft::new(
            user_id,
            AlertType::Overload,
            format!("{} active projects; focus is spread thin", stats.active),
        ));
    }

    debug!(user_id, count = alerts.len(), "Basic alerts generated");
    alerts
}

/// Advanced rules over the aggregated insights
pub fn generate_advanced_alerts(user_id: i64, insights: &OperationalInsights) -> Vec<AlertDraft> {
    let mut alerts = Vec::new();
    let finance = &insights.finance;

    if insights.health_score < CRITICAL_HEALTH {
        alerts.push(AlertDraft::new(
            user_id,
            AlertType::System,
            format!("Health score is critical ({}/100)", insights.health_score),
        ));
    } else if insights.health_score < LOW_HEALTH {
        alerts.push(AlertDraft::new(
            user_id,
            AlertType::System,
            format!("Health score needs attention ({}/100)", insights.health_score),
        ));
    }

    if finance.anomaly_detected {
        alerts.push(AlertDraft::new(
            user_id,
            AlertType::Finance,
            "Unusual spending detected in the last few days",
        ));
    }

    if finance.spending_trend == SpendingTrend::Increasing {
        alerts.push(AlertDraft::new(user_id, AlertType::Finance, "Spending is trending up"));
    }

    if let Some(days) = finance.summary.forecast_days {
        if days < CRITICAL_FORECAST_DAYS {
            alerts.push(AlertDraft::new(
                user_id,
                AlertType::Finance,
                format!("Cash runs out in {} days", days),
            ));
        }
    }

    if insights.energy_streak == 0 {
        alerts.push(AlertDraft::new(
            user_id,
            AlertType::Overload,
            "No good-energy streak going; plan some recovery",
        ));
    }

    for warning in &insights.warnings {
        alerts.push(AlertDraft::new(user_id, warning.source, warning.message.clone()));
    }

    debug!(user_id, count = alerts.len(), "Advanced alerts generated");
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyticsConfig;
    use crate::insights::{compute_operational_insights, AnalysisContext, Warning};
    use chrono::NaiveDate;

    fn count(alerts: &[AlertDraft], alert_type: AlertType) -> usize {
        alerts.iter().filter(|a| a.alert_type == alert_type).count()
    }

    #[test]
    fn test_healthy_summary_has_no_alerts() {
        let summary = FinanceSummary {
            total_entradas: 100_000,
            total_saidas: 30_000,
            balance: 70_000,
            avg_daily_spending: 1_000,
            forecast_days: Some(70),
        };
        assert!(generate_alerts(1, &summary, &ProjectStats::default()).is_empty());
    }

    #[test]
    fn test_negative_balance_and_overspending() {
        let summary = FinanceSummary {
            total_entradas: 10_000,
            total_saidas: 25_000,
            balance: -15_000,
            avg_daily_spending: 833,
            forecast_days: Some(0),
        };
        let alerts = generate_alerts(7, &summary, &ProjectStats::default());
        assert_eq!(count(&alerts, AlertType::Finance), 3);
        assert!(alerts[0].message.contains("-150.00"));
        assert!(alerts.iter().all(|a| a.user_id == 7));
    }

    #[test]
    fn test_spending_spike_rule_never_fires() {
        let summary = FinanceSummary {
            total_entradas: 1_000_000,
            total_saidas: 900_000,
            balance: 100_000,
            avg_daily_spending: 30_000,
            forecast_days: Some(30),
        };
        let alerts = generate_alerts(1, &summary, &ProjectStats::default());
        assert!(!alerts.iter().any(|a| a.message.contains("spiked")));
    }

    #[test]
    fn test_project_rules() {
        let stats = ProjectStats {
            total: 8,
            active: 6,
            paused: 1,
            done: 1,
            stalled: 2,
        };
        let alerts = generate_alerts(1, &FinanceSummary::default(), &stats);
        assert_eq!(count(&alerts, AlertType::Project), 1);
        assert_eq!(count(&alerts, AlertType::Overload), 1);
    }

    #[test]
    fn test_advanced_alerts_for_empty_history() {
        let config = AnalyticsConfig::default();
        let today = NaiveDate::from_ymd_opt(2026, 4, 15).unwrap();
        let ctx = AnalysisContext::new(1, today, &config);
        let mut insights = compute_operational_insights(&ctx);

        // Health 70, no spending, no check-ins: only the empty streak fires
        let alerts = generate_advanced_alerts(1, &insights);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::Overload);

        insights.health_score = 25;
        insights
            .warnings
            .push(Warning::new(AlertType::Project, "Something to look at"));
        let alerts = generate_advanced_alerts(1, &insights);
        assert!(alerts[0].message.contains("critical"));
        let last = alerts.last().unwrap();
        assert_eq!(last.message, "Something to look at");
        assert_eq!(last.alert_type, AlertType::Project);
    }

    #[test]
    fn test_advanced_forecast_and_trend() {
        let config = AnalyticsConfig::default();
        let today = NaiveDate::from_ymd_opt(2026, 4, 15).unwrap();
        let ctx = AnalysisContext::new(1, today, &config);
        let mut insights = compute_operational_insights(&ctx);
        insights.finance.summary.forecast_days = Some(3);
        insights.finance.spending_trend = SpendingTrend::Increasing;
        insights.energy_streak = 2;

        let alerts = generate_advanced_alerts(1, &insights);
        assert_eq!(count(&alerts, AlertType::Finance), 2);
        assert!(alerts.iter().any(|a| a.message == "Cash runs out in 3 days"));
    }
}
