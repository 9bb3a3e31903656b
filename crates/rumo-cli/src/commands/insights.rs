//! Insight and decision commands (state, insights, alerts, guidance, action)

use anyhow::{Context, Result};
use serde_json::json;

use rumo_core::analytics::{project_stats, summarize_finances};
use rumo_core::{
    compute_operational_insights, generate_advanced_alerts, generate_alerts, guidance,
    recommend_action, Repository,
};

use super::{money, print_json, Session};

pub fn cmd_state(session: &Session, as_json: bool) -> Result<()> {
    let ctx = session.context()?;
    let checkin = ctx.todays_checkin();
    let state = checkin.map(|c| c.computed_state());

    if as_json {
        return print_json(&json!({ "date": session.today, "state": state }));
    }

    println!();
    match (checkin, state) {
        (Some(c), Some(state)) => {
            println!("🧭 {}: {}", session.today, state);
            println!(
                "   caixa: {}   energia: {}   pressão: {}",
                c.caixa_status, c.energia, c.pressao
            );
        }
        _ => {
            println!("🧭 {}: no check-in yet", session.today);
            println!("   Run `rumo suggest` for pre-filled answers.");
        }
    }
    println!();
    Ok(())
}

pub fn cmd_insights(session: &Session, as_json: bool) -> Result<()> {
    let ctx = session.context()?;
    let insights = compute_operational_insights(&ctx);

    if as_json {
        return print_json(&insights);
    }

    let finance = &insights.finance;
    println!();
    println!("📊 Operational Insights ({})", session.today);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Health score:    {}/100", insights.health_score);
    match insights.current_state {
        Some(state) => println!("   State:           {}", state),
        None => println!("   State:           (no check-in today)"),
    }
    println!(
        "   Balance:         {} (health {}/100, trend {})",
        money(finance.summary.balance),
        finance.health_score,
        finance.spending_trend
    );
    println!("   Daily spending:  {}", money(finance.summary.avg_daily_spending));
    if let Some(days) = finance.summary.forecast_days {
        println!("   Cash lasts:      {} days", days);
    }
    println!("   Energy streak:   {} day(s)", insights.energy_streak);
    if let Some(best) = insights.energy_pattern.best_day {
        println!("   Best day:        {:?}", best);
    }
    println!(
        "   Overload:        {} ({:.0})",
        insights.overload.level, insights.overload.score
    );
    println!(
        "   Projects:        {} active, {} stalled",
        insights.project_stats.active, insights.project_stats.stalled
    );
    if let Some(project) = &insights.top_priority_project {
        println!("   Top project:     {} (score {})", project.name, project.score);
    }

    if !insights.warnings.is_empty() {
        println!();
        println!("   ⚠️  Warnings");
        for warning in &insights.warnings {
            println!("      • {}", warning);
        }
    }
    if !insights.recommended_actions.is_empty() {
        println!();
        println!("   ✅ Recommended");
        for action in &insights.recommended_actions {
            println!("      • {}", action);
        }
    }
    println!();
    Ok(())
}

pub fn cmd_alerts(
    session: &mut Session,
    advanced: bool,
    save: bool,
    as_json: bool,
) -> Result<()> {
    let drafts = {
        let ctx = session.context()?;
        if advanced {
            generate_advanced_alerts(session.user_id, &compute_operational_insights(&ctx))
        } else {
            let config = ctx.config;
            let summary =
                summarize_finances(&ctx.entries, ctx.today, config.finance.summary_window_days);
            let stats = project_stats(&ctx.projects, ctx.now, config.stalled_threshold_days);
            generate_alerts(session.user_id, &summary, &stats)
        }
    };

    if save {
        let recorded = session.store.record_alerts(drafts.clone(), session.today);
        session
            .store
            .save(&session.data_path)
            .with_context(|| format!("Failed to save {}", session.data_path.display()))?;
        tracing::info!(count = recorded.len(), "Alerts stored");
    }

    if as_json {
        return print_json(&drafts);
    }

    println!();
    if drafts.is_empty() {
        println!("✨ No alerts.");
    } else {
        println!("🔔 Alerts ({})", drafts.len());
        for draft in &drafts {
            println!("   [{}] {}", draft.alert_type.label(), draft.message);
        }
    }
    println!();
    Ok(())
}

pub fn cmd_resolve_alert(session: &mut Session, id: i64, as_json: bool) -> Result<()> {
    let owned = session
        .store
        .alerts(session.user_id)?
        .iter()
        .any(|a| a.id == id);
    if !owned {
        anyhow::bail!("Alert {} not found for user {}", id, session.user_id);
    }

    session.store.resolve_alert(id)?;
    session
        .store
        .save(&session.data_path)
        .with_context(|| format!("Failed to save {}", session.data_path.display()))?;
    tracing::info!(id, "Alert resolved");

    if as_json {
        return print_json(&json!({ "resolved": id }));
    }

    println!();
    println!("✅ Alert {} resolved", id);
    println!();
    Ok(())
}

pub fn cmd_guidance(session: &Session, as_json: bool) -> Result<()> {
    let ctx = session.context()?;
    let insights = compute_operational_insights(&ctx);
    let alerts = session.store.alerts(session.user_id)?;
    let result = guidance(&insights, &alerts);

    if as_json {
        return print_json(&result);
    }

    let icon = match result.mode {
        rumo_core::GuidanceMode::Do => "🟢",
        rumo_core::GuidanceMode::Hold => "🟡",
        rumo_core::GuidanceMode::Cut => "🔴",
    };
    println!();
    println!("{} {}", icon, result.mode);
    println!("   {}", result.text);
    println!();
    Ok(())
}

pub fn cmd_action(session: &Session, as_json: bool) -> Result<()> {
    let ctx = session.context()?;
    let action = recommend_action(&compute_operational_insights(&ctx));

    if as_json {
        return print_json(&json!({ "action": action }));
    }

    println!();
    println!("👉 {}", action);
    println!();
    Ok(())
}
