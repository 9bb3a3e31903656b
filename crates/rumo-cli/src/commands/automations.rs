//! Automation commands (suggest, overload, project, weekly)

use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate};

use rumo_core::analytics::ledger_balance;
use rumo_core::{
    assess_overload, generate_weekly_summary, project_finances, suggest_checkin, Repository,
};

use super::{money, print_json, Session};

pub fn cmd_suggest(session: &Session, as_json: bool) -> Result<()> {
    let lookback = session.config.suggestion_lookback_days;
    let history = session
        .store
        .checkins(session.user_id, session.since(lookback))?;
    let suggestion = suggest_checkin(&history, session.today, lookback);

    if as_json {
        return print_json(&suggestion);
    }

    println!();
    println!("📝 Suggested check-in for {}", session.today);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   caixa:    {}", suggestion.caixa_status);
    println!("   energia:  {}", suggestion.energia);
    println!("   pressão:  {}", suggestion.pressao);
    println!(
        "   Confidence {:.0}% · trend {}",
        suggestion.confidence * 100.0,
        suggestion.trend
    );
    println!("   {}", suggestion.reason);
    println!();
    Ok(())
}

pub fn cmd_overload(session: &Session, as_json: bool) -> Result<()> {
    let window = session.config.overload_window;
    let checkins: Vec<_> = session
        .store
        .checkins(session.user_id, session.since(window as u32 * 2))?
        .into_iter()
        .filter(|c| c.date <= session.today)
        .collect();
    let projects = session.store.projects(session.user_id)?;
    let assessment = assess_overload(&checkins, &projects, window);

    if as_json {
        return print_json(&assessment);
    }

    println!();
    println!(
        "🔥 Overload: {} (score {:.0}/100)",
        assessment.level, assessment.score
    );
    for factor in &assessment.factors {
        println!("   • {} (+{:.1})", factor.description, factor.contribution());
    }
    if !assessment.projects_to_pause.is_empty() {
        println!();
        println!("   Consider pausing:");
        for candidate in &assessment.projects_to_pause {
            let note = if candidate.has_next_action {
                ""
            } else {
                " (no next action)"
            };
            println!("      - {}{}", candidate.name, note);
        }
    }
    if !assessment.recommendations.is_empty() {
        println!();
        for recommendation in &assessment.recommendations {
            println!("   → {}", recommendation);
        }
    }
    println!();
    Ok(())
}

pub fn cmd_project(session: &Session, as_json: bool) -> Result<()> {
    let entries = session
        .store
        .financial_entries(session.user_id, NaiveDate::MIN)?;
    let balance = ledger_balance(&entries, session.today);
    let projection =
        project_finances(&entries, balance, session.today, &session.config.projection);

    if as_json {
        return print_json(&projection);
    }

    println!();
    println!("📈 Financial Projection (last {} days)", projection.lookback_days);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Current balance:  {}", money(projection.current_balance));
    println!(
        "   Monthly:          {} in / {} out",
        money(projection.monthly_income),
        money(projection.monthly_expenses)
    );
    println!(
        "   Growth:           income {:+.0}% / expenses {:+.0}%",
        projection.income_growth * 100.0,
        projection.expense_growth * 100.0
    );
    println!();
    println!(
        "   {:>6} │ {:>14} │ {:>14} │ {:>14}",
        "Days", "Optimistic", "Realistic", "Pessimistic"
    );
    println!("   ───────┼────────────────┼────────────────┼────────────────");
    for horizon in &projection.horizons {
        println!(
            "   {:>6} │ {:>14} │ {:>14} │ {:>14}",
            horizon.days,
            money(horizon.optimistic.estimated_balance),
            money(horizon.realistic.estimated_balance),
            money(horizon.pessimistic.estimated_balance)
        );
    }
    if let Some(horizon) = projection.horizons.first() {
        match horizon.realistic.runway_days {
            Some(days) => println!("\n   Runway: {} days at the realistic burn", days),
            None => println!("\n   Runway: not burning cash"),
        }
    }
    println!("   Confidence: {:.0}%", projection.confidence * 100.0);
    for warning in &projection.warnings {
        println!("   ⚠️  {}", warning);
    }
    println!();
    Ok(())
}

/// Monday of the week containing `day`
fn week_start_for(day: NaiveDate) -> NaiveDate {
    day - Duration::days(day.weekday().num_days_from_monday() as i64)
}

pub fn cmd_weekly(session: &Session, week_start: Option<NaiveDate>, as_json: bool) -> Result<()> {
    let start = week_start.unwrap_or_else(|| week_start_for(session.today));
    let end = start + Duration::days(6);
    // Include the previous week for the wellbeing trend
    let since = start - Duration::days(7);

    let user = session.user_id;
    let summary = generate_weekly_summary(
        &session.store.checkins(user, since)?,
        &session.store.financial_entries(user, since)?,
        &session.store.projects(user)?,
        &session.store.decisions(user, since)?,
        start,
        end,
    );

    if as_json {
        return print_json(&summary);
    }

    println!();
    println!("🗓️  Week {} to {}", summary.week_start, summary.week_end);
    println!("   ─────────────────────────────────────────────────────────────");
    let sections: [(&str, &[String]); 3] = [
        ("🏆 Victories", &summary.victories),
        ("🚧 Blockers", &summary.blockers),
        ("💡 Insights", &summary.insights),
    ];
    for (title, lines) in sections {
        if lines.is_empty() {
            continue;
        }
        println!("   {}", title);
        for line in lines {
            println!("      • {}", line);
        }
    }

    let financial = &summary.financial;
    println!(
        "   💰 {} in / {} out (net {})",
        money(financial.income),
        money(financial.expenses),
        money(financial.net)
    );
    for category in &financial.top_categories {
        println!("      {:<16} {}", category.category, money(category.total));
    }

    let wellbeing = &summary.wellbeing;
    println!(
        "   🔋 {} check-in(s), energy {:.0}%, cash {:.0}%, {}",
        wellbeing.checkin_count,
        wellbeing.avg_energy * 100.0,
        wellbeing.avg_caixa * 100.0,
        wellbeing.trend
    );

    println!(
        "   📁 {} active, {} completed this week",
        summary.projects.active_count, summary.projects.completed_this_week
    );
    for focus in &summary.projects.focus {
        println!("      {} → {}", focus.name, focus.next_action);
    }
    if !summary.decisions_made.is_empty() {
        println!("   ⚖️  Decisions");
        for decision in &summary.decisions_made {
            println!("      {}: {}", decision.context, decision.decision);
        }
    }
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_start_for() {
        // 2026-03-05 is a Thursday
        let thursday = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        assert_eq!(week_start_for(thursday), NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        let monday = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        assert_eq!(week_start_for(monday), monday);
    }
}
