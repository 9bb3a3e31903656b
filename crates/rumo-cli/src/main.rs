//! Rumo CLI - Daily operational compass
//!
//! Usage:
//!   rumo insights                 Aggregated view of today
//!   rumo guidance                 DO / HOLD / CUT for today
//!   rumo alerts --advanced        Insight-based alerts
//!   rumo alerts --resolve ID      Mark a stored alert resolved
//!   rumo weekly --week-start DATE Weekly review

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let mut session =
        commands::open_session(&cli.data, cli.config.as_deref(), cli.user, cli.today)?;

    match cli.command {
        Commands::State => commands::cmd_state(&session, cli.json),
        Commands::Insights => commands::cmd_insights(&session, cli.json),
        Commands::Alerts {
            resolve: Some(id), ..
        } => commands::cmd_resolve_alert(&mut session, id, cli.json),
        Commands::Alerts { advanced, save, .. } => {
            commands::cmd_alerts(&mut session, advanced, save, cli.json)
        }
        Commands::Guidance => commands::cmd_guidance(&session, cli.json),
        Commands::Action => commands::cmd_action(&session, cli.json),
        Commands::Suggest => commands::cmd_suggest(&session, cli.json),
        Commands::Overload => commands::cmd_overload(&session, cli.json),
        Commands::Project => commands::cmd_project(&session, cli.json),
        Commands::Weekly { week_start } => commands::cmd_weekly(&session, week_start, cli.json),
    }
}
