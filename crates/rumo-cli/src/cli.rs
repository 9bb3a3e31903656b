//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Rumo - Daily operational compass for solo operators
#[derive(Parser)]
#[command(name = "rumo")]
#[command(about = "Check-in, cash and project analytics with daily guidance", long_about = None)]
#[command(version)]
pub struct Cli {
    /// JSON snapshot with check-ins, ledger entries, projects, decisions and alerts
    #[arg(long, default_value = "rumo.json", global = true)]
    pub data: PathBuf,

    /// User to analyze
    #[arg(long, default_value = "1", global = true)]
    pub user: i64,

    /// Reference day (YYYY-MM-DD, defaults to the local date)
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    /// Analytics config override (defaults to the data-dir file, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show today's operational state
    State,

    /// Show the aggregated operational insights
    Insights,

    /// Generate alerts from the current data
    Alerts {
        /// Use the insight-based rule set instead of the basic one
        #[arg(long)]
        advanced: bool,

        /// Store the generated alerts back into the snapshot
        #[arg(long)]
        save: bool,

        /// Mark a stored alert resolved instead of generating alerts
        #[arg(long, value_name = "ID", conflicts_with_all = ["advanced", "save"])]
        resolve: Option<i64>,
    },

    /// Show today's guidance (DO / HOLD / CUT)
    Guidance,

    /// Show the single recommended next action
    Action,

    /// Suggest answers for today's check-in
    Suggest,

    /// Assess overload risk over the recent check-ins
    Overload,

    /// Project the balance over the configured horizons
    Project,

    /// Summarize a week
    Weekly {
        /// First day of the week (defaults to this week's Monday)
        #[arg(long)]
        week_start: Option<NaiveDate>,
    },
}
