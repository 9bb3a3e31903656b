//! Shared command plumbing: loading the snapshot and config for a run

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use serde::Serialize;

use rumo_core::{AnalysisContext, AnalyticsConfig, MemoryStore};

/// Everything a command needs: the loaded data plus who and when to analyze
pub struct Session {
    pub store: MemoryStore,
    pub config: AnalyticsConfig,
    pub user_id: i64,
    pub today: NaiveDate,
    pub data_path: PathBuf,
}

impl Session {
    /// Aggregator context for the session's user and day
    pub fn context(&self) -> Result<AnalysisContext<'_>> {
        AnalysisContext::load(&self.store, self.user_id, self.today, &self.config)
            .context("Failed to load user history")
    }

    /// First day of a lookback window ending today
    pub fn since(&self, days: u32) -> NaiveDate {
        self.today - Duration::days(days as i64)
    }
}

pub fn open_session(
    data: &Path,
    config: Option<&Path>,
    user_id: i64,
    today: Option<NaiveDate>,
) -> Result<Session> {
    let store = MemoryStore::from_path(data)
        .with_context(|| format!("Failed to load snapshot {}", data.display()))?;

    let config = match config {
        Some(path) => AnalyticsConfig::load_from(path),
        None => AnalyticsConfig::load(),
    }
    .context("Failed to load analytics config")?;

    let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
    tracing::debug!(user_id, %today, "Session opened");

    Ok(Session {
        store,
        config,
        user_id,
        today,
        data_path: data.to_path_buf(),
    })
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// Format minor units for display
pub fn money(minor: i64) -> String {
    format!("${}", rumo_core::models::format_amount(minor))
}
