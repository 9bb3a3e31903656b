//! Persistence boundary
//!
//! The analytics never query storage themselves. Callers fetch a user's data
//! through [`Repository`] first and hand plain slices to the core.
//!
//! [`MemoryStore`] is the in-memory adapter, backed by a JSON snapshot:
//!
//! ```json
//! {
//!   "checkins": [...],
//!   "financial_entries": [...],
//!   "projects": [...],
//!   "decisions": [...],
//!   "alerts": [...],
//!   "completed_tasks": [{"user_id": 1, "date": "2026-03-02", "count": 4}]
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Alert, AlertDraft, Checkin, Decision, FinancialEntry, Project};

/// Read access to one user's history.
///
/// Dated collections include entries on or after `since` and come back
/// newest first.
pub trait Repository {
    fn checkins(&self, user_id: i64, since: NaiveDate) -> Result<Vec<Checkin>>;

    fn financial_entries(&self, user_id: i64, since: NaiveDate) -> Result<Vec<FinancialEntry>>;

    fn projects(&self, user_id: i64) -> Result<Vec<Project>>;

    fn decisions(&self, user_id: i64, since: NaiveDate) -> Result<Vec<Decision>>;

    /// Completed tasks per day
    fn task_counts(&self, user_id: i64, since: NaiveDate) -> Result<HashMap<NaiveDate, u32>>;

    fn alerts(&self, user_id: i64) -> Result<Vec<Alert>>;
}

/// Completed task count for one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCount {
    pub user_id: i64,
    pub date: NaiveDate,
    pub count: u32,
}

/// Serialized form of a [`MemoryStore`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub checkins: Vec<Checkin>,
    #[serde(default)]
    pub financial_entries: Vec<FinancialEntry>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub decisions: Vec<Decision>,
    #[serde(default)]
    pub alerts: Vec<Alert>,
    #[serde(default)]
    pub completed_tasks: Vec<TaskCount>,
}

impl Snapshot {
    /// Reject data the analytics assume cannot exist
    fn validate(&self) -> Result<()> {
        if let Some(entry) = self.financial_entries.iter().find(|e| e.value <= 0) {
            return Err(Error::InvalidData(format!(
                "financial entry {} has non-positive value {}",
                entry.id, entry.value
            )));
        }

        let mut seen = HashSet::new();
        for checkin in &self.checkins {
            if !seen.insert((checkin.user_id, checkin.date)) {
                return Err(Error::InvalidData(format!(
                    "duplicate check-in for user {} on {}",
                    checkin.user_id, checkin.date
                )));
            }
        }

        Ok(())
    }
}

/// JSON snapshot adapter
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Snapshot,
}

impl MemoryStore {
    pub fn new(snapshot: Snapshot) -> Result<Self> {
        snapshot.validate()?;
        Ok(Self { snapshot })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::NotFound(format!("snapshot {}", path.display())));
        }
        let content = fs::read_to_string(path)?;
        let store = Self::from_json(&content)?;
        debug!(
            path = %path.display(),
            checkins = store.snapshot.checkins.len(),
            entries = store.snapshot.financial_entries.len(),
            projects = store.snapshot.projects.len(),
            "Snapshot loaded"
        );
        Ok(store)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Persist alert drafts, assigning ids after the highest existing one.
    ///
    /// A draft matching an unresolved alert (same user, type and message) is
    /// skipped, so re-running the rules does not stack duplicates.
    pub fn record_alerts(&mut self, drafts: Vec<AlertDraft>, date: NaiveDate) -> Vec<Alert> {
        let mut next_id = self.snapshot.alerts.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        let mut recorded = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let open = self.snapshot.alerts.iter().any(|a| {
                !a.resolved
                    && a.user_id == draft.user_id
                    && a.alert_type == draft.alert_type
                    && a.message == draft.message
            });
            if open {
                debug!(message = %draft.message, "Alert already open, skipping");
                continue;
            }
            let alert = draft.into_alert(next_id, date);
            next_id += 1;
            self.snapshot.alerts.push(alert.clone());
            recorded.push(alert);
        }
        recorded
    }

    /// Mark an alert resolved
    pub fn resolve_alert(&mut self, id: i64) -> Result<()> {
        let alert = self
            .snapshot
            .alerts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| Error::NotFound(format!("alert {}", id)))?;
        alert.resolved = true;
        Ok(())
    }
}

fn newest_first<T: Clone>(
    items: &[T],
    keep: impl Fn(&T) -> bool,
    date: impl Fn(&T) -> NaiveDate,
) -> Vec<T> {
    let mut selected: Vec<T> = items.iter().filter(|item| keep(item)).cloned().collect();
    selected.sort_by_key(|item| std::cmp::Reverse(date(item)));
    selected
}

impl Repository for MemoryStore {
    fn checkins(&self, user_id: i64, since: NaiveDate) -> Result<Vec<Checkin>> {
        Ok(newest_first(
            &self.snapshot.checkins,
            |c| c.user_id == user_id && c.date >= since,
            |c| c.date,
        ))
    }

    fn financial_entries(&self, user_id: i64, since: NaiveDate) -> Result<Vec<FinancialEntry>> {
        Ok(newest_first(
            &self.snapshot.financial_entries,
            |e| e.user_id == user_id && e.date >= since,
            |e| e.date,
        ))
    }

    fn projects(&self, user_id: i64) -> Result<Vec<Project>> {
        Ok(self
            .snapshot
            .projects
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    fn decisions(&self, user_id: i64, since: NaiveDate) -> Result<Vec<Decision>> {
        Ok(newest_first(
            &self.snapshot.decisions,
            |d| d.user_id == user_id && d.date >= since,
            |d| d.date,
        ))
    }

    fn task_counts(&self, user_id: i64, since: NaiveDate) -> Result<HashMap<NaiveDate, u32>> {
        let mut counts = HashMap::new();
        for task in &self.snapshot.completed_tasks {
            if task.user_id == user_id && task.date >= since {
                *counts.entry(task.date).or_insert(0) += task.count;
            }
        }
        Ok(counts)
    }

    fn alerts(&self, user_id: i64) -> Result<Vec<Alert>> {
        Ok(newest_first(
            &self.snapshot.alerts,
            |a| a.user_id == user_id,
            |a| a.date,
        ))
    }
}
