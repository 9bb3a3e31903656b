//! CLI command tests
//!
//! Commands run against a snapshot written to a temp directory.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rumo_core::{MemoryStore, Repository};
use tempfile::TempDir;

use crate::commands::{self, Session};

const SNAPSHOT: &str = r#"{
    "checkins": [
        {"id": 1, "user_id": 1, "date": "2026-03-09", "caixa_status": "tranquilo",
         "energia": "alta", "pressao": "leve"},
        {"id": 2, "user_id": 1, "date": "2026-03-10", "caixa_status": "atencao",
         "energia": "baixa", "pressao": "alta"},
        {"id": 3, "user_id": 1, "date": "2026-03-11", "caixa_status": "critico",
         "energia": "baixa", "pressao": "alta"}
    ],
    "financial_entries": [
        {"id": 1, "user_id": 1, "type": "entrada", "value": 30000,
         "category": "freela", "date": "2026-03-01"},
        {"id": 2, "user_id": 1, "type": "saida", "value": 45000,
         "category": "aluguel", "date": "2026-03-05"},
        {"id": 3, "user_id": 1, "type": "saida", "value": 3000,
         "category": "mercado", "date": "2026-03-10"}
    ],
    "projects": [
        {"id": 1, "user_id": 1, "name": "Site", "status": "active", "objective": "Launch",
         "next_action": "Write copy", "created_at": "2026-01-01T00:00:00Z",
         "updated_at": "2026-03-10T09:00:00Z"},
        {"id": 2, "user_id": 1, "name": "Course", "status": "active", "objective": "Sell",
         "next_action": null, "created_at": "2026-01-01T00:00:00Z",
         "updated_at": "2026-02-01T09:00:00Z"}
    ],
    "decisions": [
        {"id": 1, "user_id": 1, "context": "Pricing", "decision": "Raise rates",
         "date": "2026-03-10"}
    ]
}"#;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 11).unwrap()
}

fn write_snapshot(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("rumo.json");
    std::fs::write(&path, SNAPSHOT).unwrap();
    path
}

fn setup_session(dir: &TempDir) -> Session {
    let path = write_snapshot(dir);
    let config = write_config(dir.path());
    commands::open_session(&path, Some(&config), 1, Some(today())).unwrap()
}

/// Pin the config so a user-level override cannot leak into tests
fn write_config(dir: &Path) -> PathBuf {
    let path = dir.join("analytics.toml");
    std::fs::write(&path, "[finance]\nema_period = 7\n").unwrap();
    path
}

// ========== Session Tests ==========

#[test]
fn test_open_session_missing_snapshot() {
    let dir = TempDir::new().unwrap();
    let result = commands::open_session(&dir.path().join("nope.json"), None, 1, Some(today()));
    assert!(result.is_err());
}

#[test]
fn test_open_session_invalid_config() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(&dir);
    let config = dir.path().join("bad.toml");
    std::fs::write(&config, "[finance\nema_period = ").unwrap();
    let result = commands::open_session(&path, Some(&config), 1, Some(today()));
    assert!(result.is_err());
}

#[test]
fn test_session_context_loads_user_history() {
    let dir = TempDir::new().unwrap();
    let session = setup_session(&dir);
    let ctx = session.context().unwrap();
    assert_eq!(ctx.checkins.len(), 3);
    assert_eq!(ctx.projects.len(), 2);
    assert_eq!(ctx.todays_checkin().map(|c| c.id), Some(3));
}

// ========== Command Tests ==========

#[test]
fn test_cmd_state() {
    let dir = TempDir::new().unwrap();
    let session = setup_session(&dir);
    assert!(commands::cmd_state(&session, false).is_ok());
    assert!(commands::cmd_state(&session, true).is_ok());
}

#[test]
fn test_cmd_insights() {
    let dir = TempDir::new().unwrap();
    let session = setup_session(&dir);
    assert!(commands::cmd_insights(&session, false).is_ok());
    assert!(commands::cmd_insights(&session, true).is_ok());
}

#[test]
fn test_cmd_alerts_without_save_leaves_snapshot() {
    let dir = TempDir::new().unwrap();
    let mut session = setup_session(&dir);
    assert!(commands::cmd_alerts(&mut session, false, false, false).is_ok());
    assert!(commands::cmd_alerts(&mut session, true, false, true).is_ok());

    let reloaded = MemoryStore::from_path(&session.data_path).unwrap();
    assert!(reloaded.alerts(1).unwrap().is_empty());
}

#[test]
fn test_cmd_alerts_save_persists() {
    let dir = TempDir::new().unwrap();
    let mut session = setup_session(&dir);
    commands::cmd_alerts(&mut session, false, true, false).unwrap();

    let reloaded = MemoryStore::from_path(&session.data_path).unwrap();
    let alerts = reloaded.alerts(1).unwrap();
    // Negative balance, short forecast, overspending, one stalled project
    assert!(alerts.len() >= 3);
    assert!(alerts.iter().all(|a| a.date == today() && !a.resolved));
}

#[test]
fn test_cmd_alerts_save_twice_keeps_one_copy() {
    let dir = TempDir::new().unwrap();
    let mut session = setup_session(&dir);
    commands::cmd_alerts(&mut session, false, true, true).unwrap();
    let first = MemoryStore::from_path(&session.data_path).unwrap().alerts(1).unwrap();

    commands::cmd_alerts(&mut session, false, true, true).unwrap();
    let second = MemoryStore::from_path(&session.data_path).unwrap().alerts(1).unwrap();
    assert_eq!(first.len(), second.len());
}

#[test]
fn test_cmd_resolve_alert() {
    let dir = TempDir::new().unwrap();
    let mut session = setup_session(&dir);
    commands::cmd_alerts(&mut session, false, true, false).unwrap();
    let alerts = session.store.alerts(1).unwrap();
    let id = alerts[0].id;

    commands::cmd_resolve_alert(&mut session, id, false).unwrap();
    let reloaded = MemoryStore::from_path(&session.data_path).unwrap();
    let resolved = reloaded.alerts(1).unwrap();
    assert!(resolved.iter().any(|a| a.id == id && a.resolved));
    assert_eq!(resolved.iter().filter(|a| a.resolved).count(), 1);

    // Saving again re-raises only the resolved condition
    commands::cmd_alerts(&mut session, false, true, false).unwrap();
    assert_eq!(session.store.alerts(1).unwrap().len(), alerts.len() + 1);

    assert!(commands::cmd_resolve_alert(&mut session, 999, false).is_err());
}

#[test]
fn test_cmd_guidance_action() {
    let dir = TempDir::new().unwrap();
    let session = setup_session(&dir);
    assert!(commands::cmd_guidance(&session, false).is_ok());
    assert!(commands::cmd_guidance(&session, true).is_ok());
    assert!(commands::cmd_action(&session, false).is_ok());
    assert!(commands::cmd_action(&session, true).is_ok());
}

#[test]
fn test_cmd_automations() {
    let dir = TempDir::new().unwrap();
    let session = setup_session(&dir);
    assert!(commands::cmd_suggest(&session, false).is_ok());
    assert!(commands::cmd_overload(&session, false).is_ok());
    assert!(commands::cmd_project(&session, false).is_ok());
    assert!(commands::cmd_project(&session, true).is_ok());
    assert!(commands::cmd_weekly(&session, None, false).is_ok());

    let week_start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    assert!(commands::cmd_weekly(&session, Some(week_start), true).is_ok());
}

#[test]
fn test_money_formatting() {
    assert_eq!(commands::money(-18_000), "$-180.00");
    assert_eq!(commands::money(5), "$0.05");
}
