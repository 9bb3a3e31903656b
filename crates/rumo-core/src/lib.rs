//! Rumo Core Library
//!
//! Operational analytics for a solo operator's daily check-ins, ledger and
//! projects:
//! - Operational state classification from daily check-ins
//! - Finance analytics (EMA, anomalies, health score, spending forecast)
//! - Energy patterns and productivity correlation
//! - Project staleness, velocity and priority scoring
//! - Overload assessment, financial projection, check-in suggestion
//! - Weekly summaries
//! - Insight aggregation with alert, guidance and next-action rules
//!
//! Every analytics function is pure and synchronous. Data comes in through
//! the [`Repository`] boundary before the core is invoked.

pub mod analytics;
pub mod automations;
pub mod config;
pub mod error;
pub mod insights;
pub mod models;
pub mod rules;
pub mod store;

pub use analytics::{
    enhance_summary, health_score, project_stats, summarize_finances, EnhancedFinanceSummary,
    SpendingTrend,
};
pub use automations::{
    assess_overload, generate_weekly_summary, project_finances, suggest_checkin,
    CheckinSuggestion, FinancialProjection, OverloadAssessment, OverloadLevel, Trend,
    WeeklySummary,
};
pub use config::AnalyticsConfig;
pub use error::{Error, Result};
pub use insights::{compute_operational_insights, AnalysisContext, OperationalInsights};
pub use models::{
    Alert, AlertDraft, AlertType, CaixaStatus, Checkin, Decision, Energia, EntryType,
    FinanceSummary, FinancialEntry, OperationalState, Pressao, Project, ProjectStats,
    ProjectStatus,
};
pub use rules::{
    classify_state, generate_advanced_alerts, generate_alerts, guidance, recommend_action,
    Guidance, GuidanceMode,
};
pub use store::{MemoryStore, Repository, Snapshot};
