//! Analytics over check-ins, the ledger and projects
//!
//! - **finance** - EMA smoothing, z-score anomalies, health score, spending forecast
//! - **patterns** - Weekday energy patterns, energy streaks, mood/productivity correlation
//! - **projects** - Stalled detection, velocity, completion estimates, priority scoring

pub mod finance;
pub mod patterns;
pub mod projects;

pub use finance::{
    daily_spending_series, detect_anomalies, ema, enhance_summary, forecast_spending,
    health_score, ledger_balance, spending_trend, summarize_finances, EnhancedFinanceSummary,
    SpendingForecast, SpendingTrend,
};
pub use patterns::{
    analyze_weekly_patterns, correlate_mood_and_productivity, energy_streak, pearson_correlation,
    WeekdayEnergy, WeeklyEnergyPattern,
};
pub use projects::{
    estimate_completion, find_stalled_projects, priority_score, project_stats, velocity,
    CompletionEstimate, Confidence, PriorityFactors,
};
