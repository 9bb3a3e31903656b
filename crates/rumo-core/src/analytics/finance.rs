//! Finance analytics
//!
//! Smoothing, outlier detection and the 0–100 financial health score over the
//! ledger. Intermediate math is `f64`; every amount that leaves this module is
//! rounded back to integer minor units.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::FinanceConfig;
use crate::models::{FinanceSummary, FinancialEntry};

/// Exponential moving average with smoothing factor `2 / (period + 1)`.
///
/// Seeds with the first value; returns 0 for an empty series.
pub fn ema(values: &[f64], period: usize) -> f64 {
    let Some((&first, rest)) = values.split_first() else {
        return 0.0;
    };

    let k = 2.0 / (period as f64 + 1.0);
    rest.iter().fold(first, |acc, v| v * k + acc * (1.0 - k))
}

/// Arithmetic mean (0 for an empty series)
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (0 for an empty series)
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Flag values more than `threshold` standard deviations from the mean.
///
/// Mean and deviation are taken over the whole series; series shorter than
/// three values are never flagged.
pub fn detect_anomalies(values: &[f64], threshold: f64) -> Vec<bool> {
    if values.len() < 3 {
        return vec![false; values.len()];
    }

    let m = mean(values);
    let sd = std_dev(values);
    values
        .iter()
        .map(|v| (v - m).abs() > threshold * sd)
        .collect()
}

/// Financial health score in [0, 100].
///
/// Starts at 100 and subtracts one penalty tier each for balance, spending
/// ratio and forecast days.
pub fn health_score(summary: &FinanceSummary) -> u8 {
    let mut score: i32 = 100;

    score -= match summary.balance {
        b if b < 0 => 40,
        b if b < 10_000 => 20,
        b if b < 50_000 => 10,
        _ => 0,
    };

    let ratio = match summary.spending_ratio() {
        Some(r) => r,
        None if summary.total_saidas > 0 => f64::INFINITY,
        None => 0.0,
    };
    score -= if ratio > 1.5 {
        30
    } else if ratio > 1.0 {
        20
    } else if ratio > 0.8 {
        10
    } else {
        0
    };

    if let Some(days) = summary.forecast_days {
        score -= match days {
            d if d < 7 => 30,
            d if d < 15 => 20,
            d if d < 30 => 10,
            _ => 0,
        };
    }

    score.clamp(0, 100) as u8
}

/// One day of forecast spending, in minor units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendingForecast {
    pub min: i64,
    pub avg: i64,
    pub max: i64,
}

/// Flat forecast band: EMA ± 1.5σ, repeated for each day ahead
pub fn forecast_spending(
    daily_spending: &[f64],
    days_ahead: usize,
    period: usize,
) -> Vec<SpendingForecast> {
    let avg = ema(daily_spending, period);
    let sd = std_dev(daily_spending);

    let point = SpendingForecast {
        min: (avg - 1.5 * sd).max(0.0).round() as i64,
        avg: avg.round() as i64,
        max: (avg + 1.5 * sd).round() as i64,
    };
    vec![point; days_ahead]
}

/// Whether `date` falls in the `window_days` ending on `today` (inclusive)
fn in_window(date: NaiveDate, today: NaiveDate, window_days: u32) -> bool {
    date <= today && date > today - Duration::days(window_days as i64)
}

/// Ledger totals for the `window_days` ending on `today`
pub fn summarize_finances(
    entries: &[FinancialEntry],
    today: NaiveDate,
    window_days: u32,
) -> FinanceSummary {
    let window_days = window_days.max(1);
    let (mut entradas, mut saidas) = (0i64, 0i64);

    for entry in entries.iter().filter(|e| in_window(e.date, today, window_days)) {
        if entry.is_income() {
            entradas += entry.value;
        } else {
            saidas += entry.value;
        }
    }

    let balance = entradas - saidas;
    let avg_daily_spending = (saidas as f64 / window_days as f64).round() as i64;
    let forecast_days = if avg_daily_spending > 0 {
        Some(balance.max(0) / avg_daily_spending)
    } else {
        None
    };

    FinanceSummary {
        total_entradas: entradas,
        total_saidas: saidas,
        balance,
        avg_daily_spending,
        forecast_days,
    }
}

/// Running balance of every entry dated on or before `today`
pub fn ledger_balance(entries: &[FinancialEntry], today: NaiveDate) -> i64 {
    entries
        .iter()
        .filter(|e| e.date <= today)
        .map(|e| if e.is_income() { e.value } else { -e.value })
        .sum()
}

/// Daily expense totals for the `days` ending on `today`, oldest first
pub fn daily_spending_series(entries: &[FinancialEntry], today: NaiveDate, days: u32) -> Vec<i64> {
    let days = days as usize;
    let mut series = vec![0i64; days];
    let start = today - Duration::days(days as i64 - 1);

    for entry in entries.iter().filter(|e| e.is_expense()) {
        if entry.date < start || entry.date > today {
            continue;
        }
        let idx = (entry.date - start).num_days() as usize;
        series[idx] += entry.value;
    }

    series
}

/// Direction of recent spending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpendingTrend {
    Increasing,
    Decreasing,
    Stable,
}

impl SpendingTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
        }
    }
}

impl std::fmt::Display for SpendingTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compare the EMA of the series to its simple mean (±10% band)
pub fn spending_trend(series: &[f64], period: usize) -> SpendingTrend {
    let m = mean(series);
    if m <= 0.0 {
        return SpendingTrend::Stable;
    }

    let smoothed = ema(series, period);
    if smoothed > m * 1.1 {
        SpendingTrend::Increasing
    } else if smoothed < m * 0.9 {
        SpendingTrend::Decreasing
    } else {
        SpendingTrend::Stable
    }
}

/// Finance summary enriched with trend, anomaly and forecast signals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedFinanceSummary {
    #[serde(flatten)]
    pub summary: FinanceSummary,
    pub spending_trend: SpendingTrend,
    pub anomaly_detected: bool,
    /// Recent days whose spending was flagged as an outlier
    pub anomaly_dates: Vec<NaiveDate>,
    pub ema_daily_spending: i64,
    pub spending_forecast: Vec<SpendingForecast>,
    pub health_score: u8,
}

/// Build the enhanced summary from the raw ledger
pub fn enhance_summary(
    entries: &[FinancialEntry],
    today: NaiveDate,
    config: &FinanceConfig,
) -> EnhancedFinanceSummary {
    let summary = summarize_finances(entries, today, config.summary_window_days);
    let window = config.summary_window_days.max(1);
    let series: Vec<f64> = daily_spending_series(entries, today, window)
        .into_iter()
        .map(|v| v as f64)
        .collect();

    let flags = detect_anomalies(&series, config.anomaly_threshold);
    let recent_start = series.len().saturating_sub(config.anomaly_recent_days);
    let anomaly_dates: Vec<NaiveDate> = flags
        .iter()
        .enumerate()
        .skip(recent_start)
        .filter(|(_, &flagged)| flagged)
        .map(|(i, _)| today - Duration::days((series.len() - 1 - i) as i64))
        .collect();

    let trend = spending_trend(&series, config.ema_period);
    let score = health_score(&summary);

    debug!(
        balance = summary.balance,
        health_score = score,
        trend = trend.as_str(),
        anomalies = anomaly_dates.len(),
        "Finance summary computed"
    );

    EnhancedFinanceSummary {
        summary,
        spending_trend: trend,
        anomaly_detected: !anomaly_dates.is_empty(),
        anomaly_dates,
        ema_daily_spending: ema(&series, config.ema_period).round() as i64,
        spending_forecast: forecast_spending(
            &series,
            config.forecast_horizon_days,
            config.ema_period,
        ),
        health_score: score,
    }
}
