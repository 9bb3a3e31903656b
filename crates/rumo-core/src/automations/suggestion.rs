//! Check-in suggestion
//!
//! Pre-fills today's check-in from history: the weekday-specific pattern when
//! one exists, otherwise the overall most common answers.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Trend;
use crate::models::{CaixaStatus, Checkin, Energia, Pressao};

const WEEKDAY_PATTERN_CONFIDENCE: f64 = 0.75;
const MIN_WEEKDAY_SAMPLES: usize = 2;
const TREND_WINDOW: usize = 7;
const TREND_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionBasis {
    WeekdayPattern,
    OverallPattern,
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckinSuggestion {
    pub caixa_status: CaixaStatus,
    pub energia: Energia,
    pub pressao: Pressao,
    pub confidence: f64,
    pub basis: SuggestionBasis,
    pub trend: Trend,
    pub history_days: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Answers {
    caixa_status: CaixaStatus,
    energia: Energia,
    pressao: Pressao,
}

/// Most frequent value; ties go to the value seen first
fn mode<T: Copy + PartialEq>(values: impl IntoIterator<Item = T>) -> Option<T> {
    let mut counts: Vec<(T, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, n)) => *n += 1,
            None => counts.push((value, 1)),
        }
    }

    let mut best: Option<(T, usize)> = None;
    for (value, n) in counts {
        if best.map_or(true, |(_, b)| n > b) {
            best = Some((value, n));
        }
    }
    best.map(|(v, _)| v)
}

fn modal_answers(checkins: &[&Checkin]) -> Option<Answers> {
    Some(Answers {
        caixa_status: mode(checkins.iter().map(|c| c.caixa_status))?,
        energia: mode(checkins.iter().map(|c| c.energia))?,
        pressao: mode(checkins.iter().map(|c| c.pressao))?,
    })
}

/// Wellbeing in [0, 1]: only the best tier of each answer contributes
fn wellbeing(checkin: &Checkin) -> f64 {
    let mut score = 0.0;
    if checkin.caixa_status == CaixaStatus::Tranquilo {
        score += 0.40;
    }
    if checkin.energia == Energia::Alta {
        score += 0.35;
    }
    if checkin.pressao == Pressao::Leve {
        score += 0.25;
    }
    score
}

fn average_wellbeing(checkins: &[&Checkin]) -> Option<f64> {
    if checkins.is_empty() {
        return None;
    }
    Some(checkins.iter().map(|c| wellbeing(c)).sum::<f64>() / checkins.len() as f64)
}

/// Compare the latest seven check-ins against the seven before them.
/// `recent_first` must be sorted newest first.
fn wellbeing_trend(recent_first: &[&Checkin]) -> Trend {
    let latest = &recent_first[..recent_first.len().min(TREND_WINDOW)];
    let prior_end = recent_first.len().min(TREND_WINDOW * 2);
    let prior = &recent_first[latest.len()..prior_end];

    match (average_wellbeing(latest), average_wellbeing(prior)) {
        (Some(now), Some(before)) => Trend::from_difference(now - before, TREND_THRESHOLD),
        _ => Trend::Stable,
    }
}

/// Suggest today's check-in from the `lookback_days` of history ending on `today`
pub fn suggest_checkin(
    history: &[Checkin],
    today: NaiveDate,
    lookback_days: u32,
) -> CheckinSuggestion {
    let since = today - Duration::days(lookback_days as i64);
    let mut recent: Vec<&Checkin> = history
        .iter()
        .filter(|c| c.date > since && c.date <= today)
        .collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));

    let Some(overall) = modal_answers(&recent) else {
        debug!("No check-in history, suggesting neutral defaults");
        return CheckinSuggestion {
            caixa_status: CaixaStatus::Atencao,
            energia: Energia::Media,
            pressao: Pressao::Normal,
            confidence: 0.3,
            basis: SuggestionBasis::Default,
            trend: Trend::Stable,
            history_days: 0,
            reason: "No recent check-ins; starting from neutral answers".to_string(),
        };
    };

    let mut by_weekday: HashMap<Weekday, Vec<&Checkin>> = HashMap::new();
    for checkin in &recent {
        by_weekday.entry(checkin.date.weekday()).or_default().push(checkin);
    }
    let weekday_pattern = by_weekday
        .get(&today.weekday())
        .filter(|samples| samples.len() >= MIN_WEEKDAY_SAMPLES)
        .and_then(|samples| modal_answers(samples));

    let trend = wellbeing_trend(&recent);
    let history_days = recent.len();

    if let (Some(answers), true) = (weekday_pattern, history_days >= TREND_WINDOW) {
        return CheckinSuggestion {
            caixa_status: answers.caixa_status,
            energia: answers.energia,
            pressao: answers.pressao,
            confidence: WEEKDAY_PATTERN_CONFIDENCE,
            basis: SuggestionBasis::WeekdayPattern,
            trend,
            history_days,
            reason: format!("Based on your usual {:?} answers", today.weekday()),
        };
    }

    let confidence = if history_days < 7 {
        0.4
    } else if history_days >= 21 {
        0.7
    } else {
        0.6
    };

    // Improving steps energia one level toward baixa, declining one level toward alta
    let level = overall.energia.level() as i32;
    let energia = match trend {
        Trend::Improving => Energia::from_level(level - 1),
        Trend::Declining => Energia::from_level(level + 1),
        Trend::Stable => overall.energia,
    };

    CheckinSuggestion {
        caixa_status: overall.caixa_status,
        energia,
        pressao: overall.pressao,
        confidence,
        basis: SuggestionBasis::OverallPattern,
        trend,
        history_days,
        reason: format!(
            "Most common answers over your last {} check-ins ({} trend)",
            history_days,
            trend.as_str()
        ),
    }
}
