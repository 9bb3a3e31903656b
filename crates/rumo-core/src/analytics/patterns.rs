//! Pattern detection over check-in history
//!
//! Weekday energy patterns, energy streaks and the correlation between energy
//! and completed tasks.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::{Checkin, Energia};

/// Average energy for one weekday (alta = 3, media = 2, baixa = 1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayEnergy {
    pub weekday: Weekday,
    pub average: f64,
    pub samples: usize,
}

/// Energy averages per weekday plus the best and worst day
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeeklyEnergyPattern {
    /// In order of first appearance in the history
    pub averages: Vec<WeekdayEnergy>,
    pub best_day: Option<Weekday>,
    pub worst_day: Option<Weekday>,
}

impl WeeklyEnergyPattern {
    pub fn average_for(&self, weekday: Weekday) -> Option<f64> {
        self.averages
            .iter()
            .find(|w| w.weekday == weekday)
            .map(|w| w.average)
    }
}

/// Bucket check-ins by weekday and average the energy scale per bucket.
///
/// Buckets keep first-appearance order. Best and worst come from a stable
/// descending sort, so on ties the earlier bucket is best and the later one
/// is worst.
pub fn analyze_weekly_patterns(checkins: &[Checkin]) -> WeeklyEnergyPattern {
    let mut buckets: Vec<(Weekday, u32, usize)> = Vec::new();

    for checkin in checkins {
        let weekday = checkin.date.weekday();
        let level = checkin.energia.level() as u32;
        match buckets.iter_mut().find(|(w, _, _)| *w == weekday) {
            Some((_, sum, count)) => {
                *sum += level;
                *count += 1;
            }
            None => buckets.push((weekday, level, 1)),
        }
    }

    let averages: Vec<WeekdayEnergy> = buckets
        .into_iter()
        .map(|(weekday, sum, count)| WeekdayEnergy {
            weekday,
            average: sum as f64 / count as f64,
            samples: count,
        })
        .collect();

    let mut ranked: Vec<&WeekdayEnergy> = averages.iter().collect();
    ranked.sort_by(|a, b| {
        b.average
            .partial_cmp(&a.average)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let best_day = ranked.first().map(|w| w.weekday);
    let worst_day = ranked.last().map(|w| w.weekday);

    WeeklyEnergyPattern {
        averages,
        best_day,
        worst_day,
    }
}

/// Pearson correlation coefficient of two equally long series.
///
/// Returns 0 for fewer than two points or when either series has no variance.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return 0.0;
    }

    let n = x.len() as f64;

    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y.iter()).map(|(a, b)| a * b).sum();
    let sum_x2: f64 = x.iter().map(|a| a * a).sum();
    let sum_y2: f64 = y.iter().map(|b| b * b).sum();

    let var_x = n * sum_x2 - sum_x.powi(2);
    let var_y = n * sum_y2 - sum_y.powi(2);
    if var_x <= 0.0 || var_y <= 0.0 {
        return 0.0;
    }

    let r = (n * sum_xy - sum_x * sum_y) / (var_x * var_y).sqrt();
    r.clamp(-1.0, 1.0)
}

/// Correlate daily energy with completed task counts.
///
/// Days without an entry in `task_counts` count as zero tasks.
pub fn correlate_mood_and_productivity(
    checkins: &[Checkin],
    task_counts: &HashMap<NaiveDate, u32>,
) -> f64 {
    let (energy, tasks): (Vec<f64>, Vec<f64>) = checkins
        .iter()
        .map(|c| {
            let count = task_counts.get(&c.date).copied().unwrap_or(0);
            (c.energia.level() as f64, count as f64)
        })
        .unzip();

    pearson_correlation(&energy, &tasks)
}

/// Consecutive alta/media days counting back from the most recent check-in.
///
/// A day without a check-in ends the streak.
pub fn energy_streak(checkins: &[Checkin]) -> u32 {
    let mut sorted: Vec<&Checkin> = checkins.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let mut streak = 0;
    let mut expected: Option<NaiveDate> = None;
    for checkin in sorted {
        if checkin.energia == Energia::Baixa {
            break;
        }
        if expected.is_some_and(|day| checkin.date != day) {
            break;
        }
        streak += 1;
        expected = checkin.date.pred_opt();
    }
    streak
}
