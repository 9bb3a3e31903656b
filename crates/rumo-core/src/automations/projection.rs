//! Financial projection
//!
//! Extrapolates the lookback window into optimistic, realistic and pessimistic
//! scenarios for each horizon. Growth is measured between the two halves of
//! the window and clamped to ±50%.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ProjectionConfig;
use crate::models::FinancialEntry;

const MAX_GROWTH: f64 = 0.5;
const EXPENSE_GROWTH_WARNING: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    Optimistic,
    Realistic,
    Pessimistic,
}

impl Scenario {
    /// Multipliers applied to (income growth, expense growth)
    fn growth_multipliers(&self) -> (f64, f64) {
        match self {
            Self::Optimistic => (1.1, 0.9),
            Self::Realistic => (1.0, 1.0),
            Self::Pessimistic => (0.9, 1.1),
        }
    }
}

/// One scenario at one horizon. Amounts in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioProjection {
    pub scenario: Scenario,
    pub projected_income: i64,
    pub projected_expenses: i64,
    pub estimated_balance: i64,
    /// Monthly expenses minus monthly income under this scenario
    pub monthly_burn: i64,
    /// Days the current balance lasts at `monthly_burn`; `None` when not burning cash
    pub runway_days: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HorizonProjection {
    pub days: u32,
    pub optimistic: ScenarioProjection,
    pub realistic: ScenarioProjection,
    pub pessimistic: ScenarioProjection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialProjection {
    pub current_balance: i64,
    pub lookback_days: u32,
    pub monthly_income: i64,
    pub monthly_expenses: i64,
    pub income_growth: f64,
    pub expense_growth: f64,
    pub horizons: Vec<HorizonProjection>,
    /// 0.4–0.8, driven by how many entries the window holds
    pub confidence: f64,
    pub warnings: Vec<String>,
}

impl FinancialProjection {
    pub fn horizon(&self, days: u32) -> Option<&HorizonProjection> {
        self.horizons.iter().find(|h| h.days == days)
    }
}

fn growth(first: i64, second: i64) -> f64 {
    if first == 0 {
        return 0.0;
    }
    ((second - first) as f64 / first as f64).clamp(-MAX_GROWTH, MAX_GROWTH)
}

fn confidence_for(entry_count: usize) -> f64 {
    match entry_count {
        n if n < 30 => 0.4,
        n if n < 60 => 0.6,
        n if n >= 90 => 0.8,
        _ => 0.7,
    }
}

struct Rates {
    monthly_income: f64,
    monthly_expenses: f64,
    income_growth: f64,
    expense_growth: f64,
}

fn project_scenario(
    scenario: Scenario,
    rates: &Rates,
    current_balance: i64,
    days: u32,
) -> ScenarioProjection {
    let (income_mult, expense_mult) = scenario.growth_multipliers();
    let monthly_income = rates.monthly_income * (1.0 + rates.income_growth * income_mult);
    let monthly_expenses = rates.monthly_expenses * (1.0 + rates.expense_growth * expense_mult);

    let months = days as f64 / 30.0;
    let projected_income = (monthly_income * months).round() as i64;
    let projected_expenses = (monthly_expenses * months).round() as i64;

    let burn = monthly_expenses - monthly_income;
    let runway_days = if burn <= 0.0 {
        None
    } else {
        Some(((current_balance as f64 / burn) * 30.0).floor().max(0.0) as i64)
    };

    ScenarioProjection {
        scenario,
        projected_income,
        projected_expenses,
        estimated_balance: current_balance + projected_income - projected_expenses,
        monthly_burn: burn.round() as i64,
        runway_days,
    }
}

/// Project balances for each configured horizon.
///
/// Uses entries dated within the `lookback_days` ending on `today`.
pub fn project_finances(
    entries: &[FinancialEntry],
    current_balance: i64,
    today: NaiveDate,
    config: &ProjectionConfig,
) -> FinancialProjection {
    let lookback = config.lookback_days.max(2);
    let start = today - Duration::days(lookback as i64 - 1);
    let midpoint = start + Duration::days((lookback / 2) as i64);

    let mut totals = [[0i64; 2]; 2]; // [half][income, expense]
    let mut entry_count = 0;
    for entry in entries.iter().filter(|e| e.date >= start && e.date <= today) {
        entry_count += 1;
        let half = usize::from(entry.date >= midpoint);
        let kind = usize::from(entry.is_expense());
        totals[half][kind] += entry.value;
    }

    let income_total = totals[0][0] + totals[1][0];
    let expense_total = totals[0][1] + totals[1][1];
    let window_months = lookback as f64 / 30.0;

    let rates = Rates {
        monthly_income: income_total as f64 / window_months,
        monthly_expenses: expense_total as f64 / window_months,
        income_growth: growth(totals[0][0], totals[1][0]),
        expense_growth: growth(totals[0][1], totals[1][1]),
    };

    let horizons: Vec<HorizonProjection> = config
        .horizons
        .iter()
        .map(|&days| HorizonProjection {
            days,
            optimistic: project_scenario(Scenario::Optimistic, &rates, current_balance, days),
            realistic: project_scenario(Scenario::Realistic, &rates, current_balance, days),
            pessimistic: project_scenario(Scenario::Pessimistic, &rates, current_balance, days),
        })
        .collect();

    let mut warnings = Vec::new();
    if let Some(longest) = horizons.iter().max_by_key(|h| h.days) {
        let balance = longest.realistic.estimated_balance;
        if balance < 0 {
            warnings.push(format!(
                "Realistic projection turns negative within {} days",
                longest.days
            ));
        }
        if current_balance > 0 && (balance as f64) < current_balance as f64 * 0.5 {
            warnings.push(format!(
                "Balance projected to drop by more than 50% in {} days",
                longest.days
            ));
        }
    }
    if rates.expense_growth > EXPENSE_GROWTH_WARNING {
        warnings.push(format!(
            "Expenses grew {:.0}% across the last {} days",
            rates.expense_growth * 100.0,
            lookback
        ));
    }
    if rates.monthly_expenses > rates.monthly_income {
        warnings.push("Monthly spending exceeds monthly income".to_string());
    }

    debug!(
        entries = entry_count,
        income_growth = rates.income_growth,
        expense_growth = rates.expense_growth,
        warnings = warnings.len(),
        "Financial projection computed"
    );

    FinancialProjection {
        current_balance,
        lookback_days: lookback,
        monthly_income: rates.monthly_income.round() as i64,
        monthly_expenses: rates.monthly_expenses.round() as i64,
        income_growth: rates.income_growth,
        expense_growth: rates.expense_growth,
        horizons,
        confidence: confidence_for(entry_count),
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryType;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()
    }

    fn entry(entry_type: EntryType, value: i64, days_ago: i64) -> FinancialEntry {
        FinancialEntry {
            id: days_ago,
            user_id: 1,
            entry_type,
            value,
            category: "geral".to_string(),
            date: today() - Duration::days(days_ago),
            notes: None,
        }
    }

    /// Weekly income and expenses, growing in the recent half
    fn growing_ledger() -> Vec<FinancialEntry> {
        let mut entries = Vec::new();
        for week in 0..13 {
            let days_ago = week * 7;
            let recent = days_ago < 45;
            entries.push(entry(EntryType::Entrada, if recent { 60_000 } else { 50_000 }, days_ago));
            entries.push(entry(EntryType::Saida, if recent { 33_000 } else { 30_000 }, days_ago));
        }
        entries
    }

    #[test]
    fn test_scenarios_are_ordered_with_nonnegative_growth() {
        let config = ProjectionConfig::default();
        let projection = project_finances(&growing_ledger(), 100_000, today(), &config);

        assert!(projection.income_growth >= 0.0);
        assert!(projection.expense_growth >= 0.0);
        assert_eq!(projection.horizons.len(), 3);
        for h in &projection.horizons {
            assert!(h.optimistic.estimated_balance >= h.realistic.estimated_balance);
            assert!(h.realistic.estimated_balance >= h.pessimistic.estimated_balance);
        }
    }

    #[test]
    fn test_growth_is_clamped() {
        let entries = vec![
            entry(EntryType::Entrada, 10_000, 80),
            entry(EntryType::Entrada, 90_000, 10),
            entry(EntryType::Saida, 50_000, 80),
            entry(EntryType::Saida, 1_000, 10),
        ];
        let projection = project_finances(&entries, 0, today(), &ProjectionConfig::default());
        assert_eq!(projection.income_growth, 0.5);
        assert_eq!(projection.expense_growth, -0.5);
    }

    #[test]
    fn test_zero_first_half_means_no_growth() {
        let entries = vec![entry(EntryType::Entrada, 90_000, 10)];
        let projection = project_finances(&entries, 0, today(), &ProjectionConfig::default());
        assert_eq!(projection.income_growth, 0.0);
        assert_eq!(projection.monthly_income, 30_000);
    }

    #[test]
    fn test_runway_unbounded_without_burn() {
        let config = ProjectionConfig::default();
        let projection = project_finances(&growing_ledger(), 100_000, today(), &config);
        let realistic = projection.horizon(30).unwrap().realistic;
        assert!(realistic.monthly_burn < 0);
        assert_eq!(realistic.runway_days, None);
    }

    #[test]
    fn test_burning_cash_warnings_and_runway() {
        // 90 days, spending only: 3_000 per day
        let entries: Vec<FinancialEntry> =
            (0..90).map(|d| entry(EntryType::Saida, 3_000, d)).collect();
        let projection = project_finances(&entries, 90_000, today(), &ProjectionConfig::default());

        let realistic = projection.horizon(30).unwrap().realistic;
        assert_eq!(realistic.monthly_burn, 90_000);
        assert_eq!(realistic.runway_days, Some(30));
        assert_eq!(projection.confidence, 0.8);

        assert!(projection.warnings.iter().any(|w| w.contains("turns negative")));
        assert!(projection.warnings.iter().any(|w| w.contains("50%")));
        assert!(projection.warnings.iter().any(|w| w.contains("exceeds")));
    }

    #[test]
    fn test_confidence_tiers() {
        assert_eq!(confidence_for(0), 0.4);
        assert_eq!(confidence_for(29), 0.4);
        assert_eq!(confidence_for(30), 0.6);
        assert_eq!(confidence_for(60), 0.7);
        assert_eq!(confidence_for(89), 0.7);
        assert_eq!(confidence_for(90), 0.8);
    }

    #[test]
    fn test_entries_outside_lookback_ignored() {
        let entries = vec![entry(EntryType::Saida, 1_000_000, 200)];
        let projection = project_finances(&entries, 5_000, today(), &ProjectionConfig::default());
        assert_eq!(projection.monthly_expenses, 0);
        assert!(projection.warnings.is_empty());
    }
}
