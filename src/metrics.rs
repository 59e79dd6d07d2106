// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Health-indicator derivation over one user's transaction history.
//!
//! Every function here is pure: the history is borrowed, parameters are
//! passed in, and "today" is an explicit argument so that the 7/14-day
//! windows and the month length are reproducible.

use crate::error::Result;
use crate::models::{
    BudgetParameters, DataGap, HealthIndicators, Transaction, Volatility,
};
use crate::utils::{days_in_month, round_money};
use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// CV above this is `High` volatility.
pub const VOLATILITY_THRESHOLD: Decimal = Decimal::from_parts(3, 0, 0, false, 1);
/// Spend-fraction penalty applied in plan-ahead mode under high volatility.
pub const VOLATILITY_PENALTY: Decimal = Decimal::from_parts(1, 0, 0, false, 1);
/// Plan-ahead horizon reported when there are no fixed costs to burn.
pub const SOLVENT_HORIZON_DAYS: i64 = 365;

const RESILIENCE_CAP: i64 = 100;
const RESILIENCE_BUFFER_BONUS: i64 = 20;

/// Which safe-spend / survival formula to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Spend out of the current balance; zero fixed costs give a zero horizon.
    RightNow,
    /// Spend out of average monthly income scaled by risk preference; zero
    /// fixed costs give the capped 365-day horizon.
    PlanAhead,
}

/// Expense pace over the supplied history. Values are unrounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpenseTrend {
    pub daily_avg: Decimal,
    pub burn_rate: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncomeProfile {
    pub monthly_avg: Decimal,
    pub cv: Decimal,
    pub months: usize,
}

pub fn balance(history: &[Transaction]) -> Decimal {
    history.iter().fold(Decimal::ZERO, |acc, t| {
        if t.is_income() {
            acc + t.amount
        } else {
            acc - t.amount
        }
    })
}

fn expense_sum_between(history: &[Transaction], from: NaiveDate, to: NaiveDate) -> Decimal {
    history
        .iter()
        .filter(|t| t.is_expense() && t.date >= from && t.date <= to)
        .map(|t| t.amount)
        .sum()
}

/// Daily average expense across the expense date span, and the percentage
/// change between the trailing week (ending today) and the week before it.
pub fn expense_trend(history: &[Transaction], today: NaiveDate) -> ExpenseTrend {
    let mut expenses = history.iter().filter(|t| t.is_expense()).peekable();
    if expenses.peek().is_none() {
        return ExpenseTrend {
            daily_avg: Decimal::ZERO,
            burn_rate: Decimal::ZERO,
        };
    }

    let mut total = Decimal::ZERO;
    let mut first = NaiveDate::MAX;
    let mut last = NaiveDate::MIN;
    for t in expenses {
        total += t.amount;
        first = first.min(t.date);
        last = last.max(t.date);
    }
    let span_days = ((last - first).num_days() + 1).max(1);
    let daily_avg = total / Decimal::from(span_days);

    let last_week = expense_sum_between(history, today - Duration::days(6), today);
    let prev_week = expense_sum_between(
        history,
        today - Duration::days(13),
        today - Duration::days(7),
    );
    let burn_rate = if prev_week > Decimal::ZERO {
        (last_week - prev_week) / prev_week * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    ExpenseTrend {
        daily_avg,
        burn_rate,
    }
}

/// Income totals per calendar month, from the first to the last month with
/// income; months in between without income are zero.
pub fn monthly_income(history: &[Transaction]) -> Vec<Decimal> {
    let mut by_month: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();
    for t in history.iter().filter(|t| t.is_income()) {
        *by_month
            .entry((t.date.year(), t.date.month()))
            .or_insert(Decimal::ZERO) += t.amount;
    }

    let (Some(&start), Some(&end)) = (by_month.keys().next(), by_month.keys().last()) else {
        return Vec::new();
    };
    let (mut y, mut m) = start;
    let mut totals = Vec::new();
    loop {
        totals.push(by_month.get(&(y, m)).copied().unwrap_or(Decimal::ZERO));
        if (y, m) == end {
            break;
        }
        if m == 12 {
            y += 1;
            m = 1;
        } else {
            m += 1;
        }
    }
    totals
}

pub fn income_profile(history: &[Transaction]) -> IncomeProfile {
    let months = monthly_income(history);
    if months.is_empty() {
        return IncomeProfile {
            monthly_avg: Decimal::ZERO,
            cv: Decimal::ZERO,
            months: 0,
        };
    }

    let n = Decimal::from(months.len());
    let mean = months.iter().copied().sum::<Decimal>() / n;
    // Sample std-dev over mean, taken on x / mean so squares stay bounded by n².
    // A single month has no spread.
    let cv = if months.len() > 1 && mean > Decimal::ZERO {
        let sq: Decimal = months
            .iter()
            .map(|x| {
                let r = *x / mean - Decimal::ONE;
                r * r
            })
            .sum();
        (sq / (n - Decimal::ONE)).sqrt().unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };

    IncomeProfile {
        monthly_avg: mean,
        cv,
        months: months.len(),
    }
}

pub fn classify_volatility(cv: Decimal) -> Volatility {
    if cv > VOLATILITY_THRESHOLD {
        Volatility::High
    } else {
        Volatility::Low
    }
}

fn whole_days(d: Decimal, mode: Mode) -> i64 {
    let d = match mode {
        Mode::RightNow => d.trunc(),
        Mode::PlanAhead => d.round(),
    };
    d.to_i64().unwrap_or(i64::MAX)
}

/// Derive the health indicators for one user's history.
pub fn derive_metrics(
    history: &[Transaction],
    params: &BudgetParameters,
    mode: Mode,
    today: NaiveDate,
) -> Result<HealthIndicators> {
    params.validate()?;
    if history.is_empty() {
        warn!("No transaction data provided");
        return Ok(HealthIndicators::empty());
    }

    let fixed = params.fixed_monthly_costs;
    let current_balance = balance(history);
    let trend = expense_trend(history, today);
    let income = income_profile(history);
    let volatility = classify_volatility(income.cv);

    let dim = Decimal::from(days_in_month(today));
    let disposable = match mode {
        Mode::RightNow => current_balance - fixed,
        Mode::PlanAhead => {
            let penalty = if volatility == Volatility::High {
                VOLATILITY_PENALTY
            } else {
                Decimal::ZERO
            };
            let confidence = params.risk_level.multiplier() - penalty;
            (income.monthly_avg - fixed) * confidence
        }
    };
    let daily_limit = (disposable / dim).max(Decimal::ZERO);

    let daily_fixed_burn = fixed / dim;
    let survival = if current_balance <= Decimal::ZERO {
        Decimal::ZERO
    } else if daily_fixed_burn > Decimal::ZERO {
        current_balance
            .checked_div(daily_fixed_burn)
            .unwrap_or(Decimal::from(i64::MAX))
    } else {
        match mode {
            Mode::RightNow => Decimal::ZERO,
            Mode::PlanAhead => Decimal::from(SOLVENT_HORIZON_DAYS),
        }
    };

    let bonus = if current_balance > fixed {
        Decimal::from(RESILIENCE_BUFFER_BONUS)
    } else {
        Decimal::ZERO
    };
    let raw_score = (survival * Decimal::TWO + bonus).min(Decimal::from(RESILIENCE_CAP));
    let resilience_score = raw_score
        .trunc()
        .to_i64()
        .unwrap_or(0)
        .clamp(0, RESILIENCE_CAP);

    let indicators = HealthIndicators {
        daily_limit: round_money(daily_limit),
        monthly_avg: round_money(income.monthly_avg),
        volatility_score: volatility,
        survival_horizon: whole_days(survival, mode),
        current_balance: round_money(current_balance),
        daily_avg: round_money(trend.daily_avg),
        burn_rate: trend.burn_rate.round_dp(1),
        resilience_score,
        data_gap: (income.months == 0).then_some(DataGap::NoIncome),
    };
    debug!(?mode, %today, ?indicators, "Derived health indicators");
    Ok(indicators)
}
