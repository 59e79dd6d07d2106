// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Trailing seven-day spending series for charting.

use crate::metrics::expense_trend;
use crate::models::{DailyTotal, SevenDaySeries, Transaction};
use crate::utils::round_money;
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

/// One expense total per day for the seven days ending `today`, oldest
/// first. Idle days are explicit zeros.
pub fn seven_day_series(history: &[Transaction], today: NaiveDate) -> SevenDaySeries {
    let points = std::array::from_fn(|i| {
        let date = today - Duration::days(6 - i as i64);
        let amount: Decimal = history
            .iter()
            .filter(|t| t.is_expense() && t.date == date)
            .map(|t| t.amount)
            .sum();
        DailyTotal {
            label: date.format("%Y-%m-%d").to_string(),
            amount: round_money(amount),
        }
    });

    let trend = expense_trend(history, today);
    SevenDaySeries {
        points,
        daily_avg: round_money(trend.daily_avg),
        burn_rate: trend.burn_rate.round_dp(1),
    }
}
