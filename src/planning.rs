// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! What-if helpers layered on top of derived health indicators.

use crate::models::HealthIndicators;
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const INFLATION_FACTOR: Decimal = Decimal::from_parts(12, 0, 0, false, 1);
const CRASH_FACTOR: Decimal = Decimal::from_parts(7, 0, 0, false, 1);

/// Nearest whole number, halves toward positive infinity.
fn whole(d: Decimal) -> Decimal {
    (d + Decimal::new(5, 1)).floor()
}

pub fn resilience_label(score: i64) -> &'static str {
    match score {
        s if s <= 0 => "Vulnerable",
        s if s < 30 => "Starting Out",
        s if s < 60 => "Stabilizing",
        s if s < 85 => "Resilient",
        _ => "Unshakeable",
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenarios {
    /// Expenses rise 20%.
    pub inflation: bool,
    /// Investments lose 30%.
    pub market_crash: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressResult {
    pub daily_avg_stress: Decimal,
    pub investments_stress: Decimal,
    pub horizon_stress: i64,
}

/// Runway of liquid cash plus investments against the (possibly inflated)
/// daily spend. Assumes no further income.
pub fn stress_test(
    indicators: &HealthIndicators,
    investments: Decimal,
    scenarios: Scenarios,
) -> StressResult {
    let mut daily_avg = indicators.daily_avg;
    if scenarios.inflation {
        daily_avg *= INFLATION_FACTOR;
    }
    let mut invested = investments;
    if scenarios.market_crash {
        invested *= CRASH_FACTOR;
    }

    let liquid = indicators.current_balance + invested;
    let horizon_stress = if daily_avg > Decimal::ZERO {
        whole(liquid / daily_avg).to_i64().unwrap_or(0)
    } else {
        0
    };

    StressResult {
        daily_avg_stress: whole(daily_avg),
        investments_stress: whole(invested),
        horizon_stress,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalImpact {
    pub days: i64,
    pub daily_save: Decimal,
    pub new_daily_limit: Decimal,
}

/// How much must be set aside daily to afford `cost` by `target`, and what
/// that leaves of the current safe daily limit.
pub fn goal_impact(
    cost: Decimal,
    target: NaiveDate,
    today: NaiveDate,
    daily_limit: Decimal,
) -> GoalImpact {
    let days = (target - today).num_days().abs();
    if days == 0 {
        return GoalImpact {
            days: 0,
            daily_save: Decimal::ZERO,
            new_daily_limit: daily_limit,
        };
    }
    let daily_save = (cost / Decimal::from(days)).ceil();
    GoalImpact {
        days,
        daily_save,
        new_daily_limit: (daily_limit - daily_save).max(Decimal::ZERO),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn indicators(balance: &str, daily_avg: &str) -> HealthIndicators {
        HealthIndicators {
            current_balance: dec(balance),
            daily_avg: dec(daily_avg),
            data_gap: None,
            ..HealthIndicators::empty()
        }
    }

    #[test]
    fn labels_follow_score_bands() {
        assert_eq!(resilience_label(0), "Vulnerable");
        assert_eq!(resilience_label(29), "Starting Out");
        assert_eq!(resilience_label(30), "Stabilizing");
        assert_eq!(resilience_label(84), "Resilient");
        assert_eq!(resilience_label(100), "Unshakeable");
    }

    #[test]
    fn stress_without_scenarios_is_plain_runway() {
        let out = stress_test(&indicators("10000", "500"), dec("5000"), Scenarios::default());
        assert_eq!(out.horizon_stress, 30);
        assert_eq!(out.investments_stress, dec("5000"));
    }

    #[test]
    fn stress_scenarios_compound() {
        let scenarios = Scenarios {
            inflation: true,
            market_crash: true,
        };
        let out = stress_test(&indicators("10000", "500"), dec("5000"), scenarios);
        assert_eq!(out.daily_avg_stress, dec("600"));
        assert_eq!(out.investments_stress, dec("3500"));
        // 13500 / 600 = 22.5
        assert_eq!(out.horizon_stress, 23);
    }

    #[test]
    fn negative_runway_rounds_halves_up() {
        // -2250 / 100 = -22.5
        let out = stress_test(&indicators("-2250", "100"), Decimal::ZERO, Scenarios::default());
        assert_eq!(out.horizon_stress, -22);
        let out = stress_test(&indicators("2250", "100"), Decimal::ZERO, Scenarios::default());
        assert_eq!(out.horizon_stress, 23);
    }

    #[test]
    fn stress_with_no_spending_has_zero_horizon() {
        let out = stress_test(&indicators("10000", "0"), Decimal::ZERO, Scenarios::default());
        assert_eq!(out.horizon_stress, 0);
    }

    #[test]
    fn goal_splits_cost_over_remaining_days() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let target = NaiveDate::from_ymd_opt(2025, 6, 8).unwrap();
        let out = goal_impact(dec("1000"), target, today, dec("500"));
        assert_eq!(out.days, 7);
        // ceil(142.857...)
        assert_eq!(out.daily_save, dec("143"));
        assert_eq!(out.new_daily_limit, dec("357"));

        let same_day = goal_impact(dec("1000"), today, today, dec("500"));
        assert_eq!(same_day.daily_save, Decimal::ZERO);

        let squeezed = goal_impact(dec("10000"), target, today, dec("500"));
        assert_eq!(squeezed.new_daily_limit, Decimal::ZERO);
    }
}
