// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{resolve_budget, resolve_user, today};
use crate::config::Settings;
use crate::db;
use crate::metrics::{derive_metrics, Mode};
use crate::models::HealthIndicators;
use crate::planning::{goal_impact, resilience_label, stress_test, Scenarios};
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use rusqlite::Connection;
use serde::Serialize;
use tracing::info;

/// History window read for health indicators.
pub const BUDGET_LOOKBACK_DAYS: i64 = 180;

/// Fetch the user's recent history and derive indicators in `mode`.
pub fn indicators_for(
    conn: &Connection,
    sub: &clap::ArgMatches,
    mode: Mode,
    today: NaiveDate,
) -> Result<HealthIndicators> {
    let settings = Settings::load(conn)?;
    let user_id = resolve_user(sub, &settings);
    let params = resolve_budget(sub, &settings)?;
    info!(
        %user_id,
        fixed_costs = %params.fixed_monthly_costs,
        risk = %params.risk_level,
        ?mode,
        "Budget request"
    );

    let since = today - Duration::days(BUDGET_LOOKBACK_DAYS);
    let history = db::fetch_transactions(conn, &user_id, Some(since))
        .with_context(|| format!("Failed to load transactions for {}", user_id))?;
    Ok(derive_metrics(&history, &params, mode, today)?)
}

fn print_indicators(sub: &clap::ArgMatches, ind: &HealthIndicators) -> Result<()> {
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), ind)? {
        return Ok(());
    }
    let mut rows = vec![
        vec!["Safe to spend today".into(), format!("{:.2}", ind.daily_limit)],
        vec!["Current balance".into(), format!("{:.2}", ind.current_balance)],
        vec!["Monthly income (avg)".into(), format!("{:.2}", ind.monthly_avg)],
        vec!["Income volatility".into(), ind.volatility_score.to_string()],
        vec!["Survival horizon (days)".into(), ind.survival_horizon.to_string()],
        vec!["Daily spend (avg)".into(), format!("{:.2}", ind.daily_avg)],
        vec!["Burn rate (7d)".into(), format!("{:.1}%", ind.burn_rate)],
        vec![
            "Resilience".into(),
            format!(
                "{} ({})",
                ind.resilience_score,
                resilience_label(ind.resilience_score)
            ),
        ],
    ];
    if let Some(gap) = ind.data_gap {
        rows.push(vec!["Note".into(), format!("{:?}", gap)]);
    }
    println!("{}", pretty_table(&["Metric", "Value"], rows));
    Ok(())
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches, mode: Mode) -> Result<()> {
    let ind = indicators_for(conn, sub, mode, today())?;
    print_indicators(sub, &ind)
}

pub fn handle_stress(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let ind = indicators_for(conn, sub, Mode::RightNow, today())?;
    let investments = parse_decimal(sub.get_one::<String>("investments").unwrap())?;
    let scenarios = Scenarios {
        inflation: sub.get_flag("inflation"),
        market_crash: sub.get_flag("market_crash"),
    };
    let out = stress_test(&ind, investments, scenarios);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &out)? {
        let rows = vec![
            vec!["Daily spend".into(), out.daily_avg_stress.to_string()],
            vec!["Investments".into(), out.investments_stress.to_string()],
            vec!["Runway (days)".into(), out.horizon_stress.to_string()],
        ];
        println!("{}", pretty_table(&["Stressed", "Value"], rows));
    }
    Ok(())
}

#[derive(Serialize)]
struct GoalReport {
    cost: rust_decimal::Decimal,
    target: NaiveDate,
    #[serde(flatten)]
    impact: crate::planning::GoalImpact,
}

pub fn handle_goal(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let today = today();
    let cost = parse_decimal(sub.get_one::<String>("cost").unwrap())?;
    let target = parse_date(sub.get_one::<String>("date").unwrap())?;
    let ind = indicators_for(conn, sub, Mode::RightNow, today)?;
    let impact = goal_impact(cost, target, today, ind.daily_limit);

    if !maybe_print_json(
        sub.get_flag("json"),
        sub.get_flag("jsonl"),
        &GoalReport {
            cost,
            target,
            impact: impact.clone(),
        },
    )? {
        let rows = vec![
            vec!["Days left".into(), impact.days.to_string()],
            vec!["Save daily".into(), impact.daily_save.to_string()],
            vec![
                "New safe-to-spend".into(),
                format!("{:.2}", impact.new_daily_limit),
            ],
        ];
        println!("{}", pretty_table(&["Goal", "Value"], rows));
    }
    Ok(())
}
