// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{resolve_user, today};
use crate::analytics::seven_day_series;
use crate::config::Settings;
use crate::db;
use crate::models::SevenDaySeries;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use rusqlite::Connection;

pub const ANALYTICS_LOOKBACK_DAYS: i64 = 30;

pub fn series_for(
    conn: &Connection,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<SevenDaySeries> {
    let settings = Settings::load(conn)?;
    let user_id = resolve_user(sub, &settings);
    let since = today - Duration::days(ANALYTICS_LOOKBACK_DAYS);
    let history = db::fetch_transactions(conn, &user_id, Some(since))
        .with_context(|| format!("Failed to load transactions for {}", user_id))?;
    Ok(seven_day_series(&history, today))
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let series = series_for(conn, sub, today())?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &series)? {
        return Ok(());
    }
    let rows = series
        .points
        .iter()
        .map(|p| vec![p.label.clone(), format!("{:.2}", p.amount)])
        .collect();
    println!("{}", pretty_table(&["Date", "Spent"], rows));
    println!(
        "Daily average: {:.2}  Burn rate: {:.1}%",
        series.daily_avg, series.burn_rate
    );
    Ok(())
}
