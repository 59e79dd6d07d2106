// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bufferzen::commands::budget::indicators_for;
use bufferzen::config::KEY_FIXED_COSTS;
use bufferzen::metrics::Mode;
use bufferzen::models::{Category, Transaction, TxnType, Volatility};
use bufferzen::{cli, commands::settings, db};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    day(2025, 6, 15)
}

fn txn(date: NaiveDate, amount: i64, kind: TxnType) -> Transaction {
    Transaction::new(date, Decimal::from(amount), kind, Category::Variable, "seed", "u1").unwrap()
}

fn seeded() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    db::insert_transactions(
        &mut conn,
        &[
            // outside the lookback window
            txn(day(2024, 1, 1), 100_000, TxnType::Income),
            txn(day(2025, 6, 1), 30_000, TxnType::Income),
            txn(day(2025, 6, 10), 3_000, TxnType::Expense),
        ],
    )
    .unwrap();
    conn
}

fn sub_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["bufferzen"];
    argv.extend_from_slice(args);
    let m = cli::build_cli().get_matches_from(argv);
    m.subcommand().unwrap().1.clone()
}

#[test]
fn right_now_uses_recent_balance() {
    let conn = seeded();
    let sub = sub_matches(&["budget", "--user", "u1", "--fixed-costs", "6000"]);
    let ind = indicators_for(&conn, &sub, Mode::RightNow, today()).unwrap();
    assert_eq!(ind.current_balance, Decimal::from(27_000));
    assert_eq!(ind.daily_limit, Decimal::from(700));
    assert_eq!(ind.survival_horizon, 135);
    assert_eq!(ind.resilience_score, 100);
    assert_eq!(ind.volatility_score, Volatility::Low);
}

#[test]
fn plan_ahead_applies_risk_multiplier() {
    let conn = seeded();
    let sub = sub_matches(&["plan", "--user", "u1", "--fixed-costs", "6000"]);
    let ind = indicators_for(&conn, &sub, Mode::PlanAhead, today()).unwrap();
    assert_eq!(ind.monthly_avg, Decimal::from(30_000));
    assert_eq!(ind.daily_limit, Decimal::from(560));

    let sub = sub_matches(&[
        "plan", "--user", "u1", "--fixed-costs", "6000", "--risk", "Conservative",
    ]);
    let ind = indicators_for(&conn, &sub, Mode::PlanAhead, today()).unwrap();
    assert_eq!(ind.daily_limit, Decimal::from(400));
}

#[test]
fn stored_fixed_costs_are_used_without_flag() {
    let conn = seeded();
    settings::set(&conn, KEY_FIXED_COSTS, "3000").unwrap();
    let sub = sub_matches(&["budget", "--user", "u1"]);
    let ind = indicators_for(&conn, &sub, Mode::RightNow, today()).unwrap();
    assert_eq!(ind.daily_limit, Decimal::from(800));
}

#[test]
fn unknown_user_gets_defaults() {
    let conn = seeded();
    let sub = sub_matches(&["budget", "--user", "nobody", "--fixed-costs", "6000"]);
    let ind = indicators_for(&conn, &sub, Mode::RightNow, today()).unwrap();
    assert_eq!(ind.volatility_score, Volatility::NotAvailable);
    assert_eq!(ind.daily_limit, Decimal::ZERO);
    assert_eq!(ind.survival_horizon, 0);
}

#[test]
fn negative_fixed_costs_are_rejected() {
    let conn = seeded();
    let sub = sub_matches(&["budget", "--user", "u1", "--fixed-costs=-5"]);
    let err = indicators_for(&conn, &sub, Mode::RightNow, today()).unwrap_err();
    assert!(err.to_string().contains("negative"));
}
