// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bufferzen::config::{Settings, KEY_USER_ID};
use bufferzen::models::{Category, TxnType};
use bufferzen::utils::set_setting;
use bufferzen::{cli, commands::transactions, db};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

fn add_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["bufferzen", "tx", "add"];
    argv.extend_from_slice(args);
    let m = cli::build_cli().get_matches_from(argv);
    m.subcommand_matches("tx")
        .and_then(|tx| tx.subcommand_matches("add"))
        .unwrap()
        .clone()
}

#[test]
fn add_auto_categorizes_and_defaults_date() {
    let conn = setup();
    let settings = Settings::load(&conn).unwrap();
    let sub = add_matches(&[
        "--amount", "499", "--type", "expense", "-d", "Netflix subscription payment",
    ]);
    let txn = transactions::build_transaction(&sub, &settings, today()).unwrap();
    assert_eq!(txn.category, Category::Fixed);
    assert_eq!(txn.kind, TxnType::Expense);
    assert_eq!(txn.date, today());
    assert_eq!(txn.user_id, "default");
}

#[test]
fn explicit_category_skips_keyword_rules() {
    let conn = setup();
    let settings = Settings::load(&conn).unwrap();
    let sub = add_matches(&[
        "--amount", "1200", "--type", "Expense", "-d", "Swiggy", "--category", "Shopping",
        "--date", "2025-06-01",
    ]);
    let txn = transactions::build_transaction(&sub, &settings, today()).unwrap();
    assert_eq!(txn.category, Category::Shopping);
    assert_eq!(txn.date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
}

#[test]
fn add_rejects_invalid_input() {
    let conn = setup();
    let settings = Settings::load(&conn).unwrap();
    for args in [
        vec!["--amount", "0", "--type", "Expense", "-d", "Tea"],
        vec!["--amount", "10", "--type", "Transfer", "-d", "Tea"],
        vec!["--amount", "10", "--type", "Expense", "-d", "   "],
        vec!["--amount", "10", "--type", "Expense", "-d", "Tea", "--date", "15/06/2025"],
    ] {
        let sub = add_matches(&args);
        assert!(transactions::build_transaction(&sub, &settings, today()).is_err());
    }
    let long = "x".repeat(201);
    let sub = add_matches(&["--amount", "10", "--type", "Expense", "-d", long.as_str()]);
    assert!(transactions::build_transaction(&sub, &settings, today()).is_err());
}

#[test]
fn stored_user_id_applies_when_flag_absent() {
    let conn = setup();
    set_setting(&conn, KEY_USER_ID, "alice").unwrap();
    let settings = Settings::load(&conn).unwrap();
    let sub = add_matches(&["--amount", "10", "--type", "Income", "-d", "Refund"]);
    let txn = transactions::build_transaction(&sub, &settings, today()).unwrap();
    assert_eq!(txn.user_id, "alice");
}

#[test]
fn add_then_recent_via_cli() {
    let mut conn = setup();
    for (amount, date) in [("10", "2025-06-01"), ("20", "2025-06-03"), ("30", "2025-06-02")] {
        let m = cli::build_cli().get_matches_from([
            "bufferzen", "tx", "add", "--amount", amount, "--type", "Expense", "-d", "Chai",
            "--date", date, "--user", "u1",
        ]);
        transactions::handle(&mut conn, m.subcommand_matches("tx").unwrap()).unwrap();
    }

    let recent = db::recent_transactions(&conn, "u1", 2).unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].txn.amount, Decimal::from(20));
    assert_eq!(recent[1].txn.amount, Decimal::from(30));

    let m = cli::build_cli().get_matches_from([
        "bufferzen", "tx", "recent", "--user", "u1", "--limit", "2", "--json",
    ]);
    transactions::handle(&mut conn, m.subcommand_matches("tx").unwrap()).unwrap();
}
