// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{resolve_user, today};
use crate::categorizer::categorize;
use crate::config::Settings;
use crate::db;
use crate::models::{Category, Transaction, TxnType};
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("recent", sub)) => recent(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Validate `tx add` arguments into a canonical transaction.
pub fn build_transaction(
    sub: &clap::ArgMatches,
    settings: &Settings,
    today: NaiveDate,
) -> Result<Transaction> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let kind = sub.get_one::<String>("type").unwrap().parse::<TxnType>()?;
    let description = sub.get_one::<String>("description").unwrap();
    let category = match sub
        .get_one::<String>("category")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
    {
        Some(c) => c.parse::<Category>()?,
        None => categorize(description),
    };
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today,
    };
    let user_id = resolve_user(sub, settings);
    Ok(Transaction::new(
        date,
        amount,
        kind,
        category,
        description,
        &user_id,
    )?)
}

fn add(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let settings = Settings::load(conn)?;
    let txn = build_transaction(sub, &settings, today())?;
    let written = db::insert_transactions(conn, std::slice::from_ref(&txn))?;
    let id = written.first().map(|w| w.id).unwrap_or_default();
    println!(
        "Recorded {} {} on {} as {} (id {})",
        txn.kind, txn.amount, txn.date, txn.category, id
    );
    Ok(())
}

fn recent(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let settings = Settings::load(conn)?;
    let user_id = resolve_user(sub, &settings);
    let limit = *sub.get_one::<usize>("limit").unwrap_or(&10);

    let data = db::recent_transactions(conn, &user_id, limit)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.txn.date.to_string(),
                    r.txn.kind.to_string(),
                    format!("{:.2}", r.txn.amount),
                    r.txn.category.to_string(),
                    r.txn.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Type", "Amount", "Category", "Description"], rows)
        );
    }
    Ok(())
}
