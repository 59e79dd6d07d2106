// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::resolve_user;
use crate::config::Settings;
use crate::db;
use crate::normalizer::{normalize, NormalizedStatement};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{bail, Context, Result};
use rusqlite::Connection;
use std::fs::File;
use std::path::Path;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("statement", sub)) => import_statement(conn, sub),
        _ => Ok(()),
    }
}

/// Normalize a statement file and persist it as one batch.
pub fn import_file(
    conn: &mut Connection,
    path: &Path,
    user_id: &str,
) -> Result<NormalizedStatement> {
    let is_csv = path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if !is_csv {
        bail!("Please upload a CSV statement, got {}", path.display());
    }
    let file = File::open(path).with_context(|| format!("Open CSV {}", path.display()))?;
    let statement = normalize(file, user_id)
        .with_context(|| format!("Import failed for {}", path.display()))?;
    db::insert_transactions(conn, &statement.transactions)
        .with_context(|| format!("Save imported transactions for {}", user_id))?;
    Ok(statement)
}

fn import_statement(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let path = sub.get_one::<String>("path").unwrap().trim();
    let settings = Settings::load(conn)?;
    let user_id = resolve_user(sub, &settings);

    let statement = import_file(conn, Path::new(path), &user_id)?;
    if maybe_print_json(json_flag, jsonl_flag, &statement)? {
        return Ok(());
    }
    println!(
        "Imported {} transactions from {} for {}",
        statement.count, path, user_id
    );
    if !statement.skipped.is_empty() {
        let rows = statement
            .skipped
            .iter()
            .map(|s| vec![s.row.to_string(), s.reason.clone()])
            .collect();
        println!("{}", pretty_table(&["Skipped row", "Reason"], rows));
    }
    Ok(())
}
