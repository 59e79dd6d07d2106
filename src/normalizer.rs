// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Statement normalization: turns an arbitrary bank CSV export into
//! canonical transactions.
//!
//! Column names are unknown up front, so the semantic columns are found by
//! substring search over canonicalized headers. Rows that cannot be cleaned
//! are skipped and reported back; the import only fails as a whole when a
//! mandatory column is missing or nothing survives.

use crate::categorizer::categorize;
use crate::error::{Error, Result};
use crate::models::{MAX_DESCRIPTION_CHARS, Transaction, TxnType};
use crate::utils::{parse_amount, parse_statement_date};
use csv::{ReaderBuilder, StringRecord};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::io::Read;
use tracing::{debug, info, warn};

const DATE_KEYS: &[&str] = &["date"];
const AMOUNT_KEYS: &[&str] = &["amount", "debit", "credit"];
const DESCRIPTION_KEYS: &[&str] = &["description", "narration", "details"];
const DIRECTION_KEYS: &[&str] = &["type", "cr/dr"];

pub const DEFAULT_DESCRIPTION: &str = "Imported";

static ACCOUNT_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{10,}").expect("static regex"));

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub index: usize,
    pub name: String,
}

/// Which statement columns were picked for each role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnMap {
    pub date: Column,
    pub amount: Column,
    pub description: Option<Column>,
    pub direction: Option<Column>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    /// 1-based data row number (the header is row 0).
    pub row: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NormalizedStatement {
    pub transactions: Vec<Transaction>,
    pub count: usize,
    pub columns: ColumnMap,
    pub skipped: Vec<SkippedRow>,
}

pub fn canonical_header(h: &str) -> String {
    h.trim().to_lowercase().replace(' ', "_")
}

fn find_column(headers: &[String], keys: &[&str]) -> Option<Column> {
    headers
        .iter()
        .position(|h| keys.iter().any(|k| h.contains(k)))
        .map(|index| Column {
            index,
            name: headers[index].clone(),
        })
}

pub fn detect_columns(headers: &[String]) -> Result<ColumnMap> {
    let date = find_column(headers, DATE_KEYS);
    let amount = find_column(headers, AMOUNT_KEYS);
    match (date, amount) {
        (Some(date), Some(amount)) => Ok(ColumnMap {
            date,
            amount,
            description: find_column(headers, DESCRIPTION_KEYS),
            direction: find_column(headers, DIRECTION_KEYS),
        }),
        _ => Err(Error::MissingColumns {
            found: headers.to_vec(),
        }),
    }
}

/// Truncate to the description limit and drop account-number-like digit runs.
pub fn clean_description(raw: &str) -> String {
    let truncated: String = raw.chars().take(MAX_DESCRIPTION_CHARS).collect();
    let scrubbed = ACCOUNT_NUMBER.replace_all(&truncated, "");
    let scrubbed = scrubbed.trim();
    if scrubbed.is_empty() {
        DEFAULT_DESCRIPTION.to_string()
    } else {
        scrubbed.to_string()
    }
}

pub fn direction_from(raw: &str) -> TxnType {
    let v = raw.to_lowercase();
    if v.contains("cr") || v.contains("credit") {
        TxnType::Income
    } else {
        TxnType::Expense
    }
}

fn clean_row(
    record: &StringRecord,
    columns: &ColumnMap,
    user_id: &str,
) -> std::result::Result<Transaction, String> {
    let date_raw = record.get(columns.date.index).unwrap_or("");
    let date = parse_statement_date(date_raw).ok_or_else(|| format!("bad date '{}'", date_raw))?;

    let amount_raw = record.get(columns.amount.index).unwrap_or("");
    let amount = parse_amount(amount_raw).ok_or_else(|| format!("bad amount '{}'", amount_raw))?;

    let description = match &columns.description {
        Some(col) => clean_description(record.get(col.index).unwrap_or("")),
        None => DEFAULT_DESCRIPTION.to_string(),
    };

    let kind = match &columns.direction {
        Some(col) => direction_from(record.get(col.index).unwrap_or("")),
        None => TxnType::Expense,
    };

    let category = categorize(&description);
    Transaction::new(date, amount, kind, category, &description, user_id).map_err(|e| e.to_string())
}

/// Normalize a CSV statement for one user.
pub fn normalize<R: Read>(reader: R, user_id: &str) -> Result<NormalizedStatement> {
    if user_id.trim().is_empty() {
        return Err(Error::validation("User id must not be empty"));
    }

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(canonical_header).collect();
    let columns = detect_columns(&headers)?;
    debug!(?columns, "Detected statement columns");

    let mut transactions = Vec::new();
    let mut skipped = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let row = i + 1;
        let outcome = result
            .map_err(|e| e.to_string())
            .and_then(|record| clean_row(&record, &columns, user_id));
        match outcome {
            Ok(txn) => transactions.push(txn),
            Err(reason) => {
                warn!(row, %reason, "Skipping statement row");
                skipped.push(SkippedRow { row, reason });
            }
        }
    }

    if transactions.is_empty() {
        return Err(Error::NoValidTransactions);
    }

    info!(
        user_id,
        imported = transactions.len(),
        skipped = skipped.len(),
        "Normalized statement"
    );
    Ok(NormalizedStatement {
        count: transactions.len(),
        transactions,
        columns,
        skipped,
    })
}
