// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Result;
use crate::models::{Category, StoredTransaction, Transaction, TxnType};
use anyhow::Context;
use chrono::NaiveDate;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

pub const DB_ENV: &str = "BUFFERZEN_DB";

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "BufferZen", "bufferzen"));

pub fn db_path() -> anyhow::Result<PathBuf> {
    if let Some(p) = std::env::var_os(DB_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("bufferzen.sqlite"))
}

pub fn open_or_init() -> anyhow::Result<Connection> {
    let path = db_path()?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    debug!(path = %path.display(), "Database ready");
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        amount TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('Income','Expense')),
        category TEXT NOT NULL,
        description TEXT NOT NULL,
        user_id TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_user_date ON transactions(user_id, date);
    "#,
    )?;
    Ok(())
}

fn conversion_err(idx: usize, e: impl std::error::Error + Send + Sync + 'static) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
}

fn row_to_stored(r: &Row<'_>) -> rusqlite::Result<StoredTransaction> {
    let amount: String = r.get(2)?;
    let kind: String = r.get(3)?;
    let category: String = r.get(4)?;
    Ok(StoredTransaction {
        id: r.get(0)?,
        txn: Transaction {
            date: r.get::<_, NaiveDate>(1)?,
            amount: Decimal::from_str(&amount).map_err(|e| conversion_err(2, e))?,
            kind: kind.parse::<TxnType>().map_err(|e| conversion_err(3, e))?,
            category: Category::from_stored(&category),
            description: r.get(5)?,
            user_id: r.get(6)?,
        },
    })
}

const SELECT_COLUMNS: &str =
    "SELECT id, date, amount, type, category, description, user_id FROM transactions";

/// One user's transactions, oldest first, optionally from `since` onwards.
pub fn fetch_transactions(
    conn: &Connection,
    user_id: &str,
    since: Option<NaiveDate>,
) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_COLUMNS} WHERE user_id=?1 AND (?2 IS NULL OR date >= ?2) ORDER BY date, id"
    ))?;
    let rows = stmt.query_map(params![user_id, since], row_to_stored)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?.txn);
    }
    debug!(user_id, ?since, count = out.len(), "Fetched transactions");
    Ok(out)
}

/// Latest transactions for a user, newest first.
pub fn recent_transactions(
    conn: &Connection,
    user_id: &str,
    limit: usize,
) -> Result<Vec<StoredTransaction>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_COLUMNS} WHERE user_id=?1 ORDER BY date DESC, id DESC LIMIT ?2"
    ))?;
    let rows = stmt.query_map(params![user_id, limit as i64], row_to_stored)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Write a batch atomically: either every row lands or none does.
pub fn insert_transactions(
    conn: &mut Connection,
    batch: &[Transaction],
) -> Result<Vec<StoredTransaction>> {
    let tx = conn.transaction()?;
    let mut written = Vec::with_capacity(batch.len());
    {
        let mut stmt = tx.prepare(
            "INSERT INTO transactions(date, amount, type, category, description, user_id) \
             VALUES (?1,?2,?3,?4,?5,?6)",
        )?;
        for t in batch {
            stmt.execute(params![
                t.date,
                t.amount.to_string(),
                t.kind.as_str(),
                t.category.as_str(),
                t.description,
                t.user_id
            ])?;
            written.push(StoredTransaction {
                id: tx.last_insert_rowid(),
                txn: t.clone(),
            });
        }
    }
    tx.commit()?;
    info!(count = written.len(), "Inserted transactions");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    fn txn(date: &str, amount: &str, kind: TxnType, user: &str) -> Transaction {
        Transaction::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            Decimal::from_str(amount).unwrap(),
            kind,
            Category::Food,
            "mess bill",
            user,
        )
        .unwrap()
    }

    #[test]
    fn fetch_is_scoped_per_user_and_date() {
        let mut conn = conn();
        insert_transactions(
            &mut conn,
            &[
                txn("2025-01-05", "10", TxnType::Expense, "a"),
                txn("2025-01-01", "500", TxnType::Income, "a"),
                txn("2025-01-03", "99", TxnType::Expense, "b"),
            ],
        )
        .unwrap();

        let all = fetch_transactions(&conn, "a", None).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].amount, Decimal::from(500));

        let since = NaiveDate::from_ymd_opt(2025, 1, 2);
        let recent = fetch_transactions(&conn, "a", since).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].kind, TxnType::Expense);

        assert!(fetch_transactions(&conn, "nobody", None).unwrap().is_empty());
    }

    #[test]
    fn batch_insert_is_all_or_nothing() {
        let mut conn = conn();
        conn.execute_batch(
            "CREATE TRIGGER reject_big BEFORE INSERT ON transactions \
             WHEN CAST(NEW.amount AS REAL) > 1000 BEGIN SELECT RAISE(ABORT, 'too big'); END;",
        )
        .unwrap();
        let err = insert_transactions(
            &mut conn,
            &[
                txn("2025-01-01", "10", TxnType::Expense, "a"),
                txn("2025-01-02", "5000", TxnType::Expense, "a"),
            ],
        )
        .unwrap_err();
        assert!(err.is_infrastructure());
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn fetch_failure_is_not_empty_history() {
        let conn = Connection::open_in_memory().unwrap();
        let err = fetch_transactions(&conn, "a", None).unwrap_err();
        assert!(err.is_infrastructure());
    }
}
