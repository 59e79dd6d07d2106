// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Persistent defaults kept in the `settings` table. Command-line flags
//! override these; these override the built-in defaults.

use crate::error::Error;
use crate::models::{BudgetParameters, RiskLevel};
use crate::utils::get_setting;
use anyhow::{Context, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;

pub const KEY_USER_ID: &str = "user_id";
pub const KEY_FIXED_COSTS: &str = "fixed_costs";
pub const KEY_RISK_LEVEL: &str = "risk_level";

pub const KEYS: [&str; 3] = [KEY_USER_ID, KEY_FIXED_COSTS, KEY_RISK_LEVEL];

pub const DEFAULT_USER_ID: &str = "default";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub user_id: String,
    pub budget: BudgetParameters,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            user_id: DEFAULT_USER_ID.to_string(),
            budget: BudgetParameters {
                fixed_monthly_costs: Decimal::ZERO,
                risk_level: RiskLevel::Moderate,
            },
        }
    }
}

/// Reject unknown keys and values that would not parse when loaded.
pub fn validate_setting(key: &str, value: &str) -> Result<(), Error> {
    match key {
        KEY_USER_ID if value.trim().is_empty() => {
            Err(Error::validation("user_id must not be empty"))
        }
        KEY_USER_ID => Ok(()),
        KEY_FIXED_COSTS => {
            let d = value
                .trim()
                .parse::<Decimal>()
                .map_err(|_| Error::validation(format!("Invalid decimal '{}'", value)))?;
            BudgetParameters::new(d, RiskLevel::Moderate).map(|_| ())
        }
        KEY_RISK_LEVEL => value.parse::<RiskLevel>().map(|_| ()),
        _ => Err(Error::validation(format!(
            "Unknown setting '{}', expected one of {}",
            key,
            KEYS.join(", ")
        ))),
    }
}

impl Settings {
    pub fn load(conn: &Connection) -> Result<Self> {
        let mut s = Settings::default();
        if let Some(v) = get_setting(conn, KEY_USER_ID)? {
            s.user_id = v;
        }
        if let Some(v) = get_setting(conn, KEY_FIXED_COSTS)? {
            s.budget.fixed_monthly_costs = v
                .parse::<Decimal>()
                .with_context(|| format!("Invalid stored fixed_costs '{}'", v))?;
        }
        if let Some(v) = get_setting(conn, KEY_RISK_LEVEL)? {
            s.budget.risk_level = v
                .parse::<RiskLevel>()
                .with_context(|| format!("Invalid stored risk_level '{}'", v))?;
        }
        Ok(s)
    }
}
