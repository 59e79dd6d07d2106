// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod analytics;
pub mod budget;
pub mod categorize;
pub mod importer;
pub mod receipts;
pub mod settings;
pub mod transactions;

use crate::config::Settings;
use crate::models::{BudgetParameters, RiskLevel};
use crate::utils::parse_decimal;
use anyhow::Result;
use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn opt_arg<'a>(sub: &'a clap::ArgMatches, id: &str) -> Option<&'a str> {
    sub.try_get_one::<String>(id)
        .ok()
        .flatten()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

pub fn resolve_user(sub: &clap::ArgMatches, settings: &Settings) -> String {
    opt_arg(sub, "user")
        .map(str::to_string)
        .unwrap_or_else(|| settings.user_id.clone())
}

/// Flags first, then stored settings.
pub fn resolve_budget(sub: &clap::ArgMatches, settings: &Settings) -> Result<BudgetParameters> {
    let fixed = match opt_arg(sub, "fixed_costs") {
        Some(s) => parse_decimal(s)?,
        None => settings.budget.fixed_monthly_costs,
    };
    let risk = match opt_arg(sub, "risk") {
        Some(s) => s.parse::<RiskLevel>()?,
        None => settings.budget.risk_level,
    };
    Ok(BudgetParameters::new(fixed, risk)?)
}
