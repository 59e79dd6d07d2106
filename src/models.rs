// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{Error, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MAX_DESCRIPTION_CHARS: usize = 200;
pub const MAX_FIXED_COSTS: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
/// Largest single transaction amount; keeps history totals inside `Decimal` range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxnType {
    Income,
    Expense,
}

impl TxnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxnType::Income => "Income",
            TxnType::Expense => "Expense",
        }
    }
}

impl fmt::Display for TxnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxnType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TxnType::Income),
            "expense" => Ok(TxnType::Expense),
            _ => Err(Error::validation(format!(
                "Invalid type '{}', expected Income or Expense",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Investment,
    Food,
    Fixed,
    Transport,
    Shopping,
    Entertainment,
    Freelance,
    Lifestyle,
    Variable,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Investment,
        Category::Food,
        Category::Fixed,
        Category::Transport,
        Category::Shopping,
        Category::Entertainment,
        Category::Freelance,
        Category::Lifestyle,
        Category::Variable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Investment => "Investment",
            Category::Food => "Food",
            Category::Fixed => "Fixed",
            Category::Transport => "Transport",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Freelance => "Freelance",
            Category::Lifestyle => "Lifestyle",
            Category::Variable => "Variable",
        }
    }

    /// Lenient mapping for values read back from the store.
    pub fn from_stored(s: &str) -> Category {
        s.parse().unwrap_or(Category::Variable)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::validation(format!("Unknown category '{}'", s)))
    }
}

/// Canonical transaction record. `amount` is always positive; direction lives in `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TxnType,
    pub category: Category,
    pub description: String,
    pub user_id: String,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        amount: Decimal,
        kind: TxnType,
        category: Category,
        description: &str,
        user_id: &str,
    ) -> Result<Self> {
        if amount <= Decimal::ZERO {
            return Err(Error::validation(format!(
                "Amount must be greater than zero, got {}",
                amount
            )));
        }
        if amount > MAX_AMOUNT {
            return Err(Error::validation(format!(
                "Amount cannot exceed {}, got {}",
                MAX_AMOUNT, amount
            )));
        }
        let description = description.trim();
        let len = description.chars().count();
        if len == 0 || len > MAX_DESCRIPTION_CHARS {
            return Err(Error::validation(format!(
                "Description must be 1-{} characters, got {}",
                MAX_DESCRIPTION_CHARS, len
            )));
        }
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(Error::validation("User id must not be empty"));
        }
        Ok(Transaction {
            date,
            amount,
            kind,
            category,
            description: description.to_string(),
            user_id: user_id.to_string(),
        })
    }

    pub fn is_income(&self) -> bool {
        self.kind == TxnType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TxnType::Expense
    }
}

/// A transaction as written to the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredTransaction {
    pub id: i64,
    #[serde(flatten)]
    pub txn: Transaction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskLevel {
    /// Fraction of disposable income that may be spent.
    pub fn multiplier(&self) -> Decimal {
        match self {
            RiskLevel::Conservative => Decimal::new(5, 1),
            RiskLevel::Moderate => Decimal::new(7, 1),
            RiskLevel::Aggressive => Decimal::new(9, 1),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Conservative => "Conservative",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::Aggressive => "Aggressive",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conservative" => Ok(RiskLevel::Conservative),
            "moderate" => Ok(RiskLevel::Moderate),
            "aggressive" => Ok(RiskLevel::Aggressive),
            _ => Err(Error::validation(format!("Invalid risk level '{}'", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetParameters {
    pub fixed_monthly_costs: Decimal,
    pub risk_level: RiskLevel,
}

impl BudgetParameters {
    pub fn new(fixed_monthly_costs: Decimal, risk_level: RiskLevel) -> Result<Self> {
        let params = BudgetParameters {
            fixed_monthly_costs,
            risk_level,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fixed_monthly_costs < Decimal::ZERO {
            return Err(Error::validation("Fixed costs cannot be negative"));
        }
        if self.fixed_monthly_costs > MAX_FIXED_COSTS {
            return Err(Error::validation(format!(
                "Fixed costs cannot exceed {}",
                MAX_FIXED_COSTS
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Volatility {
    High,
    Low,
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl fmt::Display for Volatility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Volatility::High => "High",
            Volatility::Low => "Low",
            Volatility::NotAvailable => "N/A",
        })
    }
}

/// Why an indicator record carries defaults instead of derived values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataGap {
    EmptyHistory,
    NoIncome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthIndicators {
    pub daily_limit: Decimal,
    pub monthly_avg: Decimal,
    pub volatility_score: Volatility,
    pub survival_horizon: i64,
    pub current_balance: Decimal,
    pub daily_avg: Decimal,
    pub burn_rate: Decimal,
    pub resilience_score: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_gap: Option<DataGap>,
}

impl HealthIndicators {
    pub fn empty() -> Self {
        HealthIndicators {
            daily_limit: Decimal::ZERO,
            monthly_avg: Decimal::ZERO,
            volatility_score: Volatility::NotAvailable,
            survival_horizon: 0,
            current_balance: Decimal::ZERO,
            daily_avg: Decimal::ZERO,
            burn_rate: Decimal::ZERO,
            resilience_score: 0,
            data_gap: Some(DataGap::EmptyHistory),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub label: String,
    pub amount: Decimal,
}

/// Trailing week of expense totals, oldest day first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SevenDaySeries {
    pub points: [DailyTotal; 7],
    pub daily_avg: Decimal,
    pub burn_rate: Decimal,
}

impl SevenDaySeries {
    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    pub fn values(&self) -> Vec<Decimal> {
        self.points.iter().map(|p| p.amount).collect()
    }
}
