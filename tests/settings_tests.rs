// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bufferzen::config::{Settings, KEY_FIXED_COSTS, KEY_RISK_LEVEL};
use bufferzen::models::RiskLevel;
use bufferzen::utils::get_setting;
use bufferzen::{cli, commands::settings, db};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

#[test]
fn config_set_via_cli_persists() {
    let conn = setup();
    let m = cli::build_cli().get_matches_from([
        "bufferzen", "config", "set", "--key", "risk_level", "--value", "aggressive",
    ]);
    settings::handle(&conn, m.subcommand_matches("config").unwrap()).unwrap();
    assert_eq!(
        get_setting(&conn, KEY_RISK_LEVEL).unwrap().as_deref(),
        Some("aggressive")
    );
    assert_eq!(
        Settings::load(&conn).unwrap().budget.risk_level,
        RiskLevel::Aggressive
    );
}

#[test]
fn invalid_values_are_not_stored() {
    let conn = setup();
    assert!(settings::set(&conn, KEY_FIXED_COSTS, "lots").is_err());
    assert!(settings::set(&conn, KEY_FIXED_COSTS, "-1").is_err());
    assert!(settings::set(&conn, "currency", "INR").is_err());
    assert_eq!(get_setting(&conn, KEY_FIXED_COSTS).unwrap(), None);

    settings::set(&conn, KEY_FIXED_COSTS, "6500").unwrap();
    assert_eq!(
        Settings::load(&conn).unwrap().budget.fixed_monthly_costs,
        Decimal::from(6500)
    );
}
