// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{validate_setting, Settings, KEYS};
use crate::utils::{get_setting, pretty_table, set_setting};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            match get_setting(conn, key)? {
                Some(v) => println!("{}", v),
                None => println!("(unset)"),
            }
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            let value = sub.get_one::<String>("value").unwrap().trim();
            set(conn, key, value)?;
            println!("{} = {}", key, value);
        }
        Some(("list", _)) => {
            let s = Settings::load(conn)?;
            let rows = vec![
                vec![KEYS[0].to_string(), s.user_id],
                vec![KEYS[1].to_string(), s.budget.fixed_monthly_costs.to_string()],
                vec![KEYS[2].to_string(), s.budget.risk_level.to_string()],
            ];
            println!("{}", pretty_table(&["Key", "Value"], rows));
        }
        _ => {}
    }
    Ok(())
}

/// Validate then store a setting.
pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
    validate_setting(key, value)?;
    set_setting(conn, key, value)
}
