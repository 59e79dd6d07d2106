// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::receipt::extract_amount;
use anyhow::{Context, Result};
use std::fs;

pub fn handle(sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("text_file").unwrap();
    let text = fs::read_to_string(path).with_context(|| format!("Read receipt text {}", path))?;
    match extract_amount(&text) {
        Some(amount) => println!("{:.2}", amount),
        None => println!("No amount found"),
    }
    Ok(())
}
