// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bufferzen::metrics::Mode;
use bufferzen::{cli, commands, db};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    // RUST_LOG wins over --verbose
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if matches.get_flag("verbose") {
        EnvFilter::new("bufferzen=debug")
    } else {
        EnvFilter::new("bufferzen=info")
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();

    let mut conn = db::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut conn, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut conn, sub)?,
        Some(("budget", sub)) => commands::budget::handle(&conn, sub, Mode::RightNow)?,
        Some(("plan", sub)) => commands::budget::handle(&conn, sub, Mode::PlanAhead)?,
        Some(("analytics", sub)) => commands::analytics::handle(&conn, sub)?,
        Some(("categorize", sub)) => commands::categorize::handle(sub)?,
        Some(("receipt", sub)) => commands::receipts::handle(sub)?,
        Some(("stress", sub)) => commands::budget::handle_stress(&conn, sub)?,
        Some(("goal", sub)) => commands::budget::handle_goal(&conn, sub)?,
        Some(("config", sub)) => commands::settings::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
