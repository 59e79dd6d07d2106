// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print JSON lines"),
    )
}

fn user_arg() -> Arg {
    Arg::new("user")
        .long("user")
        .short('u')
        .help("User id (default: the user_id setting)")
}

fn fixed_costs_arg() -> Arg {
    Arg::new("fixed_costs")
        .long("fixed-costs")
        .help("Recurring monthly costs such as rent (default: the fixed_costs setting)")
}

pub fn build_cli() -> Command {
    Command::new("bufferzen")
        .version(crate_version!())
        .about("Statement import, spending categorization, and cash-flow health metrics")
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging (RUST_LOG takes precedence)"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a single transaction")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("Income or Expense"),
                        )
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .short('d')
                                .required(true),
                        )
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .help("Skip auto-categorization"),
                        )
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD (default: today)"),
                        )
                        .arg(user_arg()),
                )
                .subcommand(json_flags(
                    Command::new("recent")
                        .about("Latest transactions, newest first")
                        .arg(user_arg())
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize))
                                .default_value("10"),
                        ),
                )),
        )
        .subcommand(
            Command::new("import")
                .about("Import transactions")
                .subcommand(json_flags(
                    Command::new("statement")
                        .about("Import a bank statement CSV with arbitrary headers")
                        .arg(Arg::new("path").long("path").required(true))
                        .arg(user_arg()),
                )),
        )
        .subcommand(json_flags(
            Command::new("budget")
                .about("Health indicators from the current balance")
                .arg(user_arg())
                .arg(fixed_costs_arg()),
        ))
        .subcommand(json_flags(
            Command::new("plan")
                .about("Risk-adjusted safe spend from average monthly income")
                .arg(user_arg())
                .arg(fixed_costs_arg())
                .arg(
                    Arg::new("risk")
                        .long("risk")
                        .help("Conservative, Moderate or Aggressive (default: the risk_level setting)"),
                ),
        ))
        .subcommand(json_flags(
            Command::new("analytics")
                .about("Spending for each of the last seven days")
                .arg(user_arg()),
        ))
        .subcommand(
            Command::new("categorize")
                .about("Show the category a description maps to")
                .arg(
                    Arg::new("description")
                        .long("description")
                        .short('d')
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("receipt")
                .about("Find the amount in OCR'd receipt text")
                .arg(Arg::new("text_file").long("text-file").required(true)),
        )
        .subcommand(json_flags(
            Command::new("stress")
                .about("Runway under inflation and market-crash scenarios")
                .arg(user_arg())
                .arg(fixed_costs_arg())
                .arg(
                    Arg::new("investments")
                        .long("investments")
                        .default_value("0"),
                )
                .arg(
                    Arg::new("inflation")
                        .long("inflation")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("market_crash")
                        .long("market-crash")
                        .action(ArgAction::SetTrue),
                ),
        ))
        .subcommand(json_flags(
            Command::new("goal")
                .about("Daily saving needed to afford a goal by a date")
                .arg(Arg::new("cost").long("cost").required(true))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .required(true)
                        .help("Target date YYYY-MM-DD"),
                )
                .arg(user_arg())
                .arg(fixed_costs_arg()),
        ))
        .subcommand(
            Command::new("config")
                .about("Persistent defaults")
                .subcommand(
                    Command::new("get").arg(Arg::new("key").long("key").required(true)),
                )
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").long("key").required(true))
                        .arg(Arg::new("value").long("value").required(true)),
                )
                .subcommand(Command::new("list")),
        )
}
