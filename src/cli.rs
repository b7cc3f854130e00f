// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

use crate::rates::DEFAULT_RATE_URL;

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn data_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("data")
            .long("data")
            .help("Dashboard snapshot JSON (users, expenses, incomes, limits, monthlyExpense)"),
    )
    .arg(
        Arg::new("expenses-csv")
            .long("expenses-csv")
            .help("Extra expense records: id,userId,amount,category,date,description"),
    )
    .arg(
        Arg::new("incomes-csv")
            .long("incomes-csv")
            .help("Extra income records: id,userId,amount,source,date,description"),
    )
}

fn user_arg(required: bool) -> Arg {
    Arg::new("user")
        .long("user")
        .required(required)
        .value_parser(value_parser!(i64))
        .help("User id")
}

pub fn build_cli() -> Command {
    Command::new("spendboard")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Currency-aware income/expense reports")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("SPENDBOARD_DB")
                .help("Session database path (defaults to the platform data dir)"),
        )
        .arg(
            Arg::new("rate-url")
                .long("rate-url")
                .global(true)
                .env("SPENDBOARD_RATE_URL")
                .default_value(DEFAULT_RATE_URL)
                .help("Conversion endpoint queried with from/to/amount"),
        )
        .subcommand(
            Command::new("currency")
                .about("Display currency")
                .subcommand(json_args(Command::new("show").about("Show currency and rate")))
                .subcommand(Command::new("list").about("List supported currencies"))
                .subcommand(
                    Command::new("set")
                        .about("Select a display currency")
                        .arg(Arg::new("currency").required(true))
                        .arg(
                            Arg::new("rate")
                                .long("rate")
                                .help("Use this rate instead of querying the endpoint"),
                        ),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert an amount with the current rate")
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(
                    Arg::new("to-base")
                        .long("to-base")
                        .action(ArgAction::SetTrue)
                        .help("Treat the amount as entered in the display currency"),
                )
                .arg(
                    Arg::new("income")
                        .long("income")
                        .action(ArgAction::SetTrue)
                        .requires("to-base")
                        .help("Apply the income entry cap"),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .requires("to-base")
                        .conflicts_with_all(["income", "limit"])
                        .help("Validate as an expense in this category"),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .action(ArgAction::SetTrue)
                        .requires("to-base")
                        .conflicts_with("income")
                        .help("Validate as a monthly limit"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print as pretty JSON"),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Reports in the display currency")
                .subcommand(json_args(data_args(
                    Command::new("summary")
                        .about("Income, expense, balance and category breakdown")
                        .arg(user_arg(false)),
                )))
                .subcommand(json_args(data_args(
                    Command::new("admin").about("System totals and one row per user"),
                )))
                .subcommand(json_args(data_args(
                    Command::new("monthly")
                        .about("Monthly expenses with over-limit markers")
                        .arg(user_arg(false)),
                ))),
        )
        .subcommand(
            Command::new("limit").about("Monthly limits").subcommand(json_args(data_args(
                Command::new("status")
                    .about("Usage against a user's monthly limit")
                    .arg(user_arg(true)),
            ))),
        )
}
