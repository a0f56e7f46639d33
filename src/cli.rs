// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command};

use crate::api::DEFAULT_BASE_URL;
use crate::config::{BASE_URL_ENV, TOKEN_ENV};

fn id_arg() -> Arg {
    Arg::new("id").required(true).help("Entry id as shown by `list`")
}

fn output_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    ]
}

// Left optional here; the form reports missing fields itself.
fn entry_args() -> [Arg; 5] {
    [
        Arg::new("amount")
            .long("amount")
            .allow_hyphen_values(true)
            .help("Amount spent, as a positive number"),
        Arg::new("category")
            .long("category")
            .help("Category name or id (defaults to the first Food* category)"),
        Arg::new("tag")
            .long("tag")
            .action(ArgAction::Append)
            .value_delimiter(',')
            .help("Tag name or id; repeat or comma-separate for several"),
        Arg::new("desc").long("desc").help("Description"),
        Arg::new("date")
            .long("date")
            .help("YYYY-MM-DD (defaults to today, or the entry's date when editing)"),
    ]
}

pub fn build_cli() -> Command {
    Command::new("spendclip")
        .about("View, add, edit and delete Toshl expenses")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("token")
                .long("token")
                .env(TOKEN_ENV)
                .hide_env_values(true)
                .global(true)
                .help("API bearer token"),
        )
        .arg(
            Arg::new("base_url")
                .long("base-url")
                .env(BASE_URL_ENV)
                .default_value(DEFAULT_BASE_URL)
                .global(true)
                .help("API base URL"),
        )
        .subcommand(
            Command::new("list")
                .about("Expenses from the last 7 days, grouped by day")
                .args(output_args()),
        )
        .subcommand(
            Command::new("show")
                .about("Details of one listed expense")
                .arg(id_arg())
                .args(output_args()),
        )
        .subcommand(
            Command::new("add")
                .about("Record a new expense")
                .args(entry_args()),
        )
        .subcommand(
            Command::new("edit")
                .about("Change a listed expense; omitted fields keep their values")
                .arg(id_arg())
                .args(entry_args()),
        )
        .subcommand(
            Command::new("delete")
                .visible_alias("rm")
                .about("Delete a listed expense (ctrl+x in the list)")
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("categories")
                .about("Spending categories")
                .arg(
                    Arg::new("cached")
                        .long("cached")
                        .action(ArgAction::SetTrue)
                        .help("Show the local snapshot without fetching"),
                )
                .args(output_args()),
        )
        .subcommand(
            Command::new("tags")
                .about("Entry tags")
                .arg(
                    Arg::new("cached")
                        .long("cached")
                        .action(ArgAction::SetTrue)
                        .help("Show the local snapshot without fetching"),
                )
                .args(output_args()),
        )
        .subcommand(
            Command::new("config")
                .about("Stored settings")
                .subcommand(
                    Command::new("set-token")
                        .about("Store the API token")
                        .arg(Arg::new("value").required(true)),
                )
                .subcommand(Command::new("clear-token").about("Forget the stored token"))
                .subcommand(Command::new("show").about("Show effective settings")),
        )
        .subcommand(
            Command::new("cache")
                .about("Local reference data")
                .subcommand(Command::new("clear").about("Drop cached categories and tags")),
        )
}
