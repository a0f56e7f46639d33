// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Local;

use spendclip::api::ToshlClient;
use spendclip::cache::ReferenceCache;
use spendclip::commands::{categories, entries};
use spendclip::config::Config;
use spendclip::views::form::SubmitOutcome;
use spendclip::{cli, commands, db, logging};

/// Global `--token`/`--base-url` values are propagated into each subcommand's matches.
fn connect(conn: &rusqlite::Connection, sub: &clap::ArgMatches) -> Result<ToshlClient> {
    let cfg = Config::resolve(conn, sub)?;
    ToshlClient::new(&cfg.base_url, &cfg.token)
}

fn exit_on_failure(outcome: SubmitOutcome) {
    if outcome == SubmitOutcome::Failed {
        std::process::exit(1);
    }
}

fn main() -> Result<()> {
    logging::setup_logging();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    let cache = ReferenceCache::new(&conn);
    let today = Local::now().date_naive();

    match matches.subcommand() {
        Some(("config", sub)) => commands::config::handle(&conn, sub)?,
        Some(("cache", sub)) => commands::cache::handle(&conn, sub)?,
        Some(("list", sub)) => entries::list(&connect(&conn, sub)?, &cache, today, sub)?,
        Some(("show", sub)) => entries::show(&connect(&conn, sub)?, &cache, today, sub)?,
        Some(("add", sub)) => exit_on_failure(entries::add(
            &connect(&conn, sub)?,
            &cache,
            today,
            sub,
        )?),
        Some(("edit", sub)) => exit_on_failure(entries::edit(
            &connect(&conn, sub)?,
            &cache,
            today,
            sub,
        )?),
        Some(("delete", sub)) => {
            entries::delete(&connect(&conn, sub)?, &cache, today, sub)?
        }
        Some(("categories", sub)) => {
            categories::categories(&connect(&conn, sub)?, &cache, sub)?
        }
        Some(("tags", sub)) => categories::tags(&connect(&conn, sub)?, &cache, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
