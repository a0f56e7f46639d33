// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::cache::{CacheSlot, ReferenceCache};
use crate::config::{mask_token, TOKEN_KEY};
use crate::utils::{delete_setting, get_setting, pretty_table, set_setting};
use anyhow::{bail, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-token", sub)) => {
            let token = sub.get_one::<String>("value").unwrap().trim();
            if token.is_empty() {
                bail!("Token must not be empty");
            }
            set_setting(conn, TOKEN_KEY, token)?;
            println!("Token stored ({})", mask_token(token));
        }
        Some(("clear-token", _)) => {
            if delete_setting(conn, TOKEN_KEY)? {
                println!("Stored token removed");
            } else {
                println!("No stored token");
            }
        }
        Some(("show", sub)) => show(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (token, source) = match sub.get_one::<String>("token").filter(|s| !s.trim().is_empty()) {
        Some(t) => (mask_token(t.trim()), "flag/env"),
        None => match get_setting(conn, TOKEN_KEY)? {
            Some(t) => (mask_token(&t), "stored"),
            None => ("(not set)".to_string(), "-"),
        },
    };
    let base_url = sub
        .get_one::<String>("base_url")
        .cloned()
        .unwrap_or_default();
    let cache = ReferenceCache::new(conn);
    let mut rows = vec![
        vec!["token".to_string(), token, source.to_string()],
        vec!["base_url".to_string(), base_url, "flag/env/default".to_string()],
    ];
    for slot in [CacheSlot::Categories, CacheSlot::Tags] {
        let at = cache
            .updated_at(slot)?
            .unwrap_or_else(|| "(empty)".to_string());
        rows.push(vec![format!("cache.{}", slot.key()), at, "local".to_string()]);
    }
    println!("{}", pretty_table(&["Setting", "Value", "Source"], rows));
    Ok(())
}
