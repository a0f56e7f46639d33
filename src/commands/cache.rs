// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::cache::ReferenceCache;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("clear", _)) = m.subcommand() {
        let n = ReferenceCache::new(conn).clear()?;
        println!("Cleared {} cache slot(s)", n);
    }
    Ok(())
}
