// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::FinanceApi;
use crate::cache::ReferenceCache;
use crate::notify::{self, Toast};
use crate::reference::ReferenceData;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use tracing::warn;

/// Live data when reachable (refreshing the cache), the cached snapshot otherwise.
fn load<A: FinanceApi + ?Sized>(
    api: &A,
    cache: &ReferenceCache,
    sub: &clap::ArgMatches,
) -> Result<ReferenceData> {
    if sub.get_flag("cached") {
        return Ok(ReferenceData::from_cache(cache));
    }
    match ReferenceData::fetch(api) {
        Ok(data) => {
            data.store(cache)?;
            Ok(data)
        }
        Err(err) => {
            warn!(error = %err, "reference data refresh failed");
            notify::flush(&mut vec![Toast::failure(format!(
                "Failed to fetch data. {}",
                err
            ))]);
            Ok(ReferenceData::from_cache(cache))
        }
    }
}

pub fn categories<A: FinanceApi + ?Sized>(
    api: &A,
    cache: &ReferenceCache,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let data = load(api, cache, sub)?;
    let live: Vec<_> = data.categories.iter().filter(|c| !c.deleted).collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &live)? {
        let rows = live
            .iter()
            .map(|c| {
                vec![
                    c.name.clone(),
                    c.id.clone(),
                    c.r#type.clone(),
                    c.counts.entries.to_string(),
                    c.counts.tags.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "ID", "Type", "Entries", "Tags"], rows)
        );
    }
    Ok(())
}

pub fn tags<A: FinanceApi + ?Sized>(
    api: &A,
    cache: &ReferenceCache,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let data = load(api, cache, sub)?;
    let live: Vec<_> = data.tags.iter().filter(|t| !t.deleted).collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &live)? {
        let rows = live
            .iter()
            .map(|t| {
                vec![
                    t.name.clone(),
                    t.id.clone(),
                    data.category_name(&t.category).to_string(),
                    t.count.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Tag", "ID", "Category", "Count"], rows)
        );
    }
    Ok(())
}
