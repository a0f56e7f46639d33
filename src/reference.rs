// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::de::DeserializeOwned;
use std::thread::{self, ScopedJoinHandle};
use tracing::warn;

use crate::api::{ApiError, FinanceApi};
use crate::cache::{CacheSlot, ReferenceCache};
use crate::models::{Category, Tag};

/// Categories and tags used to label entries and fill form options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
}

impl ReferenceData {
    /// Whatever the cache holds; unreadable or missing slots come back empty.
    pub fn from_cache(cache: &ReferenceCache) -> Self {
        ReferenceData {
            categories: read_slot(cache, CacheSlot::Categories),
            tags: read_slot(cache, CacheSlot::Tags),
        }
    }

    /// Fetch both lists concurrently.
    pub fn fetch<A: FinanceApi + ?Sized>(api: &A) -> Result<Self, ApiError> {
        let (categories, tags) = thread::scope(|s| {
            let c = s.spawn(|| api.list_categories());
            let t = s.spawn(|| api.list_tags());
            (join(c), join(t))
        });
        Ok(ReferenceData {
            categories: categories?,
            tags: tags?,
        })
    }

    pub fn store(&self, cache: &ReferenceCache) -> Result<()> {
        cache.write_cache(CacheSlot::Categories, &self.categories)?;
        cache.write_cache(CacheSlot::Tags, &self.tags)?;
        Ok(())
    }

    /// Category name, or the raw id when it is not in the list.
    pub fn category_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
            .unwrap_or(id)
    }

    pub fn tag_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.tags
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.name.as_str())
            .unwrap_or(id)
    }

    pub fn default_category(&self) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| !c.deleted && c.name.starts_with("Food"))
    }

    /// Match a live category by id, then by case-insensitive name.
    pub fn resolve_category(&self, needle: &str) -> Option<&Category> {
        let needle = needle.trim();
        let live = || self.categories.iter().filter(|c| !c.deleted);
        live()
            .find(|c| c.id == needle)
            .or_else(|| live().find(|c| c.name.eq_ignore_ascii_case(needle)))
    }

    pub fn resolve_tag(&self, needle: &str) -> Option<&Tag> {
        let needle = needle.trim();
        let live = || self.tags.iter().filter(|t| !t.deleted);
        live()
            .find(|t| t.id == needle)
            .or_else(|| live().find(|t| t.name.eq_ignore_ascii_case(needle)))
    }
}

fn read_slot<T: DeserializeOwned>(cache: &ReferenceCache, slot: CacheSlot) -> Vec<T> {
    match cache.read_cached(slot) {
        Ok(v) => v.unwrap_or_default(),
        Err(err) => {
            warn!(slot = slot.key(), "ignoring cache slot: {:#}", err);
            Vec::new()
        }
    }
}

/// Join a scoped worker, re-raising its panic on the caller.
pub(crate) fn join<T>(h: ScopedJoinHandle<'_, T>) -> T {
    h.join().unwrap_or_else(|e| std::panic::resume_unwind(e))
}
