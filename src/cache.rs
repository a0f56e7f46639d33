// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSlot {
    Categories,
    Tags,
}

impl CacheSlot {
    pub fn key(self) -> &'static str {
        match self {
            CacheSlot::Categories => "categories",
            CacheSlot::Tags => "tags",
        }
    }
}

/// Last-fetched reference lists, kept so forms can paint before the network answers.
pub struct ReferenceCache<'a> {
    conn: &'a Connection,
}

impl<'a> ReferenceCache<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        ReferenceCache { conn }
    }

    /// `None` when the slot was never written.
    pub fn read_cached<T: DeserializeOwned>(&self, slot: CacheSlot) -> Result<Option<Vec<T>>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM cache WHERE key=?1",
                params![slot.key()],
                |r| r.get(0),
            )
            .optional()?;
        match raw {
            Some(s) => {
                let v = serde_json::from_str(&s)
                    .with_context(|| format!("Corrupt cache slot '{}'", slot.key()))?;
                Ok(Some(v))
            }
            None => Ok(None),
        }
    }

    pub fn write_cache<T: Serialize>(&self, slot: CacheSlot, value: &[T]) -> Result<()> {
        let s = serde_json::to_string(value)?;
        self.conn.execute(
            "INSERT INTO cache(key, value, updated_at) VALUES(?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=excluded.updated_at",
            params![slot.key(), s],
        )?;
        Ok(())
    }

    pub fn updated_at(&self, slot: CacheSlot) -> Result<Option<String>> {
        let v = self
            .conn
            .query_row(
                "SELECT updated_at FROM cache WHERE key=?1",
                params![slot.key()],
                |r| r.get(0),
            )
            .optional()?;
        Ok(v)
    }

    pub fn clear(&self) -> Result<usize> {
        let n = self.conn.execute("DELETE FROM cache", [])?;
        Ok(n)
    }
}
