// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Currency code attached to every entry this client writes.
pub const CURRENCY_CODE: &str = "MYR";
/// Prefix used when showing amounts.
pub const CURRENCY_PREFIX: &str = "RM";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,
}

impl Default for Currency {
    fn default() -> Self {
        Currency {
            code: CURRENCY_CODE.to_string(),
        }
    }
}

/// A single transaction as stored by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default)]
    pub currency: Currency,
    pub date: NaiveDate,
    #[serde(default)]
    pub desc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    // Echoed back untouched on update; the server rejects stale values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    #[serde(default)]
    pub entries: u64,
    #[serde(default)]
    pub tags: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub modified: String,
    #[serde(default)]
    pub r#type: String,
    #[serde(default, deserialize_with = "flag")]
    pub deleted: bool,
    #[serde(default)]
    pub counts: CategoryCounts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub modified: String,
    #[serde(default)]
    pub r#type: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default, deserialize_with = "flag")]
    pub deleted: bool,
}

/// The service reports `deleted` as a boolean on some resources and as 0/1 on others.
fn flag<'de, D>(d: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Num(i64),
    }
    Ok(match Flag::deserialize(d)? {
        Flag::Bool(b) => b,
        Flag::Num(n) => n != 0,
    })
}
