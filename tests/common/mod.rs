// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use chrono::NaiveDate;
use reqwest::StatusCode;
use rusqlite::Connection;
use rust_decimal::Decimal;
use spendclip::api::{ApiError, FinanceApi};
use spendclip::models::{Category, CategoryCounts, Currency, Entry, Tag};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListCategories,
    ListTags,
    ListEntries(NaiveDate, NaiveDate),
    Create(Entry),
    Update(String, Entry),
    Delete(String),
}

/// In-memory stand-in for the finance service that records every call.
#[derive(Default)]
pub struct FakeApi {
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    pub entries: Mutex<Vec<Entry>>,
    pub fail_reference: bool,
    pub fail_entries: bool,
    pub fail_save: bool,
    pub fail_delete: bool,
    pub calls: Mutex<Vec<Call>>,
}

fn server_error() -> ApiError {
    ApiError::Status {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: "boom".to_string(),
    }
}

impl FakeApi {
    pub fn new(entries: Vec<Entry>) -> Self {
        FakeApi {
            categories: categories(),
            tags: tags(),
            entries: Mutex::new(entries),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn saves(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Create(_) | Call::Update(..)))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl FinanceApi for FakeApi {
    fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.record(Call::ListCategories);
        if self.fail_reference {
            return Err(server_error());
        }
        Ok(self.categories.clone())
    }

    fn list_tags(&self) -> Result<Vec<Tag>, ApiError> {
        self.record(Call::ListTags);
        if self.fail_reference {
            return Err(server_error());
        }
        Ok(self.tags.clone())
    }

    fn list_entries(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Entry>, ApiError> {
        self.record(Call::ListEntries(from, to));
        if self.fail_entries {
            return Err(server_error());
        }
        let all = self.entries.lock().unwrap();
        Ok(all
            .iter()
            .filter(|e| e.date >= from && e.date <= to)
            .cloned()
            .collect())
    }

    fn create_entry(&self, entry: &Entry) -> Result<(), ApiError> {
        self.record(Call::Create(entry.clone()));
        if self.fail_save {
            return Err(server_error());
        }
        let mut all = self.entries.lock().unwrap();
        let mut stored = entry.clone();
        stored.id = Some(format!("new-{}", all.len() + 1));
        stored.modified = Some("2025-01-15 12:00:00.000".to_string());
        all.push(stored);
        Ok(())
    }

    fn update_entry(&self, id: &str, entry: &Entry) -> Result<(), ApiError> {
        self.record(Call::Update(id.to_string(), entry.clone()));
        if self.fail_save {
            return Err(server_error());
        }
        let mut all = self.entries.lock().unwrap();
        if let Some(slot) = all.iter_mut().find(|e| e.id.as_deref() == Some(id)) {
            *slot = entry.clone();
        }
        Ok(())
    }

    fn delete_entry(&self, id: &str) -> Result<(), ApiError> {
        self.record(Call::Delete(id.to_string()));
        if self.fail_delete {
            return Err(server_error());
        }
        self.entries
            .lock()
            .unwrap()
            .retain(|e| e.id.as_deref() != Some(id));
        Ok(())
    }
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
}

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
}

pub fn conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    spendclip::db::init_schema(&conn).unwrap();
    conn
}

fn category(id: &str, name: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        modified: "2024-12-01 08:00:00.000".to_string(),
        r#type: "expense".to_string(),
        deleted: false,
        counts: CategoryCounts {
            entries: 3,
            tags: 2,
        },
    }
}

fn tag(id: &str, name: &str, category: &str) -> Tag {
    Tag {
        id: id.to_string(),
        name: name.to_string(),
        modified: "2024-12-01 08:00:00.000".to_string(),
        r#type: "expense".to_string(),
        category: category.to_string(),
        count: 1,
        deleted: false,
    }
}

pub fn categories() -> Vec<Category> {
    vec![
        category("c-rent", "Rent"),
        category("c-food", "Food & Drinks"),
        category("c-fun", "Leisure"),
    ]
}

pub fn tags() -> Vec<Tag> {
    vec![
        tag("t-lunch", "Lunch", "c-food"),
        tag("t-work", "Work", "c-food"),
        tag("t-movie", "Movies", "c-fun"),
    ]
}

/// `cents` is the signed stored amount in hundredths.
pub fn entry(id: &str, date: NaiveDate, cents: i64, category: &str, tags: &[&str]) -> Entry {
    Entry {
        id: Some(id.to_string()),
        amount: Decimal::new(cents, 2),
        currency: Currency::default(),
        date,
        desc: format!("entry {}", id),
        account: Some("acc-1".to_string()),
        category: category.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        created: Some("2025-01-10 09:00:00.000".to_string()),
        modified: Some(format!("2025-01-10 09:00:00.{}", id)),
        completed: None,
        deleted: None,
    }
}
