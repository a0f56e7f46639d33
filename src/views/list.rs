// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Recent expenses grouped by day.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::thread;
use tracing::{debug, warn};

use crate::api::{ApiError, FinanceApi};
use crate::cache::ReferenceCache;
use crate::models::Entry;
use crate::notify::Toast;
use crate::reference::{join, ReferenceData};
use crate::utils::{fmt_money, pretty_table, round_money};
use crate::views::form::ExpenseForm;

pub const WINDOW_DAYS: i64 = 7;
pub const EMPTY_MESSAGE: &str = "No expenses found";

/// Trailing fetch window, both ends inclusive.
pub fn window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(WINDOW_DAYS), today)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayGroup {
    pub date: NaiveDate,
    pub entries: Vec<Entry>,
}

impl DayGroup {
    /// Sum of absolute amounts, rounded half-up to cents.
    pub fn total(&self) -> Decimal {
        round_money(self.entries.iter().map(|e| e.amount.abs()).sum())
    }

    pub fn title(&self, today: NaiveDate) -> String {
        if self.date == today {
            "Today".to_string()
        } else {
            self.date.format("%a, %Y-%m-%d").to_string()
        }
    }

    pub fn subtitle(&self) -> String {
        fmt_money(&self.total())
    }
}

/// Partition by date; groups appear in first-seen order and keep entry order.
pub fn group_by_date(entries: Vec<Entry>) -> Vec<DayGroup> {
    let mut groups: Vec<DayGroup> = Vec::new();
    for e in entries {
        match groups.iter_mut().find(|g| g.date == e.date) {
            Some(g) => g.entries.push(e),
            None => groups.push(DayGroup {
                date: e.date,
                entries: vec![e],
            }),
        }
    }
    groups
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    Loading,
    Empty,
    Loaded(Vec<DayGroup>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    Edit,
    Delete,
}

impl ListAction {
    pub const ALL: [ListAction; 2] = [ListAction::Edit, ListAction::Delete];

    pub fn title(self) -> &'static str {
        match self {
            ListAction::Edit => "Edit Expense",
            ListAction::Delete => "Delete",
        }
    }

    pub fn shortcut(self) -> &'static str {
        match self {
            ListAction::Edit => "enter",
            ListAction::Delete => "ctrl+x",
        }
    }
}

/// The detail pane shown next to a selected row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryDetail {
    pub date: NaiveDate,
    pub amount: String,
    pub category: String,
    pub tags: Vec<String>,
    pub desc: String,
}

pub struct ListView<'a, A: FinanceApi + ?Sized> {
    api: &'a A,
    cache: &'a ReferenceCache<'a>,
    today: NaiveDate,
    state: ListState,
    reference: ReferenceData,
    toasts: Vec<Toast>,
}

impl<'a, A: FinanceApi + ?Sized> ListView<'a, A> {
    pub fn new(api: &'a A, cache: &'a ReferenceCache<'a>, today: NaiveDate) -> Self {
        ListView {
            api,
            cache,
            today,
            state: ListState::Loading,
            reference: ReferenceData::from_cache(cache),
            toasts: Vec::new(),
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn take_toasts(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }

    /// Reload reference data and the entry window.
    ///
    /// A failed reference fetch leaves the previous lists in place and queues a
    /// failure toast. A failed entry fetch is returned and the view stays `Loading`.
    pub fn refresh(&mut self) -> Result<(), ApiError> {
        self.state = ListState::Loading;
        let (from, to) = window(self.today);
        let api = self.api;
        let (reference, entries) = thread::scope(|s| {
            let r = s.spawn(|| ReferenceData::fetch(api));
            let e = s.spawn(|| api.list_entries(from, to));
            (join(r), join(e))
        });

        match reference {
            Ok(data) => {
                if let Err(err) = data.store(self.cache) {
                    warn!("could not write reference cache: {:#}", err);
                }
                self.reference = data;
            }
            Err(err) => {
                warn!(error = %err, "reference data refresh failed");
                self.toasts
                    .push(Toast::failure(format!("Failed to fetch data. {}", err)));
            }
        }

        let entries = entries?;
        debug!(count = entries.len(), %from, %to, "entries loaded");
        self.state = if entries.is_empty() {
            ListState::Empty
        } else {
            ListState::Loaded(group_by_date(entries))
        };
        Ok(())
    }

    pub fn groups(&self) -> &[DayGroup] {
        match &self.state {
            ListState::Loaded(groups) => groups,
            _ => &[],
        }
    }

    pub fn find(&self, id: &str) -> Option<&Entry> {
        self.groups()
            .iter()
            .flat_map(|g| g.entries.iter())
            .find(|e| e.id.as_deref() == Some(id))
    }

    pub fn detail(&self, entry: &Entry) -> EntryDetail {
        EntryDetail {
            date: entry.date,
            amount: fmt_money(&entry.amount),
            category: self.reference.category_name(&entry.category).to_string(),
            tags: entry
                .tags
                .iter()
                .map(|t| self.reference.tag_name(t).to_string())
                .collect(),
            desc: entry.desc.clone(),
        }
    }

    /// Form pre-filled with the entry, seeded with this view's reference data.
    pub fn edit_form(&self, id: &str) -> Option<ExpenseForm> {
        let entry = self.find(id)?.clone();
        let mut form = ExpenseForm::new(Some(entry), self.today);
        form.apply_reference(self.reference.clone());
        Some(form)
    }

    /// Fire the delete, then reload whatever the outcome.
    pub fn delete(&mut self, id: &str) -> Result<(), ApiError> {
        if let Err(err) = self.api.delete_entry(id) {
            warn!(id, error = %err, "delete failed");
            self.toasts
                .push(Toast::failure(format!("Failed to delete expense. {}", err)));
        }
        self.refresh()
    }

    pub fn render(&self) -> String {
        let groups = match &self.state {
            ListState::Loading => return "Loading...".to_string(),
            ListState::Empty => return EMPTY_MESSAGE.to_string(),
            ListState::Loaded(groups) => groups,
        };
        let mut out = String::new();
        for g in groups {
            let rows = g
                .entries
                .iter()
                .map(|e| {
                    vec![
                        e.id.clone().unwrap_or_default(),
                        e.desc.clone(),
                        fmt_money(&e.amount),
                    ]
                })
                .collect();
            out.push_str(&format!("{}  {}\n", g.title(self.today), g.subtitle()));
            out.push_str(&pretty_table(&["ID", "Description", "Amount"], rows).to_string());
            out.push('\n');
        }
        let hints: Vec<String> = ListAction::ALL
            .iter()
            .map(|a| format!("{}: {}", a.shortcut(), a.title()))
            .collect();
        out.push_str(&hints.join("   "));
        out
    }

    pub fn render_detail(&self, entry: &Entry) -> String {
        let d = self.detail(entry);
        let rows = vec![
            vec!["Date".to_string(), d.date.to_string()],
            vec!["Amount".to_string(), d.amount],
            vec!["Category".to_string(), d.category],
            vec!["Tags".to_string(), d.tags.join(", ")],
            vec!["Description".to_string(), d.desc],
        ];
        pretty_table(&["Field", "Value"], rows).to_string()
    }
}
