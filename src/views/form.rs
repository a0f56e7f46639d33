// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Create/edit form for a single expense.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;
use tracing::warn;

use crate::api::FinanceApi;
use crate::cache::ReferenceCache;
use crate::models::{Currency, Entry};
use crate::notify::Toast;
use crate::reference::ReferenceData;
use crate::utils::pretty_table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Amount,
    Category,
    Tags,
    Desc,
    Date,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Field::Amount => "Amount",
            Field::Category => "Category",
            Field::Tags => "Tags",
            Field::Desc => "Description",
            Field::Date => "Date",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Required(Field),
    #[error("Invalid amount '{0}', expected a positive number")]
    InvalidAmount(String),
    #[error("Category '{0}' not found")]
    UnknownCategory(String),
    #[error("Tag '{0}' not found")]
    UnknownTag(String),
}

/// Raw field values; `category` and `tags` hold ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub amount: String,
    pub category: String,
    pub tags: Vec<String>,
    pub desc: String,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Created; fields are back to their defaults for the next entry.
    Reset,
    /// Updated; the caller should go back to where it came from.
    Close,
    /// The service did not accept the entry; values are kept.
    Failed,
}

pub struct ExpenseForm {
    editing: Option<Entry>,
    today: NaiveDate,
    reference: ReferenceData,
    values: FormValues,
    focus: Field,
    loaded: bool,
    toasts: Vec<Toast>,
}

impl ExpenseForm {
    pub fn new(editing: Option<Entry>, today: NaiveDate) -> Self {
        let mut form = ExpenseForm {
            editing,
            today,
            reference: ReferenceData::default(),
            values: FormValues::default(),
            focus: Field::Amount,
            loaded: false,
            toasts: Vec::new(),
        };
        form.values = form.default_values();
        form
    }

    /// Paint from the cache, then replace with live data.
    ///
    /// On a failed fetch the cached options stay and a failure toast is queued.
    pub fn mount<A: FinanceApi + ?Sized>(&mut self, api: &A, cache: &ReferenceCache) {
        let cached = ReferenceData::from_cache(cache);
        let mut merged = self.reference.clone();
        if !cached.categories.is_empty() {
            merged.categories = cached.categories;
        }
        if !cached.tags.is_empty() {
            merged.tags = cached.tags;
        }
        self.apply_reference(merged);

        match ReferenceData::fetch(api) {
            Ok(data) => {
                if let Err(err) = data.store(cache) {
                    warn!("could not write reference cache: {:#}", err);
                }
                self.apply_reference(data);
            }
            Err(err) => {
                warn!(error = %err, "reference data refresh failed");
                self.toasts
                    .push(Toast::failure(format!("Failed to fetch data. {}", err)));
            }
        }
    }

    pub fn apply_reference(&mut self, data: ReferenceData) {
        self.reference = data;
        if self.values.category.is_empty() {
            if let Some(c) = self.reference.default_category() {
                self.values.category = c.id.clone();
            }
        }
        if !self.reference.categories.is_empty() && !self.reference.tags.is_empty() {
            self.loaded = true;
        }
    }

    /// True until both option lists have been non-empty at least once.
    pub fn is_loading(&self) -> bool {
        !self.loaded
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn take_toasts(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }

    pub fn default_values(&self) -> FormValues {
        match &self.editing {
            Some(e) => FormValues {
                amount: e.amount.abs().normalize().to_string(),
                category: e.category.clone(),
                tags: e.tags.clone(),
                desc: e.desc.clone(),
                date: Some(e.date),
            },
            None => FormValues {
                amount: String::new(),
                category: self
                    .reference
                    .default_category()
                    .map(|c| c.id.clone())
                    .unwrap_or_default(),
                tags: Vec::new(),
                desc: String::new(),
                date: Some(self.today),
            },
        }
    }

    pub fn reset(&mut self) {
        self.values = self.default_values();
        self.focus = Field::Amount;
    }

    pub fn set_amount(&mut self, amount: &str) {
        self.values.amount = amount.to_string();
        self.focus = Field::Amount;
    }

    pub fn select_category(&mut self, needle: &str) -> Result<(), FormError> {
        let c = self
            .reference
            .resolve_category(needle)
            .ok_or_else(|| FormError::UnknownCategory(needle.to_string()))?;
        self.values.category = c.id.clone();
        self.focus = Field::Category;
        Ok(())
    }

    pub fn select_tags<S: AsRef<str>>(&mut self, needles: &[S]) -> Result<(), FormError> {
        let mut ids: Vec<String> = Vec::new();
        for n in needles {
            let t = self
                .reference
                .resolve_tag(n.as_ref())
                .ok_or_else(|| FormError::UnknownTag(n.as_ref().to_string()))?;
            if !ids.contains(&t.id) {
                ids.push(t.id.clone());
            }
        }
        self.values.tags = ids;
        self.focus = Field::Tags;
        Ok(())
    }

    pub fn set_desc(&mut self, desc: &str) {
        self.values.desc = desc.to_string();
        self.focus = Field::Desc;
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.values.date = date;
        self.focus = Field::Date;
    }

    /// Check every field and return the entered magnitude.
    pub fn validate(&self) -> Result<Decimal, FormError> {
        let v = &self.values;
        if v.amount.trim().is_empty() {
            return Err(FormError::Required(Field::Amount));
        }
        if v.category.trim().is_empty() {
            return Err(FormError::Required(Field::Category));
        }
        if v.tags.is_empty() {
            return Err(FormError::Required(Field::Tags));
        }
        if v.desc.trim().is_empty() {
            return Err(FormError::Required(Field::Desc));
        }
        if v.date.is_none() {
            return Err(FormError::Required(Field::Date));
        }
        let amount = v
            .amount
            .trim()
            .parse::<Decimal>()
            .map_err(|_| FormError::InvalidAmount(v.amount.clone()))?;
        if amount <= Decimal::ZERO {
            return Err(FormError::InvalidAmount(v.amount.clone()));
        }
        Ok(amount)
    }

    /// The body to send. Expenses go out negative.
    pub fn build_entry(&self) -> Result<Entry, FormError> {
        let amount = self.validate()?;
        let date = self.values.date.ok_or(FormError::Required(Field::Date))?;
        let editing = self.editing.as_ref();
        Ok(Entry {
            id: editing.and_then(|e| e.id.clone()),
            amount: -amount,
            currency: Currency::default(),
            date,
            desc: self.values.desc.clone(),
            account: editing.and_then(|e| e.account.clone()),
            category: self.values.category.clone(),
            tags: self.values.tags.clone(),
            created: None,
            modified: editing.and_then(|e| e.modified.clone()),
            completed: None,
            deleted: None,
        })
    }

    /// Validate, then create or update. Validation errors return before any request.
    pub fn submit<A: FinanceApi + ?Sized>(&mut self, api: &A) -> Result<SubmitOutcome, FormError> {
        let entry = self.build_entry()?;
        let result = match &self.editing {
            Some(orig) => api.update_entry(orig.id.as_deref().unwrap_or_default(), &entry),
            None => api.create_entry(&entry),
        };
        match result {
            Ok(()) if self.is_editing() => {
                self.toasts.push(Toast::success("Expense updated"));
                Ok(SubmitOutcome::Close)
            }
            Ok(()) => {
                self.toasts.push(Toast::success("Expense added"));
                self.reset();
                Ok(SubmitOutcome::Reset)
            }
            Err(err) => {
                warn!(error = %err, "save failed");
                self.toasts
                    .push(Toast::failure(format!("Failed to save expense. {}", err)));
                Ok(SubmitOutcome::Failed)
            }
        }
    }

    pub fn render(&self) -> String {
        let v = &self.values;
        let mark = |f: Field| if self.focus == f { "> " } else { "  " };
        let tags: Vec<&str> = v.tags.iter().map(|t| self.reference.tag_name(t)).collect();
        let category = if v.category.is_empty() {
            ""
        } else {
            self.reference.category_name(&v.category)
        };
        let rows = vec![
            vec![format!("{}{}", mark(Field::Amount), Field::Amount), v.amount.clone()],
            vec![
                format!("{}{}", mark(Field::Category), Field::Category),
                category.to_string(),
            ],
            vec![format!("{}{}", mark(Field::Tags), Field::Tags), tags.join(", ")],
            vec![format!("{}{}", mark(Field::Desc), Field::Desc), v.desc.clone()],
            vec![
                format!("{}{}", mark(Field::Date), Field::Date),
                v.date.map(|d| d.to_string()).unwrap_or_default(),
            ],
        ];
        let title = if self.is_editing() {
            "Edit Expense"
        } else {
            "Add Expense"
        };
        let mut out = format!("{}\n", title);
        if self.is_loading() {
            out.push_str("Loading...\n");
        }
        out.push_str(&pretty_table(&["Field", "Value"], rows).to_string());
        out
    }
}
