// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::api::FinanceApi;
use crate::cache::ReferenceCache;
use crate::notify;
use crate::utils::{maybe_print_json, parse_date};
use crate::views::form::{ExpenseForm, SubmitOutcome};
use crate::views::list::{ListView, WINDOW_DAYS};

pub fn list<A: FinanceApi + ?Sized>(
    api: &A,
    cache: &ReferenceCache,
    today: NaiveDate,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let mut view = ListView::new(api, cache, today);
    let loaded = view.refresh();
    notify::flush(&mut view.take_toasts());
    loaded.context("Failed to load expenses")?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view.groups())? {
        println!("{}", view.render());
    }
    Ok(())
}

pub fn show<A: FinanceApi + ?Sized>(
    api: &A,
    cache: &ReferenceCache,
    today: NaiveDate,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let mut view = ListView::new(api, cache, today);
    let loaded = view.refresh();
    notify::flush(&mut view.take_toasts());
    loaded.context("Failed to load expenses")?;
    let entry = view.find(id).with_context(|| not_listed(id))?;
    if !maybe_print_json(
        sub.get_flag("json"),
        sub.get_flag("jsonl"),
        &view.detail(entry),
    )? {
        println!("{}", view.render_detail(entry));
    }
    Ok(())
}

pub fn add<A: FinanceApi + ?Sized>(
    api: &A,
    cache: &ReferenceCache,
    today: NaiveDate,
    sub: &clap::ArgMatches,
) -> Result<SubmitOutcome> {
    let mut form = ExpenseForm::new(None, today);
    form.mount(api, cache);
    notify::flush(&mut form.take_toasts());
    fill_form(&mut form, sub)?;
    let outcome = form.submit(api)?;
    notify::flush(&mut form.take_toasts());
    Ok(outcome)
}

/// Edit a listed entry, then show the refreshed list once the form closes.
pub fn edit<A: FinanceApi + ?Sized>(
    api: &A,
    cache: &ReferenceCache,
    today: NaiveDate,
    sub: &clap::ArgMatches,
) -> Result<SubmitOutcome> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let mut view = ListView::new(api, cache, today);
    let loaded = view.refresh();
    notify::flush(&mut view.take_toasts());
    loaded.context("Failed to load expenses")?;

    let mut form = view.edit_form(id).with_context(|| not_listed(id))?;
    form.mount(api, cache);
    notify::flush(&mut form.take_toasts());
    fill_form(&mut form, sub)?;
    let outcome = form.submit(api)?;
    notify::flush(&mut form.take_toasts());

    if outcome == SubmitOutcome::Close {
        let reloaded = view.refresh();
        notify::flush(&mut view.take_toasts());
        reloaded.context("Failed to reload expenses")?;
        println!("{}", view.render());
    }
    Ok(outcome)
}

pub fn delete<A: FinanceApi + ?Sized>(
    api: &A,
    cache: &ReferenceCache,
    today: NaiveDate,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let mut view = ListView::new(api, cache, today);
    let reloaded = view.delete(id);
    notify::flush(&mut view.take_toasts());
    reloaded.context("Failed to reload expenses")?;
    println!("{}", view.render());
    Ok(())
}

fn fill_form(form: &mut ExpenseForm, sub: &clap::ArgMatches) -> Result<()> {
    if let Some(amount) = sub.get_one::<String>("amount") {
        form.set_amount(amount);
    }
    if let Some(category) = sub.get_one::<String>("category") {
        form.select_category(category)?;
    }
    let tags: Vec<String> = sub
        .get_many::<String>("tag")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();
    if !tags.is_empty() {
        form.select_tags(&tags)?;
    }
    if let Some(desc) = sub.get_one::<String>("desc") {
        form.set_desc(desc);
    }
    if let Some(date) = sub.get_one::<String>("date") {
        form.set_date(Some(parse_date(date)?));
    }
    Ok(())
}

fn not_listed(id: &str) -> String {
    format!(
        "Expense '{}' not found in the last {} days",
        id, WINDOW_DAYS
    )
}
