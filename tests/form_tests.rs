// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{day, entry, today, Call, FakeApi};
use rust_decimal::Decimal;
use spendclip::cache::{CacheSlot, ReferenceCache};
use spendclip::notify::ToastStyle;
use spendclip::reference::ReferenceData;
use spendclip::views::form::{ExpenseForm, Field, FormError, SubmitOutcome};
use spendclip::views::list::ListView;

fn mounted(api: &FakeApi, cache: &ReferenceCache) -> ExpenseForm {
    let mut form = ExpenseForm::new(None, today());
    form.mount(api, cache);
    form
}

fn fill(form: &mut ExpenseForm, amount: &str) {
    form.set_amount(amount);
    form.select_tags(&["Lunch", "work"]).unwrap();
    form.set_desc("Nasi lemak");
}

#[test]
fn entered_amount_is_stored_negated() {
    let api = FakeApi::new(vec![]);
    let conn = common::conn();
    let cache = ReferenceCache::new(&conn);
    let mut form = mounted(&api, &cache);
    for (input, cents) in [("12.5", 1250), ("0.01", 1), ("100", 10000), (" 7.25 ", 725)] {
        fill(&mut form, input);
        let e = form.build_entry().unwrap();
        assert_eq!(e.amount, Decimal::new(-cents, 2), "input {}", input);
    }
}

#[test]
fn create_body_uses_defaults_and_fixed_currency() {
    let api = FakeApi::new(vec![]);
    let conn = common::conn();
    let cache = ReferenceCache::new(&conn);
    let mut form = mounted(&api, &cache);
    assert!(!form.is_loading());
    assert_eq!(form.values().category, "c-food");
    assert_eq!(form.values().date, Some(today()));

    fill(&mut form, "12.5");
    let e = form.build_entry().unwrap();
    assert_eq!(e.id, None);
    assert_eq!(e.modified, None);
    assert_eq!(e.currency.code, "MYR");
    assert_eq!(e.category, "c-food");
    assert_eq!(e.tags, vec!["t-lunch", "t-work"]);
    assert_eq!(e.desc, "Nasi lemak");
    assert_eq!(e.date, today());
}

#[test]
fn empty_description_is_rejected_before_any_request() {
    let api = FakeApi::new(vec![]);
    let conn = common::conn();
    let cache = ReferenceCache::new(&conn);
    let mut form = mounted(&api, &cache);
    fill(&mut form, "12.5");
    form.set_desc("   ");
    assert_eq!(form.submit(&api), Err(FormError::Required(Field::Desc)));
    assert!(api.saves().is_empty());
}

#[test]
fn every_field_is_required() {
    let api = FakeApi::new(vec![]);
    let conn = common::conn();
    let cache = ReferenceCache::new(&conn);

    let form = mounted(&api, &cache);
    assert_eq!(form.validate(), Err(FormError::Required(Field::Amount)));

    let mut form = mounted(&api, &cache);
    form.set_amount("3");
    assert_eq!(form.validate(), Err(FormError::Required(Field::Tags)));

    let mut form = mounted(&api, &cache);
    fill(&mut form, "3");
    form.set_date(None);
    assert_eq!(form.validate(), Err(FormError::Required(Field::Date)));

    // no Food* category to default to
    let mut api = FakeApi::new(vec![]);
    api.categories.retain(|c| c.id != "c-food");
    let conn = common::conn();
    let cache = ReferenceCache::new(&conn);
    let mut form = mounted(&api, &cache);
    fill(&mut form, "3");
    assert_eq!(form.validate(), Err(FormError::Required(Field::Category)));
}

#[test]
fn malformed_or_non_positive_amounts_are_rejected() {
    let api = FakeApi::new(vec![]);
    let conn = common::conn();
    let cache = ReferenceCache::new(&conn);
    let mut form = mounted(&api, &cache);
    for bad in ["abc", "NaN", "inf", "0", "-5", "1,50"] {
        fill(&mut form, bad);
        assert_eq!(
            form.submit(&api),
            Err(FormError::InvalidAmount(bad.to_string())),
            "input {}",
            bad
        );
    }
    assert!(api.saves().is_empty());
}

#[test]
fn unknown_category_or_tag_is_an_error() {
    let api = FakeApi::new(vec![]);
    let conn = common::conn();
    let cache = ReferenceCache::new(&conn);
    let mut form = mounted(&api, &cache);
    assert_eq!(
        form.select_category("Travel"),
        Err(FormError::UnknownCategory("Travel".to_string()))
    );
    assert_eq!(
        form.select_tags(&["Lunch", "Ghost"]),
        Err(FormError::UnknownTag("Ghost".to_string()))
    );
    form.select_category("leisure").unwrap();
    assert_eq!(form.values().category, "c-fun");
}

#[test]
fn successful_create_resets_fields_and_stays_open() {
    let api = FakeApi::new(vec![]);
    let conn = common::conn();
    let cache = ReferenceCache::new(&conn);
    let mut form = mounted(&api, &cache);
    fill(&mut form, "12.5");
    form.select_category("c-fun").unwrap();
    form.set_date(Some(day(12)));

    assert_eq!(form.submit(&api), Ok(SubmitOutcome::Reset));

    let v = form.values();
    assert_eq!(v.amount, "");
    assert_eq!(v.category, "c-food");
    assert!(v.tags.is_empty());
    assert_eq!(v.desc, "");
    assert_eq!(v.date, Some(today()));
    assert_eq!(form.focus(), Field::Amount);

    let toasts = form.take_toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].style, ToastStyle::Success);
    assert_eq!(toasts[0].title, "Expense added");
    assert_eq!(api.saves().len(), 1);
}

#[test]
fn unchanged_edit_echoes_id_and_modified() {
    let original = entry("42", day(14), -1999, "c-fun", &["t-movie"]);
    let api = FakeApi::new(vec![original.clone()]);
    let conn = common::conn();
    let cache = ReferenceCache::new(&conn);
    let mut form = ExpenseForm::new(Some(original.clone()), today());
    form.mount(&api, &cache);

    assert_eq!(form.submit(&api), Ok(SubmitOutcome::Close));

    match api.saves().as_slice() {
        [Call::Update(id, body)] => {
            assert_eq!(id, "42");
            assert_eq!(body.id, original.id);
            assert_eq!(body.modified, original.modified);
            assert_eq!(body.amount, original.amount);
            assert_eq!(body.category, original.category);
            assert_eq!(body.tags, original.tags);
            assert_eq!(body.date, original.date);
        }
        other => panic!("unexpected saves {:?}", other),
    }
    assert_eq!(form.take_toasts()[0].title, "Expense updated");
}

#[test]
fn failed_save_keeps_values_and_reports() {
    let mut api = FakeApi::new(vec![]);
    api.fail_save = true;
    let conn = common::conn();
    let cache = ReferenceCache::new(&conn);
    let mut form = mounted(&api, &cache);
    fill(&mut form, "12.5");

    assert_eq!(form.submit(&api), Ok(SubmitOutcome::Failed));
    assert_eq!(form.values().amount, "12.5");
    let toasts = form.take_toasts();
    assert_eq!(toasts[0].style, ToastStyle::Failure);
    assert!(toasts[0].title.starts_with("Failed to save expense."));
}

#[test]
fn cached_options_survive_a_failed_fetch() {
    let mut api = FakeApi::new(vec![]);
    api.fail_reference = true;
    let conn = common::conn();
    let cache = ReferenceCache::new(&conn);
    let snapshot = ReferenceData {
        categories: common::categories(),
        tags: common::tags(),
    };
    snapshot.store(&cache).unwrap();

    let mut form = mounted(&api, &cache);
    assert_eq!(form.reference(), &snapshot);
    assert!(!form.is_loading());
    assert_eq!(form.values().category, "c-food");
    let toasts = form.take_toasts();
    assert!(toasts[0].title.starts_with("Failed to fetch data."));
}

#[test]
fn stays_loading_without_cache_or_network() {
    let mut api = FakeApi::new(vec![]);
    api.fail_reference = true;
    let conn = common::conn();
    let cache = ReferenceCache::new(&conn);
    let form = mounted(&api, &cache);
    assert!(form.is_loading());
    assert!(form.render().contains("Loading..."));
}

#[test]
fn live_fetch_replaces_cached_options_and_cache() {
    let api = FakeApi::new(vec![]);
    let conn = common::conn();
    let cache = ReferenceCache::new(&conn);
    cache
        .write_cache(CacheSlot::Tags, &common::tags()[..1])
        .unwrap();
    let form = mounted(&api, &cache);
    assert_eq!(form.reference().tags, common::tags());
    let cached: Vec<spendclip::models::Tag> = cache.read_cached(CacheSlot::Tags).unwrap().unwrap();
    assert_eq!(cached, common::tags());
}

#[test]
fn created_entry_shows_up_in_the_list() {
    let api = FakeApi::new(vec![]);
    let conn = common::conn();
    let cache = ReferenceCache::new(&conn);
    let mut form = mounted(&api, &cache);
    form.set_amount("8");
    form.select_category("Leisure").unwrap();
    form.select_tags(&["Movies"]).unwrap();
    form.set_desc("Cinema");
    form.set_date(Some(day(13)));
    assert_eq!(form.submit(&api), Ok(SubmitOutcome::Reset));

    let mut view = ListView::new(&api, &cache, today());
    view.refresh().unwrap();
    let listed = &view.groups()[0].entries[0];
    assert!(listed.amount < Decimal::ZERO);
    assert_eq!(listed.amount, Decimal::new(-8, 0));
    assert_eq!(listed.category, "c-fun");
    assert_eq!(listed.tags, vec!["t-movie"]);
}

#[test]
fn render_resolves_names_and_marks_focus() {
    let api = FakeApi::new(vec![]);
    let conn = common::conn();
    let cache = ReferenceCache::new(&conn);
    let mut form = mounted(&api, &cache);
    fill(&mut form, "12.5");
    let out = form.render();
    assert!(out.starts_with("Add Expense"));
    assert!(out.contains("Food & Drinks"));
    assert!(out.contains("Lunch, Work"));
    assert!(out.contains("> Description"));
}
