// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use reqwest::blocking::{Client, Request, RequestBuilder, Response};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::models::{Category, Entry, Tag};
use crate::utils::http_client;

pub const DEFAULT_BASE_URL: &str = "https://api.toshl.com";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Operations the views need from the finance service.
pub trait FinanceApi: Sync {
    fn list_categories(&self) -> Result<Vec<Category>, ApiError>;
    fn list_tags(&self) -> Result<Vec<Tag>, ApiError>;
    /// Both bounds inclusive.
    fn list_entries(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Entry>, ApiError>;
    fn create_entry(&self, entry: &Entry) -> Result<(), ApiError>;
    fn update_entry(&self, id: &str, entry: &Entry) -> Result<(), ApiError>;
    fn delete_entry(&self, id: &str) -> Result<(), ApiError>;
}

#[derive(Debug, Clone, Copy)]
pub enum ApiCall<'a> {
    ListCategories,
    ListTags,
    ListEntries { from: NaiveDate, to: NaiveDate },
    CreateEntry(&'a Entry),
    UpdateEntry { id: &'a str, entry: &'a Entry },
    DeleteEntry(&'a str),
}

impl ApiCall<'_> {
    pub fn method(&self) -> Method {
        match self {
            ApiCall::ListCategories | ApiCall::ListTags | ApiCall::ListEntries { .. } => {
                Method::GET
            }
            ApiCall::CreateEntry(_) => Method::POST,
            ApiCall::UpdateEntry { .. } => Method::PUT,
            ApiCall::DeleteEntry(_) => Method::DELETE,
        }
    }

    pub fn path(&self) -> String {
        match self {
            ApiCall::ListCategories => "/categories".to_string(),
            ApiCall::ListTags => "/tags".to_string(),
            ApiCall::ListEntries { .. } | ApiCall::CreateEntry(_) => "/entries".to_string(),
            ApiCall::UpdateEntry { id, .. } | ApiCall::DeleteEntry(id) => {
                format!("/entries/{}", id)
            }
        }
    }
}

pub struct ToshlClient {
    http: Client,
    base_url: String,
    token: String,
}

impl ToshlClient {
    pub fn new(base_url: &str, token: &str) -> anyhow::Result<Self> {
        Ok(ToshlClient {
            http: http_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Build the request for `call` without sending it.
    pub fn prepare(&self, call: &ApiCall) -> Result<Request, ApiError> {
        Ok(self.builder(call).build()?)
    }

    fn builder(&self, call: &ApiCall) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, call.path());
        let rb = self
            .http
            .request(call.method(), url)
            .bearer_auth(&self.token);
        match call {
            ApiCall::ListEntries { from, to } => {
                rb.query(&[("from", from.to_string()), ("to", to.to_string())])
            }
            ApiCall::CreateEntry(entry) | ApiCall::UpdateEntry { entry, .. } => rb.json(entry),
            _ => rb,
        }
    }

    fn send(&self, call: &ApiCall) -> Result<Response, ApiError> {
        let req = self.prepare(call)?;
        debug!(method = %req.method(), url = %req.url(), "api request");
        let resp = self.http.execute(req)?;
        debug!(status = %resp.status(), "api response");
        Ok(resp)
    }

    fn fetch_json<T: DeserializeOwned>(&self, call: &ApiCall) -> Result<T, ApiError> {
        let resp = expect_status(self.send(call)?, |s| s.is_success())?;
        let text = resp.text()?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Creates and updates only count as saved on 200 or 201.
fn is_saved(status: StatusCode) -> bool {
    status == StatusCode::OK || status == StatusCode::CREATED
}

fn expect_status(resp: Response, ok: impl Fn(StatusCode) -> bool) -> Result<Response, ApiError> {
    let status = resp.status();
    if ok(status) {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    Err(ApiError::Status { status, body })
}

impl FinanceApi for ToshlClient {
    fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.fetch_json(&ApiCall::ListCategories)
    }

    fn list_tags(&self) -> Result<Vec<Tag>, ApiError> {
        self.fetch_json(&ApiCall::ListTags)
    }

    fn list_entries(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Entry>, ApiError> {
        self.fetch_json(&ApiCall::ListEntries { from, to })
    }

    fn create_entry(&self, entry: &Entry) -> Result<(), ApiError> {
        expect_status(self.send(&ApiCall::CreateEntry(entry))?, is_saved)?;
        Ok(())
    }

    fn update_entry(&self, id: &str, entry: &Entry) -> Result<(), ApiError> {
        expect_status(self.send(&ApiCall::UpdateEntry { id, entry })?, is_saved)?;
        Ok(())
    }

    fn delete_entry(&self, id: &str) -> Result<(), ApiError> {
        expect_status(self.send(&ApiCall::DeleteEntry(id))?, |s| s.is_success())?;
        Ok(())
    }
}
