// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use thiserror::Error;

use crate::api::DEFAULT_BASE_URL;
use crate::utils::get_setting;

pub const TOKEN_ENV: &str = "SPENDCLIP_TOKEN";
pub const BASE_URL_ENV: &str = "SPENDCLIP_BASE_URL";
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "No API token configured; pass --token, set SPENDCLIP_TOKEN, or run `spendclip config set-token`"
    )]
    MissingToken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub token: String,
}

impl Config {
    /// `--token`/env first, then the stored setting.
    pub fn resolve(conn: &Connection, m: &clap::ArgMatches) -> Result<Config> {
        let base_url = m
            .get_one::<String>("base_url")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let from_args = m
            .get_one::<String>("token")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let token = match from_args {
            Some(t) => t,
            None => get_setting(conn, TOKEN_KEY)?
                .filter(|s| !s.is_empty())
                .ok_or(ConfigError::MissingToken)?,
        };
        Ok(Config { base_url, token })
    }
}

pub fn mask_token(token: &str) -> String {
    let n = token.chars().count();
    if n <= 4 {
        return "*".repeat(n);
    }
    let tail: String = token.chars().skip(n - 4).collect();
    format!("{}{}", "*".repeat(n - 4), tail)
}
