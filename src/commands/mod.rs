// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod advise;
pub mod dashboard;
pub mod debt;
pub mod doctor;
pub mod exporter;
pub mod income;
pub mod notifications;
pub mod outgoings;
pub mod savings;
pub mod settings;
pub mod spending;
pub mod wishlist;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::utils::{clean_number, get_default_currency};

/// Who is acting and when. `now` is taken once per invocation.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub now: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            now,
        }
    }

    pub fn default_currency(&self, conn: &Connection) -> Result<String> {
        get_default_currency(conn, &self.user_id)
    }
}

pub(crate) fn req<'a>(m: &'a clap::ArgMatches, id: &str) -> Result<&'a String> {
    m.get_one::<String>(id)
        .with_context(|| format!("Missing required argument --{}", id))
}

pub(crate) fn opt(m: &clap::ArgMatches, id: &str) -> Option<String> {
    m.get_one::<String>(id).cloned()
}

pub(crate) fn req_id(m: &clap::ArgMatches) -> Result<i64> {
    m.get_one::<i64>("id").copied().context("Missing record id")
}

pub(crate) fn amount(m: &clap::ArgMatches, id: &str) -> Option<Decimal> {
    m.get_one::<String>(id).map(|s| clean_number(s))
}

pub(crate) fn parsed<T>(m: &clap::ArgMatches, id: &str) -> Result<Option<T>>
where
    T: FromStr<Err = crate::error::Error>,
{
    m.get_one::<String>(id)
        .map(|s| s.parse::<T>())
        .transpose()
        .map_err(Into::into)
}

pub(crate) fn or_blank(v: &Option<String>) -> String {
    v.clone().unwrap_or_default()
}
