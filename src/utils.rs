// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

pub const FALLBACK_CURRENCY: &str = "USD";

const UA: &str = concat!(
    "zenfin/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/zenfin)"
);

static NON_NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9.]").unwrap());
static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]*)(?:\.([0-9]+))?").unwrap());

pub fn http_client() -> reqwest::Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()
}

/// Forgiving amount parser for user input: everything except digits and
/// `.` is dropped, then the longest leading `digits[.digits]` is read.
/// Zero when there is no such prefix.
///
/// `"£1,234.50"` is `1234.50`; `"1.2.3"` is `1.2`; `"-5"` is `5`; `"abc"` is `0`.
pub fn clean_number(s: &str) -> Decimal {
    let stripped = NON_NUMERIC.replace_all(s, "");
    let Some(caps) = LEADING_NUMBER.captures(&stripped) else {
        return Decimal::ZERO;
    };
    let whole = caps.get(1).map_or("", |m| m.as_str());
    let frac = caps.get(2).map_or("", |m| m.as_str());
    let text = match (whole.is_empty(), frac.is_empty()) {
        (true, true) => return Decimal::ZERO,
        (_, true) => whole.to_string(),
        (true, false) => format!("0.{}", frac),
        (false, false) => format!("{}.{}", whole, frac),
    };
    text.parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// `YYYY-MM-DD` at midnight UTC, or a full RFC 3339 timestamp.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    let d = parse_date(s)?;
    Ok(d.and_time(NaiveTime::MIN).and_utc())
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {:.2}", ccy, d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

// Per-user default currency
pub fn get_default_currency(conn: &Connection, user_id: &str) -> Result<String> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM user_settings WHERE user_id=?1 AND key='default_currency'",
            params![user_id],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v.filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_CURRENCY.to_string()))
}

pub fn has_default_currency(conn: &Connection, user_id: &str) -> Result<bool> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM user_settings WHERE user_id=?1 AND key='default_currency'",
        params![user_id],
        |r| r.get(0),
    )?;
    Ok(n > 0)
}

pub fn set_default_currency(conn: &Connection, user_id: &str, ccy: &str) -> Result<()> {
    let ccy = ccy.trim().to_uppercase();
    if ccy.is_empty() {
        anyhow::bail!("Currency code must not be empty");
    }
    conn.execute(
        "INSERT INTO user_settings(user_id, key, value) VALUES(?1, 'default_currency', ?2)
         ON CONFLICT(user_id, key) DO UPDATE SET value=excluded.value",
        params![user_id, ccy],
    )?;
    Ok(())
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
