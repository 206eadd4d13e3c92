// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use rusqlite::Connection;
use serde::Serialize;

use super::{Session, or_blank, req};
use crate::store::RecordStore;

pub fn handle(conn: &Connection, s: &Session, m: &clap::ArgMatches) -> Result<()> {
    let Some((kind, sub)) = m.subcommand() else {
        return Ok(());
    };
    let fmt = req(sub, "format")?.to_lowercase();
    let out = req(sub, "out")?;
    let user = s.user_id.as_str();

    let n = match kind {
        "income" => {
            let rows = conn.list_income(user)?;
            write_rows(&fmt, out, &rows, &["id", "source", "amount", "category", "frequency", "currency", "day_of_month"], |r| {
                vec![
                    r.id.to_string(),
                    r.source.clone(),
                    r.amount.to_string(),
                    r.category.clone(),
                    r.frequency.as_str().to_string(),
                    or_blank(&r.currency),
                    r.day_of_month.map(|d| d.to_string()).unwrap_or_default(),
                ]
            })?
        }
        "outgoings" => {
            let rows = conn.list_outgoings(user)?;
            write_rows(&fmt, out, &rows, &["id", "description", "amount", "category", "date", "frequency", "currency", "is_recurring", "day_of_month"], |r| {
                vec![
                    r.id.to_string(),
                    r.description.clone(),
                    r.amount.to_string(),
                    r.category.clone(),
                    r.date.clone(),
                    r.frequency.as_str().to_string(),
                    or_blank(&r.currency),
                    r.is_recurring.to_string(),
                    r.day_of_month.map(|d| d.to_string()).unwrap_or_default(),
                ]
            })?
        }
        "savings" => {
            let rows = conn.list_savings(user)?;
            write_rows(&fmt, out, &rows, &["id", "name", "balance", "target", "category", "currency"], |r| {
                vec![
                    r.id.to_string(),
                    r.name.clone(),
                    r.balance.to_string(),
                    r.target.map(|t| t.to_string()).unwrap_or_default(),
                    r.category.clone(),
                    or_blank(&r.currency),
                ]
            })?
        }
        "debt" => {
            let rows = conn.list_debt(user)?;
            write_rows(&fmt, out, &rows, &["id", "name", "balance", "interest_rate", "min_payment", "priority", "deadline", "currency"], |r| {
                vec![
                    r.id.to_string(),
                    r.name.clone(),
                    r.balance.to_string(),
                    r.interest_rate.to_string(),
                    r.min_payment.to_string(),
                    r.priority.as_str().to_string(),
                    or_blank(&r.deadline),
                    or_blank(&r.currency),
                ]
            })?
        }
        "wishlist" => {
            let rows = conn.list_wishlist(user)?;
            write_rows(&fmt, out, &rows, &["id", "item", "cost", "saved", "priority", "deadline", "currency"], |r| {
                vec![
                    r.id.to_string(),
                    r.item.clone(),
                    r.cost.to_string(),
                    r.saved.to_string(),
                    r.priority.as_str().to_string(),
                    or_blank(&r.deadline),
                    or_blank(&r.currency),
                ]
            })?
        }
        "accounts" => {
            let rows = conn.list_accounts(user)?;
            write_rows(&fmt, out, &rows, &["id", "name", "type", "balance", "currency"], |r| {
                vec![
                    r.id.to_string(),
                    r.name.clone(),
                    r.account_type.as_str().to_string(),
                    r.balance.to_string(),
                    or_blank(&r.currency),
                ]
            })?
        }
        "spending" => {
            let rows = conn.list_spending_log(user)?;
            write_rows(&fmt, out, &rows, &["id", "date", "description", "amount", "currency", "category"], |r| {
                vec![
                    r.id.to_string(),
                    r.date.to_rfc3339(),
                    r.description.clone(),
                    r.amount.to_string(),
                    or_blank(&r.currency),
                    r.category.clone(),
                ]
            })?
        }
        other => bail!("Unknown export kind: {}", other),
    };
    println!("Exported {} {} row(s) to {}", n, kind, out);
    Ok(())
}

fn write_rows<T: Serialize>(
    fmt: &str,
    out: &str,
    rows: &[T],
    headers: &[&str],
    to_record: impl Fn(&T) -> Vec<String>,
) -> Result<usize> {
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Failed to create {}", out))?;
            wtr.write_record(headers)?;
            for r in rows {
                wtr.write_record(to_record(r))?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(rows)?)
                .with_context(|| format!("Failed to write {}", out))?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    Ok(rows.len())
}
