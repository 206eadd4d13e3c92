// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use super::{Session, amount, opt, req, req_id};
use crate::ledger::{self, NewSpending, RecordKind};
use crate::partition::resolve_currency;
use crate::store::RecordStore;
use crate::utils::{fmt_money, maybe_print_json, parse_timestamp, pretty_table};

pub fn handle(conn: &Connection, s: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let date = match sub.get_one::<String>("date") {
                Some(d) => parse_timestamp(d)?,
                None => s.now,
            };
            let n = NewSpending {
                description: req(sub, "description")?.clone(),
                amount: amount(sub, "amount").unwrap_or_default(),
                currency: opt(sub, "currency"),
                category: opt(sub, "category").unwrap_or_else(|| "Other".into()),
                date,
            };
            let rec = ledger::add_spending(conn, &s.user_id, &n)?;
            println!("Logged #{} '{}' ({})", rec.id, rec.description, rec.amount);
        }
        Some(("list", sub)) => {
            let mut rows = conn.list_spending_log(&s.user_id)?;
            if let Some(limit) = sub.get_one::<usize>("limit") {
                rows.truncate(*limit);
            }
            if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
                return Ok(());
            }
            let default_ccy = s.default_currency(conn)?;
            let data = rows
                .iter()
                .map(|r| {
                    vec![
                        r.id.to_string(),
                        r.date.format("%Y-%m-%d %H:%M").to_string(),
                        r.description.clone(),
                        r.category.clone(),
                        fmt_money(&r.amount, resolve_currency(r.currency.as_deref(), &default_ccy)),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(&["ID", "When", "Description", "Category", "Amount"], data)
            );
        }
        Some(("rm", sub)) => {
            let id = req_id(sub)?;
            ledger::delete_record(conn, RecordKind::Spending, &s.user_id, id)?;
            println!("Removed spending entry #{}", id);
        }
        _ => {}
    }
    Ok(())
}
