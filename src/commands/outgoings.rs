// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use super::{Session, amount, opt, parsed, req, req_id};
use crate::ledger::{self, NewOutgoing, RecordKind};
use crate::models::Frequency;
use crate::partition::resolve_currency;
use crate::store::RecordStore;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle(conn: &Connection, s: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let is_recurring = sub.get_flag("recurring");
            let date = match opt(sub, "date") {
                Some(d) => d,
                None if is_recurring => String::new(),
                None => s.now.date_naive().to_string(),
            };
            let n = NewOutgoing {
                description: req(sub, "description")?.clone(),
                amount: amount(sub, "amount").unwrap_or_default(),
                category: opt(sub, "category").unwrap_or_else(|| "Other".into()),
                date,
                frequency: parsed(sub, "frequency")?.unwrap_or(if is_recurring {
                    Frequency::Monthly
                } else {
                    Frequency::OneTime
                }),
                currency: opt(sub, "currency"),
                is_recurring,
                day_of_month: sub.get_one::<u32>("day").copied(),
            };
            let rec = ledger::add_outgoing(conn, &s.user_id, &n)?;
            println!("Added outgoing #{} '{}'", rec.id, rec.description);
        }
        Some(("list", sub)) => list(conn, s, sub)?,
        Some(("edit", sub)) => {
            let id = req_id(sub)?;
            let cur = ledger::get_outgoing(conn, &s.user_id, id)?;
            let is_recurring = if sub.get_flag("recurring") {
                true
            } else if sub.get_flag("one-off") {
                false
            } else {
                cur.is_recurring
            };
            let n = NewOutgoing {
                description: opt(sub, "description").unwrap_or(cur.description),
                amount: amount(sub, "amount").unwrap_or(cur.amount),
                category: opt(sub, "category").unwrap_or(cur.category),
                date: opt(sub, "date").unwrap_or(cur.date),
                frequency: parsed(sub, "frequency")?.unwrap_or(cur.frequency),
                currency: opt(sub, "currency").or(cur.currency),
                is_recurring,
                day_of_month: sub.get_one::<u32>("day").copied().or(cur.day_of_month),
            };
            let rec = ledger::update_outgoing(conn, &s.user_id, id, &n)?;
            println!("Updated outgoing #{} '{}'", rec.id, rec.description);
        }
        Some(("rm", sub)) => {
            let id = req_id(sub)?;
            ledger::delete_record(conn, RecordKind::Outgoing, &s.user_id, id)?;
            println!("Removed outgoing #{}", id);
        }
        _ => {}
    }
    Ok(())
}

fn list(conn: &Connection, s: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let rows = conn.list_outgoings(&s.user_id)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        return Ok(());
    }
    let default_ccy = s.default_currency(conn)?;
    let data = rows
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.description.clone(),
                fmt_money(&r.amount, resolve_currency(r.currency.as_deref(), &default_ccy)),
                r.category.clone(),
                if r.is_recurring {
                    r.day_of_month
                        .map(|d| format!("monthly, day {}", d))
                        .unwrap_or_else(|| "monthly".into())
                } else {
                    r.date.clone()
                },
                r.frequency.as_str().to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Description", "Amount", "Category", "When", "Frequency"],
            data
        )
    );
    Ok(())
}
