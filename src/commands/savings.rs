// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use super::{Session, amount, opt, req, req_id};
use crate::ledger::{self, NewSavings, RecordKind};
use crate::partition::resolve_currency;
use crate::store::RecordStore;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle(conn: &mut Connection, s: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let n = NewSavings {
                name: req(sub, "name")?.clone(),
                balance: amount(sub, "balance").unwrap_or_default(),
                target: amount(sub, "target"),
                category: opt(sub, "category").unwrap_or_else(|| "General".into()),
                currency: opt(sub, "currency"),
            };
            let rec = ledger::add_savings(conn, &s.user_id, &n)?;
            println!("Added savings goal #{} '{}'", rec.id, rec.name);
        }
        Some(("list", sub)) => list(conn, s, sub)?,
        Some(("edit", sub)) => {
            let id = req_id(sub)?;
            let cur = ledger::get_savings(conn, &s.user_id, id)?;
            let n = NewSavings {
                name: opt(sub, "name").unwrap_or(cur.name),
                balance: amount(sub, "balance").unwrap_or(cur.balance),
                target: amount(sub, "target").or(cur.target),
                category: opt(sub, "category").unwrap_or(cur.category),
                currency: opt(sub, "currency").or(cur.currency),
            };
            let rec = ledger::update_savings(conn, &s.user_id, id, &n)?;
            println!("Updated savings goal #{} '{}'", rec.id, rec.name);
        }
        Some(("deposit", sub)) => {
            let id = req_id(sub)?;
            let amt = amount(sub, "amount").unwrap_or_default();
            let from = sub.get_one::<i64>("from-account").copied();
            let rec = ledger::deposit_savings(conn, &s.user_id, id, amt, from)?;
            let ccy = resolve_currency(rec.currency.as_deref(), &s.default_currency(conn)?).to_string();
            println!(
                "Deposited into '{}': balance now {}",
                rec.name,
                fmt_money(&rec.balance, &ccy)
            );
        }
        Some(("rm", sub)) => {
            let id = req_id(sub)?;
            ledger::delete_record(conn, RecordKind::Savings, &s.user_id, id)?;
            println!("Removed savings goal #{}", id);
        }
        _ => {}
    }
    Ok(())
}

fn list(conn: &Connection, s: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let rows = conn.list_savings(&s.user_id)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        return Ok(());
    }
    let default_ccy = s.default_currency(conn)?;
    let data = rows
        .iter()
        .map(|r| {
            let ccy = resolve_currency(r.currency.as_deref(), &default_ccy);
            vec![
                r.id.to_string(),
                r.name.clone(),
                fmt_money(&r.balance, ccy),
                r.target.map(|t| fmt_money(&t, ccy)).unwrap_or_default(),
                r.progress_pct()
                    .map(|p| format!("{:.0}%", p))
                    .unwrap_or_default(),
                r.category.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Goal", "Balance", "Target", "Progress", "Category"],
            data
        )
    );
    Ok(())
}
