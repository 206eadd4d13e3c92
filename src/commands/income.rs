// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use super::{Session, amount, opt, or_blank, parsed, req, req_id};
use crate::ledger::{self, NewIncome, RecordKind};
use crate::models::Frequency;
use crate::partition::resolve_currency;
use crate::store::RecordStore;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle(conn: &Connection, s: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let n = NewIncome {
                source: req(sub, "source")?.clone(),
                amount: amount(sub, "amount").unwrap_or_default(),
                category: opt(sub, "category").unwrap_or_else(|| "Salary".into()),
                frequency: parsed(sub, "frequency")?.unwrap_or(Frequency::Monthly),
                currency: opt(sub, "currency"),
                day_of_month: sub.get_one::<u32>("day").copied(),
            };
            let rec = ledger::add_income(conn, &s.user_id, &n)?;
            println!("Added income #{} '{}'", rec.id, rec.source);
        }
        Some(("list", sub)) => list(conn, s, sub)?,
        Some(("edit", sub)) => {
            let id = req_id(sub)?;
            let cur = ledger::get_income(conn, &s.user_id, id)?;
            let n = NewIncome {
                source: opt(sub, "source").unwrap_or(cur.source),
                amount: amount(sub, "amount").unwrap_or(cur.amount),
                category: opt(sub, "category").unwrap_or(cur.category),
                frequency: parsed(sub, "frequency")?.unwrap_or(cur.frequency),
                currency: opt(sub, "currency").or(cur.currency),
                day_of_month: sub.get_one::<u32>("day").copied().or(cur.day_of_month),
            };
            let rec = ledger::update_income(conn, &s.user_id, id, &n)?;
            println!("Updated income #{} '{}'", rec.id, rec.source);
        }
        Some(("rm", sub)) => {
            let id = req_id(sub)?;
            ledger::delete_record(conn, RecordKind::Income, &s.user_id, id)?;
            println!("Removed income #{}", id);
        }
        _ => {}
    }
    Ok(())
}

fn list(conn: &Connection, s: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let rows = conn.list_income(&s.user_id)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        return Ok(());
    }
    let default_ccy = s.default_currency(conn)?;
    let data = rows
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.source.clone(),
                fmt_money(&r.amount, resolve_currency(r.currency.as_deref(), &default_ccy)),
                r.category.clone(),
                r.frequency.as_str().to_string(),
                r.day_of_month.map(|d| d.to_string()).unwrap_or_default(),
                or_blank(&r.currency),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Source", "Amount", "Category", "Frequency", "Day", "Currency"],
            data
        )
    );
    Ok(())
}
