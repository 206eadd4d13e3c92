// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use super::{Session, amount, opt, parsed, req, req_id};
use crate::ledger::{self, NewDebt, RecordKind};
use crate::models::Priority;
use crate::partition::resolve_currency;
use crate::store::RecordStore;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle(conn: &mut Connection, s: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let n = NewDebt {
                name: req(sub, "name")?.clone(),
                balance: amount(sub, "balance").unwrap_or_default(),
                interest_rate: amount(sub, "apr").unwrap_or_default(),
                min_payment: amount(sub, "min-payment").unwrap_or_default(),
                priority: parsed(sub, "priority")?.unwrap_or(Priority::Medium),
                deadline: opt(sub, "deadline"),
                currency: opt(sub, "currency"),
            };
            let rec = ledger::add_debt(conn, &s.user_id, &n)?;
            println!("Added debt #{} '{}'", rec.id, rec.name);
        }
        Some(("list", sub)) => list(conn, s, sub)?,
        Some(("edit", sub)) => {
            let id = req_id(sub)?;
            let cur = ledger::get_debt(conn, &s.user_id, id)?;
            let n = NewDebt {
                name: opt(sub, "name").unwrap_or(cur.name),
                balance: amount(sub, "balance").unwrap_or(cur.balance),
                interest_rate: amount(sub, "apr").unwrap_or(cur.interest_rate),
                min_payment: amount(sub, "min-payment").unwrap_or(cur.min_payment),
                priority: parsed(sub, "priority")?.unwrap_or(cur.priority),
                deadline: opt(sub, "deadline").or(cur.deadline),
                currency: opt(sub, "currency").or(cur.currency),
            };
            let rec = ledger::update_debt(conn, &s.user_id, id, &n)?;
            println!("Updated debt #{} '{}'", rec.id, rec.name);
        }
        Some(("pay", sub)) => {
            let id = req_id(sub)?;
            let amt = amount(sub, "amount").unwrap_or_default();
            let from = sub.get_one::<i64>("from-account").copied();
            let rec = ledger::pay_debt(conn, &s.user_id, id, amt, from)?;
            let ccy = resolve_currency(rec.currency.as_deref(), &s.default_currency(conn)?).to_string();
            if rec.balance.is_zero() {
                println!("'{}' is paid off", rec.name);
            } else {
                println!(
                    "Paid towards '{}': {} remaining",
                    rec.name,
                    fmt_money(&rec.balance, &ccy)
                );
            }
        }
        Some(("rm", sub)) => {
            let id = req_id(sub)?;
            ledger::delete_record(conn, RecordKind::Debt, &s.user_id, id)?;
            println!("Removed debt #{}", id);
        }
        _ => {}
    }
    Ok(())
}

fn list(conn: &Connection, s: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let rows = conn.list_debt(&s.user_id)?;
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
                format!("{}%", r.interest_rate),
                fmt_money(&r.min_payment, ccy),
                r.priority.as_str().to_string(),
                r.deadline.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Name", "Balance", "APR", "Min payment", "Priority", "Deadline"],
            data
        )
    );
    Ok(())
}
