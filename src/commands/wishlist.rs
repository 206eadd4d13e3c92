// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use super::{Session, amount, opt, parsed, req, req_id};
use crate::ledger::{self, NewWishlist, RecordKind};
use crate::models::Priority;
use crate::partition::resolve_currency;
use crate::store::RecordStore;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle(conn: &mut Connection, s: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let n = NewWishlist {
                item: req(sub, "item")?.clone(),
                cost: amount(sub, "cost").unwrap_or_default(),
                saved: amount(sub, "saved").unwrap_or_default(),
                priority: parsed(sub, "priority")?.unwrap_or(Priority::Medium),
                deadline: opt(sub, "deadline"),
                currency: opt(sub, "currency"),
            };
            let rec = ledger::add_wishlist(conn, &s.user_id, &n)?;
            println!("Added wishlist item #{} '{}'", rec.id, rec.item);
        }
        Some(("list", sub)) => list(conn, s, sub)?,
        Some(("edit", sub)) => {
            let id = req_id(sub)?;
            let cur = ledger::get_wishlist(conn, &s.user_id, id)?;
            let n = NewWishlist {
                item: opt(sub, "item").unwrap_or(cur.item),
                cost: amount(sub, "cost").unwrap_or(cur.cost),
                saved: amount(sub, "saved").unwrap_or(cur.saved),
                priority: parsed(sub, "priority")?.unwrap_or(cur.priority),
                deadline: opt(sub, "deadline").or(cur.deadline),
                currency: opt(sub, "currency").or(cur.currency),
            };
            let rec = ledger::update_wishlist(conn, &s.user_id, id, &n)?;
            println!("Updated wishlist item #{} '{}'", rec.id, rec.item);
        }
        Some(("deposit", sub)) => {
            let id = req_id(sub)?;
            let amt = amount(sub, "amount").unwrap_or_default();
            let from = sub.get_one::<i64>("from-account").copied();
            let rec = ledger::deposit_wishlist(conn, &s.user_id, id, amt, from)?;
            let ccy = resolve_currency(rec.currency.as_deref(), &s.default_currency(conn)?).to_string();
            println!(
                "Saved {} of {} for '{}'",
                fmt_money(&rec.saved, &ccy),
                fmt_money(&rec.cost, &ccy),
                rec.item
            );
        }
        Some(("rm", sub)) => {
            let id = req_id(sub)?;
            ledger::delete_record(conn, RecordKind::Wishlist, &s.user_id, id)?;
            println!("Removed wishlist item #{}", id);
        }
        _ => {}
    }
    Ok(())
}

fn list(conn: &Connection, s: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let rows = conn.list_wishlist(&s.user_id)?;
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
                r.item.clone(),
                fmt_money(&r.saved, ccy),
                fmt_money(&r.cost, ccy),
                r.priority.as_str().to_string(),
                r.deadline.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Item", "Saved", "Cost", "Priority", "Deadline"], data)
    );
    Ok(())
}
