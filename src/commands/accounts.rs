// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Session, amount, opt, parsed, req, req_id};
use crate::ledger::{self, NewAccount, RecordKind};
use crate::models::AccountType;
use crate::partition::resolve_currency;
use crate::store::RecordStore;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, s: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let n = NewAccount {
                name: req(sub, "name")?.clone(),
                account_type: parsed(sub, "type")?.unwrap_or(AccountType::Checking),
                balance: amount(sub, "balance").unwrap_or_default(),
                currency: opt(sub, "currency"),
            };
            let rec = ledger::add_account(conn, &s.user_id, &n)?;
            println!(
                "Added account #{} '{}' ({})",
                rec.id,
                rec.name,
                rec.account_type.as_str()
            );
        }
        Some(("list", sub)) => {
            let rows = conn.list_accounts(&s.user_id)?;
            if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
                return Ok(());
            }
            let default_ccy = s.default_currency(conn)?;
            let mut data = Vec::new();
            for r in &rows {
                data.push(vec![
                    r.id.to_string(),
                    r.name.clone(),
                    r.account_type.as_str().to_string(),
                    fmt_money(&r.balance, resolve_currency(r.currency.as_deref(), &default_ccy)),
                ]);
            }
            println!("{}", pretty_table(&["ID", "Name", "Type", "Balance"], data));
        }
        Some(("edit", sub)) => {
            let id = req_id(sub)?;
            let cur = ledger::get_account(conn, &s.user_id, id)?;
            let n = NewAccount {
                name: opt(sub, "name").unwrap_or(cur.name),
                account_type: parsed(sub, "type")?.unwrap_or(cur.account_type),
                balance: amount(sub, "balance").unwrap_or(cur.balance),
                currency: opt(sub, "currency").or(cur.currency),
            };
            let rec = ledger::update_account(conn, &s.user_id, id, &n)?;
            println!("Updated account #{} '{}'", rec.id, rec.name);
        }
        Some(("set-balance", sub)) => {
            let id = req_id(sub)?;
            let bal = amount(sub, "balance").unwrap_or_default();
            let rec = ledger::set_account_balance(conn, &s.user_id, id, bal)?;
            println!("Account '{}' balance set to {}", rec.name, rec.balance);
        }
        Some(("rm", sub)) => {
            let id = req_id(sub)?;
            ledger::delete_record(conn, RecordKind::Account, &s.user_id, id)?;
            println!("Removed account #{}", id);
        }
        _ => {}
    }
    Ok(())
}
