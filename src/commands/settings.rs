// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Session, req};
use crate::utils::{get_default_currency, has_default_currency, pretty_table, set_default_currency};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, s: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("currency", sub)) => {
            let ccy = req(sub, "code")?.to_uppercase();
            set_default_currency(conn, &s.user_id, &ccy)?;
            println!("Default currency set to {}", ccy.trim());
        }
        Some(("show", _)) => {
            let ccy = get_default_currency(conn, &s.user_id)?;
            let note = if has_default_currency(conn, &s.user_id)? {
                String::new()
            } else {
                " (not set)".into()
            };
            println!(
                "{}",
                pretty_table(
                    &["Setting", "Value"],
                    vec![
                        vec!["user".into(), s.user_id.clone()],
                        vec!["default currency".into(), format!("{}{}", ccy, note)],
                    ]
                )
            );
        }
        _ => {}
    }
    Ok(())
}
