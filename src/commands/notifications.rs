// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use super::{Session, req_id};
use crate::notify::{mark_all_read, mark_read, refresh_notifications, unread_count};
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(conn: &mut Connection, s: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let default_ccy = s.default_currency(conn)?;
            let mut list = refresh_notifications(conn, &s.user_id, &default_ccy, s.now)?;
            let unread = unread_count(&list);
            if sub.get_flag("unread") {
                list.retain(|n| !n.read);
            }
            if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &list)? {
                return Ok(());
            }
            if list.is_empty() {
                println!("No notifications.");
                return Ok(());
            }
            let data = list
                .iter()
                .map(|n| {
                    vec![
                        n.id.to_string(),
                        if n.read { String::new() } else { "*".into() },
                        n.created_at.format("%Y-%m-%d %H:%M").to_string(),
                        n.title.clone(),
                        n.message.clone(),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(&["ID", "New", "When", "Title", "Message"], data)
            );
            println!("{} unread", unread);
        }
        Some(("read", sub)) => {
            let id = req_id(sub)?;
            mark_read(&*conn, &s.user_id, id)?;
            println!("Marked #{} as read", id);
        }
        Some(("read-all", _)) => {
            mark_all_read(&*conn, &s.user_id)?;
            println!("All notifications marked as read");
        }
        _ => {}
    }
    Ok(())
}
