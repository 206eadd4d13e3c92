// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use super::Session;
use crate::advice::{AdviceProvider, ask};
use crate::snapshot::build_snapshot;
use crate::store::RecordStore;

pub fn handle<P: AdviceProvider + ?Sized>(
    conn: &Connection,
    s: &Session,
    provider: &P,
    m: &clap::ArgMatches,
) -> Result<()> {
    let default_ccy = s.default_currency(conn)?;
    let records = conn.load_user_records(&s.user_id)?;
    let snapshot = build_snapshot(&records, &default_ccy, s.now)?;

    if m.get_flag("snapshot") {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let question = m.get_one::<String>("question").cloned().unwrap_or_default();
    let advice = ask(provider, &snapshot, &question)?;
    if m.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&advice)?);
        return Ok(());
    }
    println!("{}\n", advice.summary);
    for (i, step) in advice.steps.iter().enumerate() {
        println!("{}. {}", i + 1, step);
    }
    Ok(())
}
