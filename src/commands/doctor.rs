// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

use super::Session;
use crate::models::UserRecords;
use crate::store::RecordStore;
use crate::utils::{has_default_currency, pretty_table};

/// Integrity findings as `(issue, detail)` rows.
pub fn findings(records: &UserRecords, currency_set: bool) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    // 1) Recurring outgoings that can never fall due
    for o in records
        .outgoings
        .iter()
        .filter(|o| o.is_recurring && o.day_of_month.is_none())
    {
        rows.push(vec![
            "recurring_without_day".into(),
            format!("outgoing #{} {}", o.id, o.description),
        ]);
    }

    // 2) Savings goals whose target makes progress meaningless
    for s in records.savings.iter().filter(|s| s.target == Some(Decimal::ZERO)) {
        rows.push(vec![
            "zero_savings_target".into(),
            format!("savings #{} {}", s.id, s.name),
        ]);
    }

    // 3) Wishlist items saved past their cost
    for w in records.wishlist.iter().filter(|w| w.saved > w.cost) {
        rows.push(vec![
            "wishlist_over_saved".into(),
            format!("wishlist #{} {} ({} > {})", w.id, w.item, w.saved, w.cost),
        ]);
    }

    // 4) Records without a currency fall back to the default
    let unset = records.income.iter().filter(|r| r.currency.is_none()).count()
        + records.outgoings.iter().filter(|r| r.currency.is_none()).count()
        + records.savings.iter().filter(|r| r.currency.is_none()).count()
        + records.debt.iter().filter(|r| r.currency.is_none()).count()
        + records.wishlist.iter().filter(|r| r.currency.is_none()).count()
        + records.accounts.iter().filter(|r| r.currency.is_none()).count()
        + records.spending_log.iter().filter(|r| r.currency.is_none()).count();
    if unset > 0 && !currency_set {
        rows.push(vec![
            "currency_unset".into(),
            format!("{} record(s) use the default currency, which is not set", unset),
        ]);
    }

    rows
}

pub fn handle(conn: &Connection, s: &Session) -> Result<()> {
    let records = conn.load_user_records(&s.user_id)?;
    let rows = findings(&records, has_default_currency(conn, &s.user_id)?);
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
