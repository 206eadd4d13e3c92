// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Bill reminders and savings milestones.
//!
//! The scan runs whenever a user's notifications are fetched. Milestones are
//! issued at most once per goal and threshold; bill reminders re-arm once the
//! previous one for the same outgoing is 24 hours old.

use chrono::{DateTime, Datelike, Duration, Utc};
use rusqlite::{Connection, TransactionBehavior};
use rust_decimal::Decimal;
use tracing::info;

use crate::dashboard::{days_until_due, recurring_with_due_day};
use crate::error::Result;
use crate::models::{
    NewNotification, NotificationKind, NotificationRecord, OutgoingRecord, SAVINGS_MILESTONES,
    SavingsRecord,
};
use crate::partition::resolve_currency;
use crate::store::RecordStore;

/// A recurring outgoing due within this many days gets a reminder.
pub const BILL_DUE_WINDOW_DAYS: i64 = 3;
pub const BILL_DUE_COOLDOWN_HOURS: i64 = 24;

fn bill_due_notification(
    user_id: &str,
    o: &OutgoingRecord,
    day_of_month: u32,
    days_until: i64,
    default_currency: &str,
    now: DateTime<Utc>,
) -> NewNotification {
    let ccy = resolve_currency(o.currency.as_deref(), default_currency);
    let when = match days_until {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        n => format!("in {} days", n),
    };
    NewNotification {
        user_id: user_id.to_string(),
        kind: NotificationKind::BillDue,
        title: format!("Upcoming bill: {}", o.description),
        message: format!(
            "{} ({} {}) is due {} on day {} of the month.",
            o.description, o.amount, ccy, when, day_of_month
        ),
        related_id: Some(o.id),
        created_at: now,
    }
}

fn milestone_notification(
    user_id: &str,
    s: &SavingsRecord,
    threshold: u8,
    target: Decimal,
    default_currency: &str,
    now: DateTime<Utc>,
) -> NewNotification {
    let ccy = resolve_currency(s.currency.as_deref(), default_currency);
    let (title, message) = if threshold >= 100 {
        (
            format!("Goal reached: {}", s.name),
            format!(
                "Congratulations! You've saved {} {} and hit your {} goal.",
                target, ccy, s.name
            ),
        )
    } else {
        (
            format!("{}% of {} saved", threshold, s.name),
            format!(
                "Keep going! {} is {}% of the way to {} {}.",
                s.name, threshold, target, ccy
            ),
        )
    };
    NewNotification {
        user_id: user_id.to_string(),
        kind: NotificationKind::SavingsMilestone(threshold),
        title,
        message,
        related_id: Some(s.id),
        created_at: now,
    }
}

fn reached(balance: Decimal, target: Decimal, threshold: u8) -> bool {
    // balance / target * 100 >= threshold, without dividing
    match (
        balance.checked_mul(Decimal::ONE_HUNDRED),
        target.checked_mul(Decimal::from(threshold)),
    ) {
        (Some(lhs), Some(rhs)) => lhs >= rhs,
        (None, _) => true,
        (_, None) => false,
    }
}

/// Decide which notifications are due and insert them. Returns only the
/// rows this run created.
pub fn scan<S>(
    store: &S,
    user_id: &str,
    default_currency: &str,
    now: DateTime<Utc>,
) -> Result<Vec<NotificationRecord>>
where
    S: RecordStore + ?Sized,
{
    let existing = store.list_notifications(user_id)?;
    let mut created = Vec::new();

    let cooldown = Duration::hours(BILL_DUE_COOLDOWN_HOURS);
    let today = now.day();
    let outgoings = store.list_outgoings(user_id)?;
    for (o, dom) in recurring_with_due_day(&outgoings) {
        let days_until = days_until_due(dom, today);
        if !(0..=BILL_DUE_WINDOW_DAYS).contains(&days_until) {
            continue;
        }
        let latest = existing
            .iter()
            .filter(|n| n.kind == NotificationKind::BillDue && n.related_id == Some(o.id))
            .map(|n| n.created_at)
            .max();
        // re-arms only once the latest reminder is strictly older than the cooldown
        if latest.is_some_and(|at| now - at <= cooldown) {
            continue;
        }
        let n = bill_due_notification(user_id, o, dom, days_until, default_currency, now);
        if let Some(rec) = store.insert_notification(&n)? {
            info!(user = %user_id, outgoing = o.id, days_until, "bill reminder issued");
            created.push(rec);
        }
    }

    let issued: Vec<(i64, NotificationKind)> = existing
        .iter()
        .filter(|n| n.kind.is_milestone())
        .filter_map(|n| n.related_id.map(|id| (id, n.kind)))
        .collect();
    for s in store.list_savings(user_id)? {
        let Some(target) = s.target.filter(|t| *t > Decimal::ZERO) else {
            continue;
        };
        for threshold in SAVINGS_MILESTONES {
            if !reached(s.balance, target, threshold) {
                continue;
            }
            let kind = NotificationKind::SavingsMilestone(threshold);
            if issued.contains(&(s.id, kind)) {
                continue;
            }
            let n = milestone_notification(user_id, &s, threshold, target, default_currency, now);
            if let Some(rec) = store.insert_notification(&n)? {
                info!(user = %user_id, savings = s.id, threshold, "savings milestone issued");
                created.push(rec);
            }
        }
    }

    Ok(created)
}

/// Run the scan and return the user's full list, newest first.
///
/// The scan and its inserts share one `IMMEDIATE` transaction, so two
/// concurrent refreshes for the same database serialize on the write lock
/// instead of both seeing "nothing issued yet".
pub fn refresh_notifications(
    conn: &mut Connection,
    user_id: &str,
    default_currency: &str,
    now: DateTime<Utc>,
) -> Result<Vec<NotificationRecord>> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    scan(&*tx, user_id, default_currency, now)?;
    let list = tx.list_notifications(user_id)?;
    tx.commit()?;
    Ok(list)
}

/// Mark one of the caller's notifications read. Unknown ids are a no-op.
pub fn mark_read<S: RecordStore + ?Sized>(store: &S, user_id: &str, id: i64) -> Result<()> {
    store.update_notification_read(user_id, id)
}

pub fn mark_all_read<S: RecordStore + ?Sized>(store: &S, user_id: &str) -> Result<()> {
    store.update_all_notifications_read(user_id)
}

pub fn unread_count(list: &[NotificationRecord]) -> usize {
    list.iter().filter(|n| !n.read).count()
}
