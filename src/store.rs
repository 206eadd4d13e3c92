// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read access to a user's records plus the handful of writes the core needs.
//!
//! `RecordStore` is implemented for `rusqlite::Connection`; a
//! `rusqlite::Transaction` derefs to a connection, so it is a store too.

use std::str::FromStr;

use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{
    AccountRecord, DebtRecord, IncomeRecord, NewNotification, NotificationRecord, OutgoingRecord,
    SavingsRecord, SpendingLogRecord, UserRecords, WishlistRecord,
};

pub trait RecordStore {
    fn list_income(&self, user_id: &str) -> Result<Vec<IncomeRecord>>;
    fn list_outgoings(&self, user_id: &str) -> Result<Vec<OutgoingRecord>>;
    fn list_savings(&self, user_id: &str) -> Result<Vec<SavingsRecord>>;
    fn list_debt(&self, user_id: &str) -> Result<Vec<DebtRecord>>;
    fn list_wishlist(&self, user_id: &str) -> Result<Vec<WishlistRecord>>;
    fn list_accounts(&self, user_id: &str) -> Result<Vec<AccountRecord>>;
    fn list_spending_log(&self, user_id: &str) -> Result<Vec<SpendingLogRecord>>;
    /// Newest first.
    fn list_notifications(&self, user_id: &str) -> Result<Vec<NotificationRecord>>;

    /// `None` when the store's uniqueness rules already hold an equivalent row.
    fn insert_notification(&self, n: &NewNotification) -> Result<Option<NotificationRecord>>;
    fn update_notification_read(&self, user_id: &str, id: i64) -> Result<()>;
    fn update_all_notifications_read(&self, user_id: &str) -> Result<()>;

    fn deduct_account_balance(
        &self,
        user_id: &str,
        account_id: i64,
        amount: Decimal,
    ) -> Result<AccountRecord>;

    fn load_user_records(&self, user_id: &str) -> Result<UserRecords> {
        Ok(UserRecords {
            income: self.list_income(user_id)?,
            outgoings: self.list_outgoings(user_id)?,
            savings: self.list_savings(user_id)?,
            debt: self.list_debt(user_id)?,
            wishlist: self.list_wishlist(user_id)?,
            accounts: self.list_accounts(user_id)?,
            spending_log: self.list_spending_log(user_id)?,
        })
    }
}

pub(crate) fn decimal_col(r: &Row, idx: usize) -> rusqlite::Result<Decimal> {
    let s: String = r.get(idx)?;
    s.trim()
        .parse::<Decimal>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn opt_decimal_col(r: &Row, idx: usize) -> rusqlite::Result<Option<Decimal>> {
    let s: Option<String> = r.get(idx)?;
    match s {
        Some(s) if !s.trim().is_empty() => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))),
        _ => Ok(None),
    }
}

pub(crate) fn parsed_col<T>(r: &Row, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = Error>,
{
    let s: String = r.get(idx)?;
    s.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) const INCOME_COLS: &str =
    "id, user_id, source, amount, category, frequency, currency, day_of_month";
pub(crate) const OUTGOING_COLS: &str =
    "id, user_id, description, amount, category, date, frequency, currency, is_recurring, day_of_month";
pub(crate) const SAVINGS_COLS: &str = "id, user_id, name, balance, target, category, currency";
pub(crate) const DEBT_COLS: &str =
    "id, user_id, name, balance, interest_rate, min_payment, priority, deadline, currency";
pub(crate) const WISHLIST_COLS: &str =
    "id, user_id, item, cost, saved, priority, deadline, currency";
pub(crate) const ACCOUNT_COLS: &str = "id, user_id, name, type, balance, currency";
pub(crate) const SPENDING_COLS: &str = "id, user_id, description, amount, currency, category, date";
const NOTIFICATION_COLS: &str = "id, user_id, type, title, message, read, related_id, created_at";

pub(crate) fn income_from_row(r: &Row) -> rusqlite::Result<IncomeRecord> {
    Ok(IncomeRecord {
        id: r.get(0)?,
        user_id: r.get(1)?,
        source: r.get(2)?,
        amount: decimal_col(r, 3)?,
        category: r.get(4)?,
        frequency: parsed_col(r, 5)?,
        currency: r.get(6)?,
        day_of_month: r.get(7)?,
    })
}

pub(crate) fn outgoing_from_row(r: &Row) -> rusqlite::Result<OutgoingRecord> {
    Ok(OutgoingRecord {
        id: r.get(0)?,
        user_id: r.get(1)?,
        description: r.get(2)?,
        amount: decimal_col(r, 3)?,
        category: r.get(4)?,
        date: r.get(5)?,
        frequency: parsed_col(r, 6)?,
        currency: r.get(7)?,
        is_recurring: r.get(8)?,
        day_of_month: r.get(9)?,
    })
}

pub(crate) fn savings_from_row(r: &Row) -> rusqlite::Result<SavingsRecord> {
    Ok(SavingsRecord {
        id: r.get(0)?,
        user_id: r.get(1)?,
        name: r.get(2)?,
        balance: decimal_col(r, 3)?,
        target: opt_decimal_col(r, 4)?,
        category: r.get(5)?,
        currency: r.get(6)?,
    })
}

pub(crate) fn debt_from_row(r: &Row) -> rusqlite::Result<DebtRecord> {
    Ok(DebtRecord {
        id: r.get(0)?,
        user_id: r.get(1)?,
        name: r.get(2)?,
        balance: decimal_col(r, 3)?,
        interest_rate: decimal_col(r, 4)?,
        min_payment: decimal_col(r, 5)?,
        priority: parsed_col(r, 6)?,
        deadline: r.get(7)?,
        currency: r.get(8)?,
    })
}

pub(crate) fn wishlist_from_row(r: &Row) -> rusqlite::Result<WishlistRecord> {
    Ok(WishlistRecord {
        id: r.get(0)?,
        user_id: r.get(1)?,
        item: r.get(2)?,
        cost: decimal_col(r, 3)?,
        saved: decimal_col(r, 4)?,
        priority: parsed_col(r, 5)?,
        deadline: r.get(6)?,
        currency: r.get(7)?,
    })
}

pub(crate) fn account_from_row(r: &Row) -> rusqlite::Result<AccountRecord> {
    Ok(AccountRecord {
        id: r.get(0)?,
        user_id: r.get(1)?,
        name: r.get(2)?,
        account_type: parsed_col(r, 3)?,
        balance: decimal_col(r, 4)?,
        currency: r.get(5)?,
    })
}

pub(crate) fn spending_from_row(r: &Row) -> rusqlite::Result<SpendingLogRecord> {
    Ok(SpendingLogRecord {
        id: r.get(0)?,
        user_id: r.get(1)?,
        description: r.get(2)?,
        amount: decimal_col(r, 3)?,
        currency: r.get(4)?,
        category: r.get(5)?,
        date: r.get(6)?,
    })
}

fn notification_from_row(r: &Row) -> rusqlite::Result<NotificationRecord> {
    Ok(NotificationRecord {
        id: r.get(0)?,
        user_id: r.get(1)?,
        kind: parsed_col(r, 2)?,
        title: r.get(3)?,
        message: r.get(4)?,
        read: r.get(5)?,
        related_id: r.get(6)?,
        created_at: r.get(7)?,
    })
}

fn list_where_user<T>(
    conn: &Connection,
    table: &str,
    cols: &str,
    order: &str,
    user_id: &str,
    map: fn(&Row) -> rusqlite::Result<T>,
) -> Result<Vec<T>> {
    let sql = format!("SELECT {cols} FROM {table} WHERE user_id=?1 ORDER BY {order}");
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map(params![user_id], map)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub(crate) fn find_account(conn: &Connection, user_id: &str, id: i64) -> Result<AccountRecord> {
    let sql = format!("SELECT {ACCOUNT_COLS} FROM accounts WHERE id=?1 AND user_id=?2");
    conn.query_row(&sql, params![id, user_id], account_from_row)
        .optional()?
        .ok_or(Error::NotFound {
            kind: "account",
            id,
        })
}

impl RecordStore for Connection {
    fn list_income(&self, user_id: &str) -> Result<Vec<IncomeRecord>> {
        list_where_user(self, "income", INCOME_COLS, "id", user_id, income_from_row)
    }

    fn list_outgoings(&self, user_id: &str) -> Result<Vec<OutgoingRecord>> {
        list_where_user(self, "outgoings", OUTGOING_COLS, "id", user_id, outgoing_from_row)
    }

    fn list_savings(&self, user_id: &str) -> Result<Vec<SavingsRecord>> {
        list_where_user(self, "savings", SAVINGS_COLS, "id", user_id, savings_from_row)
    }

    fn list_debt(&self, user_id: &str) -> Result<Vec<DebtRecord>> {
        list_where_user(self, "debt", DEBT_COLS, "id", user_id, debt_from_row)
    }

    fn list_wishlist(&self, user_id: &str) -> Result<Vec<WishlistRecord>> {
        list_where_user(self, "wishlist", WISHLIST_COLS, "id", user_id, wishlist_from_row)
    }

    fn list_accounts(&self, user_id: &str) -> Result<Vec<AccountRecord>> {
        list_where_user(self, "accounts", ACCOUNT_COLS, "id", user_id, account_from_row)
    }

    fn list_spending_log(&self, user_id: &str) -> Result<Vec<SpendingLogRecord>> {
        list_where_user(
            self,
            "spending_log",
            SPENDING_COLS,
            "date DESC, id DESC",
            user_id,
            spending_from_row,
        )
    }

    fn list_notifications(&self, user_id: &str) -> Result<Vec<NotificationRecord>> {
        list_where_user(
            self,
            "notifications",
            NOTIFICATION_COLS,
            "created_at DESC, id DESC",
            user_id,
            notification_from_row,
        )
    }

    fn insert_notification(&self, n: &NewNotification) -> Result<Option<NotificationRecord>> {
        let changed = self.execute(
            "INSERT OR IGNORE INTO notifications(user_id, type, title, message, read, related_id, created_at)
             VALUES (?1, ?2, ?3, ?4, 0, ?5, ?6)",
            params![
                n.user_id,
                n.kind.to_string(),
                n.title,
                n.message,
                n.related_id,
                n.created_at
            ],
        )?;
        if changed == 0 {
            debug!(user = %n.user_id, kind = %n.kind, related = ?n.related_id, "notification already issued");
            return Ok(None);
        }
        let id = self.last_insert_rowid();
        debug!(user = %n.user_id, kind = %n.kind, id, "notification stored");
        Ok(Some(NotificationRecord {
            id,
            user_id: n.user_id.clone(),
            kind: n.kind,
            title: n.title.clone(),
            message: n.message.clone(),
            read: false,
            related_id: n.related_id,
            created_at: n.created_at,
        }))
    }

    fn update_notification_read(&self, user_id: &str, id: i64) -> Result<()> {
        self.execute(
            "UPDATE notifications SET read=1 WHERE id=?1 AND user_id=?2",
            params![id, user_id],
        )?;
        Ok(())
    }

    fn update_all_notifications_read(&self, user_id: &str) -> Result<()> {
        self.execute(
            "UPDATE notifications SET read=1 WHERE user_id=?1 AND read=0",
            params![user_id],
        )?;
        Ok(())
    }

    fn deduct_account_balance(
        &self,
        user_id: &str,
        account_id: i64,
        amount: Decimal,
    ) -> Result<AccountRecord> {
        let mut account = find_account(self, user_id, account_id)?;
        account.balance = account
            .balance
            .checked_sub(amount)
            .ok_or_else(|| Error::Overflow {
                currency: account.currency.clone().unwrap_or_default(),
            })?;
        self.execute(
            "UPDATE accounts SET balance=?1 WHERE id=?2 AND user_id=?3",
            params![account.balance.to_string(), account_id, user_id],
        )?;
        info!(user = %user_id, account = account_id, %amount, "account debited");
        Ok(account)
    }
}
