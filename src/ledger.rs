// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! User-facing writes: create, edit and delete records, plus the deposit and
//! payment flows. Every statement is scoped by `user_id`; touching an id that
//! belongs to someone else is `NotFound`.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{
    AccountRecord, AccountType, DebtRecord, Frequency, IncomeRecord, OutgoingRecord, Priority,
    SavingsRecord, SpendingLogRecord, WishlistRecord,
};
use crate::store::{
    ACCOUNT_COLS, DEBT_COLS, INCOME_COLS, OUTGOING_COLS, RecordStore, SAVINGS_COLS, SPENDING_COLS,
    WISHLIST_COLS, account_from_row, debt_from_row, income_from_row, outgoing_from_row,
    savings_from_row, spending_from_row, wishlist_from_row,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Income,
    Outgoing,
    Savings,
    Debt,
    Wishlist,
    Account,
    Spending,
}

impl RecordKind {
    pub fn table(&self) -> &'static str {
        match self {
            RecordKind::Income => "income",
            RecordKind::Outgoing => "outgoings",
            RecordKind::Savings => "savings",
            RecordKind::Debt => "debt",
            RecordKind::Wishlist => "wishlist",
            RecordKind::Account => "accounts",
            RecordKind::Spending => "spending_log",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Income => "income",
            RecordKind::Outgoing => "outgoing",
            RecordKind::Savings => "savings goal",
            RecordKind::Debt => "debt",
            RecordKind::Wishlist => "wishlist item",
            RecordKind::Account => "account",
            RecordKind::Spending => "spending entry",
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewIncome {
    pub source: String,
    pub amount: Decimal,
    pub category: String,
    pub frequency: Frequency,
    pub currency: Option<String>,
    pub day_of_month: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct NewOutgoing {
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub date: String,
    pub frequency: Frequency,
    pub currency: Option<String>,
    pub is_recurring: bool,
    pub day_of_month: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct NewSavings {
    pub name: String,
    pub balance: Decimal,
    pub target: Option<Decimal>,
    pub category: String,
    pub currency: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewDebt {
    pub name: String,
    pub balance: Decimal,
    pub interest_rate: Decimal,
    pub min_payment: Decimal,
    pub priority: Priority,
    pub deadline: Option<String>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewWishlist {
    pub item: String,
    pub cost: Decimal,
    pub saved: Decimal,
    pub priority: Priority,
    pub deadline: Option<String>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub account_type: AccountType,
    pub balance: Decimal,
    pub currency: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewSpending {
    pub description: String,
    pub amount: Decimal,
    pub currency: Option<String>,
    pub category: String,
    pub date: DateTime<Utc>,
}

fn require_text(field: &'static str, v: &str) -> Result<()> {
    if v.trim().is_empty() {
        return Err(Error::validation(field, "must not be empty"));
    }
    Ok(())
}

fn require_non_negative(field: &'static str, v: Decimal) -> Result<()> {
    if v < Decimal::ZERO {
        return Err(Error::validation(field, format!("{} is negative", v)));
    }
    Ok(())
}

fn require_positive(field: &'static str, v: Decimal) -> Result<()> {
    if v <= Decimal::ZERO {
        return Err(Error::validation(field, format!("{} must be greater than zero", v)));
    }
    Ok(())
}

fn check_day_of_month(v: Option<u32>) -> Result<()> {
    match v {
        Some(d) if !(1..=31).contains(&d) => Err(Error::validation(
            "day of month",
            format!("{} (expected 1-31)", d),
        )),
        _ => Ok(()),
    }
}

fn check_optional_date(field: &'static str, v: Option<&str>) -> Result<()> {
    if let Some(d) = v {
        NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .map_err(|_| Error::validation(field, format!("'{}' (expected YYYY-MM-DD)", d)))?;
    }
    Ok(())
}

/// Blank currency codes are stored as unset and fall back to the default.
fn normalize_currency(c: &Option<String>) -> Option<String> {
    c.as_deref()
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
}

fn validate_outgoing(o: &NewOutgoing) -> Result<()> {
    require_text("description", &o.description)?;
    require_non_negative("amount", o.amount)?;
    check_day_of_month(o.day_of_month)?;
    if !o.is_recurring {
        if o.date.trim().is_empty() {
            return Err(Error::validation("date", "one-off expenses need a date"));
        }
        check_optional_date("date", Some(o.date.trim()))?;
    } else if !o.date.trim().is_empty() {
        check_optional_date("date", Some(o.date.trim()))?;
    }
    Ok(())
}

fn fetch_one<T>(
    conn: &Connection,
    kind: RecordKind,
    cols: &str,
    user_id: &str,
    id: i64,
    map: fn(&rusqlite::Row) -> rusqlite::Result<T>,
) -> Result<T> {
    let sql = format!(
        "SELECT {cols} FROM {} WHERE id=?1 AND user_id=?2",
        kind.table()
    );
    conn.query_row(&sql, params![id, user_id], map)
        .optional()?
        .ok_or(Error::NotFound {
            kind: kind.label(),
            id,
        })
}

pub fn get_income(conn: &Connection, user_id: &str, id: i64) -> Result<IncomeRecord> {
    fetch_one(conn, RecordKind::Income, INCOME_COLS, user_id, id, income_from_row)
}

pub fn get_outgoing(conn: &Connection, user_id: &str, id: i64) -> Result<OutgoingRecord> {
    fetch_one(conn, RecordKind::Outgoing, OUTGOING_COLS, user_id, id, outgoing_from_row)
}

pub fn get_savings(conn: &Connection, user_id: &str, id: i64) -> Result<SavingsRecord> {
    fetch_one(conn, RecordKind::Savings, SAVINGS_COLS, user_id, id, savings_from_row)
}

pub fn get_debt(conn: &Connection, user_id: &str, id: i64) -> Result<DebtRecord> {
    fetch_one(conn, RecordKind::Debt, DEBT_COLS, user_id, id, debt_from_row)
}

pub fn get_wishlist(conn: &Connection, user_id: &str, id: i64) -> Result<WishlistRecord> {
    fetch_one(conn, RecordKind::Wishlist, WISHLIST_COLS, user_id, id, wishlist_from_row)
}

pub fn get_account(conn: &Connection, user_id: &str, id: i64) -> Result<AccountRecord> {
    fetch_one(conn, RecordKind::Account, ACCOUNT_COLS, user_id, id, account_from_row)
}

pub fn get_spending(conn: &Connection, user_id: &str, id: i64) -> Result<SpendingLogRecord> {
    fetch_one(conn, RecordKind::Spending, SPENDING_COLS, user_id, id, spending_from_row)
}

pub fn add_income(conn: &Connection, user_id: &str, n: &NewIncome) -> Result<IncomeRecord> {
    require_text("source", &n.source)?;
    require_non_negative("amount", n.amount)?;
    check_day_of_month(n.day_of_month)?;
    conn.execute(
        "INSERT INTO income(user_id, source, amount, category, frequency, currency, day_of_month)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            user_id,
            n.source.trim(),
            n.amount.to_string(),
            n.category.trim(),
            n.frequency.as_str(),
            normalize_currency(&n.currency),
            n.day_of_month
        ],
    )?;
    let id = conn.last_insert_rowid();
    debug!(user = %user_id, id, "income added");
    get_income(conn, user_id, id)
}

pub fn update_income(
    conn: &Connection,
    user_id: &str,
    id: i64,
    n: &NewIncome,
) -> Result<IncomeRecord> {
    require_text("source", &n.source)?;
    require_non_negative("amount", n.amount)?;
    check_day_of_month(n.day_of_month)?;
    let changed = conn.execute(
        "UPDATE income SET source=?1, amount=?2, category=?3, frequency=?4, currency=?5, day_of_month=?6
         WHERE id=?7 AND user_id=?8",
        params![
            n.source.trim(),
            n.amount.to_string(),
            n.category.trim(),
            n.frequency.as_str(),
            normalize_currency(&n.currency),
            n.day_of_month,
            id,
            user_id
        ],
    )?;
    if changed == 0 {
        return Err(Error::NotFound {
            kind: RecordKind::Income.label(),
            id,
        });
    }
    get_income(conn, user_id, id)
}

pub fn add_outgoing(conn: &Connection, user_id: &str, n: &NewOutgoing) -> Result<OutgoingRecord> {
    validate_outgoing(n)?;
    conn.execute(
        "INSERT INTO outgoings(user_id, description, amount, category, date, frequency, currency, is_recurring, day_of_month)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            user_id,
            n.description.trim(),
            n.amount.to_string(),
            n.category.trim(),
            n.date.trim(),
            n.frequency.as_str(),
            normalize_currency(&n.currency),
            n.is_recurring,
            n.day_of_month
        ],
    )?;
    let id = conn.last_insert_rowid();
    debug!(user = %user_id, id, "outgoing added");
    get_outgoing(conn, user_id, id)
}

pub fn update_outgoing(
    conn: &Connection,
    user_id: &str,
    id: i64,
    n: &NewOutgoing,
) -> Result<OutgoingRecord> {
    validate_outgoing(n)?;
    let changed = conn.execute(
        "UPDATE outgoings SET description=?1, amount=?2, category=?3, date=?4, frequency=?5,
             currency=?6, is_recurring=?7, day_of_month=?8
         WHERE id=?9 AND user_id=?10",
        params![
            n.description.trim(),
            n.amount.to_string(),
            n.category.trim(),
            n.date.trim(),
            n.frequency.as_str(),
            normalize_currency(&n.currency),
            n.is_recurring,
            n.day_of_month,
            id,
            user_id
        ],
    )?;
    if changed == 0 {
        return Err(Error::NotFound {
            kind: RecordKind::Outgoing.label(),
            id,
        });
    }
    get_outgoing(conn, user_id, id)
}

fn validate_savings(n: &NewSavings) -> Result<()> {
    require_text("name", &n.name)?;
    require_non_negative("balance", n.balance)?;
    if let Some(t) = n.target {
        require_non_negative("target", t)?;
    }
    Ok(())
}

fn validate_debt(n: &NewDebt) -> Result<()> {
    require_text("name", &n.name)?;
    require_non_negative("balance", n.balance)?;
    require_non_negative("interest rate", n.interest_rate)?;
    require_non_negative("minimum payment", n.min_payment)?;
    check_optional_date("deadline", n.deadline.as_deref())
}

fn validate_wishlist(n: &NewWishlist) -> Result<()> {
    require_text("item", &n.item)?;
    require_non_negative("cost", n.cost)?;
    require_non_negative("saved", n.saved)?;
    check_optional_date("deadline", n.deadline.as_deref())
}

fn ensure_changed(changed: usize, kind: RecordKind, id: i64) -> Result<()> {
    if changed == 0 {
        return Err(Error::NotFound {
            kind: kind.label(),
            id,
        });
    }
    Ok(())
}

pub fn add_savings(conn: &Connection, user_id: &str, n: &NewSavings) -> Result<SavingsRecord> {
    validate_savings(n)?;
    conn.execute(
        "INSERT INTO savings(user_id, name, balance, target, category, currency)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            user_id,
            n.name.trim(),
            n.balance.to_string(),
            n.target.map(|t| t.to_string()),
            n.category.trim(),
            normalize_currency(&n.currency)
        ],
    )?;
    let id = conn.last_insert_rowid();
    debug!(user = %user_id, id, "savings goal added");
    get_savings(conn, user_id, id)
}

/// Replace a savings goal's fields. Milestones already issued for it stay
/// issued, whatever the new target.
pub fn update_savings(
    conn: &Connection,
    user_id: &str,
    id: i64,
    n: &NewSavings,
) -> Result<SavingsRecord> {
    validate_savings(n)?;
    let changed = conn.execute(
        "UPDATE savings SET name=?1, balance=?2, target=?3, category=?4, currency=?5
         WHERE id=?6 AND user_id=?7",
        params![
            n.name.trim(),
            n.balance.to_string(),
            n.target.map(|t| t.to_string()),
            n.category.trim(),
            normalize_currency(&n.currency),
            id,
            user_id
        ],
    )?;
    ensure_changed(changed, RecordKind::Savings, id)?;
    get_savings(conn, user_id, id)
}

pub fn add_debt(conn: &Connection, user_id: &str, n: &NewDebt) -> Result<DebtRecord> {
    validate_debt(n)?;
    conn.execute(
        "INSERT INTO debt(user_id, name, balance, interest_rate, min_payment, priority, deadline, currency)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            user_id,
            n.name.trim(),
            n.balance.to_string(),
            n.interest_rate.to_string(),
            n.min_payment.to_string(),
            n.priority.as_str(),
            n.deadline,
            normalize_currency(&n.currency)
        ],
    )?;
    let id = conn.last_insert_rowid();
    debug!(user = %user_id, id, "debt added");
    get_debt(conn, user_id, id)
}

pub fn update_debt(
    conn: &Connection,
    user_id: &str,
    id: i64,
    n: &NewDebt,
) -> Result<DebtRecord> {
    validate_debt(n)?;
    let changed = conn.execute(
        "UPDATE debt SET name=?1, balance=?2, interest_rate=?3, min_payment=?4, priority=?5,
             deadline=?6, currency=?7
         WHERE id=?8 AND user_id=?9",
        params![
            n.name.trim(),
            n.balance.to_string(),
            n.interest_rate.to_string(),
            n.min_payment.to_string(),
            n.priority.as_str(),
            n.deadline,
            normalize_currency(&n.currency),
            id,
            user_id
        ],
    )?;
    ensure_changed(changed, RecordKind::Debt, id)?;
    get_debt(conn, user_id, id)
}

pub fn add_wishlist(conn: &Connection, user_id: &str, n: &NewWishlist) -> Result<WishlistRecord> {
    validate_wishlist(n)?;
    let saved = n.saved.min(n.cost);
    conn.execute(
        "INSERT INTO wishlist(user_id, item, cost, saved, priority, deadline, currency)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            user_id,
            n.item.trim(),
            n.cost.to_string(),
            saved.to_string(),
            n.priority.as_str(),
            n.deadline,
            normalize_currency(&n.currency)
        ],
    )?;
    let id = conn.last_insert_rowid();
    debug!(user = %user_id, id, "wishlist item added");
    get_wishlist(conn, user_id, id)
}

/// Replace a wishlist item's fields; `saved` is clamped to the new cost.
pub fn update_wishlist(
    conn: &Connection,
    user_id: &str,
    id: i64,
    n: &NewWishlist,
) -> Result<WishlistRecord> {
    validate_wishlist(n)?;
    let changed = conn.execute(
        "UPDATE wishlist SET item=?1, cost=?2, saved=?3, priority=?4, deadline=?5, currency=?6
         WHERE id=?7 AND user_id=?8",
        params![
            n.item.trim(),
            n.cost.to_string(),
            n.saved.min(n.cost).to_string(),
            n.priority.as_str(),
            n.deadline,
            normalize_currency(&n.currency),
            id,
            user_id
        ],
    )?;
    ensure_changed(changed, RecordKind::Wishlist, id)?;
    get_wishlist(conn, user_id, id)
}

pub fn add_account(conn: &Connection, user_id: &str, n: &NewAccount) -> Result<AccountRecord> {
    require_text("name", &n.name)?;
    conn.execute(
        "INSERT INTO accounts(user_id, name, type, balance, currency) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            user_id,
            n.name.trim(),
            n.account_type.as_str(),
            n.balance.to_string(),
            normalize_currency(&n.currency)
        ],
    )?;
    let id = conn.last_insert_rowid();
    debug!(user = %user_id, id, "account added");
    get_account(conn, user_id, id)
}

pub fn update_account(
    conn: &Connection,
    user_id: &str,
    id: i64,
    n: &NewAccount,
) -> Result<AccountRecord> {
    require_text("name", &n.name)?;
    let changed = conn.execute(
        "UPDATE accounts SET name=?1, type=?2, balance=?3, currency=?4 WHERE id=?5 AND user_id=?6",
        params![
            n.name.trim(),
            n.account_type.as_str(),
            n.balance.to_string(),
            normalize_currency(&n.currency),
            id,
            user_id
        ],
    )?;
    ensure_changed(changed, RecordKind::Account, id)?;
    get_account(conn, user_id, id)
}

pub fn add_spending(
    conn: &Connection,
    user_id: &str,
    n: &NewSpending,
) -> Result<SpendingLogRecord> {
    require_text("description", &n.description)?;
    require_positive("amount", n.amount)?;
    conn.execute(
        "INSERT INTO spending_log(user_id, description, amount, currency, category, date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            user_id,
            n.description.trim(),
            n.amount.to_string(),
            normalize_currency(&n.currency),
            n.category.trim(),
            n.date
        ],
    )?;
    let id = conn.last_insert_rowid();
    debug!(user = %user_id, id, "spending logged");
    get_spending(conn, user_id, id)
}

/// Delete one of the caller's records.
pub fn delete_record(conn: &Connection, kind: RecordKind, user_id: &str, id: i64) -> Result<()> {
    let sql = format!("DELETE FROM {} WHERE id=?1 AND user_id=?2", kind.table());
    let changed = conn.execute(&sql, params![id, user_id])?;
    if changed == 0 {
        return Err(Error::NotFound {
            kind: kind.label(),
            id,
        });
    }
    debug!(user = %user_id, id, kind = kind.label(), "record deleted");
    Ok(())
}

/// Add to a savings goal, optionally funding it from one of the caller's accounts.
pub fn deposit_savings(
    conn: &mut Connection,
    user_id: &str,
    id: i64,
    amount: Decimal,
    from_account: Option<i64>,
) -> Result<SavingsRecord> {
    require_positive("deposit", amount)?;
    let tx = conn.transaction()?;
    let mut goal = get_savings(&tx, user_id, id)?;
    goal.balance = goal.balance.checked_add(amount).ok_or_else(|| Error::Overflow {
        currency: goal.currency.clone().unwrap_or_default(),
    })?;
    tx.execute(
        "UPDATE savings SET balance=?1 WHERE id=?2 AND user_id=?3",
        params![goal.balance.to_string(), id, user_id],
    )?;
    if let Some(account_id) = from_account {
        tx.deduct_account_balance(user_id, account_id, amount)?;
    }
    tx.commit()?;
    Ok(goal)
}

/// Pay down a debt. The balance floors at zero; the account, if any, is
/// debited the full payment.
pub fn pay_debt(
    conn: &mut Connection,
    user_id: &str,
    id: i64,
    amount: Decimal,
    from_account: Option<i64>,
) -> Result<DebtRecord> {
    require_positive("payment", amount)?;
    let tx = conn.transaction()?;
    let mut debt = get_debt(&tx, user_id, id)?;
    debt.balance = (debt.balance - amount.min(debt.balance)).max(Decimal::ZERO);
    tx.execute(
        "UPDATE debt SET balance=?1 WHERE id=?2 AND user_id=?3",
        params![debt.balance.to_string(), id, user_id],
    )?;
    if let Some(account_id) = from_account {
        tx.deduct_account_balance(user_id, account_id, amount)?;
    }
    tx.commit()?;
    Ok(debt)
}

/// Put money towards a wishlist item. `saved` never exceeds `cost`; only the
/// part actually applied is debited from the account.
pub fn deposit_wishlist(
    conn: &mut Connection,
    user_id: &str,
    id: i64,
    amount: Decimal,
    from_account: Option<i64>,
) -> Result<WishlistRecord> {
    require_positive("deposit", amount)?;
    let tx = conn.transaction()?;
    let mut wish = get_wishlist(&tx, user_id, id)?;
    let before = wish.saved;
    wish.saved = before.saturating_add(amount).min(wish.cost);
    let applied = (wish.saved - before).max(Decimal::ZERO);
    tx.execute(
        "UPDATE wishlist SET saved=?1 WHERE id=?2 AND user_id=?3",
        params![wish.saved.to_string(), id, user_id],
    )?;
    if let Some(account_id) = from_account {
        if applied > Decimal::ZERO {
            tx.deduct_account_balance(user_id, account_id, applied)?;
        }
    }
    tx.commit()?;
    Ok(wish)
}

pub fn set_account_balance(
    conn: &Connection,
    user_id: &str,
    id: i64,
    balance: Decimal,
) -> Result<AccountRecord> {
    let changed = conn.execute(
        "UPDATE accounts SET balance=?1 WHERE id=?2 AND user_id=?3",
        params![balance.to_string(), id, user_id],
    )?;
    if changed == 0 {
        return Err(Error::NotFound {
            kind: RecordKind::Account.label(),
            id,
        });
    }
    get_account(conn, user_id, id)
}
