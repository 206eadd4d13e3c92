// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use zenfin::db::init_schema;
use zenfin::models::{
    AccountRecord, AccountType, DebtRecord, Frequency, IncomeRecord, OutgoingRecord, Priority,
    SavingsRecord, SpendingLogRecord, WishlistRecord,
};

pub const USER: &str = "alice";

pub fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    conn
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn ccy(c: Option<&str>) -> Option<String> {
    c.map(str::to_string)
}

pub fn income(id: i64, amount: &str, currency: Option<&str>, frequency: Frequency) -> IncomeRecord {
    IncomeRecord {
        id,
        user_id: USER.into(),
        source: format!("income {}", id),
        amount: dec(amount),
        category: "Salary".into(),
        frequency,
        currency: ccy(currency),
        day_of_month: None,
    }
}

pub fn one_off(id: i64, amount: &str, currency: Option<&str>, category: &str, date: &str) -> OutgoingRecord {
    OutgoingRecord {
        id,
        user_id: USER.into(),
        description: format!("outgoing {}", id),
        amount: dec(amount),
        category: category.into(),
        date: date.into(),
        frequency: Frequency::OneTime,
        currency: ccy(currency),
        is_recurring: false,
        day_of_month: None,
    }
}

pub fn bill(id: i64, amount: &str, currency: Option<&str>, day: u32) -> OutgoingRecord {
    OutgoingRecord {
        id,
        user_id: USER.into(),
        description: format!("bill {}", id),
        amount: dec(amount),
        category: "Bills".into(),
        date: String::new(),
        frequency: Frequency::Monthly,
        currency: ccy(currency),
        is_recurring: true,
        day_of_month: Some(day),
    }
}

pub fn savings(id: i64, balance: &str, target: Option<&str>, currency: Option<&str>) -> SavingsRecord {
    SavingsRecord {
        id,
        user_id: USER.into(),
        name: format!("goal {}", id),
        balance: dec(balance),
        target: target.map(dec),
        category: "General".into(),
        currency: ccy(currency),
    }
}

pub fn debt(id: i64, balance: &str, min_payment: &str, currency: Option<&str>) -> DebtRecord {
    DebtRecord {
        id,
        user_id: USER.into(),
        name: format!("debt {}", id),
        balance: dec(balance),
        interest_rate: dec("19.9"),
        min_payment: dec(min_payment),
        priority: Priority::High,
        deadline: None,
        currency: ccy(currency),
    }
}

pub fn wish(id: i64, cost: &str, saved: &str, currency: Option<&str>) -> WishlistRecord {
    WishlistRecord {
        id,
        user_id: USER.into(),
        item: format!("wish {}", id),
        cost: dec(cost),
        saved: dec(saved),
        priority: Priority::Low,
        deadline: None,
        currency: ccy(currency),
    }
}

pub fn account(id: i64, name: &str, balance: &str, currency: Option<&str>) -> AccountRecord {
    AccountRecord {
        id,
        user_id: USER.into(),
        name: name.into(),
        account_type: AccountType::Checking,
        balance: dec(balance),
        currency: ccy(currency),
    }
}

pub fn spend(
    id: i64,
    amount: &str,
    currency: Option<&str>,
    category: &str,
    date: DateTime<Utc>,
) -> SpendingLogRecord {
    SpendingLogRecord {
        id,
        user_id: USER.into(),
        description: format!("spend {}", id),
        amount: dec(amount),
        currency: ccy(currency),
        category: category.into(),
        date,
    }
}
