// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::*;
use rusqlite::Connection;
use zenfin::Error;
use zenfin::ledger::{
    self, NewAccount, NewDebt, NewIncome, NewOutgoing, NewSavings, NewSpending, NewWishlist,
    RecordKind,
};
use zenfin::models::{AccountType, Frequency, NotificationKind, Priority};
use zenfin::notify::refresh_notifications;
use zenfin::store::RecordStore;

fn add_account(conn: &Connection, user: &str, balance: &str) -> i64 {
    ledger::add_account(
        conn,
        user,
        &NewAccount {
            name: "Current".into(),
            account_type: AccountType::Checking,
            balance: dec(balance),
            currency: Some("gbp".into()),
        },
    )
    .unwrap()
    .id
}

fn add_wish(conn: &Connection, cost: &str, saved: &str) -> i64 {
    ledger::add_wishlist(
        conn,
        USER,
        &NewWishlist {
            item: "Bike".into(),
            cost: dec(cost),
            saved: dec(saved),
            priority: Priority::Medium,
            deadline: None,
            currency: None,
        },
    )
    .unwrap()
    .id
}

fn add_debt(conn: &Connection, balance: &str) -> i64 {
    ledger::add_debt(
        conn,
        USER,
        &NewDebt {
            name: "Credit Card".into(),
            balance: dec(balance),
            interest_rate: dec("19.9"),
            min_payment: dec("60"),
            priority: Priority::High,
            deadline: Some("2026-01-31".into()),
            currency: Some("GBP".into()),
        },
    )
    .unwrap()
    .id
}

#[test]
fn wishlist_deposit_is_clamped_to_cost() {
    let mut conn = base_conn();
    let acct = add_account(&conn, USER, "2000");
    let id = add_wish(&conn, "1000", "800");

    let w = ledger::deposit_wishlist(&mut conn, USER, id, dec("500"), Some(acct)).unwrap();
    assert_eq!(w.saved, dec("1000"));
    assert_eq!(ledger::get_wishlist(&conn, USER, id).unwrap().saved, dec("1000"));
    // only the 200 actually applied leaves the account
    assert_eq!(ledger::get_account(&conn, USER, acct).unwrap().balance, dec("1800"));
}

#[test]
fn wishlist_saved_is_clamped_at_creation() {
    let conn = base_conn();
    let id = add_wish(&conn, "100", "250");
    assert_eq!(ledger::get_wishlist(&conn, USER, id).unwrap().saved, dec("100"));
}

#[test]
fn debt_payment_floors_at_zero_and_debits_account() {
    let mut conn = base_conn();
    let acct = add_account(&conn, USER, "1000");
    let id = add_debt(&conn, "300");

    let d = ledger::pay_debt(&mut conn, USER, id, dec("120"), Some(acct)).unwrap();
    assert_eq!(d.balance, dec("180"));
    let d = ledger::pay_debt(&mut conn, USER, id, dec("500"), None).unwrap();
    assert!(d.balance.is_zero());
    assert_eq!(ledger::get_account(&conn, USER, acct).unwrap().balance, dec("880"));
}

#[test]
fn savings_deposit_adds_to_balance() {
    let mut conn = base_conn();
    let acct = add_account(&conn, USER, "100");
    let goal = ledger::add_savings(
        &conn,
        USER,
        &zenfin::ledger::NewSavings {
            name: "Holiday".into(),
            balance: dec("800"),
            target: Some(dec("2000")),
            category: "Travel".into(),
            currency: None,
        },
    )
    .unwrap();
    let g = ledger::deposit_savings(&mut conn, USER, goal.id, dec("150.25"), Some(acct)).unwrap();
    assert_eq!(g.balance, dec("950.25"));
    let acct = ledger::get_account(&conn, USER, acct).unwrap();
    assert_eq!(acct.balance, dec("-50.25"));
    assert_eq!(acct.currency.as_deref(), Some("GBP"));
}

#[test]
fn non_positive_deposits_are_rejected() {
    let mut conn = base_conn();
    let id = add_wish(&conn, "1000", "0");
    let err = ledger::deposit_wishlist(&mut conn, USER, id, dec("0"), None).unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
    let debt = add_debt(&conn, "100");
    let err = ledger::pay_debt(&mut conn, USER, debt, dec("-5"), None).unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn other_users_ids_are_not_found() {
    let mut conn = base_conn();
    let id = add_wish(&conn, "1000", "0");
    let bobs_account = add_account(&conn, "bob", "500");

    let err = ledger::deposit_wishlist(&mut conn, "bob", id, dec("10"), None).unwrap_err();
    assert!(err.is_not_found());
    let err = ledger::delete_record(&conn, RecordKind::Wishlist, "bob", id).unwrap_err();
    assert!(err.is_not_found());

    // debiting someone else's account rolls the deposit back
    let err = ledger::deposit_wishlist(&mut conn, USER, id, dec("10"), Some(bobs_account))
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(ledger::get_wishlist(&conn, USER, id).unwrap().saved.is_zero());
    assert_eq!(
        ledger::get_account(&conn, "bob", bobs_account).unwrap().balance,
        dec("500")
    );

    ledger::delete_record(&conn, RecordKind::Wishlist, USER, id).unwrap();
    assert!(conn.list_wishlist(USER).unwrap().is_empty());
}

#[test]
fn income_update_replaces_fields() {
    let conn = base_conn();
    let mut n = NewIncome {
        source: "Salary".into(),
        amount: dec("3200"),
        category: "Salary".into(),
        frequency: Frequency::Monthly,
        currency: Some(" usd ".into()),
        day_of_month: Some(25),
    };
    let rec = ledger::add_income(&conn, USER, &n).unwrap();
    assert_eq!(rec.currency.as_deref(), Some("USD"));

    n.amount = dec("3400");
    n.currency = Some(String::new());
    let rec = ledger::update_income(&conn, USER, rec.id, &n).unwrap();
    assert_eq!(rec.amount, dec("3400"));
    assert_eq!(rec.currency, None);

    let err = ledger::update_income(&conn, "bob", rec.id, &n).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn one_off_outgoing_needs_a_date() {
    let conn = base_conn();
    let mut n = NewOutgoing {
        description: "Concert".into(),
        amount: dec("45"),
        category: "Fun".into(),
        date: String::new(),
        frequency: Frequency::OneTime,
        currency: None,
        is_recurring: false,
        day_of_month: None,
    };
    let err = ledger::add_outgoing(&conn, USER, &n).unwrap_err();
    assert!(matches!(err, Error::Validation { field: "date", .. }));

    n.date = "2025-13-01".into();
    assert!(ledger::add_outgoing(&conn, USER, &n).is_err());

    n.date = "2025-06-01".into();
    let rec = ledger::add_outgoing(&conn, USER, &n).unwrap();
    assert_eq!(rec.date, "2025-06-01");
    assert!(!rec.is_recurring);
}

#[test]
fn day_of_month_out_of_range_is_rejected() {
    let conn = base_conn();
    let n = NewOutgoing {
        description: "Gym".into(),
        amount: dec("30"),
        category: "Health".into(),
        date: String::new(),
        frequency: Frequency::Monthly,
        currency: None,
        is_recurring: true,
        day_of_month: Some(32),
    };
    let err = ledger::add_outgoing(&conn, USER, &n).unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn spending_log_is_newest_first() {
    let conn = base_conn();
    for (i, day) in [3u32, 9, 1].iter().enumerate() {
        ledger::add_spending(
            &conn,
            USER,
            &NewSpending {
                description: format!("coffee {}", i),
                amount: dec("3.20"),
                currency: None,
                category: "Food".into(),
                date: at(2025, 4, *day, 8),
            },
        )
        .unwrap();
    }
    let log = conn.list_spending_log(USER).unwrap();
    let days: Vec<String> = log.iter().map(|s| s.date.format("%d").to_string()).collect();
    assert_eq!(days, vec!["09", "03", "01"]);
}

#[test]
fn load_user_records_is_user_scoped() {
    let conn = base_conn();
    add_account(&conn, USER, "1");
    add_account(&conn, "bob", "2");
    add_wish(&conn, "10", "0");
    let mine = conn.load_user_records(USER).unwrap();
    assert_eq!(mine.accounts.len(), 1);
    assert_eq!(mine.wishlist.len(), 1);
    let bobs = conn.load_user_records("bob").unwrap();
    assert_eq!(bobs.accounts.len(), 1);
    assert!(bobs.wishlist.is_empty());
}

fn holiday(balance: &str, target: &str) -> NewSavings {
    NewSavings {
        name: "Holiday".into(),
        balance: dec(balance),
        target: Some(dec(target)),
        category: "Travel".into(),
        currency: Some("EUR".into()),
    }
}

#[test]
fn savings_update_replaces_fields_and_is_user_scoped() {
    let conn = base_conn();
    let goal = ledger::add_savings(&conn, USER, &holiday("100", "1000")).unwrap();

    let mut n = holiday("100", "1500");
    n.name = "Japan".into();
    let rec = ledger::update_savings(&conn, USER, goal.id, &n).unwrap();
    assert_eq!(rec.id, goal.id);
    assert_eq!(rec.name, "Japan");
    assert_eq!(rec.target, Some(dec("1500")));

    let err = ledger::update_savings(&conn, "bob", goal.id, &n).unwrap_err();
    assert!(err.is_not_found());

    n.target = Some(dec("-1"));
    let err = ledger::update_savings(&conn, USER, goal.id, &n).unwrap_err();
    assert!(matches!(err, Error::Validation { field: "target", .. }));
}

#[test]
fn raising_a_savings_target_keeps_issued_milestones() {
    let mut conn = base_conn();
    let goal = ledger::add_savings(&conn, USER, &holiday("600", "1000")).unwrap();
    let now = at(2025, 3, 10, 9);
    let list = refresh_notifications(&mut conn, USER, "USD", now).unwrap();
    assert_eq!(list.len(), 2);

    // 600 of 2000 is back under 50%, then 1200 crosses it again
    ledger::update_savings(&conn, USER, goal.id, &holiday("600", "2000")).unwrap();
    ledger::deposit_savings(&mut conn, USER, goal.id, dec("600"), None).unwrap();
    let list = refresh_notifications(&mut conn, USER, "USD", now + chrono::Duration::days(1))
        .unwrap();
    assert_eq!(list.len(), 2);
    let fifty = list
        .iter()
        .filter(|n| n.kind == NotificationKind::SavingsMilestone(50))
        .count();
    assert_eq!(fifty, 1);
}

#[test]
fn debt_update_changes_rate_and_minimum() {
    let conn = base_conn();
    let id = add_debt(&conn, "300");
    let n = NewDebt {
        name: "Credit Card".into(),
        balance: dec("300"),
        interest_rate: dec("24.9"),
        min_payment: dec("75"),
        priority: Priority::Low,
        deadline: None,
        currency: Some("GBP".into()),
    };
    let d = ledger::update_debt(&conn, USER, id, &n).unwrap();
    assert_eq!(d.interest_rate, dec("24.9"));
    assert_eq!(d.min_payment, dec("75"));
    assert_eq!(d.priority, Priority::Low);
    assert_eq!(d.deadline, None);

    assert!(ledger::update_debt(&conn, "bob", id, &n).unwrap_err().is_not_found());
    let bad = NewDebt {
        deadline: Some("someday".into()),
        ..n
    };
    assert!(ledger::update_debt(&conn, USER, id, &bad).is_err());
}

#[test]
fn wishlist_update_clamps_saved_to_new_cost() {
    let conn = base_conn();
    let id = add_wish(&conn, "1000", "800");
    let n = NewWishlist {
        item: "Cheaper bike".into(),
        cost: dec("500"),
        saved: dec("800"),
        priority: Priority::High,
        deadline: Some("2025-09-01".into()),
        currency: None,
    };
    let w = ledger::update_wishlist(&conn, USER, id, &n).unwrap();
    assert_eq!(w.cost, dec("500"));
    assert_eq!(w.saved, dec("500"));
    assert_eq!(w.deadline.as_deref(), Some("2025-09-01"));
    assert!(ledger::update_wishlist(&conn, "bob", id, &n).unwrap_err().is_not_found());
}

#[test]
fn account_update_renames_and_retypes() {
    let conn = base_conn();
    let id = add_account(&conn, USER, "250");
    let n = NewAccount {
        name: "Rainy day".into(),
        account_type: AccountType::Savings,
        balance: dec("250"),
        currency: Some("GBP".into()),
    };
    let a = ledger::update_account(&conn, USER, id, &n).unwrap();
    assert_eq!(a.name, "Rainy day");
    assert_eq!(a.account_type, AccountType::Savings);
    assert_eq!(a.balance, dec("250"));

    assert!(ledger::update_account(&conn, "bob", id, &n).unwrap_err().is_not_found());
    let blank = NewAccount {
        name: "  ".into(),
        ..n
    };
    assert!(matches!(
        ledger::update_account(&conn, USER, id, &blank).unwrap_err(),
        Error::Validation { field: "name", .. }
    ));
}
