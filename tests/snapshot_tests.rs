// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use chrono::Duration;
use common::*;
use zenfin::models::{Frequency, UserRecords};
use zenfin::snapshot::{RECENT_SPENDING_LIMIT, build_snapshot, spending_patterns};

fn sample() -> UserRecords {
    UserRecords {
        income: vec![
            income(1, "3200", Some("GBP"), Frequency::Monthly),
            income(2, "500000", Some("IDR"), Frequency::Monthly),
        ],
        outgoings: vec![bill(1, "950", None, 1), bill(2, "100", Some("IDR"), 20)],
        savings: vec![savings(1, "1500", Some("5000"), Some("EUR"))],
        debt: vec![debt(1, "2400", "60", None)],
        wishlist: vec![wish(1, "1000", "800", Some("USD"))],
        accounts: vec![
            account(1, "Current", "1200.50", Some("GBP")),
            account(2, "Joint", "300", None),
            account(3, "Tabungan", "2000000", Some("IDR")),
        ],
        spending_log: vec![],
    }
}

#[test]
fn currencies_are_distinct_and_resolved() {
    let snap = build_snapshot(&sample(), "GBP", at(2025, 3, 10, 9)).unwrap();
    assert_eq!(snap.currencies, vec!["GBP", "IDR", "EUR", "USD"]);
    assert_eq!(snap.expenses[0].currency, "GBP");
    assert_eq!(snap.debts[0].currency, "GBP");
    assert!((snap.debts[0].apr - 19.9).abs() < 1e-9);
    assert_eq!(snap.savings[0].target, Some(5000.0));
}

#[test]
fn account_balances_grouped_per_currency() {
    let snap = build_snapshot(&sample(), "GBP", at(2025, 3, 10, 9)).unwrap();
    let groups = &snap.account_balances_by_currency;
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].currency, "GBP");
    assert_eq!(groups[0].accounts.len(), 2);
    assert_eq!(groups[0].total, 1500.5);
    assert_eq!(groups[1].currency, "IDR");
    assert_eq!(groups[1].total, 2_000_000.0);
}

#[test]
fn recent_spending_keeps_latest_fifty() {
    let now = at(2025, 6, 30, 12);
    let mut records = UserRecords::default();
    for i in 0..60 {
        records.spending_log.push(spend(
            i,
            "1",
            None,
            "Food",
            now - Duration::hours(i * 3),
        ));
    }
    // store order is not trusted
    records.spending_log.reverse();
    let snap = build_snapshot(&records, "USD", now).unwrap();
    assert_eq!(snap.recent_spending.len(), RECENT_SPENDING_LIMIT);
    assert_eq!(snap.recent_spending[0].date, now);
    assert!(
        snap.recent_spending
            .windows(2)
            .all(|w| w[0].date >= w[1].date)
    );
}

#[test]
fn spending_patterns_cover_last_thirty_days() {
    let now = at(2025, 6, 30, 12);
    let records = UserRecords {
        spending_log: vec![
            spend(1, "10", Some("USD"), "Food", now - Duration::days(1)),
            spend(2, "15", None, "Food", now - Duration::days(2)),
            spend(3, "7", Some("EUR"), "Food", now - Duration::days(3)),
            spend(4, "40", Some("USD"), "Fun", now - Duration::days(29)),
            spend(5, "99", Some("USD"), "Food", now - Duration::days(31)),
        ],
        ..Default::default()
    };
    let patterns = spending_patterns(&records, "USD", now).unwrap();
    let flat: Vec<(&str, &str, f64, usize)> = patterns
        .iter()
        .map(|p| (p.category.as_str(), p.currency.as_str(), p.total, p.count))
        .collect();
    assert_eq!(
        flat,
        vec![
            ("Fun", "USD", 40.0, 1),
            ("Food", "USD", 25.0, 2),
            ("Food", "EUR", 7.0, 1),
        ]
    );
}

#[test]
fn spending_patterns_ignore_future_dated_entries() {
    let now = at(2025, 6, 30, 12);
    let records = UserRecords {
        spending_log: vec![
            spend(1, "12", None, "Food", now - Duration::days(2)),
            spend(2, "500", None, "Food", now + Duration::days(3)),
            spend(3, "80", None, "Travel", now + Duration::hours(1)),
        ],
        ..Default::default()
    };
    let patterns = spending_patterns(&records, "USD", now).unwrap();
    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].category, "Food");
    assert_eq!(patterns[0].total, 12.0);
    assert_eq!(patterns[0].count, 1);
}

#[test]
fn upcoming_matches_dashboard_projection() {
    let snap = build_snapshot(&sample(), "GBP", at(2025, 3, 29, 9)).unwrap();
    let up: Vec<(u32, i64)> = snap
        .upcoming_expenses
        .iter()
        .map(|u| (u.day_of_month, u.days_until))
        .collect();
    assert_eq!(up, vec![(1, 2), (20, 21)]);
}

#[test]
fn serializes_with_camel_case_keys() {
    let snap = build_snapshot(&sample(), "GBP", at(2025, 3, 10, 9)).unwrap();
    let v = serde_json::to_value(&snap).unwrap();
    for key in [
        "currencies",
        "income",
        "expenses",
        "debts",
        "savings",
        "wishlist",
        "recentSpending",
        "spendingPatterns",
        "upcomingExpenses",
        "accountBalancesByCurrency",
    ] {
        assert!(v.get(key).is_some(), "missing {}", key);
    }
    assert_eq!(v["debts"][0]["minPayment"], 60.0);
    assert_eq!(v["accountBalancesByCurrency"][0]["accounts"][0]["type"], "Checking");
}
