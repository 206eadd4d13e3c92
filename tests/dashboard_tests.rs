// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::*;
use rust_decimal::Decimal;
use zenfin::dashboard::{
    MAX_TREND_MONTHS, TotalKind, available_by_currency, category_spending_by_currency,
    days_until_due, income_expense_trend, summarize, totals_by_currency, trailing_months,
    upcoming_expenses,
};
use zenfin::models::{Frequency, UserRecords};

#[test]
fn mixed_currency_available_keeps_currencies_apart() {
    let records = UserRecords {
        income: vec![
            income(1, "3000", Some("USD"), Frequency::Monthly),
            income(2, "500000", Some("IDR"), Frequency::Monthly),
        ],
        ..Default::default()
    };
    let available = available_by_currency(&records, "USD", at(2025, 3, 15, 9)).unwrap();
    let pairs: Vec<(&str, Decimal)> = available.iter().collect();
    assert_eq!(
        pairs,
        vec![("USD", dec("3000")), ("IDR", dec("500000"))]
    );
}

#[test]
fn available_subtracts_outgoings_and_min_payments() {
    let now = at(2025, 3, 15, 9);
    let records = UserRecords {
        income: vec![income(1, "3200", Some("GBP"), Frequency::Monthly)],
        outgoings: vec![bill(1, "950", Some("GBP"), 1)],
        debt: vec![debt(1, "2400", "60", Some("GBP")), debt(2, "900", "25", Some("EUR"))],
        spending_log: vec![
            spend(1, "40", Some("GBP"), "Food", at(2025, 3, 2, 12)),
            // last month, excluded
            spend(2, "99", Some("GBP"), "Food", at(2025, 2, 27, 12)),
        ],
        ..Default::default()
    };
    let available = available_by_currency(&records, "GBP", now).unwrap();
    assert_eq!(available.get("GBP"), Some(dec("2150")));
    // EUR only has a debt: still reported, negative
    assert_eq!(available.get("EUR"), Some(dec("-25")));
}

#[test]
fn savings_only_currency_is_not_synthesized_into_available() {
    let records = UserRecords {
        income: vec![income(1, "100", Some("USD"), Frequency::Monthly)],
        savings: vec![savings(1, "500", None, Some("CHF"))],
        ..Default::default()
    };
    let available = available_by_currency(&records, "USD", at(2025, 1, 1, 0)).unwrap();
    assert!(!available.contains("CHF"));
    assert_eq!(available.len(), 1);
}

#[test]
fn default_currency_fallback_partitions_under_default() {
    let records = UserRecords {
        outgoings: vec![one_off(1, "12.50", None, "Food", "2025-03-01")],
        ..Default::default()
    };
    let totals =
        totals_by_currency(&records, TotalKind::Outgoings, "GBP", at(2025, 3, 5, 0)).unwrap();
    assert_eq!(totals.get("GBP"), Some(dec("12.50")));
    assert_eq!(totals.len(), 1);
}

#[test]
fn totals_by_kind_use_the_right_field() {
    let now = at(2025, 6, 10, 0);
    let records = UserRecords {
        savings: vec![savings(1, "750", Some("1000"), Some("USD"))],
        debt: vec![debt(1, "5000", "120", Some("USD"))],
        spending_log: vec![spend(1, "8", Some("USD"), "Coffee", at(2025, 6, 1, 8))],
        ..Default::default()
    };
    let sav = totals_by_currency(&records, TotalKind::Savings, "USD", now).unwrap();
    assert_eq!(sav.get("USD"), Some(dec("750")));
    let dp = totals_by_currency(&records, TotalKind::DebtPayments, "USD", now).unwrap();
    assert_eq!(dp.get("USD"), Some(dec("120")));
    let out = totals_by_currency(&records, TotalKind::Outgoings, "USD", now).unwrap();
    assert_eq!(out.get("USD"), Some(dec("8")));
    let inc = totals_by_currency(&records, TotalKind::Income, "USD", now).unwrap();
    assert!(inc.is_empty());
}

#[test]
fn category_spending_sorted_descending_with_stable_ties() {
    let now = at(2025, 4, 20, 0);
    let records = UserRecords {
        outgoings: vec![
            one_off(1, "30", Some("USD"), "Fun", "2024-11-02"),
            one_off(2, "50", Some("USD"), "Rent", "2025-04-01"),
            one_off(3, "30", Some("USD"), "Travel", "2025-04-03"),
            one_off(4, "9", Some("EUR"), "Food", "2025-04-03"),
        ],
        spending_log: vec![
            spend(1, "25", Some("USD"), "Fun", at(2025, 4, 10, 0)),
            spend(2, "1000", Some("USD"), "Rent", at(2025, 3, 10, 0)),
        ],
        ..Default::default()
    };
    let groups = category_spending_by_currency(&records, "USD", now).unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].currency, "USD");
    let usd: Vec<(&str, Decimal)> = groups[0]
        .categories
        .iter()
        .map(|c| (c.category.as_str(), c.total))
        .collect();
    assert_eq!(
        usd,
        vec![
            ("Fun", dec("55")),
            ("Rent", dec("50")),
            ("Travel", dec("30")),
        ]
    );
    assert_eq!(groups[1].currency, "EUR");
    assert_eq!(groups[1].categories[0].total, dec("9"));
}

#[test]
fn equal_category_totals_keep_insertion_order() {
    let records = UserRecords {
        outgoings: vec![
            one_off(1, "10", Some("USD"), "B", "2025-01-01"),
            one_off(2, "10", Some("USD"), "A", "2025-01-01"),
            one_off(3, "10", Some("USD"), "C", "2025-01-01"),
        ],
        ..Default::default()
    };
    let groups = category_spending_by_currency(&records, "USD", at(2025, 1, 2, 0)).unwrap();
    let names: Vec<&str> = groups[0]
        .categories
        .iter()
        .map(|c| c.category.as_str())
        .collect();
    assert_eq!(names, vec!["B", "A", "C"]);
}

#[test]
fn days_until_wraps_by_thirty() {
    assert_eq!(days_until_due(3, 29), 4);
    assert_eq!(days_until_due(15, 15), 0);
    assert_eq!(days_until_due(20, 15), 5);
    // not calendar accurate: day 31 seen from day 1 is 30 away
    assert_eq!(days_until_due(31, 1), 30);
}

#[test]
fn upcoming_expenses_sorted_and_truncated() {
    let now = at(2025, 1, 29, 10);
    let outgoings = vec![
        bill(1, "10", None, 3),  // 4
        bill(2, "20", None, 29), // 0
        bill(3, "30", None, 30), // 1
        bill(4, "40", None, 10), // 11
        one_off(5, "50", None, "Misc", "2025-01-30"),
        bill(6, "60", None, 28), // 29
        bill(7, "70", None, 1),  // 2
        bill(8, "80", None, 2),  // 3
        bill(9, "90", None, 5),  // 6
    ];
    let up = upcoming_expenses(&outgoings, "USD", now, 6);
    let days: Vec<i64> = up.iter().map(|u| u.days_until).collect();
    assert_eq!(days, vec![0, 1, 2, 3, 4, 6]);
    assert!(up.iter().all(|u| u.currency == "USD"));
    assert_eq!(up[4].outgoing_id, 1);
}

#[test]
fn recurring_without_day_is_not_upcoming() {
    let mut b = bill(1, "10", None, 3);
    b.day_of_month = None;
    let up = upcoming_expenses(&[b], "USD", at(2025, 1, 1, 0), 6);
    assert!(up.is_empty());
}

#[test]
fn trailing_months_cross_year_boundary() {
    let months: Vec<String> = trailing_months(at(2025, 2, 14, 0), 6)
        .iter()
        .map(|d| d.format("%Y-%m").to_string())
        .collect();
    assert_eq!(
        months,
        vec!["2024-09", "2024-10", "2024-11", "2024-12", "2025-01", "2025-02"]
    );
}

#[test]
fn trailing_months_window_is_capped() {
    let now = at(2025, 2, 14, 0);
    let months = trailing_months(now, usize::MAX);
    assert_eq!(months.len(), MAX_TREND_MONTHS);
    assert_eq!(months.last().unwrap().format("%Y-%m").to_string(), "2025-02");
    assert_eq!(months[0].format("%Y-%m").to_string(), "2015-03");
    assert!(trailing_months(now, 0).is_empty());
}

#[test]
fn trend_has_full_window_per_currency() {
    let now = at(2025, 3, 31, 23);
    let records = UserRecords {
        income: vec![
            income(1, "3000", Some("USD"), Frequency::Monthly),
            income(2, "400", Some("USD"), Frequency::Yearly),
            income(3, "900", Some("EUR"), Frequency::Monthly),
        ],
        outgoings: vec![
            bill(1, "1000", Some("USD"), 1),
            one_off(2, "250", Some("USD"), "Travel", "2025-01-17"),
            one_off(3, "999", Some("USD"), "Old", "2024-01-17"),
        ],
        ..Default::default()
    };
    let trend = income_expense_trend(&records, "USD", now, 6).unwrap();
    assert_eq!(trend.len(), 2);
    for series in &trend {
        assert_eq!(series.months.len(), 6);
    }

    let usd = &trend[0];
    assert_eq!(usd.currency, "USD");
    assert_eq!(usd.months[0].month, "2024-10");
    assert_eq!(usd.months[0].month_label, "Oct");
    assert_eq!(usd.months[5].month, "2025-03");
    for b in &usd.months {
        // yearly income does not broadcast
        assert_eq!(b.income, dec("3000"));
    }
    let jan = usd.months.iter().find(|b| b.month == "2025-01").unwrap();
    assert_eq!(jan.expenses, dec("1250"));
    let feb = usd.months.iter().find(|b| b.month == "2025-02").unwrap();
    assert_eq!(feb.expenses, dec("1000"));

    let eur = &trend[1];
    assert!(eur.months.iter().all(|b| b.expenses.is_zero()));
    assert!(eur.months.iter().all(|b| b.income == dec("900")));
}

#[test]
fn trend_with_no_activity_is_empty_not_zero_filled() {
    let trend = income_expense_trend(&UserRecords::default(), "USD", at(2025, 3, 1, 0), 6).unwrap();
    assert!(trend.is_empty());
}

#[test]
fn summary_is_deterministic() {
    let now = at(2025, 5, 5, 5);
    let records = UserRecords {
        income: vec![
            income(1, "3000", Some("USD"), Frequency::Monthly),
            income(2, "500000", Some("IDR"), Frequency::Monthly),
        ],
        outgoings: vec![bill(1, "120", None, 7), one_off(2, "15", Some("IDR"), "Food", "2025-05-01")],
        spending_log: vec![spend(1, "3.5", None, "Coffee", at(2025, 5, 4, 8))],
        ..Default::default()
    };
    let a = serde_json::to_value(summarize(&records, "USD", now, 6, 6).unwrap()).unwrap();
    let b = serde_json::to_value(summarize(&records, "USD", now, 6, 6).unwrap()).unwrap();
    assert_eq!(a, b);
    assert_eq!(a["defaultCurrency"], "USD");
    assert_eq!(a["available"]["USD"], "2876.5");
    assert_eq!(a["upcomingExpenses"][0]["daysUntil"], 2);
}
