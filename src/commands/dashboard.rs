// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use super::Session;
use crate::dashboard::{DEFAULT_TREND_MONTHS, DEFAULT_UPCOMING_LIMIT, DashboardSummary, summarize};
use crate::store::RecordStore;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle(conn: &Connection, s: &Session, m: &clap::ArgMatches) -> Result<()> {
    let months = *m
        .get_one::<usize>("months")
        .unwrap_or(&DEFAULT_TREND_MONTHS);
    let limit = *m
        .get_one::<usize>("limit")
        .unwrap_or(&DEFAULT_UPCOMING_LIMIT);
    let default_ccy = s.default_currency(conn)?;
    let records = conn.load_user_records(&s.user_id)?;
    let summary = summarize(&records, &default_ccy, s.now, limit, months)?;

    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &summary)? {
        return Ok(());
    }
    print_summary(&summary);
    Ok(())
}

fn money_or_blank(v: Option<rust_decimal::Decimal>, ccy: &str) -> String {
    v.map(|d| fmt_money(&d, ccy)).unwrap_or_else(|| "-".into())
}

fn print_summary(summary: &DashboardSummary) {
    let t = &summary.totals;
    let mut data = Vec::new();
    for (ccy, available) in summary.available.iter() {
        data.push(vec![
            ccy.to_string(),
            money_or_blank(t.income.get(ccy), ccy),
            money_or_blank(t.outgoings.get(ccy), ccy),
            money_or_blank(t.debt_payments.get(ccy), ccy),
            fmt_money(&available, ccy),
        ]);
    }
    // savings-only currencies have no available figure
    for (ccy, _) in t.savings.iter() {
        if !summary.available.contains(ccy) {
            data.push(vec![ccy.to_string(), "-".into(), "-".into(), "-".into(), "-".into()]);
        }
    }
    if data.is_empty() {
        println!("Nothing recorded yet.");
        return;
    }
    println!(
        "{}",
        pretty_table(
            &["CCY", "Income", "Outgoings", "Debt payments", "Available"],
            data
        )
    );

    if !t.savings.is_empty() {
        let rows = t
            .savings
            .iter()
            .map(|(c, v)| vec![c.to_string(), fmt_money(&v, c)])
            .collect();
        println!("{}", pretty_table(&["CCY", "Saved"], rows));
    }

    let mut cats = Vec::new();
    for group in &summary.category_spending {
        for c in &group.categories {
            cats.push(vec![
                group.currency.clone(),
                c.category.clone(),
                fmt_money(&c.total, &group.currency),
            ]);
        }
    }
    if !cats.is_empty() {
        println!("{}", pretty_table(&["CCY", "Category", "Spent"], cats));
    }

    if !summary.upcoming_expenses.is_empty() {
        let rows = summary
            .upcoming_expenses
            .iter()
            .map(|u| {
                vec![
                    u.description.clone(),
                    fmt_money(&u.amount, &u.currency),
                    format!("day {}", u.day_of_month),
                    match u.days_until {
                        0 => "today".to_string(),
                        1 => "tomorrow".to_string(),
                        n => format!("in {} days", n),
                    },
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Upcoming", "Amount", "Due", "When"], rows));
    }

    let mut trend = Vec::new();
    for series in &summary.trend {
        for b in &series.months {
            trend.push(vec![
                series.currency.clone(),
                format!("{} ({})", b.month_label, b.month),
                format!("{:.2}", b.income),
                format!("{:.2}", b.expenses),
            ]);
        }
    }
    if !trend.is_empty() {
        println!("{}", pretty_table(&["CCY", "Month", "Income", "Expense"], trend));
    }
}
