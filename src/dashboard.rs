// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Dashboard figures derived from a user's records.
//!
//! Every function here is pure: the records, the user's default currency and
//! the reference instant are all passed in, nothing is read from the clock.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::{Frequency, OutgoingRecord, SpendingLogRecord, UserRecords};
use crate::partition::{CurrencyTotals, partition_by_currency, resolve_currency};

pub const DEFAULT_UPCOMING_LIMIT: usize = 6;
pub const DEFAULT_TREND_MONTHS: usize = 6;
pub const MAX_TREND_MONTHS: usize = 120;

/// Month key `YYYY-MM` used for prefix matching against record dates.
pub fn month_key(now: DateTime<Utc>) -> String {
    now.format("%Y-%m").to_string()
}

pub fn current_month_spending(
    log: &[SpendingLogRecord],
    now: DateTime<Utc>,
) -> Vec<&SpendingLogRecord> {
    let key = month_key(now);
    log.iter()
        .filter(|s| s.date.format("%Y-%m").to_string() == key)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalKind {
    Income,
    /// Outgoings plus this month's spending-log entries.
    Outgoings,
    Savings,
    /// Sum of minimum debt payments.
    DebtPayments,
}

pub fn totals_by_currency(
    records: &UserRecords,
    kind: TotalKind,
    default_currency: &str,
    now: DateTime<Utc>,
) -> Result<CurrencyTotals> {
    match kind {
        TotalKind::Income => partition_by_currency(
            &records.income,
            |r| r.amount,
            |r| r.currency.as_deref(),
            default_currency,
        ),
        TotalKind::Outgoings => {
            let mut totals = partition_by_currency(
                &records.outgoings,
                |r| r.amount,
                |r| r.currency.as_deref(),
                default_currency,
            )?;
            for s in current_month_spending(&records.spending_log, now) {
                totals.add(
                    resolve_currency(s.currency.as_deref(), default_currency),
                    s.amount,
                )?;
            }
            Ok(totals)
        }
        TotalKind::Savings => partition_by_currency(
            &records.savings,
            |r| r.balance,
            |r| r.currency.as_deref(),
            default_currency,
        ),
        TotalKind::DebtPayments => partition_by_currency(
            &records.debt,
            |r| r.min_payment,
            |r| r.currency.as_deref(),
            default_currency,
        ),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub income: CurrencyTotals,
    pub outgoings: CurrencyTotals,
    pub savings: CurrencyTotals,
    pub debt_payments: CurrencyTotals,
}

pub fn all_totals(
    records: &UserRecords,
    default_currency: &str,
    now: DateTime<Utc>,
) -> Result<Totals> {
    Ok(Totals {
        income: totals_by_currency(records, TotalKind::Income, default_currency, now)?,
        outgoings: totals_by_currency(records, TotalKind::Outgoings, default_currency, now)?,
        savings: totals_by_currency(records, TotalKind::Savings, default_currency, now)?,
        debt_payments: totals_by_currency(records, TotalKind::DebtPayments, default_currency, now)?,
    })
}

/// `income - outgoings - debt minimum payments` for every currency seen in
/// any of the three. Currencies seen nowhere are left out, not zero-filled.
pub fn available_by_currency(
    records: &UserRecords,
    default_currency: &str,
    now: DateTime<Utc>,
) -> Result<CurrencyTotals> {
    let income = totals_by_currency(records, TotalKind::Income, default_currency, now)?;
    let outgoings = totals_by_currency(records, TotalKind::Outgoings, default_currency, now)?;
    let debt = totals_by_currency(records, TotalKind::DebtPayments, default_currency, now)?;

    let mut currencies: Vec<&str> = Vec::new();
    for c in income
        .currencies()
        .chain(outgoings.currencies())
        .chain(debt.currencies())
    {
        if !currencies.contains(&c) {
            currencies.push(c);
        }
    }

    let mut available = CurrencyTotals::new();
    for c in currencies {
        let overflow = || Error::Overflow {
            currency: c.to_string(),
        };
        let value = income
            .get(c)
            .unwrap_or_default()
            .checked_sub(outgoings.get(c).unwrap_or_default())
            .and_then(|v| v.checked_sub(debt.get(c).unwrap_or_default()))
            .ok_or_else(overflow)?;
        available.add(c, value)?;
    }
    Ok(available)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpend {
    pub category: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyCategories {
    pub currency: String,
    pub categories: Vec<CategorySpend>,
}

/// All outgoings plus this month's spending log, by currency then category,
/// biggest category first. Equal totals keep first-seen order.
pub fn category_spending_by_currency(
    records: &UserRecords,
    default_currency: &str,
    now: DateTime<Utc>,
) -> Result<Vec<CurrencyCategories>> {
    let entries = records
        .outgoings
        .iter()
        .map(|o| (o.currency.as_deref(), o.category.as_str(), o.amount))
        .chain(
            current_month_spending(&records.spending_log, now)
                .into_iter()
                .map(|s| (s.currency.as_deref(), s.category.as_str(), s.amount)),
        );

    let mut groups: Vec<CurrencyCategories> = Vec::new();
    for (ccy, category, amount) in entries {
        let ccy = resolve_currency(ccy, default_currency);
        let idx = match groups.iter().position(|g| g.currency == ccy) {
            Some(i) => i,
            None => {
                groups.push(CurrencyCategories {
                    currency: ccy.to_string(),
                    categories: Vec::new(),
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[idx];
        match group.categories.iter_mut().find(|c| c.category == category) {
            Some(c) => {
                c.total = c.total.checked_add(amount).ok_or_else(|| Error::Overflow {
                    currency: ccy.to_string(),
                })?;
            }
            None => group.categories.push(CategorySpend {
                category: category.to_string(),
                total: amount,
            }),
        }
    }

    for g in &mut groups {
        g.categories.sort_by(|a, b| b.total.cmp(&a.total));
    }
    Ok(groups)
}

/// Days until a monthly due day, wrapping negative gaps forward by a flat
/// 30 days. Not calendar accurate for 28/29/31-day months.
pub fn days_until_due(day_of_month: u32, today: u32) -> i64 {
    let diff = i64::from(day_of_month) - i64::from(today);
    if diff < 0 { diff + 30 } else { diff }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingExpense {
    pub outgoing_id: i64,
    pub description: String,
    pub amount: Decimal,
    pub currency: String,
    pub category: String,
    pub day_of_month: u32,
    pub days_until: i64,
}

pub fn recurring_with_due_day(outgoings: &[OutgoingRecord]) -> impl Iterator<Item = (&OutgoingRecord, u32)> {
    outgoings
        .iter()
        .filter(|o| o.is_recurring)
        .filter_map(|o| o.day_of_month.map(|d| (o, d)))
}

pub fn upcoming_expenses(
    outgoings: &[OutgoingRecord],
    default_currency: &str,
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<UpcomingExpense> {
    let today = now.day();
    let mut upcoming: Vec<UpcomingExpense> = recurring_with_due_day(outgoings)
        .map(|(o, dom)| UpcomingExpense {
            outgoing_id: o.id,
            description: o.description.clone(),
            amount: o.amount,
            currency: resolve_currency(o.currency.as_deref(), default_currency).to_string(),
            category: o.category.clone(),
            day_of_month: dom,
            days_until: days_until_due(dom, today),
        })
        .collect();
    upcoming.sort_by_key(|u| u.days_until);
    upcoming.truncate(limit);
    upcoming
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendBucket {
    /// `YYYY-MM`
    pub month: String,
    /// Short month name, e.g. `Mar`.
    pub month_label: String,
    pub income: Decimal,
    pub expenses: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyTrend {
    pub currency: String,
    pub months: Vec<TrendBucket>,
}

/// First day of each of the trailing `window` months, oldest first, ending
/// with the month containing `now`. The window is capped at
/// [`MAX_TREND_MONTHS`].
pub fn trailing_months(now: DateTime<Utc>, window: usize) -> Vec<NaiveDate> {
    let window = window.min(MAX_TREND_MONTHS);
    let mut out = Vec::with_capacity(window);
    let mut year = now.year();
    let mut month = now.month();
    for _ in 0..window {
        if let Some(d) = NaiveDate::from_ymd_opt(year, month, 1) {
            out.push(d);
        }
        if month == 1 {
            month = 12;
            year -= 1;
        } else {
            month -= 1;
        }
    }
    out.reverse();
    out
}

fn broadcasts_monthly(o: &OutgoingRecord) -> bool {
    o.is_recurring || o.frequency == Frequency::Monthly
}

/// Income/expense series per currency over the trailing `window_months`.
///
/// Monthly income and recurring or monthly outgoings count towards every
/// bucket; other outgoings only towards the month their date falls in.
/// Non-monthly income is not part of the series.
pub fn income_expense_trend(
    records: &UserRecords,
    default_currency: &str,
    now: DateTime<Utc>,
    window_months: usize,
) -> Result<Vec<CurrencyTrend>> {
    let months = trailing_months(now, window_months);

    let mut currencies: Vec<&str> = Vec::new();
    let seen = records
        .income
        .iter()
        .map(|i| i.currency.as_deref())
        .chain(records.outgoings.iter().map(|o| o.currency.as_deref()));
    for c in seen {
        let c = resolve_currency(c, default_currency);
        if !currencies.contains(&c) {
            currencies.push(c);
        }
    }

    let mut trends = Vec::with_capacity(currencies.len());
    for ccy in currencies {
        let overflow = || Error::Overflow {
            currency: ccy.to_string(),
        };
        let in_ccy = |c: Option<&str>| resolve_currency(c, default_currency) == ccy;

        let monthly_income = records
            .income
            .iter()
            .filter(|i| i.frequency == Frequency::Monthly && in_ccy(i.currency.as_deref()))
            .try_fold(Decimal::ZERO, |acc, i| acc.checked_add(i.amount))
            .ok_or_else(overflow)?;
        let monthly_expenses = records
            .outgoings
            .iter()
            .filter(|o| broadcasts_monthly(o) && in_ccy(o.currency.as_deref()))
            .try_fold(Decimal::ZERO, |acc, o| acc.checked_add(o.amount))
            .ok_or_else(overflow)?;

        let mut buckets = Vec::with_capacity(months.len());
        for m in &months {
            let key = m.format("%Y-%m").to_string();
            let dated = records
                .outgoings
                .iter()
                .filter(|o| !broadcasts_monthly(o) && in_ccy(o.currency.as_deref()))
                .filter(|o| o.date.get(..7) == Some(key.as_str()))
                .try_fold(Decimal::ZERO, |acc, o| acc.checked_add(o.amount))
                .ok_or_else(overflow)?;
            buckets.push(TrendBucket {
                month_label: m.format("%b").to_string(),
                month: key,
                income: monthly_income,
                expenses: monthly_expenses.checked_add(dated).ok_or_else(overflow)?,
            });
        }
        trends.push(CurrencyTrend {
            currency: ccy.to_string(),
            months: buckets,
        });
    }
    Ok(trends)
}

/// Everything the dashboard renders, computed in one pass over the records.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub default_currency: String,
    pub totals: Totals,
    pub available: CurrencyTotals,
    pub category_spending: Vec<CurrencyCategories>,
    pub upcoming_expenses: Vec<UpcomingExpense>,
    pub trend: Vec<CurrencyTrend>,
}

pub fn summarize(
    records: &UserRecords,
    default_currency: &str,
    now: DateTime<Utc>,
    upcoming_limit: usize,
    trend_months: usize,
) -> Result<DashboardSummary> {
    Ok(DashboardSummary {
        default_currency: default_currency.to_string(),
        totals: all_totals(records, default_currency, now)?,
        available: available_by_currency(records, default_currency, now)?,
        category_spending: category_spending_by_currency(records, default_currency, now)?,
        upcoming_expenses: upcoming_expenses(&records.outgoings, default_currency, now, upcoming_limit),
        trend: income_expense_trend(records, default_currency, now, trend_months)?,
    })
}
