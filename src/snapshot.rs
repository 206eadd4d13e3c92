// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Compact, currency-aware view of a user's finances handed to the advice
//! collaborator. The core builds it and never reads it back.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::dashboard::{UpcomingExpense, upcoming_expenses};
use crate::error::{Error, Result};
use crate::models::UserRecords;
use crate::partition::resolve_currency;

pub const RECENT_SPENDING_LIMIT: usize = 50;
pub const SPENDING_PATTERN_DAYS: i64 = 30;
pub const SNAPSHOT_UPCOMING_LIMIT: usize = 6;

fn num(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeEntry {
    pub source: String,
    pub amount: f64,
    pub category: String,
    pub frequency: String,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseEntry {
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: String,
    pub frequency: String,
    pub currency: String,
    pub is_recurring: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtEntry {
    pub name: String,
    pub balance: f64,
    pub apr: f64,
    pub min_payment: f64,
    pub priority: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsEntry {
    pub name: String,
    pub balance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    pub category: String,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    pub item: String,
    pub cost: f64,
    pub saved: f64,
    pub priority: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingEntry {
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub currency: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingPattern {
    pub category: String,
    pub currency: String,
    pub total: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingEntry {
    pub description: String,
    pub amount: f64,
    pub currency: String,
    pub category: String,
    pub day_of_month: u32,
    pub days_until: i64,
}

impl From<&UpcomingExpense> for UpcomingEntry {
    fn from(u: &UpcomingExpense) -> Self {
        UpcomingEntry {
            description: u.description.clone(),
            amount: num(u.amount),
            currency: u.currency.clone(),
            category: u.category.clone(),
            day_of_month: u.day_of_month,
            days_until: u.days_until,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: String,
    pub balance: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyAccounts {
    pub currency: String,
    pub accounts: Vec<AccountBalance>,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSnapshot {
    pub currencies: Vec<String>,
    pub income: Vec<IncomeEntry>,
    pub expenses: Vec<ExpenseEntry>,
    pub debts: Vec<DebtEntry>,
    pub savings: Vec<SavingsEntry>,
    pub wishlist: Vec<WishlistEntry>,
    pub recent_spending: Vec<SpendingEntry>,
    pub spending_patterns: Vec<SpendingPattern>,
    pub upcoming_expenses: Vec<UpcomingEntry>,
    pub account_balances_by_currency: Vec<CurrencyAccounts>,
}

fn push_unique(list: &mut Vec<String>, c: &str) {
    if !list.iter().any(|x| x == c) {
        list.push(c.to_string());
    }
}

/// Every resolved currency the user has a record in, first-seen order.
pub fn currencies_in_use(records: &UserRecords, default_currency: &str) -> Vec<String> {
    let mut out = Vec::new();
    let all = records
        .income
        .iter()
        .map(|r| r.currency.as_deref())
        .chain(records.outgoings.iter().map(|r| r.currency.as_deref()))
        .chain(records.debt.iter().map(|r| r.currency.as_deref()))
        .chain(records.savings.iter().map(|r| r.currency.as_deref()))
        .chain(records.wishlist.iter().map(|r| r.currency.as_deref()))
        .chain(records.accounts.iter().map(|r| r.currency.as_deref()))
        .chain(records.spending_log.iter().map(|r| r.currency.as_deref()));
    for c in all {
        push_unique(&mut out, resolve_currency(c, default_currency));
    }
    out
}

/// Spending of the last 30 days grouped by (category, currency), largest
/// total first.
pub fn spending_patterns(
    records: &UserRecords,
    default_currency: &str,
    now: DateTime<Utc>,
) -> Result<Vec<SpendingPattern>> {
    let cutoff = now - Duration::days(SPENDING_PATTERN_DAYS);
    let mut groups: Vec<(String, String, Decimal, usize)> = Vec::new();
    let in_window = records
        .spending_log
        .iter()
        .filter(|s| s.date >= cutoff && s.date <= now);
    for s in in_window {
        let ccy = resolve_currency(s.currency.as_deref(), default_currency);
        match groups
            .iter_mut()
            .find(|(cat, c, _, _)| *cat == s.category && c == ccy)
        {
            Some((_, _, total, count)) => {
                *total = total.checked_add(s.amount).ok_or_else(|| Error::Overflow {
                    currency: ccy.to_string(),
                })?;
                *count += 1;
            }
            None => groups.push((s.category.clone(), ccy.to_string(), s.amount, 1)),
        }
    }
    groups.sort_by(|a, b| b.2.cmp(&a.2));
    Ok(groups
        .into_iter()
        .map(|(category, currency, total, count)| SpendingPattern {
            category,
            currency,
            total: num(total),
            count,
        })
        .collect())
}

pub fn account_balances_by_currency(
    records: &UserRecords,
    default_currency: &str,
) -> Result<Vec<CurrencyAccounts>> {
    let mut groups: Vec<(String, Vec<AccountBalance>, Decimal)> = Vec::new();
    for a in &records.accounts {
        let ccy = resolve_currency(a.currency.as_deref(), default_currency);
        let idx = match groups.iter().position(|(c, _, _)| c == ccy) {
            Some(i) => i,
            None => {
                groups.push((ccy.to_string(), Vec::new(), Decimal::ZERO));
                groups.len() - 1
            }
        };
        let (_, accounts, total) = &mut groups[idx];
        accounts.push(AccountBalance {
            name: a.name.clone(),
            account_type: a.account_type.as_str().to_string(),
            balance: num(a.balance),
        });
        *total = total.checked_add(a.balance).ok_or_else(|| Error::Overflow {
            currency: ccy.to_string(),
        })?;
    }
    Ok(groups
        .into_iter()
        .map(|(currency, accounts, total)| CurrencyAccounts {
            currency,
            accounts,
            total: num(total),
        })
        .collect())
}

pub fn build_snapshot(
    records: &UserRecords,
    default_currency: &str,
    now: DateTime<Utc>,
) -> Result<AiSnapshot> {
    let ccy = |c: &Option<String>| resolve_currency(c.as_deref(), default_currency).to_string();

    let mut recent: Vec<_> = records.spending_log.iter().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(RECENT_SPENDING_LIMIT);

    let upcoming = upcoming_expenses(
        &records.outgoings,
        default_currency,
        now,
        SNAPSHOT_UPCOMING_LIMIT,
    );

    Ok(AiSnapshot {
        currencies: currencies_in_use(records, default_currency),
        income: records
            .income
            .iter()
            .map(|r| IncomeEntry {
                source: r.source.clone(),
                amount: num(r.amount),
                category: r.category.clone(),
                frequency: r.frequency.as_str().to_string(),
                currency: ccy(&r.currency),
            })
            .collect(),
        expenses: records
            .outgoings
            .iter()
            .map(|r| ExpenseEntry {
                description: r.description.clone(),
                amount: num(r.amount),
                category: r.category.clone(),
                date: r.date.clone(),
                frequency: r.frequency.as_str().to_string(),
                currency: ccy(&r.currency),
                is_recurring: r.is_recurring,
                day_of_month: r.day_of_month,
            })
            .collect(),
        debts: records
            .debt
            .iter()
            .map(|r| DebtEntry {
                name: r.name.clone(),
                balance: num(r.balance),
                apr: num(r.interest_rate),
                min_payment: num(r.min_payment),
                priority: r.priority.as_str().to_string(),
                deadline: r.deadline.clone(),
                currency: ccy(&r.currency),
            })
            .collect(),
        savings: records
            .savings
            .iter()
            .map(|r| SavingsEntry {
                name: r.name.clone(),
                balance: num(r.balance),
                target: r.target.map(num),
                category: r.category.clone(),
                currency: ccy(&r.currency),
            })
            .collect(),
        wishlist: records
            .wishlist
            .iter()
            .map(|r| WishlistEntry {
                item: r.item.clone(),
                cost: num(r.cost),
                saved: num(r.saved),
                priority: r.priority.as_str().to_string(),
                deadline: r.deadline.clone(),
                currency: ccy(&r.currency),
            })
            .collect(),
        recent_spending: recent
            .into_iter()
            .map(|r| SpendingEntry {
                description: r.description.clone(),
                amount: num(r.amount),
                category: r.category.clone(),
                currency: ccy(&r.currency),
                date: r.date,
            })
            .collect(),
        spending_patterns: spending_patterns(records, default_currency, now)?,
        upcoming_expenses: upcoming.iter().map(UpcomingEntry::from).collect(),
        account_balances_by_currency: account_balances_by_currency(records, default_currency)?,
    })
}
