// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Monthly,
    Weekly,
    #[serde(rename = "Bi-Weekly")]
    BiWeekly,
    Yearly,
    #[serde(rename = "One-time")]
    OneTime,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Monthly => "Monthly",
            Frequency::Weekly => "Weekly",
            Frequency::BiWeekly => "Bi-Weekly",
            Frequency::Yearly => "Yearly",
            Frequency::OneTime => "One-time",
        }
    }
}

impl FromStr for Frequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(Frequency::Monthly),
            "weekly" => Ok(Frequency::Weekly),
            "bi-weekly" | "biweekly" => Ok(Frequency::BiWeekly),
            "yearly" => Ok(Frequency::Yearly),
            "one-time" | "onetime" | "once" => Ok(Frequency::OneTime),
            _ => Err(Error::validation(
                "frequency",
                format!("'{}' (expected Monthly|Weekly|Bi-Weekly|Yearly|One-time)", s),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(Error::validation(
                "priority",
                format!("'{}' (expected Low|Medium|High)", s),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    Checking,
    Savings,
    #[serde(rename = "Credit Card")]
    CreditCard,
    Investment,
    Cash,
    Other,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Checking => "Checking",
            AccountType::Savings => "Savings",
            AccountType::CreditCard => "Credit Card",
            AccountType::Investment => "Investment",
            AccountType::Cash => "Cash",
            AccountType::Other => "Other",
        }
    }
}

impl FromStr for AccountType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "checking" => Ok(AccountType::Checking),
            "savings" => Ok(AccountType::Savings),
            "credit card" | "credit-card" | "creditcard" => Ok(AccountType::CreditCard),
            "investment" => Ok(AccountType::Investment),
            "cash" => Ok(AccountType::Cash),
            "other" => Ok(AccountType::Other),
            _ => Err(Error::validation(
                "account type",
                format!(
                    "'{}' (expected Checking|Savings|Credit Card|Investment|Cash|Other)",
                    s
                ),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeRecord {
    pub id: i64,
    pub user_id: String,
    pub source: String,
    pub amount: Decimal,
    pub category: String,
    pub frequency: Frequency,
    pub currency: Option<String>,
    /// Only meaningful for monthly income.
    pub day_of_month: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingRecord {
    pub id: i64,
    pub user_id: String,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub date: String, // YYYY-MM-DD
    pub frequency: Frequency,
    pub currency: Option<String>,
    pub is_recurring: bool,
    /// Recurring items repeat on this day every month, whatever `date` says.
    pub day_of_month: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtRecord {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub balance: Decimal,
    pub interest_rate: Decimal,
    pub min_payment: Decimal,
    pub priority: Priority,
    pub deadline: Option<String>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsRecord {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub balance: Decimal,
    pub target: Option<Decimal>,
    pub category: String,
    pub currency: Option<String>,
}

impl SavingsRecord {
    /// Percentage of target reached, `None` without a positive target.
    pub fn progress_pct(&self) -> Option<Decimal> {
        match self.target {
            Some(t) if t > Decimal::ZERO => self
                .balance
                .checked_mul(Decimal::ONE_HUNDRED)
                .and_then(|b| b.checked_div(t)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistRecord {
    pub id: i64,
    pub user_id: String,
    pub item: String,
    pub cost: Decimal,
    pub saved: Decimal,
    pub priority: Priority,
    pub deadline: Option<String>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub balance: Decimal,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingLogRecord {
    pub id: i64,
    pub user_id: String,
    pub description: String,
    pub amount: Decimal,
    pub currency: Option<String>,
    pub category: String,
    pub date: DateTime<Utc>,
}

/// Savings thresholds, in percent of target, that issue a one-time notification.
pub const SAVINGS_MILESTONES: [u8; 4] = [25, 50, 75, 100];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum NotificationKind {
    BillDue,
    SavingsMilestone(u8),
}

impl NotificationKind {
    pub fn is_milestone(&self) -> bool {
        matches!(self, NotificationKind::SavingsMilestone(_))
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::BillDue => write!(f, "bill_due"),
            NotificationKind::SavingsMilestone(t) => write!(f, "savings_{}", t),
        }
    }
}

impl FromStr for NotificationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "bill_due" {
            return Ok(NotificationKind::BillDue);
        }
        if let Some(t) = s.strip_prefix("savings_") {
            if let Ok(t) = t.parse::<u8>() {
                if SAVINGS_MILESTONES.contains(&t) {
                    return Ok(NotificationKind::SavingsMilestone(t));
                }
            }
        }
        Err(Error::validation(
            "notification type",
            format!("'{}'", s),
        ))
    }
}

impl From<NotificationKind> for String {
    fn from(k: NotificationKind) -> Self {
        k.to_string()
    }
}

impl TryFrom<String> for NotificationKind {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    pub id: i64,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub related_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub related_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Everything a user owns, fetched once per request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecords {
    pub income: Vec<IncomeRecord>,
    pub outgoings: Vec<OutgoingRecord>,
    pub savings: Vec<SavingsRecord>,
    pub debt: Vec<DebtRecord>,
    pub wishlist: Vec<WishlistRecord>,
    pub accounts: Vec<AccountRecord>,
    pub spending_log: Vec<SpendingLogRecord>,
}
