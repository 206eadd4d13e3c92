// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-currency totals. Amounts are never converted between currencies;
//! the currency code is only a partition key.

use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Error, Result};

/// Resolve a possibly missing currency against the user's default.
pub fn resolve_currency<'a>(currency: Option<&'a str>, default_currency: &'a str) -> &'a str {
    match currency {
        Some(c) if !c.trim().is_empty() => c,
        _ => default_currency,
    }
}

/// Currency -> total, iterated in the order each currency was first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrencyTotals {
    entries: Vec<(String, Decimal)>,
}

impl CurrencyTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, currency: &str, amount: Decimal) -> Result<()> {
        match self.entries.iter_mut().find(|(c, _)| c == currency) {
            Some((_, total)) => {
                *total = total.checked_add(amount).ok_or_else(|| Error::Overflow {
                    currency: currency.to_string(),
                })?;
            }
            None => self.entries.push((currency.to_string(), amount)),
        }
        Ok(())
    }

    pub fn get(&self, currency: &str) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|(c, _)| c == currency)
            .map(|(_, v)| *v)
    }

    pub fn contains(&self, currency: &str) -> bool {
        self.entries.iter().any(|(c, _)| c == currency)
    }

    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.entries.iter().map(|(c, v)| (c.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum across every currency. Only meaningful as a conservation check.
    pub fn grand_total(&self) -> Result<Decimal> {
        self.entries.iter().try_fold(Decimal::ZERO, |acc, (c, v)| {
            acc.checked_add(*v).ok_or_else(|| Error::Overflow {
                currency: c.clone(),
            })
        })
    }
}

impl Serialize for CurrencyTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (c, v) in &self.entries {
            map.serialize_entry(c, v)?;
        }
        map.end()
    }
}

/// Group `records` by resolved currency and sum `amount_of` within each group.
pub fn partition_by_currency<T, A, C>(
    records: &[T],
    amount_of: A,
    currency_of: C,
    default_currency: &str,
) -> Result<CurrencyTotals>
where
    A: Fn(&T) -> Decimal,
    C: Fn(&T) -> Option<&str>,
{
    let mut totals = CurrencyTotals::new();
    for r in records {
        let ccy = resolve_currency(currency_of(r), default_currency);
        totals.add(ccy, amount_of(r))?;
    }
    Ok(totals)
}
