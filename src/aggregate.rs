// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Folds raw transaction lists into totals and breakdowns. Everything here
//! works on base-currency amounts and never converts.

use std::collections::BTreeMap;
use std::fmt;

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::{Transaction, User};

/// Group key for records that carry no category at all.
pub const UNCATEGORIZED: &str = "(uncategorized)";

/// Total of `amount`, saturating at the edges of the `Decimal` range.
/// Loaders reject record sets whose totals would not fit.
pub fn sum_amounts<'a, I>(records: I) -> Decimal
where
    I: IntoIterator<Item = &'a Transaction>,
{
    records
        .into_iter()
        .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount))
}


pub fn expenses(records: &[Transaction]) -> impl Iterator<Item = &Transaction> {
    records.iter().filter(|t| t.is_expense())
}

pub fn incomes(records: &[Transaction]) -> impl Iterator<Item = &Transaction> {
    records.iter().filter(|t| t.is_income())
}

/// Sums expenses per category. The category string is used as-is; records
/// without one are kept under [`UNCATEGORIZED`] so the groups always add up
/// to the overall total.
pub fn group_by_category<'a, I>(expenses: I) -> BTreeMap<String, Decimal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut agg: BTreeMap<String, Decimal> = BTreeMap::new();
    for t in expenses {
        let key = t
            .category
            .clone()
            .unwrap_or_else(|| UNCATEGORIZED.to_string());
        let total = agg.entry(key).or_insert(Decimal::ZERO);
        *total = total.saturating_add(t.amount);
    }
    agg
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserGroup<'a> {
    pub user_id: i64,
    pub records: Vec<&'a Transaction>,
    pub total_expense: Decimal,
    pub total_income: Decimal,
}

impl UserGroup<'_> {
    pub fn balance(&self) -> Decimal {
        self.total_income.saturating_sub(self.total_expense)
    }
}

/// Rolls records up per end user.
///
/// Every user with the `USER` role gets an entry, including users without a
/// single record. Admins are left out, and so are records belonging to
/// anyone not in `users`.
pub fn group_by_user<'a>(
    records: &'a [Transaction],
    users: &[User],
) -> BTreeMap<i64, UserGroup<'a>> {
    let mut out: BTreeMap<i64, UserGroup<'a>> = users
        .iter()
        .filter(|u| u.is_end_user())
        .map(|u| {
            (
                u.id,
                UserGroup {
                    user_id: u.id,
                    records: Vec::new(),
                    total_expense: Decimal::ZERO,
                    total_income: Decimal::ZERO,
                },
            )
        })
        .collect();
    for t in records {
        if let Some(g) = out.get_mut(&t.user_id) {
            if t.is_expense() {
                g.total_expense = g.total_expense.saturating_add(t.amount);
            } else {
                g.total_income = g.total_income.saturating_add(t.amount);
            }
            g.records.push(t);
        }
    }
    out
}

/// A month label -> base amount mapping that remembers the order its entries
/// were supplied in. Deserializing from a JSON object keeps document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlySource(Vec<(String, Decimal)>);

impl MonthlySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a bucket; an existing label is updated in place.
    pub fn insert(&mut self, month: impl Into<String>, amount: Decimal) {
        let month = month.into();
        match self.0.iter_mut().find(|(m, _)| *m == month) {
            Some(slot) => slot.1 = amount,
            None => self.0.push((month, amount)),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(m, a)| (m.as_str(), *a))
    }
}

impl<S: Into<String>> FromIterator<(S, Decimal)> for MonthlySource {
    fn from_iter<T: IntoIterator<Item = (S, Decimal)>>(iter: T) -> Self {
        let mut out = MonthlySource::new();
        for (m, a) in iter {
            out.insert(m, a);
        }
        out
    }
}

impl Serialize for MonthlySource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (m, a) in &self.0 {
            map.serialize_entry(m, a)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MonthlySource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = MonthlySource;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of month label to amount")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut out = MonthlySource::new();
                while let Some((month, amount)) = access.next_entry::<String, Decimal>()? {
                    out.insert(month, amount);
                }
                Ok(out)
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthPoint {
    pub month: String,
    pub amount_base: Decimal,
}

/// Reshapes a pre-bucketed mapping into chart points, in source order.
pub fn monthly_series(source: &MonthlySource) -> Vec<MonthPoint> {
    source
        .iter()
        .map(|(month, amount)| MonthPoint {
            month: month.to_string(),
            amount_base: amount,
        })
        .collect()
}

/// Buckets records by `YYYY-MM` in chronological order, for sources that do
/// not come pre-bucketed.
pub fn bucket_by_month<'a, I>(records: I) -> MonthlySource
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut map: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();
    for t in records {
        let total = map
            .entry((t.date.year(), t.date.month()))
            .or_insert(Decimal::ZERO);
        *total = total.saturating_add(t.amount);
    }
    map.into_iter()
        .map(|((y, m), a)| (format!("{:04}-{:02}", y, m), a))
        .collect()
}
