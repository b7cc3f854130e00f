// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Loading the records the reports are built from.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate::{MonthlySource, bucket_by_month, expenses};
use crate::models::{MonthlyLimit, Transaction, TxKind, User};
use crate::report::limit_for;
use crate::utils::{parse_date, parse_decimal};

/// Everything a dashboard view fetches, as one JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub expenses: Vec<Transaction>,
    pub incomes: Vec<Transaction>,
    pub limits: Vec<MonthlyLimit>,
    /// Pre-bucketed chart data, kept in document order.
    pub monthly_expense: Option<MonthlySource>,
    /// The user `monthly_expense` belongs to, when known.
    pub monthly_expense_user: Option<i64>,
}

impl Snapshot {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Read snapshot {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Parse snapshot {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let mut snap: Snapshot = serde_json::from_str(raw)?;
        for t in &mut snap.expenses {
            t.kind = TxKind::Expense;
        }
        for t in &mut snap.incomes {
            t.kind = TxKind::Income;
        }
        snap.check_totals()?;
        Ok(snap)
    }

    /// Rejects record sets whose totals do not fit in a `Decimal`. When the
    /// sum of magnitudes fits, every total, group and balance built from a
    /// subset fits as well.
    pub fn check_totals(&self) -> Result<()> {
        let magnitude = self
            .expenses
            .iter()
            .chain(self.incomes.iter())
            .try_fold(Decimal::ZERO, |acc, t| acc.checked_add(t.amount.abs()));
        if magnitude.is_none() {
            bail!("record amounts are too large to total");
        }
        Ok(())
    }

    /// Expenses followed by incomes.
    pub fn records(&self) -> Vec<Transaction> {
        self.expenses
            .iter()
            .chain(self.incomes.iter())
            .cloned()
            .collect()
    }

    /// Records of one user, or of everyone when `user` is `None`.
    pub fn records_for(&self, user: Option<i64>) -> Vec<Transaction> {
        self.records()
            .into_iter()
            .filter(|t| user.is_none_or(|id| t.user_id == id))
            .collect()
    }

    /// Not-found is "no limit", never an error.
    pub fn limit_for(&self, user_id: i64) -> Option<Decimal> {
        limit_for(&self.limits, user_id)
    }

    /// The user a chart is drawn for: the one asked for, else the owner of
    /// the supplied mapping.
    pub fn chart_user(&self, user: Option<i64>) -> Option<i64> {
        user.or(self.monthly_expense_user)
    }

    /// The supplied chart mapping when it belongs to `user`, otherwise one
    /// bucketed from the user's expenses.
    ///
    /// A mapping without an owner is only used when no user is asked for.
    pub fn monthly_source(&self, user: Option<i64>) -> MonthlySource {
        let supplied = self.monthly_expense.as_ref().filter(|_| match user {
            None => true,
            Some(id) => self.monthly_expense_user == Some(id),
        });
        match supplied {
            Some(src) => src.clone(),
            None => {
                let records = self.records_for(user);
                bucket_by_month(expenses(&records))
            }
        }
    }
}

/// Reads a CSV with header `id,userId,amount,category,date,description`.
/// Every row becomes a record of `kind`.
pub fn load_csv(path: &Path, kind: TxKind) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path.display()))?;

    let mut out = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let rec = result?;
        let row = line + 2;
        let field = |i: usize, name: &str| -> Result<String> {
            rec.get(i)
                .map(|s| s.to_string())
                .ok_or_else(|| anyhow!("row {}: {} missing", row, name))
        };
        let id: i64 = field(0, "id")?
            .parse()
            .with_context(|| format!("row {}: invalid id", row))?;
        let user_id: i64 = field(1, "userId")?
            .parse()
            .with_context(|| format!("row {}: invalid userId", row))?;
        let amount = parse_decimal(&field(2, "amount")?)
            .with_context(|| format!("row {}: invalid amount", row))?;
        let category = rec.get(3).filter(|s| !s.is_empty()).map(|s| s.to_string());
        let date = parse_date(&field(4, "date")?)?;
        let description = rec.get(5).filter(|s| !s.is_empty()).map(|s| s.to_string());
        out.push(Transaction {
            id,
            user_id,
            kind,
            amount,
            category,
            date,
            description,
        });
    }
    Ok(out)
}
