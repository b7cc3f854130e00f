// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Render-ready report shapes. Aggregates are computed in base currency and
//! converted once, figure by figure, on the way out.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::{
    expenses, group_by_category, group_by_user, incomes, monthly_series, sum_amounts,
    MonthlySource,
};
use crate::convert::{display, present};
use crate::currency::CurrencySnapshot;
use crate::limits::exceeded;
use crate::models::{Currency, MonthlyLimit, Transaction, User};

/// Base-currency totals for one user or for the whole system.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub expense_by_category: BTreeMap<String, Decimal>,
}

impl SummaryReport {
    pub fn from_records(records: &[Transaction]) -> Self {
        let total_income = sum_amounts(incomes(records));
        let total_expense = sum_amounts(expenses(records));
        SummaryReport {
            total_income,
            total_expense,
            balance: total_income.saturating_sub(total_expense),
            expense_by_category: group_by_category(expenses(records)),
        }
    }

    pub fn to_display(&self, fx: &CurrencySnapshot) -> DisplaySummary {
        let categories = self
            .expense_by_category
            .iter()
            .map(|(category, amount)| CategoryShare {
                category: category.clone(),
                amount: display(*amount, fx.rate),
                share_percent: share(*amount, self.total_expense),
            })
            .collect();
        DisplaySummary {
            currency: fx.currency,
            fallback: fx.fallback,
            total_income: display(self.total_income, fx.rate),
            total_expense: display(self.total_expense, fx.rate),
            balance: display(self.balance, fx.rate),
            expense_by_category: categories,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: String,
    pub amount: Decimal,
    pub share_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySummary {
    pub currency: Currency,
    pub fallback: bool,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub expense_by_category: Vec<CategoryShare>,
}

fn share(part: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_div(total)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .map(present)
        .unwrap_or(Decimal::ZERO)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub user_id: i64,
    pub username: String,
    pub total_expense: Decimal,
    pub total_income: Decimal,
    pub limit: Option<Decimal>,
    pub exceeded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminReport {
    pub totals: DisplaySummary,
    pub users: Vec<UserRow>,
}

/// Looks a user's limit up; a user without an entry has no limit. With
/// several entries for one user the first one counts.
pub fn limit_for(limits: &[MonthlyLimit], user_id: i64) -> Option<Decimal> {
    limits
        .iter()
        .find(|l| l.user_id == user_id)
        .map(|l| l.monthly_limit)
}

/// One row per end user, in the order of `users`, plus system-wide totals.
pub fn admin_report(
    users: &[User],
    records: &[Transaction],
    limits: &[MonthlyLimit],
    fx: &CurrencySnapshot,
) -> AdminReport {
    let groups = group_by_user(records, users);

    let rows = users
        .iter()
        .filter_map(|u| groups.get(&u.id).map(|g| (u, g)))
        .map(|(u, g)| {
            let limit = limit_for(limits, u.id);
            UserRow {
                user_id: u.id,
                username: u.username.clone(),
                total_expense: display(g.total_expense, fx.rate),
                total_income: display(g.total_income, fx.rate),
                limit: limit.map(|l| display(l, fx.rate)),
                exceeded: exceeded(g.total_expense, limit, fx.rate),
            }
        })
        .collect();

    AdminReport {
        totals: SummaryReport::from_records(records).to_display(fx),
        users: rows,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBar {
    pub month: String,
    pub amount: Decimal,
    pub over_limit: bool,
}

/// Monthly expense bars in source order, each flagged against the limit.
pub fn monthly_chart(
    source: &MonthlySource,
    limit_base: Option<Decimal>,
    fx: &CurrencySnapshot,
) -> Vec<MonthlyBar> {
    monthly_series(source)
        .into_iter()
        .map(|p| MonthlyBar {
            amount: display(p.amount_base, fx.rate),
            over_limit: exceeded(p.amount_base, limit_base, fx.rate),
            month: p.month,
        })
        .collect()
}
