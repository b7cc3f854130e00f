// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::{expenses, sum_amounts};
use crate::commands::load_data;
use crate::convert::display;
use crate::currency::CurrencyState;
use crate::limits::{evaluate, LimitSignal, LimitStatus};
use crate::models::Currency;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle(state: &CurrencyState, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("status", sub)) = m.subcommand() {
        status(state, sub)?;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRow {
    pub user_id: i64,
    pub currency: Currency,
    pub total_expense: Decimal,
    pub limit: Option<Decimal>,
    #[serde(flatten)]
    pub status: LimitStatus,
}

pub fn status_view(state: &CurrencyState, sub: &clap::ArgMatches) -> Result<StatusRow> {
    let fx = state.snapshot();
    let data = load_data(sub)?;
    let user = *sub.get_one::<i64>("user").context("user is required")?;
    let records = data.records_for(Some(user));
    let spent = sum_amounts(expenses(&records));
    let limit = data.limit_for(user);
    let status = evaluate(spent, limit, fx.rate);
    Ok(StatusRow {
        user_id: user,
        currency: fx.currency,
        total_expense: display(spent, fx.rate),
        limit: limit.map(|l| display(l, fx.rate)),
        status,
    })
}

fn status(state: &CurrencyState, sub: &clap::ArgMatches) -> Result<()> {
    let row = status_view(state, sub)?;
    let ccy = row.currency;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &row)? {
        return Ok(());
    }
    let signal = match row.status.signal {
        LimitSignal::NoLimit => "no limit set",
        LimitSignal::Within => "within limit",
        LimitSignal::Exceeded => "limit exceeded",
    };
    println!(
        "{}",
        pretty_table(
            &["User", "Spent", "Limit", "Used", "Status"],
            vec![vec![
                row.user_id.to_string(),
                fmt_money(row.total_expense, ccy),
                row.limit
                    .map(|l| fmt_money(l, ccy))
                    .unwrap_or_else(|| "-".into()),
                row.status
                    .used_percent
                    .map(|p| format!("{:.0}%", p.floor()))
                    .unwrap_or_else(|| "-".into()),
                signal.to_string(),
            ]],
        )
    );
    Ok(())
}
