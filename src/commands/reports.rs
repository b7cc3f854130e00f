// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::commands::load_data;
use crate::convert::display;
use crate::currency::CurrencyState;
use crate::models::Currency;
use crate::report::{AdminReport, DisplaySummary, MonthlyBar, SummaryReport, admin_report, monthly_chart};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle(state: &CurrencyState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(state, sub)?,
        Some(("admin", sub)) => admin(state, sub)?,
        Some(("monthly", sub)) => monthly(state, sub)?,
        _ => {}
    }
    Ok(())
}

fn fallback_note(fallback: bool) {
    if fallback {
        println!("note: rate lookup failed, figures are in base currency amounts");
    }
}

pub fn summary_view(state: &CurrencyState, sub: &clap::ArgMatches) -> Result<DisplaySummary> {
    let fx = state.snapshot();
    let data = load_data(sub)?;
    let user = sub.get_one::<i64>("user").copied();
    Ok(SummaryReport::from_records(&data.records_for(user)).to_display(&fx))
}

fn summary(state: &CurrencyState, sub: &clap::ArgMatches) -> Result<()> {
    let report = summary_view(state, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    let ccy = report.currency;
    println!(
        "{}",
        pretty_table(
            &["Total Income", "Total Expense", "Balance"],
            vec![vec![
                fmt_money(report.total_income, ccy),
                fmt_money(report.total_expense, ccy),
                fmt_money(report.balance, ccy),
            ]],
        )
    );
    let rows = report
        .expense_by_category
        .iter()
        .map(|c| {
            vec![
                c.category.clone(),
                fmt_money(c.amount, ccy),
                format!("{:.2}%", c.share_percent),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    fallback_note(report.fallback);
    Ok(())
}

pub fn admin_view(state: &CurrencyState, sub: &clap::ArgMatches) -> Result<AdminReport> {
    let fx = state.snapshot();
    let data = load_data(sub)?;
    Ok(admin_report(&data.users, &data.records(), &data.limits, &fx))
}

fn admin(state: &CurrencyState, sub: &clap::ArgMatches) -> Result<()> {
    let report = admin_view(state, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    let ccy = report.totals.currency;
    println!(
        "{}",
        pretty_table(
            &["System Income", "System Expense", "Balance"],
            vec![vec![
                fmt_money(report.totals.total_income, ccy),
                fmt_money(report.totals.total_expense, ccy),
                fmt_money(report.totals.balance, ccy),
            ]],
        )
    );
    let rows = report
        .users
        .iter()
        .map(|r| {
            vec![
                r.username.clone(),
                fmt_money(r.total_expense, ccy),
                fmt_money(r.total_income, ccy),
                r.limit
                    .map(|l| fmt_money(l, ccy))
                    .unwrap_or_else(|| "-".into()),
                if r.exceeded { "yes".into() } else { "no".into() },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["User", "Expenses", "Incomes", "Limit", "Exceeded"], rows)
    );
    fallback_note(report.totals.fallback);
    Ok(())
}

/// Chart bars plus the limit they were checked against, in display currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyView {
    pub user_id: Option<i64>,
    pub currency: Currency,
    pub fallback: bool,
    pub limit: Option<Decimal>,
    pub bars: Vec<MonthlyBar>,
}

pub fn monthly_view(state: &CurrencyState, sub: &clap::ArgMatches) -> Result<MonthlyView> {
    let fx = state.snapshot();
    let data = load_data(sub)?;
    let user = data.chart_user(sub.get_one::<i64>("user").copied());
    let limit = user.and_then(|id| data.limit_for(id));
    Ok(MonthlyView {
        user_id: user,
        currency: fx.currency,
        fallback: fx.fallback,
        limit: limit.map(|l| display(l, fx.rate)),
        bars: monthly_chart(&data.monthly_source(user), limit, &fx),
    })
}

fn monthly(state: &CurrencyState, sub: &clap::ArgMatches) -> Result<()> {
    let view = monthly_view(state, sub)?;
    if sub.get_flag("jsonl") {
        // One line per bar.
        return maybe_print_json(false, true, &view.bars).map(|_| ());
    }
    if maybe_print_json(sub.get_flag("json"), false, &view)? {
        return Ok(());
    }
    let rows = view
        .bars
        .iter()
        .map(|b| {
            vec![
                b.month.clone(),
                fmt_money(b.amount, view.currency),
                if b.over_limit { "over limit".into() } else { String::new() },
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Month", "Expense", ""], rows));
    match view.limit {
        Some(l) => println!("Limit: {}", fmt_money(l, view.currency)),
        None => println!("No limit set"),
    }
    fallback_note(view.fallback);
    Ok(())
}
