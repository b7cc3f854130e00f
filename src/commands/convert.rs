// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::convert::{
    display, parse_amount, submit_amount, submit_expense, submit_income, submit_limit,
};
use crate::currency::CurrencyState;
use crate::models::Currency;
use crate::utils::{fmt_money, maybe_print_json};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversion {
    pub input: String,
    pub from: Currency,
    pub to: Currency,
    /// Full precision when converting to base, rounded otherwise.
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

pub fn handle(state: &CurrencyState, m: &clap::ArgMatches) -> Result<()> {
    let c = conversion(state, m)?;
    if maybe_print_json(m.get_flag("json"), false, &c)? {
        return Ok(());
    }
    if m.get_flag("to-base") {
        let category = c
            .category
            .as_deref()
            .map(|cat| format!(" [{}]", cat))
            .unwrap_or_default();
        // Full precision: this is the value that gets stored.
        println!("{} {} -> {} {}{}", c.input, c.from, c.amount, c.to, category);
    } else {
        println!("{} {} -> {}", c.input, c.from, fmt_money(c.amount, c.to));
    }
    Ok(())
}

/// Runs the conversion `m` asks for against the current display rate.
pub fn conversion(state: &CurrencyState, m: &clap::ArgMatches) -> Result<Conversion> {
    let fx = state.snapshot();
    let input = m.get_one::<String>("amount").context("amount is required")?;
    if !m.get_flag("to-base") {
        let amount = parse_amount(input)?;
        return Ok(Conversion {
            input: input.trim().to_string(),
            from: Currency::BASE,
            to: fx.currency,
            amount: display(amount, fx.rate),
            category: None,
        });
    }

    let mut category = None;
    let amount = if let Some(cat) = m.get_one::<String>("category") {
        let entry = submit_expense(cat, input, fx.rate)?;
        category = Some(entry.category);
        entry.amount_base
    } else if m.get_flag("income") {
        submit_income(input, fx.rate)?
    } else if m.get_flag("limit") {
        submit_limit(input, fx.rate)?
    } else {
        submit_amount(input, fx.rate)?
    };
    Ok(Conversion {
        input: input.trim().to_string(),
        from: fx.currency,
        to: Currency::BASE,
        amount,
        category,
    })
}
