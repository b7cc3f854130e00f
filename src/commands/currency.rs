// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::currency::{CurrencyState, RateOutcome};
use crate::models::Currency;
use crate::rates::{FixedRates, HttpRateProvider, RateProvider};
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};

pub fn handle(state: &CurrencyState, rate_url: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(state, sub)?,
        Some(("list", _)) => list(state),
        Some(("set", sub)) => {
            let (currency, outcome) = set(state, rate_url, sub)?;
            report_outcome(currency, &outcome);
        }
        _ => {}
    }
    Ok(())
}

fn show(state: &CurrencyState, sub: &clap::ArgMatches) -> Result<()> {
    let snap = state.snapshot();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &snap)? {
        let status = if snap.fallback { "fallback (rate 1)" } else { "ok" };
        println!(
            "{}",
            pretty_table(
                &["Currency", "Symbol", "Rate (1 INR =)", "Status"],
                vec![vec![
                    snap.currency.to_string(),
                    snap.currency.symbol().to_string(),
                    snap.rate.to_string(),
                    status.to_string(),
                ]],
            )
        );
    }
    Ok(())
}

fn list(state: &CurrencyState) {
    let current = state.snapshot().currency;
    let rows = Currency::ALL
        .iter()
        .map(|c| {
            let mut flags = Vec::new();
            if c.is_base() {
                flags.push("base");
            }
            if *c == current {
                flags.push("selected");
            }
            vec![c.to_string(), c.symbol().to_string(), flags.join(", ")]
        })
        .collect();
    println!("{}", pretty_table(&["Code", "Symbol", ""], rows));
}

fn report_outcome(currency: Currency, outcome: &RateOutcome) {
    match outcome {
        RateOutcome::Identity => println!("Display currency set to {} (base)", currency),
        RateOutcome::Resolved(rate) => {
            println!("Display currency set to {} (1 {} = {})", currency, Currency::BASE, rate)
        }
        RateOutcome::Fallback { reason } => println!(
            "Display currency set to {} but the rate lookup failed ({}); amounts shown at rate 1",
            currency, reason
        ),
        RateOutcome::Stale => println!("Selection superseded before {} resolved", currency),
    }
}

/// Selects the currency named in `sub`. `--rate` skips the endpoint.
pub fn set(
    state: &CurrencyState,
    rate_url: &str,
    sub: &clap::ArgMatches,
) -> Result<(Currency, RateOutcome)> {
    let raw = sub
        .get_one::<String>("currency")
        .context("currency is required")?;
    let currency: Currency = raw.parse()?;
    let provider: Box<dyn RateProvider> = match sub.get_one::<String>("rate") {
        Some(r) => Box::new(FixedRates::new().with(currency, parse_decimal(r)?)),
        None => Box::new(HttpRateProvider::new(rate_url)?),
    };
    Ok((currency, state.set_currency(currency, provider.as_ref())))
}
