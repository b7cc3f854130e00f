// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde_json::json;
use spendboard::models::Currency;
use spendboard::rates::{parse_rate_body, FixedRates, RateProvider};

#[test]
fn rate_body_shapes() {
    assert_eq!(parse_rate_body(&json!(0.012)).unwrap(), Decimal::new(12, 3));
    assert_eq!(parse_rate_body(&json!("1.8")).unwrap(), Decimal::new(18, 1));
    assert_eq!(parse_rate_body(&json!({"rate": 0.0093})).unwrap(), Decimal::new(93, 4));
    assert_eq!(parse_rate_body(&json!({"result": "0.5"})).unwrap(), Decimal::new(5, 1));
    assert_eq!(parse_rate_body(&json!(1.2e-2)).unwrap(), Decimal::new(12, 3));
}

#[test]
fn rate_body_rejects_nonsense() {
    assert!(parse_rate_body(&json!(0)).is_err());
    assert!(parse_rate_body(&json!(-1.5)).is_err());
    assert!(parse_rate_body(&json!(null)).is_err());
    assert!(parse_rate_body(&json!({"status": "error"})).is_err());
    assert!(parse_rate_body(&json!("n/a")).is_err());
}

#[test]
fn fixed_rates_fail_for_unknown_pairs() {
    let rates = FixedRates::new().with(Currency::Usd, Decimal::new(12, 3));
    assert_eq!(rates.rate(Currency::Inr, Currency::Usd).unwrap(), Decimal::new(12, 3));
    assert_eq!(rates.rate(Currency::Inr, Currency::Inr).unwrap(), Decimal::ONE);
    assert!(rates.rate(Currency::Inr, Currency::Eur).is_err());
}

#[test]
fn currency_codes_are_a_closed_set() {
    assert_eq!(" gbp ".parse::<Currency>().unwrap(), Currency::Gbp);
    assert!("BTC".parse::<Currency>().is_err());
    assert_eq!(Currency::BASE, Currency::Inr);
    assert_eq!(Currency::Jpy.symbol(), "¥");
}
