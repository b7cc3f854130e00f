// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use proptest::prelude::*;
use rust_decimal::Decimal;
use spendboard::limits::{evaluate, exceeded, used_percent, LimitSignal};

fn dec(s: &str) -> Decimal {
    Decimal::from_str_exact(s).unwrap()
}

#[test]
fn tiny_limit_saturates_progress() {
    let status = evaluate(Decimal::from(1_000_000), Some(dec("0.0000000000000000000000001")), Decimal::ONE);
    assert_eq!(status.signal, LimitSignal::Exceeded);
    assert_eq!(status.used_percent, Some(Decimal::ONE_HUNDRED));
    assert_eq!(used_percent(Decimal::MAX, dec("0.5")), Decimal::ONE_HUNDRED);
    assert_eq!(used_percent(Decimal::MIN, dec("0.5")), Decimal::ZERO);
}

#[test]
fn comparison_survives_conversion_overflow() {
    // Both sides overflow at rate 2; base order still decides.
    assert!(!exceeded(Decimal::MAX - Decimal::ONE, Some(Decimal::MAX), Decimal::from(2)));
    assert!(exceeded(Decimal::MAX, Some(Decimal::MAX - Decimal::ONE), Decimal::from(2)));
}

#[test]
fn reaching_the_limit_counts_as_exceeded() {
    let limit = Some(dec("5000"));
    assert!(exceeded(dec("5000"), limit, Decimal::ONE));
    assert!(!exceeded(dec("4999.99"), limit, Decimal::ONE));
    assert!(exceeded(dec("5000.01"), limit, Decimal::ONE));
}

#[test]
fn no_limit_is_never_exceeded() {
    assert!(!exceeded(dec("1000000"), None, Decimal::ONE));
    assert!(!exceeded(Decimal::ZERO, None, dec("0.012")));
}

#[test]
fn zero_limit_is_a_real_limit() {
    assert!(exceeded(Decimal::ZERO, Some(Decimal::ZERO), Decimal::ONE));
    let status = evaluate(Decimal::ZERO, Some(Decimal::ZERO), Decimal::ONE);
    assert_eq!(status.signal, LimitSignal::Exceeded);
    assert_eq!(status.used_percent, Some(Decimal::ONE_HUNDRED));
}

#[test]
fn boundary_holds_at_small_rates() {
    // Rounded to cents both would read 60.00; the comparison must not round.
    let rate = dec("0.012");
    assert!(!exceeded(dec("4999.99"), Some(dec("5000")), rate));
    assert!(exceeded(dec("5000"), Some(dec("5000")), rate));
}

#[test]
fn evaluate_reports_progress() {
    let none = evaluate(dec("10"), None, Decimal::ONE);
    assert_eq!(none.signal, LimitSignal::NoLimit);
    assert_eq!(none.used_percent, None);

    let within = evaluate(dec("250"), Some(dec("1000")), dec("0.5"));
    assert_eq!(within.signal, LimitSignal::Within);
    assert_eq!(within.used_percent, Some(dec("25")));

    let over = evaluate(dec("1500"), Some(dec("1000")), Decimal::ONE);
    assert_eq!(over.signal, LimitSignal::Exceeded);
    assert_eq!(over.used_percent, Some(Decimal::ONE_HUNDRED));
}

#[test]
fn progress_is_capped_and_rounded() {
    assert_eq!(used_percent(dec("1"), dec("3")), dec("33.33"));
    assert_eq!(used_percent(dec("9000"), dec("10")), Decimal::ONE_HUNDRED);
}

proptest! {
    #[test]
    fn equality_exceeds_one_cent_below_does_not(
        limit_cents in 1i64..1_000_000_000i64,
        rate_micros in 1i64..1_000_000_000i64,
    ) {
        let limit = Decimal::new(limit_cents, 2);
        let rate = Decimal::new(rate_micros, 6);
        prop_assert!(exceeded(limit, Some(limit), rate));
        prop_assert!(!exceeded(limit - Decimal::new(1, 2), Some(limit), rate));
    }

    #[test]
    fn missing_limit_is_neutral(cents in 0i64..1_000_000_000i64, rate_micros in 1i64..1_000_000_000i64) {
        prop_assert!(!exceeded(Decimal::new(cents, 2), None, Decimal::new(rate_micros, 6)));
    }
}
