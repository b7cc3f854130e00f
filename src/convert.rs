// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Base <-> display currency conversion.
//!
//! Aggregation always runs on full-precision base amounts. Rounding to two
//! decimal places happens here, in [`present`], and nowhere else.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

use crate::errors::SpendError;

/// Largest single income entry accepted from a user, in base currency.
pub const INCOME_CAP: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// Returns `rate` if it is usable as a multiplier/divisor, otherwise identity.
pub fn effective_rate(rate: Decimal) -> Decimal {
    if rate > Decimal::ZERO {
        rate
    } else {
        warn!(%rate, "non-positive conversion rate, falling back to 1");
        Decimal::ONE
    }
}

/// Converts a base-currency amount into the display currency at full precision.
/// Results beyond the `Decimal` range saturate.
pub fn to_display(amount_base: Decimal, rate: Decimal) -> Decimal {
    amount_base.saturating_mul(rate)
}

pub fn checked_to_display(amount_base: Decimal, rate: Decimal) -> Option<Decimal> {
    amount_base.checked_mul(rate)
}

/// Converts a user-entered display amount back into the base currency.
///
/// A zero or negative rate is an invalid state and is treated as 1. Results
/// beyond the `Decimal` range saturate; see [`checked_to_base`].
pub fn to_base(amount_display: Decimal, rate: Decimal) -> Decimal {
    checked_to_base(amount_display, rate).unwrap_or_else(|| saturated(amount_display))
}

/// `None` when the base value does not fit in a `Decimal`.
pub fn checked_to_base(amount_display: Decimal, rate: Decimal) -> Option<Decimal> {
    amount_display.checked_div(effective_rate(rate))
}

fn saturated(sign_of: Decimal) -> Decimal {
    if sign_of.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

/// Rounds a display figure to two decimal places, half away from zero.
pub fn present(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts and rounds in one step; for figures that go straight to a view.
pub fn display(amount_base: Decimal, rate: Decimal) -> Decimal {
    present(to_display(amount_base, rate))
}

/// Parses a user-entered amount. Rejects malformed, negative and empty input.
pub fn parse_amount(input: &str) -> Result<Decimal, SpendError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(SpendError::invalid_amount(input, "amount is empty"));
    }
    let v = s
        .parse::<Decimal>()
        .map_err(|e| SpendError::invalid_amount(input, e.to_string()))?;
    if v.is_sign_negative() && !v.is_zero() {
        return Err(SpendError::invalid_amount(input, "amount must not be negative"));
    }
    Ok(v)
}

/// Parses a display-currency amount entered in a form and converts it to base
/// currency, ready to be sent to storage.
pub fn submit_amount(input: &str, rate: Decimal) -> Result<Decimal, SpendError> {
    let v = parse_amount(input)?;
    checked_to_base(v, rate).ok_or_else(|| SpendError::invalid_amount(input, "amount out of range"))
}

/// A validated expense form, amount already in base currency.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseEntry {
    pub category: String,
    pub amount_base: Decimal,
}

/// Validates an expense form: the category must be non-blank and the amount
/// must pass [`submit_amount`].
pub fn submit_expense(category: &str, input: &str, rate: Decimal) -> Result<ExpenseEntry, SpendError> {
    let category = category.trim();
    if category.is_empty() {
        return Err(SpendError::MissingCategory);
    }
    Ok(ExpenseEntry {
        category: category.to_string(),
        amount_base: submit_amount(input, rate)?,
    })
}

/// Parses a monthly limit entered in the display currency and converts it to
/// base currency. Zero is accepted and means nothing may be spent.
pub fn submit_limit(input: &str, rate: Decimal) -> Result<Decimal, SpendError> {
    submit_amount(input, rate).map_err(|e| match e {
        SpendError::InvalidAmount { input, reason } => SpendError::InvalidAmount {
            input,
            reason: format!("invalid limit: {}", reason),
        },
        other => other,
    })
}

/// Like [`submit_amount`] but enforces [`INCOME_CAP`] on the base value.
pub fn submit_income(input: &str, rate: Decimal) -> Result<Decimal, SpendError> {
    let base = submit_amount(input, rate)?;
    if base > INCOME_CAP {
        return Err(SpendError::invalid_amount(
            input,
            format!("income cannot exceed {} in base currency", INCOME_CAP),
        ));
    }
    Ok(base)
}
