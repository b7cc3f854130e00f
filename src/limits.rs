// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::convert::{checked_to_display, effective_rate, present};

/// Whether an expense total has reached the monthly limit.
///
/// Both sides are converted with the same rate before comparing, and the
/// comparison runs on the unrounded display values. Reaching the limit
/// exactly counts as exceeded. No limit means never exceeded.
pub fn exceeded(expense_total_base: Decimal, limit_base: Option<Decimal>, rate: Decimal) -> bool {
    let Some(limit) = limit_base else {
        return false;
    };
    let rate = effective_rate(rate);
    match (
        checked_to_display(expense_total_base, rate),
        checked_to_display(limit, rate),
    ) {
        (Some(spent), Some(limit)) => spent >= limit,
        // A positive rate keeps the order, so base values decide when the
        // converted ones do not fit.
        _ => expense_total_base >= limit,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitSignal {
    NoLimit,
    Within,
    Exceeded,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitStatus {
    pub signal: LimitSignal,
    /// Share of the limit used, capped at 100. `None` when no limit is set.
    pub used_percent: Option<Decimal>,
}

pub fn evaluate(expense_total_base: Decimal, limit_base: Option<Decimal>, rate: Decimal) -> LimitStatus {
    let Some(limit) = limit_base else {
        return LimitStatus {
            signal: LimitSignal::NoLimit,
            used_percent: None,
        };
    };
    let signal = if exceeded(expense_total_base, limit_base, rate) {
        LimitSignal::Exceeded
    } else {
        LimitSignal::Within
    };
    LimitStatus {
        signal,
        used_percent: Some(used_percent(expense_total_base, limit)),
    }
}

/// Progress towards the limit, saturating at 100%.
pub fn used_percent(expense_total_base: Decimal, limit_base: Decimal) -> Decimal {
    if limit_base <= Decimal::ZERO {
        return Decimal::ONE_HUNDRED;
    }
    let pct = expense_total_base
        .checked_div(limit_base)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED));
    match pct {
        Some(pct) => present(pct.min(Decimal::ONE_HUNDRED).max(Decimal::ZERO)),
        // Out of range means far past the limit (or far below zero).
        None if expense_total_base.is_sign_negative() => Decimal::ZERO,
        None => Decimal::ONE_HUNDRED,
    }
}
