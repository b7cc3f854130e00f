// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

use crate::models::Currency;

/// Failures surfaced by the conversion and currency layers.
///
/// A missing monthly limit is deliberately not represented here: it is a
/// regular state (`Option::None`) threaded through aggregation and evaluation.
#[derive(Debug, Error)]
pub enum SpendError {
    #[error("rate lookup {base}->{target} failed: {reason}")]
    RateLookup {
        base: Currency,
        target: Currency,
        reason: String,
    },
    #[error("invalid amount '{input}': {reason}")]
    InvalidAmount { input: String, reason: String },
    #[error("please provide a valid category")]
    MissingCategory,
    #[error("unsupported currency '{0}'")]
    UnsupportedCurrency(String),
    #[error("persisted currency state is corrupt: {0}")]
    CorruptState(String),
}

impl SpendError {
    pub fn invalid_amount(input: &str, reason: impl Into<String>) -> Self {
        SpendError::InvalidAmount {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
