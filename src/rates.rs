// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::errors::SpendError;
use crate::models::Currency;
use crate::utils::http_client;

pub const DEFAULT_RATE_URL: &str = "http://localhost:8082/api/currency/convert";

/// Source of base -> target conversion rates (1 base = rate target).
pub trait RateProvider: Send + Sync {
    fn rate(&self, base: Currency, target: Currency) -> Result<Decimal, SpendError>;
}

/// Calls the dashboard backend's conversion endpoint with `amount=1`.
pub struct HttpRateProvider {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpRateProvider {
    pub fn new(url: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            client: http_client()?,
            url: url.into(),
        })
    }
}

impl RateProvider for HttpRateProvider {
    fn rate(&self, base: Currency, target: Currency) -> Result<Decimal, SpendError> {
        let fail = |reason: String| SpendError::RateLookup {
            base,
            target,
            reason,
        };
        let resp = self
            .client
            .get(&self.url)
            .query(&[("from", base.code()), ("to", target.code()), ("amount", "1")])
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| fail(e.to_string()))?;
        let body: Value = resp.json().map_err(|e| fail(e.to_string()))?;
        parse_rate_body(&body).map_err(fail)
    }
}

/// Accepts a bare number, a numeric string, or an object carrying `rate`/`result`.
pub fn parse_rate_body(body: &Value) -> Result<Decimal, String> {
    let raw = match body {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        Value::Object(m) => match m.get("rate").or_else(|| m.get("result")) {
            Some(inner) => return parse_rate_body(inner),
            None => return Err(format!("no rate in response {}", body)),
        },
        other => return Err(format!("unexpected rate payload {}", other)),
    };
    let rate = raw
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&raw))
        .map_err(|e| format!("invalid rate '{}': {}", raw, e))?;
    if rate <= Decimal::ZERO {
        return Err(format!("rate must be positive, got {}", rate));
    }
    Ok(rate)
}

/// In-process rates, for offline use and tests. Unknown pairs fail like a
/// provider error would.
#[derive(Debug, Clone, Default)]
pub struct FixedRates {
    rates: HashMap<Currency, Decimal>,
}

impl FixedRates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, target: Currency, rate: Decimal) -> Self {
        self.rates.insert(target, rate);
        self
    }
}

impl RateProvider for FixedRates {
    fn rate(&self, base: Currency, target: Currency) -> Result<Decimal, SpendError> {
        if base == target {
            return Ok(Decimal::ONE);
        }
        self.rates
            .get(&target)
            .copied()
            .filter(|r| *r > Decimal::ZERO)
            .ok_or_else(|| SpendError::RateLookup {
                base,
                target,
                reason: "no rate configured".into(),
            })
    }
}
