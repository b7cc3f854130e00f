// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The selected display currency and its rate.
//!
//! [`CurrencyState`] is the only mutable piece of the crate. Readers take a
//! [`CurrencySnapshot`], which always pairs a code with the rate that was
//! resolved for that code. A change goes through [`CurrencyState::begin`]
//! (issue a ticket) and [`CurrencyState::complete`] (apply the lookup
//! result); only the newest ticket is ever applied, so a slow response for
//! an earlier selection cannot overwrite a later one.

use std::sync::{Mutex, RwLock};

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::SpendError;
use crate::models::Currency;
use crate::rates::RateProvider;
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrencySnapshot {
    pub currency: Currency,
    /// 1 unit of base currency = `rate` units of `currency`.
    pub rate: Decimal,
    /// Set when the rate lookup failed and identity was applied instead.
    pub fallback: bool,
}

impl CurrencySnapshot {
    pub fn base() -> Self {
        Self {
            currency: Currency::BASE,
            rate: Decimal::ONE,
            fallback: false,
        }
    }
}

impl Default for CurrencySnapshot {
    fn default() -> Self {
        Self::base()
    }
}

/// What happened to a requested change.
#[derive(Debug, Clone, PartialEq)]
pub enum RateOutcome {
    /// Base currency selected; rate is 1 without a lookup.
    Identity,
    Resolved(Decimal),
    /// The lookup failed; the new currency is paired with rate 1.
    Fallback { reason: String },
    /// A newer selection was made before this response arrived; discarded.
    Stale,
}

/// Handle for an in-flight rate lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateTicket {
    pub currency: Currency,
    seq: u64,
}

#[derive(Debug)]
struct Inner {
    current: CurrencySnapshot,
    requested: Currency,
    seq: u64,
    outstanding: bool,
}

pub struct CurrencyState {
    store: Box<dyn SessionStore>,
    inner: RwLock<Inner>,
    /// Serializes saves in the order the snapshots were applied.
    persist: Mutex<()>,
}

impl CurrencyState {
    /// Starts from base defaults without reading the store.
    pub fn new(store: Box<dyn SessionStore>) -> Self {
        Self::with_snapshot(store, CurrencySnapshot::base())
    }

    /// Restores the pair persisted by an earlier session. Anything unreadable
    /// resets to base defaults; a missing or unparsable rate becomes 1.
    pub fn restore(store: Box<dyn SessionStore>) -> Self {
        let snapshot = match load_snapshot(store.as_ref()) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "resetting display currency to base defaults");
                CurrencySnapshot::base()
            }
        };
        Self::with_snapshot(store, snapshot)
    }

    fn with_snapshot(store: Box<dyn SessionStore>, current: CurrencySnapshot) -> Self {
        Self {
            store,
            inner: RwLock::new(Inner {
                current,
                requested: current.currency,
                seq: 0,
                outstanding: false,
            }),
            persist: Mutex::new(()),
        }
    }

    pub fn snapshot(&self) -> CurrencySnapshot {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).current
    }

    /// The currency most recently asked for, if its rate is still outstanding.
    pub fn pending(&self) -> Option<Currency> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.outstanding.then_some(inner.requested)
    }

    /// Records `currency` as the latest selection and returns a ticket for
    /// its lookup. Any earlier ticket becomes stale.
    pub fn begin(&self, currency: Currency) -> RateTicket {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.seq += 1;
        inner.requested = currency;
        inner.outstanding = true;
        RateTicket {
            currency,
            seq: inner.seq,
        }
    }

    /// Applies a lookup result if `ticket` is still the latest request.
    pub fn complete(
        &self,
        ticket: RateTicket,
        result: Result<Decimal, SpendError>,
    ) -> RateOutcome {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        if ticket.seq != inner.seq {
            debug!(
                currency = %ticket.currency,
                latest = %inner.requested,
                "discarding stale rate response"
            );
            return RateOutcome::Stale;
        }

        let (next, outcome) = if ticket.currency.is_base() {
            (CurrencySnapshot::base(), RateOutcome::Identity)
        } else {
            match result.and_then(|r| validate_rate(ticket.currency, r)) {
                Ok(rate) => (
                    CurrencySnapshot {
                        currency: ticket.currency,
                        rate,
                        fallback: false,
                    },
                    RateOutcome::Resolved(rate),
                ),
                Err(e) => {
                    warn!(currency = %ticket.currency, error = %e, "rate lookup failed, showing base amounts");
                    (
                        CurrencySnapshot {
                            currency: ticket.currency,
                            rate: Decimal::ONE,
                            fallback: true,
                        },
                        RateOutcome::Fallback {
                            reason: e.to_string(),
                        },
                    )
                }
            }
        };

        inner.current = next;
        inner.outstanding = false;
        // Take the persist lock before readers are let back in, then save
        // without blocking them.
        let _persist = self.persist.lock().unwrap_or_else(|e| e.into_inner());
        drop(inner);
        if let Err(e) = self.store.save(next.currency.code(), &next.rate.to_string()) {
            warn!(error = %e, "failed to persist display currency");
        }
        info!(currency = %next.currency, rate = %next.rate, fallback = next.fallback, "display currency set");
        outcome
    }

    /// Selects `currency`, looking its rate up through `provider` unless it is
    /// the base currency. Never fails; lookup errors end in the fallback.
    pub fn set_currency(&self, currency: Currency, provider: &dyn RateProvider) -> RateOutcome {
        let ticket = self.begin(currency);
        if currency.is_base() {
            return self.complete(ticket, Ok(Decimal::ONE));
        }
        // No lock is held while the lookup runs.
        let result = provider.rate(Currency::BASE, currency);
        self.complete(ticket, result)
    }
}

fn validate_rate(currency: Currency, rate: Decimal) -> Result<Decimal, SpendError> {
    if rate > Decimal::ZERO {
        Ok(rate)
    } else {
        Err(SpendError::RateLookup {
            base: Currency::BASE,
            target: currency,
            reason: format!("provider returned non-positive rate {}", rate),
        })
    }
}

fn load_snapshot(store: &dyn SessionStore) -> Result<CurrencySnapshot, SpendError> {
    let stored = store
        .load()
        .map_err(|e| SpendError::CorruptState(e.to_string()))?;
    let Some(code) = stored.currency else {
        return Ok(CurrencySnapshot::base());
    };
    let currency: Currency = code
        .parse()
        .map_err(|e: SpendError| SpendError::CorruptState(e.to_string()))?;
    if currency.is_base() {
        return Ok(CurrencySnapshot::base());
    }
    let rate = stored
        .rate
        .as_deref()
        .and_then(|r| r.trim().parse::<Decimal>().ok())
        .filter(|r| *r > Decimal::ZERO);
    Ok(match rate {
        Some(rate) => CurrencySnapshot {
            currency,
            rate,
            fallback: false,
        },
        None => {
            warn!(%currency, "persisted rate missing or unparsable, using 1");
            CurrencySnapshot {
                currency,
                rate: Decimal::ONE,
                fallback: true,
            }
        }
    })
}
