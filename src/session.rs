// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Durable storage for the selected display currency and its rate.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

const CURRENCY_KEY: &str = "display_currency";
const RATE_KEY: &str = "display_rate";

/// Raw values as they were written. Parsing and validation happen in
/// [`crate::currency::CurrencyState::restore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredCurrency {
    pub currency: Option<String>,
    pub rate: Option<String>,
}

pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<StoredCurrency>;
    fn save(&self, currency: &str, rate: &str) -> Result<()>;
}

/// Keeps the pair in the `settings` table.
pub struct SqliteSessionStore {
    conn: Mutex<Connection>,
}

impl SqliteSessionStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
        let v: Option<String> = conn
            .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v)
    }
}

impl SessionStore for SqliteSessionStore {
    fn load(&self) -> Result<StoredCurrency> {
        let conn = self.conn.lock().unwrap_or_else(|e| e.into_inner());
        Ok(StoredCurrency {
            currency: Self::get(&conn, CURRENCY_KEY)?,
            rate: Self::get(&conn, RATE_KEY)?,
        })
    }

    fn save(&self, currency: &str, rate: &str) -> Result<()> {
        let mut conn = self.conn.lock().unwrap_or_else(|e| e.into_inner());
        let tx = conn.transaction()?;
        for (k, v) in [(CURRENCY_KEY, currency), (RATE_KEY, rate)] {
            tx.execute(
                "INSERT INTO settings(key, value) VALUES(?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value=excluded.value",
                params![k, v],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds raw values, e.g. to simulate what an earlier session left behind.
    pub fn with_values(currency: Option<&str>, rate: Option<&str>) -> Self {
        let store = Self::new();
        {
            let mut values = store.values.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(c) = currency {
                values.insert(CURRENCY_KEY.into(), c.into());
            }
            if let Some(r) = rate {
                values.insert(RATE_KEY.into(), r.into());
            }
        }
        store
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<StoredCurrency> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(StoredCurrency {
            currency: values.get(CURRENCY_KEY).cloned(),
            rate: values.get(RATE_KEY).cloned(),
        })
    }

    fn save(&self, currency: &str, rate: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(CURRENCY_KEY.into(), currency.into());
        values.insert(RATE_KEY.into(), rate.into());
        Ok(())
    }
}
