// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod convert;
pub mod currency;
pub mod db;
pub mod errors;
pub mod limits;
pub mod models;
pub mod rates;
pub mod records;
pub mod report;
pub mod session;
pub mod utils;

use std::sync::Once;

static INIT: Once = Once::new();

/// Sets up logging for the binary. Library users install their own subscriber.
pub fn init() {
    INIT.call_once(|| {
        utils::init_tracing();
        tracing::debug!("spendboard tracing initialized");
    });
}
