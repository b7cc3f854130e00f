// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod convert;
pub mod currency;
pub mod limits;
pub mod reports;

use std::path::Path;

use anyhow::{Result, bail};

use crate::models::TxKind;
use crate::records::{Snapshot, load_csv};

/// Builds the record set for a report from `--data` and the CSV extras.
pub fn load_data(sub: &clap::ArgMatches) -> Result<Snapshot> {
    let data = sub.get_one::<String>("data").map(|s| s.trim());
    let exp_csv = sub.get_one::<String>("expenses-csv").map(|s| s.trim());
    let inc_csv = sub.get_one::<String>("incomes-csv").map(|s| s.trim());
    if data.is_none() && exp_csv.is_none() && inc_csv.is_none() {
        bail!("no records given; pass --data, --expenses-csv or --incomes-csv");
    }
    let mut snap = match data {
        Some(p) => Snapshot::from_path(Path::new(p))?,
        None => Snapshot::default(),
    };
    if let Some(p) = exp_csv {
        snap.expenses.extend(load_csv(Path::new(p), TxKind::Expense)?);
    }
    if let Some(p) = inc_csv {
        snap.incomes.extend(load_csv(Path::new(p), TxKind::Income)?);
    }
    snap.check_totals()?;
    Ok(snap)
}
