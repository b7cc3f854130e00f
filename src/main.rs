// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::{Context, Result};

use spendboard::currency::CurrencyState;
use spendboard::session::SqliteSessionStore;
use spendboard::{cli, commands, db};

fn main() -> Result<()> {
    spendboard::init();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init(matches.get_one::<String>("db").map(Path::new))?;
    let state = CurrencyState::restore(Box::new(SqliteSessionStore::new(conn)));
    let rate_url = matches
        .get_one::<String>("rate-url")
        .context("rate endpoint not configured")?;

    match matches.subcommand() {
        Some(("currency", sub)) => commands::currency::handle(&state, rate_url, sub)?,
        Some(("convert", sub)) => commands::convert::handle(&state, sub)?,
        Some(("report", sub)) => commands::reports::handle(&state, sub)?,
        Some(("limit", sub)) => commands::limits::handle(&state, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
