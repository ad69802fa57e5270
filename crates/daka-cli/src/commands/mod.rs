//! Subcommand implementations.

pub mod config;
pub mod grid;
pub mod project;
pub mod stats;
pub mod toggle;

use chrono::NaiveDate;
use daka_core::error::Result;
use daka_core::storage::FileStore;
use daka_core::{App, DayKey};

/// clap value parser for `YYYY-MM-DD` arguments.
pub fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    s.parse::<DayKey>()
        .map(|key| key.date())
        .map_err(|e| e.to_string())
}

/// Load application state from the data directory.
pub fn open_app() -> Result<App<FileStore>> {
    Ok(App::load(FileStore::open()?)?)
}
