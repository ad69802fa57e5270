//! # Daka Core Library
//!
//! Core logic for the Daka habit check-in calendar: a set of named projects
//! (habits), a per-project record of the days checked in, and the year-long
//! heatmap grid those days are drawn on. The `daka` CLI is a thin shell over
//! this crate.
//!
//! ## Architecture
//!
//! - **Calendar**: day keys, week boundaries and the padded week grid
//! - **Check-ins**: per-project presence sets with toggle and statistics
//! - **Registry**: ordered projects with exactly one active project
//! - **Storage**: key/value blob stores and best-effort typed load/save
//! - **App**: the state object tying these together, saving on every commit
//!
//! ## Key Components
//!
//! - [`App`]: Application state and commit hook
//! - [`WeekGrid`]: Heatmap layout for a trailing window
//! - [`CheckinPartition`]: Check-ins for every project
//! - [`ProjectRegistry`]: Project list and active selection
//! - [`Config`]: Application configuration management

pub mod app;
pub mod calendar;
pub mod checkin;
pub mod config;
pub mod error;
pub mod registry;
pub mod storage;

pub use app::{status_label, App, CheckinDialog, ToggleOutcome};
pub use calendar::{
    add_days, build_week_grid, day_key, month_labels, start_of_day, start_of_week, today,
    DayKey, GridDay, MonthLabel, Week, WeekGrid, WEEKDAY_LABELS,
};
pub use checkin::{CheckinPartition, CheckinStats};
pub use config::Config;
pub use error::{ConfigError, CoreError, KeyError, StorageError};
pub use registry::{Project, ProjectRegistry, DEFAULT_PROJECT_ID, DEFAULT_PROJECT_NAME};
pub use storage::{BlobStore, FileStore, MemoryStore};
