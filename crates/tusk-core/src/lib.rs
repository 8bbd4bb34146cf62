//! Tusk Core
//!
//! Domain model for SQL snapshot testing: project layout, result-set
//! rendering and snapshot diffing. Nothing here talks to a database.
//!
//! The rendered table format is persisted in `expected/` and byte-compared
//! on every run, so any change to [`table::render`] invalidates every
//! recorded baseline.

pub mod config;
pub mod diff;
pub mod layout;
pub mod outcome;
pub mod table;

pub use config::{Config, ConfigError, DatabaseConfig, DEFAULT_CONFIG_FILE, DATABASE_URL_ENV};
pub use diff::{diff_lines, DiffLine, Side};
pub use layout::{LayoutError, ProjectLayout};
pub use outcome::{RunSummary, TestOutcome};
pub use table::{render, ResultSet};
