//! Tusk engine - seed, update and test actions
//!
//! This crate composes the layout, the query runner, the table renderer and
//! the snapshot diff into the three actions exposed by the CLI:
//!
//! - **seed**: run every `seeds/**/*.sql` with no rollback
//! - **update**: record every `tests/**/*.sql` result as the new baseline
//! - **test**: compare every result against its baseline
//!
//! Files are processed one at a time in enumeration order. Setup errors,
//! query errors and missing baselines abort the run; snapshot mismatches
//! are counted and reported at the end.

pub mod error;
pub mod orchestrator;
pub mod report;

pub use error::{RunError, EXIT_MISSING_BASELINE, EXIT_SETUP, EXIT_SUCCESS, EXIT_TESTS_FAILED};
pub use orchestrator::{Action, Orchestrator};
pub use report::{Failure, Reporter};
