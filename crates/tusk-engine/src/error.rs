//! Run errors and process exit codes

use std::path::PathBuf;
use tusk_core::{LayoutError, RunSummary};
use tusk_db::RunnerError;

pub const EXIT_SUCCESS: i32 = 0;

/// Missing directories, bad config, unreachable database, failed queries
pub const EXIT_SETUP: i32 = 1;

/// A test file had no baseline; the run halted
pub const EXIT_MISSING_BASELINE: i32 = 3;

/// At least one snapshot did not match its baseline
pub const EXIT_TESTS_FAILED: i32 = 13;

/// Errors that end an action
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Runner(#[from] RunnerError),

    #[error("Failed to write {}: {source}", .path.display())]
    Snapshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report: {0}")]
    Report(#[from] std::io::Error),

    #[error("Could not find expected file {}. Please run tusk update", .expected.display())]
    MissingBaseline { index: usize, expected: PathBuf },

    #[error("You have {} tests that do not pass", .0.failed)]
    TestsFailed(RunSummary),
}

impl RunError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::MissingBaseline { .. } => EXIT_MISSING_BASELINE,
            RunError::TestsFailed(_) => EXIT_TESTS_FAILED,
            // A missing seeds/ folder shares the setup code with every other
            // layout problem; the message names the folder.
            RunError::Layout(LayoutError::MissingSeeds(_)) => EXIT_SETUP,
            RunError::Layout(_)
            | RunError::Runner(_)
            | RunError::Snapshot { .. }
            | RunError::Report(_) => EXIT_SETUP,
        }
    }
}
