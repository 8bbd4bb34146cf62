//! Per-file test outcomes and the run tally

use crate::diff::DiffLine;

/// Outcome of comparing one test file against its baseline
///
/// A missing baseline is not an outcome: it halts the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestOutcome {
    Pass,
    Fail { diff: Vec<DiffLine> },
}

impl TestOutcome {
    /// Outcome from a diff; empty means pass
    pub fn from_diff(diff: Vec<DiffLine>) -> Self {
        if diff.is_empty() {
            Self::Pass
        } else {
            Self::Fail { diff }
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// Running pass/fail counters for a test action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &TestOutcome) {
        self.total += 1;
        if outcome.is_pass() {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
