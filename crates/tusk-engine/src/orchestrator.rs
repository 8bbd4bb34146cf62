//! Seed, update and test actions

use crate::error::RunError;
use crate::report::{Failure, Reporter};
use std::io::Write;
use std::path::{Path, PathBuf};
use tusk_core::{diff_lines, render, ProjectLayout, RunSummary, TestOutcome};
use tusk_db::{Database, QueryRunner};

/// Top-level action selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Seed,
    Update,
    Test,
}

/// Runs one action over the project's files
///
/// Owns the only handle to the database for the duration of the run, so
/// files cannot be executed concurrently.
pub struct Orchestrator<'a, D: Database + ?Sized, W: Write> {
    layout: &'a ProjectLayout,
    runner: QueryRunner<'a, D>,
    reporter: Reporter<W>,
}

impl<'a, D: Database + ?Sized, W: Write> Orchestrator<'a, D, W> {
    pub fn new(layout: &'a ProjectLayout, db: &'a mut D, out: W) -> Self {
        Self {
            layout,
            runner: QueryRunner::new(db),
            reporter: Reporter::new(out),
        }
    }

    /// Give back the report stream
    pub fn into_writer(self) -> W {
        self.reporter.into_inner()
    }

    /// Dispatch an action
    pub async fn run(&mut self, action: Action) -> Result<(), RunError> {
        tracing::info!(?action, root = %self.layout.root().display(), "starting");

        match action {
            Action::Seed => self.seed().await.map(|_| ()),
            Action::Update => self.update().await.map(|_| ()),
            Action::Test => self.test().await.map(|_| ()),
        }
    }

    /// Execute every seed file with no rollback; returns the number run
    ///
    /// Seeds that ran before a failing one stay applied.
    pub async fn seed(&mut self) -> Result<usize, RunError> {
        let seed_files = self.layout.seed_files()?;

        for seed_file in &seed_files {
            self.reporter.seeding(seed_file)?;
            self.runner.run_persistent(seed_file).await?;
        }

        tracing::info!(files = seed_files.len(), "seeding finished");
        Ok(seed_files.len())
    }

    /// Record every test file's result as its baseline; returns the
    /// number written
    pub async fn update(&mut self) -> Result<usize, RunError> {
        let test_files = self.layout.test_files()?;

        for test_file in &test_files {
            let result = self.runner.run_isolated(test_file).await?;
            let expected_file = self.layout.expected_path(test_file)?;

            write_snapshot(&expected_file, &render(&result)).await?;
            self.reporter.updated(&self.layout.test_name(test_file)?)?;
        }

        tracing::info!(files = test_files.len(), "baselines updated");
        Ok(test_files.len())
    }

    /// Compare every test file's result against its baseline
    ///
    /// The actual output is always written to `out/`. Returns
    /// [`RunError::TestsFailed`] once all files ran if any differed, and
    /// [`RunError::MissingBaseline`] immediately if a baseline is absent.
    pub async fn test(&mut self) -> Result<RunSummary, RunError> {
        let mut summary = RunSummary::default();

        for (i, test_file) in self.layout.test_files()?.iter().enumerate() {
            let index = i + 1;
            let outcome = self.test_file(index, test_file).await?;
            summary.record(&outcome);
        }

        self.reporter.summary(&summary)?;
        tracing::info!(total = summary.total, failed = summary.failed, "test run finished");

        if summary.has_failures() {
            return Err(RunError::TestsFailed(summary));
        }
        Ok(summary)
    }

    async fn test_file(&mut self, index: usize, test_file: &Path) -> Result<TestOutcome, RunError> {
        let name = self.layout.test_name(test_file)?;
        let result = self.runner.run_isolated(test_file).await?;
        let actual = render(&result);

        let out_file = self.layout.out_path(test_file)?;
        write_snapshot(&out_file, &actual).await?;

        let expected_file = self.layout.expected_path(test_file)?;
        if !expected_file.is_file() {
            tracing::warn!(test = %name.display(), expected = %expected_file.display(), "baseline missing");
            self.reporter.missing_baseline(index, &expected_file)?;
            return Err(RunError::MissingBaseline {
                index,
                expected: expected_file,
            });
        }

        let expected = tokio::fs::read_to_string(&expected_file)
            .await
            .map_err(|source| RunError::Snapshot {
                path: expected_file.clone(),
                source,
            })?;

        let outcome = TestOutcome::from_diff(diff_lines(&expected, &actual));
        match &outcome {
            TestOutcome::Pass => self.reporter.ok(index, &name)?,
            TestOutcome::Fail { diff } => {
                tracing::debug!(test = %name.display(), changed_lines = diff.len(), "snapshot differs");
                self.reporter.not_ok(&Failure {
                    index,
                    name: &name,
                    query_file: test_file,
                    expected_file: &expected_file,
                    actual_file: &out_file,
                    actual: &actual,
                    diff,
                })?;
            }
        }

        Ok(outcome)
    }
}

/// Write a snapshot, creating parent directories and replacing any
/// previous file
async fn write_snapshot(path: &Path, contents: &str) -> Result<(), RunError> {
    let snapshot_error = |source| RunError::Snapshot {
        path: PathBuf::from(path),
        source,
    };

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(snapshot_error)?;
    }
    tokio::fs::write(path, contents).await.map_err(snapshot_error)
}
