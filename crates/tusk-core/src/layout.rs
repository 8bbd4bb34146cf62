//! Project directory layout
//!
//! A project root holds four directories:
//!
//! - `seeds/` - SQL scripts that populate the database, run without rollback
//! - `tests/` - SQL queries whose results are snapshotted
//! - `expected/` - accepted snapshots (`.out`), mirroring `tests/`
//! - `out/` - snapshots from the latest test run, mirroring `tests/`
//!
//! `tests/a/b.sql` maps to `expected/a/b.out` and `out/a/b.out`.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const SQL_EXTENSION: &str = "sql";
const SNAPSHOT_EXTENSION: &str = "out";

/// Errors raised while resolving the project layout
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("Please create folder {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("Please create a seeds folder at {}", .0.display())]
    MissingSeeds(PathBuf),

    #[error("{} is not inside the tests folder {}", .path.display(), .tests.display())]
    OutsideTests { path: PathBuf, tests: PathBuf },

    #[error("Could not read {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Resolved project directories
///
/// Constructed once per invocation; the required directories are checked
/// on construction and never re-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
    seeds: PathBuf,
    tests: PathBuf,
    expected: PathBuf,
    out: PathBuf,
}

impl ProjectLayout {
    /// Resolve the layout under `root`, failing on the first missing
    /// directory among `tests`, `expected` and `out`
    ///
    /// `seeds` is only checked when seed files are requested.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, LayoutError> {
        let root = root.into();
        let layout = Self {
            seeds: root.join("seeds"),
            tests: root.join("tests"),
            expected: root.join("expected"),
            out: root.join("out"),
            root,
        };

        for folder in [&layout.tests, &layout.expected, &layout.out] {
            if !folder.is_dir() {
                return Err(LayoutError::MissingDirectory(folder.clone()));
            }
        }

        Ok(layout)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn seeds(&self) -> &Path {
        &self.seeds
    }

    pub fn tests(&self) -> &Path {
        &self.tests
    }

    pub fn expected(&self) -> &Path {
        &self.expected
    }

    pub fn out(&self) -> &Path {
        &self.out
    }

    /// All `.sql` files under `seeds/`
    pub fn seed_files(&self) -> Result<Vec<PathBuf>, LayoutError> {
        if !self.seeds.is_dir() {
            return Err(LayoutError::MissingSeeds(self.seeds.clone()));
        }
        sql_files(&self.seeds)
    }

    /// All `.sql` files under `tests/`
    ///
    /// Every call walks the directory again, so each action sees the
    /// files present when it starts.
    pub fn test_files(&self) -> Result<Vec<PathBuf>, LayoutError> {
        sql_files(&self.tests)
    }

    /// Baseline snapshot path for a test file
    pub fn expected_path(&self, test_file: &Path) -> Result<PathBuf, LayoutError> {
        self.reroot(test_file, &self.expected)
    }

    /// Actual-output snapshot path for a test file
    pub fn out_path(&self, test_file: &Path) -> Result<PathBuf, LayoutError> {
        self.reroot(test_file, &self.out)
    }

    /// Test file path relative to `tests/`, used to label report lines
    pub fn test_name(&self, test_file: &Path) -> Result<PathBuf, LayoutError> {
        self.relative_to_tests(test_file).map(Path::to_path_buf)
    }

    fn relative_to_tests<'p>(&self, test_file: &'p Path) -> Result<&'p Path, LayoutError> {
        test_file
            .strip_prefix(&self.tests)
            .map_err(|_| LayoutError::OutsideTests {
                path: test_file.to_path_buf(),
                tests: self.tests.clone(),
            })
    }

    fn reroot(&self, test_file: &Path, target: &Path) -> Result<PathBuf, LayoutError> {
        let relative = self.relative_to_tests(test_file)?;
        Ok(target.join(relative).with_extension(SNAPSHOT_EXTENSION))
    }
}

/// Recursively collect `.sql` files, sorted by name within each directory
///
/// Symlinks are followed. Any walk error, such as a dangling link, fails
/// the whole walk.
fn sql_files(dir: &Path) -> Result<Vec<PathBuf>, LayoutError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|source| LayoutError::Walk {
            path: source.path().unwrap_or(dir).to_path_buf(),
            source,
        })?;

        let is_sql = entry
            .path()
            .extension()
            .is_some_and(|ext| ext == SQL_EXTENSION);
        if entry.file_type().is_file() && is_sql {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
