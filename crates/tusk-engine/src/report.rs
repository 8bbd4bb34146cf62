//! Line-oriented progress and test report
//!
//! Test lines follow the TAP shape (`ok N - name`, `not ok N - name`,
//! `#` comments) so they can be consumed line by line.

use std::io::{self, Write};
use std::path::Path;
use tusk_core::{DiffLine, RunSummary};

/// Number of actual-output lines echoed above a failing diff
const HEADER_LINES: usize = 3;

/// Writes report lines to an output stream
pub struct Reporter<W: Write> {
    out: W,
}

/// Context printed above a failing diff
pub struct Failure<'a> {
    pub index: usize,
    pub name: &'a Path,
    pub query_file: &'a Path,
    pub expected_file: &'a Path,
    pub actual_file: &'a Path,
    pub actual: &'a str,
    pub diff: &'a [DiffLine],
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn seeding(&mut self, seed_file: &Path) -> io::Result<()> {
        writeln!(self.out, "Seeding {}", file_name(seed_file))
    }

    pub fn updated(&mut self, name: &Path) -> io::Result<()> {
        writeln!(self.out, "Updated {}", name.display())
    }

    pub fn ok(&mut self, index: usize, name: &Path) -> io::Result<()> {
        writeln!(self.out, "ok {} - {}", index, name.display())
    }

    pub fn not_ok(&mut self, failure: &Failure<'_>) -> io::Result<()> {
        writeln!(self.out, "# Query file: {}", file_name(failure.query_file))?;
        writeln!(self.out, "# Expected result file: {}", file_name(failure.expected_file))?;
        writeln!(self.out, "# Actual result file: {}", file_name(failure.actual_file))?;
        writeln!(self.out, "#")?;
        for line in failure.actual.lines().take(HEADER_LINES) {
            writeln!(self.out, "#   {}", line)?;
        }
        for line in failure.diff {
            writeln!(self.out, "# {}", line)?;
        }
        writeln!(self.out, "not ok {} - {}", failure.index, failure.name.display())
    }

    pub fn missing_baseline(&mut self, index: usize, expected: &Path) -> io::Result<()> {
        writeln!(
            self.out,
            "not ok {} - Could not find expected file {}. Please run tusk update",
            index,
            expected.display()
        )
    }

    pub fn summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        if summary.has_failures() {
            writeln!(
                self.out,
                "You have {} tests that do not pass. Good luck!",
                summary.failed
            )
        } else {
            writeln!(self.out, "# {} tests, all passed", summary.total)
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tusk_core::diff_lines;

    fn output(reporter: Reporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn ok_line() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.ok(1, Path::new("a.sql")).unwrap();
        assert_eq!(output(reporter), "ok 1 - a.sql\n");
    }

    #[test]
    fn failure_block() {
        let expected = "+---+\n| x |\n+---+\n| 2 |\n+---+";
        let actual = "+---+\n| x |\n+---+\n| 1 |\n+---+";
        let diff = diff_lines(expected, actual);

        let mut reporter = Reporter::new(Vec::new());
        reporter
            .not_ok(&Failure {
                index: 1,
                name: Path::new("a.sql"),
                query_file: Path::new("/proj/tests/a.sql"),
                expected_file: Path::new("/proj/expected/a.out"),
                actual_file: Path::new("/proj/out/a.out"),
                actual,
                diff: &diff,
            })
            .unwrap();

        assert_eq!(
            output(reporter),
            "# Query file: a.sql\n\
             # Expected result file: a.out\n\
             # Actual result file: a.out\n\
             #\n\
             #   +---+\n\
             #   | x |\n\
             #   +---+\n\
             # - | 2 |\n\
             # + | 1 |\n\
             not ok 1 - a.sql\n"
        );
    }

    #[test]
    fn short_actual_output_echoes_what_exists() {
        let diff = diff_lines("x", "<empty>");
        let mut reporter = Reporter::new(Vec::new());
        reporter
            .not_ok(&Failure {
                index: 4,
                name: Path::new("nested/d.sql"),
                query_file: Path::new("tests/nested/d.sql"),
                expected_file: Path::new("expected/nested/d.out"),
                actual_file: Path::new("out/nested/d.out"),
                actual: "<empty>",
                diff: &diff,
            })
            .unwrap();

        let text = output(reporter);
        assert!(text.contains("#   <empty>\n# - x\n# + <empty>\n"));
        assert!(text.ends_with("not ok 4 - nested/d.sql\n"));
    }

    #[test]
    fn summary_lines() {
        let mut reporter = Reporter::new(Vec::new());
        reporter
            .summary(&RunSummary { total: 3, passed: 1, failed: 2 })
            .unwrap();
        reporter
            .summary(&RunSummary { total: 3, passed: 3, failed: 0 })
            .unwrap();

        assert_eq!(
            output(reporter),
            "You have 2 tests that do not pass. Good luck!\n# 3 tests, all passed\n"
        );
    }
}
