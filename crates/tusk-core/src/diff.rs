//! Line diff between an expected and an actual snapshot
//!
//! Lines keep their terminators, so a missing final newline counts as a
//! change. The comparison is purely textual: reordered rows are reported.

use similar::{capture_diff_slices, Algorithm, DiffOp};
use std::collections::HashSet;
use std::fmt;

/// Which snapshot a diff line comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Present in the expected snapshot only
    Expected,

    /// Present in the actual output only
    Actual,
}

impl Side {
    pub fn marker(self) -> char {
        match self {
            Side::Expected => '-',
            Side::Actual => '+',
        }
    }
}

/// A line that differs between the two snapshots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub side: Side,

    /// Line text including its terminator, if it had one
    pub text: String,
}

impl DiffLine {
    fn new(side: Side, text: &str) -> Self {
        Self {
            side,
            text: text.to_string(),
        }
    }

    /// Line text without its terminator
    pub fn content(&self) -> &str {
        self.text.strip_suffix('\n').unwrap_or(&self.text)
    }
}

impl fmt::Display for DiffLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.side.marker(), self.content())
    }
}

/// Compute the changed lines between `expected` and `actual`
///
/// Returns removed and inserted lines in edit-script order; within a
/// changed hunk removals come before insertions. An empty result means
/// the snapshots are identical.
pub fn diff_lines(expected: &str, actual: &str) -> Vec<DiffLine> {
    let old: Vec<&str> = expected.split_inclusive('\n').collect();
    let new: Vec<&str> = actual.split_inclusive('\n').collect();

    let prefix = old.iter().zip(&new).take_while(|(a, b)| a == b).count();
    let suffix = old[prefix..]
        .iter()
        .rev()
        .zip(new[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    let old = &old[prefix..old.len() - suffix];
    let new = &new[prefix..new.len() - suffix];

    edit_script(old, new)
}

/// Edit script for the differing middle section
///
/// Lines present on only one side are never matched and are set aside
/// before running Myers' linear-space diff over the rest. Each gap between
/// two matched lines becomes removals followed by insertions.
fn edit_script(old: &[&str], new: &[&str]) -> Vec<DiffLine> {
    let old_set: HashSet<&str> = old.iter().copied().collect();
    let new_set: HashSet<&str> = new.iter().copied().collect();

    let old_kept: Vec<usize> = (0..old.len()).filter(|&i| new_set.contains(old[i])).collect();
    let new_kept: Vec<usize> = (0..new.len()).filter(|&j| old_set.contains(new[j])).collect();

    let old_shared: Vec<&str> = old_kept.iter().map(|&i| old[i]).collect();
    let new_shared: Vec<&str> = new_kept.iter().map(|&j| new[j]).collect();

    let mut lines = Vec::new();
    let (mut i, mut j) = (0, 0);

    for op in capture_diff_slices(Algorithm::Myers, &old_shared, &new_shared) {
        if let DiffOp::Equal {
            old_index,
            new_index,
            len,
        } = op
        {
            for offset in 0..len {
                let (matched_old, matched_new) =
                    (old_kept[old_index + offset], new_kept[new_index + offset]);
                push_gap(&mut lines, &old[i..matched_old], &new[j..matched_new]);
                i = matched_old + 1;
                j = matched_new + 1;
            }
        }
    }

    push_gap(&mut lines, &old[i..], &new[j..]);
    lines
}

fn push_gap(lines: &mut Vec<DiffLine>, removed: &[&str], inserted: &[&str]) {
    lines.extend(removed.iter().map(|line| DiffLine::new(Side::Expected, line)));
    lines.extend(inserted.iter().map(|line| DiffLine::new(Side::Actual, line)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{render, ResultSet};
    use pretty_assertions::assert_eq;

    fn rendered(lines: &[DiffLine]) -> Vec<String> {
        lines.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn identical_snapshots_have_no_diff() {
        let snapshot = "+---+\n| x |\n+---+\n| 1 |\n+---+";
        assert!(diff_lines(snapshot, snapshot).is_empty());
    }

    #[test]
    fn empty_snapshots_have_no_diff() {
        assert!(diff_lines("", "").is_empty());
    }

    #[test]
    fn changed_value_is_one_removal_and_one_insertion() {
        let expected = "+---+\n| x |\n+---+\n| 2 |\n+---+";
        let actual = "+---+\n| x |\n+---+\n| 1 |\n+---+";

        assert_eq!(rendered(&diff_lines(expected, actual)), vec!["- | 2 |", "+ | 1 |"]);
    }

    #[test]
    fn reordered_rows_are_reported() {
        let diff = diff_lines("a\nb\n", "b\na\n");
        assert!(!diff.is_empty());
        assert!(diff.iter().any(|l| l.side == Side::Expected));
        assert!(diff.iter().any(|l| l.side == Side::Actual));
    }

    #[test]
    fn added_and_removed_rows_keep_original_order() {
        let expected = "h\nr1\nr2\nf\n";
        let actual = "h\nr2\nr3\nf\n";

        assert_eq!(rendered(&diff_lines(expected, actual)), vec!["- r1", "+ r3"]);
    }

    #[test]
    fn missing_final_newline_counts_as_difference() {
        let diff = diff_lines("a\nb\n", "a\nb");
        assert_eq!(
            diff,
            vec![DiffLine::new(Side::Expected, "b\n"), DiffLine::new(Side::Actual, "b")]
        );
    }

    #[test]
    fn whitespace_is_not_normalised() {
        assert_eq!(diff_lines("| 1 |", "| 1  |").len(), 2);
    }

    #[test]
    fn everything_differs_against_empty_baseline() {
        let diff = diff_lines("", "x\ny");
        assert_eq!(rendered(&diff), vec!["+ x", "+ y"]);
    }

    #[test]
    fn diff_is_minimal() {
        let expected = "a\nb\nc\nd\ne\n";
        let actual = "a\nc\nd\nx\ne\n";

        assert_eq!(rendered(&diff_lines(expected, actual)), vec!["- b", "+ x"]);
    }

    fn one_column_table(values: impl IntoIterator<Item = String>) -> String {
        render(&ResultSet::from_text(["x"], values.into_iter().map(|v| [v])))
    }

    #[test]
    fn widened_column_on_large_table_replaces_every_line() {
        let rows = 8_000;
        let expected = one_column_table((0..rows).map(|_| "1".to_string()));
        let actual = one_column_table((0..rows).map(|i| {
            let value = if i == rows - 1 { "10" } else { "1" };
            value.to_string()
        }));

        let diff = diff_lines(&expected, &actual);

        let removed = diff.iter().take_while(|l| l.side == Side::Expected).count();
        assert_eq!(removed, expected.lines().count());
        assert_eq!(diff.len() - removed, actual.lines().count());
        assert!(diff[removed..].iter().all(|l| l.side == Side::Actual));
    }

    #[test]
    fn large_snapshot_with_scattered_changes_reports_only_those_rows() {
        let expected = one_column_table((0..30_000).map(|i| format!("{:05}", i)));
        let actual = one_column_table((0..30_000).map(|i| match i {
            10 => "99999".to_string(),
            29_990 => "88888".to_string(),
            _ => format!("{:05}", i),
        }));

        assert_eq!(
            rendered(&diff_lines(&expected, &actual)),
            vec!["- | 00010 |", "+ | 99999 |", "- | 29990 |", "+ | 88888 |"]
        );
    }
}
