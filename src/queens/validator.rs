//! Structural validation of queen placements
//!
//! Checks are computed from the coordinate set alone, independent of the encoding,
//! and every failing check is reported rather than only the first.

use crate::error::{QueensError, QueensResult, Violation};
use itertools::Itertools;
use std::collections::BTreeSet;

/// Validates queen placements on an n×n board
#[derive(Debug, Clone, Copy)]
pub struct SolutionValidator {
    size: usize,
}

/// Outcome of the four structural checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub size: usize,
    pub rows_covered: bool,
    pub columns_covered: bool,
    pub diagonals_safe: bool,
    pub cardinality_ok: bool,
    pub violations: Vec<Violation>,
}

impl SolutionValidator {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    /// Run every check; the report is identical for any ordering of `placements`
    pub fn validate(&self, placements: &[(usize, usize)]) -> ValidationReport {
        let n = self.size;
        let mut sorted = placements.to_vec();
        sorted.sort_unstable();

        let mut violations = Vec::new();

        let rows: BTreeSet<usize> = sorted.iter().map(|&(row, _)| row).collect();
        let missing_rows: Vec<usize> = (0..n).filter(|row| !rows.contains(row)).collect();
        violations.extend(missing_rows.iter().map(|&row| Violation::MissingRow(row)));

        let columns: BTreeSet<usize> = sorted.iter().map(|&(_, col)| col).collect();
        let missing_columns: Vec<usize> = (0..n).filter(|col| !columns.contains(col)).collect();
        violations.extend(missing_columns.iter().map(|&col| Violation::MissingColumn(col)));

        let diagonal_conflicts: Vec<Violation> = sorted
            .iter()
            .tuple_combinations()
            .filter(|(a, b)| a != b && Self::share_diagonal(**a, **b))
            .map(|(&first, &second)| Violation::SharedDiagonal { first, second })
            .collect();
        let diagonals_safe = diagonal_conflicts.is_empty();
        violations.extend(diagonal_conflicts);

        let cardinality_ok = sorted.len() == n;
        if !cardinality_ok {
            violations.push(Violation::Cardinality {
                expected: n,
                actual: sorted.len(),
            });
        }

        ValidationReport {
            size: n,
            rows_covered: missing_rows.is_empty(),
            columns_covered: missing_columns.is_empty(),
            diagonals_safe,
            cardinality_ok,
            violations,
        }
    }

    /// Two distinct squares on a common diagonal: |r1-r2| == |c1-c2| ≠ 0
    pub fn share_diagonal(a: (usize, usize), b: (usize, usize)) -> bool {
        let dr = a.0.abs_diff(b.0);
        let dc = a.1.abs_diff(b.1);
        dr != 0 && dr == dc
    }
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Convert into `Err(ValidationFailure)` when any check failed
    pub fn into_result(self) -> QueensResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(QueensError::ValidationFailure(self.violations))
        }
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mark = |ok: bool| if ok { "ok" } else { "FAILED" };

        writeln!(f, "Validation Result: {}", if self.is_valid() { "VALID" } else { "INVALID" })?;
        writeln!(f, "  One queen per row: {}", mark(self.rows_covered))?;
        writeln!(f, "  One queen per column: {}", mark(self.columns_covered))?;
        writeln!(f, "  Diagonals safe: {}", mark(self.diagonals_safe))?;
        writeln!(f, "  Queen count ({}): {}", self.size, mark(self.cardinality_ok))?;
        for violation in &self.violations {
            writeln!(f, "    - {}", violation)?;
        }
        Ok(())
    }
}
