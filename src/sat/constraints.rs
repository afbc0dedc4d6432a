//! Constraint generation for the N-Queens SAT encoding

use super::VariableIndexer;
use crate::error::{QueensError, QueensResult};
use itertools::Itertools;
use rayon::prelude::*;
use tracing::debug;

/// Represents a SAT clause (disjunction of literals)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub literals: Vec<i32>, // Positive for variable, negative for negation
}

impl Clause {
    /// Create a new clause from literals
    pub fn new(literals: Vec<i32>) -> Self {
        Self { literals }
    }

    /// Create a unit clause (single literal)
    pub fn unit(literal: i32) -> Self {
        Self { literals: vec![literal] }
    }

    /// Create a binary clause (two literals)
    pub fn binary(lit1: i32, lit2: i32) -> Self {
        Self { literals: vec![lit1, lit2] }
    }

    /// Check if clause is empty (unsatisfiable)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Largest variable id mentioned by this clause
    pub fn max_variable(&self) -> usize {
        self.literals
            .iter()
            .map(|lit| lit.unsigned_abs() as usize)
            .max()
            .unwrap_or(0)
    }

    /// Whether the clause holds under a set of true variables
    pub fn is_satisfied_by(&self, is_true: impl Fn(i32) -> bool) -> bool {
        self.literals
            .iter()
            .any(|&lit| if lit > 0 { is_true(lit) } else { !is_true(-lit) })
    }
}

/// An ordered clause sequence together with its declared variable count
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClauseSet {
    variable_count: usize,
    clauses: Vec<Clause>,
}

impl ClauseSet {
    pub fn new(variable_count: usize, clauses: Vec<Clause>) -> Self {
        Self {
            variable_count,
            clauses,
        }
    }

    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Clause> {
        self.clauses.iter()
    }

    /// Largest variable id used by any clause
    pub fn max_variable(&self) -> usize {
        self.clauses.iter().map(Clause::max_variable).max().unwrap_or(0)
    }

    /// Return this set grown by one clause
    pub fn with_clause(mut self, clause: Clause) -> Self {
        self.variable_count = self.variable_count.max(clause.max_variable());
        self.clauses.push(clause);
        self
    }
}

impl<'a> IntoIterator for &'a ClauseSet {
    type Item = &'a Clause;
    type IntoIter = std::slice::Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}

/// Closed-form number of clauses produced by [`ConstraintGenerator::generate_all_constraints`]
///
/// Rows and columns each contribute `n` at-least-one clauses and `n·C(n,2)` pairwise
/// exclusions; the two diagonal directions together contribute `n(n-1)(2n-1)/3` pairs.
pub fn expected_clause_count(n: usize) -> QueensResult<usize> {
    let overflow = || QueensError::EncodingOverflow { n, what: "clause count" };
    if n == 0 {
        return Ok(0);
    }

    let pairs_per_line = n.checked_mul(n - 1).ok_or_else(overflow)? / 2;
    let exclusions = n.checked_mul(pairs_per_line).ok_or_else(overflow)?;
    let per_family = n.checked_add(exclusions).ok_or_else(overflow)?;

    let diagonals = n
        .checked_mul(n - 1)
        .and_then(|v| v.checked_mul(2 * n - 1))
        .ok_or_else(overflow)?
        / 3;

    per_family
        .checked_mul(2)
        .and_then(|v| v.checked_add(diagonals))
        .ok_or_else(overflow)
}

/// Generates the row, column and diagonal constraints for an n×n board
pub struct ConstraintGenerator {
    indexer: VariableIndexer,
}

impl ConstraintGenerator {
    /// Create a new constraint generator
    pub fn new(indexer: VariableIndexer) -> Self {
        Self { indexer }
    }

    /// Generate all placement constraints: rows, then columns, then diagonals
    pub fn generate_all_constraints(&self) -> QueensResult<Vec<Clause>> {
        let n = self.indexer.board_size();
        let expected = expected_clause_count(n)?;
        let mut clauses = Vec::with_capacity(expected);

        clauses.extend(self.generate_row_constraints());
        debug!(clauses = clauses.len(), "row constraints generated");

        clauses.extend(self.generate_column_constraints());
        debug!(clauses = clauses.len(), "column constraints generated");

        clauses.extend(self.generate_diagonal_constraints());
        debug!(clauses = clauses.len(), "diagonal constraints generated");

        if clauses.len() != expected {
            return Err(QueensError::SerializationMismatch {
                what: "placement clauses",
                declared: expected,
                actual: clauses.len(),
            });
        }

        Ok(clauses)
    }

    /// Exactly one queen per row
    pub fn generate_row_constraints(&self) -> Vec<Clause> {
        let n = self.indexer.board_size();
        (0..n)
            .flat_map(|row| self.exactly_one((0..n).map(|col| self.indexer.cell(row, col)).collect()))
            .collect()
    }

    /// Exactly one queen per column
    pub fn generate_column_constraints(&self) -> Vec<Clause> {
        let n = self.indexer.board_size();
        (0..n)
            .flat_map(|col| self.exactly_one((0..n).map(|row| self.indexer.cell(row, col)).collect()))
            .collect()
    }

    /// At most one queen per diagonal, one binary clause per attacking pair
    pub fn generate_diagonal_constraints(&self) -> Vec<Clause> {
        let n = self.indexer.board_size();
        let per_row: Vec<Vec<Clause>> = (0..n)
            .into_par_iter()
            .map(|row| {
                let mut clauses = Vec::new();
                for col in 0..n {
                    let here = self.indexer.cell(row, col);
                    // down-right (row+, col+)
                    for offset in 1..n - row.max(col) {
                        clauses.push(Clause::binary(-here, -self.indexer.cell(row + offset, col + offset)));
                    }
                    // down-left (row+, col-)
                    for offset in 1..=(n - 1 - row).min(col) {
                        clauses.push(Clause::binary(-here, -self.indexer.cell(row + offset, col - offset)));
                    }
                }
                clauses
            })
            .collect();

        per_row.into_iter().flatten().collect()
    }

    /// One at-least-one clause followed by pairwise exclusions
    fn exactly_one(&self, line: Vec<i32>) -> Vec<Clause> {
        let mut clauses = Vec::with_capacity(1 + line.len() * line.len().saturating_sub(1) / 2);
        clauses.push(Clause::new(line.clone()));
        clauses.extend(
            line.iter()
                .tuple_combinations()
                .map(|(&a, &b)| Clause::binary(-a, -b)),
        );
        clauses
    }

    /// Get statistics about the generated constraint families
    pub fn statistics(&self) -> ConstraintStatistics {
        let n = self.indexer.board_size();
        let line_exclusions = n * (n * n.saturating_sub(1) / 2);
        ConstraintStatistics {
            board_size: n,
            row_clauses: n + line_exclusions,
            column_clauses: n + line_exclusions,
            diagonal_clauses: n * n.saturating_sub(1) * (2 * n).saturating_sub(1) / 3,
        }
    }
}

/// Clause counts per constraint family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintStatistics {
    pub board_size: usize,
    pub row_clauses: usize,
    pub column_clauses: usize,
    pub diagonal_clauses: usize,
}

impl ConstraintStatistics {
    pub fn total(&self) -> usize {
        self.row_clauses + self.column_clauses + self.diagonal_clauses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(n: usize) -> ConstraintGenerator {
        ConstraintGenerator::new(VariableIndexer::new(n, 0).unwrap())
    }

    /// Count diagonal pairs by brute force over all cell pairs
    fn brute_force_diagonal_pairs(n: usize) -> usize {
        let cells: Vec<(usize, usize)> = (0..n).flat_map(|r| (0..n).map(move |c| (r, c))).collect();
        cells
            .iter()
            .tuple_combinations()
            .filter(|((r1, c1), (r2, c2))| r1.abs_diff(*r2) == c1.abs_diff(*c2))
            .count()
    }

    #[test]
    fn test_clause_constructors() {
        assert_eq!(Clause::unit(3).literals, vec![3]);
        assert_eq!(Clause::binary(-1, -2).literals, vec![-1, -2]);
        assert!(Clause::new(vec![]).is_empty());
        assert_eq!(Clause::new(vec![1, -7, 3]).max_variable(), 7);
    }

    #[test]
    fn test_clause_count_matches_closed_form() {
        for n in 0..=12 {
            let clauses = generator(n).generate_all_constraints().unwrap();
            assert_eq!(clauses.len(), expected_clause_count(n).unwrap(), "n = {}", n);
            assert_eq!(generator(n).statistics().total(), clauses.len());
        }
    }

    #[test]
    fn test_known_clause_counts() {
        assert_eq!(expected_clause_count(0).unwrap(), 0);
        assert_eq!(expected_clause_count(1).unwrap(), 2);
        assert_eq!(expected_clause_count(2).unwrap(), 10);
        assert_eq!(expected_clause_count(4).unwrap(), 84);
        assert_eq!(expected_clause_count(8).unwrap(), 744);
    }

    #[test]
    fn test_diagonal_pairs_emitted_once() {
        for n in 1..=9 {
            let diagonals = generator(n).generate_diagonal_constraints();
            assert_eq!(diagonals.len(), brute_force_diagonal_pairs(n), "n = {}", n);

            let mut normalized: Vec<(i32, i32)> = diagonals
                .iter()
                .map(|c| {
                    let (a, b) = (c.literals[0], c.literals[1]);
                    (a.max(b), a.min(b))
                })
                .collect();
            normalized.sort_unstable();
            normalized.dedup();
            assert_eq!(normalized.len(), diagonals.len(), "duplicate diagonal clause for n = {}", n);
        }
    }

    #[test]
    fn test_row_constraints_order() {
        let rows = generator(3).generate_row_constraints();
        assert_eq!(rows[0].literals, vec![1, 2, 3]);
        assert_eq!(rows[1].literals, vec![-1, -2]);
        assert_eq!(rows[2].literals, vec![-1, -3]);
        assert_eq!(rows[3].literals, vec![-2, -3]);
        assert_eq!(rows[4].literals, vec![4, 5, 6]);
        assert_eq!(rows.len(), 12);
    }

    #[test]
    fn test_column_constraints_order() {
        let cols = generator(3).generate_column_constraints();
        assert_eq!(cols[0].literals, vec![1, 4, 7]);
        assert_eq!(cols[1].literals, vec![-1, -4]);
        assert_eq!(cols[4].literals, vec![2, 5, 8]);
    }

    #[test]
    fn test_diagonal_constraints_order_is_deterministic() {
        let first = generator(10).generate_diagonal_constraints();
        let second = generator(10).generate_diagonal_constraints();
        assert_eq!(first, second);

        let small = generator(3).generate_diagonal_constraints();
        // (0,0) attacks (1,1) and (2,2) down-right
        assert_eq!(small[0].literals, vec![-1, -5]);
        assert_eq!(small[1].literals, vec![-1, -9]);
        // (0,1): down-right (1,2), down-left (1,0)
        assert_eq!(small[2].literals, vec![-2, -6]);
        assert_eq!(small[3].literals, vec![-2, -4]);
    }

    #[test]
    fn test_single_cell_board() {
        let clauses = generator(1).generate_all_constraints().unwrap();
        assert_eq!(clauses, vec![Clause::unit(1), Clause::unit(1)]);
    }

    #[test]
    fn test_clause_set_growth() {
        let set = ClauseSet::new(4, vec![Clause::binary(1, 2)]);
        let grown = set.clone().with_clause(Clause::unit(-6));
        assert_eq!(set.len(), 1);
        assert_eq!(grown.len(), 2);
        assert_eq!(grown.variable_count(), 6);
        assert_eq!(grown.max_variable(), 6);
    }

    #[test]
    fn test_clause_satisfaction() {
        let clause = Clause::new(vec![1, -2]);
        assert!(clause.is_satisfied_by(|v| v == 1));
        assert!(clause.is_satisfied_by(|_| false));
        assert!(!clause.is_satisfied_by(|v| v == 2));
    }

    #[test]
    fn test_clause_count_overflow() {
        assert!(matches!(
            expected_clause_count(usize::MAX / 2),
            Err(QueensError::EncodingOverflow { .. })
        ));
    }
}
