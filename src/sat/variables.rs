//! Variable indexing for the N-Queens SAT encoding

use crate::error::{QueensError, QueensResult};

/// The kind of a SAT variable in the encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variable {
    /// Queen placed at board cell (row, col)
    Cell { row: usize, col: usize },
    /// Symmetry-breaking helper for primary bit `bit` (1-based)
    SymmetryHelper { bit: usize },
}

/// Primary variable id for cell (row, col) on an n×n board
#[inline]
pub fn variable(n: usize, row: usize, col: usize) -> i32 {
    (row * n + col + 1) as i32
}

/// Board cell for a primary variable id on an n×n board
#[inline]
pub fn locate(n: usize, id: i32) -> (usize, usize) {
    let index = (id - 1) as usize;
    (index / n, index % n)
}

/// Maps board cells and helper bits to DIMACS variable ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableIndexer {
    n: usize,
    primary_count: usize,
    helper_count: usize,
}

impl VariableIndexer {
    /// Create an indexer for an n×n board with `helper_count` auxiliary variables
    pub fn new(n: usize, helper_count: usize) -> QueensResult<Self> {
        let primary_count = n
            .checked_mul(n)
            .ok_or(QueensError::EncodingOverflow { n, what: "board cell count" })?;

        let total = primary_count
            .checked_add(helper_count)
            .ok_or(QueensError::EncodingOverflow { n, what: "variable count" })?;
        if total > i32::MAX as usize {
            return Err(QueensError::EncodingOverflow { n, what: "variable count" });
        }

        Ok(Self {
            n,
            primary_count,
            helper_count,
        })
    }

    pub fn board_size(&self) -> usize {
        self.n
    }

    /// Number of cell variables (n²)
    pub fn primary_count(&self) -> usize {
        self.primary_count
    }

    pub fn helper_count(&self) -> usize {
        self.helper_count
    }

    /// Total number of variables, primary plus helpers
    pub fn variable_count(&self) -> usize {
        self.primary_count + self.helper_count
    }

    /// Variable id for the queen at (row, col)
    pub fn cell(&self, row: usize, col: usize) -> i32 {
        debug_assert!(row < self.n && col < self.n, "cell ({}, {}) outside {}x{} board", row, col, self.n, self.n);
        variable(self.n, row, col)
    }

    /// Board cell of a primary variable id
    pub fn locate(&self, id: i32) -> Option<(usize, usize)> {
        match self.classify(id) {
            Some(Variable::Cell { row, col }) => Some((row, col)),
            _ => None,
        }
    }

    /// Variable id of the helper attached to primary bit `bit` (1-based)
    pub fn helper(&self, bit: usize) -> i32 {
        debug_assert!(bit >= 1 && bit <= self.helper_count, "helper bit {} out of range", bit);
        (self.primary_count + bit) as i32
    }

    /// Variable id of the vertically mirrored cell (row ↔ n-1-row)
    pub fn mirror(&self, id: i32) -> i32 {
        let (row, col) = locate(self.n, id);
        self.cell(self.n - 1 - row, col)
    }

    /// Resolve a variable id (sign ignored) to its kind
    pub fn classify(&self, literal: i32) -> Option<Variable> {
        let id = literal.unsigned_abs() as usize;
        if id == 0 {
            None
        } else if id <= self.primary_count {
            let (row, col) = locate(self.n, id as i32);
            Some(Variable::Cell { row, col })
        } else if id <= self.primary_count + self.helper_count {
            Some(Variable::SymmetryHelper { bit: id - self.primary_count })
        } else {
            None
        }
    }

    /// All primary variable ids in row-major order
    pub fn primary_variables(&self) -> impl Iterator<Item = i32> {
        1..=self.primary_count as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_and_locate_are_inverses() {
        for n in 1..=9 {
            let indexer = VariableIndexer::new(n, 0).unwrap();
            for row in 0..n {
                for col in 0..n {
                    let id = indexer.cell(row, col);
                    assert_eq!(id, (row * n + col + 1) as i32);
                    assert_eq!(locate(n, id), (row, col));
                }
            }
            for id in 1..=(n * n) as i32 {
                let (row, col) = locate(n, id);
                assert_eq!(variable(n, row, col), id);
            }
        }
    }

    #[test]
    fn test_known_ids() {
        // var 12 on a 4x4 board is (2, 3)
        assert_eq!(locate(4, 12), (2, 3));
        assert_eq!(variable(4, 0, 0), 1);
        assert_eq!(variable(4, 3, 3), 16);
    }

    #[test]
    fn test_helpers_follow_primary_range() {
        let indexer = VariableIndexer::new(4, 4).unwrap();
        assert_eq!(indexer.helper(1), 17);
        assert_eq!(indexer.helper(4), 20);
        assert_eq!(indexer.variable_count(), 20);
    }

    #[test]
    fn test_classify_tags_kinds() {
        let indexer = VariableIndexer::new(3, 3).unwrap();

        assert_eq!(indexer.classify(5), Some(Variable::Cell { row: 1, col: 1 }));
        assert_eq!(indexer.classify(-9), Some(Variable::Cell { row: 2, col: 2 }));
        assert_eq!(indexer.classify(10), Some(Variable::SymmetryHelper { bit: 1 }));
        assert_eq!(indexer.classify(12), Some(Variable::SymmetryHelper { bit: 3 }));
        assert_eq!(indexer.classify(13), None);
        assert_eq!(indexer.classify(0), None);

        assert_eq!(indexer.locate(10), None);
        assert_eq!(indexer.locate(4), Some((1, 0)));
    }

    #[test]
    fn test_mirror() {
        let indexer = VariableIndexer::new(4, 0).unwrap();
        // (0, 0) <-> (3, 0)
        assert_eq!(indexer.mirror(1), 13);
        assert_eq!(indexer.mirror(13), 1);
        // (1, 2) <-> (2, 2)
        assert_eq!(indexer.mirror(7), 11);
    }

    #[test]
    fn test_empty_board() {
        let indexer = VariableIndexer::new(0, 0).unwrap();
        assert_eq!(indexer.variable_count(), 0);
        assert_eq!(indexer.primary_variables().count(), 0);
    }

    #[test]
    fn test_overflow_detected() {
        assert!(matches!(
            VariableIndexer::new(50_000, 0),
            Err(QueensError::EncodingOverflow { .. })
        ));
        assert!(matches!(
            VariableIndexer::new(usize::MAX, 0),
            Err(QueensError::EncodingOverflow { .. })
        ));
    }
}
