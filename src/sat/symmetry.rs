//! Symmetry-breaking and blocking clauses
//!
//! The vertical mirror maps cell (row, col) to (n-1-row, col). A lex-leader predicate over
//! the first `length` primary variables keeps only the lexicographically smaller member of
//! each mirror pair. Each bit `b` gets a helper `h(b) ⇔ (b ⇔ sym(b))`, and the chain clause
//! for bit `k` reads "if every earlier helper holds, then `k` implies `sym(k)`".

use super::constraints::Clause;
use super::VariableIndexer;
use crate::error::{QueensError, QueensResult};

/// Builds vertical-mirror symmetry-breaking clauses over a prefix of the primary variables
pub struct SymmetryBreaker<'a> {
    indexer: &'a VariableIndexer,
    length: usize,
}

impl<'a> SymmetryBreaker<'a> {
    /// Create a breaker covering `length` primary bits; `length` must not exceed n²
    /// and the indexer must reserve at least that many helper variables.
    pub fn new(indexer: &'a VariableIndexer, length: usize) -> QueensResult<Self> {
        let max = indexer.primary_count().min(indexer.helper_count());
        if length > max {
            return Err(QueensError::SymmetryLengthOutOfRange { length, max });
        }
        Ok(Self { indexer, length })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of clauses [`generate`](Self::generate) will produce
    pub fn clause_count(&self) -> usize {
        5 * self.length
    }

    /// Helper definitions for every bit, followed by the lex-leader chain
    pub fn generate(&self) -> Vec<Clause> {
        let mut clauses = Vec::with_capacity(self.clause_count());

        for bit in 1..=self.length {
            let b = bit as i32;
            let sym = self.indexer.mirror(b);
            let helper = self.indexer.helper(bit);

            // b ∧ sym(b) → h
            clauses.push(Clause::new(vec![-b, -sym, helper]));
            // ¬b ∧ ¬sym(b) → h
            clauses.push(Clause::new(vec![b, sym, helper]));
            // h ∧ b → sym(b)
            clauses.push(Clause::new(vec![-helper, -b, sym]));
            // h ∧ sym(b) → b
            clauses.push(Clause::new(vec![-helper, -sym, b]));
        }

        for bit in 1..=self.length {
            let b = bit as i32;
            let mut literals: Vec<i32> = (1..bit).map(|prior| -self.indexer.helper(prior)).collect();
            literals.push(-b);
            literals.push(self.indexer.mirror(b));
            clauses.push(Clause::new(literals));
        }

        clauses
    }
}

/// Clause forbidding exactly the given placement on the next solve
///
/// Mentions every primary variable: negated where a queen sits, positive elsewhere.
/// Helper variables are never included.
pub fn blocking_clause(indexer: &VariableIndexer, placements: &[(usize, usize)]) -> Clause {
    let n = indexer.board_size();
    let mut occupied = vec![false; indexer.primary_count()];
    for &(row, col) in placements {
        if row < n && col < n {
            occupied[row * n + col] = true;
        }
    }

    Clause::new(
        indexer
            .primary_variables()
            .map(|id| if occupied[(id - 1) as usize] { -id } else { id })
            .collect(),
    )
}
