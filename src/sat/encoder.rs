//! SAT encoder for the N-Queens problem

use super::constraints::{Clause, ClauseSet, ConstraintGenerator, ConstraintStatistics};
use super::dimacs::write_dimacs;
use super::symmetry::{blocking_clause, SymmetryBreaker};
use super::VariableIndexer;
use crate::error::QueensResult;
use std::io::Write;
use tracing::{debug, info};

/// A fully built CNF instance for one board size
#[derive(Debug, Clone)]
pub struct Encoding {
    indexer: VariableIndexer,
    clauses: ClauseSet,
    statistics: EncodingStatistics,
}

impl Encoding {
    pub fn indexer(&self) -> &VariableIndexer {
        &self.indexer
    }

    pub fn clauses(&self) -> &ClauseSet {
        &self.clauses
    }

    pub fn board_size(&self) -> usize {
        self.indexer.board_size()
    }

    pub fn statistics(&self) -> &EncodingStatistics {
        &self.statistics
    }

    /// Clause forbidding the given placement, over primary variables only
    pub fn blocking_clause(&self, placements: &[(usize, usize)]) -> Clause {
        blocking_clause(&self.indexer, placements)
    }

    /// Comment lines identifying this instance in DIMACS output
    pub fn dimacs_comments(&self) -> Vec<String> {
        let n = self.board_size();
        let mut comments = vec![format!("DIMACS for {} queens", n)];
        if self.statistics.symmetry_breaking_length > 0 {
            comments.push(format!(
                "vertical symmetry breaking over {} bits",
                self.statistics.symmetry_breaking_length
            ));
        }
        comments.push(String::new());
        comments
    }

    /// Write this encoding in DIMACS format
    pub fn write_dimacs<W: Write>(&self, writer: &mut W) -> QueensResult<()> {
        write_dimacs(&self.clauses, &self.dimacs_comments(), writer)
    }
}

/// Builds [`Encoding`]s for a board size and symmetry-breaking length
#[derive(Debug, Clone)]
pub struct SatEncoder {
    board_size: usize,
    symmetry_breaking_length: usize,
}

impl SatEncoder {
    /// Create an encoder; a `symmetry_breaking_length` of zero disables symmetry breaking
    pub fn new(board_size: usize, symmetry_breaking_length: usize) -> Self {
        Self {
            board_size,
            symmetry_breaking_length,
        }
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    pub fn symmetry_breaking_length(&self) -> usize {
        self.symmetry_breaking_length
    }

    /// Build the placement constraints plus any symmetry-breaking clauses
    pub fn encode(&self) -> QueensResult<Encoding> {
        let n = self.board_size;
        let indexer = VariableIndexer::new(n, self.symmetry_breaking_length)?;
        let generator = ConstraintGenerator::new(indexer.clone());

        let mut clauses = generator.generate_all_constraints()?;
        let placement_stats = generator.statistics();

        let breaker = SymmetryBreaker::new(&indexer, self.symmetry_breaking_length)?;
        let symmetry_clauses = breaker.generate();
        debug!(clauses = symmetry_clauses.len(), bits = breaker.length(), "symmetry-breaking clauses generated");
        let symmetry_clause_count = symmetry_clauses.len();
        clauses.extend(symmetry_clauses);

        let clause_set = ClauseSet::new(indexer.variable_count(), clauses);
        info!(
            n,
            variables = clause_set.variable_count(),
            clauses = clause_set.len(),
            "encoded {}-queens instance",
            n
        );

        let statistics = EncodingStatistics {
            board_size: n,
            cell_variables: indexer.primary_count(),
            helper_variables: indexer.helper_count(),
            placement: placement_stats,
            symmetry_clauses: symmetry_clause_count,
            symmetry_breaking_length: self.symmetry_breaking_length,
        };

        Ok(Encoding {
            indexer,
            clauses: clause_set,
            statistics,
        })
    }

    /// Rough size and difficulty estimate without building clauses
    pub fn estimate_complexity(&self) -> ComplexityEstimate {
        let n = self.board_size;
        let estimated_variables = n * n + self.symmetry_breaking_length;
        let estimated_clauses = super::constraints::expected_clause_count(n)
            .unwrap_or(usize::MAX)
            .saturating_add(5 * self.symmetry_breaking_length);

        let complexity_level = if estimated_clauses < 10_000 {
            ComplexityLevel::Low
        } else if estimated_clauses < 1_000_000 {
            ComplexityLevel::Medium
        } else if estimated_clauses < 100_000_000 {
            ComplexityLevel::High
        } else {
            ComplexityLevel::VeryHigh
        };

        ComplexityEstimate {
            complexity_level,
            estimated_variables,
            estimated_clauses,
            board_size: n,
        }
    }
}

/// Statistics about the SAT encoding
#[derive(Debug, Clone)]
pub struct EncodingStatistics {
    pub board_size: usize,
    pub cell_variables: usize,
    pub helper_variables: usize,
    pub placement: ConstraintStatistics,
    pub symmetry_clauses: usize,
    pub symmetry_breaking_length: usize,
}

impl EncodingStatistics {
    pub fn total_variables(&self) -> usize {
        self.cell_variables + self.helper_variables
    }

    pub fn total_clauses(&self) -> usize {
        self.placement.total() + self.symmetry_clauses
    }
}

/// Complexity estimate for the problem
#[derive(Debug, Clone)]
pub struct ComplexityEstimate {
    pub complexity_level: ComplexityLevel,
    pub estimated_variables: usize,
    pub estimated_clauses: usize,
    pub board_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComplexityLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl std::fmt::Display for EncodingStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAT Encoding Statistics:")?;
        writeln!(f, "  Board: {}x{}", self.board_size, self.board_size)?;
        writeln!(f, "  Total variables: {}", self.total_variables())?;
        writeln!(f, "    Cell variables: {}", self.cell_variables)?;
        writeln!(f, "    Helper variables: {}", self.helper_variables)?;
        writeln!(f, "  Total clauses: {}", self.total_clauses())?;
        writeln!(f, "    Row clauses: {}", self.placement.row_clauses)?;
        writeln!(f, "    Column clauses: {}", self.placement.column_clauses)?;
        writeln!(f, "    Diagonal clauses: {}", self.placement.diagonal_clauses)?;
        writeln!(f, "    Symmetry-breaking clauses: {}", self.symmetry_clauses)?;
        Ok(())
    }
}

impl std::fmt::Display for ComplexityEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Problem Complexity Estimate:")?;
        writeln!(f, "  Complexity level: {:?}", self.complexity_level)?;
        writeln!(f, "  Estimated variables: {}", self.estimated_variables)?;
        writeln!(f, "  Estimated clauses: {}", self.estimated_clauses)?;

        let recommendation = match self.complexity_level {
            ComplexityLevel::Low => "Should solve quickly",
            ComplexityLevel::Medium => "Single solutions are quick, full enumeration may take a while",
            ComplexityLevel::High => "Encoding alone is large, expect long DIMACS transfers",
            ComplexityLevel::VeryHigh => "Pairwise encoding is impractical at this size",
        };
        writeln!(f, "  Recommendation: {}", recommendation)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_counts_without_symmetry() {
        let encoding = SatEncoder::new(8, 0).encode().unwrap();
        assert_eq!(encoding.clauses().variable_count(), 64);
        assert_eq!(encoding.clauses().len(), 744);
        assert_eq!(encoding.statistics().total_clauses(), 744);
        assert_eq!(encoding.statistics().helper_variables, 0);
    }

    #[test]
    fn test_encoding_counts_with_symmetry() {
        let encoding = SatEncoder::new(8, 8).encode().unwrap();
        assert_eq!(encoding.clauses().variable_count(), 72);
        assert_eq!(encoding.clauses().len(), 744 + 40);
        assert_eq!(encoding.statistics().symmetry_clauses, 40);
        assert_eq!(encoding.clauses().max_variable(), 72);
    }

    #[test]
    fn test_degenerate_sizes() {
        let empty = SatEncoder::new(0, 0).encode().unwrap();
        assert_eq!(empty.clauses().variable_count(), 0);
        assert!(empty.clauses().is_empty());

        let single = SatEncoder::new(1, 0).encode().unwrap();
        assert_eq!(single.clauses().variable_count(), 1);
        assert!(single.clauses().iter().all(|c| c.literals == vec![1]));
    }

    #[test]
    fn test_symmetry_length_validated() {
        assert!(SatEncoder::new(2, 5).encode().is_err());
        assert!(SatEncoder::new(2, 4).encode().is_ok());
    }

    #[test]
    fn test_dimacs_output() {
        let encoding = SatEncoder::new(4, 4).encode().unwrap();
        let mut buffer = Vec::new();
        encoding.write_dimacs(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("c DIMACS for 4 queens\n"));
        assert!(text.contains("p cnf 20 104\n"));
    }

    #[test]
    fn test_complexity_estimation() {
        let estimate = SatEncoder::new(8, 0).estimate_complexity();
        assert_eq!(estimate.estimated_variables, 64);
        assert_eq!(estimate.estimated_clauses, 744);
        assert_eq!(estimate.complexity_level, ComplexityLevel::Low);

        let large = SatEncoder::new(200, 0).estimate_complexity();
        assert_eq!(large.complexity_level, ComplexityLevel::High);
    }
}
