//! Factory for creating SAT solver instances based on configuration

use super::constraints::ClauseSet;
use super::external_solver::ExternalSolver;
use super::solver::{CadicalSolver, SolverResult, SolverStatistics};
use crate::config::{SolverBackend, SolverConfig};
use crate::error::QueensResult;

/// Unified SAT solver interface that can use different backends
pub enum UnifiedSatSolver {
    Cadical(CadicalSolver),
    External(ExternalSolver),
}

impl UnifiedSatSolver {
    /// Create a new solver instance based on the configured backend
    pub fn new(config: &SolverConfig) -> Self {
        match config.backend {
            SolverBackend::Cadical => UnifiedSatSolver::Cadical(CadicalSolver::new()),
            SolverBackend::External => UnifiedSatSolver::External(ExternalSolver::from_config(&config.external)),
        }
    }

    /// Solve the clause set from scratch
    pub fn solve(&mut self, clauses: &ClauseSet) -> QueensResult<SolverResult> {
        match self {
            UnifiedSatSolver::Cadical(solver) => solver.solve(clauses),
            UnifiedSatSolver::External(solver) => solver.solve(clauses),
        }
    }

    /// Get solver statistics
    pub fn statistics(&self) -> &SolverStatistics {
        match self {
            UnifiedSatSolver::Cadical(solver) => solver.statistics(),
            UnifiedSatSolver::External(solver) => solver.statistics(),
        }
    }

    /// Get the backend type being used
    pub fn backend(&self) -> SolverBackend {
        match self {
            UnifiedSatSolver::Cadical(_) => SolverBackend::Cadical,
            UnifiedSatSolver::External(_) => SolverBackend::External,
        }
    }
}

impl Default for UnifiedSatSolver {
    fn default() -> Self {
        UnifiedSatSolver::Cadical(CadicalSolver::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::sat::constraints::Clause;

    #[test]
    fn test_cadical_solver_creation() {
        let solver = UnifiedSatSolver::new(&Settings::default().solver);
        assert_eq!(solver.backend(), SolverBackend::Cadical);
        assert_eq!(solver.statistics().invocations, 0);
    }

    #[test]
    fn test_external_solver_creation() {
        let mut config = Settings::default().solver;
        config.backend = SolverBackend::External;
        let solver = UnifiedSatSolver::new(&config);
        assert_eq!(solver.backend(), SolverBackend::External);
    }

    #[test]
    fn test_simple_satisfiable_cadical() {
        let mut solver = UnifiedSatSolver::default();
        let result = solver.solve(&ClauseSet::new(1, vec![Clause::unit(1)])).unwrap();
        assert!(result.outcome.model().unwrap().value(1));
    }

    #[test]
    fn test_unsatisfiable_cadical() {
        let mut solver = UnifiedSatSolver::default();
        let clauses = ClauseSet::new(1, vec![Clause::unit(1), Clause::unit(-1)]);
        assert!(!solver.solve(&clauses).unwrap().outcome.is_satisfiable());
        assert_eq!(solver.statistics().unsatisfiable, 1);
    }
}
