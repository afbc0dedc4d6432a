//! Solver outcomes and the in-process CaDiCaL backend

use super::constraints::ClauseSet;
use crate::error::{QueensError, QueensResult};
use cadical::Solver;
use std::time::{Duration, Instant};
use tracing::debug;

/// A satisfying assignment as signed literals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    literals: Vec<i32>,
}

impl Model {
    pub fn new(literals: Vec<i32>) -> Self {
        Self { literals }
    }

    pub fn literals(&self) -> &[i32] {
        &self.literals
    }

    /// Variables assigned true
    pub fn true_variables(&self) -> impl Iterator<Item = i32> + '_ {
        self.literals.iter().copied().filter(|&lit| lit > 0)
    }

    /// Truth value of a variable; variables absent from the model read as false
    pub fn value(&self, variable: i32) -> bool {
        self.literals.iter().any(|&lit| lit == variable)
    }

    /// Check that every clause of `clauses` holds under this model
    pub fn satisfies(&self, clauses: &ClauseSet) -> bool {
        let mut truth = vec![false; clauses.variable_count().max(clauses.max_variable()) + 1];
        for var in self.true_variables() {
            if let Some(slot) = truth.get_mut(var as usize) {
                *slot = true;
            }
        }
        clauses
            .iter()
            .all(|clause| clause.is_satisfied_by(|var| truth.get(var as usize).copied().unwrap_or(false)))
    }
}

/// Decision returned by a solver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverOutcome {
    Satisfiable(Model),
    Unsatisfiable,
}

impl SolverOutcome {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, SolverOutcome::Satisfiable(_))
    }

    pub fn model(&self) -> Option<&Model> {
        match self {
            SolverOutcome::Satisfiable(model) => Some(model),
            SolverOutcome::Unsatisfiable => None,
        }
    }
}

/// Result of one solver invocation
#[derive(Debug, Clone)]
pub struct SolverResult {
    pub outcome: SolverOutcome,
    pub solve_time: Duration,
}

/// Statistics accumulated over solver invocations
#[derive(Debug, Clone, Default)]
pub struct SolverStatistics {
    pub invocations: usize,
    pub satisfiable: usize,
    pub unsatisfiable: usize,
    pub total_time: Duration,
}

impl SolverStatistics {
    pub(crate) fn record(&mut self, result: &SolverResult) {
        self.invocations += 1;
        self.total_time += result.solve_time;
        if result.outcome.is_satisfiable() {
            self.satisfiable += 1;
        } else {
            self.unsatisfiable += 1;
        }
    }
}

/// SAT solver wrapper for CaDiCaL; each call solves a fresh instance
#[derive(Debug, Default)]
pub struct CadicalSolver {
    statistics: SolverStatistics,
}

impl CadicalSolver {
    /// Create a new SAT solver instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Solve the clause set from scratch
    pub fn solve(&mut self, clauses: &ClauseSet) -> QueensResult<SolverResult> {
        let start_time = Instant::now();
        let mut solver: Solver = Solver::new();

        for clause in clauses {
            solver.add_clause(clause.literals.iter().copied());
        }

        let outcome = match solver.solve() {
            Some(true) => {
                let literals = (1..=clauses.variable_count() as i32)
                    .map(|var| if solver.value(var) == Some(true) { var } else { -var })
                    .collect();
                SolverOutcome::Satisfiable(Model::new(literals))
            }
            Some(false) => SolverOutcome::Unsatisfiable,
            None => {
                return Err(QueensError::SolverInvocationFailure {
                    command: "cadical".to_string(),
                    status: "interrupted before a decision".to_string(),
                    stderr: String::new(),
                })
            }
        };

        let result = SolverResult {
            outcome,
            solve_time: start_time.elapsed(),
        };
        debug!(
            clauses = clauses.len(),
            variables = clauses.variable_count(),
            satisfiable = result.outcome.is_satisfiable(),
            "cadical finished in {:.3}s",
            result.solve_time.as_secs_f64()
        );

        self.statistics.record(&result);
        Ok(result)
    }

    pub fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAT Solver Statistics:")?;
        writeln!(f, "  Invocations: {}", self.invocations)?;
        writeln!(f, "  Satisfiable: {}", self.satisfiable)?;
        writeln!(f, "  Unsatisfiable: {}", self.unsatisfiable)?;
        writeln!(f, "  Total solve time: {:.3}s", self.total_time.as_secs_f64())?;
        Ok(())
    }
}
