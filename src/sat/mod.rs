//! SAT encoding, DIMACS transport and solver backends for N-Queens

pub mod variables;
pub mod constraints;
pub mod symmetry;
pub mod dimacs;
pub mod encoder;
pub mod solver;
pub mod external_solver;
pub mod solver_factory;

pub use variables::{Variable, VariableIndexer};
pub use constraints::{Clause, ClauseSet, ConstraintGenerator};
pub use symmetry::SymmetryBreaker;
pub use encoder::{Encoding, SatEncoder};
pub use solver::{Model, SolverOutcome, SolverResult};
pub use solver_factory::UnifiedSatSolver;
