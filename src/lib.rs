//! N-Queens SAT Solver
//!
//! This library encodes the N-Queens puzzle as a CNF formula, hands it to a SAT solver
//! (CaDiCaL in-process or any DIMACS solver as a subprocess), and decodes, validates and
//! enumerates the resulting placements.

pub mod board;
pub mod config;
pub mod error;
pub mod queens;
pub mod sat;
pub mod utils;

pub use config::Settings;
pub use error::{QueensError, QueensResult};
pub use queens::{QueensProblem, Solution};

use anyhow::Result;

/// Main entry point: solve the configured N-Queens instance
pub fn solve_queens(settings: Settings) -> Result<Vec<Solution>> {
    settings.validate()?;
    let mut problem = QueensProblem::new(settings)?;
    problem.run()
}
