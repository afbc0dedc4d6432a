//! N-Queens problem definition, solution decoding and validation

pub mod problem;
pub mod solution;
pub mod validator;

pub use problem::QueensProblem;
pub use solution::Solution;
pub use validator::{SolutionValidator, ValidationReport};
