//! Error taxonomy for the encoding, solving and decoding pipeline

use thiserror::Error;

/// Result alias for the core pipeline
pub type QueensResult<T> = std::result::Result<T, QueensError>;

/// A single broken constraint found while validating a placement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// No queen in this row
    MissingRow(usize),
    /// No queen in this column
    MissingColumn(usize),
    /// Two queens share a diagonal
    SharedDiagonal {
        first: (usize, usize),
        second: (usize, usize),
    },
    /// Wrong number of queens on the board
    Cardinality { expected: usize, actual: usize },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::MissingRow(row) => write!(f, "row {} has no queen", row),
            Violation::MissingColumn(col) => write!(f, "column {} has no queen", col),
            Violation::SharedDiagonal { first, second } => write!(
                f,
                "queens at ({}, {}) and ({}, {}) share a diagonal",
                first.0, first.1, second.0, second.1
            ),
            Violation::Cardinality { expected, actual } => {
                write!(f, "expected {} queens, found {}", expected, actual)
            }
        }
    }
}

/// Errors raised by the N-Queens SAT pipeline
#[derive(Debug, Error)]
pub enum QueensError {
    /// Variable or clause counts do not fit the DIMACS integer range
    #[error("encoding overflow for n = {n}: {what} exceeds the representable range")]
    EncodingOverflow { n: usize, what: &'static str },

    /// Symmetry-breaking prefix longer than the number of primary variables
    #[error("symmetry-breaking length {length} out of range (at most {max})")]
    SymmetryLengthOutOfRange { length: usize, max: usize },

    /// Declared DIMACS counts disagree with the content
    #[error("DIMACS mismatch: declared {declared} {what}, found {actual}")]
    SerializationMismatch {
        what: &'static str,
        declared: usize,
        actual: usize,
    },

    /// The solver process could not be started or exited abnormally
    #[error("solver `{command}` failed ({status}){}", format_stderr(.stderr))]
    SolverInvocationFailure {
        command: String,
        status: String,
        stderr: String,
    },

    /// Solver output or DIMACS text could not be parsed
    #[error("cannot parse solver output at line {line}: {reason}")]
    ModelParseFailure { line: usize, reason: String },

    /// A satisfying model did not contain exactly n queens
    #[error("model decodes to {actual} queens, expected {expected}")]
    SolutionCardinalityError { expected: usize, actual: usize },

    /// One or more structural checks failed
    #[error("invalid placement: {}", format_violations(.0))]
    ValidationFailure(Vec<Violation>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
