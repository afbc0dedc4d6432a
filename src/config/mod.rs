//! Configuration management for the N-Queens SAT solver

pub mod settings;

pub use settings::{
    Settings, BoardConfig, SolverConfig, EncodingConfig, OutputConfig, ExternalSolverConfig,
    OutputFormat, CliOverrides, SolverBackend
};
