//! External DIMACS solver invoked as a subprocess

use super::constraints::ClauseSet;
use super::dimacs::{parse_solver_output, write_dimacs};
use super::solver::{SolverResult, SolverStatistics};
use crate::config::ExternalSolverConfig;
use crate::error::{QueensError, QueensResult};
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::process::{Command, Stdio};
use std::time::Instant;
use tracing::{debug, warn};

/// Exit statuses accepted from a solver: plain success and the SAT competition 10/20 codes
const ACCEPTED_EXIT_CODES: [i32; 3] = [0, 10, 20];

/// Runs `<command> <args...> <cnf-file>` and reads the model from its standard output
#[derive(Debug, Clone)]
pub struct ExternalSolver {
    command: String,
    args: Vec<String>,
    statistics: SolverStatistics,
}

impl ExternalSolver {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            statistics: SolverStatistics::default(),
        }
    }

    pub fn from_config(config: &ExternalSolverConfig) -> Self {
        Self::new(config.command.clone(), config.args.clone())
    }

    /// Write the clause set to a temporary CNF file and run the solver on it
    ///
    /// Both the CNF file and the captured output file are removed when this returns,
    /// whether or not the solver succeeded.
    pub fn solve(&mut self, clauses: &ClauseSet) -> QueensResult<SolverResult> {
        let start_time = Instant::now();

        let mut cnf_file = tempfile::Builder::new()
            .prefix("nqueens-")
            .suffix(".cnf")
            .tempfile()?;
        {
            let mut writer = BufWriter::new(cnf_file.as_file_mut());
            let comments = vec![format!("{} variables, {} clauses", clauses.variable_count(), clauses.len())];
            write_dimacs(clauses, &comments, &mut writer)?;
            writer.flush()?;
        }

        let mut result_file = tempfile::tempfile()?;
        debug!(command = %self.command, cnf = %cnf_file.path().display(), "invoking external solver");

        let output = Command::new(&self.command)
            .args(&self.args)
            .arg(cnf_file.path())
            .stdin(Stdio::null())
            .stdout(Stdio::from(result_file.try_clone()?))
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| QueensError::SolverInvocationFailure {
                command: self.command_line(),
                status: format!("could not start: {}", e),
                stderr: String::new(),
            })?;

        let accepted = output
            .status
            .code()
            .map(|code| ACCEPTED_EXIT_CODES.contains(&code))
            .unwrap_or(false);
        if !accepted {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            warn!(command = %self.command, status = %output.status, "external solver failed");
            return Err(QueensError::SolverInvocationFailure {
                command: self.command_line(),
                status: output.status.to_string(),
                stderr,
            });
        }

        result_file.seek(SeekFrom::Start(0))?;
        let mut stdout = String::new();
        result_file.read_to_string(&mut stdout)?;

        let outcome = parse_solver_output(&stdout)?;
        let result = SolverResult {
            outcome,
            solve_time: start_time.elapsed(),
        };
        debug!(
            satisfiable = result.outcome.is_satisfiable(),
            "external solver finished in {:.3}s",
            result.solve_time.as_secs_f64()
        );

        self.statistics.record(&result);
        Ok(result)
    }

    pub fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }

    fn command_line(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
