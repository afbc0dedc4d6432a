//! N-Queens problem driver: encode once, solve, and enumerate with blocking clauses

use super::solution::Solution;
use super::validator::SolutionValidator;
use crate::config::Settings;
use crate::sat::encoder::{ComplexityEstimate, EncodingStatistics};
use crate::sat::solver::SolverStatistics;
use crate::sat::{ClauseSet, Encoding, SatEncoder, SolverOutcome, UnifiedSatSolver};
use anyhow::{Context, Result};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Represents one N-Queens instance together with its solver backend
pub struct QueensProblem {
    settings: Settings,
    encoder: SatEncoder,
    encoding: Encoding,
    solver: UnifiedSatSolver,
    validator: SolutionValidator,
    blocking_clauses: usize,
}

impl QueensProblem {
    /// Build the encoding for the configured board size
    pub fn new(settings: Settings) -> Result<Self> {
        let n = settings.board.size;
        let encoder = SatEncoder::new(n, settings.symmetry_breaking_length());
        let encoding = encoder
            .encode()
            .with_context(|| format!("Failed to encode the {}-queens problem", n))?;
        let solver = UnifiedSatSolver::new(&settings.solver);

        Ok(Self {
            settings,
            encoder,
            encoding,
            solver,
            validator: SolutionValidator::new(n),
            blocking_clauses: 0,
        })
    }

    /// Find a single solution; `None` means the instance is unsatisfiable
    pub fn solve(&mut self) -> Result<Option<Solution>> {
        let clauses = self.encoding.clauses().clone();
        self.solve_clauses(&clauses)
    }

    /// Enumerate distinct solutions, up to `limit` if given
    ///
    /// Every step is an independent solve over the base clauses plus one blocking clause
    /// per solution found so far.
    pub fn enumerate(&mut self, limit: Option<usize>) -> Result<Vec<Solution>> {
        let mut solutions: Vec<Solution> = Vec::new();
        let mut clauses = self.encoding.clauses().clone();

        while limit.map_or(true, |max| solutions.len() < max) {
            let Some(solution) = self.solve_clauses(&clauses)? else {
                break;
            };

            info!(index = solutions.len() + 1, id = %solution.id(), "found solution");
            clauses = clauses.with_clause(self.encoding.blocking_clause(&solution.placements));
            self.blocking_clauses += 1;
            solutions.push(solution);
        }

        info!(
            count = solutions.len(),
            invocations = self.solver.statistics().invocations,
            "enumeration finished"
        );
        Ok(solutions)
    }

    /// Solve according to the solver settings: all solutions, or up to `max_solutions`
    pub fn run(&mut self) -> Result<Vec<Solution>> {
        if self.settings.solver.enumerate_all {
            self.enumerate(None)
        } else {
            self.enumerate(Some(self.settings.solver.max_solutions))
        }
    }

    /// One fresh solver call, decoded and validated
    fn solve_clauses(&mut self, clauses: &ClauseSet) -> Result<Option<Solution>> {
        debug!(clauses = clauses.len(), "solving");
        let result = self
            .solver
            .solve(clauses)
            .context("SAT solver invocation failed")?;

        let model = match result.outcome {
            SolverOutcome::Unsatisfiable => return Ok(None),
            SolverOutcome::Satisfiable(model) => model,
        };

        // A model that cannot be decoded into a valid board means the encoder and
        // decoder disagree; stop rather than report a wrong board.
        let solution = Solution::from_model(self.encoding.indexer(), &model, result.solve_time)
            .context("Solver model is inconsistent with the encoding")?;

        self.validator
            .validate(&solution.placements)
            .into_result()
            .with_context(|| format!("Solver returned an invalid board {}", solution.id()))?;

        Ok(Some(solution))
    }

    /// Write the base encoding as `nq<n>.cnf` into `directory`
    pub fn save_dimacs<P: AsRef<Path>>(&self, directory: P) -> Result<PathBuf> {
        let directory = directory.as_ref();
        std::fs::create_dir_all(directory)
            .with_context(|| format!("Failed to create directory: {}", directory.display()))?;

        let path = directory.join(format!("nq{}.cnf", self.encoding.board_size()));
        let file = std::fs::File::create(&path)
            .with_context(|| format!("Failed to create DIMACS file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        self.encoding
            .write_dimacs(&mut writer)
            .with_context(|| format!("Failed to write DIMACS file: {}", path.display()))?;

        Ok(path)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    pub fn encoding_statistics(&self) -> &EncodingStatistics {
        self.encoding.statistics()
    }

    /// Blocking clauses added across all enumerations so far
    pub fn blocking_clause_count(&self) -> usize {
        self.blocking_clauses
    }

    pub fn solver_statistics(&self) -> &SolverStatistics {
        self.solver.statistics()
    }

    pub fn estimate_complexity(&self) -> ComplexityEstimate {
        self.encoder.estimate_complexity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueensError;
    use crate::sat::dimacs::parse_dimacs;
    use tempfile::tempdir;

    fn settings(n: usize, symmetry_breaking: bool) -> Settings {
        let mut settings = Settings::default();
        settings.board.size = n;
        settings.encoding.symmetry_breaking = symmetry_breaking;
        settings
    }

    fn count_all(n: usize, symmetry_breaking: bool) -> usize {
        QueensProblem::new(settings(n, symmetry_breaking))
            .unwrap()
            .enumerate(None)
            .unwrap()
            .len()
    }

    #[test]
    fn test_single_queen() {
        let mut problem = QueensProblem::new(settings(1, false)).unwrap();
        let solution = problem.solve().unwrap().expect("n = 1 is satisfiable");
        assert_eq!(solution.placements, vec![(0, 0)]);
        assert_eq!(problem.encoding().clauses().variable_count(), 1);
    }

    #[test]
    fn test_small_boards_unsatisfiable() {
        for n in [2, 3] {
            let mut problem = QueensProblem::new(settings(n, false)).unwrap();
            assert!(problem.solve().unwrap().is_none(), "n = {} must be unsatisfiable", n);
            assert!(problem.enumerate(None).unwrap().is_empty());
        }
    }

    #[test]
    fn test_four_queens_enumeration() {
        let mut problem = QueensProblem::new(settings(4, false)).unwrap();
        let solutions = problem.enumerate(None).unwrap();
        assert_eq!(solutions.len(), 2);

        let ids: Vec<String> = solutions.iter().map(Solution::id).collect();
        assert!(ids.contains(&"1-3-0-2".to_string()));
        assert!(ids.contains(&"2-0-3-1".to_string()));
        assert!(solutions[0].is_vertical_mirror_of(&solutions[1]));

        // two solutions found plus the final unsatisfiable call
        assert_eq!(problem.solver_statistics().invocations, 3);
        assert_eq!(problem.blocking_clause_count(), 2);
    }

    #[test]
    fn test_four_queens_with_symmetry_breaking() {
        assert_eq!(count_all(4, true), 1);
    }

    #[test]
    fn test_eight_queens_counts() {
        assert_eq!(count_all(8, false), 92);
        assert_eq!(count_all(8, true), 46);
    }

    #[test]
    fn test_symmetry_breaking_never_increases_count() {
        for n in 1..=7 {
            let plain = count_all(n, false);
            let broken = count_all(n, true);
            assert!(broken <= plain, "n = {}: {} > {}", n, broken, plain);
            assert_eq!(plain > 0, broken > 0, "n = {}: satisfiability changed", n);
        }
    }

    #[test]
    fn test_custom_symmetry_length() {
        let mut config = settings(6, true);
        config.encoding.symmetry_breaking_length = Some(36);
        let full = QueensProblem::new(config).unwrap().enumerate(None).unwrap().len();
        // 6-queens has 4 solutions forming two mirror pairs
        assert_eq!(full, 2);
    }

    #[test]
    fn test_enumeration_limit() {
        let mut config = settings(8, false);
        config.solver.max_solutions = 5;
        let mut problem = QueensProblem::new(config).unwrap();
        let solutions = problem.run().unwrap();
        assert_eq!(solutions.len(), 5);

        for (i, a) in solutions.iter().enumerate() {
            for b in &solutions[i + 1..] {
                assert!(!a.is_equivalent_to(b));
            }
        }
    }

    #[test]
    fn test_save_dimacs() {
        let temp_dir = tempdir().unwrap();
        let problem = QueensProblem::new(settings(5, true)).unwrap();
        let path = problem.save_dimacs(temp_dir.path()).unwrap();
        assert!(path.ends_with("nq5.cnf"));

        let parsed = parse_dimacs(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(&parsed, problem.encoding().clauses());
    }

    #[cfg(unix)]
    #[test]
    fn test_external_backend_inconsistent_model_halts() {
        use crate::config::SolverBackend;

        let temp_dir = tempdir().unwrap();
        let script = temp_dir.path().join("solver.sh");
        // claims SAT with only one queen on a 4x4 board
        std::fs::write(&script, "echo 's SATISFIABLE'\necho 'v 1 -2 -3 0'\nexit 10\n").unwrap();

        let mut config = settings(4, false);
        config.solver.backend = SolverBackend::External;
        config.solver.external.command = "sh".to_string();
        config.solver.external.args = vec![script.display().to_string()];

        let mut problem = QueensProblem::new(config).unwrap();
        let err = problem.solve().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<QueensError>(),
            Some(QueensError::SolutionCardinalityError { expected: 4, actual: 1 })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_external_backend_unsat() {
        use crate::config::SolverBackend;

        let temp_dir = tempdir().unwrap();
        let script = temp_dir.path().join("solver.sh");
        std::fs::write(&script, "echo 's UNSATISFIABLE'\nexit 20\n").unwrap();

        let mut config = settings(3, false);
        config.solver.backend = SolverBackend::External;
        config.solver.external.command = "sh".to_string();
        config.solver.external.args = vec![script.display().to_string()];

        let mut problem = QueensProblem::new(config).unwrap();
        assert!(problem.solve().unwrap().is_none());
    }
}
