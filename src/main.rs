//! Main CLI application for the N-Queens SAT solver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nqueens_sat::{
    board::{create_example_boards, load_board_from_file},
    config::{CliOverrides, Settings, SolverBackend},
    queens::{QueensProblem, SolutionValidator},
    sat::SatEncoder,
    utils::{ColorOutput, SolutionFormatter},
};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nqueens_sat")]
#[command(about = "N-Queens SAT Solver")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve an N-Queens instance
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Board size (overrides config)
        #[arg(short = 'n', long)]
        size: Option<usize>,

        /// Enumerate every solution
        #[arg(short, long)]
        all: bool,

        /// Maximum solutions to find (overrides config)
        #[arg(short, long)]
        max_solutions: Option<usize>,

        /// Add vertical-mirror symmetry-breaking clauses
        #[arg(short, long)]
        symmetry_breaking: bool,

        /// Number of cell variables covered by symmetry breaking (implies --symmetry-breaking)
        #[arg(long)]
        sb_length: Option<usize>,

        /// Solver backend
        #[arg(short, long, value_enum)]
        backend: Option<BackendArg>,

        /// External solver command (used with --backend external)
        #[arg(long)]
        solver_command: Option<String>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Write the CNF encoding in DIMACS format
    Encode {
        /// Board size
        #[arg(short = 'n', long, default_value_t = 8)]
        size: usize,

        /// Add vertical-mirror symmetry-breaking clauses
        #[arg(short, long)]
        symmetry_breaking: bool,

        /// Number of cell variables covered by symmetry breaking
        #[arg(long)]
        sb_length: Option<usize>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a board file for N-Queens violations
    Validate {
        /// Board file: one row per line, 'Q' for a queen and '.' for an empty cell
        board: PathBuf,
    },

    /// Create example configuration and board files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum BackendArg {
    Cadical,
    External,
}

impl From<BackendArg> for SolverBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Cadical => SolverBackend::Cadical,
            BackendArg::External => SolverBackend::External,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            config, size, all, max_solutions, symmetry_breaking, sb_length,
            backend, solver_command, output, verbose,
        } => {
            init_tracing(verbose);
            let cli_overrides = CliOverrides {
                size,
                max_solutions,
                enumerate_all: all,
                backend: backend.map(SolverBackend::from),
                solver_command,
                symmetry_breaking,
                symmetry_breaking_length: sb_length,
                output_dir: output,
            };
            solve_command(config, cli_overrides, verbose)
        }
        Commands::Encode { size, symmetry_breaking, sb_length, output } => {
            init_tracing(false);
            encode_command(size, symmetry_breaking, sb_length, output)
        }
        Commands::Validate { board } => {
            init_tracing(false);
            validate_command(board)
        }
        Commands::Setup { directory, force } => {
            init_tracing(false);
            setup_command(directory, force)
        }
    }
}

fn solve_command(config_path: PathBuf, cli_overrides: CliOverrides, verbose: bool) -> Result<()> {
    println!("{}", ColorOutput::info("♛ Starting N-Queens SAT Solver"));

    let mut settings = if config_path.exists() {
        Settings::from_file(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        println!("{}", ColorOutput::warning(&format!(
            "Config file {} not found, using defaults", config_path.display()
        )));
        Settings::default()
    };

    settings.merge_with_cli(&cli_overrides);

    if verbose {
        println!("Configuration:");
        println!("  Board size: {}", settings.board.size);
        println!("  Backend: {:?}", settings.solver.backend);
        if settings.solver.enumerate_all {
            println!("  Solutions: all");
        } else {
            println!("  Max solutions: {}", settings.solver.max_solutions);
        }
        println!("  Symmetry-breaking length: {}", settings.symmetry_breaking_length());
        println!("  Output dir: {}", settings.output.output_directory.display());
        println!();
    }

    settings.validate()
        .context("Configuration validation failed")?;

    let start_time = Instant::now();
    let mut problem = QueensProblem::new(settings.clone())
        .context("Failed to create N-Queens problem")?;

    if verbose {
        println!("{}", problem.estimate_complexity());
    }

    if settings.output.save_dimacs {
        let path = problem.save_dimacs(&settings.output.output_directory)?;
        println!("DIMACS written to {}", path.display());
    }

    println!("{}", ColorOutput::info("🧮 Generating SAT constraints and solving..."));
    let solutions = problem.run()
        .context("Failed to solve N-Queens problem")?;

    let total_time = start_time.elapsed();

    if solutions.is_empty() {
        println!("{}", ColorOutput::warning(&format!(
            "❌ No solutions: the {}-queens problem is unsatisfiable", settings.board.size
        )));
        return Ok(());
    }

    println!("{}", ColorOutput::success(&format!(
        "✅ Found {} solution(s) in {:.3}s",
        solutions.len(),
        total_time.as_secs_f64()
    )));

    println!("\n{}", SolutionFormatter::format_solution_summary(&solutions));

    if solutions.len() <= 3 {
        println!("{}", ColorOutput::info("Solution Details:"));
        for solution in &solutions {
            println!("\n{}", SolutionFormatter::format_solution(solution));
        }
    } else {
        println!("{}", SolutionFormatter::compare_solutions(&solutions[..4]));
    }

    println!("\n{}", ColorOutput::info("💾 Saving solutions..."));
    SolutionFormatter::save_solutions(&solutions, &settings.output.output_directory, &settings.output.format)
        .context("Failed to save solutions")?;

    println!("{}", ColorOutput::success(&format!(
        "Solutions saved to {}",
        settings.output.output_directory.display()
    )));

    if verbose {
        println!("\n{}", problem.encoding_statistics());
        println!("Blocking clauses added: {}", problem.blocking_clause_count());
        println!("{}", problem.solver_statistics());
    }

    Ok(())
}

fn encode_command(
    size: usize,
    symmetry_breaking: bool,
    sb_length: Option<usize>,
    output: Option<PathBuf>,
) -> Result<()> {
    let length = match (symmetry_breaking, sb_length) {
        (_, Some(length)) => length,
        (true, None) => size,
        (false, None) => 0,
    };

    let encoding = SatEncoder::new(size, length)
        .encode()
        .with_context(|| format!("Failed to encode the {}-queens problem", size))?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = std::fs::File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            encoding.write_dimacs(&mut writer)?;
            writer.flush()?;
            eprintln!("{}", ColorOutput::success(&format!(
                "Wrote {} variables and {} clauses to {}",
                encoding.clauses().variable_count(),
                encoding.clauses().len(),
                path.display()
            )));
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            encoding.write_dimacs(&mut writer)?;
            writer.flush()?;
        }
    }

    Ok(())
}

fn validate_command(board_path: PathBuf) -> Result<()> {
    println!("{}", ColorOutput::info("🔍 Validating board..."));

    let board = load_board_from_file(&board_path)
        .with_context(|| format!("Failed to load board from {}", board_path.display()))?;

    println!("{}", SolutionFormatter::format_board_with_coords(&board));

    let report = SolutionValidator::new(board.size).validate(&board.placements());
    println!("{}", report);

    if report.is_valid() {
        println!("{}", ColorOutput::success("✅ Board is a valid N-Queens solution!"));
    } else {
        println!("{}", ColorOutput::error("❌ Board is invalid"));
        for violation in &report.violations {
            println!("  - {}", violation);
        }
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    let config_dir = directory.join("config");
    let boards_dir = directory.join("input/boards");
    let output_dir = directory.join("output/solutions");

    for dir in [&config_dir, &boards_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default().to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_boards(&boards_dir)
        .context("Failed to create example boards")?;
    println!("Created example boards in: {}", boards_dir.display());

    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    let mut all_config = Settings::default();
    all_config.solver.enumerate_all = true;
    all_config.encoding.symmetry_breaking = true;
    all_config.to_file(&examples_dir.join("all_solutions.yaml"))?;

    let mut external_config = Settings::default();
    external_config.board.size = 12;
    external_config.solver.backend = SolverBackend::External;
    external_config.solver.max_solutions = 1;
    external_config.output.save_dimacs = true;
    external_config.to_file(&examples_dir.join("external_solver.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: cargo run -- solve --config config/default.yaml");
    println!("3. Check a board: cargo run -- validate {}", boards_dir.join("four_diagonal.txt").display());

    Ok(())
}
