//! Configuration settings for the N-Queens SAT solver

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub board: BoardConfig,
    pub solver: SolverConfig,
    pub encoding: EncodingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    pub backend: SolverBackend,
    /// Upper bound on solutions collected when enumerating
    pub max_solutions: usize,
    /// Keep enumerating until the instance becomes unsatisfiable
    pub enumerate_all: bool,
    pub external: ExternalSolverConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SolverBackend {
    Cadical,
    External,
}

/// Command line of an external DIMACS solver; the CNF path is appended last
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalSolverConfig {
    pub command: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodingConfig {
    pub symmetry_breaking: bool,
    /// Number of primary bits covered by the lex-leader predicate (defaults to n)
    pub symmetry_breaking_length: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub output_directory: PathBuf,
    pub save_dimacs: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
    Visual,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board: BoardConfig { size: 8 },
            solver: SolverConfig {
                backend: SolverBackend::Cadical,
                max_solutions: 10,
                enumerate_all: false,
                external: ExternalSolverConfig {
                    command: "glucose".to_string(),
                    args: vec!["-model".to_string()],
                },
            },
            encoding: EncodingConfig {
                symmetry_breaking: false,
                symmetry_breaking_length: None,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                output_directory: PathBuf::from("output/solutions"),
                save_dimacs: false,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.board.size == 0 {
            anyhow::bail!("Board size must be positive");
        }

        if self.solver.max_solutions == 0 {
            anyhow::bail!("Maximum solutions must be positive");
        }

        if self.solver.backend == SolverBackend::External && self.solver.external.command.trim().is_empty() {
            anyhow::bail!("External solver backend selected but no solver command configured");
        }

        if let Some(length) = self.encoding.symmetry_breaking_length {
            let cells = self.board.size.saturating_mul(self.board.size);
            if length > cells {
                anyhow::bail!(
                    "Symmetry-breaking length {} exceeds the {} cells of a {}x{} board",
                    length, cells, self.board.size, self.board.size
                );
            }
        }

        Ok(())
    }

    /// Effective lex-leader length: zero when symmetry breaking is off
    pub fn symmetry_breaking_length(&self) -> usize {
        if self.encoding.symmetry_breaking {
            self.encoding.symmetry_breaking_length.unwrap_or(self.board.size)
        } else {
            0
        }
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(size) = cli_overrides.size {
            self.board.size = size;
        }
        if let Some(max_solutions) = cli_overrides.max_solutions {
            self.solver.max_solutions = max_solutions;
        }
        if cli_overrides.enumerate_all {
            self.solver.enumerate_all = true;
        }
        if let Some(backend) = cli_overrides.backend {
            self.solver.backend = backend;
        }
        if let Some(ref command) = cli_overrides.solver_command {
            self.solver.external.command = command.clone();
        }
        if cli_overrides.symmetry_breaking {
            self.encoding.symmetry_breaking = true;
        }
        if let Some(length) = cli_overrides.symmetry_breaking_length {
            self.encoding.symmetry_breaking = true;
            self.encoding.symmetry_breaking_length = Some(length);
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub size: Option<usize>,
    pub max_solutions: Option<usize>,
    pub enumerate_all: bool,
    pub backend: Option<SolverBackend>,
    pub solver_command: Option<String>,
    pub symmetry_breaking: bool,
    pub symmetry_breaking_length: Option<usize>,
    pub output_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.board.size, 8);
        assert_eq!(settings.symmetry_breaking_length(), 0);
    }

    #[test]
    fn test_yaml_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/default.yaml");

        let mut settings = Settings::default();
        settings.board.size = 6;
        settings.solver.backend = SolverBackend::External;
        settings.encoding.symmetry_breaking = true;
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.board.size, 6);
        assert_eq!(loaded.solver.backend, SolverBackend::External);
        assert_eq!(loaded.solver.external.command, "glucose");
        assert_eq!(loaded.symmetry_breaking_length(), 6);
    }

    #[test]
    fn test_validation_failures() {
        let mut settings = Settings::default();
        settings.board.size = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.solver.max_solutions = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.encoding.symmetry_breaking_length = Some(65);
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.solver.backend = SolverBackend::External;
        settings.solver.external.command = "  ".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = Settings::default();
        settings.merge_with_cli(&CliOverrides {
            size: Some(5),
            max_solutions: Some(3),
            symmetry_breaking_length: Some(10),
            backend: Some(SolverBackend::External),
            solver_command: Some("kissat".to_string()),
            ..Default::default()
        });

        assert_eq!(settings.board.size, 5);
        assert_eq!(settings.solver.max_solutions, 3);
        assert_eq!(settings.solver.external.command, "kissat");
        assert_eq!(settings.symmetry_breaking_length(), 10);
    }
}
