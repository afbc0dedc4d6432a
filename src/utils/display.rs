//! Display and output formatting utilities

use crate::board::Board;
use crate::config::OutputFormat;
use crate::queens::Solution;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

/// One row of `solutions_summary.json`
#[derive(Debug, Serialize)]
struct SolutionSummary {
    index: usize,
    id: String,
    columns: Vec<usize>,
    solve_time_ms: u128,
}

/// Format solutions for display
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Format a single solution for console output
    pub fn format_solution(solution: &Solution) -> String {
        let mut output = String::new();

        output.push_str(&format!("=== Solution {} ===\n", solution.id()));
        output.push_str(&format!("Board: {}x{}\n", solution.size, solution.size));
        output.push_str(&format!("Solve Time: {:.3}s\n", solution.solve_time.as_secs_f64()));
        let positions: Vec<String> = solution
            .placements
            .iter()
            .map(|(row, col)| format!("({},{})", row, col))
            .collect();
        output.push_str(&format!("Queens: {}\n\n", positions.join(" ")));
        output.push_str(&Self::format_columns(solution.size, &solution.columns()));

        output
    }

    /// Format multiple solutions as a summary table
    pub fn format_solution_summary(solutions: &[Solution]) -> String {
        let mut output = String::new();

        output.push_str("Solutions Summary:\n");
        output.push_str("  # | Time(ms) | Columns\n");
        output.push_str("----|----------|--------------------\n");

        for (i, solution) in solutions.iter().enumerate() {
            output.push_str(&format!(
                "{:3} | {:8} | {}\n",
                i + 1,
                solution.solve_time.as_millis(),
                solution.id()
            ));
        }

        output
    }

    /// Format a board in compact form
    pub fn format_board_compact(board: &Board) -> String {
        let mut output = String::new();
        for row in 0..board.size {
            for col in 0..board.size {
                output.push(if board.get(row, col) { '♛' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Format a board with coordinates
    pub fn format_board_with_coords(board: &Board) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for col in 0..board.size {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        for row in 0..board.size {
            output.push_str(&format!("{:2} ", row));
            for col in 0..board.size {
                output.push_str(if board.get(row, col) { " Q" } else { " ·" });
            }
            output.push('\n');
        }

        output
    }

    fn format_columns(size: usize, columns: &[usize]) -> String {
        let mut output = String::with_capacity(size * (size + 1));
        for &queen in columns {
            for col in 0..size {
                output.push(if col == queen { '♛' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Save solutions to files based on output format
    pub fn save_solutions<P: AsRef<Path>>(
        solutions: &[Solution],
        output_dir: P,
        format: &OutputFormat,
    ) -> Result<()> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)?;

        match format {
            OutputFormat::Text => {
                for (i, solution) in solutions.iter().enumerate() {
                    let filepath = output_dir.join(format!("solution_{:03}.txt", i + 1));
                    std::fs::write(filepath, Self::format_solution(solution))?;
                }
            }
            OutputFormat::Json => {
                for (i, solution) in solutions.iter().enumerate() {
                    let filepath = output_dir.join(format!("solution_{:03}.json", i + 1));
                    solution.save_to_file(filepath)?;
                }

                let summaries: Vec<SolutionSummary> = solutions
                    .iter()
                    .enumerate()
                    .map(|(i, s)| SolutionSummary {
                        index: i + 1,
                        id: s.id(),
                        columns: s.columns(),
                        solve_time_ms: s.solve_time.as_millis(),
                    })
                    .collect();
                let summary_json = serde_json::to_string_pretty(&summaries)?;
                std::fs::write(output_dir.join("solutions_summary.json"), summary_json)?;
            }
            OutputFormat::Visual => {
                for (i, solution) in solutions.iter().enumerate() {
                    let filepath = output_dir.join(format!("solution_{:03}_visual.txt", i + 1));
                    let board = solution.to_board()?;
                    let mut content = format!("Solution {} ({})\n", i + 1, solution.id());
                    content.push_str(&"=".repeat(30));
                    content.push('\n');
                    content.push_str(&Self::format_board_with_coords(&board));
                    std::fs::write(filepath, content)?;
                }
            }
        }

        Ok(())
    }

    /// Print boards side by side, one column block per solution
    pub fn compare_solutions(solutions: &[Solution]) -> String {
        if solutions.is_empty() {
            return "No solutions to compare".to_string();
        }

        let mut output = String::new();
        let max_size = solutions.iter().map(|s| s.size).max().unwrap_or(0);
        let all_columns: Vec<Vec<usize>> = solutions.iter().map(Solution::columns).collect();

        for row in 0..max_size {
            for (i, (solution, columns)) in solutions.iter().zip(&all_columns).enumerate() {
                if i > 0 {
                    output.push_str("  |  ");
                }
                if row < solution.size {
                    for col in 0..solution.size {
                        output.push(if columns[row] == col { '♛' } else { '·' });
                    }
                } else {
                    output.push_str(&" ".repeat(solution.size));
                }
            }
            output.push('\n');
        }

        output
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
