//! File I/O operations for boards

use super::Board;
use anyhow::{Context, Result};
use std::path::Path;

/// Load a board from a text file
/// Format: one line per row, 'Q' (or '1') for a queen and '.' (or '0') for an empty cell
pub fn load_board_from_file<P: AsRef<Path>>(path: P) -> Result<Board> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read board file: {}", path.as_ref().display()))?;

    parse_board_from_string(&content)
        .with_context(|| format!("Failed to parse board from file: {}", path.as_ref().display()))
}

/// Parse a board from a string representation
pub fn parse_board_from_string(content: &str) -> Result<Board> {
    let lines: Vec<&str> = content.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Board file is empty or contains no valid rows");
    }

    let size = lines.len();
    let mut cells = Vec::with_capacity(size);

    for (row_idx, line) in lines.iter().enumerate() {
        let row = line
            .chars()
            .enumerate()
            .map(|(col_idx, ch)| match ch {
                'Q' | 'q' | '1' => Ok(true),
                '.' | '0' => Ok(false),
                _ => anyhow::bail!(
                    "Invalid character '{}' at position ({}, {}). Only 'Q', '.', '1' and '0' are allowed",
                    ch, row_idx, col_idx
                ),
            })
            .collect::<Result<Vec<bool>>>()?;

        if row.len() != size {
            anyhow::bail!("Row {} has length {}, expected {} (boards must be square)", row_idx, row.len(), size);
        }
        cells.push(row);
    }

    Board::from_cells(cells)
}

/// Save a board to a text file
pub fn save_board_to_file<P: AsRef<Path>>(board: &Board, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, board.to_string())
        .with_context(|| format!("Failed to write board to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Create example board files for the `validate` command
pub fn create_example_boards<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let examples: [(&str, usize, &[(usize, usize)]); 3] = [
        ("four_valid.txt", 4, &[(0, 1), (1, 3), (2, 0), (3, 2)]),
        // (3, 2) moved to (3, 1): shares a diagonal with (2, 0) and the column of (0, 1)
        ("four_diagonal.txt", 4, &[(0, 1), (1, 3), (2, 0), (3, 1)]),
        (
            "eight_valid.txt",
            8,
            &[(0, 0), (1, 4), (2, 7), (3, 5), (4, 2), (5, 6), (6, 1), (7, 3)],
        ),
    ];

    for (name, size, placements) in examples {
        let board = Board::from_placements(size, placements)?;
        save_board_to_file(&board, dir.join(name))?;
    }

    Ok(())
}
