//! Square board holding queen placements

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An n×n board; `true` marks a queen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub size: usize,
    pub cells: Vec<bool>,
}

impl Board {
    /// Create a new empty board
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    /// Create a board with queens at the given (row, col) positions
    pub fn from_placements(size: usize, placements: &[(usize, usize)]) -> Result<Self> {
        let mut board = Self::new(size);
        for &(row, col) in placements {
            board.set(row, col, true)?;
        }
        Ok(board)
    }

    /// Create a board from a 2D boolean array; the array must be square
    pub fn from_cells(cells: Vec<Vec<bool>>) -> Result<Self> {
        let size = cells.len();
        for (i, row) in cells.iter().enumerate() {
            if row.len() != size {
                anyhow::bail!("Row {} has length {}, expected {} (boards must be square)", i, row.len(), size);
            }
        }

        Ok(Self {
            size,
            cells: cells.into_iter().flatten().collect(),
        })
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Whether a queen stands at (row, col); out-of-bounds cells are empty
    pub fn get(&self, row: usize, col: usize) -> bool {
        if row < self.size && col < self.size {
            self.cells[self.index(row, col)]
        } else {
            false
        }
    }

    pub fn set(&mut self, row: usize, col: usize, value: bool) -> Result<()> {
        if row >= self.size || col >= self.size {
            anyhow::bail!("Coordinates ({}, {}) out of bounds for {}x{} board", row, col, self.size, self.size);
        }
        let idx = self.index(row, col);
        self.cells[idx] = value;
        Ok(())
    }

    /// Queen positions in row-major order
    pub fn placements(&self) -> Vec<(usize, usize)> {
        (0..self.size)
            .flat_map(|row| (0..self.size).map(move |col| (row, col)))
            .filter(|&(row, col)| self.get(row, col))
            .collect()
    }

    pub fn queen_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                write!(f, "{}", if self.get(row, col) { 'Q' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
