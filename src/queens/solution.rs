//! Solution representation and model decoding

use crate::board::Board;
use crate::error::{QueensError, QueensResult};
use crate::sat::{Model, Variable, VariableIndexer};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Extract queen positions from a model
///
/// Only positive literals tagged as cell variables count; negative literals and
/// symmetry-breaking helpers are discarded. The result is sorted by row and must
/// contain exactly n positions.
pub fn decode_model(indexer: &VariableIndexer, model: &Model) -> QueensResult<Vec<(usize, usize)>> {
    let mut placements: Vec<(usize, usize)> = model
        .true_variables()
        .filter_map(|id| match indexer.classify(id) {
            Some(Variable::Cell { row, col }) => Some((row, col)),
            _ => None,
        })
        .collect();
    placements.sort_unstable();
    placements.dedup();

    let expected = indexer.board_size();
    if placements.len() != expected {
        return Err(QueensError::SolutionCardinalityError {
            expected,
            actual: placements.len(),
        });
    }

    Ok(placements)
}

/// A queen placement found by the solver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// Board dimension
    pub size: usize,
    /// Queen positions as (row, col), one per row, sorted by row
    pub placements: Vec<(usize, usize)>,
    /// Time the solver spent on the call that produced this solution
    #[serde(skip)]
    pub solve_time: Duration,
}

impl Solution {
    pub fn new(size: usize, mut placements: Vec<(usize, usize)>, solve_time: Duration) -> Self {
        placements.sort_unstable();
        Self {
            size,
            placements,
            solve_time,
        }
    }

    /// Decode a solver model into a solution
    pub fn from_model(indexer: &VariableIndexer, model: &Model, solve_time: Duration) -> QueensResult<Self> {
        let placements = decode_model(indexer, model)?;
        Ok(Self::new(indexer.board_size(), placements, solve_time))
    }

    /// Column of the queen in each row, e.g. `[1, 3, 0, 2]`
    pub fn columns(&self) -> Vec<usize> {
        let mut columns = vec![usize::MAX; self.size];
        for &(row, col) in &self.placements {
            if row < self.size {
                columns[row] = col;
            }
        }
        columns
    }

    /// Compact identifier listing the column of each row
    pub fn id(&self) -> String {
        self.columns()
            .iter()
            .map(|col| col.to_string())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Board view of this solution
    pub fn to_board(&self) -> anyhow::Result<Board> {
        Board::from_placements(self.size, &self.placements)
    }

    /// Same placement, ignoring solve time
    pub fn is_equivalent_to(&self, other: &Solution) -> bool {
        self.size == other.size && self.placements == other.placements
    }

    /// Whether `other` is this placement reflected top to bottom
    pub fn is_vertical_mirror_of(&self, other: &Solution) -> bool {
        if self.size != other.size {
            return false;
        }
        let mut mirrored: Vec<(usize, usize)> = self
            .placements
            .iter()
            .map(|&(row, col)| (self.size - 1 - row, col))
            .collect();
        mirrored.sort_unstable();
        mirrored == other.placements
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Create from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Save to file
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from file
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}
