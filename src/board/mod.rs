//! Chess board representation and board file I/O

pub mod grid;
pub mod io;

pub use grid::Board;
pub use io::{load_board_from_file, save_board_to_file, create_example_boards};
