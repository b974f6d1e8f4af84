//! The 4x4 board.
//!
//! - `position`: coordinates, directions and pure geometry
//! - `cell`: cells, tile effects and the grid itself
//! - `query`: read-only relational queries over board + cards

mod cell;
mod position;
mod query;

pub use cell::{Board, Cell, TileEffect, TileStatus};
pub use position::{BoardPosition, Direction, BOARD_SIZE, CELL_COUNT};
pub use query::{BoardQuery, CardFilter, CellView, Relation};
