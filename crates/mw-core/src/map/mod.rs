//! Map storage
//!
//! Contains grid coordinates, cell types, and the cell grid itself.

mod cell;
mod grid;
mod position;

pub use cell::CellType;
pub use grid::{Grid, GridBounds, GridParseError};
pub use position::{Direction, Position};
