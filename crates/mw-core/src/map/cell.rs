//! Map cell types

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::{FLOOR_SYM, WALL_SYM};

/// Cell/terrain type
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum CellType {
    #[default]
    Wall = 0,
    Floor = 1,
}

impl CellType {
    /// Check if this is passable (can walk through)
    pub const fn is_passable(&self) -> bool {
        matches!(self, CellType::Floor)
    }

    /// Get the display character for this cell type
    pub const fn symbol(&self) -> char {
        match self {
            CellType::Wall => WALL_SYM,
            CellType::Floor => FLOOR_SYM,
        }
    }

    /// Parse a display character
    pub const fn from_symbol(c: char) -> Option<CellType> {
        match c {
            WALL_SYM => Some(CellType::Wall),
            FLOOR_SYM => Some(CellType::Floor),
            _ => None,
        }
    }
}
