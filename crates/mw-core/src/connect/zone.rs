//! The main zone: cells known to be mutually reachable

use crate::map::{Grid, GridBounds, Position};
use crate::region::Region;

/// Grows monotonically from the seed room; nothing is ever removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainZone {
    bounds: GridBounds,
    members: Vec<bool>,
    len: usize,
}

impl MainZone {
    /// An empty zone sized to `grid`
    pub fn new(grid: &Grid) -> Self {
        Self {
            bounds: grid.bounds(),
            members: vec![false; grid.area()],
            len: 0,
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.bounds.index(pos).is_some_and(|i| self.members[i])
    }

    /// Add a cell. Returns true if it was new; cells outside the grid are ignored.
    pub fn insert(&mut self, pos: Position) -> bool {
        match self.bounds.index(pos) {
            Some(i) if !self.members[i] => {
                self.members[i] = true;
                self.len += 1;
                true
            }
            _ => false,
        }
    }

    /// Add every cell of `region`. Returns the number of new cells.
    pub fn merge(&mut self, region: &impl Region) -> usize {
        region
            .cells()
            .iter()
            .filter(|&&pos| self.insert(pos))
            .count()
    }

    /// Whether any 4-neighbour of `pos` is in the zone
    pub fn touches(&self, pos: Position) -> bool {
        pos.neighbors().into_iter().any(|n| self.contains(n))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
