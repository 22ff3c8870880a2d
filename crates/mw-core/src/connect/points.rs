//! Connection points: wall cells that are candidate doors
//!
//! Points are found by probing straight out from every room edge. A probe
//! that reaches floor within [`MAX_PROBE_STEPS`] flags every wall cell it
//! crossed; one that leaves the map or runs out of steps flags nothing.

use crate::consts::MAX_PROBE_STEPS;
use crate::map::{CellType, Direction, Grid, GridBounds, Position};
use crate::region::Room;

/// One flag per grid cell, plus a live count of set flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionPointSet {
    bounds: GridBounds,
    flags: Vec<bool>,
    count: usize,
}

impl ConnectionPointSet {
    /// An empty set sized to `grid`
    pub fn new(grid: &Grid) -> Self {
        Self {
            bounds: grid.bounds(),
            flags: vec![false; grid.area()],
            count: 0,
        }
    }

    /// Whether `pos` is flagged. Always false outside the grid.
    pub fn contains(&self, pos: Position) -> bool {
        self.bounds.index(pos).is_some_and(|i| self.flags[i])
    }

    /// Flag `pos`. Returns true if it was not already flagged.
    pub fn insert(&mut self, pos: Position) -> bool {
        match self.bounds.index(pos) {
            Some(i) if !self.flags[i] => {
                self.flags[i] = true;
                self.count += 1;
                true
            }
            _ => false,
        }
    }

    /// Clear `pos`. Returns true if it was flagged.
    pub fn remove(&mut self, pos: Position) -> bool {
        match self.bounds.index(pos) {
            Some(i) if self.flags[i] => {
                self.flags[i] = false;
                self.count -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Flagged positions in row-major order
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        let bounds = self.bounds;
        self.flags
            .iter()
            .enumerate()
            .filter(|&(_, &set)| set)
            .map(move |(i, _)| bounds.position_of(i))
    }
}

/// Probe outward from every edge cell of every room and flag the walls
/// between each room and the nearest floor beyond it.
pub fn spawn_connection_points(grid: &Grid, rooms: &[Room]) -> ConnectionPointSet {
    let mut points = ConnectionPointSet::new(grid);
    for room in rooms {
        for (edge, direction) in room.boundary_probes() {
            probe_from_edge(grid, &mut points, edge, direction);
        }
    }
    log::debug!(
        "spawned {} connection points around {} rooms",
        points.len(),
        rooms.len()
    );
    points
}

/// Walk up to [`MAX_PROBE_STEPS`] cells from `edge` (exclusive). Returns the
/// number of newly flagged cells.
pub(crate) fn probe_from_edge(
    grid: &Grid,
    points: &mut ConnectionPointSet,
    edge: Position,
    direction: Direction,
) -> usize {
    for step in 1..=MAX_PROBE_STEPS {
        match grid.cell_type(edge.offset(direction, step)) {
            None => return 0,
            Some(CellType::Floor) => {
                return (1..step)
                    .filter(|&s| points.insert(edge.offset(direction, s)))
                    .count();
            }
            Some(CellType::Wall) => {}
        }
    }
    0
}
