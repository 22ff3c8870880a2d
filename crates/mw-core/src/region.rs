//! Rooms and mazes
//!
//! Regions are the pre-carved floor areas the connector joins together.
//! Both kinds are immutable cell sets; a [`Room`] also knows its four edges,
//! which is where connection points are probed from.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::map::{Direction, Position};

/// A set of floor cells the connector can merge into the main zone.
pub trait Region {
    /// Check whether `pos` belongs to this region
    fn contains(&self, pos: Position) -> bool;

    /// Every cell of the region
    fn cells(&self) -> &HashSet<Position>;
}

/// Which input region a cell belongs to, by index into the rooms or mazes list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RegionId {
    Room(usize),
    Maze(usize),
}

impl core::fmt::Display for RegionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RegionId::Room(i) => write!(f, "room #{i}"),
            RegionId::Maze(i) => write!(f, "maze #{i}"),
        }
    }
}

/// A room: a cell set plus its edge cells for each outward direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    cells: HashSet<Position>,
    /// Edge cells, indexed by `Direction as usize`
    edges: [Vec<Position>; 4],
}

impl Room {
    /// A solid rectangle with its top-left corner at (x, y)
    pub fn rect(x: i32, y: i32, width: i32, height: i32) -> Self {
        let cells = (y..y + height)
            .flat_map(|cy| (x..x + width).map(move |cx| Position::new(cx, cy)));
        Self::from_cells(cells)
    }

    /// Build a room from any cell set.
    ///
    /// The edge for a direction is every cell whose neighbour in that
    /// direction is outside the room, in row-major order. Concave shapes get
    /// inner edges too.
    pub fn from_cells(cells: impl IntoIterator<Item = Position>) -> Self {
        let cells: HashSet<Position> = cells.into_iter().collect();
        let mut ordered: Vec<Position> = cells.iter().copied().collect();
        ordered.sort_by_key(|p| (p.y, p.x));

        let edges: [Vec<Position>; 4] = Direction::ALL.map(|dir| {
            ordered
                .iter()
                .copied()
                .filter(|p| !cells.contains(&p.step(dir)))
                .collect()
        });

        Self { cells, edges }
    }

    /// Edge cells facing `direction`
    pub fn boundary(&self, direction: Direction) -> &[Position] {
        &self.edges[direction as usize]
    }

    pub fn top_cells(&self) -> &[Position] {
        self.boundary(Direction::Up)
    }

    pub fn right_cells(&self) -> &[Position] {
        self.boundary(Direction::Right)
    }

    pub fn bottom_cells(&self) -> &[Position] {
        self.boundary(Direction::Down)
    }

    pub fn left_cells(&self) -> &[Position] {
        self.boundary(Direction::Left)
    }

    /// Every (edge cell, outward direction) pair
    pub fn boundary_probes(&self) -> impl Iterator<Item = (Position, Direction)> + '_ {
        Direction::ALL
            .into_iter()
            .flat_map(move |dir| self.boundary(dir).iter().map(move |&p| (p, dir)))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Region for Room {
    fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    fn cells(&self) -> &HashSet<Position> {
        &self.cells
    }
}

/// A maze: an irregular corridor network. Mazes never spawn connection points.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Maze {
    cells: HashSet<Position>,
}

impl Maze {
    pub fn new(cells: impl IntoIterator<Item = Position>) -> Self {
        Self {
            cells: cells.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Region for Maze {
    fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    fn cells(&self) -> &HashSet<Position> {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let room = Room::rect(2, 3, 3, 2);
        assert_eq!(room.len(), 6);
        assert_eq!(
            room.top_cells(),
            &[Position::new(2, 3), Position::new(3, 3), Position::new(4, 3)]
        );
        assert_eq!(
            room.bottom_cells(),
            &[Position::new(2, 4), Position::new(3, 4), Position::new(4, 4)]
        );
        assert_eq!(room.left_cells(), &[Position::new(2, 3), Position::new(2, 4)]);
        assert_eq!(room.right_cells(), &[Position::new(4, 3), Position::new(4, 4)]);
        assert_eq!(room.boundary_probes().count(), 10);
    }

    #[test]
    fn test_single_cell_room() {
        let room = Room::rect(0, 0, 1, 1);
        for dir in Direction::ALL {
            assert_eq!(room.boundary(dir), &[Position::new(0, 0)]);
        }
    }

    #[test]
    fn test_concave_room_has_inner_edges() {
        // U shape: the notch at (1, 0) is outside the room
        let room = Room::from_cells([
            Position::new(0, 0),
            Position::new(2, 0),
            Position::new(0, 1),
            Position::new(1, 1),
            Position::new(2, 1),
        ]);
        assert!(room.top_cells().contains(&Position::new(1, 1)));
        assert!(room.right_cells().contains(&Position::new(0, 0)));
        assert!(room.left_cells().contains(&Position::new(2, 0)));
    }

    #[test]
    fn test_contains() {
        let room = Room::rect(0, 0, 2, 2);
        assert!(room.contains(Position::new(1, 1)));
        assert!(!room.contains(Position::new(2, 1)));

        let maze = Maze::new([Position::new(5, 5), Position::new(5, 6)]);
        assert!(maze.contains(Position::new(5, 6)));
        assert!(!maze.contains(Position::new(6, 6)));
        assert_eq!(maze.cells().len(), 2);
    }

    #[test]
    fn test_region_id_display() {
        assert_eq!(RegionId::Room(2).to_string(), "room #2");
        assert_eq!(RegionId::Maze(0).to_string(), "maze #0");
    }
}
