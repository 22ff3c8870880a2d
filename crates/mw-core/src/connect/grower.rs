//! Growing the main zone until every region is joined
//!
//! The loop picks a random connection point next to the main zone, digs
//! straight through it to the next floor, and absorbs whatever region that
//! floor belongs to.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_PROBE_STEPS;
use crate::error::ConnectError;
use crate::map::{CellType, Direction, Grid, Position};
use crate::region::{Maze, Region, RegionId, Room};
use crate::rng::{pick_index, RandomSource};

use super::{retire_room_points, spawn_connection_points, ConnectionPointSet, MainZone};

/// What a successful connect run did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectReport {
    /// Room the main zone grew from; `None` when there were no rooms
    pub seed: Option<RegionId>,
    /// Regions in the order they joined the main zone, seed first
    pub merged: Vec<RegionId>,
    /// Wall cells turned to floor, in carve order
    pub carved: Vec<Position>,
    /// Connection points found before the first merge
    pub spawned_points: usize,
    /// Points cleared by retirement
    pub retired_points: usize,
    /// Points dropped because no straight walk from the main zone reached floor
    pub abandoned_points: usize,
    /// Main zone size after each iteration
    pub zone_sizes: Vec<usize>,
    /// Connection points left after each iteration
    pub points_left: Vec<usize>,
}

impl ConnectReport {
    /// Number of merge iterations
    pub fn iterations(&self) -> usize {
        self.zone_sizes.len()
    }
}

/// Connect every room and maze into one 4-connected floor area.
///
/// Mutates `grid` in place. With no rooms this is a no-op. If regions are
/// left over once no connection point touches the main zone, returns
/// [`ConnectError::Unreachable`] naming them along with the report of the
/// partial run; the grid keeps the doors opened so far.
pub fn connect(
    grid: &mut Grid,
    rooms: &[Room],
    mazes: &[Maze],
    rng: &mut impl RandomSource,
) -> Result<ConnectReport, ConnectError> {
    let owners = index_regions(grid, rooms, mazes)?;

    if rooms.is_empty() {
        if !mazes.is_empty() {
            log::warn!("no rooms to start from; leaving {} maze(s) alone", mazes.len());
        }
        return Ok(ConnectReport::default());
    }

    let points = spawn_connection_points(grid, rooms);
    let mut ctx = ConnectContext::new(grid, rooms, mazes, owners, points);

    ctx.seed(rng);
    while let Some(point) = ctx.pick_frontier_point(rng) {
        ctx.open(point);
    }
    ctx.finish()
}

/// Map every cell to the region that owns it, rejecting malformed input.
fn index_regions(
    grid: &Grid,
    rooms: &[Room],
    mazes: &[Maze],
) -> Result<Vec<Option<RegionId>>, ConnectError> {
    let mut owners: Vec<Option<RegionId>> = vec![None; grid.area()];

    let regions = rooms
        .iter()
        .enumerate()
        .map(|(i, r)| (RegionId::Room(i), r.cells()))
        .chain(
            mazes
                .iter()
                .enumerate()
                .map(|(i, m)| (RegionId::Maze(i), m.cells())),
        );

    for (id, cells) in regions {
        // Sorted so the reported cell does not depend on hash order
        let mut cells: Vec<Position> = cells.iter().copied().collect();
        cells.sort_by_key(|p| (p.y, p.x));

        for position in cells {
            let Some(i) = grid.index(position) else {
                return Err(ConnectError::RegionOutOfBounds {
                    region: id,
                    position,
                });
            };
            if grid.cell_type(position) != Some(CellType::Floor) {
                return Err(ConnectError::RegionNotFloor {
                    region: id,
                    position,
                });
            }
            if let Some(first) = owners[i] {
                return Err(ConnectError::OverlappingRegions {
                    first,
                    second: id,
                    position,
                });
            }
            owners[i] = Some(id);
        }
    }

    for (i, owner) in owners.iter().enumerate() {
        let Some(first) = *owner else {
            continue;
        };
        let position = grid.position_of(i);
        for next in [position.step(Direction::Right), position.step(Direction::Down)] {
            if let Some(second) = grid.index(next).and_then(|j| owners[j]) {
                if second != first {
                    return Err(ConnectError::TouchingRegions {
                        first,
                        second,
                        position,
                    });
                }
            }
        }
    }

    Ok(owners)
}

/// All state of one connect run. Built on entry, dropped on every exit path.
struct ConnectContext<'a> {
    grid: &'a mut Grid,
    rooms: &'a [Room],
    mazes: &'a [Maze],
    owners: Vec<Option<RegionId>>,
    points: ConnectionPointSet,
    zone: MainZone,
    merged_rooms: Vec<bool>,
    merged_mazes: Vec<bool>,
    report: ConnectReport,
}

impl<'a> ConnectContext<'a> {
    fn new(
        grid: &'a mut Grid,
        rooms: &'a [Room],
        mazes: &'a [Maze],
        owners: Vec<Option<RegionId>>,
        points: ConnectionPointSet,
    ) -> Self {
        let zone = MainZone::new(grid);
        let report = ConnectReport {
            spawned_points: points.len(),
            ..Default::default()
        };
        Self {
            grid,
            rooms,
            mazes,
            owners,
            points,
            zone,
            merged_rooms: vec![false; rooms.len()],
            merged_mazes: vec![false; mazes.len()],
            report,
        }
    }

    fn owner(&self, pos: Position) -> Option<RegionId> {
        self.grid.index(pos).and_then(|i| self.owners[i])
    }

    /// Start the main zone from a random room
    fn seed(&mut self, rng: &mut impl RandomSource) {
        let id = RegionId::Room(pick_index(rng, self.rooms.len()));
        log::debug!("growing main zone from {id}");
        self.report.seed = Some(id);
        self.merge(id);
    }

    /// Connection points next to the main zone, row-major, picked uniformly
    fn pick_frontier_point(&self, rng: &mut impl RandomSource) -> Option<Position> {
        let frontier: Vec<Position> = self
            .points
            .iter()
            .filter(|&p| self.zone.touches(p))
            .collect();
        if frontier.is_empty() {
            return None;
        }
        Some(frontier[pick_index(rng, frontier.len())])
    }

    /// Dig through `point` and absorb what lies beyond it
    fn open(&mut self, point: Position) {
        let Some((from, direction, distance)) = self.find_passage(point) else {
            // Every main-zone neighbour walks off the map or into solid rock
            log::debug!("abandoning connection point at {point}: no floor in line");
            self.points.remove(point);
            self.report.abandoned_points += 1;
            self.record_iteration();
            return;
        };

        for step in 1..distance {
            let pos = from.offset(direction, step);
            if self.grid.cell_type(pos) == Some(CellType::Wall) {
                self.grid.set_cell_type(pos, CellType::Floor);
                self.report.carved.push(pos);
            }
            self.points.remove(pos);
            self.zone.insert(pos);
        }
        let end = from.offset(direction, distance);
        log::trace!("opened {from} -> {end} through {point}");

        match self.owner(end) {
            Some(RegionId::Room(i)) => {
                self.merge(RegionId::Room(i));
                self.retire(i);
            }
            Some(RegionId::Maze(i)) => {
                self.merge(RegionId::Maze(i));
                if let Some(RegionId::Room(origin)) = self.owner(from) {
                    self.retire(origin);
                }
            }
            None => {
                // A passage opened earlier; it is already main zone
                self.zone.insert(end);
            }
        }
        self.record_iteration();
    }

    /// The first main-zone neighbour of `point`, in Up/Right/Down/Left order,
    /// whose straight walk through `point` reaches floor. Returns that
    /// neighbour, the walk direction, and the step count to the floor.
    fn find_passage(&self, point: Position) -> Option<(Position, Direction, i32)> {
        // A neighbour whose walk leaves the map or hits rock does not end the
        // search; the next main-zone neighbour in order gets its turn.
        Direction::ALL.into_iter().find_map(|side| {
            let from = point.step(side);
            if !self.zone.contains(from) {
                return None;
            }
            let direction = side.opposite();
            first_floor(self.grid, from, direction).map(|distance| (from, direction, distance))
        })
    }

    fn merge(&mut self, id: RegionId) {
        let (added, newly) = match id {
            RegionId::Room(i) => {
                let newly = !std::mem::replace(&mut self.merged_rooms[i], true);
                (self.zone.merge(&self.rooms[i]), newly)
            }
            RegionId::Maze(i) => {
                let newly = !std::mem::replace(&mut self.merged_mazes[i], true);
                (self.zone.merge(&self.mazes[i]), newly)
            }
        };
        if newly {
            log::debug!("merged {id} ({added} cells), main zone now {}", self.zone.len());
            self.report.merged.push(id);
        }
    }

    fn retire(&mut self, room: usize) {
        let cleared =
            retire_room_points(self.grid, &mut self.points, &self.zone, &self.rooms[room]);
        if cleared > 0 {
            log::trace!("retired {cleared} connection points around room #{room}");
        }
        self.report.retired_points += cleared;
    }

    fn record_iteration(&mut self) {
        self.report.zone_sizes.push(self.zone.len());
        self.report.points_left.push(self.points.len());
    }

    fn finish(self) -> Result<ConnectReport, ConnectError> {
        let unmerged = |flags: &[bool]| -> Vec<usize> {
            flags
                .iter()
                .enumerate()
                .filter(|&(_, &merged)| !merged)
                .map(|(i, _)| i)
                .collect()
        };
        let rooms = unmerged(self.merged_rooms.as_slice());
        let mazes = unmerged(self.merged_mazes.as_slice());

        if rooms.is_empty() && mazes.is_empty() {
            log::debug!(
                "connected {} regions in {} iterations, carved {} cells",
                self.report.merged.len(),
                self.report.iterations(),
                self.report.carved.len()
            );
            Ok(self.report)
        } else {
            log::warn!("unreachable regions: rooms {rooms:?}, mazes {mazes:?}");
            Err(ConnectError::Unreachable {
                rooms,
                mazes,
                report: Box::new(self.report),
            })
        }
    }
}

/// Steps from `from` to the first floor cell in `direction`, if one lies
/// within [`MAX_PROBE_STEPS`] and inside the grid.
pub(crate) fn first_floor(grid: &Grid, from: Position, direction: Direction) -> Option<i32> {
    for step in 1..=MAX_PROBE_STEPS {
        match grid.cell_type(from.offset(direction, step))? {
            CellType::Floor => return Some(step),
            CellType::Wall => {}
        }
    }
    None
}
