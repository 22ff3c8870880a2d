//! Retiring connection points made redundant by a merge
//!
//! Once a room is in the main zone, any run of points leading from its edge
//! straight to main-zone floor would only open a second door between cells
//! that are already connected. Those runs are cleared. Runs that end on
//! wall, or on floor not yet merged, are left alone; a run ending on wall may
//! never be picked again.

use crate::consts::MAX_PROBE_STEPS;
use crate::map::{Direction, Grid, Position};
use crate::region::Room;

use super::{ConnectionPointSet, MainZone};

/// Clear redundant points around `room`. Returns the number cleared.
pub fn retire_room_points(
    grid: &Grid,
    points: &mut ConnectionPointSet,
    zone: &MainZone,
    room: &Room,
) -> usize {
    room.boundary_probes()
        .map(|(edge, direction)| retire_run(grid, points, zone, edge, direction))
        .sum()
}

/// Walk the run of points starting one step out from `edge`.
fn retire_run(
    grid: &Grid,
    points: &mut ConnectionPointSet,
    zone: &MainZone,
    edge: Position,
    direction: Direction,
) -> usize {
    for step in 1..=MAX_PROBE_STEPS {
        let pos = edge.offset(direction, step);
        if points.contains(pos) {
            continue;
        }
        if grid.is_floor(pos) && zone.contains(pos) {
            return (1..step)
                .filter(|&s| points.remove(edge.offset(direction, s)))
                .count();
        }
        return 0;
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connect::spawn_connection_points;

    fn setup(text: &str, rooms: &[Room]) -> (Grid, ConnectionPointSet, MainZone) {
        let grid = Grid::from_ascii(text).unwrap();
        let points = spawn_connection_points(&grid, rooms);
        let zone = MainZone::new(&grid);
        (grid, points, zone)
    }

    #[test]
    fn test_clears_run_into_main_zone() {
        let rooms = [Room::rect(0, 0, 2, 1), Room::rect(4, 0, 2, 1)];
        let (grid, mut points, mut zone) = setup("..##..", &rooms);
        assert_eq!(points.len(), 2);

        zone.merge(&rooms[0]);
        zone.merge(&rooms[1]);
        assert_eq!(retire_room_points(&grid, &mut points, &zone, &rooms[1]), 2);
        assert!(points.is_empty());
    }

    #[test]
    fn test_keeps_run_into_undiscovered_floor() {
        let rooms = [Room::rect(0, 0, 2, 1), Room::rect(4, 0, 2, 1)];
        let (grid, mut points, mut zone) = setup("..##..", &rooms);

        zone.merge(&rooms[1]);
        assert_eq!(retire_room_points(&grid, &mut points, &zone, &rooms[1]), 0);
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn test_keeps_run_ending_in_wall() {
        let rooms = [Room::rect(0, 0, 2, 1)];
        let (grid, mut points, mut zone) = setup("..##.", &rooms);
        assert_eq!(points.len(), 2);

        // Fill the far floor back in so the run now dead-ends
        let mut walled = grid.clone();
        walled.set_cell_type(Position::new(4, 0), crate::map::CellType::Wall);
        zone.merge(&rooms[0]);
        assert_eq!(retire_room_points(&walled, &mut points, &zone, &rooms[0]), 0);
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn test_no_run_no_change() {
        let rooms = [Room::rect(0, 0, 2, 1)];
        let (grid, mut points, mut zone) = setup("..###", &rooms);
        zone.merge(&rooms[0]);
        assert_eq!(retire_room_points(&grid, &mut points, &zone, &rooms[0]), 0);
        assert!(points.is_empty());
    }
}
