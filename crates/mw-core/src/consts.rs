//! Connector constants

/// Furthest a probe walks outward from a room edge.
///
/// Regions are generated at most two wall layers apart, so a third step
/// either lands on floor or the probe is heading the wrong way.
pub const MAX_PROBE_STEPS: i32 = 3;

/// Text-format symbols used by [`crate::map::Grid::from_ascii`]
pub const WALL_SYM: char = '#';
pub const FLOOR_SYM: char = '.';
