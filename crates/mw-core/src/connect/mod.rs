//! Connecting regions
//!
//! Spawn connection points around rooms, then grow a main zone from one room
//! until no connection point touches it.

mod grower;
mod points;
mod retire;
mod zone;

pub use grower::{connect, ConnectReport};
pub use points::{spawn_connection_points, ConnectionPointSet};
pub use retire::retire_room_points;
pub use zone::MainZone;
