//! mw-core: joins pre-generated rooms and mazes into one traversable map
//!
//! Rooms and mazes arrive already carved into a [`map::Grid`] and separated
//! from each other by at most two layers of wall. [`connect::connect`] finds
//! candidate doors around every room, then grows a main zone outward from a
//! random room, opening one door at a time until every region is reachable.
//!
//! The crate does no I/O besides optional config file loading and never
//! installs a logger; diagnostics go through the [`log`] facade.

pub mod connect;
pub mod map;
pub mod region;

mod consts;
mod error;
mod options;
mod rng;

pub use connect::{connect, ConnectReport};
pub use consts::*;
pub use error::{ConnectError, OptionsError};
pub use options::ConnectorOptions;
pub use rng::{GameRng, RandomSource};
