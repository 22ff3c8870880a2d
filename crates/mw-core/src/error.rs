//! Connector and configuration errors

use thiserror::Error;

use crate::connect::ConnectReport;
use crate::map::Position;
use crate::region::RegionId;

/// Why a connect run failed.
///
/// Input errors are detected before the grid is touched. [`ConnectError::Unreachable`]
/// is reported after the merge loop, so the grid then holds a partially
/// connected map. Its report says what was carved and merged before the
/// loop ran out of connection points.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectError {
    #[error("{} room(s) and {} maze(s) could not be reached: rooms {rooms:?}, mazes {mazes:?}", .rooms.len(), .mazes.len())]
    Unreachable {
        rooms: Vec<usize>,
        mazes: Vec<usize>,
        report: Box<ConnectReport>,
    },

    #[error("{region} has a cell outside the map at {position}")]
    RegionOutOfBounds { region: RegionId, position: Position },

    #[error("{region} has a cell at {position} that is not floor")]
    RegionNotFloor { region: RegionId, position: Position },

    #[error("{first} and {second} both claim the cell at {position}")]
    OverlappingRegions {
        first: RegionId,
        second: RegionId,
        position: Position,
    },

    #[error("{first} and {second} touch at {position} and should be one region")]
    TouchingRegions {
        first: RegionId,
        second: RegionId,
        position: Position,
    },
}

/// Options parsing error
#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Invalid value '{1}' for option '{0}'")]
    InvalidValue(String, String),

    #[error("Missing value for option '{0}'")]
    MissingValue(String),
}
