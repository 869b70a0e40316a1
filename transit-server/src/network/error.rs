//! Station dataset error types.

use std::path::PathBuf;

use crate::domain::{InvalidCoordinates, InvalidStationId, StationId};

/// Errors raised while loading the station dataset.
///
/// Any of these is fatal at startup: the server refuses to run on a
/// malformed or referentially inconsistent graph.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// The dataset file could not be read
    #[error("failed to read station data from {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The dataset is not a sequence of well-formed station records
    #[error("malformed station data: {message}")]
    Json { message: String },

    /// The dataset contains no stations
    #[error("station dataset is empty")]
    Empty,

    /// A record carries an unusable id
    #[error("station record {index}: {source}")]
    InvalidId {
        index: usize,
        source: InvalidStationId,
    },

    /// Two records share the same id
    #[error("duplicate station id {0}")]
    DuplicateStation(StationId),

    /// A neighbor list references a station that does not exist
    #[error("station {station} lists unknown neighbor {neighbor:?}")]
    UnknownNeighbor { station: StationId, neighbor: String },

    /// A record carries unusable coordinates
    #[error("station {station}: {source}")]
    InvalidCoordinates {
        station: StationId,
        source: InvalidCoordinates,
    },
}
