//! Domain types for the transit companion service.
//!
//! These types represent validated station data. They enforce their
//! invariants at construction time, so code that receives them can trust
//! their validity.

mod station;

pub use station::{Coordinates, InvalidCoordinates, InvalidStationId, Station, StationId};
