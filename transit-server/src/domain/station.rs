//! Station identity, position and adjacency types.

use std::borrow::Borrow;
use std::fmt;

/// Error returned when parsing an invalid station id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id {value:?}: {reason}")]
pub struct InvalidStationId {
    value: String,
    reason: &'static str,
}

/// The canonical, exact-match identifier of a station.
///
/// Ids are compared verbatim: they are never case-folded or
/// accent-normalized, unlike station names.
///
/// # Examples
///
/// ```
/// use transit_server::domain::StationId;
///
/// let se = StationId::parse("L1-SE").unwrap();
/// assert_eq!(se.as_str(), "L1-SE");
///
/// // Ids are case-sensitive
/// assert_ne!(se, StationId::parse("l1-se").unwrap());
///
/// // Blank ids and ids containing whitespace are rejected
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("L1 SE").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(String);

impl StationId {
    /// Parse a station id.
    ///
    /// The input must be non-empty and must not contain whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        if s.is_empty() {
            return Err(InvalidStationId {
                value: s.to_string(),
                reason: "must not be empty",
            });
        }

        if s.chars().any(char::is_whitespace) {
            return Err(InvalidStationId {
                value: s.to_string(),
                reason: "must not contain whitespace",
            });
        }

        Ok(StationId(s.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for StationId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned when coordinates are not a valid WGS84 position.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinates ({lat}, {lng}): {reason}")]
pub struct InvalidCoordinates {
    pub lat: f64,
    pub lng: f64,
    reason: &'static str,
}

/// A WGS84 latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    lat: f64,
    lng: f64,
}

impl Coordinates {
    /// Create coordinates, rejecting non-finite or out-of-range values.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoordinates> {
        let reason = if !lat.is_finite() || !lng.is_finite() {
            Some("must be finite numbers")
        } else if !(-90.0..=90.0).contains(&lat) {
            Some("latitude must be within [-90, 90]")
        } else if !(-180.0..=180.0).contains(&lng) {
            Some("longitude must be within [-180, 180]")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(InvalidCoordinates { lat, lng, reason }),
            None => Ok(Coordinates { lat, lng }),
        }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

/// A node of the transit graph.
///
/// `neighbors` keeps the order recorded in the dataset; route tie-breaking
/// depends on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub coordinates: Coordinates,
    pub neighbors: Vec<StationId>,
}

impl Station {
    /// Create a new station.
    pub fn new(
        id: StationId,
        name: impl Into<String>,
        coordinates: Coordinates,
        neighbors: Vec<StationId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            coordinates,
            neighbors,
        }
    }
}
