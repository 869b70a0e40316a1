//! Route queries by station name.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::domain::Station;
use crate::network::{NameResolver, StationGraph};

use super::bfs::find_path;

/// Which end of a route query an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Origin,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Origin => f.write_str("origin"),
            Endpoint::Destination => f.write_str("destination"),
        }
    }
}

/// Error from a route query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// Origin or destination text is empty
    #[error("{0} station is required")]
    InvalidQuery(Endpoint),

    /// The text matches no station name or id
    #[error("{endpoint} station not found: {query}")]
    NotFound { endpoint: Endpoint, query: String },

    /// Both stations exist but are not connected
    #[error("no route from {origin} to {destination}")]
    NoRoute { origin: String, destination: String },
}

/// One stop of an itinerary.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl From<&Station> for Stop {
    fn from(station: &Station) -> Self {
        Self {
            id: station.id.to_string(),
            name: station.name.clone(),
            lat: station.coordinates.lat(),
            lng: station.coordinates.lng(),
        }
    }
}

/// A resolved route, origin to destination inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    /// Display name of the origin station
    pub origin: String,

    /// Display name of the destination station
    pub destination: String,

    /// Stops in travel order
    pub stops: Vec<Stop>,
}

impl Itinerary {
    /// Number of stations on the route, both ends included.
    pub fn station_count(&self) -> usize {
        self.stops.len()
    }

    /// Number of edges travelled.
    pub fn hops(&self) -> usize {
        self.stops.len().saturating_sub(1)
    }
}

/// Answers "how do I get from here to there" over the station graph.
///
/// Cheap to clone; the graph is shared.
#[derive(Debug, Clone)]
pub struct RouteService {
    graph: Arc<StationGraph>,
    names: Arc<NameResolver>,
}

impl RouteService {
    /// Create a service over `graph`, precomputing its name index.
    pub fn new(graph: Arc<StationGraph>) -> Self {
        let names = Arc::new(NameResolver::new(&graph));
        Self { graph, names }
    }

    /// The underlying graph.
    pub fn graph(&self) -> &StationGraph {
        &self.graph
    }

    /// The name index for the graph.
    pub fn names(&self) -> &NameResolver {
        &self.names
    }

    /// Resolve a single endpoint.
    pub fn resolve(&self, text: &str, endpoint: Endpoint) -> Result<&Station, RouteError> {
        if text.trim().is_empty() {
            return Err(RouteError::InvalidQuery(endpoint));
        }

        self.names.resolve(text, &self.graph).ok_or_else(|| {
            debug!(%endpoint, query = text, "Station not resolved");
            RouteError::NotFound {
                endpoint,
                query: text.to_string(),
            }
        })
    }

    /// Find the fewest-hops route between two stations given by name or id.
    pub fn route(&self, origin: &str, destination: &str) -> Result<Itinerary, RouteError> {
        let from = self.resolve(origin, Endpoint::Origin)?;
        let to = self.resolve(destination, Endpoint::Destination)?;

        let path = find_path(&self.graph, from.id.as_str(), to.id.as_str()).ok_or_else(|| {
            debug!(origin = %from.id, destination = %to.id, "No route");
            RouteError::NoRoute {
                origin: from.name.clone(),
                destination: to.name.clone(),
            }
        })?;

        let itinerary = Itinerary {
            origin: from.name.clone(),
            destination: to.name.clone(),
            stops: path.into_iter().map(Stop::from).collect(),
        };
        debug!(
            origin = %from.id,
            destination = %to.id,
            hops = itinerary.hops(),
            "Route found"
        );
        Ok(itinerary)
    }
}
