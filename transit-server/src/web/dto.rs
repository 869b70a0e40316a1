//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::accounts::{Favorite, HistoryEntry, User};
use crate::domain::Station;
use crate::planner::{Itinerary, Stop};

/// Query for a route between two stations.
///
/// Both ends are free text: a station name (any case, accents optional)
/// or an exact station id.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Origin station name or id
    #[serde(alias = "origin")]
    pub orig: Option<String>,

    /// Destination station name or id
    #[serde(alias = "destination")]
    pub dest: Option<String>,
}

/// A stop on a route.
#[derive(Debug, Serialize)]
pub struct StopResult {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// Response for a route query.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    /// Origin station display name
    pub origin: String,

    /// Destination station display name
    pub destination: String,

    /// Number of stations on the route, both ends included
    pub station_count: usize,

    /// Stops in travel order
    pub path: Vec<StopResult>,
}

/// Query for the station search.
#[derive(Debug, Deserialize)]
pub struct StationSearchRequest {
    /// Search text (name fragment)
    #[serde(default)]
    pub q: String,

    /// Maximum number of results
    pub limit: Option<usize>,
}

/// A station in listings.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub neighbors: Vec<String>,
}

/// Response for station listings and searches.
#[derive(Debug, Serialize)]
pub struct StationListResponse {
    pub stations: Vec<StationResult>,
}

/// Response for the next user id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextIdResponse {
    pub next_id: u64,
}

/// Request to register a user.
#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    #[serde(default, alias = "nome", alias = "username")]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default, alias = "senha")]
    pub password: String,
}

/// Request to log in.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,

    #[serde(default, alias = "senha")]
    pub password: String,
}

/// A user, without the password.
#[derive(Debug, Serialize)]
pub struct UserResult {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub balance: f64,
    pub history: Vec<HistoryEntry>,
    pub favorites: Vec<Favorite>,
}

/// Request to credit or debit a wallet.
#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    /// Amount in reais; must be positive
    #[serde(alias = "valor")]
    pub amount: Option<f64>,

    /// Optional history description (charges only)
    #[serde(alias = "descricao")]
    pub description: Option<String>,
}

/// Response for wallet operations.
#[derive(Debug, Serialize)]
pub struct WalletResponse {
    pub message: String,
    pub balance: f64,
    pub history: Vec<HistoryEntry>,
}

/// Request to pin a favorite station.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    #[serde(alias = "idEstacao")]
    pub station_id: String,

    #[serde(default, alias = "linha")]
    pub line: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl From<&Stop> for StopResult {
    fn from(stop: &Stop) -> Self {
        Self {
            id: stop.id.clone(),
            name: stop.name.clone(),
            lat: stop.lat,
            lng: stop.lng,
        }
    }
}

impl RouteResponse {
    /// Create from a planned itinerary.
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            origin: itinerary.origin.clone(),
            destination: itinerary.destination.clone(),
            station_count: itinerary.station_count(),
            path: itinerary.stops.iter().map(StopResult::from).collect(),
        }
    }
}

impl StationResult {
    /// Create from a domain Station.
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id.to_string(),
            name: station.name.clone(),
            lat: station.coordinates.lat(),
            lng: station.coordinates.lng(),
            neighbors: station.neighbors.iter().map(|n| n.to_string()).collect(),
        }
    }
}

impl UserResult {
    /// Create from a stored user, dropping the password.
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            balance: user.balance,
            history: user.history.clone(),
            favorites: user.favorites.clone(),
        }
    }
}

impl WalletResponse {
    /// Create from an updated user.
    pub fn from_user(message: &str, user: &User) -> Self {
        Self {
            message: message.to_string(),
            balance: user.balance,
            history: user.history.clone(),
        }
    }
}
