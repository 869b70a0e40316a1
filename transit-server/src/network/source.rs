//! Raw station records as they appear in the dataset file.

use serde::{Deserialize, Serialize};

/// A station record before validation.
///
/// Accepts both the English field names and the Portuguese ones used by
/// legacy `estacoes.json` files.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StationRecord {
    pub id: String,
    #[serde(alias = "nome")]
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(alias = "vizinhos")]
    pub neighbors: Vec<String>,
}

impl StationRecord {
    /// Create a record (mainly for building fixtures).
    pub fn new(id: &str, name: &str, lat: f64, lng: f64, neighbors: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            lat,
            lng,
            neighbors: neighbors.iter().map(|n| (*n).to_string()).collect(),
        }
    }
}
