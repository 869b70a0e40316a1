//! The immutable station graph.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use crate::domain::{Coordinates, Station, StationId};

use super::error::DataError;
use super::source::StationRecord;

/// How neighbor lists are interpreted when the graph is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgePolicy {
    /// Edges are exactly as recorded; `a -> b` does not imply `b -> a`.
    #[default]
    AsStored,

    /// Every edge `a -> b` gets a matching `b -> a`, appended after `b`'s
    /// recorded neighbors so stored order still decides tie-breaks.
    Symmetrize,
}

/// All stations and their adjacency.
///
/// Built once at startup and never mutated. Every neighbor id is
/// guaranteed to name a station in the graph; adjacency is also kept as
/// dense indices so traversals avoid string hashing.
#[derive(Debug, Clone)]
pub struct StationGraph {
    stations: Vec<Station>,
    index: HashMap<StationId, usize>,
    adjacency: Vec<Vec<usize>>,
}

impl StationGraph {
    /// Load and validate the dataset at `path`.
    pub fn load(path: impl AsRef<Path>, policy: EdgePolicy) -> Result<Self, DataError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let graph = Self::from_json(&contents, policy)?;
        info!(
            path = %path.display(),
            stations = graph.len(),
            edges = graph.edge_count(),
            ?policy,
            "Loaded station graph"
        );
        Ok(graph)
    }

    /// Parse and validate a JSON array of station records.
    pub fn from_json(json: &str, policy: EdgePolicy) -> Result<Self, DataError> {
        let records: Vec<StationRecord> =
            serde_json::from_str(json).map_err(|e| DataError::Json {
                message: e.to_string(),
            })?;
        Self::from_records(records, policy)
    }

    /// Validate raw records and build the graph.
    ///
    /// Fails on an empty dataset, invalid ids, duplicate ids, bad
    /// coordinates and neighbor ids that name no station.
    pub fn from_records(records: Vec<StationRecord>, policy: EdgePolicy) -> Result<Self, DataError> {
        if records.is_empty() {
            return Err(DataError::Empty);
        }

        let mut index = HashMap::with_capacity(records.len());
        let mut ids = Vec::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            let id = StationId::parse(&record.id)
                .map_err(|source| DataError::InvalidId { index: i, source })?;
            if index.insert(id.clone(), i).is_some() {
                return Err(DataError::DuplicateStation(id));
            }
            ids.push(id);
        }

        let mut stations = Vec::with_capacity(records.len());
        let mut adjacency = Vec::with_capacity(records.len());
        for (record, id) in records.into_iter().zip(ids) {
            let coordinates = Coordinates::new(record.lat, record.lng).map_err(|source| {
                DataError::InvalidCoordinates {
                    station: id.clone(),
                    source,
                }
            })?;

            let mut neighbors = Vec::with_capacity(record.neighbors.len());
            let mut neighbor_idx = Vec::with_capacity(record.neighbors.len());
            for neighbor in record.neighbors {
                let Some((neighbor_id, &idx)) = index.get_key_value(neighbor.as_str()) else {
                    return Err(DataError::UnknownNeighbor {
                        station: id,
                        neighbor,
                    });
                };
                neighbors.push(neighbor_id.clone());
                neighbor_idx.push(idx);
            }

            stations.push(Station::new(id, record.name, coordinates, neighbors));
            adjacency.push(neighbor_idx);
        }

        let mut graph = Self {
            stations,
            index,
            adjacency,
        };

        if policy == EdgePolicy::Symmetrize {
            let added = graph.symmetrize();
            debug!(added, "Symmetrized station adjacency");
        }

        Ok(graph)
    }

    /// Build a graph from already-constructed stations.
    pub fn from_stations(stations: Vec<Station>, policy: EdgePolicy) -> Result<Self, DataError> {
        let records = stations
            .into_iter()
            .map(|s| StationRecord {
                id: s.id.as_str().to_string(),
                name: s.name,
                lat: s.coordinates.lat(),
                lng: s.coordinates.lng(),
                neighbors: s.neighbors.iter().map(|n| n.as_str().to_string()).collect(),
            })
            .collect();
        Self::from_records(records, policy)
    }

    /// Add the reverse of every one-way edge. Returns the number of edges added.
    fn symmetrize(&mut self) -> usize {
        let mut added = 0;
        for from in 0..self.adjacency.len() {
            for k in 0..self.adjacency[from].len() {
                let to = self.adjacency[from][k];
                if !self.adjacency[to].contains(&from) {
                    self.adjacency[to].push(from);
                    let from_id = self.stations[from].id.clone();
                    self.stations[to].neighbors.push(from_id);
                    added += 1;
                }
            }
        }
        added
    }

    /// Look up a station by its exact id.
    pub fn get(&self, id: &str) -> Option<&Station> {
        self.index.get(id).map(|&i| &self.stations[i])
    }

    /// All stations, in dataset order.
    pub fn all(&self) -> &[Station] {
        &self.stations
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Always false for a successfully loaded graph.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn station_at(&self, idx: usize) -> &Station {
        &self.stations[idx]
    }

    pub(crate) fn neighbors_of(&self, idx: usize) -> &[usize] {
        &self.adjacency[idx]
    }
}
