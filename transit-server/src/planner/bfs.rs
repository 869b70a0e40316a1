//! Fewest-hops path search.
//!
//! A plain breadth-first search over the station adjacency. The frontier
//! holds whole partial paths and is strictly FIFO, so the first path that
//! reaches the destination has the minimum number of edges. Neighbors are
//! expanded in stored order, which makes tie-breaking between equally
//! short paths reproducible: the first-discovered path wins.

use std::collections::{HashSet, VecDeque};

use tracing::trace;

use crate::domain::Station;
use crate::network::StationGraph;

/// Find a shortest (fewest-hops) path from `origin` to `destination`.
///
/// Returns the stations in travel order, both ends included. A path from
/// a station to itself is that single station. Returns `None` when either
/// id is unknown or no path exists.
pub fn find_path<'g>(
    graph: &'g StationGraph,
    origin: &str,
    destination: &str,
) -> Option<Vec<&'g Station>> {
    let start = graph.index_of(origin)?;
    let target = graph.index_of(destination)?;

    let mut frontier: VecDeque<Vec<usize>> = VecDeque::new();
    frontier.push_back(vec![start]);

    // Stations whose neighbors have been enqueued
    let mut visited: HashSet<usize> = HashSet::new();

    while let Some(path) = frontier.pop_front() {
        let Some(&current) = path.last() else {
            continue;
        };

        if current == target {
            trace!(origin, destination, hops = path.len() - 1, "Path found");
            return Some(path.into_iter().map(|i| graph.station_at(i)).collect());
        }

        if !visited.insert(current) {
            continue;
        }

        for &next in graph.neighbors_of(current) {
            if visited.contains(&next) {
                continue;
            }
            let mut extended = Vec::with_capacity(path.len() + 1);
            extended.extend_from_slice(&path);
            extended.push(next);
            frontier.push_back(extended);
        }
    }

    trace!(origin, destination, expanded = visited.len(), "No path");
    None
}
