//! Route planning over the station graph.
//!
//! This module answers: "which stations do I pass through to get from
//! here to there with the fewest hops?"
//!
//! The search is a breadth-first search over station adjacency. It is
//! pure and synchronous, and only reads the immutable graph, so it can
//! run on any worker without coordination.

mod bfs;
mod service;

pub use bfs::find_path;
pub use service::{Endpoint, Itinerary, RouteError, RouteService, Stop};
