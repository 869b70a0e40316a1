//! The station network: dataset loading, validation and name lookup.
//!
//! The graph is loaded once at startup from a JSON array of station
//! records and is read-only afterwards.

mod error;
mod graph;
mod names;
mod source;

pub use error::DataError;
pub use graph::{EdgePolicy, StationGraph};
pub use names::{NameResolver, normalize};
pub use source::StationRecord;
