//! Station name resolution.
//!
//! Users type station names the way they say them: without accents, in
//! any case. Names are folded to a search key (decomposed, combining
//! marks removed, lower-cased) and compared against the folded display
//! names. Ids are matched verbatim.

use unicode_normalization::UnicodeNormalization;

use crate::domain::Station;

use super::graph::StationGraph;

/// Fold a name to its search key.
///
/// Decomposes to NFD, drops combining diacritical marks (U+0300..U+036F)
/// and lower-cases. Whitespace is preserved.
///
/// ```
/// use transit_server::network::normalize;
///
/// assert_eq!(normalize("Sé"), "se");
/// assert_eq!(normalize("São Paulo"), "sao paulo");
/// ```
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect::<String>()
        .to_lowercase()
}

/// Maps user-supplied text to stations.
///
/// Holds the precomputed search keys for one graph; it must be used with
/// the graph it was built from.
#[derive(Debug, Clone)]
pub struct NameResolver {
    keys: Vec<String>,
}

impl NameResolver {
    /// Precompute search keys for every station in `graph`.
    pub fn new(graph: &StationGraph) -> Self {
        let keys = graph.all().iter().map(|s| normalize(&s.name)).collect();
        Self { keys }
    }

    /// Resolve `text` to a station by folded name or exact id.
    ///
    /// Blank input resolves to nothing. When several stations share a
    /// folded name, the first one in dataset order wins.
    pub fn resolve<'g>(&self, text: &str, graph: &'g StationGraph) -> Option<&'g Station> {
        if text.trim().is_empty() {
            return None;
        }

        let key = normalize(text);
        graph
            .all()
            .iter()
            .zip(&self.keys)
            .find(|(station, name_key)| **name_key == key || station.id.as_str() == text)
            .map(|(station, _)| station)
    }

    /// Stations whose folded name contains the folded `query`.
    ///
    /// Prefix matches come first, then other matches; each group keeps
    /// dataset order. Blank queries match nothing.
    pub fn search<'g>(&self, query: &str, limit: usize, graph: &'g StationGraph) -> Vec<&'g Station> {
        let query = query.trim();
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let key = normalize(query);
        let mut prefix = Vec::new();
        let mut contains = Vec::new();
        for (station, name_key) in graph.all().iter().zip(&self.keys) {
            if name_key.starts_with(&key) {
                prefix.push(station);
            } else if name_key.contains(&key) {
                contains.push(station);
            }
        }

        prefix.into_iter().chain(contains).take(limit).collect()
    }
}
