use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// A single node of the precomputed road-network snapshot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NetworkNode {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
}

/// Node-id to coordinate lookup over the road network.
///
/// The snapshot file is compiled by the offline ingestion pipeline from the
/// full road graph. Only the coordinate table survives into the snapshot;
/// edges are never consulted at serving time. Loaded once at startup and
/// shared read-only for the process lifetime.
pub struct RoadNetwork {
    nodes: HashMap<i64, (f64, f64)>,
}

impl RoadNetwork {
    /// Loads a snapshot from disk.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("reading road network snapshot {}", path.display()))?;
        let nodes: Vec<NetworkNode> =
            bincode::deserialize(&bytes).context("decoding road network snapshot")?;
        Ok(Self::from_nodes(nodes))
    }

    /// Builds a network directly from node records.
    pub fn from_nodes(nodes: impl IntoIterator<Item = NetworkNode>) -> Self {
        Self {
            nodes: nodes
                .into_iter()
                .map(|n| (n.id, (n.lat, n.lon)))
                .collect(),
        }
    }

    /// A network with no nodes; every lookup misses.
    pub fn empty() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }

    /// Resolves a node id to its (lat, lon) coordinate.
    pub fn coords(&self, node: i64) -> Option<(f64, f64)> {
        self.nodes.get(&node).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
