use serde::Serialize;
use sqlx::FromRow;

use crate::services::geometry::GeometryKind;

/// A named geographic grouping point used as a routing waypoint.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Cluster {
    pub cluster_id: i64,
    pub cluster_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// One optimized route from a start cluster to a reachable end cluster.
///
/// The quay/route columns are all optional; a row without any of them is
/// served by a direct bus route instead of bus-ferry-bus legs.
#[derive(Debug, Clone, FromRow)]
pub struct RouteRow {
    pub start_cluster_id: i64,
    pub end_cluster_id: i64,
    pub start_route_id: Option<i64>,
    pub start_quay_id: Option<String>,
    pub end_quay_id: Option<String>,
    pub end_route_id: Option<i64>,
}

impl RouteRow {
    pub fn is_direct(&self) -> bool {
        self.start_route_id.is_none()
            && self.end_route_id.is_none()
            && self.start_quay_id.is_none()
            && self.end_quay_id.is_none()
    }
}

/// Geometry columns of a bus leg or a direct bus route.
#[derive(Debug, Clone, FromRow)]
pub struct BusLegRow {
    pub route_entur: Option<Vec<u8>>,
    pub route: Option<Vec<u8>>,
}

impl BusLegRow {
    /// The blob to decode and its format tag. Entur geometry wins over the
    /// OSM fallback when both are present; empty blobs count as absent.
    pub fn geometry(&self) -> Option<(&[u8], GeometryKind)> {
        let entur = self.route_entur.as_deref().filter(|b| !b.is_empty());
        let osm = self.route.as_deref().filter(|b| !b.is_empty());
        entur
            .map(|b| (b, GeometryKind::Entur))
            .or(osm.map(|b| (b, GeometryKind::Osm)))
    }
}

/// Geometry column of a ferry leg between two quays.
#[derive(Debug, Clone, FromRow)]
pub struct FerryLegRow {
    pub ferry_route: Option<Vec<u8>>,
}
