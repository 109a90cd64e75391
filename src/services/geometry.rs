use tracing::warn;

use super::road_network::RoadNetwork;

/// Storage format tag for a route geometry blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    /// Polyline-encoded path from the national transit data provider.
    Entur,
    /// Plain (lat, lon) coordinate sequence.
    Ferry,
    /// Road-network node ids, resolved through the snapshot.
    Osm,
}

#[derive(Debug, thiserror::Error)]
enum DecodeError {
    #[error("blob decode failed: {0}")]
    Blob(#[from] bincode::Error),
    #[error("polyline decode failed: {0}")]
    Polyline(String),
}

/// Decodes a stored geometry blob into an ordered (lat, lon) sequence.
///
/// Absent blobs, deserialization failures, and format-specific decoding
/// failures all yield an empty sequence; callers never see an error from
/// here. Failures are logged at `warn`.
pub fn decode(blob: Option<&[u8]>, kind: GeometryKind, network: &RoadNetwork) -> Vec<(f64, f64)> {
    let Some(blob) = blob else {
        return Vec::new();
    };
    if blob.is_empty() {
        return Vec::new();
    }
    match try_decode(blob, kind, network) {
        Ok(coords) => coords,
        Err(err) => {
            warn!(?kind, %err, "failed to decode route geometry");
            Vec::new()
        }
    }
}

fn try_decode(
    blob: &[u8],
    kind: GeometryKind,
    network: &RoadNetwork,
) -> Result<Vec<(f64, f64)>, DecodeError> {
    match kind {
        GeometryKind::Entur => {
            let encoded: String = bincode::deserialize(blob)?;
            let line = polyline::decode_polyline(&encoded, 5)
                .map_err(|e| DecodeError::Polyline(e.to_string()))?;
            Ok(line.into_iter().map(|c| (c.y, c.x)).collect())
        }
        GeometryKind::Ferry => Ok(bincode::deserialize::<Vec<(f64, f64)>>(blob)?),
        GeometryKind::Osm => {
            let node_ids: Vec<i64> = bincode::deserialize(blob)?;
            // Node ids missing from the snapshot are dropped, not errors.
            Ok(node_ids
                .into_iter()
                .filter_map(|n| network.coords(n))
                .collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::road_network::NetworkNode;

    // Decodes (precision 5) to (38.5, -120.2), (40.7, -120.95), (43.252, -126.453).
    const ENCODED_PATH: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    #[test]
    fn test_entur_blob_decodes_to_lat_lon_pairs() {
        let blob = bincode::serialize(&ENCODED_PATH.to_string()).unwrap();
        let coords = decode(Some(&blob), GeometryKind::Entur, &RoadNetwork::empty());

        assert_eq!(coords.len(), 3);
        assert!((coords[0].0 - 38.5).abs() < 1e-6);
        assert!((coords[0].1 - -120.2).abs() < 1e-6);
    }

    #[test]
    fn test_ferry_blob_is_used_verbatim() {
        let path = vec![(60.39, 5.32), (60.42, 5.10)];
        let blob = bincode::serialize(&path).unwrap();
        let coords = decode(Some(&blob), GeometryKind::Ferry, &RoadNetwork::empty());
        assert_eq!(coords, path);
    }

    #[test]
    fn test_osm_blob_resolves_known_nodes_and_drops_unknown() {
        let network = RoadNetwork::from_nodes(vec![
            NetworkNode {
                id: 1,
                lat: 60.0,
                lon: 5.0,
            },
            NetworkNode {
                id: 3,
                lat: 61.0,
                lon: 6.0,
            },
        ]);
        let blob = bincode::serialize(&vec![1i64, 2, 3]).unwrap();
        let coords = decode(Some(&blob), GeometryKind::Osm, &network);
        assert_eq!(coords, vec![(60.0, 5.0), (61.0, 6.0)]);
    }

    #[test]
    fn test_absent_blob_is_empty() {
        assert!(decode(None, GeometryKind::Entur, &RoadNetwork::empty()).is_empty());
        assert!(decode(Some(&[][..]), GeometryKind::Ferry, &RoadNetwork::empty()).is_empty());
    }

    #[test]
    fn test_malformed_blob_is_empty_for_every_kind() {
        let garbage: &[u8] = b"\xff\xff\xff\xff garbage";
        for kind in [GeometryKind::Entur, GeometryKind::Ferry, GeometryKind::Osm] {
            let coords = decode(Some(garbage), kind, &RoadNetwork::empty());
            assert!(coords.is_empty(), "{kind:?} should decode to empty");
        }
    }

    #[test]
    fn test_wrong_payload_type_is_empty() {
        // A ferry payload fed through the entur decoder must not panic.
        let blob = bincode::serialize(&vec![(60.39, 5.32)]).unwrap();
        assert!(decode(Some(&blob), GeometryKind::Entur, &RoadNetwork::empty()).is_empty());
    }
}
