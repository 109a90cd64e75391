use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;
use thiserror::Error;

use crate::db;
use crate::models::RouteRow;
use crate::services::geometry::{self, GeometryKind};
use crate::services::map_view::{MapPolyline, MapView, Marker};
use crate::state::AppState;

/// Failures that degrade to an inline HTML fragment instead of an HTTP
/// error; the map pages never hard-fail for the caller.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("No cluster data found.")]
    NoClusters,

    #[error("No coordinates found for cluster {0}.")]
    UnknownCluster(i64),

    #[error("Could not load map: {0}")]
    Db(#[from] sqlx::Error),
}

fn degrade(result: Result<String, MapError>) -> Html<String> {
    match result {
        Ok(page) => Html(page),
        Err(err) => Html(format!("<p>{err}</p>")),
    }
}

#[derive(Debug, Deserialize)]
pub struct RoutesQuery {
    #[serde(default = "default_start_cluster")]
    pub start_cluster: i64,
}

fn default_start_cluster() -> i64 {
    1
}

// Handlers

/// Overview map of every cluster
pub async fn cluster_map(State(state): State<AppState>) -> Html<String> {
    degrade(render_cluster_map(&state).await)
}

/// Map of optimized routes leaving one cluster
pub async fn optimized_routes_from_cluster(
    State(state): State<AppState>,
    Query(params): Query<RoutesQuery>,
) -> Html<String> {
    degrade(render_routes_map(&state, params.start_cluster).await)
}

// Rendering

async fn render_cluster_map(state: &AppState) -> Result<String, MapError> {
    let clusters = db::transit::all_clusters(&state.transit).await?;
    if clusters.is_empty() {
        return Err(MapError::NoClusters);
    }

    let avg_lat = clusters.iter().map(|c| c.latitude).sum::<f64>() / clusters.len() as f64;
    let avg_lon = clusters.iter().map(|c| c.longitude).sum::<f64>() / clusters.len() as f64;

    let mut map = MapView::new((avg_lat, avg_lon), 11);
    for cluster in &clusters {
        map.add_marker(Marker {
            lat: cluster.latitude,
            lon: cluster.longitude,
            popup: format!("{} (ID: {})", cluster.cluster_name, cluster.cluster_id),
            tooltip: Some(cluster.cluster_name.clone()),
            color: "blue",
        });
    }

    Ok(map.render())
}

async fn render_routes_map(state: &AppState, start_cluster: i64) -> Result<String, MapError> {
    let (start_lat, start_lon) = db::transit::cluster_coords(&state.transit, start_cluster)
        .await?
        .ok_or(MapError::UnknownCluster(start_cluster))?;

    let mut map = MapView::new((start_lat, start_lon), 9);
    map.add_marker(Marker {
        lat: start_lat,
        lon: start_lon,
        popup: format!("Start Cluster {start_cluster}"),
        tooltip: None,
        color: "green",
    });

    let rows = db::transit::routes_from_cluster(&state.transit, start_cluster).await?;
    for row in &rows {
        if let Some((lat, lon)) = db::transit::cluster_coords(&state.transit, row.end_cluster_id).await? {
            map.add_marker(Marker {
                lat,
                lon,
                popup: format!("End Cluster {}", row.end_cluster_id),
                tooltip: None,
                color: "red",
            });
        }

        draw_route_legs(state, &mut map, row).await?;
    }

    Ok(map.render())
}

/// Draws the legs of one optimized route: bus to the quay, ferry crossing,
/// bus from the quay, or a direct bus when the row has no quay legs.
async fn draw_route_legs(
    state: &AppState,
    map: &mut MapView,
    row: &RouteRow,
) -> Result<(), MapError> {
    if let Some(route_id) = row.start_route_id {
        let popup = format!("To quay {}", row.start_quay_id.as_deref().unwrap_or("?"));
        draw_bus_leg(state, map, route_id, "blue", popup).await?;
    }

    if let (Some(start_quay), Some(end_quay)) = (&row.start_quay_id, &row.end_quay_id) {
        if let Some(leg) = db::transit::ferry_leg(&state.transit, start_quay, end_quay).await? {
            let coords = geometry::decode(
                leg.ferry_route.as_deref(),
                GeometryKind::Ferry,
                &state.road_network,
            );
            map.add_polyline(MapPolyline {
                coords,
                color: "purple",
                popup: format!("Ferry {start_quay} to {end_quay}"),
            });
        }
    }

    if let Some(route_id) = row.end_route_id {
        let popup = format!("From quay to cluster {}", row.end_cluster_id);
        draw_bus_leg(state, map, route_id, "blue", popup).await?;
    }

    if row.is_direct() {
        if let Some(leg) =
            db::transit::direct_bus_leg(&state.transit, row.start_cluster_id, row.end_cluster_id)
                .await?
        {
            if let Some((blob, kind)) = leg.geometry() {
                let coords = geometry::decode(Some(blob), kind, &state.road_network);
                map.add_polyline(MapPolyline {
                    coords,
                    color: "green",
                    popup: format!(
                        "Direct bus {} to {}",
                        row.start_cluster_id, row.end_cluster_id
                    ),
                });
            }
        }
    }

    Ok(())
}

async fn draw_bus_leg(
    state: &AppState,
    map: &mut MapView,
    route_id: i64,
    color: &'static str,
    popup: String,
) -> Result<(), MapError> {
    let Some(leg) = db::transit::bus_leg(&state.transit, route_id).await? else {
        return Ok(());
    };
    if let Some((blob, kind)) = leg.geometry() {
        let coords = geometry::decode(Some(blob), kind, &state.road_network);
        map.add_polyline(MapPolyline {
            coords,
            color,
            popup,
        });
    }
    Ok(())
}
