use sqlx::SqlitePool;

use crate::models::{BusLegRow, Cluster, FerryLegRow, RouteRow};

/// All clusters, for the overview map.
pub async fn all_clusters(pool: &SqlitePool) -> sqlx::Result<Vec<Cluster>> {
    sqlx::query_as("SELECT cluster_id, cluster_name, latitude, longitude FROM clusters")
        .fetch_all(pool)
        .await
}

/// Coordinates of one cluster, if it exists.
pub async fn cluster_coords(pool: &SqlitePool, cluster_id: i64) -> sqlx::Result<Option<(f64, f64)>> {
    sqlx::query_as("SELECT latitude, longitude FROM clusters WHERE cluster_id = ?1")
        .bind(cluster_id)
        .fetch_optional(pool)
        .await
}

/// Every optimized route leaving the given start cluster.
pub async fn routes_from_cluster(pool: &SqlitePool, start_cluster: i64) -> sqlx::Result<Vec<RouteRow>> {
    sqlx::query_as(
        "SELECT start_cluster_id, end_cluster_id, start_route_id, \
                start_quay_id, end_quay_id, end_route_id \
         FROM optimized_routes_limited_quays WHERE start_cluster_id = ?1",
    )
    .bind(start_cluster)
    .fetch_all(pool)
    .await
}

/// Geometry of a bus leg between a cluster and a quay.
pub async fn bus_leg(pool: &SqlitePool, route_id: i64) -> sqlx::Result<Option<BusLegRow>> {
    sqlx::query_as(
        "SELECT route_entur, route FROM cluster_to_quay_routes WHERE bus_quay_route_id = ?1",
    )
    .bind(route_id)
    .fetch_optional(pool)
    .await
}

/// Geometry of a ferry leg between two quays.
pub async fn ferry_leg(
    pool: &SqlitePool,
    start_quay: &str,
    end_quay: &str,
) -> sqlx::Result<Option<FerryLegRow>> {
    sqlx::query_as(
        "SELECT ferry_route FROM quay_distances WHERE start_quay_id = ?1 AND end_quay_id = ?2",
    )
    .bind(start_quay)
    .bind(end_quay)
    .fetch_optional(pool)
    .await
}

/// Geometry of a direct bus route between two clusters.
pub async fn direct_bus_leg(
    pool: &SqlitePool,
    start_cluster: i64,
    end_cluster: i64,
) -> sqlx::Result<Option<BusLegRow>> {
    sqlx::query_as(
        "SELECT route_entur, route FROM bus_routes_with_emission \
         WHERE start_cluster_id = ?1 AND end_cluster_id = ?2",
    )
    .bind(start_cluster)
    .bind(end_cluster)
    .fetch_optional(pool)
    .await
}
