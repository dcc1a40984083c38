//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::error::SnapshotError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/nearest", get(nearest_snapshot))
        .route("/api/stations", get(list_stations))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Snapshot of the station nearest to `lat`/`lon`.
async fn nearest_snapshot(
    State(state): State<AppState>,
    Query(query): Query<NearestQuery>,
) -> Result<Json<SnapshotResponse>, AppError> {
    let snapshot = state
        .service
        .snapshot_for_location(&query.location())
        .await?;
    Ok(Json(SnapshotResponse::from(snapshot)))
}

/// All stations in the catalog.
async fn list_stations(State(state): State<AppState>) -> Result<Json<StationsResponse>, AppError> {
    let stations = state.service.stations().await?;
    Ok(Json(StationsResponse {
        stations: stations.iter().map(StationResult::from).collect(),
    }))
}

/// Application error type.
#[derive(Debug)]
pub struct AppError(pub SnapshotError);

impl From<SnapshotError> for AppError {
    fn from(e: SnapshotError) -> Self {
        AppError(e)
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            SnapshotError::LocationUnavailable => StatusCode::PRECONDITION_REQUIRED,
            SnapshotError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            SnapshotError::NoData(_) => StatusCode::NOT_FOUND,
            SnapshotError::EmptyCatalog | SnapshotError::EmptyCandidateSet => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            SnapshotError::CatalogUnavailable(_)
            | SnapshotError::Transport(_)
            | SnapshotError::Api(_)
            | SnapshotError::MalformedPayload(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.0.to_string();

        if status.is_server_error() {
            error!(%status, kind = self.0.kind(), "{message}");
        } else {
            warn!(%status, kind = self.0.kind(), "{message}");
        }

        let body = Json(ErrorResponse {
            error: message,
            kind: self.0.kind(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::bart::FeedClient;
    use crate::config::{BartConfig, ServiceConfig};
    use crate::domain::StationId;
    use crate::stations::{CacheConfig, CachedStationCatalog, StationCatalog};
    use crate::transport::{MockResponse, MockTransport, SharedTransport};

    const CATALOG: &str = r#"{"root":{"stations":{"station":[
        {"name":"Powell St.","abbr":"POWL","gtfs_latitude":"37.7849","gtfs_longitude":"-122.4074"}
    ]},"message":""}}"#;

    const POWL_ETD: &str = r#"{"root":{"station":[{"name":"Powell St.","abbr":"POWL","etd":[
        {"destination":"Richmond","estimate":[
            {"minutes":"8","platform":"1","direction":"North","color":"ORANGE","delay":"0"}
        ]}
    ]}],"message":""}}"#;

    fn state(mock: &MockTransport) -> AppState {
        let transport: SharedTransport = Arc::new(mock.clone());
        let config = BartConfig::new("test-key");
        let catalog = CachedStationCatalog::new(
            StationCatalog::new(transport.clone(), config.clone()),
            &CacheConfig::default(),
        );
        AppState::new(
            Arc::new(catalog),
            FeedClient::new(transport, config),
            ServiceConfig::default().with_feed_timeout(Duration::from_millis(50)),
        )
    }

    fn query(lat: Option<f64>, lon: Option<f64>) -> Query<NearestQuery> {
        Query(NearestQuery { lat, lon })
    }

    #[tokio::test]
    async fn health_is_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn nearest_returns_snapshot() {
        let mock = MockTransport::new()
            .with_route("cmd=stns", MockResponse::json(200, CATALOG))
            .with_route("orig=POWL&", MockResponse::json(200, POWL_ETD));

        let Json(response) = nearest_snapshot(State(state(&mock)), query(Some(37.785), Some(-122.407)))
            .await
            .unwrap();

        assert_eq!(response.snapshot.station.id.as_str(), "POWL");
        assert_eq!(response.train_count, 1);
        assert_eq!(response.distance_text, "0.0 miles away");
    }

    #[tokio::test]
    async fn missing_coordinates_is_428_without_network() {
        let mock = MockTransport::new();
        let err = nearest_snapshot(State(state(&mock)), query(Some(37.785), None))
            .await
            .unwrap_err();

        assert_eq!(err.status(), StatusCode::PRECONDITION_REQUIRED);
        assert_eq!(err.into_response().status(), StatusCode::PRECONDITION_REQUIRED);
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn feed_timeout_is_504() {
        let mock = MockTransport::new()
            .with_route("cmd=stns", MockResponse::json(200, CATALOG))
            .with_route("orig=POWL&", MockResponse::Hang);

        let err = nearest_snapshot(State(state(&mock)), query(Some(37.785), Some(-122.407)))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[tokio::test]
    async fn stations_are_listed_and_cached() {
        let mock = MockTransport::new().with_route("cmd=stns", MockResponse::json(200, CATALOG));
        let state = state(&mock);

        let Json(first) = list_stations(State(state.clone())).await.unwrap();
        let Json(second) = list_stations(State(state)).await.unwrap();

        assert_eq!(first.stations.len(), 1);
        assert_eq!(second.stations[0].name, "Powell St.");
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn catalog_outage_is_502() {
        let mock = MockTransport::new().with_route("cmd=stns", MockResponse::json(500, "down"));
        let err = list_stations(State(state(&mock))).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn error_status_mapping() {
        let powl = StationId::parse("POWL").unwrap();
        let cases = [
            (SnapshotError::NoData(powl), StatusCode::NOT_FOUND),
            (SnapshotError::EmptyCatalog, StatusCode::SERVICE_UNAVAILABLE),
            (SnapshotError::EmptyCandidateSet, StatusCode::SERVICE_UNAVAILABLE),
            (SnapshotError::Api("Invalid key".into()), StatusCode::BAD_GATEWAY),
            (SnapshotError::MalformedPayload("eof".into()), StatusCode::BAD_GATEWAY),
            (SnapshotError::Transport("reset".into()), StatusCode::BAD_GATEWAY),
        ];
        for (error, status) in cases {
            assert_eq!(AppError(error).status(), status);
        }
    }
}
