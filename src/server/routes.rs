//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::coord::Coordinates;
use crate::error::Error;
use crate::geocode::{available_backends, BackendInfo};
use crate::resolver::ResolutionState;
use crate::server::state::AppState;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/tap", post(tap_handler))
        .route("/api/state", get(state_handler))
        .route("/api/status", get(status_handler))
        .route("/api/backends", get(backends_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Tap request body
#[derive(Debug, Deserialize)]
pub struct TapRequest {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
}

/// Tap response body
#[derive(Debug, Serialize)]
pub struct TapResponse {
    /// Sequence number of the accepted request
    pub request_id: u64,
    /// State right after the request was accepted
    pub state: ResolutionState,
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::Validation(_) => "INVALID_COORDINATES",
            Error::Config(_) => "CONFIG_ERROR",
            _ => "INTERNAL_ERROR",
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

/// Map tap endpoint
///
/// POST /api/tap
///
/// Starts a resolution and answers immediately; the outcome is read from
/// `/api/state`.
async fn tap_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TapRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let coordinate = Coordinates::new(req.lat, req.lng);
    let request_id = state
        .resolver
        .on_tap_coordinate(coordinate)
        .map_err(ApiError::from)?;

    Ok((
        StatusCode::ACCEPTED,
        Json(TapResponse {
            request_id,
            state: state.resolver.current_state(),
        }),
    ))
}

/// Current resolution state
///
/// GET /api/state
async fn state_handler(State(state): State<Arc<AppState>>) -> Json<ResolutionState> {
    Json(state.resolver.current_state())
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Current backend
    pub backend: String,
    /// Name of the current resolution state
    pub state: String,
    /// Uptime in seconds
    pub uptime_secs: u64,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.backend_name().to_string(),
        state: state.resolver.current_state().name().to_string(),
        uptime_secs: state.uptime_secs(),
    })
}

/// Backends list response
#[derive(Debug, Serialize, Deserialize)]
pub struct BackendsResponse {
    pub backends: Vec<BackendInfo>,
    pub current: String,
}

/// List available geocoding backends
///
/// GET /api/backends
async fn backends_handler(State(state): State<Arc<AppState>>) -> Json<BackendsResponse> {
    Json(BackendsResponse {
        backends: available_backends(),
        current: state.backend_name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::geocode::gazetteer::Gazetteer;
    use crate::geocode::local::{DeviceAddress, LocalBackend};
    use crate::geocode::Backend;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn suwon_station() -> DeviceAddress {
        DeviceAddress {
            address_lines: vec!["Suwon Station, 924 Deogyeong-daero".to_string()],
            latitude: 37.2659,
            longitude: 127.0001,
            locality: Some("Suwon-si".to_string()),
            ..Default::default()
        }
    }

    fn create_test_state(entries: Vec<DeviceAddress>) -> Arc<AppState> {
        let backend = Backend::Local(LocalBackend::new(Gazetteer::new(entries, 500.0)));
        Arc::new(AppState::with_backend(Config::default(), backend))
    }

    fn tap(lat: f64, lng: f64) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/tap")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({ "lat": lat, "lng": lng }).to_string(),
            ))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let app = create_router(create_test_state(vec![]));

        let response = app.oneshot(get("/api/status")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let status: StatusResponse = serde_json::from_slice(&body).unwrap();

        assert!(status.running);
        assert_eq!(status.backend, "local");
        assert_eq!(status.state, "idle");
        assert_eq!(status.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_backends_endpoint() {
        let app = create_router(create_test_state(vec![]));

        let response = app.oneshot(get("/api/backends")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let backends: BackendsResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(backends.backends.len(), 2);
        assert_eq!(backends.current, "local");
    }

    #[tokio::test]
    async fn test_state_starts_idle() {
        let app = create_router(create_test_state(vec![]));

        let response = app.oneshot(get("/api/state")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, serde_json::json!({ "state": "idle" }));
    }

    #[tokio::test]
    async fn test_tap_resolves_to_success() {
        let state = create_test_state(vec![suwon_station()]);
        let app = create_router(Arc::clone(&state));
        let mut updates = state.resolver.subscribe();

        let response = app.clone().oneshot(tap(37.2660, 127.0002)).await.unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let accepted = json_body(response).await;
        assert_eq!(accepted["request_id"], 1);
        assert_eq!(accepted["state"]["state"], "loading");

        assert_eq!(updates.recv().await, Some(ResolutionState::Loading));
        let terminal = updates.next_terminal().await.unwrap();
        assert_eq!(terminal.records().map(|records| records.len()), Some(1));

        let current = json_body(app.oneshot(get("/api/state")).await.unwrap()).await;
        assert_eq!(current["state"], "success");
        assert_eq!(
            current["records"][0]["title"],
            "Suwon Station, 924 Deogyeong-daero"
        );
        assert_eq!(current["records"][0]["location"]["lat"], 37.2659);
    }

    #[tokio::test]
    async fn test_tap_with_nothing_nearby_succeeds_empty() {
        let state = create_test_state(vec![suwon_station()]);
        let app = create_router(Arc::clone(&state));
        let mut updates = state.resolver.subscribe();

        let response = app.clone().oneshot(tap(35.1796, 129.0756)).await.unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let terminal = updates.next_terminal().await.unwrap();
        assert_eq!(terminal, ResolutionState::Success { records: vec![] });

        let current = json_body(app.oneshot(get("/api/state")).await.unwrap()).await;
        assert_eq!(current, serde_json::json!({ "state": "success", "records": [] }));
    }

    #[tokio::test]
    async fn test_tap_rejects_invalid_coordinates() {
        let state = create_test_state(vec![suwon_station()]);
        let app = create_router(Arc::clone(&state));

        let response = app.clone().oneshot(tap(91.0, 0.0)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_COORDINATES");

        assert_eq!(state.resolver.current_state(), ResolutionState::Idle);
    }
}
