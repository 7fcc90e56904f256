//! HTTP request handlers for the elevation service.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use terr50::{Location, Terr50Error};

use crate::AppState;

/// One grid point in a request or response body.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, ToSchema)]
pub struct PointDto {
    /// Metres east of the GB grid origin.
    pub easting: u32,
    /// Metres north of the GB grid origin.
    pub northing: u32,
    /// Elevation in metres; null on input, always set in responses.
    #[serde(default)]
    pub elevation: Option<f64>,
}

impl From<Location> for PointDto {
    fn from(loc: Location) -> Self {
        Self {
            easting: loc.easting,
            northing: loc.northing,
            elevation: loc.elevation,
        }
    }
}

impl From<PointDto> for Location {
    fn from(dto: PointDto) -> Self {
        Location {
            easting: dto.easting,
            northing: dto.northing,
            elevation: dto.elevation,
        }
    }
}

/// Body of a batch lookup request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LookupRequest {
    /// Locations to resolve, in order.
    pub locations: Vec<PointDto>,
    /// Whether to synthesise 50 m infill points between consecutive
    /// locations. Default is false.
    #[serde(default)]
    pub infill: bool,
}

/// Body of a batch lookup response.
#[derive(Debug, Serialize, ToSchema)]
pub struct LookupResponse {
    /// The resolved locations; longer than the request when infill is on.
    pub locations: Vec<PointDto>,
}

/// Query parameters for the single-point endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ElevationQuery {
    /// Easting in metres.
    pub easting: u32,
    /// Northing in metres.
    pub northing: u32,
}

/// Successful single-point response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ElevationResponse {
    /// Easting queried.
    pub easting: u32,
    /// Northing queried.
    pub northing: u32,
    /// Elevation in metres (one decimal digit; 0 for no-data cells).
    pub elevation: f64,
}

/// Error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Get elevation for a single grid coordinate.
///
/// # Query Parameters
///
/// - `easting`: metres east of the GB grid origin
/// - `northing`: metres north of the GB grid origin
///
/// # Returns
///
/// - `200 OK` with the elevation (0 for sea or excluded landmass)
/// - `500 Internal Server Error` if the index is missing or unreadable
#[utoipa::path(
    get,
    path = "/elevation",
    params(ElevationQuery),
    responses(
        (status = 200, description = "Elevation at the requested coordinate", body = ElevationResponse),
        (status = 500, description = "Index file missing or unreadable", body = ErrorResponse)
    ),
    tag = "elevation"
)]
#[axum::debug_handler]
pub async fn get_elevation(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ElevationQuery>,
) -> impl IntoResponse {
    tracing::debug!(
        easting = query.easting,
        northing = query.northing,
        "Elevation query"
    );

    match state.terrain.lookup_point(query.easting, query.northing) {
        Ok(elevation) => {
            tracing::info!(
                easting = query.easting,
                northing = query.northing,
                elevation = elevation,
                "Elevation found"
            );
            (
                StatusCode::OK,
                Json(ElevationResponse {
                    easting: query.easting,
                    northing: query.northing,
                    elevation,
                }),
            )
                .into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Resolve a batch of locations, optionally infilled to a 50 m profile.
///
/// The response preserves request order; with `infill` set it also carries
/// the generated intermediate points, so it can be longer than the request.
#[utoipa::path(
    post,
    path = "/elevation",
    request_body = LookupRequest,
    responses(
        (status = 200, description = "All locations resolved, in order", body = LookupResponse),
        (status = 400, description = "Empty location list", body = ErrorResponse),
        (status = 500, description = "Index file missing or unreadable", body = ErrorResponse)
    ),
    tag = "elevation"
)]
pub async fn post_elevation(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LookupRequest>,
) -> impl IntoResponse {
    tracing::debug!(
        locations = request.locations.len(),
        infill = request.infill,
        "Batch lookup"
    );

    let locations: Vec<Location> = request.locations.into_iter().map(Location::from).collect();

    match state.terrain.lookup(&locations, request.infill) {
        Ok(resolved) => {
            tracing::info!(points = resolved.len(), "Batch lookup complete");
            (
                StatusCode::OK,
                Json(LookupResponse {
                    locations: resolved.into_iter().map(PointDto::from).collect(),
                }),
            )
                .into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Create an error response for lookup failures.
fn error_response(e: Terr50Error) -> axum::response::Response {
    let status = match &e {
        Terr50Error::EmptyLocations => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    tracing::warn!(error = %e, "Lookup failed");

    (status, Json(ErrorResponse { error: e.to_string() })).into_response()
}

/// Health check endpoint.
///
/// Returns service status and version.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
