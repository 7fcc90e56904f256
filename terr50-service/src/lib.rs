//! Terr50 Service Library
//!
//! HTTP handlers and types for the GB terrain elevation service.
//! This library is used by both the terr50-service binary and integration tests.

pub mod handlers;

use terr50::TerrainService;

/// Application state shared across handlers.
pub struct AppState {
    /// Terrain service for elevation queries.
    pub terrain: TerrainService,
}

// Re-export commonly used types for convenience
pub use handlers::{
    ElevationQuery, ElevationResponse, ErrorResponse, HealthResponse, LookupRequest,
    LookupResponse, PointDto,
};
