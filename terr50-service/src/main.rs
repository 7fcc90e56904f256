//! Terr50 Service - HTTP microservice for GB terrain elevation queries.
//!
//! A REST API for querying terrain elevation from a compiled OS Terrain 50
//! index file.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `TERR50_INDEX` | Path to the compiled index file | Required |
//! | `TERR50_VERIFY` | Check the index signature on open | true |
//! | `TERR50_PORT` | HTTP server port | 8080 |
//! | `RUST_LOG` | Log level (e.g., "info", "debug") | "info" |
//!
//! ## Endpoints
//!
//! - `GET /elevation?easting=X&northing=Y` - Elevation at one coordinate
//! - `POST /elevation` - Batch lookup with optional 50 m infill
//! - `GET /health` - Health check
//! - `GET /docs` - OpenAPI documentation (Swagger UI)

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use terr50::TerrainServiceBuilder;
use terr50_service::{handlers, AppState};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation for the terr50 service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Terr50 Elevation Service",
        version = "0.1.0",
        description = "REST API for Great-Britain terrain elevation lookups from a compiled OS Terrain 50 index.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        handlers::get_elevation,
        handlers::post_elevation,
        handlers::health_check,
    ),
    components(
        schemas(
            handlers::PointDto,
            handlers::LookupRequest,
            handlers::LookupResponse,
            handlers::ElevationResponse,
            handlers::ErrorResponse,
            handlers::HealthResponse,
        )
    ),
    tags(
        (name = "elevation", description = "Elevation query endpoints"),
        (name = "system", description = "System and health endpoints")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "terr50_service=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load port from environment (service-specific config)
    let port: u16 = std::env::var("TERR50_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);

    // Build the terrain service from environment variables using the
    // library (TERR50_INDEX, TERR50_VERIFY)
    let terrain = match TerrainServiceBuilder::from_env() {
        Ok(builder) => builder.build(),
        Err(_) => {
            // Fallback: TERR50_INDEX not set, use a file in the current directory
            tracing::warn!("TERR50_INDEX not set, using ./gb.terr50");
            TerrainServiceBuilder::new("gb.terr50").build()
        }
    };

    tracing::info!(
        index = %terrain.index_path().display(),
        port = port,
        "Starting terr50 service"
    );

    let state = Arc::new(AppState { terrain });

    // Build router
    let app = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route(
            "/elevation",
            get(handlers::get_elevation).post(handlers::post_elevation),
        )
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
