use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transit_server::accounts::{Accounts, JsonUserStore};
use transit_server::cache::CachedRouteService;
use transit_server::config::ServerConfig;
use transit_server::network::StationGraph;
use transit_server::planner::RouteService;
use transit_server::web::{AppState, create_router};

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "transit_server=info,tower_http=info";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    // Load the station graph (fail fast if malformed)
    let graph = match StationGraph::load(&config.stations_path, config.edge_policy) {
        Ok(graph) => graph,
        Err(e) => {
            error!(error = %e, "Failed to load station graph");
            return ExitCode::FAILURE;
        }
    };

    let routes = CachedRouteService::new(RouteService::new(Arc::new(graph)), &config.cache);
    let accounts = Accounts::new(JsonUserStore::new(&config.users_path));
    info!(path = %config.users_path.display(), "Using user store");

    let state = AppState::new(routes, accounts, &config.contact_number);
    let app = create_router(state, &config.static_dir);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, error = %e, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!("Transit server listening on http://{}", config.bind_addr);
    info!("API endpoints:");
    info!("  GET  /route?orig=&dest=     - Fewest-hops route");
    info!("  GET  /api/stations/search   - Search stations");
    info!("  POST /users                 - Sign up");
    info!("  PUT  /users/:id/balance     - Top up wallet");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "Server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
