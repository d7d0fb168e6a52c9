use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod chart;
mod config;
mod error;
mod models;
mod routes;
mod stats;
mod teams;

use config::Config;
use routes::AppState;
use stats::NbaStatsClient;

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting court api server...");

    dotenvy::dotenv().ok();

    let config = Config::from_env().expect("Invalid configuration in environment");

    let client = NbaStatsClient::new(&config).expect("Failed to build NBA stats client");
    tracing::info!("Using stats API at {}", config.stats_base_url);

    let state = AppState {
        stats: Arc::new(client),
        shot_chart_dir: config.shot_chart_dir.clone(),
    };

    let addr = SocketAddr::from((config.host, config.port));

    // CORS configuration for the browser frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .expect("Failed to start server.");
}
