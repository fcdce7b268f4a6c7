use std::net::SocketAddr;

use cinema_api::{app, AppState};
use cinema_catalog::PricingEngine;
use cinema_order::CheckoutService;
use cinema_store::{BackendClient, Config};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinema_api=debug,cinema_order=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().expect("Failed to load config");
    tracing::info!("Starting cinema API on port {}", config.server.port);

    let backend = Arc::new(BackendClient::new(&config.backend).expect("Failed to build backend client"));
    tracing::info!(base_url = %config.backend.base_url, timeout_ms = config.backend.timeout_ms, "backend configured");

    let checkout = CheckoutService::new(
        backend.clone(),
        backend.clone(),
        backend,
        PricingEngine::new(config.pricing.clone()),
    );

    let app = app(AppState::new(checkout));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.expect("Failed to bind");
    axum::serve(listener, app).await.expect("Server error");
}
