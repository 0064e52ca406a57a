//! Confirmation notifier - Entry point.

use confirmation_notifier::{
    api::{create_router, AppState},
    config::Config,
};
use email_client::EmailClient;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(event = %config.event.name, "Starting confirmation notifier");

    let email = match EmailClient::new(
        config.email.api_key.clone(),
        config.email.base_url.clone(),
        config.email.timeout,
    ) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create email client: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState::new(email, config.event.clone(), config.email.from.clone());
    let app = create_router(state);

    let addr = SocketAddr::new(
        config.server.listen_addr.parse().unwrap_or([0, 0, 0, 0].into()),
        config.server.port,
    );

    info!("Listening on {}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
