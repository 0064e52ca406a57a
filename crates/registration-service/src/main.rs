//! Registration service - Entry point.

use registration_service::{
    api::{create_router_with_rate_limit, AppState, RateLimitState},
    config::Config,
    HttpNotifier, RegistrationDesk,
};
use registration_store::RestStore;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Missing store credentials are fatal
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

    info!("Starting registration service");

    let store = match RestStore::new(
        config.store.url.clone(),
        config.store.api_key.clone(),
        config.store.timeout,
    ) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to create store client: {}", e);
            std::process::exit(1);
        }
    };

    let notifier_url = config.notifier_url();
    info!(url = %notifier_url, "Confirmations go to notifier");

    let notifier = match HttpNotifier::new(
        notifier_url,
        config.store.api_key.clone(),
        config.notifier.timeout,
    ) {
        Ok(n) => n,
        Err(e) => {
            error!("Failed to create notifier client: {}", e);
            std::process::exit(1);
        }
    };

    let desk = RegistrationDesk::new(Arc::new(store), Arc::new(notifier));
    let state = AppState::new(desk, config.admin_token());

    if config.admin_token().is_none() {
        warn!("No admin token configured, registration listing is disabled");
    }

    let mut rate_limit = RateLimitState::new(config.rate_limit.per_minute);
    if config.rate_limit.trust_forwarded_for {
        rate_limit = rate_limit.behind_proxy();
    }

    // Forget clients that have been quiet for a while
    let limiter = rate_limit.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(300));
        loop {
            interval.tick().await;
            limiter.shrink();
        }
    });

    let app = create_router_with_rate_limit(state, rate_limit);

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

    if let Err(e) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
