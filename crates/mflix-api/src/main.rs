use mflix_api::config::Config;
use mflix_api::routes;
use mflix_api::state::{AppState, open_store};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().unwrap_or_else(|e| {
        eprintln!("invalid configuration: {e}");
        std::process::exit(1);
    });

    let store = open_store(&config).await.unwrap_or_else(|e| {
        eprintln!("failed to open {:?} store: {e}", config.store);
        std::process::exit(1);
    });

    let app = routes::router().with_state(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("failed to bind {}: {e}", config.addr);
            std::process::exit(1);
        });

    tracing::info!(
        addr = %config.addr,
        store = ?config.store,
        database = %config.database,
        "mflix-api listening"
    );
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        eprintln!("server error: {e}");
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
