use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use study_planner::{app, config::Config, store::Store, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "study_planner=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().expect("failed to load configuration");

    let addr: SocketAddr = config
        .bind_addr
        .parse()
        .expect("bind_addr must be host:port");

    let state = AppState::new(Store::new(&config.db_path));
    let app = app(state, &config.static_dir);

    // Print the link to the server
    tracing::info!("Server running at http://{}", addr);
    tracing::info!("Static files: {}", config.static_dir.display());
    tracing::info!("Database:     {}", config.db_path.display());
    tracing::info!("API base:     http://{}/api", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("bind failed");

    axum::serve(listener, app).await.expect("server error");
}
