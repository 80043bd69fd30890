use adflix_server::{router, AppState, ServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env();
    let addr = format!("0.0.0.0:{}", config.port);
    let port = config.port;

    let app = router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    info!("AdFlix backend server running on http://localhost:{port}");
    info!("Serving ads that nobody asked for...");
    axum::serve(listener, app).await.expect("Server failed");
}
