use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

pub mod catalog;
pub mod config;
pub mod handlers;
pub mod model;
pub mod selection;

pub use config::{AppState, Mode, ServerConfig};

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/ads", get(handlers::get_ads))
        .route("/api/random-ad", get(handlers::get_random_ad))
        .route("/api/loop-ads", get(handlers::get_loop_ads))
        .route("/api/watch-complete", post(handlers::watch_complete))
        .route("/api/ads/unreliable", get(handlers::get_ads_unreliable))
        .route("/api/ads/slow", get(handlers::get_ads_slow))
        .layer(cors)
        .with_state(state)
}
