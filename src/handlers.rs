use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json};
use rand::Rng;
use tokio::time::{sleep, Duration};
use tracing::info;

use crate::config::{AppState, Mode};
use crate::model::{
    CatalogResponse, CoinsQuery, ErrorResponse, HealthResponse, LoopAdsResponse,
    WatchCompleteRequest, WatchCompleteResponse,
};
use crate::selection;

const SLOW_RESPONSE_DELAY: Duration = Duration::from_millis(3000);
const WATCH_REWARD_COINS: u32 = 2;
const MIN_WATCH_TIME_SECS: f64 = 5.0;
const UNRELIABLE_ERROR: &str = "Oops! The ad server spontaneously combusted. Please try again.";

/// Base URL the caller should use to fetch locally hosted videos.
/// Computed per request; the host a proxy forwarded for us wins in
/// production, the configured port wins everywhere else.
pub fn effective_base_url(state: &AppState, headers: &HeaderMap) -> String {
    match state.config.mode {
        Mode::Production => {
            let scheme = headers
                .get("x-forwarded-proto")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("http");
            match headers.get(header::HOST).and_then(|v| v.to_str().ok()) {
                Some(host) => format!("{scheme}://{host}"),
                None => state.config.local_base_url(),
            }
        }
        Mode::Local => state.config.local_base_url(),
    }
}

pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        service: "adflix-server",
    })
}

pub async fn get_ads(
    Query(params): Query<CoinsQuery>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let coins = params.effective_coins();
    let base_url = effective_base_url(&state, &headers);
    let categories = selection::filter_catalog(coins, &base_url);
    info!(coins, categories = categories.len(), "serving catalog");
    Json(CatalogResponse { categories })
}

pub async fn get_random_ad(
    Query(params): Query<CoinsQuery>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let coins = params.effective_coins();
    let base_url = effective_base_url(&state, &headers);
    let pool = selection::loop_ads(coins, &base_url);
    match selection::random_ad(&pool) {
        Some(ad) => {
            info!(coins, ad_id = ad.id, "serving random ad");
            Json(ad.clone()).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "No ads are eligible for playback.".to_string(),
            }),
        )
            .into_response(),
    }
}

pub async fn get_loop_ads(
    Query(params): Query<CoinsQuery>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let coins = params.effective_coins();
    let base_url = effective_base_url(&state, &headers);
    let ads = selection::loop_ads(coins, &base_url);
    info!(coins, count = ads.len(), "serving loop pool");
    let count = ads.len();
    Json(LoopAdsResponse { ads, count })
}

pub async fn watch_complete(Json(req): Json<WatchCompleteRequest>) -> impl IntoResponse {
    let Some(ad_id) = req.ad_id else {
        return (
            StatusCode::BAD_REQUEST,
            Json(WatchCompleteResponse {
                message: "adId is required.".to_string(),
                coins_awarded: 0,
                ad_id: None,
            }),
        );
    };

    if req.watch_time.unwrap_or(0.0) < MIN_WATCH_TIME_SECS {
        return (
            StatusCode::BAD_REQUEST,
            Json(WatchCompleteResponse {
                message: "Watch time too short to earn AdCoins.".to_string(),
                coins_awarded: 0,
                ad_id: Some(ad_id),
            }),
        );
    }

    info!(ad_id, "watch completed, awarding coins");
    (
        StatusCode::OK,
        Json(WatchCompleteResponse {
            message: "Thanks for watching an ad about ads.".to_string(),
            coins_awarded: WATCH_REWARD_COINS,
            ad_id: Some(ad_id),
        }),
    )
}

/// Succeeds or combusts with equal probability, independently per call.
pub async fn get_ads_unreliable(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if rand::thread_rng().gen_bool(0.5) {
        let base_url = effective_base_url(&state, &headers);
        let categories = selection::filter_catalog(0, &base_url);
        Json(CatalogResponse { categories }).into_response()
    } else {
        info!("unreliable endpoint combusted on schedule");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: UNRELIABLE_ERROR.to_string(),
            }),
        )
            .into_response()
    }
}

/// Waits three seconds before answering. The sleep suspends only this
/// request's task; other requests keep flowing.
pub async fn get_ads_slow(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    sleep(SLOW_RESPONSE_DELAY).await;
    let base_url = effective_base_url(&state, &headers);
    let categories = selection::filter_catalog(0, &base_url);
    Json(CatalogResponse { categories })
}
