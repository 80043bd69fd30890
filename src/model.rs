use serde::{Deserialize, Serialize};

/// A single advertisement. Ids are stable but not guaranteed unique
/// across categories, so they are never used as lookup keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ad {
    pub id: u32,
    pub title: String,
    pub thumbnail: String,
    #[serde(rename = "videoUrl")]
    pub video_url: String,
    pub description: String,
    pub annoyance_level: u8,
}

/// A group of ads behind a common unlock tier. `title` doubles as the
/// lookup key for the loop selector and must be unique in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub title: String,
    pub description: String,
    pub section: u8,
    #[serde(rename = "unlockCost")]
    pub unlock_cost: u32,
    pub ads: Vec<Ad>,
}

#[derive(Debug, Deserialize)]
pub struct Catalog {
    pub categories: Vec<Category>,
}

#[derive(Debug, Deserialize)]
pub struct CoinsQuery {
    pub coins: Option<i64>,
}

impl CoinsQuery {
    /// Negative or missing coin counts are treated as zero.
    pub fn effective_coins(&self) -> i64 {
        self.coins.unwrap_or(0).max(0)
    }
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize)]
pub struct LoopAdsResponse {
    pub ads: Vec<Ad>,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct WatchCompleteRequest {
    #[serde(rename = "adId")]
    pub ad_id: Option<u32>,
    #[serde(rename = "watchTime")]
    pub watch_time: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct WatchCompleteResponse {
    pub message: String,
    #[serde(rename = "coinsAwarded")]
    pub coins_awarded: u32,
    #[serde(rename = "adId", skip_serializing_if = "Option::is_none")]
    pub ad_id: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
