use once_cell::sync::Lazy;

use crate::model::{Ad, Catalog, Category};

/// Host prefix used by catalog entries whose video is served from this
/// process. Rewritten to the caller's effective base URL on the way out;
/// any other prefix marks an externally hosted video and passes through
/// untouched.
pub const PLACEHOLDER_HOST: &str = "http://localhost:3000";

static CATALOG: Lazy<Catalog> = Lazy::new(|| {
    // The file is embedded at compile time, so a parse failure here is a
    // broken build, not a runtime condition worth recovering from.
    serde_json::from_str(include_str!("../catalog.json")).expect("catalog.json must be valid")
});

pub fn catalog() -> &'static Catalog {
    &CATALOG
}

pub fn category_by_title(title: &str) -> Option<&'static Category> {
    CATALOG.categories.iter().find(|c| c.title == title)
}

/// Every ad in the catalog, flattened in catalog order. No unlock
/// filtering applies here.
pub fn all_ads() -> Vec<&'static Ad> {
    CATALOG.categories.iter().flat_map(|c| c.ads.iter()).collect()
}
