use std::collections::HashSet;

use rand::seq::SliceRandom;

use crate::catalog::{self, PLACEHOLDER_HOST};
use crate::model::{Ad, Category};

/// Flat threshold list driving tier unlocks. Section 1 is free; the rest
/// unlock independently at these coin counts. Deliberately not derived
/// from the per-category `unlockCost` fields.
const SECTION_THRESHOLDS: [(i64, u8); 4] = [(10, 2), (20, 4), (35, 3), (50, 5)];

const LOOP_BASE_CATEGORY: &str = "Critically Acclaimed Annoyances";
const LOOP_JINGLE_CATEGORY: &str = "Jingles That Will Haunt Your Dreams";
const LOOP_META_CATEGORY: &str = "Ads About Ads";

/// Returns the set of unlocked section ids for the given coin count.
pub fn resolve(coins: i64) -> HashSet<u8> {
    let coins = coins.max(0);
    let mut sections = HashSet::from([1]);
    for (threshold, section) in SECTION_THRESHOLDS {
        if coins >= threshold {
            sections.insert(section);
        }
    }
    sections
}

pub fn rewrite_video_url(url: &str, base_url: &str) -> String {
    match url.strip_prefix(PLACEHOLDER_HOST) {
        Some(path) => format!("{base_url}{path}"),
        None => url.to_string(),
    }
}

fn rebased_ad(ad: &Ad, base_url: &str) -> Ad {
    Ad {
        video_url: rewrite_video_url(&ad.video_url, base_url),
        ..ad.clone()
    }
}

/// Projects the catalog down to the categories unlocked by `coins`,
/// in catalog order, with video URLs rebased onto `base_url`. Works on
/// fresh copies; the source catalog is never touched.
pub fn filter_catalog(coins: i64, base_url: &str) -> Vec<Category> {
    let unlocked = resolve(coins);
    catalog::catalog()
        .categories
        .iter()
        .filter(|c| unlocked.contains(&c.section))
        .map(|c| Category {
            title: c.title.clone(),
            description: c.description.clone(),
            section: c.section,
            unlock_cost: c.unlock_cost,
            ads: c.ads.iter().map(|a| rebased_ad(a, base_url)).collect(),
        })
        .collect()
}

/// Builds the pool of ads eligible for continuous playback. Rules are
/// concatenated in a fixed order; a rule whose category is missing from
/// the catalog contributes nothing, and duplicate ids are kept as-is.
pub fn loop_ads(coins: i64, base_url: &str) -> Vec<Ad> {
    let coins = coins.max(0);
    let mut pool = category_ads(LOOP_BASE_CATEGORY, base_url, |a| a.annoyance_level < 5);
    if coins >= 10 {
        pool.extend(category_ads(LOOP_JINGLE_CATEGORY, base_url, |a| a.annoyance_level < 8));
    }
    if coins >= 35 {
        pool.extend(category_ads(LOOP_JINGLE_CATEGORY, base_url, |a| a.annoyance_level >= 8));
        pool.extend(category_ads(LOOP_META_CATEGORY, base_url, |_| true));
    }
    pool
}

fn category_ads(title: &str, base_url: &str, keep: impl Fn(&Ad) -> bool) -> Vec<Ad> {
    match catalog::category_by_title(title) {
        Some(category) => category
            .ads
            .iter()
            .filter(|a| keep(a))
            .map(|a| rebased_ad(a, base_url))
            .collect(),
        None => Vec::new(),
    }
}

/// Draws one ad uniformly from `pool`. Empty pools yield `None`; the
/// caller decides how to report that.
pub fn random_ad(pool: &[Ad]) -> Option<&Ad> {
    pool.choose(&mut rand::thread_rng())
}

/// Uniform draw over the whole catalog, ignoring unlock state.
pub fn random_catalog_ad(base_url: &str) -> Option<Ad> {
    catalog::all_ads()
        .choose(&mut rand::thread_rng())
        .map(|ad| rebased_ad(ad, base_url))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:4000";

    fn ids(ads: &[Ad]) -> Vec<u32> {
        ads.iter().map(|a| a.id).collect()
    }

    #[test]
    fn section_one_is_always_unlocked() {
        assert_eq!(resolve(0), HashSet::from([1]));
        assert_eq!(resolve(9), HashSet::from([1]));
        assert_eq!(resolve(-5), HashSet::from([1]));
    }

    #[test]
    fn thresholds_unlock_independently() {
        assert_eq!(resolve(10), HashSet::from([1, 2]));
        assert_eq!(resolve(19), HashSet::from([1, 2]));
        assert_eq!(resolve(20), HashSet::from([1, 2, 4]));
        assert_eq!(resolve(35), HashSet::from([1, 2, 3, 4]));
        assert_eq!(resolve(49), HashSet::from([1, 2, 3, 4]));
    }

    #[test]
    fn large_balances_unlock_everything() {
        assert_eq!(resolve(50), HashSet::from([1, 2, 3, 4, 5]));
        assert_eq!(resolve(1000), HashSet::from([1, 2, 3, 4, 5]));
    }

    #[test]
    fn filter_keeps_catalog_order() {
        let categories = filter_catalog(1000, BASE);
        let sections: Vec<u8> = categories.iter().map(|c| c.section).collect();
        let full: Vec<u8> = catalog::catalog().categories.iter().map(|c| c.section).collect();
        assert_eq!(sections, full);
    }

    #[test]
    fn filter_restricts_to_unlocked_sections() {
        let sections: Vec<u8> = filter_catalog(0, BASE).iter().map(|c| c.section).collect();
        assert_eq!(sections, vec![1]);

        let sections: Vec<u8> = filter_catalog(15, BASE).iter().map(|c| c.section).collect();
        assert_eq!(sections, vec![1, 2]);
    }

    #[test]
    fn filter_rewrites_local_urls_only() {
        let categories = filter_catalog(1000, BASE);
        for category in &categories {
            for ad in &category.ads {
                assert!(
                    !ad.video_url.starts_with(PLACEHOLDER_HOST),
                    "ad {} not rebased: {}",
                    ad.id,
                    ad.video_url
                );
            }
        }
        // The externally hosted ad keeps its URL byte for byte.
        let mystery = categories.iter().find(|c| c.section == 5).unwrap();
        assert_eq!(mystery.ads[0].video_url, "https://cdn.vinsmera.example/videos/Vinsmera.mp4");
    }

    #[test]
    fn filter_does_not_mutate_source() {
        let _ = filter_catalog(1000, BASE);
        let source = catalog::category_by_title("Critically Acclaimed Annoyances").unwrap();
        assert!(source.ads[0].video_url.starts_with(PLACEHOLDER_HOST));
    }

    #[test]
    fn rewrite_is_identity_for_external_urls() {
        let url = "https://cdn.vinsmera.example/videos/Vinsmera.mp4";
        assert_eq!(rewrite_video_url(url, BASE), url);
        assert_eq!(
            rewrite_video_url("http://localhost:3000/videos/ad1.mp4", BASE),
            "http://localhost:4000/videos/ad1.mp4"
        );
    }

    #[test]
    fn loop_pool_at_zero_is_low_annoyance_acclaimed() {
        let pool = loop_ads(0, BASE);
        assert_eq!(ids(&pool), vec![1, 14]);
        assert!(pool.iter().all(|a| a.annoyance_level < 5));
    }

    #[test]
    fn loop_pool_at_ten_adds_mild_jingles() {
        let pool = loop_ads(10, BASE);
        assert_eq!(ids(&pool), vec![1, 14, 5, 7, 8, 9, 10, 11]);
        // Nothing more until the next threshold.
        assert_eq!(ids(&loop_ads(34, BASE)), ids(&pool));
    }

    #[test]
    fn loop_pool_at_thirty_five_adds_harsh_jingles_and_meta_ads() {
        let smaller = loop_ads(10, BASE);
        let pool = loop_ads(35, BASE);
        assert_eq!(ids(&pool), vec![1, 14, 5, 7, 8, 9, 10, 11, 4, 6]);
        assert!(ids(&pool).starts_with(&ids(&smaller)));
    }

    #[test]
    fn loop_pool_rewrites_urls() {
        for ad in loop_ads(1000, BASE) {
            assert!(!ad.video_url.starts_with(PLACEHOLDER_HOST));
        }
    }

    #[test]
    fn negative_coins_behave_like_zero() {
        assert_eq!(ids(&loop_ads(-7, BASE)), ids(&loop_ads(0, BASE)));
    }

    #[test]
    fn random_ad_handles_empty_and_singleton_pools() {
        assert!(random_ad(&[]).is_none());
        let pool = loop_ads(0, BASE);
        let single = &pool[..1];
        assert_eq!(random_ad(single).unwrap().id, single[0].id);
    }

    #[test]
    fn random_ad_stays_within_pool() {
        let pool = loop_ads(35, BASE);
        let pool_ids = ids(&pool);
        for _ in 0..50 {
            let pick = random_ad(&pool).unwrap();
            assert!(pool_ids.contains(&pick.id));
        }
    }

    #[test]
    fn random_catalog_ad_ignores_unlock_state() {
        let all: Vec<u32> = catalog::all_ads().iter().map(|a| a.id).collect();
        assert_eq!(all.len(), 14);
        for _ in 0..50 {
            let pick = random_catalog_ad(BASE).unwrap();
            assert!(all.contains(&pick.id));
            assert!(!pick.video_url.starts_with(PLACEHOLDER_HOST));
        }
    }
}
