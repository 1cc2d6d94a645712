//! List filter/sort engine
//!
//! Pure function over the canonical collection: no side effects,
//! deterministic for given inputs, safe to re-invoke on every
//! keystroke. Produces a new vector (copy-on-write narrowing), never
//! mutates its input.

use crate::utils::normalize;
use shared::{ShopQuery, Shop, TAKEMACHELIN_GENRE, query::ALL};

/// Apply the query to the collection and return the matching subset
/// in display order (recommended listings first, then by name).
pub fn filter_shops(shops: &[Shop], query: &ShopQuery) -> Vec<Shop> {
    let keyword = normalize(Some(&query.keyword));

    let mut filtered: Vec<Shop> = shops
        .iter()
        .filter(|shop| matches(shop, query, &keyword))
        .cloned()
        .collect();

    sort_by_name(&mut filtered);
    filtered
}

fn matches(shop: &Shop, query: &ShopQuery, keyword: &str) -> bool {
    let area_match = query.area == ALL || shop.area_category.as_deref() == Some(&query.area);
    if !area_match {
        return false;
    }

    let show_flagged = query.show_takemachelin;
    let genre_match = if query.genre == ALL {
        !shop.is_flagged() || show_flagged
    } else if query.genre == TAKEMACHELIN_GENRE {
        shop.is_flagged() && show_flagged
    } else {
        shop.genre.as_deref() == Some(&query.genre) && (!shop.is_flagged() || show_flagged)
    };
    if !genre_match {
        return false;
    }

    if !keyword.is_empty() {
        let name = normalize(Some(&shop.name));
        let area = normalize(shop.area.as_deref());
        if !name.contains(keyword) && !area.contains(keyword) {
            return false;
        }
    }
    true
}

/// Stable two-key display order: recommended listings first, then
/// name ascending under a kana- and width-folding collation key
/// (katakana and hiragana spellings interleave the way a Japanese
/// reader expects), raw name as the tie-break.
pub fn sort_by_name(shops: &mut [Shop]) {
    shops.sort_by_cached_key(|shop| {
        (
            !shop.has_recommender(),
            normalize(Some(&shop.name)),
            shop.name.clone(),
        )
    });
}
