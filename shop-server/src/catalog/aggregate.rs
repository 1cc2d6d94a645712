//! Data aggregator
//!
//! Sole producer of the canonical record collection for a request:
//! fetch from the primary store, optionally merge the adapted legacy
//! dataset, validate the whole batch, sort. Any failure along the way
//! degrades to an empty collection with diagnostic logging — better
//! to show nothing than to show wrong data. Callers treat the result
//! as immutable.

use std::cmp::Reverse;
use std::path::Path;

use validator::{Validate, ValidationErrors};

use crate::core::Config;
use crate::store::ShopStore;
use crate::utils::time::epoch_millis;
use shared::Shop;

use super::legacy::load_legacy_shops;

/// How many offending rows to log when a batch fails validation.
const LOGGED_OFFENDERS: usize = 3;

/// Fetch, merge, validate and sort the full record set.
///
/// Never errors: store failures and validation failures both resolve
/// to an empty collection.
pub async fn get_all_shops(store: &dyn ShopStore, config: &Config) -> Vec<Shop> {
    let mut shops = match store.select_all().await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(error = %e, code = ?e.code, "failed to fetch shops from store");
            return Vec::new();
        }
    };

    // Native rows first, adapted legacy rows after; no dedup here.
    if config.enable_legacy_merge {
        if let Some(path) = &config.legacy_data_path {
            shops.extend(load_legacy_shops(Path::new(path)));
        }
    }

    if let Err(offenders) = validate_batch(&shops) {
        for (index, errors) in offenders.iter().take(LOGGED_OFFENDERS) {
            let raw = serde_json::to_string(&shops[*index]).unwrap_or_default();
            tracing::error!(index, errors = %errors, raw, "shop record failed schema validation");
        }
        tracing::error!(
            invalid = offenders.len(),
            total = shops.len(),
            "aggregate validation failed, suppressing the whole response"
        );
        return Vec::new();
    }

    sort_by_recency(&mut shops);
    shops
}

/// Validate every row against the persisted-record schema; all rows
/// are checked in one pass so legacy and native records gate the
/// response together.
fn validate_batch(shops: &[Shop]) -> Result<(), Vec<(usize, ValidationErrors)>> {
    let offenders: Vec<(usize, ValidationErrors)> = shops
        .iter()
        .enumerate()
        .filter_map(|(i, shop)| shop.validate().err().map(|e| (i, e)))
        .collect();
    if offenders.is_empty() {
        Ok(())
    } else {
        Err(offenders)
    }
}

/// Stable two-key order for the read path: recommended listings
/// first, then most recently touched first (`updated_at` falling
/// back to `created_at`; unparseable timestamps sort oldest).
pub fn sort_by_recency(shops: &mut [Shop]) {
    shops.sort_by_key(|shop| {
        (
            !shop.has_recommender(),
            Reverse(epoch_millis(shop.sort_timestamp())),
        )
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, OptionColumns, StoreError, StoreResult};
    use async_trait::async_trait;
    use shared::{ShopInsert, ShopUpdate};

    pub(crate) fn shop(id: i64, name: &str) -> Shop {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "created_at": "2024-04-01T10:00:00+00:00",
            "name": name,
        }))
        .unwrap()
    }

    struct FailingStore;

    #[async_trait]
    impl ShopStore for FailingStore {
        async fn select_all(&self) -> StoreResult<Vec<Shop>> {
            Err(StoreError::transport("connection refused"))
        }
        async fn select_option_columns(&self) -> StoreResult<Vec<OptionColumns>> {
            Err(StoreError::transport("connection refused"))
        }
        async fn find_by_id(&self, _id: i64) -> StoreResult<Option<Shop>> {
            Err(StoreError::transport("connection refused"))
        }
        async fn insert(&self, _data: ShopInsert) -> StoreResult<Shop> {
            Err(StoreError::transport("connection refused"))
        }
        async fn update(&self, _id: i64, _data: ShopUpdate) -> StoreResult<Shop> {
            Err(StoreError::transport("connection refused"))
        }
        async fn delete(&self, _id: i64) -> StoreResult<()> {
            Err(StoreError::transport("connection refused"))
        }
    }

    #[tokio::test]
    async fn store_error_resolves_to_empty() {
        let shops = get_all_shops(&FailingStore, &Config::for_tests()).await;
        assert!(shops.is_empty());
    }

    #[tokio::test]
    async fn single_invalid_row_suppresses_everything() {
        let mut bad = shop(2, "壊れた店");
        bad.url = Some("not a url".to_string());
        let store = MemoryStore::with_shops(vec![shop(1, "良い店"), bad]);
        let shops = get_all_shops(&store, &Config::for_tests()).await;
        assert!(shops.is_empty());
    }

    #[tokio::test]
    async fn recommended_rows_sort_before_recent_rows() {
        let mut sushi = shop(1, "Sushi");
        sushi.updated_at = Some("2024-04-10T00:00:00+00:00".to_string());
        let mut ramen = shop(2, "Ramen");
        ramen.updated_at = Some("2024-04-20T00:00:00+00:00".to_string());
        ramen.egami_hirano = Some("egami".to_string());

        let store = MemoryStore::with_shops(vec![sushi, ramen]);
        let shops = get_all_shops(&store, &Config::for_tests()).await;
        assert_eq!(
            shops.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            vec!["Ramen", "Sushi"]
        );
    }

    #[tokio::test]
    async fn recency_orders_within_partition() {
        let mut old = shop(1, "old");
        old.updated_at = Some("2024-01-01T00:00:00+00:00".to_string());
        let mut fresh = shop(2, "fresh");
        fresh.updated_at = Some("2024-06-01T00:00:00+00:00".to_string());
        let created_only = shop(3, "created-only"); // falls back to created_at

        let store = MemoryStore::with_shops(vec![old, fresh, created_only]);
        let shops = get_all_shops(&store, &Config::for_tests()).await;
        assert_eq!(
            shops.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            vec!["fresh", "created-only", "old"]
        );
    }

    #[tokio::test]
    async fn blank_recommender_counts_as_absent() {
        let mut blank = shop(1, "blank");
        blank.egami_hirano = Some("  ".to_string());
        let mut tagged = shop(2, "tagged");
        tagged.egami_hirano = Some("hirano".to_string());

        let store = MemoryStore::with_shops(vec![blank, tagged]);
        let shops = get_all_shops(&store, &Config::for_tests()).await;
        assert_eq!(shops[0].name, "tagged");
    }

    #[tokio::test]
    async fn legacy_merge_appends_negative_ids() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"name": "旧店", "egami-hirano": "egami"}}]"#).unwrap();

        let mut config = Config::for_tests();
        config.enable_legacy_merge = true;
        config.legacy_data_path = Some(file.path().to_string_lossy().into_owned());

        let store = MemoryStore::with_shops(vec![shop(1, "新店")]);
        let shops = get_all_shops(&store, &config).await;
        assert_eq!(shops.len(), 2);
        assert!(shops.iter().any(|s| s.id == -1));
        // id uniqueness across the merged space
        let mut ids: Vec<i64> = shops.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), shops.len());
    }
}
