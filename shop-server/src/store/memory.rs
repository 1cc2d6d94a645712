//! In-process store
//!
//! Backs development runs without hosted credentials and the test
//! suite. Same contract as the REST client, including the
//! no-matching-row error code.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};

use super::{OptionColumns, ShopStore, StoreError, StoreResult};
use shared::{Shop, ShopInsert, ShopUpdate};

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    rows: Vec<Shop>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing rows; the id counter continues past the
    /// highest seeded id. Legacy (negative) seed ids never pull the
    /// counter below zero, inserts always mint positive ids.
    pub fn with_shops(shops: Vec<Shop>) -> Self {
        let next_id = shops.iter().map(|s| s.id).max().unwrap_or(0).max(0);
        Self {
            inner: Mutex::new(Inner {
                rows: shops,
                next_id,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // Lock poisoning only happens after a panic in another holder;
        // recover with the data as-is.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn now() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

#[async_trait]
impl ShopStore for MemoryStore {
    async fn select_all(&self) -> StoreResult<Vec<Shop>> {
        Ok(self.lock().rows.clone())
    }

    async fn select_option_columns(&self) -> StoreResult<Vec<OptionColumns>> {
        Ok(self
            .lock()
            .rows
            .iter()
            .map(|s| OptionColumns {
                genre: s.genre.clone(),
                area_category: s.area_category.clone(),
            })
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Shop>> {
        Ok(self.lock().rows.iter().find(|s| s.id == id).cloned())
    }

    async fn insert(&self, data: ShopInsert) -> StoreResult<Shop> {
        let mut inner = self.lock();
        inner.next_id += 1;
        let shop = Shop {
            id: inner.next_id,
            created_at: Self::now(),
            updated_at: None,
            url: data.url,
            name: data.name,
            area: data.area,
            holiday: data.holiday,
            genre: data.genre,
            area_category: data.area_category,
            is_takemachelin: data.is_takemachelin,
            memo: data.memo,
            egami_hirano: data.egami_hirano.map(|r| r.as_str().to_string()),
            visit: data.visit.map(|v| v.as_str().to_string()),
            images: data.images,
            star: data.star,
        };
        inner.rows.push(shop.clone());
        Ok(shop)
    }

    async fn update(&self, id: i64, data: ShopUpdate) -> StoreResult<Shop> {
        let mut inner = self.lock();
        let row = inner
            .rows
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::no_rows(format!("Shop {id} not found")))?;
        row.name = data.name;
        row.genre = data.genre;
        row.area = data.area;
        row.url = data.url;
        row.holiday = data.holiday;
        row.area_category = data.area_category;
        row.memo = data.memo;
        row.egami_hirano = data.egami_hirano.map(|r| r.as_str().to_string());
        row.visit = data.visit.map(|v| v.as_str().to_string());
        row.images = data.images;
        row.star = data.star;
        row.updated_at = Some(Self::now());
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let mut inner = self.lock();
        let before = inner.rows.len();
        inner.rows.retain(|s| s.id != id);
        if inner.rows.len() == before {
            return Err(StoreError::no_rows(format!("Shop {id} not found")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Recommender, ShopForm};

    fn form(name: &str) -> ShopForm {
        ShopForm {
            name: name.to_string(),
            genre: Some("ラーメン".to_string()),
            area: None,
            url: None,
            holiday: None,
            area_category: None,
            memo: None,
            egami_hirano: Some(Recommender::Hirano),
            visit: None,
            images: None,
            star: None,
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_positive_ids() {
        let store = MemoryStore::new();
        let a = store.insert(form("a").into()).await.unwrap();
        let b = store.insert(form("b").into()).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.egami_hirano.as_deref(), Some("hirano"));
    }

    #[tokio::test]
    async fn legacy_seed_ids_do_not_poison_the_counter() {
        let legacy: Shop = serde_json::from_value(serde_json::json!({
            "id": -2,
            "created_at": "1970-01-01T00:00:00+00:00",
            "name": "旧店",
        }))
        .unwrap();
        let store = MemoryStore::with_shops(vec![legacy]);
        let inserted = store.insert(form("a").into()).await.unwrap();
        assert_eq!(inserted.id, 1);
    }

    #[tokio::test]
    async fn update_missing_row_reports_no_rows_code() {
        let store = MemoryStore::new();
        let err = store.update(99, form("x").into()).await.unwrap_err();
        assert!(err.is_no_rows());
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let store = MemoryStore::new();
        let a = store.insert(form("a").into()).await.unwrap();
        store.delete(a.id).await.unwrap();
        assert!(store.find_by_id(a.id).await.unwrap().is_none());
        assert!(store.delete(a.id).await.unwrap_err().is_no_rows());
    }
}
