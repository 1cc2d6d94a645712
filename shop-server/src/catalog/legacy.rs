//! Legacy-record adapter
//!
//! Converts rows from the retired flat JSON dataset into the
//! canonical [`Shop`] shape. Legacy rows get the disjoint negative
//! id space `-(index + 1)` — legacy order stays recoverable and the
//! ids never collide with the store's auto-increment — plus the
//! epoch timestamp sentinel. Malformed URLs and arrays coerce to
//! null with a warning naming the offending index; validation itself
//! happens downstream so native and legacy rows go through one
//! unified pass.

use std::path::Path;

use serde_json::Value;

use shared::{LEGACY_EPOCH, Shop};

/// Load and adapt the legacy dataset; unreadable or unparseable
/// files degrade to an empty list with an error log.
pub fn load_legacy_shops(path: &Path) -> Vec<Shop> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "failed to read legacy data file");
            return Vec::new();
        }
    };
    match serde_json::from_str::<Vec<Value>>(&raw) {
        Ok(records) => adapt_legacy_records(&records),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "failed to parse legacy data file");
            Vec::new()
        }
    }
}

/// Adapt loosely-typed legacy records into canonical rows.
pub fn adapt_legacy_records(records: &[Value]) -> Vec<Shop> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| adapt_one(index, record))
        .collect()
}

fn adapt_one(index: usize, record: &Value) -> Shop {
    Shop {
        id: -(index as i64 + 1),
        created_at: LEGACY_EPOCH.to_string(),
        updated_at: None,
        url: coerce_url(index, record.get("url")),
        name: string_field(record, "name").unwrap_or_default(),
        area: string_field(record, "area"),
        holiday: string_field(record, "holiday"),
        genre: string_field(record, "genre"),
        area_category: string_field(record, "area_category"),
        is_takemachelin: record.get("is_takemachelin").and_then(Value::as_bool) == Some(true),
        memo: string_field(record, "memo"),
        // The legacy dataset used a hyphenated column name
        egami_hirano: string_field(record, "egami-hirano"),
        visit: string_field(record, "visit"),
        images: coerce_images(record),
        star: None,
    }
}

fn string_field(record: &Value, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .filter(|s| !s.is_empty())
}

/// Non-empty string parsing as a URL, else null with a warning.
fn coerce_url(index: usize, value: Option<&Value>) -> Option<String> {
    let value = value?;
    match value.as_str() {
        Some(s) if !s.is_empty() && url::Url::parse(s).is_ok() => Some(s.to_string()),
        _ if value.is_null() => None,
        _ => {
            tracing::warn!(index, raw = %value, "legacy record has an invalid url, dropping");
            None
        }
    }
}

/// `images` must be an array of valid absolute URLs; anything else
/// filters down to null, never an empty array. The oldest rows
/// carried a singular `image` string instead.
fn coerce_images(record: &Value) -> Option<Vec<String>> {
    let entries: Vec<String> = match record.get("images") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .filter(|s| !s.is_empty() && url::Url::parse(s).is_ok())
            .map(str::to_string)
            .collect(),
        _ => match record.get("image").and_then(Value::as_str) {
            Some(s) if !s.is_empty() && url::Url::parse(s).is_ok() => vec![s.to_string()],
            _ => Vec::new(),
        },
    };
    if entries.is_empty() { None } else { Some(entries) }
}
