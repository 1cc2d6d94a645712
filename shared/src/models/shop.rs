//! Shop Model
//!
//! The canonical shop row plus the create/update payloads submitted
//! by the form. Two independent schemas:
//!
//! - [`Shop`] — the persisted shape. Descriptive fields are nullable,
//!   `id` and `name` are required, `images` entries must be valid URLs.
//! - [`ShopForm`] — user input. `name` is required, `url` must be a
//!   valid URL or the empty string, reviewer/visitor tags are typed
//!   enums.
//!
//! Validation never panics; callers branch on the returned
//! `ValidationErrors` field map.

use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

/// Pseudo-genre token for curated (タケマシュラン) listings.
pub const TAKEMACHELIN_GENRE: &str = "タケマシュラン";

/// Timestamp sentinel assigned to legacy rows (the source had none).
pub const LEGACY_EPOCH: &str = "1970-01-01T00:00:00+00:00";

/// Reviewer tag (`egami_hirano` column): one of the two reviewers or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommender {
    #[serde(rename = "egami")]
    Egami,
    #[serde(rename = "hirano")]
    Hirano,
    #[serde(rename = "egami-hirano")]
    Both,
}

impl Recommender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommender::Egami => "egami",
            Recommender::Hirano => "hirano",
            Recommender::Both => "egami-hirano",
        }
    }
}

/// Visitor tag (`visit` column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visitor {
    #[serde(rename = "zumi")]
    Zumi,
    #[serde(rename = "motomu")]
    Motomu,
}

impl Visitor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visitor::Zumi => "zumi",
            Visitor::Motomu => "motomu",
        }
    }
}

/// Shop entity (persisted row)
///
/// Positive `id` = native store row, negative `id` = legacy row
/// synthesized as `-(original index + 1)`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Shop {
    pub id: i64,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default)]
    #[validate(custom(function = validate_url_value, message = "有効なURL形式ではありません"))]
    pub url: Option<String>,
    #[validate(length(min = 1, message = "店舗名は必須です"))]
    pub name: String,
    /// 最寄り駅など
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub holiday: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    /// 地域カテゴリ (フィルター用)
    #[serde(default)]
    pub area_category: Option<String>,
    /// Nullable in the store; null/absent must read as false, never as an error.
    #[serde(default, deserialize_with = "bool_null_as_false")]
    pub is_takemachelin: bool,
    #[serde(default)]
    pub memo: Option<String>,
    /// egami か hirano か両方か (stored as a free string)
    #[serde(default)]
    pub egami_hirano: Option<String>,
    /// zumi か motomu か
    #[serde(default)]
    pub visit: Option<String>,
    #[serde(default)]
    #[validate(custom(function = validate_image_urls))]
    pub images: Option<Vec<String>>,
    /// 0〜5 の 0.5 刻み評価
    #[serde(default)]
    #[validate(custom(function = validate_star))]
    pub star: Option<f64>,
}

impl Shop {
    /// Strict flagged check (`is_takemachelin == true`).
    pub fn is_flagged(&self) -> bool {
        self.is_takemachelin
    }

    /// Whether a reviewer tag is present (null and blank are equivalent).
    pub fn has_recommender(&self) -> bool {
        self.egami_hirano
            .as_deref()
            .is_some_and(|v| !v.trim().is_empty())
    }

    /// Timestamp used for recency ordering: `updated_at` falling back
    /// to `created_at`.
    pub fn sort_timestamp(&self) -> &str {
        self.updated_at.as_deref().unwrap_or(&self.created_at)
    }
}

/// Create/edit shop payload (form input)
///
/// Transient: validated before submission and discarded once the
/// request resolves.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ShopForm {
    #[validate(length(min = 1, message = "店舗名は必須です"))]
    pub name: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    /// Valid URL, or the empty string (treated as absent).
    #[serde(default)]
    #[validate(custom(function = validate_url_or_empty, message = "有効なURL形式で入力してください"))]
    pub url: Option<String>,
    #[serde(default)]
    pub holiday: Option<String>,
    #[serde(default)]
    pub area_category: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub egami_hirano: Option<Recommender>,
    #[serde(default)]
    pub visit: Option<Visitor>,
    #[serde(default)]
    #[validate(custom(function = validate_image_urls, message = "有効な画像URL形式である必要があります"))]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    #[validate(custom(function = validate_star))]
    pub star: Option<f64>,
}

/// Insert payload sent to the store
#[derive(Debug, Clone, Serialize)]
pub struct ShopInsert {
    pub name: String,
    pub genre: Option<String>,
    pub area: Option<String>,
    pub url: Option<String>,
    pub holiday: Option<String>,
    pub area_category: Option<String>,
    pub memo: Option<String>,
    pub egami_hirano: Option<Recommender>,
    pub visit: Option<Visitor>,
    pub images: Option<Vec<String>>,
    pub star: Option<f64>,
    pub is_takemachelin: bool,
}

impl From<ShopForm> for ShopInsert {
    fn from(form: ShopForm) -> Self {
        Self {
            name: form.name,
            genre: form.genre,
            area: form.area,
            url: empty_as_none(form.url),
            holiday: form.holiday,
            area_category: form.area_category,
            memo: form.memo,
            egami_hirano: form.egami_hirano,
            visit: form.visit,
            images: form.images,
            star: form.star,
            is_takemachelin: false,
        }
    }
}

/// Update payload sent to the store
///
/// The edit form always resubmits the full field set, so cleared
/// fields are written back as null.
#[derive(Debug, Clone, Serialize)]
pub struct ShopUpdate {
    pub name: String,
    pub genre: Option<String>,
    pub area: Option<String>,
    pub url: Option<String>,
    pub holiday: Option<String>,
    pub area_category: Option<String>,
    pub memo: Option<String>,
    pub egami_hirano: Option<Recommender>,
    pub visit: Option<Visitor>,
    pub images: Option<Vec<String>>,
    pub star: Option<f64>,
}

impl From<ShopForm> for ShopUpdate {
    fn from(form: ShopForm) -> Self {
        Self {
            name: form.name,
            genre: form.genre,
            area: form.area,
            url: empty_as_none(form.url),
            holiday: form.holiday,
            area_category: form.area_category,
            memo: form.memo,
            egami_hirano: form.egami_hirano,
            visit: form.visit,
            images: form.images,
            star: form.star,
        }
    }
}

// ========== Serde / validation helpers ==========

fn bool_null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn empty_as_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn is_valid_url(value: &str) -> bool {
    url::Url::parse(value).is_ok()
}

fn validate_url_value(value: &str) -> Result<(), ValidationError> {
    if is_valid_url(value) {
        Ok(())
    } else {
        Err(ValidationError::new("url"))
    }
}

fn validate_url_or_empty(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || is_valid_url(value) {
        Ok(())
    } else {
        Err(ValidationError::new("url"))
    }
}

fn validate_image_urls(images: &Vec<String>) -> Result<(), ValidationError> {
    if images.iter().all(|u| !u.is_empty() && is_valid_url(u)) {
        Ok(())
    } else {
        Err(ValidationError::new("image_url"))
    }
}

/// Rating must be within [0, 5] at 0.5 granularity.
fn validate_star(star: f64) -> Result<(), ValidationError> {
    let doubled = star * 2.0;
    if (0.0..=5.0).contains(&star) && doubled.fract() == 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new("star"))
    }
}
