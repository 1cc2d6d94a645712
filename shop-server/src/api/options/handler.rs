//! Filter-option Handlers
//!
//! Distinct `genre` / `area_category` values across the table, for
//! populating the UI's filter dropdowns. Sorted, deduplicated, blank
//! values dropped.

use std::collections::BTreeSet;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::{AppError, AppResponse, AppResult, ok};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsResponse {
    pub genres: Vec<String>,
    pub area_categories: Vec<String>,
}

/// GET /api/options - 获取筛选候选值
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<AppResponse<OptionsResponse>>> {
    let rows = state
        .store
        .select_option_columns()
        .await
        .map_err(AppError::from)?;

    let mut genres = BTreeSet::new();
    let mut area_categories = BTreeSet::new();
    for row in rows {
        if let Some(genre) = row.genre.filter(|v| !v.is_empty()) {
            genres.insert(genre);
        }
        if let Some(area) = row.area_category.filter(|v| !v.is_empty()) {
            area_categories.insert(area);
        }
    }

    Ok(ok(OptionsResponse {
        genres: genres.into_iter().collect(),
        area_categories: area_categories.into_iter().collect(),
    }))
}
