//! Shop API Handlers

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::catalog::{filter_shops, get_all_shops};
use crate::core::ServerState;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};
use shared::{Shop, ShopForm, ShopInsert, ShopQuery, ShopUpdate};

/// GET /api/shops - 获取店铺列表
///
/// 不带筛选参数时返回完整集合（推荐优先、最近更新优先）；
/// 带任一筛选参数时应用筛选引擎（推荐优先、名称升序）。
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<AppResponse<Vec<Shop>>> {
    let shops = get_all_shops(state.store.as_ref(), &state.config).await;

    if ShopQuery::mentioned_in(&params) {
        let query = ShopQuery::from_params(&params);
        return ok(filter_shops(&shops, &query));
    }
    ok(shops)
}

/// GET /api/shops/:id - 获取单个店铺
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Shop>>> {
    let shop = state
        .store
        .find_by_id(id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("Shop {}", id)))?;
    Ok(ok(shop))
}

/// POST /api/shops - 新建店铺
///
/// 表单验证失败时返回 400，`details` 携带字段级错误。
pub async fn create(
    _user: CurrentUser,
    State(state): State<ServerState>,
    Json(form): Json<ShopForm>,
) -> AppResult<(StatusCode, Json<AppResponse<Shop>>)> {
    form.validate().map_err(AppError::form_invalid)?;

    let shop = state
        .store
        .insert(ShopInsert::from(form))
        .await
        .map_err(AppError::from)?;
    tracing::info!(id = shop.id, name = %shop.name, "shop created");
    Ok((StatusCode::CREATED, ok(shop)))
}

/// PUT /api/shops/:id - 更新店铺
pub async fn update(
    _user: CurrentUser,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(form): Json<ShopForm>,
) -> AppResult<Json<AppResponse<Shop>>> {
    // 旧数据源是只读的，负数 id 不可写
    if id <= 0 {
        return Err(AppError::invalid("Legacy records are read-only"));
    }
    form.validate().map_err(AppError::form_invalid)?;

    let shop = state
        .store
        .update(id, ShopUpdate::from(form))
        .await
        .map_err(AppError::from)?;
    tracing::info!(id = shop.id, "shop updated");
    Ok(ok(shop))
}

/// DELETE /api/shops/:id - 删除店铺
pub async fn delete(
    _user: CurrentUser,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    if id <= 0 {
        return Err(AppError::invalid("Legacy records are read-only"));
    }
    state.store.delete(id).await.map_err(AppError::from)?;
    tracing::info!(id, "shop deleted");
    Ok(ok_with_message((), format!("Shop {} deleted", id)))
}
