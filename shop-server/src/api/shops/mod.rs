//! Shop API 模块
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/shops | GET | 列表（可选筛选参数） | 无 |
//! | /api/shops | POST | 新建 | 需要 |
//! | /api/shops/{id} | GET | 单条查询 | 无 |
//! | /api/shops/{id} | PUT | 更新 | 需要 |
//! | /api/shops/{id} | DELETE | 删除 | 需要 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/shops", shop_routes())
}

fn shop_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
