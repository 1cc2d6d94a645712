//! Shop Server - 餐厅店铺目录服务
//!
//! # 架构概述
//!
//! 提供店铺目录的浏览、筛选、搜索和管理：
//!
//! - **目录核心** (`catalog`): 聚合、筛选排序、增量分页、旧数据适配
//! - **存储** (`store`): 托管 `shops` 表的行级访问
//! - **认证** (`auth`): 会话提供方网关与请求提取器
//! - **对象存储** (`storage`): 图片上传的 bucket 客户端
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! shop-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # 会话网关、CurrentUser 提取器
//! ├── catalog/       # 聚合、筛选、分页、旧数据适配
//! ├── store/         # shops 表访问 (REST / 内存)
//! ├── storage/       # 对象存储 (REST / 内存)
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误、日志、文本正规化、时间
//! ```

pub mod api;
pub mod auth;
pub mod catalog;
pub mod core;
pub mod storage;
pub mod store;
pub mod utils;

// Re-export 公共类型
pub use auth::{AuthGateway, CurrentUser, MemoryAuth, RestAuth};
pub use catalog::{PAGE_SIZE, Paginator, filter_shops, get_all_shops};
pub use core::{Config, Server, ServerState, build_app};
pub use storage::{MemoryStorage, ObjectStorage, RestStorage};
pub use store::{MemoryStore, RestStore, ShopStore};
pub use utils::{AppError, AppResponse, AppResult, normalize};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
