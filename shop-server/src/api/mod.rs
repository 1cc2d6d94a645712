//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 认证相关接口
//! - [`shops`] - 店铺管理接口
//! - [`options`] - 筛选选项接口
//! - [`upload`] - 图片上传接口

pub mod auth;
pub mod health;
pub mod options;
pub mod shops;
pub mod upload;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
