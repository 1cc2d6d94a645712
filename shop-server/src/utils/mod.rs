//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] / [`AppResponse`] - 统一错误和响应结构
//! - [`normalize`] - 检索用文字正规化
//! - 日志、时间工具

pub mod error;
pub mod logger;
pub mod normalize;
pub mod time;

pub use error::{ok, ok_with_message};
pub use error::{AppError, AppResponse, AppResult};
pub use normalize::normalize;
