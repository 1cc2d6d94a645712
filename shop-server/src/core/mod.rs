//! 核心模块 - 配置、状态、服务器

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::{Server, build_app};
pub use state::ServerState;
