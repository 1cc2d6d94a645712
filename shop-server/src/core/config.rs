//! 服务器配置
//!
//! # 环境变量
//!
//! 所有配置项都可以通过环境变量覆盖：
//!
//! | 环境变量 | 默认值 | 说明 |
//! |----------|--------|------|
//! | HTTP_PORT | 3000 | HTTP 服务端口 |
//! | SUPABASE_URL | (无) | 托管存储/认证服务地址；未设置时使用内存实现 |
//! | SUPABASE_ANON_KEY | (空) | 匿名 API key |
//! | STORAGE_BUCKET | shop-images | 图片 bucket 名 |
//! | LEGACY_DATA_PATH | (无) | 旧 JSON 数据文件路径 |
//! | ENABLE_LEGACY_MERGE | false | 是否合并旧数据源 |
//! | DEV_LOGIN_EMAIL | dev@example.com | 内存认证的开发账号 |
//! | DEV_LOGIN_PASSWORD | devpass | 内存认证的开发密码 |
//! | ENVIRONMENT | development | 运行环境 |
//! | LOG_DIR | (无) | 日志文件目录 |
//!
//! # 示例
//!
//! ```ignore
//! SUPABASE_URL=https://xyz.supabase.co HTTP_PORT=8080 cargo run
//! ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 托管服务地址 (存储 + 认证 + 对象存储共用)
    pub service_url: Option<String>,
    /// 匿名 API key
    pub anon_key: String,
    /// 图片 bucket
    pub storage_bucket: String,
    /// 旧 JSON 数据文件路径
    pub legacy_data_path: Option<String>,
    /// 是否把旧数据源合并进读取结果
    pub enable_legacy_merge: bool,
    /// 内存认证的开发账号
    pub dev_login_email: String,
    /// 内存认证的开发密码
    pub dev_login_password: String,
    /// 日志文件目录 (可选)
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            service_url: std::env::var("SUPABASE_URL").ok().filter(|v| !v.is_empty()),
            anon_key: std::env::var("SUPABASE_ANON_KEY").unwrap_or_default(),
            storage_bucket: std::env::var("STORAGE_BUCKET")
                .unwrap_or_else(|_| "shop-images".into()),
            legacy_data_path: std::env::var("LEGACY_DATA_PATH")
                .ok()
                .filter(|v| !v.is_empty()),
            enable_legacy_merge: std::env::var("ENABLE_LEGACY_MERGE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            dev_login_email: std::env::var("DEV_LOGIN_EMAIL")
                .unwrap_or_else(|_| "dev@example.com".into()),
            dev_login_password: std::env::var("DEV_LOGIN_PASSWORD")
                .unwrap_or_else(|_| "devpass".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|v| !v.is_empty()),
        }
    }

    /// 测试用的最小配置（全部内存实现，不合并旧数据）
    pub fn for_tests() -> Self {
        Self {
            http_port: 0,
            environment: "test".into(),
            service_url: None,
            anon_key: String::new(),
            storage_bucket: "shop-images".into(),
            legacy_data_path: None,
            enable_legacy_merge: false,
            dev_login_email: "dev@example.com".into(),
            dev_login_password: "devpass".into(),
            log_dir: None,
        }
    }
}
