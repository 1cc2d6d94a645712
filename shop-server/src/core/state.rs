//! 服务器状态
//!
//! `ServerState` 持有所有外部协作者的共享引用，使用 `Arc`
//! 实现浅拷贝。协作者全部通过构造注入，不存在模块级单例：
//! 配置了托管服务地址时使用 REST 实现，否则退回内存实现
//! （开发模式）。

use std::sync::Arc;

use crate::auth::{AuthGateway, MemoryAuth, RestAuth};
use crate::core::Config;
use crate::storage::{MemoryStorage, ObjectStorage, RestStorage};
use crate::store::{MemoryStore, RestStore, ShopStore};

#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub store: Arc<dyn ShopStore>,
    pub auth: Arc<dyn AuthGateway>,
    pub storage: Arc<dyn ObjectStorage>,
}

impl ServerState {
    /// 根据配置选择协作者实现
    pub fn initialize(config: &Config) -> Self {
        match &config.service_url {
            Some(url) => {
                tracing::info!(service = %url, "using hosted store/auth/storage");
                Self::with_collaborators(
                    config.clone(),
                    Arc::new(RestStore::new(url, &config.anon_key)),
                    Arc::new(RestAuth::new(url, &config.anon_key)),
                    Arc::new(RestStorage::new(
                        url,
                        &config.anon_key,
                        &config.storage_bucket,
                    )),
                )
            }
            None => {
                tracing::warn!("SUPABASE_URL not set, falling back to in-memory collaborators");
                Self::with_collaborators(
                    config.clone(),
                    Arc::new(MemoryStore::new()),
                    Arc::new(MemoryAuth::new(
                        &config.dev_login_email,
                        &config.dev_login_password,
                    )),
                    Arc::new(MemoryStorage::new()),
                )
            }
        }
    }

    /// 显式注入协作者（测试与嵌入场景）
    pub fn with_collaborators(
        config: Config,
        store: Arc<dyn ShopStore>,
        auth: Arc<dyn AuthGateway>,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            auth,
            storage,
        }
    }
}
